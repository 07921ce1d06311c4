//! The game context and its command surface
//!
//! `Game` owns everything mutable: table, roster and rule state. The host
//! owns the `Game`, feeds it commands, calls `step` once per tick and reads
//! it back for drawing. A `step` is atomic; nothing should read the table
//! between the physics pass and the rules pass.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::aim::is_shot;
use super::rules::{Phase, RuleEngine};
use super::roster::Roster;
use super::state::{Ball, CUE_ID, PocketedBall, TableState};
use super::tick::advance_tick;
use crate::consts::*;
use crate::settings::Settings;

/// Why a command was ignored. Nothing changes when a command is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// Not valid in the current phase
    WrongPhase,
    /// Balls are still rolling
    BallsMoving,
    /// Drag too short to be a shot
    NoShot,
    /// Cue ball cannot go there
    InvalidPlacement,
    RosterFull,
    RosterMinimum,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::WrongPhase => "not allowed in the current phase",
            Rejection::BallsMoving => "balls are still moving",
            Rejection::NoShot => "drag too short to shoot",
            Rejection::InvalidPlacement => "cue ball cannot be placed there",
            Rejection::RosterFull => "roster is full",
            Rejection::RosterMinimum => "roster is at its minimum size",
        };
        f.write_str(reason)
    }
}

/// Inputs accepted from the front end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Pull-back vector; the cue ball travels the opposite way
    Launch(DVec2),
    PlaceCueBall(DVec2),
    AddPlayer,
    RemovePlayer,
    Reset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub table: TableState,
    pub roster: Roster,
    pub rules: RuleEngine,
    pub settings: Settings,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        Self {
            table: TableState::racked(),
            roster: Roster::default(),
            rules: RuleEngine::default(),
            settings,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.rules.phase
    }

    pub fn winner(&self) -> Option<&str> {
        self.rules.winner()
    }

    /// Re-rack, back to two fresh players, Aiming
    pub fn reset(&mut self) {
        self.table = TableState::racked();
        self.roster = Roster::default();
        self.rules = RuleEngine::default();
        log::info!("New game racked");
    }

    pub fn apply(&mut self, command: Command) -> Result<(), Rejection> {
        let result = match command {
            Command::Launch(vector) => self.launch(vector),
            Command::PlaceCueBall(point) => self.place_cue_ball(point),
            Command::AddPlayer => self.add_player(),
            Command::RemovePlayer => self.remove_player(),
            Command::Reset => {
                self.reset();
                Ok(())
            }
        };
        if let Err(rejection) = result {
            log::debug!("{:?} rejected: {}", command, rejection);
        }
        result
    }

    /// Shoot the cue ball. `vector` is the drag; its length is capped at
    /// `MAX_DRAG`, scaled to a speed, and the ball goes the opposite way.
    pub fn launch(&mut self, vector: DVec2) -> Result<(), Rejection> {
        if self.rules.phase != Phase::Aiming {
            return Err(Rejection::WrongPhase);
        }
        if self.table.balls_moving() {
            return Err(Rejection::BallsMoving);
        }
        if !is_shot(vector) {
            return Err(Rejection::NoShot);
        }
        let shot_scale = self.settings.shot_scale();
        let cue = self.table.cue_ball_mut().ok_or(Rejection::WrongPhase)?;

        let length = vector.length();
        let speed = length.min(MAX_DRAG) * shot_scale;
        cue.vel = -(vector / length) * speed;
        self.rules.phase = Phase::BallsInMotion;
        log::debug!("{} shoots at speed {:.2}", self.roster.current().name, speed);
        Ok(())
    }

    /// Put the cue ball back on the table while it is in hand
    pub fn place_cue_ball(&mut self, point: DVec2) -> Result<(), Rejection> {
        if self.rules.phase != Phase::CueBallInHand {
            return Err(Rejection::WrongPhase);
        }
        if self.table.balls_moving() {
            return Err(Rejection::BallsMoving);
        }
        if !self.is_valid_cue_position(point) {
            return Err(Rejection::InvalidPlacement);
        }
        self.table.insert(Ball::at_rest(CUE_ID, point));
        self.rules.phase = Phase::Aiming;
        Ok(())
    }

    /// On the table, clear of the other balls by `PLACEMENT_CLEARANCE`
    /// radii, and out of every pocket's reach
    pub fn is_valid_cue_position(&self, point: DVec2) -> bool {
        let r = BALL_RADIUS;
        self.table.table.contains(point, r)
            && self
                .table
                .balls()
                .filter(|b| b.id != CUE_ID)
                .all(|b| point.distance(b.pos) >= r * PLACEMENT_CLEARANCE)
            && self.table.table.clear_of_pockets(point, r)
    }

    pub fn add_player(&mut self) -> Result<(), Rejection> {
        self.roster
            .add_player()
            .then_some(())
            .ok_or(Rejection::RosterFull)
    }

    pub fn remove_player(&mut self) -> Result<(), Rejection> {
        self.roster
            .remove_player()
            .then_some(())
            .ok_or(Rejection::RosterMinimum)
    }

    /// True when the current player may start a shot
    pub fn can_aim(&self) -> bool {
        self.rules.phase == Phase::Aiming
            && self.table.cue_ball().is_some()
            && !self.table.balls_moving()
    }

    /// True if a press at `point` should start an aim drag
    pub fn is_aim_target(&self, point: DVec2) -> bool {
        self.can_aim()
            && self.table.cue_ball().is_some_and(|cue| {
                point.distance(cue.pos) <= self.settings.grab_radius(cue.radius)
            })
    }

    /// Run one simulation tick: physics while anything rolls, then rules.
    /// Returns the balls pocketed this tick.
    pub fn step(&mut self) -> Vec<PocketedBall> {
        let batch = if self.table.balls_moving() {
            advance_tick(&mut self.table)
        } else {
            Vec::new()
        };

        if batch.is_empty() {
            self.rules.on_motion_check(&mut self.table);
        } else {
            self.rules.on_pocketed(&batch, &self.table, &mut self.roster);
        }
        batch
    }

    /// Step until the table is still, up to `max_ticks`. Returns ticks run.
    pub fn run_until_rest(&mut self, max_ticks: u32) -> u32 {
        let mut ticks = 0;
        while ticks < max_ticks && (self.table.balls_moving() || self.rules.phase == Phase::BallsInMotion) {
            self.step();
            ticks += 1;
        }
        ticks
    }

    /// One-line status for the HUD
    pub fn status(&self) -> String {
        match &self.rules.phase {
            Phase::GameOver { winner } => format!("{} Wins!", winner),
            Phase::CueBallInHand => "Place the cue ball".to_string(),
            _ if self.table.balls_moving() => "Balls in motion...".to_string(),
            Phase::Aiming => format!("{}'s turn", self.roster.current().name),
            Phase::BallsInMotion => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EIGHT_ID, Suit, rack_center};
    use crate::settings::InputProfile;

    #[test]
    fn test_reset_racks_sixteen() {
        let mut game = Game::default();
        game.table.remove(3);
        game.roster.add_player();
        game.reset();
        assert_eq!(game.table.live_count(), 16);
        assert_eq!(game.table.get(EIGHT_ID).unwrap().pos, rack_center());
        assert_eq!(game.roster.len(), 2);
        assert_eq!(*game.phase(), Phase::Aiming);
        assert!(game.can_aim());
    }

    #[test]
    fn test_launch_sets_reversed_velocity() {
        let mut game = Game::default();
        game.launch(DVec2::new(100.0, 0.0)).unwrap();
        assert_eq!(game.table.cue_ball().unwrap().vel, DVec2::new(-20.0, 0.0));
        assert_eq!(*game.phase(), Phase::BallsInMotion);
        assert_eq!(game.launch(DVec2::new(50.0, 0.0)), Err(Rejection::WrongPhase));
    }

    #[test]
    fn test_launch_caps_power() {
        let mut game = Game::new(Settings::from_profile(InputProfile::Touch));
        game.launch(DVec2::new(0.0, -300.0)).unwrap();
        let vel = game.table.cue_ball().unwrap().vel;
        assert!((vel.y - 15.0).abs() < 1e-12);
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn test_short_drag_is_no_shot() {
        let mut game = Game::default();
        assert_eq!(game.launch(DVec2::new(0.5, -1.0)), Err(Rejection::NoShot));
        assert_eq!(game.launch(DVec2::ZERO), Err(Rejection::NoShot));
        assert_eq!(*game.phase(), Phase::Aiming);
    }

    #[test]
    fn test_shot_comes_to_rest_on_table() {
        let mut game = Game::default();
        // Clear the rack so nothing can drop
        for id in 1..=15 {
            game.table.remove(id);
        }
        game.launch(DVec2::new(100.0, 0.0)).unwrap();
        let ticks = game.run_until_rest(10_000);
        assert!(ticks < 10_000);
        assert!(!game.table.balls_moving());
        assert_eq!(*game.phase(), Phase::Aiming);
        let cue = game.table.cue_ball().unwrap();
        assert!(game.table.table.contains(cue.pos, cue.radius));
    }

    #[test]
    fn test_placement_rules() {
        let mut game = Game::default();
        let spot = DVec2::new(200.0, 200.0);
        assert_eq!(game.place_cue_ball(spot), Err(Rejection::WrongPhase));

        game.table.remove(CUE_ID);
        game.rules.phase = Phase::CueBallInHand;
        assert!(!game.is_valid_cue_position(DVec2::new(5.0, 200.0)));
        // Too close to the apex ball
        assert!(!game.is_valid_cue_position(DVec2::new(580.0, 200.0)));
        // Inside a side pocket's reach
        assert!(!game.is_valid_cue_position(DVec2::new(400.0, 30.0)));

        game.place_cue_ball(spot).unwrap();
        assert_eq!(game.table.cue_ball().unwrap().pos, spot);
        assert_eq!(*game.phase(), Phase::Aiming);
    }

    #[test]
    fn test_scratch_then_place() {
        let mut game = Game::default();
        // Send the cue ball straight into the top-left corner
        game.table.cue_ball_mut().unwrap().pos = DVec2::new(60.0, 60.0);
        game.launch(DVec2::new(50.0, 50.0)).unwrap();
        game.run_until_rest(10_000);

        assert_eq!(*game.phase(), Phase::CueBallInHand);
        assert_eq!(game.roster.current_index(), 1);
        assert!(game.table.cue_ball().is_none());
        assert!(!game.can_aim());
        assert_eq!(game.status(), "Place the cue ball");

        game.place_cue_ball(DVec2::new(300.0, 250.0)).unwrap();
        assert!(game.can_aim());
        assert_eq!(game.status(), "Player 2's turn");
    }

    #[test]
    fn test_roster_commands() {
        let mut game = Game::default();
        assert_eq!(game.apply(Command::RemovePlayer), Err(Rejection::RosterMinimum));
        for _ in 0..6 {
            game.apply(Command::AddPlayer).unwrap();
        }
        assert_eq!(game.apply(Command::AddPlayer), Err(Rejection::RosterFull));
        game.apply(Command::Reset).unwrap();
        assert_eq!(game.roster.len(), 2);
    }

    #[test]
    fn test_aim_target_respects_profile() {
        let game = Game::default();
        assert!(game.is_aim_target(DVec2::new(408.0, 200.0)));
        assert!(!game.is_aim_target(DVec2::new(425.0, 200.0)));

        let touch = Game::new(Settings::from_profile(InputProfile::Touch));
        assert!(touch.is_aim_target(DVec2::new(425.0, 200.0)));
    }

    #[test]
    fn test_status_on_game_over() {
        let mut game = Game::default();
        game.roster.assign_suit(Suit::Solid);
        game.rules.phase = Phase::GameOver {
            winner: "Player 2".to_string(),
        };
        assert_eq!(game.status(), "Player 2 Wins!");
        assert_eq!(game.winner(), Some("Player 2"));
        assert!(!game.can_aim());
    }
}
