//! Player roster: turn order, suit assignment and elimination

use serde::{Deserialize, Serialize};

use super::state::Suit;
use crate::consts::{MAX_PLAYERS, MIN_PLAYERS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    /// `None` until the player's first legal pocket
    pub suit: Option<Suit>,
    pub eliminated: bool,
}

impl Player {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            name: format!("Player {}", id),
            suit: None,
            eliminated: false,
        }
    }
}

/// Ordered players plus whose turn it is
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
    current: usize,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            players: (1..=MIN_PLAYERS as u32).map(Player::new).collect(),
            current: 0,
        }
    }
}

impl Roster {
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Player {
        &mut self.players[self.current]
    }

    /// Append a player with the next free id. Returns false at capacity.
    pub fn add_player(&mut self) -> bool {
        if self.players.len() >= MAX_PLAYERS {
            return false;
        }
        let id = self.players.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        self.players.push(Player::new(id));
        log::info!("Added Player {} ({} players)", id, self.players.len());
        true
    }

    /// Drop the last player. Returns false at the minimum roster size.
    pub fn remove_player(&mut self) -> bool {
        if self.players.len() <= MIN_PLAYERS {
            return false;
        }
        if let Some(player) = self.players.pop() {
            log::info!("Removed {} ({} players)", player.name, self.players.len());
        }
        if self.current >= self.players.len() {
            self.current = 0;
        }
        if self.players[self.current].eliminated {
            self.switch_player();
        }
        true
    }

    /// Bind `suit` to the current player and the complement to every other
    /// player still unassigned. A player who already has a suit keeps it.
    pub fn assign_suit(&mut self, suit: Suit) {
        let current = self.current;
        for (index, player) in self.players.iter_mut().enumerate() {
            if player.suit.is_some() {
                continue;
            }
            player.suit = Some(if index == current {
                suit
            } else {
                suit.complement()
            });
        }
    }

    pub fn eliminate_current(&mut self) {
        self.players[self.current].eliminated = true;
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| !p.eliminated).count()
    }

    /// Index of the first non-eliminated player after the current one,
    /// wrapping around. `None` only when every player is eliminated.
    pub fn next_active_index(&self) -> Option<usize> {
        let len = self.players.len();
        (1..=len)
            .map(|step| (self.current + step) % len)
            .find(|&index| !self.players[index].eliminated)
    }

    /// Pass the turn to the next non-eliminated player. Stays put if there
    /// is nobody to pass to.
    pub fn switch_player(&mut self) {
        if let Some(next) = self.next_active_index() {
            self.current = next;
            log::debug!("Turn passes to {}", self.players[next].name);
        }
    }
}
