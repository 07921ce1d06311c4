//! Pocket Pool entry point
//!
//! Natively this plays a seeded autoplay game headless and prints the final
//! table as JSON. The browser build drives `pocket_pool::web` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pocket_pool::sim::{Game, GameView};
    use pocket_pool::{Autoplayer, Settings};

    env_logger::init();

    let mut settings = match std::env::var("POCKET_POOL_SETTINGS") {
        Ok(json) => Settings::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring bad POCKET_POOL_SETTINGS: {}", e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    };
    if let Some(seed) = std::env::args().nth(1).and_then(|s| s.parse().ok()) {
        settings.demo_seed = seed;
    }

    let players = std::env::args()
        .nth(2)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(2);

    log::info!("Pocket Pool (native) starting, seed {}", settings.demo_seed);
    let mut autoplayer = Autoplayer::new(settings.demo_seed);
    let mut game = Game::new(settings);
    for _ in 2..players {
        if let Err(rejection) = game.add_player() {
            log::warn!("Cannot add player: {}", rejection);
            break;
        }
    }

    const MAX_TICKS: u64 = 200_000;
    let mut ticks = 0;
    while ticks < MAX_TICKS && !game.phase().is_over() {
        if let Some(command) = autoplayer.next_command(&game) {
            let _ = game.apply(command);
        }
        for dropped in game.step() {
            log::info!(
                "tick {}: ball {} into pocket {}",
                dropped.tick,
                dropped.ball.id,
                dropped.pocket
            );
        }
        ticks += 1;
    }

    log::info!("{} after {} ticks", game.status(), ticks);
    match GameView::capture(&game).to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize final state: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is pocket_pool::web::start, this is just to satisfy the compiler
}
