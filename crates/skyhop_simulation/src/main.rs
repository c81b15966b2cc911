//! Headless симуляция SKYHOP
//!
//! Запускает App без рендера: игрок падает на стартовые платформы и
//! скачет, пока идут тики. Удобно для проверки детерминизма и прогонов.

use bevy::prelude::*;
use skyhop_simulation::{convert, create_headless_app, Player, SimulationPlugin};

fn main() {
    let seed = 42;
    println!("Starting SKYHOP headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    // Прогоняем 1000 тиков симуляции
    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            let entity_count = app.world().entities().len();
            let height = player_height(&mut app);
            println!(
                "Tick {}: {} entities, player render-Y {:.1}",
                tick, entity_count, height
            );
        }
    }

    println!("Simulation complete!");
}

/// Render-space высота игрока (для прогресс-лога)
fn player_height(app: &mut App) -> f32 {
    let mut query = app
        .world_mut()
        .query_filtered::<&Transform, With<Player>>();
    query
        .iter(app.world())
        .next()
        .map(|transform| convert(transform.translation.truncate()).y)
        .unwrap_or(f32::NAN)
}
