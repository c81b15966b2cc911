//! SKYHOP Simulation Core
//!
//! Бесконечный прыгун на Bevy ECS 0.16 + Rapier 2D: игрок скачет вверх по
//! процедурной колонне платформ, камера — скалярный сдвиг от его высоты.
//!
//! Слои:
//! - ECS = game state (платформы, прыжки, генерация, камера)
//! - Rapier = физика (гравитация, сенсор-контакты, импульсы)
//! - Рендер/окно/ввод/ассеты — внешние коллабораторы (см. `view`, `player`)

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod config;
pub mod logger;
pub mod physics;
pub mod platforms;
pub mod player;
pub mod view;
pub mod worldgen;

// Re-export базовых типов для удобства
pub use config::SimConfig;
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use physics::bounce::PlatformBroken;
pub use physics::{
    convert, spawn_debris_half, spawn_platform, spawn_player, PhysicsPlugin, PHYSICS_DT,
    PLATFORM_HEIGHT, PLATFORM_WIDTH, PLAYER_RADIUS, SIM_HZ, SURFACE_HEIGHT, SURFACE_WIDTH,
};
pub use platforms::{DebrisHalf, MovingPlatform, Platform, PlatformKind, PlatformsPlugin, Spring};
pub use player::{AnimationState, MovementInput, Player, PlayerPlugin};
pub use view::{
    scroll_offset_for, scrolled, DrawList, DrawSprite, ScrollOffset, SpriteAnchor, ViewPlugin,
};
pub use worldgen::{generate_layout, PlatformBlueprint, WorldGenPlugin};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIM_HZ))
            // Tuning и RNG не перетираем, если оболочка уже вставила свои
            .init_resource::<SimConfig>()
            .init_resource::<DeterministicRng>()
            // Подсистемы
            .add_plugins((
                PhysicsPlugin,
                PlatformsPlugin,
                PlayerPlugin,
                WorldGenPlugin,
                ViewPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Виртуальное время двигается вручную ровно на один тик за `app.update()`
/// — прогоны воспроизводимы независимо от wall-clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIM_HZ,
        )))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(SIM_HZ));

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты сериализуются через Debug в порядке Entity index —
/// достаточно для побайтового сравнения прогонов.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    let mut snapshot = Vec::new();
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
