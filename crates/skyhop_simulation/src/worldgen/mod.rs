//! Генерация мира
//!
//! Одноразовая раскладка до старта: 400 платформ восходящей колонной,
//! вид платформы — взвешенный выбор {Regular 0.7, Moving 0.1, Weak 0.2},
//! X равномерный по полю, шаг подъёма случайный в фиксированном диапазоне.
//! Дальше мир не растёт: потолок забега известен на этапе генерации.
//!
//! Чистая раскладка отделена от спавна — детерминизм-тесты сэмплируют
//! `generate_layout` без App.

use bevy::prelude::*;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::config::SimConfig;
use crate::logger::log_info;
use crate::physics::{spawn_platform, spawn_player, PLATFORM_WIDTH};
use crate::platforms::{PlatformKind, SPRING_WIDTH};
use crate::DeterministicRng;

/// Веса видов платформ (порядок = PLATFORM_KINDS)
const KIND_WEIGHTS: [f32; 3] = [0.7, 0.1, 0.2];
const PLATFORM_KINDS: [PlatformKind; 3] = [
    PlatformKind::Regular,
    PlatformKind::Moving,
    PlatformKind::Weak,
];

/// Заготовка платформы до спавна
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformBlueprint {
    /// Позиция в render-space (якорь — левый верх коробки)
    pub screen_pos: Vec2,
    pub kind: PlatformKind,
    /// Сдвиг пружины от левого края, только Regular
    pub spring_offset: Option<f32>,
}

/// Чистая раскладка мира от seeded RNG
pub fn generate_layout(rng: &mut impl Rng, config: &SimConfig) -> Vec<PlatformBlueprint> {
    let weights = WeightedIndex::new(KIND_WEIGHTS).expect("константные веса корректны");

    let mut layout = Vec::with_capacity(config.platform_count);
    let mut screen_y = config.base_screen_y;

    for _ in 0..config.platform_count {
        let kind = PLATFORM_KINDS[weights.sample(rng)];
        let x = rng.gen_range(0..=config.spawn_x_max) as f32;

        // Бросок пружины делается для каждой платформы (стабильный RNG-поток),
        // но пружину несут только Regular
        let spring_roll = rng.gen_range(0..config.spring_chance);
        let spring_offset = if spring_roll == 0 && kind == PlatformKind::Regular {
            Some(rng.gen_range(0..=(PLATFORM_WIDTH - SPRING_WIDTH) as u32) as f32)
        } else {
            None
        };

        layout.push(PlatformBlueprint {
            screen_pos: Vec2::new(x, screen_y),
            kind,
            spring_offset,
        });

        screen_y -= rng.gen_range(config.step_min..=config.step_max) as f32;
    }

    layout
}

/// Startup-система: игрок + вся колонна платформ
fn spawn_initial_world(
    mut commands: Commands,
    mut rng: ResMut<DeterministicRng>,
    config: Res<SimConfig>,
) {
    spawn_player(
        &mut commands,
        Vec2::new(config.player_start_x, config.player_start_y),
    );

    let layout = generate_layout(&mut rng.rng, &config);
    let springs = layout.iter().filter(|b| b.spring_offset.is_some()).count();
    for blueprint in &layout {
        spawn_platform(
            &mut commands,
            blueprint.screen_pos,
            blueprint.kind,
            blueprint.spring_offset,
        );
    }

    log_info(&format!(
        "Мир сгенерирован: {} платформ, {} пружин (seed {})",
        layout.len(),
        springs,
        rng.seed
    ));
}

/// Plugin генерации мира (одноразовый Startup)
pub struct WorldGenPlugin;

impl Plugin for WorldGenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_initial_world);
    }
}
