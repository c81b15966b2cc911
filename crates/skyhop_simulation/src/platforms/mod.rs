//! Платформы: компоненты и движение
//!
//! Три вида платформ:
//! - Regular — статичная, может нести пружину
//! - Moving — kinematic, ездит по горизонтали между краями поля
//! - Weak — ломается при первом касании сверху, распадается на два обломка
//!
//! Ломание живёт в `physics::bounce` (это side effect контакта),
//! здесь — данные и drive-система движущихся платформ.

use bevy::prelude::*;
use bevy_rapier2d::plugin::PhysicsSet;

use crate::config::SimConfig;
use crate::physics::{PLATFORM_WIDTH, SURFACE_WIDTH};

/// Ширина спрайта пружины (метаданные ассета, нужны worldgen'у для сдвига)
pub const SPRING_WIDTH: f32 = 18.0;
/// Высота спрайта пружины (render shell сажает пружину на верх платформы)
pub const SPRING_HEIGHT: f32 = 18.0;

/// Вид платформы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Regular,
    Moving,
    Weak,
}

/// Платформа (kinematic sensor-тело, см. `physics::spawn_platform`)
///
/// Позиция тела — левый нижний угол коробки 71×17 (как в разметке уровня).
#[derive(Component, Debug, Clone, Copy)]
pub struct Platform {
    pub kind: PlatformKind,
}

/// Горизонтальный ход движущейся платформы
///
/// Направление ±1, разворот строго на краях поля:
/// x < 0 и x > ширина поля − ширина платформы.
#[derive(Component, Debug, Clone, Copy)]
pub struct MovingPlatform {
    pub direction: f32,
}

impl Default for MovingPlatform {
    fn default() -> Self {
        Self { direction: 1.0 }
    }
}

/// Бонус-пружина на Regular платформе
///
/// Чисто визуальная сущность: физического тела нет, позиция фиксируется
/// при генерации мира. `compressed` зарезервировано и не переключается.
#[derive(Component, Debug, Clone, Copy)]
pub struct Spring {
    /// Точка опоры в render-space (левый край платформы + случайный сдвиг)
    pub base: Vec2,
    /// Визуальное состояние сжатия (не переключается)
    pub compressed: bool,
}

impl Spring {
    pub fn new(platform_screen_pos: Vec2, offset_x: f32) -> Self {
        Self {
            base: platform_screen_pos + Vec2::new(offset_x, 0.0),
            compressed: false,
        }
    }
}

/// Обломок сломанной Weak платформы (левая/правая половина)
///
/// Dynamic-тело, свободно падает, никогда не убирается из мира.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebrisHalf {
    Left,
    Right,
}

/// Один шаг движущейся платформы: сдвиг + разворот на краях
///
/// Сначала сдвиг, потом проверка краёв — платформа, вылезшая за край,
/// разворачивается и возвращается на следующем тике.
pub fn step_moving_platform(x: f32, direction: f32, speed: f32) -> (f32, f32) {
    let x = x + direction * speed;
    let direction = if x < 0.0 {
        1.0
    } else if x > SURFACE_WIDTH - PLATFORM_WIDTH {
        -1.0
    } else {
        direction
    };
    (x, direction)
}

/// Система: ход движущихся платформ (FixedUpdate, до rapier step)
pub fn drive_moving_platforms(
    mut query: Query<(&mut Transform, &mut MovingPlatform)>,
    config: Res<SimConfig>,
) {
    for (mut transform, mut moving) in query.iter_mut() {
        let (x, direction) = step_moving_platform(
            transform.translation.x,
            moving.direction,
            config.moving_platform_speed,
        );
        transform.translation.x = x;
        if moving.direction != direction {
            moving.direction = direction;
        }
    }
}

/// Plugin платформ: drive-система до rapier step
pub struct PlatformsPlugin;

impl Plugin for PlatformsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            drive_moving_platforms.before(PhysicsSet::SyncBackend),
        );
    }
}
