//! Игрок: анимационное состояние и горизонтальное управление
//!
//! Архитектура:
//! - Rapier dynamic-тело (круг r=40), прыжки делает `physics::bounce`
//! - Управление — импульсы от удержания клавиш, без kinematic-контроллера
//! - Анимация — чистая функция от знака вертикальной скорости

use bevy::prelude::*;
use bevy_rapier2d::plugin::PhysicsSet;
use bevy_rapier2d::prelude::{ExternalImpulse, Velocity};

use crate::config::SimConfig;

/// Маркер управляемого игроком тела
#[derive(Component, Debug, Clone, Copy)]
pub struct Player;

/// Анимационное состояние игрока (выбор спрайта)
///
/// Производное от вертикальной скорости, пересчитывается каждый тик:
/// - `Jumping` — летит вверх
/// - `Falling` — летит вниз
/// - `Idle` — скорость ровно ноль
/// - `Flying` — четвёртый спрайт, ни один путь его не выставляет
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Jumping,
    Flying,
    Falling,
}

impl AnimationState {
    /// Состояние по знаку вертикальной скорости
    pub fn for_vertical_velocity(vertical: f32) -> Self {
        if vertical > 0.0 {
            Self::Jumping
        } else if vertical < 0.0 {
            Self::Falling
        } else {
            Self::Idle
        }
    }
}

/// Состояние клавиш движения (пишет внешний input-коллаборатор раз в кадр)
///
/// Для headless тестов — выставляется напрямую в resource.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct MovementInput {
    pub left: bool,
    pub right: bool,
}

/// Система: горизонтальные импульсы от удержания клавиш
///
/// Два независимых guard'а: обе клавиши разом дают двойной импульс
/// (наблюдаемое поведение, не взаимно гасятся).
pub fn apply_horizontal_input(
    input: Res<MovementInput>,
    config: Res<SimConfig>,
    mut players: Query<&mut ExternalImpulse, With<Player>>,
) {
    for mut impulse in players.iter_mut() {
        if input.left {
            impulse.impulse += Vec2::new(-config.move_impulse, 0.0);
        }
        if input.right {
            impulse.impulse += Vec2::new(config.move_impulse, 0.0);
        }
    }
}

/// Система: пересчёт анимационного состояния после rapier step
pub fn update_animation_state(
    mut players: Query<(&Velocity, &mut AnimationState), With<Player>>,
) {
    for (velocity, mut state) in players.iter_mut() {
        let next = AnimationState::for_vertical_velocity(velocity.linvel.y);
        if *state != next {
            *state = next;
        }
    }
}

/// Plugin игрока: input до rapier step, анимация после
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementInput>()
            .add_systems(
                FixedUpdate,
                apply_horizontal_input.before(PhysicsSet::SyncBackend),
            )
            .add_systems(
                FixedUpdate,
                // После bounce: состояние считается от скорости, которую
                // уже поправил контакт этого тика
                update_animation_state
                    .after(PhysicsSet::Writeback)
                    .after(crate::physics::bounce::handle_platform_contacts),
            );
    }
}
