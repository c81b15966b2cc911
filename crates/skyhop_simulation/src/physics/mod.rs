//! Физика через Rapier 2D
//!
//! Архитектура:
//! - Rapier в fixed schedule (60Hz), TimestepMode::Fixed для детерминизма
//! - Платформы — kinematic sensor-коллайдеры: контакт игрок×платформа
//!   никогда не решается движком, все эффекты прыжка/ломания — side effects
//!   в `bounce` после step'а
//! - Collision groups: платформы и обломки не касаются друг друга,
//!   игрок касается всех

pub mod bounce;

use bevy::prelude::*;
use bevy_rapier2d::plugin::PhysicsSet;
use bevy_rapier2d::prelude::*;

use crate::config::SimConfig;
use crate::platforms::{DebrisHalf, MovingPlatform, Platform, PlatformKind, Spring};
use crate::player::{AnimationState, Player};

/// Логическое разрешение поверхности (render-space, origin сверху-слева)
pub const SURFACE_WIDTH: f32 = 480.0;
pub const SURFACE_HEIGHT: f32 = 640.0;

/// Частота симуляции (FixedUpdate + rapier step)
pub const SIM_HZ: f64 = 60.0;
/// Шаг физики
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Радиус круга игрока
pub const PLAYER_RADIUS: f32 = 40.0;
/// Плотность всех тел (масса выводится из формы)
pub const BODY_DENSITY: f32 = 1.0;
/// Трение игрока и платформ
pub const BODY_FRICTION: f32 = 0.95;

/// Коробка платформы
pub const PLATFORM_WIDTH: f32 = 71.0;
pub const PLATFORM_HEIGHT: f32 = 17.0;

/// Обломок Weak платформы (половина коробки, скруглённые углы)
pub const DEBRIS_WIDTH: f32 = 35.0;
pub const DEBRIS_HEIGHT: f32 = 17.0;
pub const DEBRIS_ROUNDING: f32 = 1.0;
/// Горизонтальный сдвиг правой половины от позиции платформы
pub const DEBRIS_SPLIT_OFFSET: f32 = 40.0;

/// Группы коллизий
///
/// Платформы не видят друг друга и обломки, обломки не видят друг друга,
/// игрок физически сталкивается только с обломками (платформы — сенсоры).
pub const GROUP_PLAYER: Group = Group::GROUP_1;
pub const GROUP_PLATFORM: Group = Group::GROUP_2;
pub const GROUP_DEBRIS: Group = Group::GROUP_3;

pub fn player_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_PLAYER, GROUP_PLATFORM | GROUP_DEBRIS)
}

pub fn platform_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_PLATFORM, GROUP_PLAYER)
}

pub fn debris_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_DEBRIS, GROUP_PLAYER)
}

/// Конвертация render-space ↔ game-space: flip Y вокруг высоты поверхности
///
/// Инволюция — одна функция в обе стороны.
pub fn convert(pos: Vec2) -> Vec2 {
    Vec2::new(pos.x, SURFACE_HEIGHT - pos.y)
}

/// Кубоид с якорем тела в левом нижнем углу
///
/// Позиции платформ и обломков заданы углом коробки (как в разметке
/// уровня), rapier центрирует формы — компенсируем compound-сдвигом.
fn corner_collider(width: f32, height: f32, rounding: f32) -> Collider {
    let shape = if rounding > 0.0 {
        Collider::round_cuboid(width / 2.0, height / 2.0, rounding)
    } else {
        Collider::cuboid(width / 2.0, height / 2.0)
    };
    Collider::compound(vec![(Vec2::new(width / 2.0, height / 2.0), 0.0, shape)])
}

/// Spawn игрока: dynamic круг r=40, density 1, friction 0.95
///
/// Позиция задаётся в render-space (как в разметке), тело живёт в game-space.
pub fn spawn_player(commands: &mut Commands, screen_pos: Vec2) -> Entity {
    commands
        .spawn((
            Player,
            AnimationState::default(),
            Transform::from_translation(convert(screen_pos).extend(0.0)),
            GlobalTransform::default(),
            RigidBody::Dynamic,
            Collider::ball(PLAYER_RADIUS),
            ColliderMassProperties::Density(BODY_DENSITY),
            Friction::coefficient(BODY_FRICTION),
            Velocity::default(),
            ExternalImpulse::default(),
            player_groups(),
        ))
        .id()
}

/// Spawn платформы: kinematic sensor-коробка 71×17
///
/// Sensor + COLLISION_EVENTS — движок сообщает о касании, но не решает
/// контакт (прыжок делаем сами в `bounce`). Пружина и ход движущейся
/// платформы добавляются по виду.
pub fn spawn_platform(
    commands: &mut Commands,
    screen_pos: Vec2,
    kind: PlatformKind,
    spring_offset: Option<f32>,
) -> Entity {
    let mut platform = commands.spawn((
        Platform { kind },
        Transform::from_translation(convert(screen_pos).extend(0.0)),
        GlobalTransform::default(),
        RigidBody::KinematicPositionBased,
        corner_collider(PLATFORM_WIDTH, PLATFORM_HEIGHT, 0.0),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        ColliderMassProperties::Density(BODY_DENSITY),
        Friction::coefficient(BODY_FRICTION),
        platform_groups(),
    ));

    if kind == PlatformKind::Moving {
        platform.insert(MovingPlatform::default());
    }
    if let Some(offset_x) = spring_offset {
        platform.insert(Spring::new(screen_pos, offset_x));
    }

    platform.id()
}

/// Spawn обломка Weak платформы: dynamic, свободно падает
///
/// `corner` — game-space угол, от которого раскладываются половины.
pub fn spawn_debris_half(commands: &mut Commands, corner: Vec2, half: DebrisHalf) -> Entity {
    commands
        .spawn((
            half,
            Transform::from_translation(corner.extend(0.0)),
            GlobalTransform::default(),
            RigidBody::Dynamic,
            corner_collider(DEBRIS_WIDTH, DEBRIS_HEIGHT, DEBRIS_ROUNDING),
            ColliderMassProperties::Density(BODY_DENSITY),
            Velocity::default(),
            debris_groups(),
        ))
        .id()
}

/// Система: выставить гравитацию мира из конфига
///
/// RapierConfiguration — компонент на context entity (spawn'ится плагином
/// в PreStartup), правим его один раз на старте.
fn configure_world_gravity(mut configs: Query<&mut RapierConfiguration>, sim: Res<SimConfig>) {
    for mut config in configs.iter_mut() {
        config.gravity = Vec2::new(0.0, sim.gravity_y);
    }
}

/// Physics plugin: rapier в fixed schedule + обработка контактов
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimConfig>()
            .add_plugins(
                RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0).in_fixed_schedule(),
            )
            .insert_resource(TimestepMode::Fixed {
                dt: PHYSICS_DT,
                substeps: 1,
            })
            .add_event::<bounce::PlatformBroken>()
            .add_systems(Startup, configure_world_gravity)
            .add_systems(
                FixedUpdate,
                (
                    bounce::handle_platform_contacts,
                    bounce::break_weak_platforms,
                )
                    .chain()
                    .after(PhysicsSet::Writeback),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_is_involution() {
        let pos = Vec2::new(250.0, 250.0);
        assert_eq!(convert(convert(pos)), pos);
        assert_eq!(convert(pos), Vec2::new(250.0, 390.0));
    }

    #[test]
    fn test_convert_flips_around_surface_height() {
        assert_eq!(convert(Vec2::new(0.0, 0.0)).y, SURFACE_HEIGHT);
        assert_eq!(convert(Vec2::new(0.0, SURFACE_HEIGHT)).y, 0.0);
    }

    /// Пара взаимодействует, только если фильтры обеих сторон пропускают
    fn groups_interact(a: CollisionGroups, b: CollisionGroups) -> bool {
        (a.filters & b.memberships) != Group::NONE && (b.filters & a.memberships) != Group::NONE
    }

    #[test]
    fn test_platforms_ignore_each_other_and_debris() {
        assert!(!groups_interact(platform_groups(), platform_groups()));
        assert!(!groups_interact(platform_groups(), debris_groups()));
        assert!(!groups_interact(debris_groups(), debris_groups()));
    }

    #[test]
    fn test_player_touches_platforms_and_debris() {
        assert!(groups_interact(player_groups(), platform_groups()));
        assert!(groups_interact(player_groups(), debris_groups()));
    }
}
