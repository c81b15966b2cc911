//! Контакт игрок × платформа
//!
//! Движок контакт не решает (платформы — сенсоры), вся механика — side
//! effects после step'а:
//! 1. Игрок летит вверх → касание игнорируется (нет повторного прыжка
//!    при проходе платформы снизу)
//! 2. Weak платформа → despawn + два обломка, импульса нет
//! 3. Regular/Moving → скорость в ноль, затем фиксированный импульс вверх
//!    (высота прыжка не зависит от скорости падения)
//!
//! Мутации мира идут через событие PlatformBroken + Commands, очередь
//! дренируется раз в тик вне rapier step'а.

use bevy::prelude::*;
use bevy_rapier2d::prelude::{CollisionEvent, ExternalImpulse, Velocity};

use crate::config::SimConfig;
use crate::logger::log_warning;
use crate::physics::{spawn_debris_half, DEBRIS_SPLIT_OFFSET};
use crate::platforms::{DebrisHalf, Platform, PlatformKind};
use crate::player::Player;

/// Событие: Weak платформа сломана касанием
///
/// `corner` — последняя позиция тела платформы (game-space), от неё
/// раскладываются обломки.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlatformBroken {
    pub platform: Entity,
    pub corner: Vec2,
}

/// Система: разбор контактов игрок × платформа за прошедший step
///
/// COLLISION_EVENTS включены только у платформ, так что пары всегда
/// (игрок, платформа) — в любом порядке.
pub fn handle_platform_contacts(
    mut collisions: EventReader<CollisionEvent>,
    mut players: Query<(&mut Velocity, &mut ExternalImpulse), With<Player>>,
    platforms: Query<(&Platform, &Transform)>,
    mut broken: EventWriter<PlatformBroken>,
    config: Res<SimConfig>,
) {
    for event in collisions.read() {
        let CollisionEvent::Started(first, second, _) = event else {
            continue;
        };

        let (player_entity, platform_entity) = if players.contains(*first) {
            (*first, *second)
        } else {
            (*second, *first)
        };

        let Ok((mut velocity, mut impulse)) = players.get_mut(player_entity) else {
            continue;
        };
        // Платформа могла быть снесена раньше — тихий no-op
        let Ok((platform, transform)) = platforms.get(platform_entity) else {
            continue;
        };

        // Вверх сквозь платформу — не прыжок
        if velocity.linvel.y > 0.0 {
            continue;
        }

        if platform.kind == PlatformKind::Weak {
            broken.write(PlatformBroken {
                platform: platform_entity,
                corner: transform.translation.truncate(),
            });
            continue;
        }

        // Скорость в ноль до импульса: прыжок детерминирован независимо
        // от скорости падения
        velocity.linvel = Vec2::ZERO;
        impulse.impulse += Vec2::new(0.0, config.jump_impulse);
    }
}

/// Система: дренаж очереди ломания — despawn платформы + два обломка
///
/// Повторное событие по уже снесённой платформе — no-op с warning'ом.
pub fn break_weak_platforms(
    mut commands: Commands,
    mut events: EventReader<PlatformBroken>,
    platforms: Query<(), With<Platform>>,
) {
    for event in events.read() {
        if platforms.get(event.platform).is_err() {
            log_warning(&format!(
                "PlatformBroken: платформа {:?} уже убрана из мира",
                event.platform
            ));
            continue;
        }

        commands.entity(event.platform).despawn();
        spawn_debris_half(&mut commands, event.corner, DebrisHalf::Left);
        spawn_debris_half(
            &mut commands,
            event.corner + Vec2::new(DEBRIS_SPLIT_OFFSET, 0.0),
            DebrisHalf::Right,
        );
    }
}
