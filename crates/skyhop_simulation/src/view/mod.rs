//! Сборка кадра для внешней render-поверхности
//!
//! Симуляция не рисует: раз в кадр она собирает DrawList — плоский список
//! «спрайт + позиция в render-space + поворот», который оболочка блитит
//! как есть. Поверхность 480×640, origin сверху-слева, Y-down.
//!
//! Камера — скалярный вертикальный сдвиг от высоты игрока. Пересчёт идёт
//! ПОСЛЕ сборки списка: кадр рисуется со сдвигом, посчитанным в конце
//! прошлого тика (консистентный лаг в один кадр), и весь кадр видит одно
//! и то же значение.

use bevy::prelude::*;

use crate::config::SimConfig;
use crate::physics::{convert, DEBRIS_HEIGHT, DEBRIS_WIDTH};
use crate::platforms::{DebrisHalf, Platform, PlatformKind, Spring, SPRING_HEIGHT};
use crate::player::{AnimationState, Player};

/// Имена ассетов (фиксированный набор; загрузка — забота оболочки,
/// отсутствие файла — фатальная ошибка старта по её контракту)
pub mod assets {
    pub const PLAYER_IDLE: &str = "assets/pup_idle.png";
    pub const PLAYER_JUMP: &str = "assets/pup_jump.png";
    pub const PLAYER_FLY: &str = "assets/pup_fly.png";
    pub const PLAYER_FALL: &str = "assets/pup_fall.png";

    pub const PLATFORM_REGULAR: &str = "assets/platform_regular.png";
    pub const PLATFORM_MOVING: &str = "assets/platform_moving.png";
    pub const PLATFORM_WEAK: &str = "assets/platform_weak.png";

    pub const DEBRIS_LEFT: &str = "assets/platform_weak_left.png";
    pub const DEBRIS_RIGHT: &str = "assets/platform_weak_right.png";

    pub const SPRING_IDLE: &str = "assets/spring_idle.png";
    pub const SPRING_PRESSED: &str = "assets/spring_pressed.png";
}

/// Якорь блита
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteAnchor {
    TopLeft,
    Center,
}

/// Одна команда отрисовки для оболочки
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawSprite {
    pub asset: &'static str,
    /// Позиция в render-space, сдвиг камеры уже применён
    pub position: Vec2,
    /// Поворот в радианах (CCW в game-space), почти всегда 0
    pub rotation: f32,
    pub anchor: SpriteAnchor,
}

/// Вертикальный сдвиг камеры (стабилен в пределах кадра)
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ScrollOffset {
    pub y: f32,
}

/// Команды отрисовки текущего кадра (порядок: платформы, обломки, игрок)
#[derive(Resource, Debug, Default)]
pub struct DrawList(pub Vec<DrawSprite>);

/// Сдвиг камеры от позиции игрока: render Y минус экранный якорь
pub fn scroll_offset_for(player_game_pos: Vec2, anchor_y: f32) -> f32 {
    convert(player_game_pos).y - anchor_y
}

/// Применить сдвиг камеры к render-space позиции
pub fn scrolled(render_pos: Vec2, offset: f32) -> Vec2 {
    Vec2::new(render_pos.x, render_pos.y - offset)
}

fn player_asset(state: AnimationState) -> &'static str {
    match state {
        AnimationState::Idle => assets::PLAYER_IDLE,
        AnimationState::Jumping => assets::PLAYER_JUMP,
        AnimationState::Flying => assets::PLAYER_FLY,
        AnimationState::Falling => assets::PLAYER_FALL,
    }
}

fn platform_asset(kind: PlatformKind) -> &'static str {
    match kind {
        PlatformKind::Regular => assets::PLATFORM_REGULAR,
        PlatformKind::Moving => assets::PLATFORM_MOVING,
        PlatformKind::Weak => assets::PLATFORM_WEAK,
    }
}

fn debris_asset(half: DebrisHalf) -> &'static str {
    match half {
        DebrisHalf::Left => assets::DEBRIS_LEFT,
        DebrisHalf::Right => assets::DEBRIS_RIGHT,
    }
}

fn spring_asset(spring: &Spring) -> &'static str {
    if spring.compressed {
        assets::SPRING_PRESSED
    } else {
        assets::SPRING_IDLE
    }
}

/// Система: сборка DrawList со сдвигом прошлого кадра
pub fn assemble_draw_list(
    offset: Res<ScrollOffset>,
    platforms: Query<(&Platform, &Transform, Option<&Spring>)>,
    debris: Query<(&DebrisHalf, &Transform)>,
    player: Query<(&AnimationState, &Transform), With<Player>>,
    mut list: ResMut<DrawList>,
) {
    list.0.clear();

    for (platform, transform, spring) in platforms.iter() {
        let pos = convert(transform.translation.truncate());
        list.0.push(DrawSprite {
            asset: platform_asset(platform.kind),
            position: scrolled(pos, offset.y),
            rotation: 0.0,
            anchor: SpriteAnchor::TopLeft,
        });

        if let Some(spring) = spring {
            // Пружина сидит на верхней кромке платформы: базовая точка
            // минус высота спрайта
            list.0.push(DrawSprite {
                asset: spring_asset(spring),
                position: scrolled(spring.base, offset.y) - Vec2::new(0.0, SPRING_HEIGHT),
                rotation: 0.0,
                anchor: SpriteAnchor::TopLeft,
            });
        }
    }

    for (half, transform) in debris.iter() {
        // Тело заякорено углом, спрайт блитится по центру с поворотом
        let local_center = Vec3::new(DEBRIS_WIDTH / 2.0, DEBRIS_HEIGHT / 2.0, 0.0);
        let center = transform.transform_point(local_center).truncate();
        list.0.push(DrawSprite {
            asset: debris_asset(*half),
            position: scrolled(convert(center), offset.y),
            rotation: transform.rotation.to_scaled_axis().z,
            anchor: SpriteAnchor::Center,
        });
    }

    if let Ok((state, transform)) = player.single() {
        let pos = convert(transform.translation.truncate());
        list.0.push(DrawSprite {
            asset: player_asset(*state),
            position: scrolled(pos, offset.y),
            rotation: 0.0,
            anchor: SpriteAnchor::Center,
        });
    }
}

/// Система: пересчёт сдвига камеры после сборки кадра
pub fn update_scroll_offset(
    player: Query<&Transform, With<Player>>,
    config: Res<SimConfig>,
    mut offset: ResMut<ScrollOffset>,
) {
    let Ok(transform) = player.single() else {
        return;
    };
    offset.y = scroll_offset_for(transform.translation.truncate(), config.camera_anchor_y);
}

/// View plugin: сборка кадра и камера в Update (render-каденция)
pub struct ViewPlugin;

impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScrollOffset>()
            .init_resource::<DrawList>()
            .add_systems(Update, (assemble_draw_list, update_scroll_offset).chain());
    }
}
