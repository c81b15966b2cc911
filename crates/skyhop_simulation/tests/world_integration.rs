//! Интеграционный тест полного мира
//!
//! SimulationPlugin целиком: генерация колонны платформ, камера, сборка
//! DrawList для render-оболочки.

use bevy::prelude::*;
use skyhop_simulation::view::assets;
use skyhop_simulation::{
    convert, create_headless_app, scroll_offset_for, scrolled, DrawList, Platform, PlatformKind,
    Player, ScrollOffset, SimConfig, SimulationPlugin, Spring, SpriteAnchor,
};

fn create_world_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    app
}

fn player_position(app: &mut App) -> Vec2 {
    let mut query = app
        .world_mut()
        .query_filtered::<&Transform, With<Player>>();
    query
        .iter(app.world())
        .next()
        .expect("игрок существует весь прогон")
        .translation
        .truncate()
}

#[test]
fn test_world_spawns_full_column() {
    let mut app = create_world_app(42);
    app.update();

    let config = SimConfig::default();

    let mut platforms = app.world_mut().query::<&Platform>();
    assert_eq!(
        platforms.iter(app.world()).count(),
        config.platform_count
    );

    let mut players = app.world_mut().query::<&Player>();
    assert_eq!(players.iter(app.world()).count(), 1);

    // Пружины есть (шанс 1/6 на 400 платформ) и только на Regular
    let mut springs = app.world_mut().query::<(&Platform, &Spring)>();
    let kinds: Vec<_> = springs
        .iter(app.world())
        .map(|(platform, _)| platform.kind)
        .collect();
    assert!(!kinds.is_empty(), "на 400 платформ не выпало ни одной пружины");
    for kind in kinds {
        assert_eq!(kind, PlatformKind::Regular);
    }
}

#[test]
fn test_scroll_offset_tracks_player_anchor() {
    let mut app = create_world_app(42);

    for _ in 0..120 {
        app.update();
    }

    let player_pos = player_position(&mut app);
    let offset = app.world().resource::<ScrollOffset>().y;
    let expected = scroll_offset_for(player_pos, SimConfig::default().camera_anchor_y);
    assert!(
        (offset - expected).abs() < 1e-3,
        "offset {} не равен render-Y игрока минус якорь ({})",
        offset,
        expected
    );
}

#[test]
fn test_draw_list_ends_with_centered_player() {
    let mut app = create_world_app(42);

    for _ in 0..60 {
        app.update();
    }

    let player_pos = player_position(&mut app);
    let offset = app.world().resource::<ScrollOffset>().y;
    let list = app.world().resource::<DrawList>();
    assert!(!list.0.is_empty());

    // Игрок рисуется последним, по центру
    let player_sprite = list.0.last().expect("список не пуст");
    assert_eq!(player_sprite.anchor, SpriteAnchor::Center);
    assert!(
        [
            assets::PLAYER_IDLE,
            assets::PLAYER_JUMP,
            assets::PLAYER_FLY,
            assets::PLAYER_FALL
        ]
        .contains(&player_sprite.asset),
        "последний спрайт кадра — игрок, а не {}",
        player_sprite.asset
    );

    // X от вертикального сдвига не зависит; Y в списке собран со сдвигом
    // прошлого кадра (консистентный лаг в один кадр)
    let fresh = scrolled(convert(player_pos), offset);
    assert!((player_sprite.position.x - fresh.x).abs() < 1e-3);

    for sprite in &list.0 {
        assert!(sprite.position.x.is_finite());
        assert!(sprite.position.y.is_finite());
    }
}
