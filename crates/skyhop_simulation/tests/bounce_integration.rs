//! Интеграционные тесты контактов игрок × платформа
//!
//! Контролируемые сцены без worldgen: одна платформа + игрок, headless
//! прогон с ручным временем (один тик = один app.update()).
//!
//! Проверяем:
//! - Regular платформа даёт детерминированный прыжок (скорость в ноль +
//!   фиксированный импульс)
//! - Weak платформа сносится ровно один раз и распадается на два обломка
//!   со сдвигом (0,0)/(+40,0)
//! - Касание на подъёме (vy > 0) не меняет ничего

use bevy::prelude::*;
use bevy_rapier2d::prelude::Velocity;
use skyhop_simulation::{
    convert, create_headless_app, spawn_platform, spawn_player, DebrisHalf, PhysicsPlugin,
    PlatformKind, PlatformsPlugin, Player, PlayerPlugin, SimConfig, ViewPlugin,
};

/// Helper: App с физикой, но без worldgen — сцену собираем сами
fn create_scene_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.init_resource::<SimConfig>();
    app.add_plugins((PhysicsPlugin, PlatformsPlugin, PlayerPlugin, ViewPlugin));
    app
}

fn player_velocity_y(app: &mut App) -> f32 {
    let mut query = app
        .world_mut()
        .query_filtered::<&Velocity, With<Player>>();
    query
        .iter(app.world())
        .next()
        .map(|velocity| velocity.linvel.y)
        .unwrap_or(0.0)
}

fn platform_count(app: &mut App) -> usize {
    let mut query = app
        .world_mut()
        .query::<&skyhop_simulation::Platform>();
    query.iter(app.world()).count()
}

fn debris_positions(app: &mut App) -> Vec<Vec2> {
    let mut query = app
        .world_mut()
        .query::<(&DebrisHalf, &Transform)>();
    let mut positions: Vec<Vec2> = query
        .iter(app.world())
        .map(|(_, transform)| transform.translation.truncate())
        .collect();
    positions.sort_by(|a, b| a.x.total_cmp(&b.x));
    positions
}

#[test]
fn test_regular_platform_gives_fixed_jump() {
    let mut app = create_scene_app(7);

    // Платформа под игроком: render (200,500) → game-space угол (200,140)
    {
        let mut commands = app.world_mut().commands();
        spawn_platform(&mut commands, Vec2::new(200.0, 500.0), PlatformKind::Regular, None);
        spawn_player(&mut commands, Vec2::new(235.0, 340.0));
    }
    app.update();

    // Импульс 4e6 на массу π·40² ≈ 5026.5 → прыжок ~795 px/s вверх
    let mut max_velocity_y = f32::MIN;
    for _ in 0..240 {
        app.update();
        max_velocity_y = max_velocity_y.max(player_velocity_y(&mut app));
    }

    assert!(
        max_velocity_y > 700.0,
        "прыжка не было: max vy = {}",
        max_velocity_y
    );
    // Платформа цела, обломков нет
    assert_eq!(platform_count(&mut app), 1);
    assert!(debris_positions(&mut app).is_empty());
}

#[test]
fn test_weak_platform_breaks_into_two_halves() {
    let mut app = create_scene_app(7);

    {
        let mut commands = app.world_mut().commands();
        spawn_platform(&mut commands, Vec2::new(200.0, 500.0), PlatformKind::Weak, None);
        spawn_player(&mut commands, Vec2::new(235.0, 340.0));
    }
    app.update();

    // Ловим позиции обломков в тик их появления (дальше их растолкает
    // физика — игрок падает прямо на них)
    let mut spawn_positions: Option<Vec<Vec2>> = None;
    let mut max_velocity_y = f32::MIN;
    for _ in 0..240 {
        app.update();
        max_velocity_y = max_velocity_y.max(player_velocity_y(&mut app));
        if spawn_positions.is_none() {
            let positions = debris_positions(&mut app);
            if !positions.is_empty() {
                spawn_positions = Some(positions);
            }
        }
    }

    let positions = spawn_positions.expect("weak платформа не сломалась");
    assert_eq!(positions.len(), 2, "обломков должно быть ровно два");

    // Половины на последней позиции платформы: (0,0) и (+40,0)
    let corner = convert(Vec2::new(200.0, 500.0));
    assert!((positions[0] - corner).length() < 1e-3);
    assert!((positions[1] - (corner + Vec2::new(40.0, 0.0))).length() < 1e-3);

    // Платформа снесена ровно один раз и навсегда, обломки не убираются
    assert_eq!(platform_count(&mut app), 0);
    assert_eq!(debris_positions(&mut app).len(), 2);

    // Импульса прыжка от weak платформы нет
    assert!(
        max_velocity_y < 300.0,
        "weak платформа не должна давать прыжок: max vy = {}",
        max_velocity_y
    );
}

#[test]
fn test_ascending_contact_is_ignored() {
    let mut app = create_scene_app(7);

    // Платформа выше игрока: render (200,400) → game-space угол (200,240)
    let player = {
        let mut commands = app.world_mut().commands();
        spawn_platform(&mut commands, Vec2::new(200.0, 400.0), PlatformKind::Weak, None);
        spawn_player(&mut commands, Vec2::new(235.0, 490.0))
    };
    app.update();

    // Подбрасываем игрока сквозь платформу снизу
    app.world_mut()
        .entity_mut(player)
        .insert(Velocity::linear(Vec2::new(0.0, 600.0)));

    // Пик без вмешательства: 150 + 600²/2000 = 330 game-space
    let mut peak_y = f32::MIN;
    let mut reached_apex = false;
    for _ in 0..120 {
        app.update();
        let velocity_y = player_velocity_y(&mut app);

        let mut query = app
            .world_mut()
            .query_filtered::<&Transform, With<Player>>();
        let y = query.iter(app.world()).next().unwrap().translation.y;
        peak_y = peak_y.max(y);

        // Пока летим вверх, касания не дают эффектов
        if velocity_y > 0.0 {
            assert_eq!(platform_count(&mut app), 1, "платформа сломана на подъёме");
            assert!(debris_positions(&mut app).is_empty());
        } else {
            reached_apex = true;
            break;
        }
    }
    assert!(reached_apex, "игрок так и не начал падать");

    // Прыжок на подъёме дал бы пик сильно выше баллистического
    assert!(
        peak_y < 400.0,
        "пик {} выше баллистического — сработал лишний импульс",
        peak_y
    );
}
