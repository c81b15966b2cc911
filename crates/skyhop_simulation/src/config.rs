//! Tuning-константы симуляции
//!
//! Один serde-сериализуемый resource вместо рассыпанных magic numbers.
//! Default = рабочий баланс игры; оболочка может загрузить
//! свой вариант (например из json) и вставить resource до старта App.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Параметры симуляции (gravity, импульсы, world generation)
///
/// Единицы: пиксели и секунды. Физика Y-up, экран Y-down (см. `physics::convert`).
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Гравитация по Y (px/s², отрицательная = вниз)
    pub gravity_y: f32,
    /// Импульс прыжка от платформы (применяется в центр тела)
    pub jump_impulse: f32,
    /// Горизонтальный импульс за тик удержания клавиши
    pub move_impulse: f32,
    /// Скорость движущихся платформ (px за тик)
    pub moving_platform_speed: f32,

    /// Сколько платформ генерируется до старта (дальше мир не растёт)
    pub platform_count: usize,
    /// Стартовая высота первой платформы (render-space Y)
    pub base_screen_y: f32,
    /// Минимальный шаг подъёма между платформами (px)
    pub step_min: u32,
    /// Максимальный шаг подъёма между платформами (px)
    pub step_max: u32,
    /// Максимальный X спавна платформы (поле 480 минус ширина платформы)
    pub spawn_x_max: u32,
    /// Шанс пружины: 1 из N (только на Regular платформах)
    pub spring_chance: u32,

    /// Экранная строка, к которой камера прижимает игрока
    pub camera_anchor_y: f32,
    /// Стартовая позиция игрока (render-space)
    pub player_start_x: f32,
    pub player_start_y: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity_y: -1000.0,
            jump_impulse: 4_000_000.0,
            move_impulse: 100_000.0,
            moving_platform_speed: 1.0,

            platform_count: 400,
            base_screen_y: 800.0,
            step_min: 50,
            step_max: 120,
            spawn_x_max: 380,
            spring_chance: 6,

            camera_anchor_y: 250.0,
            player_start_x: 250.0,
            player_start_y: 250.0,
        }
    }
}
