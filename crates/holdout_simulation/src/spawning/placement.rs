//! Разрешение позиции спавна вокруг anchor
//!
//! Rejection sampling в горизонтальной плоскости: полярный jitter,
//! проверка spacing против живых зомби точки, bounded число проб.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

/// Максимум проб до fallback
pub const MAX_PLACEMENT_TRIALS: u32 = 10;

/// Выбирает позицию спавна для точки
///
/// - Точка без живых зомби → ровно anchor (ноль случайности).
/// - Иначе до [`MAX_PLACEMENT_TRIALS`] полярных проб: угол ∈ [0, 2π),
///   дистанция ∈ [min_spacing, max_offset], Y anchor'а сохраняется.
///   Проба принимается если отстоит от КАЖДОГО живого ≥ min_spacing.
/// - Все пробы провалились → ещё один jitter без проверки spacing.
///   Спавн происходит всегда, переполненная точка не блокирует волну.
pub fn resolve_spawn_offset(
    anchor: Vec3,
    live_positions: &[Vec3],
    min_spacing: f32,
    max_offset: f32,
    rng: &mut impl Rng,
) -> Vec3 {
    if live_positions.is_empty() {
        return anchor;
    }

    for _ in 0..MAX_PLACEMENT_TRIALS {
        let candidate = jittered_position(anchor, min_spacing, max_offset, rng);
        if live_positions
            .iter()
            .all(|live| candidate.distance(*live) >= min_spacing)
        {
            return candidate;
        }
    }

    // Unconstrained fallback
    jittered_position(anchor, min_spacing, max_offset, rng)
}

/// Полярный jitter в горизонтальной плоскости anchor'а
fn jittered_position(anchor: Vec3, min_spacing: f32, max_offset: f32, rng: &mut impl Rng) -> Vec3 {
    let angle = rng.gen::<f32>() * TAU;
    let distance = rng.gen_range(min_spacing..=max_offset);
    anchor + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}
