//! Combat module (engine-driven hit detection)
//!
//! ECS ответственность:
//! - Game state: Health, WeaponStats, MeleeStats
//! - Combat rules: валидация выстрелов/ударов, патроны, перезарядка
//! - Events: WeaponFired, DamageDealt, EntityDied
//!
//! Engine ответственность:
//! - Рейкаст/projectile по WeaponFired
//! - Collision detection → HitReport обратно в ECS

use bevy::prelude::*;

pub mod damage;
pub mod melee;
pub mod weapon;

// Re-export основных типов
pub use damage::{
    DamageDealt, Dead, DespawnAfter, EntityDied, CORPSE_LINGER_SECS,
};
pub use melee::{MeleeStats, MeleeStrikeIntent};
pub use weapon::{FireWeaponIntent, HitReport, WeaponFired, WeaponStats};

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate.
///
/// Порядок выполнения:
/// 1. tick_weapons / tick_melee_cooldowns — таймеры
/// 2. process_fire_intents — валидация выстрелов → WeaponFired
/// 3. apply_hit_reports — HitReport → урон
/// 4. process_melee_strikes — удары ножом
/// 5. mark_dead_on_death — Dead + DespawnAfter
/// 6. despawn_after_timeout — уборка трупов
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<FireWeaponIntent>()
            .add_event::<WeaponFired>()
            .add_event::<HitReport>()
            .add_event::<MeleeStrikeIntent>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        // Регистрация систем в FixedUpdate
        app.add_systems(
            FixedUpdate,
            (
                weapon::tick_weapons,
                melee::tick_melee_cooldowns,
                weapon::process_fire_intents,
                damage::apply_hit_reports,
                melee::process_melee_strikes,
                damage::mark_dead_on_death,
                damage::despawn_after_timeout,
            )
                .chain(), // Последовательное выполнение
        );
    }
}
