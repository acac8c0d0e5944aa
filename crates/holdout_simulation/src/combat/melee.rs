//! Melee combat (нож): reach-checked strike без фаз замаха
//!
//! Intent-based: input/AI шлёт MeleeStrikeIntent, ECS валидирует
//! cooldown + дистанцию и сразу наносит урон. Без projectile,
//! без parry — зомби не парируют.

use bevy::prelude::*;

use crate::components::Health;
use crate::logger;
use crate::PauseState;
use super::damage::{DamageDealt, EntityDied};

/// Допуск к reach при проверке дистанции (цель в движении)
const REACH_SLACK: f32 = 0.25;

/// Melee stats component (нож)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct MeleeStats {
    /// Урон одного удара
    pub damage: u32,

    /// Дальность удара (метры)
    pub reach: f32,

    /// Секунды между ударами
    pub cooldown: f32,

    /// Текущий cooldown timer (уменьшается до 0)
    pub cooldown_timer: f32,
}

impl Default for MeleeStats {
    fn default() -> Self {
        Self::knife()
    }
}

impl MeleeStats {
    /// Боевой нож (всегда при себе, патронов не требует)
    pub fn knife() -> Self {
        Self {
            damage: 100,
            reach: 2.0,
            cooldown: 1.0,
            cooldown_timer: 0.0,
        }
    }

    pub fn can_strike(&self) -> bool {
        self.cooldown_timer <= 0.0
    }

    pub fn start_cooldown(&mut self) {
        self.cooldown_timer = self.cooldown;
    }
}

/// Event: актор бьёт ножом конкретную цель
#[derive(Event, Debug, Clone)]
pub struct MeleeStrikeIntent {
    pub attacker: Entity,
    pub target: Entity,
}

/// System: тик melee cooldown'ов
pub fn tick_melee_cooldowns(
    mut stats: Query<&mut MeleeStats>,
    pause: Res<PauseState>,
    time: Res<Time>,
) {
    if pause.paused {
        return;
    }

    for mut melee in stats.iter_mut() {
        if melee.cooldown_timer > 0.0 {
            melee.cooldown_timer = (melee.cooldown_timer - time.delta_secs()).max(0.0);
        }
    }
}

/// System: валидация и исполнение ударов
///
/// Проверки: cooldown, обе стороны имеют Transform, цель в пределах
/// reach + slack, цель жива. Урон применяется немедленно.
pub fn process_melee_strikes(
    mut intents: EventReader<MeleeStrikeIntent>,
    mut attackers: Query<&mut MeleeStats>,
    transforms: Query<&Transform>,
    mut targets: Query<&mut Health>,
    mut dealt: EventWriter<DamageDealt>,
    mut died: EventWriter<EntityDied>,
    pause: Res<PauseState>,
) {
    for intent in intents.read() {
        if pause.paused {
            continue;
        }

        if intent.attacker == intent.target {
            continue;
        }

        let Ok(mut melee) = attackers.get_mut(intent.attacker) else {
            continue;
        };
        if !melee.can_strike() {
            continue;
        }

        let (Ok(attacker_tf), Ok(target_tf)) =
            (transforms.get(intent.attacker), transforms.get(intent.target))
        else {
            continue;
        };

        let distance = attacker_tf.translation.distance(target_tf.translation);
        if distance > melee.reach + REACH_SLACK {
            logger::log(&format!(
                "⚔️ Melee whiff: {:?} → {:?} ({:.2}m > {:.2}m reach)",
                intent.attacker, intent.target, distance, melee.reach
            ));
            melee.start_cooldown();
            continue;
        }

        let Ok(mut health) = targets.get_mut(intent.target) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        melee.start_cooldown();
        health.take_damage(melee.damage);
        let target_died = !health.is_alive();

        dealt.write(DamageDealt {
            attacker: intent.attacker,
            target: intent.target,
            damage: melee.damage,
            target_died,
        });

        logger::log(&format!(
            "⚔️ Melee hit: {:?} → {:?} ({} dmg, HP: {})",
            intent.attacker, intent.target, melee.damage, health.current
        ));

        if target_died {
            died.write(EntityDied {
                entity: intent.target,
                killer: Some(intent.attacker),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knife_cooldown() {
        let mut melee = MeleeStats::knife();
        assert!(melee.can_strike());

        melee.start_cooldown();
        assert!(!melee.can_strike());
        assert_eq!(melee.cooldown_timer, 1.0);

        melee.cooldown_timer = 0.0;
        assert!(melee.can_strike());
    }
}
