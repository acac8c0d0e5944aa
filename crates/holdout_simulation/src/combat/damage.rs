//! Damage application + death handling
//!
//! Обрабатывает HitReport события (engine collision detection) и ведёт
//! смертельный bookkeeping: Dead маркер, DespawnAfter, события для
//! economy/UI (DamageDealt, EntityDied).

use bevy::prelude::*;

use crate::components::Health;
use crate::logger;
use crate::PauseState;
use super::weapon::HitReport;

/// Сколько секунд труп лежит до деспавна
pub const CORPSE_LINGER_SECS: f32 = 8.0;

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
/// Используется для economy (очки за попадание), UI, звуков.
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв
///
/// Spawn scheduler и wave director фильтруют выживших через Without<Dead>.
/// Деспавн не мгновенный — труп остаётся до DespawnAfter.
#[derive(Component, Debug)]
pub struct Dead;

/// Компонент: деспавн entity после указанного времени
#[derive(Component, Debug)]
pub struct DespawnAfter {
    /// Время деспавна (секунды от старта симуляции)
    pub despawn_time: f32,
}

/// System: apply damage от HitReport событий
///
/// 1. Читаем HitReport (engine сообщил о попадании)
/// 2. Отбрасываем self-hit и попадания в мёртвых
/// 3. Применяем damage к Health
/// 4. Генерируем DamageDealt и EntityDied
pub fn apply_hit_reports(
    mut hits: EventReader<HitReport>,
    mut targets: Query<&mut Health>,
    mut dealt: EventWriter<DamageDealt>,
    mut died: EventWriter<EntityDied>,
    pause: Res<PauseState>,
) {
    for hit in hits.read() {
        if pause.paused {
            continue;
        }

        // Self-hit быть не должно (engine-слой обязан отфильтровать)
        if hit.shooter == hit.target {
            logger::log_warning(&format!(
                "⚠️ SELF-HIT DETECTED! Entity {:?} hit itself",
                hit.shooter
            ));
            continue;
        }

        let Ok(mut health) = targets.get_mut(hit.target) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        health.take_damage(hit.damage);
        let target_died = !health.is_alive();

        dealt.write(DamageDealt {
            attacker: hit.shooter,
            target: hit.target,
            damage: hit.damage,
            target_died,
        });

        logger::log(&format!(
            "💥 Hit: {:?} → {:?} ({} dmg, HP: {})",
            hit.shooter, hit.target, hit.damage, health.current
        ));

        if target_died {
            died.write(EntityDied {
                entity: hit.target,
                killer: Some(hit.shooter),
            });
        }
    }
}

/// System: посмертный bookkeeping
///
/// EntityDied → Dead маркер + DespawnAfter. Выжившие-фильтры видят
/// смерть со следующего тика (Commands применяются на границе системы).
pub fn mark_dead_on_death(
    mut commands: Commands,
    mut deaths: EventReader<EntityDied>,
    time: Res<Time>,
) {
    for event in deaths.read() {
        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert((
                Dead,
                DespawnAfter {
                    despawn_time: time.elapsed_secs() + CORPSE_LINGER_SECS,
                },
            ));

            logger::log(&format!(
                "💀 Entity {:?} killed by {:?}",
                event.entity, event.killer
            ));
        }
    }
}

/// System: деспавн entities с истёкшим DespawnAfter timeout
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    pause: Res<PauseState>,
    time: Res<Time>,
) {
    if pause.paused {
        return;
    }

    let current_time = time.elapsed_secs();
    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            logger::log(&format!("🗑️ Despawning corpse {:?} (timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}
