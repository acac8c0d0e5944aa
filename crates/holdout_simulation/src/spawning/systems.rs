//! ECS-обвязка планировщика: events → scheduler → entities
//!
//! Здесь собирается SpawnContext из ресурсов мира (часы, пауза,
//! Transform игрока) и подключаются реальные closure'ы: liveness
//! через Query, фабрика через Commands.

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::{Health, Player, Zombie};
use crate::logger;
use crate::{PauseState, SimulationRng};
use super::scheduler::{SpawnContext, SpawnScheduler};

/// HP свежего зомби
pub const ZOMBIE_HEALTH: u32 = 150;

/// Запрос: заспавнить count зомби (обычно от wave director)
#[derive(Event, Debug, Clone)]
pub struct SpawnZombiesRequest {
    pub count: u32,
}

/// Подтверждение: зомби создан
///
/// Wave director списывает бюджет по этим событиям. Engine-слой
/// (если подключён) поднимает визуал по entity + position.
#[derive(Event, Debug, Clone)]
pub struct ZombieSpawned {
    pub entity: Entity,
    pub site_index: usize,
    pub position: Vec3,
}

/// System: обработка spawn-запросов текущего тика
///
/// Запросы одного тика складываются в один вызов планировщика,
/// так что эксклюзивность точек действует на суммарный батч.
pub fn process_spawn_requests(
    mut commands: Commands,
    mut requests: EventReader<SpawnZombiesRequest>,
    mut confirmations: EventWriter<ZombieSpawned>,
    mut scheduler: ResMut<SpawnScheduler>,
    mut rng: ResMut<SimulationRng>,
    pause: Res<PauseState>,
    time: Res<Time>,
    players: Query<&Transform, With<Player>>,
    zombies: Query<&Transform, (With<Zombie>, Without<Dead>)>,
) {
    let requested: u32 = requests.read().map(|request| request.count).sum();
    if requested == 0 {
        return;
    }

    let ctx = SpawnContext {
        now: time.elapsed_secs(),
        paused: pause.paused,
        subject: players.single().ok().map(|transform| transform.translation),
    };

    let mut spawn_log: Vec<(Entity, usize, Vec3)> = Vec::new();
    let spawned = scheduler.request_spawns(
        &ctx,
        requested,
        &mut rng.rng,
        |token| zombies.get(token).ok().map(|transform| transform.translation),
        |site_index, position, yaw| {
            let entity = commands
                .spawn((
                    Zombie,
                    Health::new(ZOMBIE_HEALTH),
                    Transform::from_translation(position)
                        .with_rotation(Quat::from_rotation_y(yaw)),
                ))
                .id();
            spawn_log.push((entity, site_index, position));
            entity
        },
    );

    for (entity, site_index, position) in spawn_log {
        confirmations.write(ZombieSpawned { entity, site_index, position });
    }

    if spawned < requested && !ctx.paused {
        logger::log(&format!(
            "⚠️ Spawn shortfall: {}/{} (sites cooling, out of range or no player)",
            spawned, requested
        ));
    }
}
