//! Spawn scheduling: точки спавна, плейсмент, волны
//!
//! Слои:
//! - scheduler/site/placement: engine-независимое ядро (closure seams)
//! - systems: ECS-обвязка (events, Commands, Query)
//! - waves: волновая прогрессия поверх spawn-запросов
//! - config: RON-конфиг уровня, фатальная валидация при инициализации

use bevy::prelude::*;

pub mod config;
pub mod placement;
pub mod scheduler;
pub mod site;
pub mod systems;
pub mod waves;

// Re-export основных типов
pub use config::{ConfigError, LevelConfig, SpawnSiteConfig, WaveConfig};
pub use placement::{resolve_spawn_offset, MAX_PLACEMENT_TRIALS};
pub use scheduler::{SpawnContext, SpawnScheduler};
pub use site::SpawnSite;
pub use systems::{SpawnZombiesRequest, ZombieSpawned, ZOMBIE_HEALTH};
pub use waves::{WaveCleared, WaveDirector, WavePhase, WaveStarted};

/// Spawner Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. drive_waves — директор решает сколько просить
/// 2. process_spawn_requests — планировщик решает где и спавнит
///
/// Подтверждения ZombieSpawned директор читает на следующем тике.
pub struct SpawnerPlugin;

impl Plugin for SpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SpawnZombiesRequest>()
            .add_event::<ZombieSpawned>()
            .add_event::<WaveStarted>()
            .add_event::<WaveCleared>()
            .init_resource::<SpawnScheduler>()
            .init_resource::<WaveConfig>()
            .init_resource::<WaveDirector>()
            .add_systems(
                FixedUpdate,
                (waves::drive_waves, systems::process_spawn_requests).chain(),
            );
    }
}
