//! HOLDOUT Simulation Core
//!
//! ECS-симуляция survival-шутера на Bevy 0.16 (strategic layer).
//! Волны зомби, spawn scheduling по точкам уровня, loadout + points economy.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (spawn rules, combat rules, economy, game state)
//! - Engine/host = tactical layer (рендер, input, рейкасты) — общается
//!   событиями (WeaponFired наружу, HitReport внутрь) и ресурсом PauseState

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod combat;
pub mod components;
pub mod economy;
pub mod loadout;
pub mod logger;
pub mod spawning;

// Re-export базовых типов для удобства
pub use combat::{
    CombatPlugin, DamageDealt, Dead, DespawnAfter, EntityDied, FireWeaponIntent, HitReport,
    MeleeStats, MeleeStrikeIntent, WeaponFired, WeaponStats, CORPSE_LINGER_SECS,
};
pub use components::*;
pub use economy::{
    EconomyPlugin, Points, PointsAwarded, PointsReason, PurchaseCompleted, PurchaseIntent,
    PurchaseOrder, POINTS_PER_HIT, POINTS_PER_KILL, STARTING_POINTS,
};
pub use loadout::{
    Loadout, LoadoutPlugin, SwitchWeaponIntent, WeaponCatalog, WeaponDef, WeaponId, WeaponSlot,
    WeaponSwitched,
};
pub use logger::init_logger;
pub use spawning::{
    ConfigError, LevelConfig, SpawnContext, SpawnScheduler, SpawnSite, SpawnSiteConfig,
    SpawnZombiesRequest, SpawnerPlugin, WaveCleared, WaveConfig, WaveDirector, WavePhase,
    WaveStarted, ZombieSpawned, ZOMBIE_HEALTH,
};

/// Частота FixedUpdate (Гц)
pub const SIMULATION_TICK_HZ: f64 = 60.0;

/// Seed RNG по умолчанию
pub const DEFAULT_RNG_SEED: u64 = 42;

/// HP игрока на старте
pub const PLAYER_HEALTH: u32 = 100;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_TICK_HZ))
            // init_resource: заранее вставленные хостом ресурсы (кастомный
            // seed, scheduler из конфига) не перетираются
            .init_resource::<SimulationRng>()
            .init_resource::<PauseState>()
            // Подсистемы (ECS strategic layer)
            .add_plugins((SpawnerPlugin, CombatPlugin, LoadoutPlugin, EconomyPlugin));
    }
}

/// Пауза симуляции
///
/// Обычный resource, НЕ глобальный синглтон: хост дёргает поле, системы
/// читают через Res. Пока paused = true, таймеры заморожены, спавн и
/// урон не происходят.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PauseState {
    pub paused: bool,
}

/// Детерминистичный RNG resource (seeded)
///
/// Единственный поток случайности симуляции: розыгрыш точек спавна
/// и placement jitter. Один seed → одна последовательность решений.
#[derive(Resource)]
pub struct SimulationRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl SimulationRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for SimulationRng {
    fn default() -> Self {
        Self::from_seed(DEFAULT_RNG_SEED)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Ошибки конфига фатальны здесь и только здесь: после Ok(app)
/// runtime-системы не возвращают ошибок и не паникуют.
///
/// Время шагается вручную: один app.update() = ровно один FixedUpdate
/// тик. Headless-прогоны и тесты детерминированы независимо от
/// wall-clock (реальные часы тикали бы быстрее, чем крутится цикл).
pub fn create_headless_app(seed: u64, config: &LevelConfig) -> Result<App, ConfigError> {
    init_logger();

    let scheduler = SpawnScheduler::from_config(config)?;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_TICK_HZ,
        )))
        .insert_resource(SimulationRng::from_seed(seed))
        .insert_resource(scheduler)
        .insert_resource(config.waves.clone())
        .insert_resource(WaveDirector::from_config(&config.waves))
        .add_plugins(SimulationPlugin);

    Ok(app)
}

/// Спавнит игрока со стартовым арсеналом (пистолет + нож + 500 очков)
pub fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((
            Player,
            Health::new(PLAYER_HEALTH),
            Transform::from_translation(position),
            WeaponStats::pistol(),
            MeleeStats::knife(),
            Loadout::default(),
            Points::starting(),
        ))
        .id()
}
