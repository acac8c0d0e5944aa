//! Волновой директор: intermission → spawning → clearing
//!
//! Держит бюджет волны и выдаёт батчи SpawnZombiesRequest. Списание
//! бюджета идёт по подтверждениям ZombieSpawned, поэтому недоборы
//! планировщика (точки остывают) автоматически перезапрашиваются
//! следующим батчем.

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::Zombie;
use crate::logger;
use crate::PauseState;
use super::config::WaveConfig;
use super::systems::{SpawnZombiesRequest, ZombieSpawned};

/// Фаза волнового цикла
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WavePhase {
    /// Отдых между волнами
    Intermission { remaining: f32 },

    /// Батчи выдаются пока не исчерпан бюджет
    Spawning { to_spawn: u32, until_next_batch: f32 },

    /// Бюджет выдан, ждём зачистки выживших
    Clearing,
}

/// Resource: состояние волновой прогрессии
#[derive(Resource, Debug)]
pub struct WaveDirector {
    /// Номер текущей волны (0 = первая ещё не стартовала)
    pub wave: u32,

    pub phase: WavePhase,
}

impl WaveDirector {
    pub fn from_config(config: &WaveConfig) -> Self {
        Self {
            wave: 0,
            phase: WavePhase::Intermission {
                remaining: config.intermission,
            },
        }
    }

    /// Бюджет волны: линейный рост от стартового
    pub fn budget_for_wave(wave: u32, config: &WaveConfig) -> u32 {
        config.first_wave_count + config.per_wave_growth * wave.saturating_sub(1)
    }
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::from_config(&WaveConfig::default())
    }
}

/// Событие: волна стартовала
#[derive(Event, Debug, Clone)]
pub struct WaveStarted {
    pub wave: u32,
    pub budget: u32,
}

/// Событие: волна зачищена (все зомби волны мертвы)
#[derive(Event, Debug, Clone)]
pub struct WaveCleared {
    pub wave: u32,
}

/// System: тик волнового директора
///
/// На паузе таймеры не идут и батчи не выдаются. Списание бюджета по
/// подтверждениям выполняется и на паузе: reader их уже потребил.
pub fn drive_waves(
    mut director: ResMut<WaveDirector>,
    config: Res<WaveConfig>,
    pause: Res<PauseState>,
    time: Res<Time>,
    mut confirmations: EventReader<ZombieSpawned>,
    mut requests: EventWriter<SpawnZombiesRequest>,
    mut started: EventWriter<WaveStarted>,
    mut cleared: EventWriter<WaveCleared>,
    survivors: Query<(), (With<Zombie>, Without<Dead>)>,
) {
    // Подтверждения дочитываем каждый тик, иначе reader отстанет
    let confirmed = confirmations.read().count() as u32;

    let director = &mut *director;

    // Списание до pause-gate: потреблённое подтверждение не перечитать
    if confirmed > 0 {
        if let WavePhase::Spawning { to_spawn, .. } = &mut director.phase {
            *to_spawn = to_spawn.saturating_sub(confirmed);
        }
    }

    if pause.paused {
        return;
    }

    let dt = time.delta_secs();

    match &mut director.phase {
        WavePhase::Intermission { remaining } => {
            *remaining -= dt;
            if *remaining <= 0.0 {
                director.wave += 1;
                let budget = WaveDirector::budget_for_wave(director.wave, &config);
                director.phase = WavePhase::Spawning {
                    to_spawn: budget,
                    until_next_batch: 0.0,
                };
                started.write(WaveStarted { wave: director.wave, budget });
                logger::log_info(&format!(
                    "🌊 Wave {} started (budget: {})",
                    director.wave, budget
                ));
            }
        }
        WavePhase::Spawning { to_spawn, until_next_batch } => {
            if *to_spawn == 0 {
                director.phase = WavePhase::Clearing;
            } else {
                *until_next_batch -= dt;
                if *until_next_batch <= 0.0 {
                    let count = (*to_spawn).min(config.batch_size);
                    requests.write(SpawnZombiesRequest { count });
                    *until_next_batch = config.batch_interval;
                }
            }
        }
        WavePhase::Clearing => {
            if survivors.is_empty() {
                cleared.write(WaveCleared { wave: director.wave });
                logger::log_info(&format!("🏁 Wave {} cleared", director.wave));
                director.phase = WavePhase::Intermission {
                    remaining: config.intermission,
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_growth_is_linear() {
        let config = WaveConfig::default(); // first 6, growth 3
        assert_eq!(WaveDirector::budget_for_wave(1, &config), 6);
        assert_eq!(WaveDirector::budget_for_wave(2, &config), 9);
        assert_eq!(WaveDirector::budget_for_wave(5, &config), 18);
    }

    #[test]
    fn test_director_starts_in_intermission() {
        let config = WaveConfig::default();
        let director = WaveDirector::from_config(&config);
        assert_eq!(director.wave, 0);
        assert_eq!(
            director.phase,
            WavePhase::Intermission { remaining: config.intermission }
        );
    }
}
