//! Планировщик спавна: candidate selection, розыгрыш точек, bookkeeping
//!
//! Engine-независимое ядро. Весь внешний мир заходит через узкие
//! интерфейсы: SpawnContext (время/пауза/субъект), closure liveness
//! (Entity → позиция живого токена) и closure-фабрика (создание
//! entity). ECS-обвязка в systems.rs.

use bevy::prelude::*;
use rand::Rng;

use super::config::{ConfigError, LevelConfig};
use super::placement::resolve_spawn_offset;
use super::site::SpawnSite;
use crate::logger;

/// Снимок внешнего состояния для одного вызова request_spawns
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext {
    /// Текущее время симуляции (секунды от старта)
    pub now: f32,

    /// Симуляция на паузе?
    pub paused: bool,

    /// Позиция субъекта (игрока). None = спавн не активируется.
    pub subject: Option<Vec3>,
}

/// Resource: планировщик спавна уровня
///
/// Создаётся строго через `from_config` (валидация фатальна при
/// инициализации). После этого ни один метод не паникует и не
/// возвращает ошибок: просадки выражаются количеством спавнов.
#[derive(Resource, Debug)]
pub struct SpawnScheduler {
    /// Точки спавна уровня
    pub sites: Vec<SpawnSite>,

    /// Радиус активации точек вокруг субъекта
    pub detection_radius: f32,

    /// Минимальная дистанция между спавнящимся и живыми токенами
    pub min_spacing: f32,

    /// Максимальный разброс jitter-плейсмента
    pub max_spawn_offset: f32,
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        // Default config валиден по построению, через Result не гоняем
        let config = LevelConfig::default();
        Self {
            sites: config.sites.iter().map(SpawnSite::from_config).collect(),
            detection_radius: config.detection_radius,
            min_spacing: config.min_spacing,
            max_spawn_offset: config.max_spawn_offset,
        }
    }
}

impl SpawnScheduler {
    pub fn from_config(config: &LevelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sites: config.sites.iter().map(SpawnSite::from_config).collect(),
            detection_radius: config.detection_radius,
            min_spacing: config.min_spacing,
            max_spawn_offset: config.max_spawn_offset,
        })
    }

    /// Сколько живых токенов числится за всеми точками
    pub fn live_total(&self) -> usize {
        self.sites.iter().map(|site| site.live.len()).sum()
    }

    /// Отбор кандидатов: cooldown готов И anchor в detection_radius
    ///
    /// Пустой результат не ошибка, а нормальное «этот тик без спавна».
    pub fn candidate_indices(&self, now: f32, subject: Vec3) -> Vec<usize> {
        self.sites
            .iter()
            .enumerate()
            .filter(|(_, site)| {
                site.is_ready(now)
                    && site.anchor_position.distance(subject) <= self.detection_radius
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Запрашивает до `requested` спавнов за этот вызов
    ///
    /// Алгоритм:
    /// 1. Пауза → 0, никаких мутаций.
    /// 2. Purge: из live-списков выкидываются токены, на которые
    ///    `token_position` вернул None.
    /// 3. Нет субъекта → 0 (purge уже состоялся).
    /// 4. Кандидаты: cooldown готов И anchor в detection_radius от субъекта.
    /// 5. До `requested` розыгрышей равновероятно БЕЗ возврата: каждая
    ///    точка максимум один спавн за вызов, даже если запрошено больше.
    /// 6. Розыгрыш: placement → `factory(site_index, position, yaw)` →
    ///    токен в live, cooldown перезапущен.
    ///
    /// Возвращает фактическое число спавнов (может быть меньше requested).
    pub fn request_spawns<P, F>(
        &mut self,
        ctx: &SpawnContext,
        requested: u32,
        rng: &mut impl Rng,
        token_position: P,
        mut factory: F,
    ) -> u32
    where
        P: Fn(Entity) -> Option<Vec3>,
        F: FnMut(usize, Vec3, f32) -> Entity,
    {
        if ctx.paused {
            return 0;
        }

        for site in &mut self.sites {
            site.purge_stale(&token_position);
        }

        let Some(subject) = ctx.subject else {
            return 0;
        };

        let mut candidates = self.candidate_indices(ctx.now, subject);

        let mut spawned = 0u32;
        while spawned < requested && !candidates.is_empty() {
            let pick = rng.gen_range(0..candidates.len());
            let site_index = candidates.swap_remove(pick);

            let live_positions: Vec<Vec3> = self.sites[site_index]
                .live
                .iter()
                .filter_map(|token| token_position(*token))
                .collect();

            let position = resolve_spawn_offset(
                self.sites[site_index].anchor_position,
                &live_positions,
                self.min_spacing,
                self.max_spawn_offset,
                rng,
            );
            let token = factory(site_index, position, self.sites[site_index].anchor_yaw);
            self.sites[site_index].mark_spawned(ctx.now, token);
            spawned += 1;
        }

        if spawned > 0 {
            logger::log(&format!(
                "🧟 Spawned {}/{} requested ({} live total)",
                spawned,
                requested,
                self.live_total()
            ));
        }
        spawned
    }
}
