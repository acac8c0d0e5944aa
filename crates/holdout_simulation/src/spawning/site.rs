//! Одна точка спавна: anchor + cooldown + учёт живых токенов

use bevy::prelude::*;

use super::config::SpawnSiteConfig;

/// Точка спавна зомби
///
/// Хранит anchor-позу, личный cooldown и слабые ссылки на своих
/// живых зомби. Ссылки не мешают деспавну: мёртвые вычищаются
/// планировщиком при следующем запросе.
#[derive(Debug, Clone)]
pub struct SpawnSite {
    /// Anchor в мировых координатах
    pub anchor_position: Vec3,

    /// Yaw anchor'а (радианы), наследуется спавнящимися
    pub anchor_yaw: f32,

    /// Секунды между последовательными спавнами этой точки
    pub cooldown: f32,

    /// Время последнего спавна. None = точка ещё не спавнила.
    pub last_spawn_at: Option<f32>,

    /// Живые токены, закреплённые за точкой
    pub live: Vec<Entity>,
}

impl SpawnSite {
    pub fn new(anchor_position: Vec3, anchor_yaw: f32, cooldown: f32) -> Self {
        Self {
            anchor_position,
            anchor_yaw,
            cooldown,
            last_spawn_at: None,
            live: Vec::new(),
        }
    }

    pub fn from_config(config: &SpawnSiteConfig) -> Self {
        Self::new(Vec3::from_array(config.position), config.yaw, config.cooldown)
    }

    /// Прошёл ли cooldown. Точка без истории всегда готова.
    pub fn is_ready(&self, now: f32) -> bool {
        match self.last_spawn_at {
            None => true,
            Some(at) => now - at >= self.cooldown,
        }
    }

    /// Фиксирует спавн: токен в live, cooldown перезапущен
    pub fn mark_spawned(&mut self, now: f32, token: Entity) {
        self.live.push(token);
        self.last_spawn_at = Some(now);
    }

    /// Purge мёртвых токенов: `token_position` вернул None → токен вылетает
    ///
    /// Идемпотентен, кроме live ничего не трогает.
    pub fn purge_stale<P>(&mut self, token_position: P)
    where
        P: Fn(Entity) -> Option<Vec3>,
    {
        self.live.retain(|token| token_position(*token).is_some());
    }
}
