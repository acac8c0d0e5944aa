//! Data-driven конфигурация уровня: spawn sites + волны (RON)
//!
//! Ошибки конфига фатальны ТОЛЬКО при инициализации. После успешной
//! валидации runtime-системы не паникуют: деградация всегда «тихая»
//! (0 спавнов + warning в лог).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Конфиг одной точки спавна
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnSiteConfig {
    /// Anchor position в мировых координатах
    pub position: [f32; 3],

    /// Ориентация (yaw, радианы). Спавнящиеся наследуют её.
    #[serde(default)]
    pub yaw: f32,

    /// Секунды между последовательными спавнами этой точки
    #[serde(default = "default_site_cooldown")]
    pub cooldown: f32,
}

fn default_site_cooldown() -> f32 {
    6.0
}

/// Конфиг волновой прогрессии
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct WaveConfig {
    /// Бюджет первой волны (сколько зомби заспавнить)
    #[serde(default = "default_first_wave_count")]
    pub first_wave_count: u32,

    /// Прирост бюджета на каждую следующую волну
    #[serde(default = "default_per_wave_growth")]
    pub per_wave_growth: u32,

    /// Максимум зомби в одном spawn request
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// Секунды между batch-запросами внутри волны
    #[serde(default = "default_batch_interval")]
    pub batch_interval: f32,

    /// Пауза между волнами (секунды)
    #[serde(default = "default_intermission")]
    pub intermission: f32,
}

fn default_first_wave_count() -> u32 {
    6
}
fn default_per_wave_growth() -> u32 {
    3
}
fn default_batch_size() -> u32 {
    4
}
fn default_batch_interval() -> f32 {
    2.0
}
fn default_intermission() -> f32 {
    10.0
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            first_wave_count: default_first_wave_count(),
            per_wave_growth: default_per_wave_growth(),
            batch_size: default_batch_size(),
            batch_interval: default_batch_interval(),
            intermission: default_intermission(),
        }
    }
}

/// Конфиг уровня целиком (`.level.ron`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Радиус активации точек вокруг игрока (метры)
    #[serde(default = "default_detection_radius")]
    pub detection_radius: f32,

    /// Минимальная дистанция между спавнящимся и живыми зомби точки
    #[serde(default = "default_min_spacing")]
    pub min_spacing: f32,

    /// Максимальный разброс вокруг anchor при jitter-плейсменте
    #[serde(default = "default_max_spawn_offset")]
    pub max_spawn_offset: f32,

    /// Точки спавна (минимум одна)
    pub sites: Vec<SpawnSiteConfig>,

    /// Волновая прогрессия
    #[serde(default)]
    pub waves: WaveConfig,
}

fn default_detection_radius() -> f32 {
    45.0
}
fn default_min_spacing() -> f32 {
    1.0
}
fn default_max_spawn_offset() -> f32 {
    4.0
}

impl Default for LevelConfig {
    fn default() -> Self {
        // Четыре точки по периметру тестовой арены
        Self {
            detection_radius: default_detection_radius(),
            min_spacing: default_min_spacing(),
            max_spawn_offset: default_max_spawn_offset(),
            sites: vec![
                SpawnSiteConfig { position: [20.0, 0.0, 0.0], yaw: std::f32::consts::PI, cooldown: default_site_cooldown() },
                SpawnSiteConfig { position: [-20.0, 0.0, 0.0], yaw: 0.0, cooldown: default_site_cooldown() },
                SpawnSiteConfig { position: [0.0, 0.0, 20.0], yaw: -std::f32::consts::FRAC_PI_2, cooldown: default_site_cooldown() },
                SpawnSiteConfig { position: [0.0, 0.0, -20.0], yaw: std::f32::consts::FRAC_PI_2, cooldown: default_site_cooldown() },
            ],
            waves: WaveConfig::default(),
        }
    }
}

impl LevelConfig {
    /// Парсит RON-текст и валидирует
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: LevelConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Загружает `.level.ron` с диска и валидирует
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Проверка инвариантов конфига. Вызывается при каждой загрузке,
    /// `SpawnScheduler::from_config` прогоняет её повторно.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sites.is_empty() {
            return Err(ConfigError::NoSites);
        }
        if !(self.min_spacing.is_finite() && self.min_spacing > 0.0)
            || !(self.max_spawn_offset.is_finite() && self.max_spawn_offset > self.min_spacing)
            || !(self.detection_radius.is_finite() && self.detection_radius > 0.0)
        {
            return Err(ConfigError::InvalidSpacing);
        }
        for (index, site) in self.sites.iter().enumerate() {
            if site.position.iter().any(|c| !c.is_finite()) || !site.yaw.is_finite() {
                return Err(ConfigError::InvalidAnchor { index });
            }
            if !site.cooldown.is_finite() || site.cooldown < 0.0 {
                return Err(ConfigError::InvalidCooldown { index });
            }
        }
        Ok(())
    }
}

/// Ошибки загрузки/валидации level config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("level config has no spawn sites")]
    NoSites,

    #[error("site {index}: anchor position/yaw must be finite")]
    InvalidAnchor { index: usize },

    #[error("site {index}: cooldown must be finite and non-negative")]
    InvalidCooldown { index: usize },

    #[error("min_spacing must be positive, max_spawn_offset must exceed it, detection_radius must be positive")]
    InvalidSpacing,

    #[error("I/O while reading level config: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
