//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: живые существа (Player, Zombie, Health)

pub mod actor;

// Re-exports для удобного импорта
pub use actor::*;
