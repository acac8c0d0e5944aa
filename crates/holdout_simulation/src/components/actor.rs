//! Базовые компоненты акторов: Player, Zombie, Health

use bevy::prelude::*;

/// Marker component для player-controlled entity
///
/// Акторы БЕЗ этого компонента управляются AI/wave logic.
/// Spawn scheduler ищет субъекта (detection origin) именно по этому маркеру.
///
/// # Single-player
/// В single-player режиме только один entity имеет этот компонент.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Marker component для зомби (wave enemies)
///
/// Вешается фабрикой спавна вместе с Health и Transform.
/// Wave director считает выживших через `With<Zombie>` + `Without<Dead>`.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Zombie;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }
}
