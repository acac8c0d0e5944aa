//! Loadout System — два оружейных слота + каталог покупок
//!
//! # Архитектура
//!
//! **WeaponDef** — статический blueprint (id + цены + stats template):
//! - Хранится в `WeaponCatalog` resource (HashMap lookup)
//! - Создаётся hardcoded в `WeaponCatalog::default()` (позже из RON)
//!
//! **Loadout** — runtime слоты актора:
//! - Активный слот материализован как WeaponStats КОМПОНЕНТ (authoritative)
//! - Копия stats в активном слоте устаревает и синхронизируется
//!   при переключении; магазин/запас при этом не сбрасываются
//!
//! **Switch flow:**
//! - SwitchWeaponIntent → validate → stash active → materialize incoming
//! - Переключение прерывает перезарядку уходящего оружия

use bevy::prelude::*;
use std::collections::HashMap;

use crate::combat::WeaponStats;
use crate::logger;
use crate::PauseState;

// ============================================================================
// WeaponId
// ============================================================================

/// Weapon identifier (unique string ID)
///
/// # Examples
/// - "pistol"
/// - "rifle"
#[derive(Clone, Debug, PartialEq, Eq, Hash, Reflect)]
pub struct WeaponId(pub String);

impl From<&str> for WeaponId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ============================================================================
// WeaponDef + WeaponCatalog (Resource)
// ============================================================================

/// Статическое описание покупаемого оружия
#[derive(Clone, Debug)]
pub struct WeaponDef {
    pub id: WeaponId,

    /// Имя для HUD/магазина
    pub display_name: String,

    /// Цена покупки (очки)
    pub cost: u32,

    /// Цена полного пополнения запаса патронов
    pub ammo_cost: u32,

    /// Stats template: клонируется при покупке (таймеры в нуле)
    pub stats: WeaponStats,
}

/// Weapon definitions lookup table (resource)
///
/// Создаётся один раз при запуске игры.
#[derive(Resource, Clone, Debug)]
pub struct WeaponCatalog {
    definitions: HashMap<WeaponId, WeaponDef>,
}

impl WeaponCatalog {
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    pub fn get(&self, id: &WeaponId) -> Option<&WeaponDef> {
        self.definitions.get(id)
    }

    pub fn add(&mut self, definition: WeaponDef) {
        self.definitions.insert(definition.id.clone(), definition);
    }

    pub fn all_ids(&self) -> Vec<&WeaponId> {
        self.definitions.keys().collect()
    }
}

impl Default for WeaponCatalog {
    /// Hardcoded definitions (базовый арсенал)
    fn default() -> Self {
        let mut catalog = Self::new();

        catalog.add(WeaponDef {
            id: "pistol".into(),
            display_name: "Service Pistol".to_string(),
            cost: 250,
            ammo_cost: 100,
            stats: WeaponStats::pistol(),
        });

        catalog.add(WeaponDef {
            id: "rifle".into(),
            display_name: "Assault Rifle".to_string(),
            cost: 1200,
            ammo_cost: 250,
            stats: WeaponStats::rifle(),
        });

        catalog
    }
}

// ============================================================================
// Loadout (Component)
// ============================================================================

/// Оружие в слоте: id + последнее известное состояние stats
#[derive(Clone, Debug, Reflect)]
pub struct WeaponSlot {
    pub id: WeaponId,
    pub stats: WeaponStats,
}

/// Loadout component: два слота, один активен
///
/// Инвариант: `active < slots.len()`, активный слот занят.
/// WeaponStats компонент актора = материализованный активный слот.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Loadout {
    pub slots: [Option<WeaponSlot>; 2],
    pub active: usize,
}

impl Default for Loadout {
    fn default() -> Self {
        Self::with_primary("pistol".into(), WeaponStats::pistol())
    }
}

impl Loadout {
    /// Loadout с одним оружием в слоте 0
    pub fn with_primary(id: WeaponId, stats: WeaponStats) -> Self {
        Self {
            slots: [Some(WeaponSlot { id, stats }), None],
            active: 0,
        }
    }

    /// Id активного слота
    pub fn active_id(&self) -> Option<&WeaponId> {
        self.slots[self.active].as_ref().map(|slot| &slot.id)
    }
}

// ============================================================================
// Events + Systems
// ============================================================================

/// Event: актор хочет переключиться на слот
#[derive(Event, Debug, Clone)]
pub struct SwitchWeaponIntent {
    pub entity: Entity,
    pub slot: usize,
}

/// Event: переключение состоялось (для HUD/анимации)
#[derive(Event, Debug, Clone)]
pub struct WeaponSwitched {
    pub entity: Entity,
    pub slot: usize,
    pub id: WeaponId,
}

/// System: обработка переключений оружия
///
/// Уходящее оружие стоуится с живым magazine state (патроны не
/// сбрасываются), входящее материализуется в WeaponStats компонент.
pub fn process_weapon_switches(
    mut intents: EventReader<SwitchWeaponIntent>,
    mut actors: Query<(&mut Loadout, &mut WeaponStats)>,
    mut switched: EventWriter<WeaponSwitched>,
    pause: Res<PauseState>,
) {
    for intent in intents.read() {
        if pause.paused {
            continue;
        }

        let Ok((mut loadout, mut weapon)) = actors.get_mut(intent.entity) else {
            continue;
        };
        if intent.slot >= loadout.slots.len() {
            continue;
        }
        if intent.slot == loadout.active {
            logger::log_warning(&format!(
                "🔄 Switch rejected for {:?}: slot {} already active",
                intent.entity, intent.slot
            ));
            continue;
        }
        let Some(incoming) = loadout.slots[intent.slot].clone() else {
            logger::log(&format!(
                "🔄 Switch rejected for {:?}: slot {} is empty",
                intent.entity, intent.slot
            ));
            continue;
        };

        // Стоу текущего оружия; переключение прерывает перезарядку
        let mut stowed = weapon.clone();
        stowed.reload_timer = None;
        let active_index = loadout.active;
        if let Some(active_slot) = loadout.slots[active_index].as_mut() {
            active_slot.stats = stowed;
        }

        *weapon = incoming.stats;
        loadout.active = intent.slot;

        logger::log(&format!(
            "🔄 {:?} switched to slot {} ({})",
            intent.entity, intent.slot, incoming.id.0
        ));
        switched.write(WeaponSwitched {
            entity: intent.entity,
            slot: intent.slot,
            id: incoming.id,
        });
    }
}

/// Loadout Plugin
pub struct LoadoutPlugin;

impl Plugin for LoadoutPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SwitchWeaponIntent>()
            .add_event::<WeaponSwitched>()
            .init_resource::<WeaponCatalog>()
            .add_systems(FixedUpdate, process_weapon_switches);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_default_has_base_arsenal() {
        let catalog = WeaponCatalog::default();

        let pistol = catalog.get(&"pistol".into()).unwrap();
        assert_eq!(pistol.cost, 250);
        assert_eq!(pistol.stats.magazine_size, 8);

        let rifle = catalog.get(&"rifle".into()).unwrap();
        assert_eq!(rifle.cost, 1200);
        assert_eq!(rifle.ammo_cost, 250);

        assert!(catalog.get(&"railgun".into()).is_none());
    }

    #[test]
    fn test_loadout_with_primary() {
        let loadout = Loadout::with_primary("pistol".into(), WeaponStats::pistol());
        assert_eq!(loadout.active, 0);
        assert_eq!(loadout.active_id(), Some(&"pistol".into()));
        assert!(loadout.slots[1].is_none());
    }
}
