//! Points Economy — очки за урон/убийства, покупки оружия и патронов
//!
//! Поток: combat события (DamageDealt, EntityDied) → начисления →
//! PurchaseIntent → списание → мутация Loadout/WeaponStats.
//! Все отказы тихие (лог + no-op), паника исключена.

use bevy::prelude::*;

use crate::combat::{DamageDealt, EntityDied, WeaponStats};
use crate::loadout::{Loadout, WeaponCatalog, WeaponSlot};
use crate::logger;
use crate::PauseState;

/// Очки за подтверждённое попадание
pub const POINTS_PER_HIT: u32 = 10;

/// Бонус за убийство (сверх очков попадания)
pub const POINTS_PER_KILL: u32 = 60;

/// Стартовый баланс игрока
pub const STARTING_POINTS: u32 = 500;

/// Points component: кошелёк актора
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Points {
    /// Текущий баланс
    pub balance: u32,

    /// Всего заработано за сессию (для статистики, не тратится)
    pub lifetime_earned: u32,
}

impl Default for Points {
    fn default() -> Self {
        Self::starting()
    }
}

impl Points {
    pub fn starting() -> Self {
        Self {
            balance: STARTING_POINTS,
            lifetime_earned: STARTING_POINTS,
        }
    }

    pub fn earn(&mut self, amount: u32) {
        self.balance += amount;
        self.lifetime_earned += amount;
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.balance >= cost
    }

    /// Списывает cost. false = недостаточно очков, баланс не тронут.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        if self.can_afford(cost) {
            self.balance -= cost;
            true
        } else {
            false
        }
    }
}

/// Причина начисления
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsReason {
    Hit,
    Kill,
}

/// Event: очки начислены (для HUD popup)
#[derive(Event, Debug, Clone)]
pub struct PointsAwarded {
    pub entity: Entity,
    pub amount: u32,
    pub reason: PointsReason,
}

/// Что покупаем
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOrder {
    /// Оружие из каталога в указанный слот
    Weapon { id: crate::loadout::WeaponId, slot: usize },

    /// Полный запас патронов для активного оружия
    AmmoRefill,
}

/// Event: актор хочет купить
#[derive(Event, Debug, Clone)]
pub struct PurchaseIntent {
    pub buyer: Entity,
    pub order: PurchaseOrder,
}

/// Event: покупка состоялась
#[derive(Event, Debug, Clone)]
pub struct PurchaseCompleted {
    pub buyer: Entity,
    pub order: PurchaseOrder,
}

/// System: начисления за combat события
///
/// Попадание: POINTS_PER_HIT атакующему. Убийство: ещё POINTS_PER_KILL
/// киллеру. Акторы без Points (зомби) просто не получают начислений.
/// Паузой не гейтится: прочитанное reader'ом событие повторно не выдаётся.
pub fn award_combat_points(
    mut dealt: EventReader<DamageDealt>,
    mut died: EventReader<EntityDied>,
    mut wallets: Query<&mut Points>,
    mut awarded: EventWriter<PointsAwarded>,
) {
    for event in dealt.read() {
        if let Ok(mut points) = wallets.get_mut(event.attacker) {
            points.earn(POINTS_PER_HIT);
            awarded.write(PointsAwarded {
                entity: event.attacker,
                amount: POINTS_PER_HIT,
                reason: PointsReason::Hit,
            });
        }
    }

    for event in died.read() {
        let Some(killer) = event.killer else {
            continue;
        };
        if let Ok(mut points) = wallets.get_mut(killer) {
            points.earn(POINTS_PER_KILL);
            awarded.write(PointsAwarded {
                entity: killer,
                amount: POINTS_PER_KILL,
                reason: PointsReason::Kill,
            });
            logger::log(&format!(
                "💰 Kill bonus {} for {:?} (balance: {})",
                POINTS_PER_KILL, killer, points.balance
            ));
        }
    }
}

/// System: обработка покупок
///
/// Валидация: слот существует, id в каталоге, хватает очков.
/// AmmoRefill доводит запас активного оружия до значения template.
pub fn process_purchases(
    mut intents: EventReader<PurchaseIntent>,
    mut buyers: Query<(&mut Points, &mut Loadout, &mut WeaponStats)>,
    catalog: Res<WeaponCatalog>,
    mut completed: EventWriter<PurchaseCompleted>,
    pause: Res<PauseState>,
) {
    // На паузе intents не потребляем, остаются в буфере
    if pause.paused {
        return;
    }

    for intent in intents.read() {
        let Ok((mut points, mut loadout, mut weapon)) = buyers.get_mut(intent.buyer) else {
            continue;
        };

        match &intent.order {
            PurchaseOrder::Weapon { id, slot } => {
                if *slot >= loadout.slots.len() {
                    continue;
                }
                let Some(def) = catalog.get(id) else {
                    logger::log_warning(&format!("⚠️ Unknown weapon id '{}' in purchase", id.0));
                    continue;
                };
                if !points.try_spend(def.cost) {
                    logger::log(&format!(
                        "💸 {:?} can't afford {} ({} < {})",
                        intent.buyer, def.display_name, points.balance, def.cost
                    ));
                    continue;
                }

                loadout.slots[*slot] = Some(WeaponSlot {
                    id: id.clone(),
                    stats: def.stats.clone(),
                });
                if *slot == loadout.active {
                    // Покупка в активный слот сразу материализуется
                    *weapon = def.stats.clone();
                }

                logger::log(&format!(
                    "💰 {:?} bought {} into slot {} (balance: {})",
                    intent.buyer, def.display_name, slot, points.balance
                ));
                completed.write(PurchaseCompleted {
                    buyer: intent.buyer,
                    order: intent.order.clone(),
                });
            }
            PurchaseOrder::AmmoRefill => {
                let Some(active_id) = loadout.active_id().cloned() else {
                    continue;
                };
                let Some(def) = catalog.get(&active_id) else {
                    continue;
                };
                if weapon.reserve_ammo >= def.stats.reserve_ammo {
                    logger::log(&format!("💸 Ammo already full for {:?}", intent.buyer));
                    continue;
                }
                if !points.try_spend(def.ammo_cost) {
                    logger::log(&format!(
                        "💸 {:?} can't afford ammo ({} < {})",
                        intent.buyer, points.balance, def.ammo_cost
                    ));
                    continue;
                }

                weapon.reserve_ammo = def.stats.reserve_ammo;
                logger::log(&format!(
                    "💰 {:?} refilled ammo to {} (balance: {})",
                    intent.buyer, weapon.reserve_ammo, points.balance
                ));
                completed.write(PurchaseCompleted {
                    buyer: intent.buyer,
                    order: intent.order.clone(),
                });
            }
        }
    }
}

/// Economy Plugin
pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PointsAwarded>()
            .add_event::<PurchaseIntent>()
            .add_event::<PurchaseCompleted>()
            .add_systems(
                FixedUpdate,
                (award_combat_points, process_purchases).chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_earn_and_spend() {
        let mut points = Points::starting();
        assert_eq!(points.balance, 500);

        points.earn(70);
        assert_eq!(points.balance, 570);
        assert_eq!(points.lifetime_earned, 570);

        assert!(points.try_spend(250));
        assert_eq!(points.balance, 320);
        // lifetime не уменьшается тратами
        assert_eq!(points.lifetime_earned, 570);
    }

    #[test]
    fn test_try_spend_insufficient() {
        let mut points = Points::starting();
        assert!(!points.try_spend(501));
        assert_eq!(points.balance, 500, "отказ не трогает баланс");
    }
}
