//! Weapon state + fire pipeline (ranged combat)
//!
//! Architecture:
//! - ECS: WeaponStats (magazine, cooldown, reload) + validation
//! - Engine: ray/projectile execution, рендер и отдача
//! - Events: FireWeaponIntent (input → ECS), WeaponFired (ECS → engine),
//!   HitReport (engine → ECS, обрабатывается в damage.rs)

use bevy::prelude::*;

use crate::logger;
use crate::PauseState;

/// Weapon stats component (огнестрел с магазином)
///
/// ECS владеет числами: патроны, кулдаун, таймер перезарядки.
/// Engine-слой не трогает эти поля, только читает WeaponFired.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct WeaponStats {
    /// Урон одного выстрела
    pub base_damage: u32,

    /// Секунды между выстрелами
    pub fire_cooldown: f32,

    /// Текущий cooldown timer (уменьшается до 0)
    pub cooldown_timer: f32,

    /// Ёмкость магазина
    pub magazine_size: u32,

    /// Патроны в магазине
    pub rounds_in_magazine: u32,

    /// Запас патронов вне магазина
    pub reserve_ammo: u32,

    /// Длительность перезарядки (секунды)
    pub reload_duration: f32,

    /// Some = перезарядка идёт, значение = оставшиеся секунды
    pub reload_timer: Option<f32>,
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self::pistol()
    }
}

impl WeaponStats {
    /// Стартовый пистолет
    pub fn pistol() -> Self {
        Self {
            base_damage: 30,
            fire_cooldown: 0.4,
            cooldown_timer: 0.0,
            magazine_size: 8,
            rounds_in_magazine: 8,
            reserve_ammo: 64,
            reload_duration: 1.6,
            reload_timer: None,
        }
    }

    /// Автоматическая винтовка (wall buy)
    pub fn rifle() -> Self {
        Self {
            base_damage: 45,
            fire_cooldown: 0.12,
            cooldown_timer: 0.0,
            magazine_size: 30,
            rounds_in_magazine: 30,
            reserve_ammo: 180,
            reload_duration: 2.4,
            reload_timer: None,
        }
    }

    /// Может ли выстрелить прямо сейчас
    pub fn can_fire(&self) -> bool {
        self.cooldown_timer <= 0.0 && self.rounds_in_magazine > 0 && self.reload_timer.is_none()
    }

    /// Начать cooldown после выстрела
    pub fn start_cooldown(&mut self) {
        self.cooldown_timer = self.fire_cooldown;
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_timer.is_some()
    }

    /// Запустить перезарядку
    ///
    /// No-op (false) если: уже перезаряжается, магазин полон, запас пуст.
    pub fn begin_reload(&mut self) -> bool {
        if self.is_reloading()
            || self.rounds_in_magazine == self.magazine_size
            || self.reserve_ammo == 0
        {
            return false;
        }
        self.reload_timer = Some(self.reload_duration);
        true
    }

    /// Завершить перезарядку: перекинуть патроны из запаса в магазин
    pub fn finish_reload(&mut self) {
        let missing = self.magazine_size - self.rounds_in_magazine;
        let moved = missing.min(self.reserve_ammo);
        self.rounds_in_magazine += moved;
        self.reserve_ammo -= moved;
        self.reload_timer = None;
    }

    /// Всего патронов (магазин + запас), для HUD
    pub fn total_ammo(&self) -> u32 {
        self.rounds_in_magazine + self.reserve_ammo
    }
}

/// Event: актор ЖМЁТ спуск (input/AI → ECS)
///
/// Валидация (cooldown, патроны, перезарядка) на стороне ECS.
#[derive(Event, Debug, Clone)]
pub struct FireWeaponIntent {
    /// Кто стреляет
    pub shooter: Entity,
}

/// Event: выстрел состоялся (ECS → engine)
///
/// Engine-слой спавнит трассер/рейкаст и по итогу шлёт HitReport.
#[derive(Event, Debug, Clone)]
pub struct WeaponFired {
    pub shooter: Entity,
    pub damage: u32,
}

/// Event: попадание (engine → ECS)
///
/// Обрабатывается в `damage::apply_hit_reports`.
#[derive(Event, Debug, Clone)]
pub struct HitReport {
    /// Кто выстрелил (для предотвращения self-hit)
    pub shooter: Entity,

    /// В кого попали
    pub target: Entity,

    /// Урон
    pub damage: u32,
}

/// System: тик оружейных таймеров (cooldown + reload)
///
/// Замороженные на паузе таймеры — часть контракта паузы.
pub fn tick_weapons(
    mut weapons: Query<(Entity, &mut WeaponStats)>,
    pause: Res<PauseState>,
    time: Res<Time>,
) {
    if pause.paused {
        return;
    }

    let dt = time.delta_secs();
    for (entity, mut weapon) in weapons.iter_mut() {
        if weapon.cooldown_timer > 0.0 {
            weapon.cooldown_timer = (weapon.cooldown_timer - dt).max(0.0);
        }

        if let Some(remaining) = weapon.reload_timer {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                weapon.finish_reload();
                logger::log(&format!(
                    "🔄 Reload done for {:?}: {}/{} (+{} reserve)",
                    entity, weapon.rounds_in_magazine, weapon.magazine_size, weapon.reserve_ammo
                ));
            } else {
                weapon.reload_timer = Some(remaining);
            }
        }
    }
}

/// System: валидация выстрелов
///
/// FireWeaponIntent → проверка can_fire → минус патрон, cooldown, WeaponFired.
/// Пустой магазин при нажатом спуске автоматически запускает перезарядку.
pub fn process_fire_intents(
    mut intents: EventReader<FireWeaponIntent>,
    mut weapons: Query<&mut WeaponStats>,
    mut fired: EventWriter<WeaponFired>,
    pause: Res<PauseState>,
) {
    for intent in intents.read() {
        if pause.paused {
            continue;
        }

        let Ok(mut weapon) = weapons.get_mut(intent.shooter) else {
            continue;
        };

        if weapon.can_fire() {
            weapon.rounds_in_magazine -= 1;
            weapon.start_cooldown();
            fired.write(WeaponFired {
                shooter: intent.shooter,
                damage: weapon.base_damage,
            });

            if weapon.rounds_in_magazine == 0 {
                logger::log(&format!("⚠️ Magazine empty for {:?}", intent.shooter));
            }
        } else if weapon.rounds_in_magazine == 0 && weapon.begin_reload() {
            logger::log(&format!(
                "🔄 Auto-reload started for {:?} ({}s)",
                intent.shooter, weapon.reload_duration
            ));
        }
    }
}
