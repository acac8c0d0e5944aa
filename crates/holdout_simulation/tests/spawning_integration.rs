//! Spawn scheduling integration test
//!
//! Полный ECS-путь: SpawnZombiesRequest события → планировщик →
//! entities в мире. Волновой директор приглушён огромным intermission,
//! запросами управляют сами тесты.
//!
//! Проверяем:
//! - Пауза/отсутствие игрока блокируют спавн
//! - Cooldown и эксклюзивность точек в рамках одного тика
//! - Purge мёртвых токенов через liveness-фильтр
//! - Детерминизм позиций при одном seed

use bevy::prelude::*;
use holdout_simulation::*;

/// Helper: конфиг уровня для спавн-тестов (волны фактически выключены)
fn quiet_level(sites: Vec<SpawnSiteConfig>) -> LevelConfig {
    LevelConfig {
        detection_radius: 45.0,
        min_spacing: 1.0,
        max_spawn_offset: 4.0,
        sites,
        waves: WaveConfig {
            intermission: 1.0e6,
            ..Default::default()
        },
    }
}

fn site(x: f32, z: f32, cooldown: f32) -> SpawnSiteConfig {
    SpawnSiteConfig {
        position: [x, 0.0, z],
        yaw: 0.0,
        cooldown,
    }
}

/// Helper: App + игрок в центре
fn create_spawn_app(seed: u64, config: &LevelConfig) -> (App, Entity) {
    let mut app = create_headless_app(seed, config).expect("test config is valid");
    let player = spawn_player(app.world_mut(), Vec3::ZERO);
    (app, player)
}

fn step(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn alive_zombies(app: &mut App) -> Vec<(Entity, Vec3)> {
    let world = app.world_mut();
    let mut query = world.query_filtered::<(Entity, &Transform), (With<Zombie>, Without<Dead>)>();
    query
        .iter(world)
        .map(|(entity, transform)| (entity, transform.translation))
        .collect()
}

#[test]
fn test_request_spawns_zombies_with_components() {
    let config = quiet_level(vec![site(20.0, 0.0, 6.0)]);
    let (mut app, _player) = create_spawn_app(42, &config);

    app.world_mut().send_event(SpawnZombiesRequest { count: 1 });
    step(&mut app, 2);

    let zombies = alive_zombies(&mut app);
    assert_eq!(zombies.len(), 1);

    // Пустая точка спавнит ровно на anchor
    let (entity, position) = zombies[0];
    assert_eq!(position, Vec3::new(20.0, 0.0, 0.0));

    let health = app.world().get::<Health>(entity).unwrap();
    assert_eq!(health.current, ZOMBIE_HEALTH);
    assert!(health.is_alive());

    let scheduler = app.world().resource::<SpawnScheduler>();
    assert_eq!(scheduler.live_total(), 1);
    assert_eq!(scheduler.sites[0].live, vec![entity]);
}

#[test]
fn test_pause_blocks_spawning() {
    let config = quiet_level(vec![site(10.0, 0.0, 6.0), site(-10.0, 0.0, 6.0)]);
    let (mut app, _player) = create_spawn_app(42, &config);

    app.world_mut().resource_mut::<PauseState>().paused = true;
    app.world_mut().send_event(SpawnZombiesRequest { count: 2 });
    step(&mut app, 5);

    assert!(alive_zombies(&mut app).is_empty());
    let scheduler = app.world().resource::<SpawnScheduler>();
    assert!(scheduler.sites.iter().all(|s| s.last_spawn_at.is_none()));

    // После снятия паузы спавн работает (старый запрос истёк,
    // отправляем заново)
    app.world_mut().resource_mut::<PauseState>().paused = false;
    app.world_mut().send_event(SpawnZombiesRequest { count: 2 });
    step(&mut app, 2);
    assert_eq!(alive_zombies(&mut app).len(), 2);
}

#[test]
fn test_no_player_means_no_spawns() {
    let config = quiet_level(vec![site(10.0, 0.0, 6.0)]);
    let mut app = create_headless_app(42, &config).expect("test config is valid");

    app.world_mut().send_event(SpawnZombiesRequest { count: 3 });
    step(&mut app, 5);

    assert!(alive_zombies(&mut app).is_empty());
}

#[test]
fn test_out_of_range_sites_ignored() {
    // Одна точка рядом, одна за detection_radius (100 > 45)
    let config = quiet_level(vec![site(15.0, 0.0, 6.0), site(100.0, 0.0, 6.0)]);
    let (mut app, _player) = create_spawn_app(42, &config);

    app.world_mut().send_event(SpawnZombiesRequest { count: 5 });
    step(&mut app, 2);

    let zombies = alive_zombies(&mut app);
    assert_eq!(zombies.len(), 1);

    let scheduler = app.world().resource::<SpawnScheduler>();
    assert_eq!(scheduler.sites[0].live.len(), 1);
    assert!(scheduler.sites[1].live.is_empty());
    assert_eq!(scheduler.sites[1].last_spawn_at, None);
}

#[test]
fn test_site_cooldown_limits_rate() {
    let config = quiet_level(vec![site(10.0, 0.0, 6.0)]);
    let (mut app, _player) = create_spawn_app(42, &config);

    app.world_mut().send_event(SpawnZombiesRequest { count: 1 });
    step(&mut app, 2);
    assert_eq!(alive_zombies(&mut app).len(), 1);

    // Точка остывает: повторный запрос сразу же — пусто
    app.world_mut().send_event(SpawnZombiesRequest { count: 1 });
    step(&mut app, 2);
    assert_eq!(alive_zombies(&mut app).len(), 1);

    // Через 6+ секунд симуляции точка снова готова
    step(&mut app, 6 * 60 + 5);
    app.world_mut().send_event(SpawnZombiesRequest { count: 1 });
    step(&mut app, 2);
    assert_eq!(alive_zombies(&mut app).len(), 2);
}

#[test]
fn test_per_tick_site_exclusivity() {
    let config = quiet_level(vec![
        site(10.0, 0.0, 0.0),
        site(-10.0, 0.0, 0.0),
        site(0.0, 10.0, 0.0),
        site(0.0, -10.0, 0.0),
    ]);
    let (mut app, _player) = create_spawn_app(42, &config);

    // Просим 10 за один тик: каждая точка даёт максимум одного
    app.world_mut().send_event(SpawnZombiesRequest { count: 10 });
    step(&mut app, 2);

    assert_eq!(alive_zombies(&mut app).len(), 4);
    let scheduler = app.world().resource::<SpawnScheduler>();
    assert!(scheduler.sites.iter().all(|s| s.live.len() == 1));
}

#[test]
fn test_dead_zombies_purged_from_site_books() {
    let config = quiet_level(vec![site(10.0, 0.0, 6.0)]);
    let (mut app, player) = create_spawn_app(42, &config);

    app.world_mut().send_event(SpawnZombiesRequest { count: 1 });
    step(&mut app, 2);
    let zombies = alive_zombies(&mut app);
    let target = zombies[0].0;

    // Убиваем через engine-отчёт о попадании
    app.world_mut().send_event(HitReport {
        shooter: player,
        target,
        damage: ZOMBIE_HEALTH,
    });
    step(&mut app, 3);
    assert!(app.world().get::<Dead>(target).is_some());

    // Следующий запрос выполняет purge: мёртвый токен вылетает из live
    app.world_mut().send_event(SpawnZombiesRequest { count: 1 });
    step(&mut app, 2);
    let scheduler = app.world().resource::<SpawnScheduler>();
    assert!(!scheduler.sites[0].live.contains(&target));
}

#[test]
fn test_spacing_between_consecutive_spawns() {
    // cooldown 0: точка готова каждый тик
    let config = quiet_level(vec![site(10.0, 0.0, 0.0)]);
    let (mut app, _player) = create_spawn_app(42, &config);

    for _ in 0..5 {
        app.world_mut().send_event(SpawnZombiesRequest { count: 1 });
        step(&mut app, 2);
    }

    let zombies = alive_zombies(&mut app);
    assert_eq!(zombies.len(), 5);

    // Живых зомби никто не двигал: все пары ≥ min_spacing
    for (i, (_, a)) in zombies.iter().enumerate() {
        for (_, b) in zombies.iter().skip(i + 1) {
            assert!(
                a.distance(*b) >= 1.0,
                "zombies too close: {:?} vs {:?}",
                a,
                b
            );
        }
    }
}

#[test]
fn test_same_seed_identical_spawn_positions() {
    let run = |seed: u64| -> Vec<Vec3> {
        let config = quiet_level(vec![
            site(10.0, 0.0, 0.0),
            site(-10.0, 0.0, 0.0),
            site(0.0, 10.0, 0.0),
        ]);
        let (mut app, _player) = create_spawn_app(seed, &config);

        for _ in 0..4 {
            app.world_mut().send_event(SpawnZombiesRequest { count: 2 });
            step(&mut app, 2);
        }

        let mut positions: Vec<Vec3> =
            alive_zombies(&mut app).into_iter().map(|(_, p)| p).collect();
        positions.sort_by(|a, b| {
            (a.x, a.z)
                .partial_cmp(&(b.x, b.z))
                .expect("spawn positions are finite")
        });
        positions
    };

    assert_eq!(run(42), run(42));
    // Другой seed — другая раскладка (почти наверняка)
    assert_ne!(run(42), run(1337));
}
