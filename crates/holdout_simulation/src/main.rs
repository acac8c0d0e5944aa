//! Headless симуляция HOLDOUT
//!
//! Запускает Bevy App без рендера: волны стартуют, зомби спавнятся по
//! точкам, лог показывает прогрессию. Путь к `.level.ron` можно передать
//! первым аргументом, иначе builtin-уровень.

use bevy::prelude::*;

use holdout_simulation::{
    create_headless_app, spawn_player, Dead, LevelConfig, WaveDirector, Zombie, DEFAULT_RNG_SEED,
};

fn main() {
    let seed = DEFAULT_RNG_SEED;
    println!("Starting HOLDOUT headless simulation (seed: {})", seed);

    let config = match std::env::args().nth(1) {
        Some(path) => match LevelConfig::load(&path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("Failed to load level '{}': {}", path, error);
                std::process::exit(1);
            }
        },
        None => LevelConfig::default(),
    };

    let mut app = match create_headless_app(seed, &config) {
        Ok(app) => app,
        Err(error) => {
            eprintln!("Invalid level config: {}", error);
            std::process::exit(1);
        }
    };

    spawn_player(app.world_mut(), Vec3::ZERO);

    // Прогоняем 3600 тиков (минута игрового времени при 60Hz)
    for tick in 0..3600 {
        app.update();

        if tick % 600 == 0 {
            let world = app.world_mut();
            let wave = world.resource::<WaveDirector>().wave;
            let mut survivors = world.query_filtered::<(), (With<Zombie>, Without<Dead>)>();
            let alive = survivors.iter(world).count();
            println!("Tick {}: wave {}, {} zombies alive", tick, wave, alive);
        }
    }

    println!("Simulation complete!");
}
