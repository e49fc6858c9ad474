//! Headless демо ARMORY
//!
//! Загружает конфиг оружия (путь из первого аргумента или встроенный rifle preset),
//! спавнит hitscan + projectile оружие и жмёт спуск по расписанию.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use armory_simulation::systems::{FireInput, ScreenShakeRequested, ShooterOf, WeaponFired, WeaponLoadout};
use armory_simulation::{create_headless_app, log_error, log_info, SimulationPlugin, WeaponConfig};

const FRAMES: u32 = 600;
const FRAME_TIME: f32 = 1.0 / 60.0;

fn load_config() -> WeaponConfig {
    let Some(path) = std::env::args().nth(1) else {
        return WeaponConfig::rifle();
    };

    match WeaponConfig::load(&path) {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("{} ({}), falling back to rifle preset", err, path));
            WeaponConfig::rifle()
        }
    }
}

/// Спуск зажат в окнах по 0.5s каждые 2s
fn trigger_schedule(mut inputs: Query<&mut FireInput>, time: Res<Time>) {
    let held = time.elapsed_secs() % 2.0 < 0.5;
    for mut input in inputs.iter_mut() {
        input.held = held;
    }
}

fn report_shots(mut fired: EventReader<WeaponFired>, mut shakes: EventReader<ScreenShakeRequested>) {
    for event in fired.read() {
        log_info(&format!(
            "Shot from {:?}: {:?} (ammo left: {})",
            event.weapon, event.hit, event.ammo_remaining
        ));
    }
    for event in shakes.read() {
        log_info(&format!("Screen shake: {:?}", event.request));
    }
}

fn main() {
    let seed = 42;
    let config = load_config();
    log_info(&format!(
        "Starting ARMORY headless simulation (seed: {}, weapon: {})",
        seed, config.name
    ));

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(FRAME_TIME)))
        .add_systems(PreUpdate, trigger_schedule)
        .add_systems(PostUpdate, report_shots);

    let shooter = app.world_mut().spawn(Transform::default()).id();
    app.world_mut().spawn((
        WeaponLoadout::new(config),
        FireInput::default(),
        ShooterOf(shooter),
        Transform::from_xyz(0.3, -0.2, -0.5),
    ));
    app.world_mut().spawn((
        WeaponLoadout::new(WeaponConfig::launcher()),
        FireInput::default(),
        ShooterOf(shooter),
        Transform::from_xyz(-0.3, -0.2, -0.5),
    ));

    for frame in 0..FRAMES {
        app.update();

        if frame % 100 == 0 {
            let entity_count = app.world().entities().len();
            log_info(&format!("Frame {}: {} entities", frame, entity_count));
        }
    }

    log_info("Simulation complete!");
}
