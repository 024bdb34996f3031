//! Headless симуляция 64.WAD
//!
//! Один враг патрулирует квадрат, игрок бродит случайно (seeded RNG)
//! и иногда стреляет. Usage: `wad64_simulation [tuning.json]`
//! Уровень логов: `WAD64_LOG=debug|info|warning|error`.

use bevy::prelude::*;
use rand::Rng;
use wad64_simulation::logger::{set_log_level, LogLevel};
use wad64_simulation::*;

const TICKS: usize = 2000;
const SEED: u64 = 42;

fn main() {
    if let Some(level) = std::env::var("WAD64_LOG").ok().as_deref().and_then(LogLevel::parse) {
        set_log_level(level);
    }

    let tuning = match std::env::args().nth(1) {
        Some(path) => match EnemyTuning::from_json_file(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log_error(&format!("{}: {}", path, err));
                std::process::exit(1);
            }
        },
        None => EnemyTuning::default(),
    };

    log_info(&format!("Starting 64.WAD headless simulation (seed: {})", SEED));

    let mut app = create_headless_app(SEED);
    app.add_systems(
        FixedUpdate,
        (wander_player, player_fire).chain().before(SimulationSet::Spatial),
    )
    .add_systems(FixedUpdate, report_events.after(SimulationSet::Death));

    let world = app.world_mut();
    let player = spawn_player(&mut world.commands(), Vec3::new(20.0, 0.0, 0.0), 100);
    let route = PatrolRoute::new(
        vec![
            Vec3::new(-4.0, 0.0, -4.0),
            Vec3::new(4.0, 0.0, -4.0),
            Vec3::new(4.0, 0.0, 4.0),
            Vec3::new(-4.0, 0.0, 4.0),
        ],
        true,
    );
    spawn_enemy(&mut world.commands(), &tuning, Vec3::new(-4.0, 0.0, -4.0), route, Some(player));
    spawn_obstacle(&mut world.commands(), Vec3::new(0.0, 0.0, -4.0), 0.75);
    world.flush();

    for tick in 0..TICKS {
        app.update();

        if tick % 200 == 0 {
            let clock = *app.world().resource::<SimClock>();
            log_info(&format!(
                "Tick {} (sim {:.2}s): {} entities, {} spatial bodies",
                tick,
                clock.now,
                app.world().entities().len(),
                app.world().resource::<SpatialIndex>().len()
            ));
        }
    }

    log_info("Simulation complete!");
}

/// Игрок: случайное блуждание вокруг арены
fn wander_player(
    clock: Res<SimClock>,
    mut rng: ResMut<DeterministicRng>,
    mut players: Query<&mut Transform, (With<Player>, Without<Dead>)>,
) {
    for mut transform in players.iter_mut() {
        let step = Vec3::new(rng.rng.gen_range(-1.0..1.0), 0.0, rng.rng.gen_range(-1.0..1.0));
        // Тянемся к центру, чтобы враг периодически замечал игрока
        let pull = -transform.translation * 0.05;
        transform.translation += (step * 4.0 + pull) * clock.delta;
    }
}

/// Игрок: hitscan по ближайшему врагу раз в ~секунду
fn player_fire(
    clock: Res<SimClock>,
    players: Query<(Entity, &Transform), (With<Player>, Without<Dead>)>,
    enemies: Query<&Transform, (With<Enemy>, Without<Dead>)>,
    mut shots: EventWriter<HitscanFired>,
) {
    if clock.tick % 64 != 0 {
        return;
    }

    for (shooter, transform) in players.iter() {
        let origin = transform.translation;
        let nearest = enemies
            .iter()
            .map(|enemy| enemy.translation)
            .min_by(|a, b| origin.distance(*a).total_cmp(&origin.distance(*b)));

        let Some(enemy_pos) = nearest else {
            continue;
        };

        shots.write(HitscanFired {
            shooter,
            origin,
            direction: enemy_pos - origin,
            range: 25.0,
            damage: 15,
        });
    }
}

fn report_events(
    clock: Res<SimClock>,
    mut transitions: EventReader<AIStateChanged>,
    mut deaths: EventReader<EntityDied>,
) {
    for change in transitions.read() {
        log_info(&format!(
            "[{:.2}s] {:?}: {} → {}",
            clock.now,
            change.entity,
            change.from.name(),
            change.to.name()
        ));
    }
    for death in deaths.read() {
        log_info(&format!("[{:.2}s] {:?} died", clock.now, death.entity));
    }
}
