//! ARMORY Simulation Core
//!
//! Weapon-firing subsystem на Bevy 0.16 + bevy_rapier3d
//!
//! Слои:
//! - Core (engine-agnostic): FireController, HitResolver, RecoilModel,
//!   EffectDispatcher, Weapon - коллабораторы через traits
//! - ECS (`systems`): WeaponPlugin, rapier adapter, события для presentation

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod collision_layers;
pub mod config;
pub mod effects;
pub mod firing;
pub mod hit;
pub mod logger;
pub mod recoil;
pub mod shared;
pub mod systems;
pub mod weapon;

#[cfg(test)]
mod test_support;

// Re-export core API для удобства
pub use config::{ConfigError, FireMode, WeaponConfig};
pub use effects::{EffectDispatcher, EffectPlayer, MuzzleLight, ScreenShakeQueue, ScreenShakeService, ShakeRequest};
pub use firing::{FireController, FireOutcome};
pub use hit::{DamageHook, HitResolver, HitResult, PhysicsEngine, SceneObjectFactory, SweepHit, SweepQuery, TargetClass};
pub use logger::{log, log_error, log_info, log_warning};
pub use recoil::{RecoilModel, RecoilProfile};
pub use shared::{EffectId, LightId, Pose, SoundId, TemplateId};
pub use systems::WeaponPlugin;
pub use weapon::{FrameReport, FrameTime, ShotReport, Weapon, WeaponContext};

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Rapier не добавляется: physics plugin подключает хост (headless тесты без него).
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(WeaponPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Знак recoil торка берётся отсюда: одинаковый seed → одинаковая отдача.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins((MinimalPlugins, bevy::transform::TransformPlugin))
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Snapshot компонентов T для сравнения детерминизма
///
/// Entities сортируются по index, компонент сериализуется через Debug.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
