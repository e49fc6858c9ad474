//! Recording test doubles для коллабораторов ядра

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, Mutex};

use crate::effects::{EffectPlayer, ScreenShakeService, ShakeRequest};
use crate::hit::{DamageHook, PhysicsEngine, SceneObjectFactory, SweepHit, SweepQuery};
use crate::shared::{EffectId, LightId, Pose, SoundId, TemplateId};
use crate::weapon::{InputSource, PauseState};

#[derive(Debug, Clone, PartialEq)]
pub struct ImpulseCall {
    pub body: Entity,
    pub impulse: Vec3,
    pub at_point: Option<Vec3>,
}

/// Physics, которая возвращает заранее заданный hit
#[derive(Default)]
pub struct RecordingPhysics {
    pub next_hit: Option<SweepHit>,
    pub queries: std::cell::RefCell<Vec<SweepQuery>>,
    pub impulses: Vec<ImpulseCall>,
}

impl RecordingPhysics {
    pub fn hitting(hit: SweepHit) -> Self {
        Self {
            next_hit: Some(hit),
            ..Self::default()
        }
    }
}

impl PhysicsEngine for RecordingPhysics {
    fn sweep_sphere(&self, query: &SweepQuery) -> Option<SweepHit> {
        self.queries.borrow_mut().push(*query);
        self.next_hit
    }

    fn apply_impulse(&mut self, body: Entity, impulse: Vec3, at_point: Option<Vec3>) {
        self.impulses.push(ImpulseCall { body, impulse, at_point });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnCall {
    pub handle: Entity,
    pub template: TemplateId,
    pub pose: Pose,
    pub parent: Option<Entity>,
    pub with_body: bool,
}

pub struct RecordingFactory {
    next_index: u32,
    pub spawns: Vec<SpawnCall>,
    pub despawns: Vec<(Entity, f32)>,
}

impl Default for RecordingFactory {
    fn default() -> Self {
        Self {
            next_index: 1000,
            spawns: Vec::new(),
            despawns: Vec::new(),
        }
    }
}

impl RecordingFactory {
    fn next_handle(&mut self) -> Entity {
        self.next_index += 1;
        Entity::from_raw(self.next_index)
    }
}

impl SceneObjectFactory for RecordingFactory {
    fn spawn(&mut self, template: &TemplateId, pose: Pose, parent: Option<Entity>) -> Entity {
        let handle = self.next_handle();
        self.spawns.push(SpawnCall {
            handle,
            template: template.clone(),
            pose,
            parent,
            with_body: false,
        });
        handle
    }

    fn spawn_body(&mut self, template: &TemplateId, pose: Pose) -> Entity {
        let handle = self.next_handle();
        self.spawns.push(SpawnCall {
            handle,
            template: template.clone(),
            pose,
            parent: None,
            with_body: true,
        });
        handle
    }

    fn schedule_despawn(&mut self, handle: Entity, after_seconds: f32) {
        self.despawns.push((handle, after_seconds));
    }
}

#[derive(Default)]
pub struct RecordingDamage {
    pub hits: Vec<(Option<Entity>, SweepHit)>,
}

impl DamageHook for RecordingDamage {
    fn on_damageable_hit(&mut self, shooter: Option<Entity>, hit: &SweepHit) {
        self.hits.push((shooter, *hit));
    }
}

#[derive(Default)]
pub struct RecordingEffects {
    pub particles: Vec<EffectId>,
    pub sounds: Vec<SoundId>,
    pub lights: Vec<(LightId, bool)>,
}

impl RecordingEffects {
    pub fn light_is_on(&self) -> bool {
        self.lights.last().map(|(_, on)| *on).unwrap_or(false)
    }
}

impl EffectPlayer for RecordingEffects {
    fn play_particles(&mut self, effect: &EffectId) {
        self.particles.push(effect.clone());
    }

    fn play_sound(&mut self, clip: &SoundId) {
        self.sounds.push(clip.clone());
    }

    fn set_light(&mut self, light: &LightId, on: bool) {
        self.lights.push((light.clone(), on));
    }
}

#[derive(Default)]
pub struct RecordingShake {
    pub requests: Mutex<Vec<ShakeRequest>>,
}

impl RecordingShake {
    pub fn shared() -> Arc<RecordingShake> {
        Arc::new(RecordingShake::default())
    }

    pub fn count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

impl ScreenShakeService for RecordingShake {
    fn shake(&self, request: ShakeRequest) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
    }
}

pub struct TriggerHeld(pub bool);

impl InputSource for TriggerHeld {
    fn is_fire_requested(&self) -> bool {
        self.0
    }
}

pub struct Paused(pub bool);

impl PauseState for Paused {
    fn is_paused(&self) -> bool {
        self.0
    }
}

pub fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}
