//! Система стрельбы: input/pause → Weapon::poll_fire → события

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::hit::{DamageHook, SweepHit};
use crate::shared::Pose;
use crate::weapon::WeaponContext;
use crate::DeterministicRng;

use super::components::{EquippedWeapon, FireInput, ProjectileTemplates, SimulationPaused};
use super::effects::EffectEvents;
use super::events::{
    DamageableHit, ImpulseRequested, MuzzleFlashRequested, MuzzleLightToggled, ShotSoundRequested, WeaponFired,
};
use super::rapier_backend::{EcsSceneFactory, RapierPhysics, RapierPhysicsParams};

/// DamageHook, который копит попадания как события
#[derive(Debug, Default)]
pub struct DamageEvents {
    pub weapon: Option<Entity>,
    pub hits: Vec<DamageableHit>,
}

impl DamageHook for DamageEvents {
    fn on_damageable_hit(&mut self, shooter: Option<Entity>, hit: &SweepHit) {
        let Some(weapon) = self.weapon else {
            return;
        };
        self.hits.push(DamageableHit {
            weapon,
            shooter,
            hit: *hit,
        });
    }
}

#[derive(SystemParam)]
pub struct ShotEventWriters<'w> {
    fired: EventWriter<'w, WeaponFired>,
    damageable_hits: EventWriter<'w, DamageableHit>,
    flashes: EventWriter<'w, MuzzleFlashRequested>,
    sounds: EventWriter<'w, ShotSoundRequested>,
    lights: EventWriter<'w, MuzzleLightToggled>,
    impulses: EventWriter<'w, ImpulseRequested>,
}

/// Система: выстрелы всех оружий за frame
///
/// Pose дула = GlobalTransform оружия ∘ muzzle offset.
/// Side effects (spawn, impulse, косметика) копятся и пишутся после цикла.
#[allow(clippy::too_many_arguments)]
pub fn fire_weapons(
    mut commands: Commands,
    mut weapons: Query<(Entity, &mut EquippedWeapon, Option<&FireInput>, &GlobalTransform)>,
    transforms: Query<&'static GlobalTransform>,
    physics_params: RapierPhysicsParams,
    templates: Res<ProjectileTemplates>,
    paused: Res<SimulationPaused>,
    mut rng: ResMut<DeterministicRng>,
    mut writers: ShotEventWriters,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();

    let mut physics = RapierPhysics::new(&physics_params);
    let mut factory = EcsSceneFactory::new(&mut commands, &templates, &transforms, now);
    let mut damage = DamageEvents::default();
    let mut fired = Vec::new();

    for (entity, mut equipped, input, transform) in weapons.iter_mut() {
        let input = input.copied().unwrap_or_default();
        let muzzle = equipped.weapon.muzzle_pose(Pose::from(transform));
        let mut effects = EffectEvents::new(entity);
        damage.weapon = Some(entity);

        let shot = {
            let mut ctx = WeaponContext {
                physics: &mut physics,
                factory: &mut factory,
                effects: &mut effects,
                damage: &mut damage,
                rng: &mut rng.rng,
            };
            equipped.weapon.poll_fire(now, &input, &*paused, muzzle, &mut ctx)
        };

        effects.write_all(&mut writers.flashes, &mut writers.sounds, &mut writers.lights);

        if let Some(hit) = shot.and_then(|shot| shot.hit) {
            fired.push(WeaponFired {
                weapon: entity,
                shooter: equipped.weapon.owner(),
                hit,
                ammo_remaining: equipped.weapon.ammo_remaining(),
            });
        }
    }

    writers.fired.write_batch(fired);
    writers.damageable_hits.write_batch(damage.hits);
    writers.impulses.write_batch(physics.impulses);
}
