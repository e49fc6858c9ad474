//! HitResolver - hit resolution одного разрешённого выстрела
//!
//! Projectile mode (есть projectile template):
//! 1. spawn_body в pose дула
//! 2. impulse = muzzle.rotation * force
//! 3. despawn через `despawn_time`
//!
//! Hitscan mode:
//! 1. sweep_sphere(радиус = bullet_width, max distance, маска без слоя стрелка)
//! 2. NoHit → ничего
//! 3. Damageable → damage hook, impact effect НЕ спавнится
//! 4. Generic + impact template → spawn effect по нормали, parent = объект, despawn
//! 5. Rigid body → impulse `-normal * bullet_impact_force` в точке попадания

use bevy::prelude::*;

use crate::collision_layers::sweep_mask;
use crate::config::{FireMode, HitscanConfig, ProjectileConfig, WeaponConfig};
use crate::shared::{Pose, TemplateId};

use super::physics::{DamageHook, PhysicsEngine, SceneObjectFactory, SweepHit, SweepQuery, TargetClass};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitResult {
    NoHit,
    Hit(SweepHit),
    ProjectileSpawned { handle: Entity },
}

/// Коллабораторы, нужные одному resolve
pub struct HitCollaborators<'a> {
    pub physics: &'a mut dyn PhysicsEngine,
    pub factory: &'a mut dyn SceneObjectFactory,
    pub damage: &'a mut dyn DamageHook,
}

pub struct HitResolver<'a> {
    mode: FireMode<'a>,
    impact_effect: Option<&'a TemplateId>,
}

impl<'a> HitResolver<'a> {
    pub fn new(config: &'a WeaponConfig) -> Self {
        Self {
            mode: config.mode(),
            impact_effect: config.effects.impact_effect.as_ref(),
        }
    }

    pub fn resolve(
        &self,
        muzzle: Pose,
        shooter: Option<Entity>,
        collaborators: &mut HitCollaborators<'_>,
    ) -> HitResult {
        match self.mode {
            FireMode::Projectile(projectile) => launch_projectile(projectile, muzzle, collaborators),
            FireMode::Hitscan(hitscan) => {
                let query = SweepQuery {
                    origin: muzzle.translation,
                    direction: muzzle.forward(),
                    radius: hitscan.bullet_width,
                    max_distance: hitscan.max_hit_distance,
                    layer_mask: sweep_mask(hitscan.excluded_layers),
                    exclude: shooter,
                };
                self.sweep(hitscan, &query, shooter, collaborators)
            }
        }
    }

    fn sweep(
        &self,
        hitscan: &HitscanConfig,
        query: &SweepQuery,
        shooter: Option<Entity>,
        collaborators: &mut HitCollaborators<'_>,
    ) -> HitResult {
        let Some(hit) = collaborators.physics.sweep_sphere(query) else {
            return HitResult::NoHit;
        };

        match hit.target_class {
            TargetClass::Damageable => {
                collaborators.damage.on_damageable_hit(shooter, &hit);
            }
            TargetClass::Generic => {
                if let Some(template) = self.impact_effect {
                    let pose = Pose::looking_along(hit.point, hit.normal);
                    let effect = collaborators.factory.spawn(template, pose, Some(hit.collider));
                    collaborators
                        .factory
                        .schedule_despawn(effect, hitscan.bullet_despawn_time);
                }
            }
        }

        if let Some(body) = hit.rigid_body {
            collaborators.physics.apply_impulse(
                body,
                -hit.normal * hitscan.bullet_impact_force,
                Some(hit.point),
            );
        }

        HitResult::Hit(hit)
    }
}

fn launch_projectile(
    projectile: &ProjectileConfig,
    muzzle: Pose,
    collaborators: &mut HitCollaborators<'_>,
) -> HitResult {
    let handle = collaborators.factory.spawn_body(&projectile.template, muzzle);
    collaborators
        .physics
        .apply_impulse(handle, muzzle.transform_direction(projectile.force), None);
    collaborators
        .factory
        .schedule_despawn(handle, projectile.despawn_time);

    HitResult::ProjectileSpawned { handle }
}
