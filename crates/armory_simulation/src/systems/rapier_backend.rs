//! Rapier adapter для hit resolution
//!
//! - RapierPhysics: PhysicsEngine поверх `ReadRapierContext` (sweep) + буфер impulse запросов
//! - EcsSceneFactory: SceneObjectFactory через Commands (spawn, ChildOf, DespawnAfter)
//! - apply_impulse_requests: `ImpulseRequested` → `ExternalImpulse`
//!
//! Rapier context отсутствует (нет RapierPhysicsPlugin) → sweep = NoHit + warning.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::collision_layers::{projectile_groups, query_groups};
use crate::hit::{PhysicsEngine, SceneObjectFactory, SweepHit, SweepQuery, TargetClass};
use crate::shared::{Pose, TemplateId};

use super::components::{DespawnAfter, ProjectileTemplates, SpawnedFrom};
use super::events::ImpulseRequested;

/// Всё, что sweep читает из мира
#[derive(SystemParam)]
pub struct RapierPhysicsParams<'w, 's> {
    context: ReadRapierContext<'w, 's>,
    classes: Query<'w, 's, &'static TargetClass>,
    bodies: Query<'w, 's, &'static RigidBody>,
    parents: Query<'w, 's, &'static ChildOf>,
}

pub struct RapierPhysics<'a, 'w, 's> {
    params: &'a RapierPhysicsParams<'w, 's>,
    /// Impulse запросы этого frame (пишутся событиями после выстрелов)
    pub impulses: Vec<ImpulseRequested>,
}

impl<'a, 'w, 's> RapierPhysics<'a, 'w, 's> {
    pub fn new(params: &'a RapierPhysicsParams<'w, 's>) -> Self {
        Self {
            params,
            impulses: Vec::new(),
        }
    }

    /// TargetClass collider'а или его parent'а (compound colliders)
    fn classify(&self, collider: Entity) -> TargetClass {
        if let Ok(class) = self.params.classes.get(collider) {
            return *class;
        }
        self.parent_of(collider)
            .and_then(|parent| self.params.classes.get(parent).ok().copied())
            .unwrap_or_default()
    }

    fn rigid_body_of(&self, collider: Entity) -> Option<Entity> {
        if self.params.bodies.contains(collider) {
            return Some(collider);
        }
        self.parent_of(collider)
            .filter(|parent| self.params.bodies.contains(*parent))
    }

    fn parent_of(&self, entity: Entity) -> Option<Entity> {
        self.params.parents.get(entity).ok().map(|child_of| child_of.parent())
    }
}

impl PhysicsEngine for RapierPhysics<'_, '_, '_> {
    fn sweep_sphere(&self, query: &SweepQuery) -> Option<SweepHit> {
        let context = match self.params.context.single() {
            Ok(context) => context,
            Err(err) => {
                crate::logger::log_warning(&format!(
                    "Weapon sweep skipped: no rapier context ({:?})",
                    err
                ));
                return None;
            }
        };

        let mut filter = QueryFilter::new().groups(query_groups(query.layer_mask));
        if let Some(excluded) = query.exclude {
            filter = filter.exclude_collider(excluded);
        }

        let (collider, point, normal) = if query.radius > 0.0 {
            let ball = Collider::ball(query.radius);
            let (collider, hit) = context.cast_shape(
                query.origin,
                Quat::IDENTITY,
                query.direction,
                ball.raw.as_ref(),
                ShapeCastOptions::with_max_time_of_impact(query.max_distance),
                filter,
            )?;

            // witness1/normal1: точка контакта и нормаль на поверхности collider'а (world space)
            match hit.details {
                Some(details) => (collider, details.witness1, details.normal1),
                None => {
                    let center = query.origin + query.direction * hit.time_of_impact;
                    (collider, center + query.direction * query.radius, -query.direction)
                }
            }
        } else {
            let (collider, intersection) = context.cast_ray_and_get_normal(
                query.origin,
                query.direction,
                query.max_distance,
                true,
                filter,
            )?;
            (collider, intersection.point, intersection.normal)
        };

        Some(SweepHit {
            point,
            normal,
            collider,
            target_class: self.classify(collider),
            rigid_body: self.rigid_body_of(collider),
        })
    }

    fn apply_impulse(&mut self, body: Entity, impulse: Vec3, at_point: Option<Vec3>) {
        self.impulses.push(ImpulseRequested { body, impulse, at_point });
    }
}

/// Spawn/despawn объектов через Commands
pub struct EcsSceneFactory<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    templates: &'a ProjectileTemplates,
    transforms: &'a Query<'a, 'a, &'static GlobalTransform>,
    now: f32,
}

impl<'a, 'w, 's> EcsSceneFactory<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        templates: &'a ProjectileTemplates,
        transforms: &'a Query<'a, 'a, &'static GlobalTransform>,
        now: f32,
    ) -> Self {
        Self {
            commands,
            templates,
            transforms,
            now,
        }
    }
}

impl SceneObjectFactory for EcsSceneFactory<'_, '_, '_> {
    fn spawn(&mut self, template: &TemplateId, pose: Pose, parent: Option<Entity>) -> Entity {
        // World pose сохраняется: local = pose относительно parent'а
        let parent_pose = parent.and_then(|parent| {
            self.transforms
                .get(parent)
                .ok()
                .map(|transform| (parent, Pose::from(transform)))
        });

        match parent_pose {
            Some((parent, parent_pose)) => {
                let local = pose.relative_to(&parent_pose);
                self.commands
                    .spawn((
                        SpawnedFrom(template.clone()),
                        Transform::from_translation(local.translation).with_rotation(local.rotation),
                        ChildOf(parent),
                    ))
                    .id()
            }
            None => self
                .commands
                .spawn((
                    SpawnedFrom(template.clone()),
                    Transform::from_translation(pose.translation).with_rotation(pose.rotation),
                ))
                .id(),
        }
    }

    fn spawn_body(&mut self, template: &TemplateId, pose: Pose) -> Entity {
        let body = self.templates.get(template);
        self.commands
            .spawn((
                SpawnedFrom(template.clone()),
                Transform::from_translation(pose.translation).with_rotation(pose.rotation),
                RigidBody::Dynamic,
                Collider::ball(body.radius),
                ColliderMassProperties::Mass(body.mass),
                projectile_groups(),
                ExternalImpulse::default(),
                Ccd::enabled(),
            ))
            .id()
    }

    fn schedule_despawn(&mut self, handle: Entity, after_seconds: f32) {
        self.commands.entity(handle).insert(DespawnAfter {
            despawn_time: self.now + after_seconds,
        });
    }
}

/// Система: `ImpulseRequested` → rapier `ExternalImpulse`
///
/// Impulse в точке → дополнительно torque относительно центра body.
pub fn apply_impulse_requests(
    mut commands: Commands,
    mut requests: EventReader<ImpulseRequested>,
    mut bodies: Query<(Option<&mut ExternalImpulse>, Option<&GlobalTransform>)>,
) {
    for request in requests.read() {
        let Ok((external, transform)) = bodies.get_mut(request.body) else {
            crate::logger::log_warning(&format!(
                "Impulse target {:?} not found (despawned?)",
                request.body
            ));
            continue;
        };

        let torque = match (request.at_point, transform) {
            (Some(point), Some(transform)) => (point - transform.translation()).cross(request.impulse),
            _ => Vec3::ZERO,
        };

        match external {
            Some(mut external) => {
                external.impulse += request.impulse;
                external.torque_impulse += torque;
            }
            None => {
                commands.entity(request.body).insert(ExternalImpulse {
                    impulse: request.impulse,
                    torque_impulse: torque,
                });
            }
        }
    }
}
