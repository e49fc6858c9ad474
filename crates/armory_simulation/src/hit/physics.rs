//! Контракты внешних коллабораторов hit resolution
//!
//! Ядро не исполняет физику: sweep, impulse и spawn делегируются
//! реализациям этих traits (rapier adapter в ECS, recording doubles в тестах).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::{Pose, TemplateId};

/// Закрытая классификация collider'а, которую возвращает sweep
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub enum TargetClass {
    /// Цель для damage hook (impact effect не спавнится)
    Damageable,
    /// Всё остальное (стены, пропы)
    #[default]
    Generic,
}

/// Swept-sphere query (radius == 0 вырождается в ray)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepQuery {
    pub origin: Vec3,
    /// Нормализованное направление
    pub direction: Vec3,
    pub radius: f32,
    pub max_distance: f32,
    /// Слои, с которыми sweep пересекается
    pub layer_mask: u32,
    /// Collider стрелка (никогда не попадает сам в себя)
    pub exclude: Option<Entity>,
}

/// Результат sweep'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub collider: Entity,
    pub target_class: TargetClass,
    /// Rigid body, если у попавшего объекта он есть
    pub rigid_body: Option<Entity>,
}

pub trait PhysicsEngine {
    fn sweep_sphere(&self, query: &SweepQuery) -> Option<SweepHit>;

    /// Impulse по body. `at_point == None` - в центр масс
    fn apply_impulse(&mut self, body: Entity, impulse: Vec3, at_point: Option<Vec3>);
}

pub trait SceneObjectFactory {
    /// Spawn объекта в world pose (с parent'ом - world pose сохраняется)
    fn spawn(&mut self, template: &TemplateId, pose: Pose, parent: Option<Entity>) -> Entity;

    /// Spawn физического объекта: возвращённая entity всегда несёт dynamic rigid body
    fn spawn_body(&mut self, template: &TemplateId, pose: Pose) -> Entity;

    fn schedule_despawn(&mut self, handle: Entity, after_seconds: f32);
}

/// Внешний hook урона по Damageable целям (расчёт урона вне ядра)
pub trait DamageHook {
    fn on_damageable_hit(&mut self, shooter: Option<Entity>, hit: &SweepHit);
}

/// Hook без реакции
pub struct NoDamageHook;

impl DamageHook for NoDamageHook {
    fn on_damageable_hit(&mut self, _shooter: Option<Entity>, _hit: &SweepHit) {}
}
