//! События weapon слоя
//!
//! ECS → presentation: результаты выстрела и запросы косметики
//! (ECS не проигрывает звук/particles сам).
//! Presentation → ECS: `SetWeaponInUse`, `ResetRecoilRest`.

use bevy::prelude::*;

use crate::effects::ShakeRequest;
use crate::hit::{HitResult, SweepHit};
use crate::shared::{EffectId, LightId, Pose, SoundId};

/// Выстрел прошёл gate (Fired)
#[derive(Event, Debug, Clone)]
pub struct WeaponFired {
    pub weapon: Entity,
    pub shooter: Option<Entity>,
    pub hit: HitResult,
    pub ammo_remaining: u32,
}

/// Hitscan попал по Damageable (урон считает внешний gameplay)
#[derive(Event, Debug, Clone)]
pub struct DamageableHit {
    pub weapon: Entity,
    pub shooter: Option<Entity>,
    pub hit: SweepHit,
}

#[derive(Event, Debug, Clone)]
pub struct MuzzleFlashRequested {
    pub weapon: Entity,
    pub effect: EffectId,
}

#[derive(Event, Debug, Clone)]
pub struct ShotSoundRequested {
    pub weapon: Entity,
    pub sound: SoundId,
}

#[derive(Event, Debug, Clone)]
pub struct MuzzleLightToggled {
    pub weapon: Entity,
    pub light: LightId,
    pub on: bool,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ScreenShakeRequested {
    pub request: ShakeRequest,
}

/// Impulse по rigid body (точка в world space, `None` = центр масс)
#[derive(Event, Debug, Clone, Copy)]
pub struct ImpulseRequested {
    pub body: Entity,
    pub impulse: Vec3,
    pub at_point: Option<Vec3>,
}

/// Оружие взято в руки / убрано
#[derive(Event, Debug, Clone, Copy)]
pub struct SetWeaponInUse {
    pub weapon: Entity,
    pub in_use: bool,
}

/// Новый rest pose для recoil (`None` = текущий local Transform)
#[derive(Event, Debug, Clone, Copy)]
pub struct ResetRecoilRest {
    pub weapon: Entity,
    pub pose: Option<Pose>,
}
