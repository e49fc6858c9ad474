//! Weapon - WeaponState + операции FireController/HitResolver/Recoil/Effects
//!
//! Архитектура:
//! - Ядро владеет только state одного оружия (без shared state, без locks)
//! - Все внешние действия - через коллабораторы в WeaponContext
//! - Screen shake service инжектится при активации (не singleton lookup)

use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;
use rand::RngCore;

use crate::config::WeaponConfig;
use crate::effects::{EffectDispatcher, EffectPlayer, MuzzleLight, ScreenShakeService};
use crate::firing::{FireController, FireOutcome};
use crate::hit::{DamageHook, HitCollaborators, HitResolver, HitResult, PhysicsEngine, SceneObjectFactory};
use crate::recoil::RecoilModel;
use crate::shared::Pose;

use super::input::{FrameTime, InputSource, PauseState};

/// Коллабораторы одного frame/выстрела
pub struct WeaponContext<'a> {
    pub physics: &'a mut dyn PhysicsEngine,
    pub factory: &'a mut dyn SceneObjectFactory,
    pub effects: &'a mut dyn EffectPlayer,
    pub damage: &'a mut dyn DamageHook,
    pub rng: &'a mut dyn RngCore,
}

/// Итог одной попытки выстрела
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotReport {
    pub outcome: FireOutcome,
    /// Только для Fired
    pub hit: Option<HitResult>,
}

/// Итог одного frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// None - в этом frame выстрел не запрашивался (или pause)
    pub shot: Option<ShotReport>,
    /// Local pose оружия после recoil (None - оружие не в руках)
    pub pose: Option<Pose>,
}

pub struct Weapon {
    config: Arc<WeaponConfig>,
    owner: Option<Entity>,
    controller: FireController,
    recoil: RecoilModel,
    muzzle_light: MuzzleLight,
    in_use: bool,
    screen_shake: Option<Arc<dyn ScreenShakeService>>,
}

impl fmt::Debug for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Weapon")
            .field("name", &self.config.name)
            .field("owner", &self.owner)
            .field("controller", &self.controller)
            .field("recoil", &self.recoil)
            .field("muzzle_light", &self.muzzle_light)
            .field("in_use", &self.in_use)
            .field("screen_shake", &self.screen_shake.is_some())
            .finish()
    }
}

impl Weapon {
    /// Активация: WeaponState создаётся один раз, rest pose = текущая local pose
    pub fn activate(
        config: Arc<WeaponConfig>,
        now: f32,
        rest_pose: Pose,
        screen_shake: Option<Arc<dyn ScreenShakeService>>,
    ) -> Self {
        Self {
            controller: FireController::new(&config.shooting, now),
            recoil: RecoilModel::new(rest_pose),
            muzzle_light: MuzzleLight::new(config.effects.muzzle_light.clone()),
            in_use: true,
            owner: None,
            screen_shake,
            config,
        }
    }

    /// Стрелок (его collider исключается из sweep, передаётся в damage hook)
    pub fn with_owner(mut self, owner: Entity) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    pub fn controller(&self) -> &FireController {
        &self.controller
    }

    pub fn ammo_remaining(&self) -> u32 {
        self.controller.ammo_remaining()
    }

    pub fn cooldown_end_time(&self) -> f32 {
        self.controller.cooldown_end_time()
    }

    pub fn recoil(&self) -> &RecoilModel {
        &self.recoil
    }

    pub fn muzzle_light(&self) -> &MuzzleLight {
        &self.muzzle_light
    }

    pub fn in_use(&self) -> bool {
        self.in_use
    }

    /// World pose дула из world pose оружия
    pub fn muzzle_pose(&self, weapon_world: Pose) -> Pose {
        weapon_world.mul_pose(&self.config.muzzle)
    }

    /// Попытка выстрела в момент `now` из pose дула `muzzle`
    pub fn request_fire(&mut self, now: f32, muzzle: Pose, ctx: &mut WeaponContext<'_>) -> ShotReport {
        let outcome = self.controller.gate(now);
        if !outcome.is_fired() {
            return ShotReport { outcome, hit: None };
        }

        let hit = {
            let mut collaborators = HitCollaborators {
                physics: &mut *ctx.physics,
                factory: &mut *ctx.factory,
                damage: &mut *ctx.damage,
            };
            HitResolver::new(&self.config).resolve(muzzle, self.owner, &mut collaborators)
        };

        self.recoil.kick(&self.config.recoil, &mut *ctx.rng);

        EffectDispatcher::new(&self.config.effects, &self.config.screen_shake).dispatch(
            now,
            &mut self.muzzle_light,
            self.screen_shake.as_deref(),
            &mut *ctx.effects,
        );

        crate::logger::log(&format!(
            "🔫 {} fired at t={:.3}: {:?} (ammo: {})",
            self.config.name,
            now,
            hit,
            self.controller.ammo_remaining()
        ));

        ShotReport { outcome, hit: Some(hit) }
    }

    /// Один frame: light timer → pause/fire → recoil decay + pose
    pub fn update(
        &mut self,
        frame: FrameTime,
        input: &dyn InputSource,
        pause: &dyn PauseState,
        muzzle: Pose,
        ctx: &mut WeaponContext<'_>,
    ) -> FrameReport {
        self.tick_light(frame.now, &mut *ctx.effects);
        let shot = self.poll_fire(frame.now, input, pause, muzzle, ctx);
        let pose = self.apply_recoil(frame.dt);

        FrameReport { shot, pose }
    }

    /// Погасить muzzle light, если его deadline прошёл
    pub fn tick_light(&mut self, now: f32, effects: &mut dyn EffectPlayer) {
        self.muzzle_light.tick(now, effects);
    }

    /// Pause держит cooldown "готовым"; иначе выстрел по input (только в руках)
    pub fn poll_fire(
        &mut self,
        now: f32,
        input: &dyn InputSource,
        pause: &dyn PauseState,
        muzzle: Pose,
        ctx: &mut WeaponContext<'_>,
    ) -> Option<ShotReport> {
        if pause.is_paused() {
            self.controller.hold_ready(now);
            return None;
        }

        if self.in_use && input.is_fire_requested() {
            Some(self.request_fire(now, muzzle, ctx))
        } else {
            None
        }
    }

    /// Decay за `dt` и итоговая local pose (None, если оружие не в руках)
    pub fn apply_recoil(&mut self, dt: f32) -> Option<Pose> {
        if !self.in_use {
            return None;
        }
        self.recoil.decay(dt, &self.config.recoil);
        Some(self.recoil.compute_transform())
    }

    pub fn set_in_use(&mut self, in_use: bool, effects: &mut dyn EffectPlayer) {
        if self.in_use && !in_use {
            self.muzzle_light.force_off(effects);
        }
        self.in_use = in_use;
    }

    pub fn reset_rest(&mut self, pose: Pose) {
        self.recoil.reset_rest(pose);
    }

    /// Уничтожение оружия: свет гаснет независимо от оставшегося таймера
    pub fn teardown(&mut self, effects: &mut dyn EffectPlayer) {
        self.muzzle_light.force_off(effects);
    }
}
