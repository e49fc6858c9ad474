//! RecoilModel - аккумуляторы отдачи
//!
//! Архитектура:
//! - Rotation accumulator: euler углы в градусах (торк выстрела)
//! - Position accumulator: смещение от rest position (сила выстрела)
//! - Decay: `accum *= smoothing ^ dt` - композиция по dt точная (с точностью float)
//!
//! Smoothing factors применяются крест-накрест: rotation затухает с
//! `force_smoothing`, position - с `torque_smoothing`.

use bevy::prelude::*;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::shared::{serde_math, Pose};

/// Per-axis флаги рандомизации знака торка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisFlags {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl AxisFlags {
    pub const NONE: Self = Self { x: false, y: false, z: false };
}

/// Recoil profile (неизменяемый на время жизни оружия)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoilProfile {
    /// Выключенный recoil: выстрел ничего не добавляет в аккумуляторы
    pub enabled: bool,

    /// Torque impulse (градусы, euler x/y/z)
    #[serde(with = "serde_math::vec3")]
    pub torque: Vec3,

    /// Force impulse (local offset)
    #[serde(with = "serde_math::vec3")]
    pub force: Vec3,

    /// Smoothing factor в (0, 1), декларирован для torque
    pub torque_smoothing: f32,

    /// Smoothing factor в (0, 1), декларирован для force
    pub force_smoothing: f32,

    /// Оси торка с случайным знаком (±1 на каждый выстрел)
    pub randomize: AxisFlags,
}

impl Default for RecoilProfile {
    fn default() -> Self {
        Self {
            enabled: true,
            torque: Vec3::X,
            force: Vec3::Z,
            torque_smoothing: 0.95,
            force_smoothing: 0.95,
            randomize: AxisFlags { x: false, y: false, z: true },
        }
    }
}

/// Recoil state одного оружия
#[derive(Debug, Clone, PartialEq)]
pub struct RecoilModel {
    rotation_accum: Vec3,
    position_accum: Vec3,
    rest_rotation: Quat,
    rest_position: Vec3,
}

impl Default for RecoilModel {
    fn default() -> Self {
        Self::new(Pose::IDENTITY)
    }
}

impl RecoilModel {
    pub fn new(rest: Pose) -> Self {
        Self {
            rotation_accum: Vec3::ZERO,
            position_accum: Vec3::ZERO,
            rest_rotation: rest.rotation,
            rest_position: rest.translation,
        }
    }

    pub fn rotation_accum(&self) -> Vec3 {
        self.rotation_accum
    }

    pub fn position_accum(&self) -> Vec3 {
        self.position_accum
    }

    pub fn rest_pose(&self) -> Pose {
        Pose::new(self.rest_position, self.rest_rotation)
    }

    /// Добавить impulse. Знак торка рандомизируется по флагам, force добавляется как есть
    pub fn accumulate(
        &mut self,
        torque: Vec3,
        force: Vec3,
        randomize: AxisFlags,
        rng: &mut dyn RngCore,
    ) {
        let mut torque = torque;
        if randomize.x {
            torque.x *= random_sign(rng);
        }
        if randomize.y {
            torque.y *= random_sign(rng);
        }
        if randomize.z {
            torque.z *= random_sign(rng);
        }

        self.rotation_accum += torque;
        self.position_accum += force;
    }

    /// Один выстрел по профилю (no-op если recoil выключен)
    pub fn kick(&mut self, profile: &RecoilProfile, rng: &mut dyn RngCore) {
        if !profile.enabled {
            return;
        }
        self.accumulate(profile.torque, profile.force, profile.randomize, rng);
    }

    /// Экспоненциальное затухание за `dt` секунд
    pub fn decay(&mut self, dt: f32, profile: &RecoilProfile) {
        let dt = dt.max(0.0);
        self.rotation_accum *= profile.force_smoothing.powf(dt);
        self.position_accum *= profile.torque_smoothing.powf(dt);
    }

    /// Итоговый local pose: rest ∘ euler(rotation_accum), rest + position_accum
    pub fn compute_transform(&self) -> Pose {
        Pose {
            translation: self.rest_position + self.position_accum,
            rotation: self.rest_rotation * euler_degrees(self.rotation_accum),
        }
    }

    /// Новый baseline - recoil дальше считается относительно этой pose
    pub fn reset_rest(&mut self, pose: Pose) {
        self.rest_position = pose.translation;
        self.rest_rotation = pose.rotation;
    }
}

/// Euler (градусы) → Quat, порядок Y·X·Z
pub fn euler_degrees(angles: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        angles.y.to_radians(),
        angles.x.to_radians(),
        angles.z.to_radians(),
    )
}

fn random_sign(rng: &mut dyn RngCore) -> f32 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}
