//! WeaponConfig - полная конфигурация одного оружия
//!
//! Секции:
//! - shooting: ammo, cooldown
//! - muzzle: local pose дула относительно оружия
//! - effects: muzzle flash, звук, impact effect, muzzle light
//! - screen_shake: параметры запроса к shake service
//! - recoil: RecoilProfile
//! - hitscan / projectile: режим стрельбы (наличие `projectile` = projectile mode)

use std::fmt;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::collision_layers::COLLISION_LAYER_PLAYER;
use crate::recoil::RecoilProfile;
use crate::shared::{serde_math, EffectId, LightId, Pose, SoundId, TemplateId};

/// Ошибка загрузки/валидации конфигурации
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read weapon config: {}", err),
            ConfigError::Parse(err) => write!(f, "failed to parse weapon config: {}", err),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid weapon config field `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShootingConfig {
    pub infinite_ammo: bool,
    /// Стартовый магазин
    pub ammo: u32,
    /// Минимальный интервал между выстрелами (секунды)
    pub cooldown_time: f32,
}

impl Default for ShootingConfig {
    fn default() -> Self {
        Self {
            infinite_ammo: false,
            ammo: 30,
            cooldown_time: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuzzleLightConfig {
    pub light: LightId,
    /// Сколько секунд свет горит после выстрела
    pub on_time: f32,
}

impl Default for MuzzleLightConfig {
    fn default() -> Self {
        Self {
            light: LightId::new("muzzle_light"),
            on_time: 0.05,
        }
    }
}

/// Косметические эффекты (все опциональны - отсутствие = тихий skip)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub muzzle_flash: Option<EffectId>,
    pub shoot_sound: Option<SoundId>,
    /// Prefab, который спавнится в точке hitscan попадания (не по Damageable)
    pub impact_effect: Option<TemplateId>,
    pub muzzle_light: Option<MuzzleLightConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenShakeConfig {
    pub enabled: bool,
    pub speed: f32,
    pub duration: f32,
    pub distance: f32,
}

impl Default for ScreenShakeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 2.0,
            duration: 0.25,
            distance: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitscanConfig {
    /// Слои, которые sweep игнорирует (слой самого стрелка)
    pub excluded_layers: u32,
    pub max_hit_distance: f32,
    /// Через сколько секунд impact effect деспавнится
    pub bullet_despawn_time: f32,
    /// Модуль impulse по rigid body в точке попадания
    pub bullet_impact_force: f32,
    /// Радиус sweep сферы (0 = обычный raycast)
    pub bullet_width: f32,
}

impl Default for HitscanConfig {
    fn default() -> Self {
        Self {
            excluded_layers: COLLISION_LAYER_PLAYER,
            max_hit_distance: 100.0,
            bullet_despawn_time: 10.0,
            bullet_impact_force: 2.0,
            bullet_width: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub template: TemplateId,
    /// Impulse в local space дула (-Z = вперёд)
    #[serde(with = "serde_math::vec3")]
    pub force: Vec3,
    pub despawn_time: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            template: TemplateId::new("projectile"),
            force: Vec3::NEG_Z,
            despawn_time: 15.0,
        }
    }
}

/// Режим hit resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireMode<'a> {
    Hitscan(&'a HitscanConfig),
    Projectile(&'a ProjectileConfig),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub name: String,
    pub shooting: ShootingConfig,
    /// Local pose дула относительно оружия
    pub muzzle: Pose,
    pub effects: EffectsConfig,
    pub screen_shake: ScreenShakeConfig,
    pub recoil: RecoilProfile,
    pub hitscan: HitscanConfig,
    pub projectile: Option<ProjectileConfig>,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            name: "weapon".to_string(),
            shooting: ShootingConfig::default(),
            muzzle: Pose::IDENTITY,
            effects: EffectsConfig::default(),
            screen_shake: ScreenShakeConfig::default(),
            recoil: RecoilProfile::default(),
            hitscan: HitscanConfig::default(),
            projectile: None,
        }
    }
}

impl WeaponConfig {
    /// Hitscan автомат
    pub fn rifle() -> Self {
        Self {
            name: "rifle".to_string(),
            shooting: ShootingConfig {
                infinite_ammo: false,
                ammo: 30,
                cooldown_time: 0.1,
            },
            muzzle: Pose::from_translation(Vec3::new(0.0, 0.05, -0.6)),
            effects: EffectsConfig {
                muzzle_flash: Some(EffectId::new("rifle_muzzle_flash")),
                shoot_sound: Some(SoundId::new("rifle_shot")),
                impact_effect: Some(TemplateId::new("bullet_hole")),
                muzzle_light: Some(MuzzleLightConfig::default()),
            },
            ..Self::default()
        }
    }

    /// Projectile launcher (тяжёлый снаряд, медленный темп)
    pub fn launcher() -> Self {
        Self {
            name: "launcher".to_string(),
            shooting: ShootingConfig {
                infinite_ammo: false,
                ammo: 4,
                cooldown_time: 1.0,
            },
            muzzle: Pose::from_translation(Vec3::new(0.0, 0.1, -0.9)),
            effects: EffectsConfig {
                muzzle_flash: Some(EffectId::new("launcher_backblast")),
                shoot_sound: Some(SoundId::new("launcher_thump")),
                impact_effect: None,
                muzzle_light: None,
            },
            screen_shake: ScreenShakeConfig {
                enabled: true,
                speed: 3.0,
                duration: 0.4,
                distance: 0.12,
            },
            recoil: RecoilProfile {
                torque: Vec3::new(6.0, 0.0, 1.5),
                force: Vec3::new(0.0, 0.0, 0.15),
                ..RecoilProfile::default()
            },
            projectile: Some(ProjectileConfig {
                template: TemplateId::new("grenade"),
                force: Vec3::new(0.0, 2.0, -25.0),
                despawn_time: 15.0,
            }),
            ..Self::default()
        }
    }

    pub fn mode(&self) -> FireMode<'_> {
        match &self.projectile {
            Some(projectile) => FireMode::Projectile(projectile),
            None => FireMode::Hitscan(&self.hitscan),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WeaponConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json).inspect_err(|err| {
            crate::logger::log_warning(&format!("Weapon config {}: {}", path.display(), err));
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("shooting.cooldown_time", self.shooting.cooldown_time)?;
        smoothing("recoil.torque_smoothing", self.recoil.torque_smoothing)?;
        smoothing("recoil.force_smoothing", self.recoil.force_smoothing)?;
        finite_vec("recoil.torque", self.recoil.torque)?;
        finite_vec("recoil.force", self.recoil.force)?;

        if let Some(light) = &self.effects.muzzle_light {
            non_negative("effects.muzzle_light.on_time", light.on_time)?;
        }

        non_negative("screen_shake.duration", self.screen_shake.duration)?;
        non_negative("screen_shake.distance", self.screen_shake.distance)?;
        non_negative("screen_shake.speed", self.screen_shake.speed)?;

        non_negative("hitscan.max_hit_distance", self.hitscan.max_hit_distance)?;
        non_negative("hitscan.bullet_despawn_time", self.hitscan.bullet_despawn_time)?;
        non_negative("hitscan.bullet_impact_force", self.hitscan.bullet_impact_force)?;
        non_negative("hitscan.bullet_width", self.hitscan.bullet_width)?;

        if let Some(projectile) = &self.projectile {
            finite_vec("projectile.force", projectile.force)?;
            non_negative("projectile.despawn_time", projectile.despawn_time)?;
        }

        if !self.muzzle.rotation.is_finite() || !self.muzzle.translation.is_finite() {
            return Err(ConfigError::Invalid {
                field: "muzzle",
                reason: "pose must be finite".to_string(),
            });
        }
        if !self.muzzle.rotation.is_normalized() {
            return Err(ConfigError::Invalid {
                field: "muzzle.rotation",
                reason: format!("quaternion {:?} is not unit length", self.muzzle.rotation),
            });
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected finite value >= 0, got {}", value),
        })
    }
}

fn smoothing(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("smoothing factor must be in (0, 1), got {}", value),
        })
    }
}

fn finite_vec(field: &'static str, value: Vec3) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "vector must be finite".to_string(),
        })
    }
}
