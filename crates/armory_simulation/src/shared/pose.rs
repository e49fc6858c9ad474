//! Pose - translation + rotation (scale не участвует в стрельбе и recoil)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::serde_math;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
    #[serde(with = "serde_math::vec3")]
    pub translation: Vec3,
    #[serde(with = "serde_math::quat")]
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self { translation, rotation }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, rotation: Quat::IDENTITY }
    }

    /// Local forward (-Z в конвенции Bevy), повернутый в пространство pose
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Направление из local space в пространство pose (без translation)
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation * direction
    }

    /// Композиция: `child` задан относительно `self`
    pub fn mul_pose(&self, child: &Pose) -> Pose {
        Pose {
            translation: self.translation + self.rotation * child.translation,
            rotation: self.rotation * child.rotation,
        }
    }

    /// Перевод world pose в local space родителя `parent`
    pub fn relative_to(&self, parent: &Pose) -> Pose {
        let inverse = parent.rotation.inverse();
        Pose {
            translation: inverse * (self.translation - parent.translation),
            rotation: inverse * self.rotation,
        }
    }

    /// Rotation, у которой forward (-Z) смотрит вдоль `direction`
    ///
    /// Для impact effect: ориентация по нормали поверхности.
    pub fn looking_along(translation: Vec3, direction: Vec3) -> Pose {
        let forward = direction.normalize_or_zero();
        if forward == Vec3::ZERO {
            return Pose::from_translation(translation);
        }
        Pose {
            translation,
            rotation: Quat::from_rotation_arc(Vec3::NEG_Z, forward),
        }
    }
}

impl From<Transform> for Pose {
    fn from(transform: Transform) -> Self {
        Self {
            translation: transform.translation,
            rotation: transform.rotation,
        }
    }
}

impl From<&GlobalTransform> for Pose {
    fn from(transform: &GlobalTransform) -> Self {
        let (_, rotation, translation) = transform.to_scale_rotation_translation();
        Self { translation, rotation }
    }
}

impl Pose {
    /// Записать pose в Transform, сохранив scale
    pub fn apply_to(&self, transform: &mut Transform) {
        transform.translation = self.translation;
        transform.rotation = self.rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_forward_is_negative_z() {
        assert!(Pose::IDENTITY.forward().abs_diff_eq(Vec3::NEG_Z, EPSILON));

        let turned = Pose::new(Vec3::ZERO, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!(turned.forward().abs_diff_eq(Vec3::NEG_X, EPSILON));
    }

    #[test]
    fn test_relative_to_inverts_mul_pose() {
        let parent = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_x(0.4));
        let child = Pose::new(Vec3::new(0.0, 0.5, -1.0), Quat::from_rotation_z(0.2));

        let world = parent.mul_pose(&child);
        let back = world.relative_to(&parent);

        assert!(back.translation.abs_diff_eq(child.translation, EPSILON));
        assert!(back.rotation.abs_diff_eq(child.rotation, EPSILON));
    }

    #[test]
    fn test_looking_along_normal() {
        let pose = Pose::looking_along(Vec3::ONE, Vec3::Y);
        assert!(pose.forward().abs_diff_eq(Vec3::Y, EPSILON));
        assert_eq!(pose.translation, Vec3::ONE);
    }
}
