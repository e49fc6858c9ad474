//! Recoil decay → local Transform оружия

use bevy::prelude::*;

use super::components::EquippedWeapon;

/// Система: decay за frame и запись pose в Transform (только оружие в руках)
pub fn apply_weapon_recoil(mut weapons: Query<(&mut EquippedWeapon, &mut Transform)>, time: Res<Time>) {
    let dt = time.delta_secs();

    for (mut equipped, mut transform) in weapons.iter_mut() {
        if let Some(pose) = equipped.weapon.apply_recoil(dt) {
            pose.apply_to(&mut transform);
        }
    }
}
