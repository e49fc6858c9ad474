//! Активация оружия и команды presentation слоя (in use, rest pose)

use bevy::prelude::*;

use crate::collision_layers::layer_names;
use crate::config::FireMode;
use crate::shared::Pose;
use crate::weapon::Weapon;

use super::components::{EquippedWeapon, ScreenShakeHandle, ShooterOf, WeaponLoadout};
use super::effects::EffectEvents;
use super::events::{MuzzleLightToggled, ResetRecoilRest, SetWeaponInUse};

/// Система: WeaponLoadout → EquippedWeapon
///
/// State создаётся один раз: cooldown_end = now, магазин полный,
/// rest pose = текущий local Transform.
pub fn activate_loadouts(
    mut commands: Commands,
    loadouts: Query<(Entity, &WeaponLoadout, &Transform, Option<&ShooterOf>), Without<EquippedWeapon>>,
    shake: Res<ScreenShakeHandle>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();

    for (entity, loadout, transform, shooter) in loadouts.iter() {
        let mut weapon = Weapon::activate(
            loadout.0.clone(),
            now,
            Pose::from(*transform),
            Some(shake.service()),
        );
        if let Some(shooter) = shooter {
            weapon = weapon.with_owner(shooter.0);
        }

        let mode = match loadout.0.mode() {
            FireMode::Projectile(projectile) => format!("projectile '{}'", projectile.template),
            FireMode::Hitscan(hitscan) => format!(
                "hitscan, ignores {:?}",
                layer_names(hitscan.excluded_layers)
            ),
        };
        crate::logger::log(&format!(
            "🔧 Weapon '{}' activated on {:?} (ammo: {}, mode: {})",
            loadout.0.name,
            entity,
            weapon.ammo_remaining(),
            mode
        ));

        commands.entity(entity).insert(EquippedWeapon { weapon });
    }
}

/// Система: обработка `SetWeaponInUse` / `ResetRecoilRest`
pub fn apply_weapon_commands(
    mut use_events: EventReader<SetWeaponInUse>,
    mut rest_events: EventReader<ResetRecoilRest>,
    mut weapons: Query<(&mut EquippedWeapon, &Transform)>,
    mut lights: EventWriter<MuzzleLightToggled>,
) {
    for event in use_events.read() {
        let Ok((mut equipped, _)) = weapons.get_mut(event.weapon) else {
            crate::logger::log_warning(&format!("SetWeaponInUse: {:?} is not an equipped weapon", event.weapon));
            continue;
        };

        let mut effects = EffectEvents::new(event.weapon);
        equipped.weapon.set_in_use(event.in_use, &mut effects);
        effects.write_lights(&mut lights);
    }

    for event in rest_events.read() {
        let Ok((mut equipped, transform)) = weapons.get_mut(event.weapon) else {
            crate::logger::log_warning(&format!("ResetRecoilRest: {:?} is not an equipped weapon", event.weapon));
            continue;
        };

        let pose = event.pose.unwrap_or_else(|| Pose::from(*transform));
        equipped.weapon.reset_rest(pose);
    }
}
