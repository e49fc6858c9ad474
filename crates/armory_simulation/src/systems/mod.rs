//! ECS integration - weapon core поверх Bevy + bevy_rapier3d
//!
//! Архитектура:
//! - Core (`Weapon`) ничего не знает о ECS: системы собирают коллабораторы
//!   (RapierPhysics, EcsSceneFactory, EffectEvents, DamageEvents) на frame
//! - Косметика и урон уходят событиями в presentation/gameplay слой
//! - Все системы в `Update`, последовательно (`.chain()`)

pub mod activation;
pub mod components;
pub mod despawn;
pub mod effects;
pub mod events;
pub mod fire;
pub mod rapier_backend;
pub mod recoil;

pub use activation::*;
pub use components::*;
pub use despawn::*;
pub use effects::*;
pub use events::*;
pub use fire::*;
pub use rapier_backend::*;
pub use recoil::*;

use bevy::prelude::*;

use crate::hit::TargetClass;
use crate::DeterministicRng;

/// Weapon Plugin
///
/// Порядок выполнения (один frame):
/// 1. activate_loadouts - WeaponLoadout → EquippedWeapon
/// 2. apply_weapon_commands - SetWeaponInUse / ResetRecoilRest
/// 3. expire_muzzle_lights - deadline muzzle light
/// 4. fire_weapons - gate → hit resolution → recoil kick → эффекты
/// 5. apply_impulse_requests - ImpulseRequested → ExternalImpulse
/// 6. apply_weapon_recoil - decay + local Transform
/// 7. flush_screen_shake - очередь → ScreenShakeRequested
/// 8. despawn_after_timeout - projectiles / impact effects
pub struct WeaponPlugin;

impl Plugin for WeaponPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WeaponFired>()
            .add_event::<DamageableHit>()
            .add_event::<MuzzleFlashRequested>()
            .add_event::<ShotSoundRequested>()
            .add_event::<MuzzleLightToggled>()
            .add_event::<ScreenShakeRequested>()
            .add_event::<ImpulseRequested>()
            .add_event::<SetWeaponInUse>()
            .add_event::<ResetRecoilRest>();

        app.register_type::<TargetClass>()
            .register_type::<FireInput>()
            .init_resource::<SimulationPaused>()
            .init_resource::<ScreenShakeHandle>()
            .init_resource::<ProjectileTemplates>();

        // Seed задаёт create_headless_app; без него - дефолтный
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.add_observer(force_light_off_on_remove);

        app.add_systems(
            Update,
            (
                activate_loadouts,
                apply_weapon_commands,
                expire_muzzle_lights,
                fire_weapons,
                apply_impulse_requests,
                apply_weapon_recoil,
                flush_screen_shake,
                despawn_after_timeout,
            )
                .chain(), // Последовательное выполнение
        );
    }
}
