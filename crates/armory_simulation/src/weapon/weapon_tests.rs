//! Tests for Weapon (frame loop + fire orchestration).

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bevy::prelude::*;

    use crate::config::WeaponConfig;
    use crate::effects::ScreenShakeService;
    use crate::firing::FireOutcome;
    use crate::hit::{HitResult, SweepHit, TargetClass};
    use crate::shared::{LightId, Pose};
    use crate::test_support::*;
    use crate::weapon::{FrameTime, Weapon, WeaponContext};

    struct Harness {
        physics: RecordingPhysics,
        factory: RecordingFactory,
        effects: RecordingEffects,
        damage: RecordingDamage,
        rng: rand_chacha::ChaCha8Rng,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                physics: RecordingPhysics::default(),
                factory: RecordingFactory::default(),
                effects: RecordingEffects::default(),
                damage: RecordingDamage::default(),
                rng: test_rng(),
            }
        }

        fn ctx(&mut self) -> WeaponContext<'_> {
            WeaponContext {
                physics: &mut self.physics,
                factory: &mut self.factory,
                effects: &mut self.effects,
                damage: &mut self.damage,
                rng: &mut self.rng,
            }
        }
    }

    fn rifle(cooldown: f32, ammo: u32) -> Arc<WeaponConfig> {
        let mut config = WeaponConfig::rifle();
        config.shooting.cooldown_time = cooldown;
        config.shooting.ammo = ammo;
        Arc::new(config)
    }

    fn wall_hit() -> SweepHit {
        SweepHit {
            point: Vec3::new(0.0, 0.0, -5.0),
            normal: Vec3::Z,
            collider: Entity::from_raw(3),
            target_class: TargetClass::Generic,
            rigid_body: None,
        }
    }

    #[test]
    fn test_fired_shot_runs_every_stage() {
        let shake = RecordingShake::shared();
        let mut weapon = Weapon::activate(
            rifle(0.2, 30),
            0.0,
            Pose::IDENTITY,
            Some(shake.clone() as Arc<dyn ScreenShakeService>),
        );
        let mut harness = Harness::new();
        harness.physics = RecordingPhysics::hitting(wall_hit());

        let report = weapon.request_fire(0.0, Pose::IDENTITY, &mut harness.ctx());

        assert_eq!(report.outcome, FireOutcome::Fired);
        assert!(matches!(report.hit, Some(HitResult::Hit(_))));
        assert_eq!(weapon.ammo_remaining(), 29);
        assert_eq!(weapon.cooldown_end_time(), 0.2);

        // recoil: torque X (знак по Z не трогает X), force Z
        assert_eq!(weapon.recoil().rotation_accum().x, 1.0);
        assert_eq!(weapon.recoil().position_accum(), Vec3::Z);

        assert_eq!(harness.factory.spawns.len(), 1);
        assert_eq!(harness.effects.particles.len(), 1);
        assert_eq!(harness.effects.sounds.len(), 1);
        assert!(weapon.muzzle_light().is_on());
        assert_eq!(shake.count(), 1);
    }

    #[test]
    fn test_blocked_shots_have_no_side_effects() {
        let shake = RecordingShake::shared();
        let mut weapon = Weapon::activate(
            rifle(1.0, 1),
            0.0,
            Pose::IDENTITY,
            Some(shake.clone() as Arc<dyn ScreenShakeService>),
        );
        let mut harness = Harness::new();

        assert!(weapon.request_fire(0.0, Pose::IDENTITY, &mut harness.ctx()).outcome.is_fired());
        let recoil_after_first = weapon.recoil().clone();

        let blocked = weapon.request_fire(0.5, Pose::IDENTITY, &mut harness.ctx());
        assert_eq!(blocked, crate::weapon::ShotReport { outcome: FireOutcome::OutOfAmmo, hit: None });

        let later = weapon.request_fire(5.0, Pose::IDENTITY, &mut harness.ctx());
        assert_eq!(later.outcome, FireOutcome::OutOfAmmo);

        assert_eq!(weapon.recoil(), &recoil_after_first);
        assert_eq!(harness.physics.queries.borrow().len(), 1);
        assert_eq!(harness.effects.sounds.len(), 1);
        assert_eq!(shake.count(), 1);
    }

    #[test]
    fn test_on_cooldown_reported_through_update() {
        let mut weapon = Weapon::activate(rifle(0.2, 30), 0.0, Pose::IDENTITY, None);
        let mut harness = Harness::new();

        let first = weapon.update(FrameTime::new(0.0, 0.0), &TriggerHeld(true), &Paused(false), Pose::IDENTITY, &mut harness.ctx());
        let second = weapon.update(FrameTime::new(0.1, 0.1), &TriggerHeld(true), &Paused(false), Pose::IDENTITY, &mut harness.ctx());
        let third = weapon.update(FrameTime::new(0.2, 0.1), &TriggerHeld(true), &Paused(false), Pose::IDENTITY, &mut harness.ctx());

        assert_eq!(first.shot.map(|s| s.outcome), Some(FireOutcome::Fired));
        assert_eq!(second.shot.map(|s| s.outcome), Some(FireOutcome::OnCooldown));
        assert_eq!(third.shot.map(|s| s.outcome), Some(FireOutcome::Fired));
        assert_eq!(weapon.ammo_remaining(), 28);
    }

    #[test]
    fn test_no_input_no_shot() {
        let mut weapon = Weapon::activate(rifle(0.2, 30), 0.0, Pose::IDENTITY, None);
        let mut harness = Harness::new();

        let report = weapon.update(FrameTime::new(1.0, 0.016), &TriggerHeld(false), &Paused(false), Pose::IDENTITY, &mut harness.ctx());

        assert_eq!(report.shot, None);
        assert!(report.pose.is_some());
        assert_eq!(weapon.ammo_remaining(), 30);
    }

    #[test]
    fn test_pause_resets_cooldown_to_ready() {
        let mut weapon = Weapon::activate(rifle(2.0, 30), 0.0, Pose::IDENTITY, None);
        let mut harness = Harness::new();

        weapon.update(FrameTime::new(0.0, 0.0), &TriggerHeld(true), &Paused(false), Pose::IDENTITY, &mut harness.ctx());
        assert_eq!(weapon.cooldown_end_time(), 2.0);

        // Во время pause выстрелов нет, cooldown держится "готовым"
        let paused = weapon.update(FrameTime::new(0.3, 0.3), &TriggerHeld(true), &Paused(true), Pose::IDENTITY, &mut harness.ctx());
        assert_eq!(paused.shot, None);
        assert_eq!(weapon.cooldown_end_time(), 0.3);

        weapon.update(FrameTime::new(0.4, 0.1), &TriggerHeld(true), &Paused(true), Pose::IDENTITY, &mut harness.ctx());
        assert_eq!(weapon.cooldown_end_time(), 0.4);

        // Первый frame после pause стреляет сразу, хотя 2s cooldown не истёк
        let resumed = weapon.update(FrameTime::new(0.5, 0.1), &TriggerHeld(true), &Paused(false), Pose::IDENTITY, &mut harness.ctx());
        assert_eq!(resumed.shot.map(|s| s.outcome), Some(FireOutcome::Fired));
        assert_eq!(weapon.ammo_remaining(), 28);
    }

    #[test]
    fn test_recoil_decays_every_frame_after_fire() {
        let mut weapon = Weapon::activate(rifle(0.2, 30), 0.0, Pose::IDENTITY, None);
        let mut harness = Harness::new();

        let fired = weapon.update(FrameTime::new(0.0, 0.016), &TriggerHeld(true), &Paused(false), Pose::IDENTITY, &mut harness.ctx());
        let kicked = fired.pose.unwrap();
        assert!(kicked.translation.z > 0.0 && kicked.translation.z < 1.0);

        let mut previous = kicked.translation.z;
        for frame in 1..30 {
            let report = weapon.update(
                FrameTime::new(frame as f32 * 0.016, 0.016),
                &TriggerHeld(false),
                &Paused(false),
                Pose::IDENTITY,
                &mut harness.ctx(),
            );
            let z = report.pose.unwrap().translation.z;
            assert!(z < previous);
            previous = z;
        }
    }

    #[test]
    fn test_pose_is_relative_to_rest() {
        let rest = Pose::new(Vec3::new(0.2, -0.3, -0.4), Quat::from_rotation_y(0.1));
        let mut weapon = Weapon::activate(rifle(0.2, 30), 0.0, rest, None);
        let mut harness = Harness::new();

        let report = weapon.update(FrameTime::new(0.0, 0.0), &TriggerHeld(false), &Paused(false), Pose::IDENTITY, &mut harness.ctx());
        let pose = report.pose.unwrap();
        assert!(pose.translation.abs_diff_eq(rest.translation, 1e-6));
        assert!(pose.rotation.abs_diff_eq(rest.rotation, 1e-6));

        let new_rest = Pose::from_translation(Vec3::new(0.0, 0.0, -1.0));
        weapon.reset_rest(new_rest);
        let report = weapon.update(FrameTime::new(0.1, 0.0), &TriggerHeld(false), &Paused(false), Pose::IDENTITY, &mut harness.ctx());
        assert!(report.pose.unwrap().translation.abs_diff_eq(new_rest.translation, 1e-6));
    }

    #[test]
    fn test_not_in_use_ignores_input_and_recoil() {
        let mut weapon = Weapon::activate(rifle(0.2, 30), 0.0, Pose::IDENTITY, None);
        let mut harness = Harness::new();

        weapon.set_in_use(false, &mut harness.effects);
        let report = weapon.update(FrameTime::new(1.0, 0.016), &TriggerHeld(true), &Paused(false), Pose::IDENTITY, &mut harness.ctx());

        assert_eq!(report, crate::weapon::FrameReport { shot: None, pose: None });
        assert_eq!(weapon.ammo_remaining(), 30);
    }

    #[test]
    fn test_deactivation_forces_light_off() {
        let mut weapon = Weapon::activate(rifle(0.2, 30), 0.0, Pose::IDENTITY, None);
        let mut harness = Harness::new();

        weapon.request_fire(0.0, Pose::IDENTITY, &mut harness.ctx());
        assert!(harness.effects.light_is_on());

        weapon.set_in_use(false, &mut harness.effects);

        assert!(!weapon.muzzle_light().is_on());
        assert_eq!(harness.effects.lights.last(), Some(&(LightId::new("muzzle_light"), false)));
    }

    #[test]
    fn test_teardown_forces_light_off() {
        let mut weapon = Weapon::activate(rifle(0.2, 30), 0.0, Pose::IDENTITY, None);
        let mut harness = Harness::new();

        weapon.request_fire(0.0, Pose::IDENTITY, &mut harness.ctx());
        weapon.teardown(&mut harness.effects);

        assert!(!harness.effects.light_is_on());
    }

    #[test]
    fn test_light_expires_during_frames() {
        let mut weapon = Weapon::activate(rifle(0.2, 30), 0.0, Pose::IDENTITY, None);
        let mut harness = Harness::new();

        weapon.update(FrameTime::new(0.0, 0.016), &TriggerHeld(true), &Paused(false), Pose::IDENTITY, &mut harness.ctx());
        assert!(weapon.muzzle_light().is_on());

        weapon.update(FrameTime::new(0.032, 0.016), &TriggerHeld(false), &Paused(false), Pose::IDENTITY, &mut harness.ctx());
        assert!(weapon.muzzle_light().is_on());

        weapon.update(FrameTime::new(0.064, 0.016), &TriggerHeld(false), &Paused(false), Pose::IDENTITY, &mut harness.ctx());
        assert!(!weapon.muzzle_light().is_on());
        assert!(!harness.effects.light_is_on());
    }

    #[test]
    fn test_muzzle_pose_composes_offset() {
        let weapon = Weapon::activate(rifle(0.2, 30), 0.0, Pose::IDENTITY, None);
        let weapon_world = Pose::from_translation(Vec3::new(10.0, 0.0, 0.0));

        let muzzle = weapon.muzzle_pose(weapon_world);

        assert!(muzzle.translation.abs_diff_eq(Vec3::new(10.0, 0.05, -0.6), 1e-5));
    }

    #[test]
    fn test_owner_excluded_from_sweep() {
        let owner = Entity::from_raw(77);
        let mut weapon = Weapon::activate(rifle(0.2, 30), 0.0, Pose::IDENTITY, None).with_owner(owner);
        let mut harness = Harness::new();

        weapon.request_fire(0.0, Pose::IDENTITY, &mut harness.ctx());

        assert_eq!(harness.physics.queries.borrow()[0].exclude, Some(owner));
    }

    #[test]
    fn test_projectile_weapon_reports_spawn() {
        let mut weapon = Weapon::activate(Arc::new(WeaponConfig::launcher()), 0.0, Pose::IDENTITY, None);
        let mut harness = Harness::new();

        let report = weapon.request_fire(0.0, Pose::IDENTITY, &mut harness.ctx());

        assert!(matches!(report.hit, Some(HitResult::ProjectileSpawned { .. })));
        assert_eq!(harness.factory.despawns.len(), 1);
        assert_eq!(weapon.ammo_remaining(), 3);
    }
}
