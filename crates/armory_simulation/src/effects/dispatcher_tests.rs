//! Tests for EffectDispatcher and MuzzleLight.

#[cfg(test)]
mod tests {
    use crate::config::{EffectsConfig, MuzzleLightConfig, ScreenShakeConfig, WeaponConfig};
    use crate::effects::{EffectDispatcher, MuzzleLight, ScreenShakeService};
    use crate::shared::{EffectId, LightId, SoundId};
    use crate::test_support::{RecordingEffects, RecordingShake};

    fn light(on_time: f32) -> MuzzleLight {
        MuzzleLight::new(Some(MuzzleLightConfig {
            light: LightId::new("flash_light"),
            on_time,
        }))
    }

    #[test]
    fn test_dispatch_plays_all_configured_effects() {
        let config = WeaponConfig::rifle();
        let dispatcher = EffectDispatcher::new(&config.effects, &config.screen_shake);
        let mut muzzle_light = MuzzleLight::new(config.effects.muzzle_light.clone());
        let shake = RecordingShake::shared();
        let mut player = RecordingEffects::default();

        dispatcher.dispatch(1.0, &mut muzzle_light, Some(shake.as_ref() as &dyn ScreenShakeService), &mut player);

        assert_eq!(player.particles, vec![EffectId::new("rifle_muzzle_flash")]);
        assert_eq!(player.sounds, vec![SoundId::new("rifle_shot")]);
        assert_eq!(player.lights, vec![(LightId::new("muzzle_light"), true)]);
        assert!(muzzle_light.is_on());

        let requests = shake.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].duration, config.screen_shake.duration);
        assert_eq!(requests[0].distance, config.screen_shake.distance);
        assert_eq!(requests[0].speed, config.screen_shake.speed);
    }

    #[test]
    fn test_missing_assets_are_skipped() {
        let effects = EffectsConfig::default();
        let screen_shake = ScreenShakeConfig::default();
        let dispatcher = EffectDispatcher::new(&effects, &screen_shake);
        let mut muzzle_light = MuzzleLight::new(None);
        let mut player = RecordingEffects::default();

        dispatcher.dispatch(0.0, &mut muzzle_light, None, &mut player);

        assert!(player.particles.is_empty());
        assert!(player.sounds.is_empty());
        assert!(player.lights.is_empty());
        assert!(!muzzle_light.is_on());
    }

    #[test]
    fn test_disabled_shake_sends_nothing() {
        let effects = EffectsConfig::default();
        let screen_shake = ScreenShakeConfig {
            enabled: false,
            ..ScreenShakeConfig::default()
        };
        let dispatcher = EffectDispatcher::new(&effects, &screen_shake);
        let shake = RecordingShake::shared();

        dispatcher.dispatch(
            0.0,
            &mut MuzzleLight::new(None),
            Some(shake.as_ref() as &dyn ScreenShakeService),
            &mut RecordingEffects::default(),
        );

        assert_eq!(shake.count(), 0);
    }

    #[test]
    fn test_muzzle_light_turns_off_after_deadline() {
        let mut muzzle_light = light(0.05);
        let mut player = RecordingEffects::default();

        muzzle_light.activate(1.0, &mut player);
        muzzle_light.tick(1.02, &mut player);
        assert!(muzzle_light.is_on());
        assert!(player.light_is_on());

        muzzle_light.tick(1.06, &mut player);
        assert!(!muzzle_light.is_on());
        assert!(!player.light_is_on());
        assert_eq!(player.lights.len(), 2);
    }

    #[test]
    fn test_muzzle_light_retrigger_extends_deadline() {
        let mut muzzle_light = light(0.1);
        let mut player = RecordingEffects::default();

        muzzle_light.activate(0.0, &mut player);
        muzzle_light.activate(0.08, &mut player);
        muzzle_light.tick(0.15, &mut player);

        assert!(muzzle_light.is_on());
        assert_eq!(player.lights.len(), 1, "повторный on не шлётся");

        muzzle_light.tick(0.2, &mut player);
        assert!(!muzzle_light.is_on());
    }

    #[test]
    fn test_force_off_before_deadline() {
        let mut muzzle_light = light(10.0);
        let mut player = RecordingEffects::default();

        muzzle_light.activate(0.0, &mut player);
        muzzle_light.force_off(&mut player);

        assert!(!muzzle_light.is_on());
        assert!(!player.light_is_on());

        // Повторный force_off ничего не шлёт
        muzzle_light.force_off(&mut player);
        assert_eq!(player.lights.len(), 2);
    }

    #[test]
    fn test_light_without_object_stays_off() {
        let mut muzzle_light = MuzzleLight::new(None);
        let mut player = RecordingEffects::default();

        muzzle_light.activate(0.0, &mut player);

        assert_eq!(muzzle_light.light_id(), None);
        assert!(!muzzle_light.is_on());
        assert!(player.lights.is_empty());
        assert_eq!(light(0.1).light_id(), Some(&LightId::new("flash_light")));
    }
}
