//! EffectDispatcher - эффекты одного успешного выстрела
//!
//! Каждый эффект независим, порядок не важен, отсутствующий ассет = тихий skip.

use crate::config::{EffectsConfig, ScreenShakeConfig};
use crate::shared::{EffectId, LightId, SoundId};

use super::muzzle_light::MuzzleLight;
use super::screen_shake::{ScreenShakeService, ShakeRequest};

/// Playback particles/audio/light (вне ядра: engine или события ECS)
pub trait EffectPlayer {
    fn play_particles(&mut self, effect: &EffectId);
    fn play_sound(&mut self, clip: &SoundId);
    fn set_light(&mut self, light: &LightId, on: bool);
}

pub struct EffectDispatcher<'a> {
    effects: &'a EffectsConfig,
    screen_shake: &'a ScreenShakeConfig,
}

impl<'a> EffectDispatcher<'a> {
    pub fn new(effects: &'a EffectsConfig, screen_shake: &'a ScreenShakeConfig) -> Self {
        Self { effects, screen_shake }
    }

    pub fn shake_request(&self) -> ShakeRequest {
        ShakeRequest {
            duration: self.screen_shake.duration,
            distance: self.screen_shake.distance,
            speed: self.screen_shake.speed,
        }
    }

    pub fn dispatch(
        &self,
        now: f32,
        muzzle_light: &mut MuzzleLight,
        shake: Option<&dyn ScreenShakeService>,
        player: &mut dyn EffectPlayer,
    ) {
        if let Some(flash) = &self.effects.muzzle_flash {
            player.play_particles(flash);
        }

        if let Some(sound) = &self.effects.shoot_sound {
            player.play_sound(sound);
        }

        muzzle_light.activate(now, player);

        if self.screen_shake.enabled {
            if let Some(service) = shake {
                service.shake(self.shake_request());
            }
        }
    }
}
