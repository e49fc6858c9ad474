//! MuzzleLight - timed activation без блокировки frame loop
//!
//! Вместо suspended task: deadline, который проверяется каждый tick.
//! Повторный выстрел пока свет горит продлевает deadline.
//! `force_off` гасит свет немедленно (deactivate / teardown).

use crate::config::MuzzleLightConfig;
use crate::shared::LightId;

use super::dispatcher::EffectPlayer;

#[derive(Debug, Clone, PartialEq)]
pub struct MuzzleLight {
    light: Option<MuzzleLightConfig>,
    off_deadline: Option<f32>,
}

impl MuzzleLight {
    pub fn new(light: Option<MuzzleLightConfig>) -> Self {
        Self {
            light,
            off_deadline: None,
        }
    }

    pub fn is_on(&self) -> bool {
        self.off_deadline.is_some()
    }

    pub fn off_deadline(&self) -> Option<f32> {
        self.off_deadline
    }

    pub fn light_id(&self) -> Option<&LightId> {
        self.light.as_ref().map(|light| &light.light)
    }

    /// Включить свет до `now + on_time` (no-op без light объекта)
    pub fn activate(&mut self, now: f32, player: &mut dyn EffectPlayer) {
        let Some(light) = &self.light else {
            return;
        };

        if self.off_deadline.is_none() {
            player.set_light(&light.light, true);
        }
        self.off_deadline = Some(now + light.on_time);
    }

    /// Погасить свет, если deadline наступил
    pub fn tick(&mut self, now: f32, player: &mut dyn EffectPlayer) {
        if matches!(self.off_deadline, Some(deadline) if now >= deadline) {
            self.force_off(player);
        }
    }

    pub fn force_off(&mut self, player: &mut dyn EffectPlayer) {
        if self.off_deadline.take().is_some() {
            if let Some(light) = &self.light {
                player.set_light(&light.light, false);
            }
        }
    }
}
