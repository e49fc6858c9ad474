//! FireController - timing state machine выстрела
//!
//! Gate (в порядке проверки):
//! 1. `!infinite_ammo && ammo == 0` → OutOfAmmo (независимо от cooldown)
//! 2. `now < cooldown_end_time` → OnCooldown
//! 3. иначе: ammo -= 1 (если конечный), cooldown_end_time = now + cooldown → Fired
//!
//! Провал gate не меняет state.

use crate::config::ShootingConfig;

/// Результат попытки выстрела
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Fired,
    OnCooldown,
    OutOfAmmo,
}

impl FireOutcome {
    pub fn is_fired(&self) -> bool {
        matches!(self, FireOutcome::Fired)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FireController {
    ammo_remaining: u32,
    infinite_ammo: bool,
    cooldown_time: f32,
    cooldown_end_time: f32,
}

impl FireController {
    /// State на момент активации: полный магазин, оружие готово в `now`
    pub fn new(config: &ShootingConfig, now: f32) -> Self {
        Self {
            ammo_remaining: config.ammo,
            infinite_ammo: config.infinite_ammo,
            cooldown_time: config.cooldown_time,
            cooldown_end_time: now,
        }
    }

    pub fn ammo_remaining(&self) -> u32 {
        self.ammo_remaining
    }

    pub fn infinite_ammo(&self) -> bool {
        self.infinite_ammo
    }

    pub fn cooldown_time(&self) -> f32 {
        self.cooldown_time
    }

    pub fn cooldown_end_time(&self) -> f32 {
        self.cooldown_end_time
    }

    pub fn is_empty(&self) -> bool {
        !self.infinite_ammo && self.ammo_remaining == 0
    }

    pub fn is_on_cooldown(&self, now: f32) -> bool {
        now < self.cooldown_end_time
    }

    /// Проверка gate + мутация state при успехе
    pub fn gate(&mut self, now: f32) -> FireOutcome {
        if self.is_empty() {
            return FireOutcome::OutOfAmmo;
        }

        if self.is_on_cooldown(now) {
            return FireOutcome::OnCooldown;
        }

        if !self.infinite_ammo {
            self.ammo_remaining -= 1;
        }
        self.cooldown_end_time = now + self.cooldown_time;

        FireOutcome::Fired
    }

    /// Pause reset: каждый paused frame оружие снова "готово" в `now`
    ///
    /// Единственное место, где cooldown_end_time может уменьшиться.
    pub fn hold_ready(&mut self, now: f32) {
        self.cooldown_end_time = now;
    }
}
