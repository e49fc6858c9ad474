//! Firing domain - cooldown + ammo gate
//!
//! FireController владеет ammo/cooldown state и решает, проходит ли выстрел.
//! Hit resolution, recoil и эффекты запускает `Weapon::request_fire`
//! только после `FireOutcome::Fired`.

pub mod controller;


pub use controller::*;
