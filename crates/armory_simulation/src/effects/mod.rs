//! Effects domain - косметика успешного выстрела (fire-and-forget)
//!
//! Содержит:
//! - EffectPlayer (particles, audio, light toggle)
//! - MuzzleLight (timed activation через deadline, forced off при teardown)
//! - ScreenShakeService + ScreenShakeQueue (process-wide sink)
//! - EffectDispatcher (запуск всех эффектов одного выстрела)

pub mod dispatcher;
pub mod muzzle_light;
pub mod screen_shake;

#[cfg(test)]
mod dispatcher_tests;

pub use dispatcher::*;
pub use muzzle_light::*;
pub use screen_shake::*;
