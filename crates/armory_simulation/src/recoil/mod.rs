//! Recoil domain - накопление и экспоненциальное затухание отдачи
//!
//! Содержит:
//! - RecoilProfile (неизменяемая per-weapon конфигурация)
//! - RecoilModel (аккумуляторы rotation/position + rest pose)
//!
//! Flow: выстрел → `kick()` (additive), каждый frame → `decay(dt)` →
//! `compute_transform()` применяется к local transform оружия.

pub mod model;


pub use model::*;
