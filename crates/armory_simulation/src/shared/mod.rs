//! Shared domain - cross-cutting типы
//!
//! - Pose (local/world позиция + ротация без scale)
//! - Asset/template идентификаторы (TemplateId, EffectId, SoundId, LightId)
//! - serde helpers для glam векторов

pub mod ids;
pub mod pose;
pub mod serde_math;

pub use ids::*;
pub use pose::*;
