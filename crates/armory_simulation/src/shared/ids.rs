//! Строковые идентификаторы ассетов
//!
//! Ядро не грузит ассеты: оно только передаёт id коллабораторам
//! (spawn factory, audio, particles). Сериализуются как plain string.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! asset_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

asset_id!(
    /// Prefab для spawn factory (projectile, impact effect)
    TemplateId
);
asset_id!(
    /// One-shot particle burst (muzzle flash)
    EffectId
);
asset_id!(
    /// One-shot audio clip
    SoundId
);
asset_id!(
    /// Muzzle light object
    LightId
);
