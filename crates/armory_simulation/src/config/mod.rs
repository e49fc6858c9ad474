//! Weapon configuration
//!
//! Вся конфигурация статична на время жизни оружия: читается один раз при
//! активации (JSON через serde_json или preset в коде).

pub mod weapon_config;


pub use weapon_config::*;
