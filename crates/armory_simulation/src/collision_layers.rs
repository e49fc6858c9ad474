//! Collision Layers Constants
//!
//! Rapier collision groups - централизованные константы для всего проекта.
//!
//! ## Архитектура:
//! - **Layer (битовая маска):** на каком слое находится collider (`CollisionGroups::memberships`)
//! - **Mask (битовая маска):** с какими слоями collider пересекается (`CollisionGroups::filters`)
//!
//! ## Layers:
//! - Layer 1 (0b1 = 1): Default (статический мир без явной группы)
//! - Layer 2 (0b10 = 2): Player (стрелок, его руки и оружие)
//! - Layer 3 (0b100 = 4): Actors (NPC, damageable цели)
//! - Layer 4 (0b1000 = 8): Environment (стены, пропы)
//! - Layer 5 (0b10000 = 16): Projectiles (физические снаряды)
//!
//! ## Использование:
//! ```ignore
//! // Hitscan sweep не должен задевать самого стрелка
//! let mask = sweep_mask(COLLISION_LAYER_PLAYER);
//! assert_eq!(mask & COLLISION_LAYER_PLAYER, 0);
//! ```

use bevy_rapier3d::prelude::{CollisionGroups, Group};

/// Layer 1: Default
pub const COLLISION_LAYER_DEFAULT: u32 = 0b1;

/// Layer 2: Player (firer's own layer, excluded from sweeps)
pub const COLLISION_LAYER_PLAYER: u32 = 0b10;

/// Layer 3: Actors
pub const COLLISION_LAYER_ACTORS: u32 = 0b100;

/// Layer 4: Environment
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b1000;

/// Layer 5: Projectiles
pub const COLLISION_LAYER_PROJECTILES: u32 = 0b1_0000;

/// Mask: projectiles collide with everything except other projectiles and the player
pub const COLLISION_MASK_PROJECTILES: u32 =
    COLLISION_LAYER_DEFAULT | COLLISION_LAYER_ACTORS | COLLISION_LAYER_ENVIRONMENT;

/// Маска sweep'а: все слои кроме исключённых
pub fn sweep_mask(excluded_layers: u32) -> u32 {
    !excluded_layers
}

/// Collision groups для spatial query (query shape состоит во всех группах)
pub fn query_groups(layer_mask: u32) -> CollisionGroups {
    CollisionGroups::new(Group::ALL, Group::from_bits_truncate(layer_mask))
}

/// Collision groups для spawned projectile body
pub fn projectile_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(COLLISION_LAYER_PROJECTILES),
        Group::from_bits_truncate(COLLISION_MASK_PROJECTILES),
    )
}

/// Получить название слоя для debug логов
pub fn get_layer_name(layer_bits: u32) -> &'static str {
    match layer_bits {
        COLLISION_LAYER_DEFAULT => "Default",
        COLLISION_LAYER_PLAYER => "Player",
        COLLISION_LAYER_ACTORS => "Actors",
        COLLISION_LAYER_ENVIRONMENT => "Environment",
        COLLISION_LAYER_PROJECTILES => "Projectiles",
        _ => "Unknown",
    }
}

/// Названия известных слоёв, входящих в маску
pub fn layer_names(mask: u32) -> Vec<&'static str> {
    [
        COLLISION_LAYER_DEFAULT,
        COLLISION_LAYER_PLAYER,
        COLLISION_LAYER_ACTORS,
        COLLISION_LAYER_ENVIRONMENT,
        COLLISION_LAYER_PROJECTILES,
    ]
    .into_iter()
    .filter(|layer| mask & layer != 0)
    .map(get_layer_name)
    .collect()
}
