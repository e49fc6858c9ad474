//! Hit domain - разрешение одного выстрела
//!
//! Содержит:
//! - Коллабораторы: PhysicsEngine (sweep + impulse), SceneObjectFactory (spawn/despawn),
//!   DamageHook (внешний hook для Damageable целей)
//! - HitResolver: hitscan sweep или spawn physical projectile
//! - HitResult: NoHit / Hit / ProjectileSpawned

pub mod physics;
pub mod resolver;


pub use physics::*;
pub use resolver::*;
