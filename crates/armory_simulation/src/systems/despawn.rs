//! Деспавн projectiles / impact effects по таймауту

use bevy::prelude::*;

use super::components::DespawnAfter;

/// Система: деспавн entities с истёкшим DespawnAfter timeout
///
/// Удаляет entity (вместе с children) если текущее время >= despawn_time.
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            crate::logger::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
            // Impact effect мог уйти вместе с parent'ом в этом же frame
            commands.entity(entity).try_despawn();
        }
    }
}
