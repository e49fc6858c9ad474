//! ECS сторона косметики: EffectPlayer → события, muzzle light timers, shake flush

use bevy::prelude::*;

use crate::effects::EffectPlayer;
use crate::shared::{EffectId, LightId, SoundId};

use super::components::{EquippedWeapon, ScreenShakeHandle};
use super::events::{MuzzleFlashRequested, MuzzleLightToggled, ScreenShakeRequested, ShotSoundRequested};

/// EffectPlayer, который копит запросы как события (записываются после цикла по оружию)
#[derive(Debug)]
pub struct EffectEvents {
    pub weapon: Entity,
    pub flashes: Vec<MuzzleFlashRequested>,
    pub sounds: Vec<ShotSoundRequested>,
    pub lights: Vec<MuzzleLightToggled>,
}

impl EffectEvents {
    pub fn new(weapon: Entity) -> Self {
        Self {
            weapon,
            flashes: Vec::new(),
            sounds: Vec::new(),
            lights: Vec::new(),
        }
    }

    pub fn write_lights(&mut self, lights: &mut EventWriter<MuzzleLightToggled>) {
        lights.write_batch(self.lights.drain(..));
    }

    pub fn write_all(
        &mut self,
        flashes: &mut EventWriter<MuzzleFlashRequested>,
        sounds: &mut EventWriter<ShotSoundRequested>,
        lights: &mut EventWriter<MuzzleLightToggled>,
    ) {
        flashes.write_batch(self.flashes.drain(..));
        sounds.write_batch(self.sounds.drain(..));
        self.write_lights(lights);
    }
}

impl EffectPlayer for EffectEvents {
    fn play_particles(&mut self, effect: &EffectId) {
        self.flashes.push(MuzzleFlashRequested {
            weapon: self.weapon,
            effect: effect.clone(),
        });
    }

    fn play_sound(&mut self, clip: &SoundId) {
        self.sounds.push(ShotSoundRequested {
            weapon: self.weapon,
            sound: clip.clone(),
        });
    }

    fn set_light(&mut self, light: &LightId, on: bool) {
        self.lights.push(MuzzleLightToggled {
            weapon: self.weapon,
            light: light.clone(),
            on,
        });
    }
}

/// Система: гасит muzzle lights с истёкшим deadline
pub fn expire_muzzle_lights(
    mut weapons: Query<(Entity, &mut EquippedWeapon)>,
    mut lights: EventWriter<MuzzleLightToggled>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();

    for (entity, mut equipped) in weapons.iter_mut() {
        if !equipped.weapon.muzzle_light().is_on() {
            continue;
        }
        let mut effects = EffectEvents::new(entity);
        equipped.weapon.tick_light(now, &mut effects);
        effects.write_lights(&mut lights);
    }
}

/// Система: очередь screen shake → `ScreenShakeRequested`
pub fn flush_screen_shake(handle: Res<ScreenShakeHandle>, mut shakes: EventWriter<ScreenShakeRequested>) {
    for request in handle.queue().drain() {
        shakes.write(ScreenShakeRequested { request });
    }
}

/// Observer: удаление оружия (despawn) гасит muzzle light немедленно
pub fn force_light_off_on_remove(
    trigger: Trigger<OnRemove, EquippedWeapon>,
    mut weapons: Query<&mut EquippedWeapon>,
    mut lights: EventWriter<MuzzleLightToggled>,
) {
    let entity = trigger.target();
    let Ok(mut equipped) = weapons.get_mut(entity) else {
        return;
    };

    let mut effects = EffectEvents::new(entity);
    equipped.weapon.teardown(&mut effects);
    let light = equipped.weapon.muzzle_light().light_id();
    if let Some(light) = light.filter(|_| !effects.lights.is_empty()) {
        crate::logger::log(&format!(
            "💡 Muzzle light '{}' of {:?} forced off (weapon removed)",
            light, entity
        ));
    }
    effects.write_lights(&mut lights);
}
