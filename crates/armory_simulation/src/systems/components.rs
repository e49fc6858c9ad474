//! ECS компоненты и ресурсы weapon слоя

use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;

use crate::config::WeaponConfig;
use crate::effects::{ScreenShakeQueue, ScreenShakeService};
use crate::shared::TemplateId;
use crate::weapon::{InputSource, PauseState, Weapon};

/// Оружие, которое ещё не активировано
///
/// `activate_loadouts` превращает его в `EquippedWeapon` (rest pose = текущий local Transform).
#[derive(Component, Debug, Clone)]
pub struct WeaponLoadout(pub Arc<WeaponConfig>);

impl WeaponLoadout {
    pub fn new(config: WeaponConfig) -> Self {
        Self(Arc::new(config))
    }
}

/// Активированное оружие (владеет core state)
#[derive(Component, Debug)]
pub struct EquippedWeapon {
    pub weapon: Weapon,
}

/// Опрашиваемый input (presentation слой выставляет `held` каждый frame)
///
/// Semi-auto vs full-auto решает presentation слой: semi-auto ставит `held = true`
/// только на frame нажатия (press edge), full-auto держит `true` пока курок зажат.
/// Ограничение темпа в обоих случаях - cooldown оружия.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct FireInput {
    pub held: bool,
}

impl InputSource for FireInput {
    fn is_fire_requested(&self) -> bool {
        self.held
    }
}

/// Стрелок оружия: его collider исключён из sweep
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShooterOf(pub Entity);

/// Template, из которого spawn factory создала entity (визуал подцепляет presentation)
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct SpawnedFrom(pub TemplateId);

/// Компонент-маркер: деспавн entity после указанного времени
///
/// Ставится через `SceneObjectFactory::schedule_despawn` (projectiles, impact effects).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DespawnAfter {
    /// Время деспавна (в секундах от старта игры)
    pub despawn_time: f32,
}

/// Global pause флаг (пока true - выстрелов нет, cooldown держится "готовым")
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationPaused(pub bool);

impl PauseState for SimulationPaused {
    fn is_paused(&self) -> bool {
        self.0
    }
}

/// Process-wide screen shake sink
///
/// Каждое оружие получает его при активации; запросы копятся в очереди
/// и раз в frame уходят событиями `ScreenShakeRequested`.
#[derive(Resource, Debug, Clone, Default)]
pub struct ScreenShakeHandle {
    queue: Arc<ScreenShakeQueue>,
}

impl ScreenShakeHandle {
    pub fn service(&self) -> Arc<dyn ScreenShakeService> {
        self.queue.clone()
    }

    pub fn queue(&self) -> &ScreenShakeQueue {
        &self.queue
    }
}

/// Физические параметры projectile template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileBody {
    /// Радиус ball collider (метры)
    pub radius: f32,
    /// Масса (кг)
    pub mass: f32,
}

impl Default for ProjectileBody {
    fn default() -> Self {
        Self {
            radius: 0.05,
            mass: 0.5,
        }
    }
}

/// Registry физики для `spawn_body` (неизвестный template = `ProjectileBody::default()`)
#[derive(Resource, Debug, Clone, Default)]
pub struct ProjectileTemplates {
    bodies: HashMap<TemplateId, ProjectileBody>,
}

impl ProjectileTemplates {
    pub fn with(mut self, template: impl Into<TemplateId>, body: ProjectileBody) -> Self {
        self.bodies.insert(template.into(), body);
        self
    }

    pub fn insert(&mut self, template: impl Into<TemplateId>, body: ProjectileBody) {
        self.bodies.insert(template.into(), body);
    }

    pub fn get(&self, template: &TemplateId) -> ProjectileBody {
        self.bodies.get(template).copied().unwrap_or_default()
    }
}
