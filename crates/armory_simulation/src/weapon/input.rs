//! Per-frame inputs ядра (поллятся один раз за frame)

pub trait InputSource {
    fn is_fire_requested(&self) -> bool;
}

pub trait PauseState {
    fn is_paused(&self) -> bool;
}

/// Время frame'а: абсолютное `now` и шаг `dt` (секунды)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    pub now: f32,
    pub dt: f32,
}

impl FrameTime {
    pub fn new(now: f32, dt: f32) -> Self {
        Self { now, dt }
    }
}
