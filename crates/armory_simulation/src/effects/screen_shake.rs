//! Screen shake request contract
//!
//! Ядро только отправляет запрос; как service смешивает одновременные
//! запросы от нескольких оружий - его дело.

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakeRequest {
    pub duration: f32,
    pub distance: f32,
    pub speed: f32,
}

/// Process-wide shake sink, инжектится в оружие при активации
pub trait ScreenShakeService: Send + Sync {
    fn shake(&self, request: ShakeRequest);
}

/// Shake service, который копит запросы до следующего drain
///
/// ECS слой дренит очередь раз в frame и отдаёт запросы как события.
#[derive(Debug, Default)]
pub struct ScreenShakeQueue {
    pending: Mutex<Vec<ShakeRequest>>,
}

impl ScreenShakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<ShakeRequest> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.lock().map(|pending| pending.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ScreenShakeService for ScreenShakeQueue {
    fn shake(&self, request: ShakeRequest) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(request);
        }
    }
}
