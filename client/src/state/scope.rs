use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Lifetime of one screen. Clones share the flag, so the navigation layer can
/// dismiss a screen while one of its requests is still outstanding.
#[derive(Debug, Clone)]
pub struct ScreenScope {
    active: Arc<AtomicBool>,
}

impl ScreenScope {
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn dismiss(&self) {
        self.active.store(false, Ordering::Release);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Default for ScreenScope {
    fn default() -> Self {
        Self::new()
    }
}
