use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cleared when the owning screen unmounts; async completions check it
/// before touching state.
#[derive(Debug, Clone)]
pub struct MountedFlag {
    mounted: Arc<AtomicBool>,
}

impl MountedFlag {
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}

impl Default for MountedFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_unmount() {
        let flag = MountedFlag::new();
        let task_copy = flag.clone();
        assert!(task_copy.is_mounted());
        flag.unmount();
        assert!(!task_copy.is_mounted());
    }
}
