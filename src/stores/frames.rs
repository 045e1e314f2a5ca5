use crossbeam_skiplist::SkipMap;

use crate::{
    samples::{Frame, InstructionPointer},
    stores::FrameStore,
};

/// A lock-free cache of resolved frames, keyed by instruction pointer.
///
/// Symbolization happens elsewhere (e.g. when the runtime reports a JIT-compiled method); the
/// result is inserted here and every later lookup of the same address is a map read.
#[derive(Default)]
pub struct FrameCache {
    frames: SkipMap<InstructionPointer, Frame>,
}

impl FrameCache {
    /// Creates an empty cache
    #[must_use]
    pub fn new() -> Self {
        FrameCache {
            frames: SkipMap::new(),
        }
    }

    /// Stores the frame resolved for `ip`, replacing any previous one
    pub fn insert(&self, ip: InstructionPointer, frame: Frame) {
        self.frames.insert(ip, frame);
    }

    /// Forgets the frame of `ip`, e.g. after the code was unloaded
    pub fn remove(&self, ip: InstructionPointer) {
        self.frames.remove(&ip);
    }

    /// Returns the number of cached frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no frame is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameStore for FrameCache {
    fn resolve(&self, ip: InstructionPointer) -> Option<Frame> {
        self.frames.get(&ip).map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let cache = FrameCache::new();
        assert!(cache.is_empty());

        cache.insert(0x1000, Frame::new("App.dll", "Program.Main"));
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.resolve(0x1000),
            Some(Frame::new("App.dll", "Program.Main"))
        );
        assert!(cache.resolve(0x2000).is_none());

        cache.remove(0x1000);
        assert!(cache.resolve(0x1000).is_none());
    }
}
