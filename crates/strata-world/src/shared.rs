use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::biome::BiomeSet;

/// Process-wide handle to the compiled [`BiomeSet`].
///
/// The set is published exactly once after compilation; workers then take
/// `Arc` clones and read it without further locking. `teardown` drops the
/// handle's reference at shutdown; clones already handed out stay valid.
#[derive(Default)]
pub struct SharedBiomes {
    slot: Mutex<Option<Arc<BiomeSet>>>,
}

impl SharedBiomes {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<BiomeSet>>> {
        // The guarded value is only ever swapped whole, so a poisoned lock still holds a valid state.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publishes `set`. Returns it back if a set is already published.
    pub fn publish(&self, set: BiomeSet) -> Result<Arc<BiomeSet>, BiomeSet> {
        let mut slot = self.lock();
        if slot.is_some() {
            return Err(set);
        }
        let set = Arc::new(set);
        *slot = Some(Arc::clone(&set));
        log::debug!("published {} biomes", set.len());
        Ok(set)
    }

    pub fn get(&self) -> Option<Arc<BiomeSet>> {
        self.lock().clone()
    }

    pub fn is_published(&self) -> bool {
        self.lock().is_some()
    }

    /// Releases the published set, returning the handle's reference.
    pub fn teardown(&self) -> Option<Arc<BiomeSet>> {
        let taken = self.lock().take();
        if taken.is_some() {
            log::debug!("biome set torn down");
        }
        taken
    }
}
