//! Per-slot thumbnail loading with cancel-on-reuse semantics
//!
//! A slot is one mutable display cell the presentation layer owns (a table
//! row's image view, the detail artwork). Each slot carries a token that is
//! bumped whenever the slot is rebound to a new URL or released; a
//! completing download applies its decoded image only if its captured
//! token is still the slot's live token. Out-of-order completions can
//! therefore never put item A's artwork into a slot item B has taken.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use image::DynamicImage;
use tokio::task::JoinHandle;

use crate::fetch::{FetchError, Fetcher};

/// Opaque slot identifier owned by the presentation layer (row index, cell
/// identity)
pub type SlotId = usize;

/// Identifies one scheduled load; a superseded handle is permanently inert
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageLoadHandle {
    pub slot: SlotId,
    pub token: u64,
}

/// Starts, supersedes and tears down thumbnail downloads per display slot
pub struct ImageLoadManager {
    fetcher: Arc<dyn Fetcher>,
    slots: Arc<Mutex<HashMap<SlotId, Slot>>>,
}

#[derive(Default)]
struct Slot {
    token: u64,
    task: Option<JoinHandle<()>>,
    image: Option<Arc<DynamicImage>>,
}

/// Critical sections under this lock never panic, so a poisoned lock can
/// only mean an aborted task; recover the guard instead of unwrapping.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ImageLoadManager {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Bind the slot to a new image source, superseding any load still in
    /// flight for it
    ///
    /// Returns after spawning the download. Must be called on a Tokio
    /// runtime.
    pub fn load(&self, slot_id: SlotId, url: &str) -> ImageLoadHandle {
        let mut slots = lock(&self.slots);
        let slot = slots.entry(slot_id).or_default();
        slot.token += 1;
        let token = slot.token;

        if let Some(task) = slot.task.take() {
            // Best-effort: the token check is what actually keeps a
            // completion that slips through from applying.
            task.abort();
        }

        tracing::debug!(slot_id, token, url, "Loading slot image");

        let url = url.to_string();
        let fetcher = self.fetcher.clone();
        let slots_ref = self.slots.clone();
        slot.task = Some(tokio::spawn(async move {
            let result = fetcher.fetch(&url).await;
            apply_completion(&slots_ref, slot_id, token, result);
        }));

        ImageLoadHandle {
            slot: slot_id,
            token,
        }
    }

    /// Tear down a slot: any outstanding download becomes permanently
    /// inert and its transport handle is dropped. The thumbnail does not
    /// outlive its slot.
    pub fn release(&self, slot_id: SlotId) {
        let mut slots = lock(&self.slots);
        if let Some(slot) = slots.get_mut(&slot_id) {
            slot.token += 1;
            if let Some(task) = slot.task.take() {
                task.abort();
            }
            slot.image = None;
            tracing::debug!(slot_id, "Released slot");
        }
    }

    /// The slot's current image, if a matching download has completed
    pub fn image(&self, slot_id: SlotId) -> Option<Arc<DynamicImage>> {
        lock(&self.slots).get(&slot_id).and_then(|slot| slot.image.clone())
    }
}

/// Apply one download completion to its slot, unless it is stale
fn apply_completion(
    slots: &Mutex<HashMap<SlotId, Slot>>,
    slot_id: SlotId,
    token: u64,
    result: Result<Vec<u8>, FetchError>,
) {
    let bytes = match result {
        Ok(bytes) => bytes,
        Err(e) => {
            // The slot keeps whatever image it already shows.
            tracing::debug!(slot_id, token, error = %e, "Image fetch failed");
            return;
        }
    };

    // Decode outside the lock; only the apply needs exclusivity.
    let decoded = match image::load_from_memory(&bytes) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!(slot_id, token, error = %e, "Image decode failed");
            return;
        }
    };

    let mut slots = lock(slots);
    let Some(slot) = slots.get_mut(&slot_id) else {
        return;
    };
    if slot.token != token {
        tracing::debug!(
            slot_id,
            token,
            current = slot.token,
            "Discarding stale image completion"
        );
        return;
    }
    slot.task = None;
    slot.image = Some(Arc::new(decoded));
}
