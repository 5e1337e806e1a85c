//! Belt state: objects, run state, and the controller that owns them.
//!
//! All mutable state of one belt instance lives in [`BeltController`]; there
//! are no module-level flags or singletons. The live object collection is an
//! id-keyed arena with O(1) swap-removal, so tick cost stays bounded as the
//! belt population grows.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::prize::{Prize, PrizeSelector};
use crate::config::BeltConfig;
use crate::error::BeltError;

/// Lifecycle state of a single belt object.
///
/// `Traveling -> Resolving -> Removed`, or `Traveling -> Removed` directly
/// when the object exits the visible span. `Removed` is terminal; the object
/// is discarded, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectState {
    /// Moving along the belt, eligible for activation.
    Traveling,
    /// Activated; a prize has been drawn and the display window is open.
    Resolving,
    /// Evicted from the belt.
    Removed,
}

/// Whether the belt advances on tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    Paused,
}

/// A box on the belt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeltObject {
    /// Unique within the controller's lifetime.
    pub id: u32,
    /// Scalar offset along the belt axis, in pixels.
    pub position: f32,
    pub state: ObjectState,
}

/// Live objects keyed by id, with O(1) removal via swap-remove.
#[derive(Debug, Default)]
pub(crate) struct ObjectArena {
    slots: Vec<BeltObject>,
    index: FxHashMap<u32, usize>,
}

impl ObjectArena {
    pub fn insert(&mut self, object: BeltObject) {
        self.index.insert(object.id, self.slots.len());
        self.slots.push(object);
    }

    pub fn get(&self, id: u32) -> Option<&BeltObject> {
        self.index.get(&id).map(|&slot| &self.slots[slot])
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut BeltObject> {
        self.index.get(&id).map(|&slot| &mut self.slots[slot])
    }

    /// Swap-remove by id, fixing up the index of the slot that moved.
    pub fn remove(&mut self, id: u32) -> Option<BeltObject> {
        let slot = self.index.remove(&id)?;
        let object = self.slots.swap_remove(slot);
        if let Some(moved) = self.slots.get(slot) {
            self.index.insert(moved.id, slot);
        }
        Some(object)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BeltObject> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut BeltObject> {
        self.slots.iter_mut()
    }
}

/// Owns the belt's run state, the live objects, and the prize selector.
///
/// Single-threaded and cooperative: an external per-frame clock drives
/// [`tick`](BeltController::tick), an external display timer drives
/// [`on_display_window_elapsed`](BeltController::on_display_window_elapsed),
/// both from the same execution context. Nothing here blocks or suspends.
#[derive(Debug)]
pub struct BeltController {
    pub(crate) config: BeltConfig,
    pub(crate) selector: PrizeSelector,
    pub(crate) rng: Pcg32,
    pub(crate) run_state: RunState,
    pub(crate) objects: ObjectArena,
    /// Time of the last spawn; `None` until the first tick, which always
    /// spawns.
    pub(crate) last_spawn_ms: Option<u64>,
    /// Id of the object currently `Resolving`, if any. At most one at a
    /// time; this is the pending half of the two-phase resolution protocol.
    pub(crate) pending: Option<u32>,
    next_id: u32,
}

impl BeltController {
    /// Build a controller from a prize table, config, and RNG seed.
    ///
    /// Validates both inputs up front; a half-built controller is never
    /// handed out.
    pub fn new(prizes: Vec<Prize>, config: BeltConfig, seed: u64) -> Result<Self, BeltError> {
        config.validate()?;
        let selector = PrizeSelector::new(prizes)?;
        Ok(Self {
            config,
            selector,
            rng: Pcg32::seed_from_u64(seed),
            run_state: RunState::Running,
            objects: ObjectArena::default(),
            last_spawn_ms: None,
            pending: None,
            next_id: 1,
        })
    }

    /// Allocate a new object id. Ids are never reused.
    pub(crate) fn next_object_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn config(&self) -> &BeltConfig {
        &self.config
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Number of live objects on the belt.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterate over live objects. Order is unspecified.
    pub fn objects(&self) -> impl Iterator<Item = &BeltObject> {
        self.objects.iter()
    }

    pub fn object(&self, id: u32) -> Option<&BeltObject> {
        self.objects.get(id)
    }

    /// Id of the object awaiting `on_display_window_elapsed`, if any.
    pub fn pending_resolution(&self) -> Option<u32> {
        self.pending
    }
}
