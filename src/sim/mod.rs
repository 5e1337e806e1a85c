//! Deterministic belt simulation
//!
//! All belt logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Driven by an external clock (`tick`) and display timer
//! - No rendering or platform dependencies

pub mod prize;
pub mod state;
pub mod tick;

pub use prize::{Prize, PrizeSelector, PrizeTable};
pub use state::{BeltController, BeltObject, ObjectState, RunState};
pub use tick::BeltEvent;
