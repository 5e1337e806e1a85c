//! Prize Belt - deterministic core of an animated prize conveyor
//!
//! Boxes scroll across a belt, the player taps one, a weighted-random prize
//! is revealed, and the belt pauses until the reveal window closes. This
//! crate is the simulation core only; rendering, assets, and timers belong
//! to the host, which drives the core through three entry points
//! (`tick`, `activate`, `on_display_window_elapsed`) and draws from the
//! [`BeltEvent`] stream the core returns.
//!
//! Core modules:
//! - `sim`: deterministic simulation (prize selection, object lifecycle)
//! - `config`: construction-time belt configuration
//! - `error`: construction-time errors

pub mod config;
pub mod error;
pub mod sim;

pub use config::BeltConfig;
pub use error::BeltError;
pub use sim::{BeltController, BeltEvent, BeltObject, ObjectState, Prize, PrizeSelector, PrizeTable, RunState};
