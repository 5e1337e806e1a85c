//! Construction-time errors.
//!
//! Both variants are raised only while building a component and are fatal to
//! construction. Every runtime operation is total over its state space and
//! degrades to a no-op instead of failing.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BeltError {
    /// The prize table is empty or carries a non-positive weight.
    #[error("invalid prize table: {0}")]
    InvalidTable(String),

    /// A belt parameter would stall the belt or spawn without bound.
    #[error("invalid belt config: {0}")]
    InvalidConfig(String),
}
