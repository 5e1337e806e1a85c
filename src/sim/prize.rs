//! Weighted prize selection.
//!
//! A fixed table of prizes with relative weights, and a selector that turns
//! one uniform draw into one prize. The table is built once and never
//! mutated, so selection is a read-only scan over precomputed running sums.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::BeltError;

/// A single prize entry: a display label and its relative likelihood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    pub name: String,
    /// Relative selection weight, must be positive. Weights do not need to
    /// sum to anything in particular.
    pub weight: f64,
}

impl Prize {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Immutable prize table with precomputed cumulative weights.
///
/// Order is irrelevant to the outcome; it only fixes the cumulative-sum
/// construction and the tie-break in tests.
#[derive(Debug, Clone)]
pub struct PrizeTable {
    prizes: Vec<Prize>,
    total_weight: f64,
    cumulative: Vec<f64>,
}

impl PrizeTable {
    /// Build a table, computing `total_weight` and the running sums once.
    ///
    /// Fails with [`BeltError::InvalidTable`] when the table is empty or any
    /// weight is not strictly positive (NaN included).
    pub fn new(prizes: Vec<Prize>) -> Result<Self, BeltError> {
        if prizes.is_empty() {
            return Err(BeltError::InvalidTable("table is empty".into()));
        }
        for prize in &prizes {
            if !(prize.weight > 0.0) {
                return Err(BeltError::InvalidTable(format!(
                    "prize '{}' has non-positive weight {}",
                    prize.name, prize.weight
                )));
            }
        }

        let mut cumulative = Vec::with_capacity(prizes.len());
        let mut total = 0.0;
        for prize in &prizes {
            total += prize.weight;
            cumulative.push(total);
        }

        Ok(Self {
            prizes,
            total_weight: total,
            cumulative,
        })
    }

    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }
}

/// Draws one prize per activation from a fixed [`PrizeTable`].
///
/// Stateless apart from the table: `choose` takes the RNG by argument, so
/// the selector itself is freely shareable across threads.
#[derive(Debug, Clone)]
pub struct PrizeSelector {
    table: PrizeTable,
}

impl PrizeSelector {
    pub fn new(prizes: Vec<Prize>) -> Result<Self, BeltError> {
        Ok(Self {
            table: PrizeTable::new(prizes)?,
        })
    }

    pub fn from_table(table: PrizeTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PrizeTable {
        &self.table
    }

    /// Draw a uniform value in `[0, total_weight)` and resolve it to a prize.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &Prize {
        let draw = rng.random_range(0.0..self.table.total_weight);
        self.pick(draw)
    }

    /// Resolve a draw value: the first prize whose cumulative weight
    /// strictly exceeds `draw`. Split out so tests can feed exact values.
    ///
    /// If rounding leaves no cumulative weight above `draw` (a draw right at
    /// the total), the last prize is the defined fallback, not an error.
    fn pick(&self, draw: f64) -> &Prize {
        for (i, &cum) in self.table.cumulative.iter().enumerate() {
            if cum > draw {
                return &self.table.prizes[i];
            }
        }
        &self.table.prizes[self.table.prizes.len() - 1]
    }
}
