use serde::Serialize;

use crate::error::{Result, SplitError};

/// A unit of work with a fixed weight (bytes for files).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item<H> {
    pub handle: H,
    pub weight: u64,
}

impl<H> Item<H> {
    pub fn new(handle: H, weight: u64) -> Self {
        Self { handle, weight }
    }

    /// Build an item from a signed size, rejecting negative weights.
    pub fn try_from_signed(handle: H, weight: i64) -> Result<Self> {
        let weight = u64::try_from(weight).map_err(|_| {
            SplitError::InvalidArgument(format!("negative weight {}", weight))
        })?;
        Ok(Self { handle, weight })
    }
}
