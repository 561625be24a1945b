use serde::{Deserialize, Serialize};

use stockbook_core::ZoneId;

/// A warehouse storage zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    /// Fixed accessibility rank; lower = more accessible.
    pub accessibility_rank: u32,
    /// Number of product slots the zone can hold.
    pub capacity: usize,
}

impl Zone {
    pub fn new(id: impl Into<ZoneId>, accessibility_rank: u32, capacity: usize) -> Self {
        Self {
            id: id.into(),
            accessibility_rank,
            capacity,
        }
    }
}
