use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A universally unique identifier for a geometry produced by inference.
/// We wrap Uuid to ensure strong typing, so a geometry id cannot be confused
/// with any other uuid handed over by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a deterministic ID based on a string seed (e.g. "curve-3/edge-0").
    /// Re-running inference over the same input must yield the same ids.
    pub fn new_deterministic(seed: &str) -> Self {
        let uuid = Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes());
        Self(uuid)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
