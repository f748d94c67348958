use serde::{Deserialize, Serialize};

/// An order placed through the upstream checkout flow.
///
/// - `id` is unique across the history and is only used for duplicate
///   detection on ingest, never for lookup.
/// - `quantity` carries no validity constraint here: zero or negative
///   values pass through unchanged (checkout owns validation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub customer: u64,
    pub price: i64,
    pub quantity: i64,
}

/// Two orders are the same order iff their ids match, regardless of the
/// other fields.
impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Order {}
