//! Transport representation of a promotion.
//!
//! The wire shape is exactly the seven public fields; the repository's
//! audit timestamps are never exposed.

use serde_json::{json, Value};

use super::entity::Promotion;

impl Promotion {
    /// Serialize to the request/response body mapping.
    ///
    /// Inverse of [`validate_and_build`](super::validate_and_build): a valid
    /// entity round-trips through its transport form with all six data
    /// fields intact.
    pub fn to_transport(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "promotion_type": self.promotion_type,
            "value": self.value,
            "product_id": self.product_id,
            "start_date": self.start_date.format("%Y-%m-%d").to_string(),
            "end_date": self.end_date.format("%Y-%m-%d").to_string(),
        })
    }
}
