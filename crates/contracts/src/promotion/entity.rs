use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A promotional campaign applied to a single product.
///
/// `id` is assigned by the repository on create and is never supplied by
/// callers. Audit timestamps (`created_at`, `last_updated`) live only in the
/// persistence model and are not part of the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: Option<i32>,
    pub name: String,
    pub promotion_type: String,
    pub value: i32,
    pub product_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Promotion {
    /// Whether the promotion is active on the given date.
    ///
    /// The active window is the inclusive range `[start_date, end_date]`;
    /// there is no stored activity flag.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}
