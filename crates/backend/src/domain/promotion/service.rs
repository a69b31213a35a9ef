//! Business operations on promotions: query resolution, deactivation and
//! sample data seeding.

use chrono::{Duration, Local};
use contracts::promotion::Promotion;
use serde::Deserialize;

use super::repository::PromotionRepository;
use crate::error::ServiceError;

/// Optional list filters as they arrive on the query string.
///
/// Values stay raw strings so parse failures keep their documented
/// behavior: an unparseable `id` resolves to an empty list, while bad
/// `product_id` or `active` values are a 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFilters {
    pub id: Option<String>,
    pub name: Option<String>,
    pub product_id: Option<String>,
    pub promotion_type: Option<String>,
    pub active: Option<String>,
}

fn present(param: &Option<String>) -> Option<&str> {
    param.as_deref().filter(|value| !value.is_empty())
}

/// Resolve a list request to exactly one filter.
///
/// The checks form a fixed priority ladder: `id`, `name`, `product_id`,
/// `promotion_type`, `active`. The first present parameter wins and every
/// lower one is silently ignored; with none present the whole table is
/// returned. The ladder is an explicit check list on purpose, so the
/// priority stays deterministic.
pub async fn list(
    repo: &PromotionRepository,
    filters: &ListFilters,
) -> Result<Vec<Promotion>, ServiceError> {
    if let Some(raw) = present(&filters.id) {
        // An id that does not parse matches nothing rather than failing.
        return Ok(match raw.trim().parse::<i32>() {
            Ok(id) => repo.find_by_id(id).await?.into_iter().collect(),
            Err(_) => Vec::new(),
        });
    }
    if let Some(name) = present(&filters.name) {
        return repo.find_by_name(name.trim()).await;
    }
    if let Some(raw) = present(&filters.product_id) {
        let product_id = raw.trim().parse::<i32>().map_err(|_| {
            ServiceError::UnsupportedInput(format!(
                "Invalid value for query parameter 'product_id': {raw}"
            ))
        })?;
        return repo.find_by_product_id(product_id).await;
    }
    if let Some(promotion_type) = present(&filters.promotion_type) {
        return repo.find_by_promotion_type(promotion_type.trim()).await;
    }
    if let Some(raw) = present(&filters.active) {
        let today = Local::now().date_naive();
        return match parse_bool_strict(raw) {
            Some(true) => repo.find_active(today).await,
            Some(false) => repo.find_inactive(today).await,
            None => Err(ServiceError::UnsupportedInput(format!(
                "Invalid value for query parameter 'active'. \
                 Accepted: true, false, 1, 0, yes, no (case-insensitive). \
                 Received: '{raw}'"
            ))),
        };
    }
    repo.find_all().await
}

/// Strict query-string boolean: `true/1/yes` and `false/0/no`,
/// case-insensitive and trimmed. Anything else is `None`.
fn parse_bool_strict(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// End a promotion early by pulling `end_date` back to yesterday.
///
/// Never extends a promotion that already ended before yesterday. The
/// transition is one-way: reactivation is an ordinary full update with new
/// dates.
pub async fn deactivate(repo: &PromotionRepository, id: i32) -> Result<Promotion, ServiceError> {
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound(id))?;
    let yesterday = Local::now().date_naive() - Duration::days(1);
    let new_end = existing.end_date.min(yesterday);
    repo.set_end_date(id, new_end).await
}

/// Seed the sample promotions used for manual testing: a mix of PERCENT,
/// DISCOUNT and BOGO campaigns plus already-expired rows for the inactive
/// filter. Returns the number of rows created.
pub async fn insert_test_data(repo: &PromotionRepository) -> Result<usize, ServiceError> {
    let today = Local::now().date_naive();
    let samples: &[(&str, &str, i32, i32, i64, i64)] = &[
        ("Summer Sale 20% Off", "PERCENT", 20, 101, 0, 30),
        ("Black Friday 50% Discount", "PERCENT", 50, 102, 0, 7),
        ("Winter Clearance 30% Off", "PERCENT", 30, 103, -10, 20),
        ("Holiday Special $10 Off", "DISCOUNT", 10, 201, 0, 15),
        ("Flash Sale $5 Off", "DISCOUNT", 5, 203, 0, 3),
        ("Buy One Get One Free", "BOGO", 1, 301, 0, 14),
        ("Weekend BOGO Special", "BOGO", 1, 303, -5, 2),
        ("Expired Spring Sale", "PERCENT", 25, 401, -60, -30),
        ("Past Holiday Discount", "DISCOUNT", 15, 402, -45, -15),
    ];

    let mut created = 0;
    for (name, promotion_type, value, product_id, start_offset, end_offset) in samples {
        let promotion = Promotion {
            id: None,
            name: (*name).to_string(),
            promotion_type: (*promotion_type).to_string(),
            value: *value,
            product_id: *product_id,
            start_date: today + Duration::days(*start_offset),
            end_date: today + Duration::days(*end_offset),
        };
        repo.create(&promotion).await?;
        created += 1;
        tracing::info!("Created: {name} ({promotion_type})");
    }
    tracing::info!("Loaded {created} promotions into the database");
    Ok(created)
}
