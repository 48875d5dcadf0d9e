//! Seller lookups.
//!
//! Both helpers swallow backend failures: a seller page or a hero ticker
//! should degrade to "nothing to show", not to an error page. Failures are
//! logged at `warn`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::{fetch_json, StoreClient};

/// Fields requested on top of the default seller projection.
pub const SELLER_FIELDS: &str = "+created_at,+email,+reviews.seller.name,+reviews.rating,\
+reviews.customer_note,+reviews.seller_note,+reviews.created_at,+reviews.updated_at,\
+reviews.customer.first_name,+reviews.customer.last_name";

/// Page size of the seller-name listing.
pub const SELLER_NAME_LIMIT: u32 = 200;

/// Customer who wrote a review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewCustomer {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
}

/// Seller a review is about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSeller {
    /// Seller display name.
    pub name: Option<String>,
}

/// A customer review of a seller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    /// Review id.
    pub id: String,
    /// Star rating.
    pub rating: Option<f32>,
    /// What the customer wrote.
    pub customer_note: Option<String>,
    /// The seller's reply.
    pub seller_note: Option<String>,
    /// ISO-8601 creation time.
    pub created_at: String,
    /// ISO-8601 last update time.
    pub updated_at: Option<String>,
    /// Review author.
    pub customer: Option<ReviewCustomer>,
    /// Reviewed seller.
    pub seller: Option<ReviewSeller>,
}

/// A seller with its reviews, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Seller {
    /// Seller id.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// ISO-8601 creation time.
    pub created_at: Option<String>,
    /// Reviews, nulls removed, newest first.
    pub reviews: Vec<Review>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SellerRecord {
    id: String,
    handle: String,
    name: String,
    email: Option<String>,
    description: Option<String>,
    created_at: Option<String>,
    reviews: Option<Vec<Option<Review>>>,
}

#[derive(Debug, Deserialize)]
struct SellerEnvelope {
    seller: SellerRecord,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SellerName {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SellerNamesEnvelope {
    sellers: Option<Vec<Option<SellerName>>>,
}

impl From<SellerRecord> for Seller {
    fn from(record: SellerRecord) -> Self {
        Self {
            id: record.id,
            handle: record.handle,
            name: record.name,
            email: record.email,
            description: record.description,
            created_at: record.created_at,
            reviews: newest_first(record.reviews.unwrap_or_default()),
        }
    }
}

/// Drops null reviews and orders the rest by creation time, newest first.
///
/// Timestamps compare as strings, which orders ISO-8601 correctly. Ties
/// keep their original order.
#[must_use]
pub fn newest_first(reviews: Vec<Option<Review>>) -> Vec<Review> {
    let mut reviews: Vec<Review> = reviews.into_iter().flatten().collect();
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    reviews
}

/// Looks up a seller by handle.
///
/// Returns `None` if the seller cannot be fetched or decoded.
pub fn get_seller_by_handle<C>(client: &C, handle: &str) -> Option<Seller>
where
    C: StoreClient + ?Sized,
{
    let path = format!("/store/seller/{handle}");
    match fetch_json::<SellerEnvelope, _>(client, &path, &[("fields", SELLER_FIELDS.to_owned())]) {
        Ok(envelope) => {
            let seller = Seller::from(envelope.seller);
            debug!(handle, reviews = seller.reviews.len(), "seller loaded");
            Some(seller)
        }
        Err(err) => {
            warn!(handle, error = %err, "seller lookup failed");
            None
        }
    }
}

/// Lists the display names of all sellers (first page of
/// [`SELLER_NAME_LIMIT`]), trimmed, blanks removed, backend order kept.
///
/// Returns an empty list if the backend cannot be reached.
pub fn list_seller_names<C>(client: &C) -> Vec<String>
where
    C: StoreClient + ?Sized,
{
    let query = [
        ("fields", "name".to_owned()),
        ("limit", SELLER_NAME_LIMIT.to_string()),
    ];
    match fetch_json::<SellerNamesEnvelope, _>(client, "/store/seller", &query) {
        Ok(envelope) => envelope
            .sellers
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(|seller| seller.name)
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .collect(),
        Err(err) => {
            warn!(error = %err, "seller name listing failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: &str, created_at: &str) -> Option<Review> {
        Some(Review {
            id: id.to_owned(),
            created_at: created_at.to_owned(),
            ..Review::default()
        })
    }

    #[test]
    fn test_newest_first_drops_nulls() {
        let sorted = newest_first(vec![
            review("a", "2024-01-01T00:00:00Z"),
            None,
            review("b", "2024-03-01T00:00:00Z"),
            review("c", "2024-02-01T00:00:00Z"),
        ]);

        let ids: Vec<&str> = sorted.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_newest_first_is_stable_on_ties() {
        let sorted = newest_first(vec![
            review("first", "2024-01-01T00:00:00Z"),
            review("second", "2024-01-01T00:00:00Z"),
        ]);

        assert_eq!(sorted[0].id, "first");
        assert_eq!(sorted[1].id, "second");
    }
}
