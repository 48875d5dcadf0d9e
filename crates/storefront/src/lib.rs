//! # Storefront
//!
//! Wires the data helpers to the widgets: the hero section shows a rotating
//! ticker of seller names fetched from the backend.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

use storefront_data::{list_seller_names, StoreClient};
use storefront_ui::TickerConfig;
use tracing::info;

pub use storefront_data;
pub use storefront_ui;

/// Builds the hero ticker configuration from the backend's seller names.
///
/// Timings and presentation come from `base`; its labels are replaced. If
/// the backend has no sellers (or is down) the ticker falls back to `base`'s
/// placeholder.
pub fn hero_ticker_config<C>(client: &C, base: TickerConfig) -> TickerConfig
where
    C: StoreClient + ?Sized,
{
    let names = list_seller_names(client);
    info!(sellers = names.len(), "hero ticker labels loaded");
    TickerConfig {
        labels: names,
        ..base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_data::InMemoryStore;
    use storefront_ui::ticker::DEFAULT_PLACEHOLDER;

    #[test]
    fn test_seller_names_become_labels() {
        let store = InMemoryStore::new()
            .with_json("/store/seller", r#"{"sellers":[{"name":"Acme"},{"name":" Globex"}]}"#);

        let config = hero_ticker_config(&store, TickerConfig::default().with_hold_ms(1_000));

        assert_eq!(config.labels, vec!["Acme", "Globex"]);
        assert_eq!(config.hold_duration_ms, 1_000);
    }

    #[test]
    fn test_backend_down_shows_placeholder() {
        let store = InMemoryStore::new().with_unreachable("/store/seller", "refused");

        let config = hero_ticker_config(&store, TickerConfig::new(["stale"]));

        assert!(config.labels.is_empty());
        assert_eq!(config.normalized_labels(), vec![DEFAULT_PLACEHOLDER]);
    }
}
