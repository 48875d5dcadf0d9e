//! # Storefront Data
//!
//! Read helpers over the commerce backend's store API.
//!
//! ## Design Principles
//!
//! 1. **One GET per helper** - transport lives behind [`StoreClient`]
//! 2. **Degrade, don't fail** - seller helpers return empty results on error
//! 3. **Diagnostics never abort** - each probe failure becomes a report row
//!
//! ## Example
//!
//! ```rust
//! use storefront_data::{list_seller_names, InMemoryStore};
//!
//! let store = InMemoryStore::new().with_json(
//!     "/store/seller",
//!     r#"{"sellers":[{"name":" Acme "},{"name":""},null,{"name":"Globex"}]}"#,
//! );
//!
//! assert_eq!(list_seller_names(&store), vec!["Acme", "Globex"]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pages;
pub mod seller;

pub use catalog::{list_products, list_regions, region_for_country, Product, ProductPage, Region};
pub use client::{fetch_json, InMemoryStore, StoreClient};
pub use config::BackendSettings;
pub use diagnostics::{collect_diagnostics, Diagnostics, ReportRow, ReportSection};
pub use error::{DataError, DataResult};
pub use pages::{all_products_page, product_status_metadata, ListingPage, PageMetadata};
pub use seller::{get_seller_by_handle, list_seller_names, Review, Seller};
