//! Regions and products.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::{fetch_json, StoreClient};
use crate::error::DataResult;

/// Store status that hides a seller's products.
pub const SUSPENDED_STATUS: &str = "SUSPENDED";

/// A country inside a region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, lowercase.
    pub iso_2: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
}

/// A pricing/shipping region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    /// Region id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Currency of the region.
    pub currency_code: Option<String>,
    /// Countries served by the region.
    pub countries: Option<Vec<Country>>,
}

impl Region {
    /// Returns the non-empty country codes of the region.
    pub fn country_codes(&self) -> impl Iterator<Item = &str> {
        self.countries
            .iter()
            .flatten()
            .filter_map(|country| country.iso_2.as_deref())
            .filter(|code| !code.is_empty())
    }

    /// Returns true if the region serves `country_code` (case-insensitive).
    #[must_use]
    pub fn serves(&self, country_code: &str) -> bool {
        self.country_codes()
            .any(|code| code.eq_ignore_ascii_case(country_code))
    }
}

/// Price of a variant in the requested region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatedPrice {
    /// Final amount, if the variant is priced in the region.
    pub calculated_amount: Option<f64>,
    /// Currency of the amount.
    pub currency_code: Option<String>,
}

/// A purchasable variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    /// Variant id.
    pub id: String,
    /// Price in the requested region.
    pub calculated_price: Option<CalculatedPrice>,
}

/// The seller attached to a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductSeller {
    /// Seller id.
    pub id: String,
    /// Store status, e.g. `ACTIVE` or `SUSPENDED`.
    pub store_status: Option<String>,
}

/// A catalog product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Product id.
    pub id: String,
    /// Title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// Variants with region prices.
    pub variants: Vec<Variant>,
    /// Owning seller.
    pub seller: Option<ProductSeller>,
}

impl Product {
    /// Returns true if at least one variant has a price in the region.
    #[must_use]
    pub fn has_price(&self) -> bool {
        self.variants.iter().any(|variant| {
            variant
                .calculated_price
                .as_ref()
                .and_then(|price| price.calculated_amount)
                .is_some()
        })
    }

    /// Returns true if the product's seller is not suspended.
    #[must_use]
    pub fn seller_active(&self) -> bool {
        self.seller
            .as_ref()
            .and_then(|seller| seller.store_status.as_deref())
            .map_or(true, |status| !status.eq_ignore_ascii_case(SUSPENDED_STATUS))
    }

    /// Returns true if the product can be shown in a listing.
    #[must_use]
    pub fn is_listable(&self) -> bool {
        self.has_price() && self.seller_active()
    }
}

/// One page of products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPage {
    /// Products that can be listed.
    pub products: Vec<Product>,
    /// Total count reported by the backend, before filtering.
    pub count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RegionsEnvelope {
    regions: Vec<Region>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProductsEnvelope {
    products: Vec<Product>,
    count: u64,
}

/// Lists every region.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached or answers garbage.
pub fn list_regions<C>(client: &C) -> DataResult<Vec<Region>>
where
    C: StoreClient + ?Sized,
{
    let envelope: RegionsEnvelope = fetch_json(client, "/store/regions", &[])?;
    debug!(regions = envelope.regions.len(), "regions loaded");
    Ok(envelope.regions)
}

/// Finds the region serving a country code.
///
/// Lookup failures are logged and reported as "no region".
pub fn region_for_country<C>(client: &C, country_code: &str) -> Option<Region>
where
    C: StoreClient + ?Sized,
{
    match list_regions(client) {
        Ok(regions) => regions.into_iter().find(|region| region.serves(country_code)),
        Err(err) => {
            warn!(country_code, error = %err, "region lookup failed");
            None
        }
    }
}

/// Lists products priced in the region serving `country_code`.
///
/// Products without a price there, or whose seller is suspended, are
/// filtered out; `count` keeps the backend's unfiltered total. A country
/// with no region yields an empty page.
///
/// # Errors
///
/// Returns an error if the product request fails.
pub fn list_products<C>(client: &C, country_code: &str, limit: u32) -> DataResult<ProductPage>
where
    C: StoreClient + ?Sized,
{
    let Some(region) = region_for_country(client, country_code) else {
        debug!(country_code, "no region for country, empty product page");
        return Ok(ProductPage::default());
    };

    let query = [
        ("region_id", region.id.clone()),
        ("country_code", country_code.to_ascii_lowercase()),
        ("limit", limit.to_string()),
        ("fields", "*variants.calculated_price,*seller".to_owned()),
    ];
    let envelope: ProductsEnvelope = fetch_json(client, "/store/products", &query)?;

    let products: Vec<Product> = envelope
        .products
        .into_iter()
        .filter(Product::is_listable)
        .collect();
    debug!(
        country_code,
        raw = envelope.count,
        listable = products.len(),
        "products loaded"
    );

    Ok(ProductPage {
        products,
        count: envelope.count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(amount: Option<f64>) -> Variant {
        Variant {
            id: "v".into(),
            calculated_price: Some(CalculatedPrice {
                calculated_amount: amount,
                currency_code: Some("nok".into()),
            }),
        }
    }

    #[test]
    fn test_listable_requires_price_and_active_seller() {
        let mut product = Product {
            variants: vec![priced(None), priced(Some(199.0))],
            ..Product::default()
        };
        assert!(product.is_listable());

        product.seller = Some(ProductSeller {
            id: "sel".into(),
            store_status: Some("suspended".into()),
        });
        assert!(!product.is_listable());

        let unpriced = Product {
            variants: vec![priced(None)],
            ..Product::default()
        };
        assert!(!unpriced.is_listable());
    }

    #[test]
    fn test_region_serves_case_insensitive() {
        let region = Region {
            id: "reg_no".into(),
            name: "Norge".into(),
            currency_code: Some("nok".into()),
            countries: Some(vec![
                Country {
                    iso_2: Some("no".into()),
                    display_name: None,
                },
                Country::default(),
            ]),
        };

        assert!(region.serves("NO"));
        assert!(!region.serves("se"));
        assert_eq!(region.country_codes().collect::<Vec<_>>(), vec!["no"]);
    }
}
