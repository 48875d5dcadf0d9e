//! # Product-status diagnostics
//!
//! Answers "why are no products showing?" for a locale by running the three
//! reads a listing depends on, in order, and recording how each went:
//!
//! ```text
//! 1. regions         → count + country codes, or the error
//! 2. region(locale)  → found / not found
//! 3. products        → raw count + listable count, or the error
//! ```
//!
//! A failing step never aborts the report; it becomes a ✗ row.

use std::fmt::Write as _;

use tracing::info;

use crate::catalog::{list_products, list_regions, region_for_country};
use crate::client::StoreClient;
use crate::config::BackendSettings;

/// Products requested by the product probe.
pub const PRODUCT_PROBE_LIMIT: u32 = 100;

/// Outcome of the region listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionsProbe {
    /// Number of regions.
    pub count: usize,
    /// Country codes across all regions.
    pub countries: Vec<String>,
}

/// The region matched for the locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSummary {
    /// Region id.
    pub id: String,
    /// Region name (may be empty).
    pub name: String,
}

/// Outcome of the product listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductsProbe {
    /// Products that survive listing filters.
    pub listed: usize,
    /// Count reported by the backend.
    pub raw_count: u64,
}

/// Everything the product-status page reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    /// Locale (country code) taken from the URL.
    pub locale: String,
    /// Backend the storefront talks to.
    pub backend_url: String,
    /// Whether a publishable key is configured.
    pub publishable_key_set: bool,
    /// Region listing, or its error message.
    pub regions: Result<RegionsProbe, String>,
    /// Region serving the locale.
    pub region_for_locale: Option<RegionSummary>,
    /// Product listing, or its error message.
    pub products: Result<ProductsProbe, String>,
}

/// A labelled value with an optional pass/fail mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Row label.
    pub label: String,
    /// Row value.
    pub value: String,
    /// ✓ / ✗ mark; `None` for purely informational rows.
    pub ok: Option<bool>,
}

impl ReportRow {
    fn info(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            ok: None,
        }
    }

    fn check(label: impl Into<String>, value: impl Into<String>, ok: bool) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            ok: Some(ok),
        }
    }
}

/// A titled group of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    /// Section heading.
    pub title: String,
    /// Rows in display order.
    pub rows: Vec<ReportRow>,
    /// Explanatory footnote.
    pub note: Option<String>,
}

/// Runs the three probes for `locale`.
pub fn collect_diagnostics<C>(client: &C, settings: &BackendSettings, locale: &str) -> Diagnostics
where
    C: StoreClient + ?Sized,
{
    let regions = list_regions(client)
        .map(|regions| RegionsProbe {
            count: regions.len(),
            countries: regions
                .iter()
                .flat_map(|region| region.country_codes().map(str::to_owned))
                .collect(),
        })
        .map_err(|err| err.to_string());

    let region_for_locale = region_for_country(client, locale).map(|region| RegionSummary {
        id: region.id,
        name: region.name,
    });

    let products = list_products(client, locale, PRODUCT_PROBE_LIMIT)
        .map(|page| ProductsProbe {
            listed: page.products.len(),
            raw_count: page.count,
        })
        .map_err(|err| err.to_string());

    let diagnostics = Diagnostics {
        locale: locale.to_owned(),
        backend_url: settings.backend_url.clone(),
        publishable_key_set: settings.publishable_key_set(),
        regions,
        region_for_locale,
        products,
    };
    info!(
        locale,
        regions_ok = diagnostics.regions.is_ok(),
        region_found = diagnostics.region_for_locale.is_some(),
        products_listed = diagnostics.products_listed(),
        "product diagnostics collected"
    );
    diagnostics
}

impl Diagnostics {
    /// Number of listable products, zero on error.
    #[must_use]
    pub fn products_listed(&self) -> usize {
        self.products.as_ref().map_or(0, |probe| probe.listed)
    }

    /// Returns true if the listing would show something.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.products_listed() > 0
    }

    /// Builds the report sections.
    #[must_use]
    pub fn sections(&self) -> Vec<ReportSection> {
        let backend = ReportSection {
            title: "1. Backend og konfigurasjon".to_owned(),
            rows: vec![
                ReportRow::info("Backend URL", self.backend_url.clone()),
                ReportRow::check(
                    "Publishable key satt?",
                    if self.publishable_key_set { "Ja" } else { "Nei" },
                    self.publishable_key_set,
                ),
            ],
            note: None,
        };

        let countries = match &self.regions {
            Ok(probe) if !probe.countries.is_empty() => probe.countries.join(", "),
            _ => "Ingen (eller feil ved henting)".to_owned(),
        };
        let regions = ReportSection {
            title: "2. Regioner (land) i Medusa".to_owned(),
            rows: vec![
                ReportRow::check(
                    "Henting av regioner",
                    match &self.regions {
                        Ok(probe) => format!("{} region(er) hentet", probe.count),
                        Err(err) => format!("Feil: {err}"),
                    },
                    self.regions.is_ok(),
                ),
                ReportRow::info("Landkoder (iso_2)", countries),
            ],
            note: Some(
                "URL-en bruker første del som landkode (f.eks. /no/ → \"no\"). Den må finnes i listen over."
                    .to_owned(),
            ),
        };

        let region = ReportSection {
            title: "3. Region for din locale".to_owned(),
            rows: vec![ReportRow::check(
                format!("Region for \"{}\"", self.locale),
                match &self.region_for_locale {
                    Some(region) if !region.name.is_empty() => format!("Funnet: {}", region.name),
                    Some(region) => format!("Funnet: {}", region.id),
                    None => "Ikke funnet – bruk en URL med en landkode fra listen over (f.eks. /us/ eller /no/)"
                        .to_owned(),
                },
                self.region_for_locale.is_some(),
            )],
            note: None,
        };

        let products = ReportSection {
            title: "4. Produkter fra API".to_owned(),
            rows: vec![ReportRow::check(
                "Henting av produkter",
                match &self.products {
                    Ok(probe) => format!(
                        "Rå antall fra API: {}. Etter filtrering (selger aktiv, har pris): {}",
                        probe.raw_count, probe.listed
                    ),
                    Err(err) => format!("Feil: {err}"),
                },
                self.is_healthy(),
            )],
            note: Some(
                "Produkter uten pris i denne regionen, eller med suspendert selger, vises ikke."
                    .to_owned(),
            ),
        };

        vec![backend, regions, region, products]
    }

    /// Short conclusions, most actionable first.
    #[must_use]
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();

        match &self.region_for_locale {
            None => lines.push(format!(
                "Locale \"{}\" matcher ingen region – sjekk Medusa Admin → Regions og landkoder.",
                self.locale
            )),
            Some(_) if matches!(self.products, Ok(ProductsProbe { listed: 0, .. })) => {
                lines.push(
                    "Region finnes, men ingen produkter ble vist. Sjekk at produktene har priser i denne regionen og at selger er aktiv."
                        .to_owned(),
                );
            }
            Some(_) => {}
        }
        if self.regions.is_err() {
            lines.push(format!(
                "Kunne ikke hente regioner – sjekk at backend kjører på {} og at publishable key er riktig.",
                self.backend_url
            ));
        }
        if let Err(err) = &self.products {
            lines.push(format!("Feil ved henting av produkter: {err}"));
        }
        if self.is_healthy() {
            lines.push(format!(
                "Alt ser ut til å fungere – {} produkt(er) hentet.",
                self.products_listed()
            ));
        }
        lines
    }

    /// Renders the report as plain text.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Produktstatus (locale: {})", self.locale);

        for section in self.sections() {
            let _ = writeln!(out, "\n{}", section.title);
            for row in &section.rows {
                let mark = match row.ok {
                    Some(true) => "✓ ",
                    Some(false) => "✗ ",
                    None => "",
                };
                let _ = writeln!(out, "  {}: {mark}{}", row.label, row.value);
            }
            if let Some(note) = &section.note {
                let _ = writeln!(out, "  ({note})");
            }
        }

        let _ = writeln!(out, "\nKort oppsummert");
        for line in self.summary() {
            let _ = writeln!(out, "  - {line}");
        }
        out
    }
}
