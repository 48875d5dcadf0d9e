//! Page descriptions for the listing and product-status pages.
//!
//! Only what the pages declare: metadata, breadcrumbs, headings. Rendering
//! and data loading belong to the host.

/// Crawler directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Robots {
    /// Whether the page may be indexed.
    pub index: bool,
    /// Whether links on the page may be followed.
    pub follow: bool,
}

impl Robots {
    /// Renders the `robots` meta content, e.g. `noindex, follow`.
    #[must_use]
    pub fn content(self) -> String {
        format!(
            "{}, {}",
            if self.index { "index" } else { "noindex" },
            if self.follow { "follow" } else { "nofollow" }
        )
    }
}

/// Head metadata of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    /// Document title.
    pub title: String,
    /// Meta description.
    pub description: Option<String>,
    /// Crawler directives.
    pub robots: Robots,
    /// Seconds a rendered page may be served before regeneration.
    pub revalidate_secs: Option<u32>,
}

/// One breadcrumb link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Locale-prefixed path.
    pub path: String,
    /// Link text.
    pub label: String,
}

/// The all-products listing page, served straight from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Locale from the URL.
    pub locale: String,
    /// Head metadata.
    pub metadata: PageMetadata,
    /// Trail shown above the heading.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Page heading.
    pub heading: String,
    /// Lead paragraph.
    pub intro: String,
    /// Whether the listing shows its filter sidebar.
    pub show_sidebar: bool,
}

const LISTING_TITLE: &str = "Alle produkter (uten Algolia)";

/// Prefixes a path with the locale segment.
#[must_use]
pub fn localized_path(locale: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("/{locale}")
    } else {
        format!("/{locale}/{path}")
    }
}

/// Describes the all-products listing page for `locale`.
#[must_use]
pub fn all_products_page(locale: &str) -> ListingPage {
    ListingPage {
        locale: locale.to_owned(),
        metadata: PageMetadata {
            title: LISTING_TITLE.to_owned(),
            description: Some(
                "Produktliste hentet direkte fra Medusa – for å teste integrasjon uten Algolia."
                    .to_owned(),
            ),
            robots: Robots {
                index: false,
                follow: true,
            },
            revalidate_secs: Some(60),
        },
        breadcrumbs: vec![
            Breadcrumb {
                path: localized_path(locale, "/"),
                label: "Hjem".to_owned(),
            },
            Breadcrumb {
                path: localized_path(locale, "/alle-produkter"),
                label: LISTING_TITLE.to_owned(),
            },
        ],
        heading: LISTING_TITLE.to_owned(),
        intro: "Denne listen hentes direkte fra Medusa-backend uten Algolia.".to_owned(),
        show_sidebar: true,
    }
}

/// Metadata of the product-status page. Kept out of search engines entirely.
#[must_use]
pub fn product_status_metadata() -> PageMetadata {
    PageMetadata {
        title: "Produktstatus – hvorfor vises ikke produktene?".to_owned(),
        description: None,
        robots: Robots {
            index: false,
            follow: false,
        },
        revalidate_secs: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_path() {
        assert_eq!(localized_path("no", "/"), "/no");
        assert_eq!(localized_path("no", "/alle-produkter"), "/no/alle-produkter");
        assert_eq!(localized_path("us", "alle-produkter"), "/us/alle-produkter");
    }

    #[test]
    fn test_listing_page_is_followed_but_not_indexed() {
        let page = all_products_page("no");

        assert_eq!(page.metadata.robots.content(), "noindex, follow");
        assert_eq!(page.metadata.revalidate_secs, Some(60));
        assert_eq!(page.breadcrumbs.len(), 2);
        assert_eq!(page.breadcrumbs[1].path, "/no/alle-produkter");
        assert!(page.show_sidebar);
    }

    #[test]
    fn test_status_page_is_hidden() {
        assert_eq!(product_status_metadata().robots.content(), "noindex, nofollow");
    }
}
