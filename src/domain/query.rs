//! Query state and remote query derivation.
//!
//! The explorer has exactly two user-controlled axes: the region filter and the
//! search text. [`QueryState`] holds both as an immutable value; every change
//! produces a new value, and [`QueryState::remote_query`] is a pure function
//! from that value to the request that should be issued.
//!
//! # Derivation
//!
//! | Region | Search text | Endpoint            | Client-side name filter |
//! |--------|-------------|---------------------|-------------------------|
//! | set    | any         | `/region/{region}`  | search text, if any     |
//! | all    | non-empty   | `/name/{text}`      | none                    |
//! | all    | empty       | `/all`              | none                    |

use std::fmt;

/// Label shown on the filter trigger when no region is selected.
pub const ALL_REGIONS_LABEL: &str = "Filter by Region";

/// Geographic regions offered by the filter dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl Region {
    /// All regions in dropdown order.
    pub const ALL: [Self; 5] = [
        Self::Africa,
        Self::Americas,
        Self::Asia,
        Self::Europe,
        Self::Oceania,
    ];

    /// Region name as used by the remote API path.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Africa => "Africa",
            Self::Americas => "Americas",
            Self::Asia => "Asia",
            Self::Europe => "Europe",
            Self::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Active region filter: everything, or exactly one region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    /// Text shown on the filter trigger.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => ALL_REGIONS_LABEL,
            Self::Only(region) => region.name(),
        }
    }

    #[must_use]
    pub const fn is_all(self) -> bool {
        matches!(self, Self::All)
    }
}

/// Remote path selecting which slice of the dataset to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    All,
    Region(Region),
    Name(String),
}

impl Endpoint {
    /// URL path for this endpoint, relative to the API base.
    ///
    /// # Examples
    ///
    /// ```
    /// use country_explorer::domain::{Endpoint, Region};
    ///
    /// assert_eq!(Endpoint::All.path(), "/all");
    /// assert_eq!(Endpoint::Region(Region::Asia).path(), "/region/Asia");
    /// assert_eq!(Endpoint::Name("cote d'ivoire".into()).path(), "/name/cote%20d%27ivoire");
    /// ```
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::All => "/all".to_string(),
            Self::Region(region) => format!("/region/{region}"),
            Self::Name(text) => format!("/name/{}", encode_path_segment(text)),
        }
    }
}

/// Request descriptor derived from a [`QueryState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteQuery {
    pub endpoint: Endpoint,
    /// Case-insensitive substring filter applied to common names after fetching.
    pub name_filter: Option<String>,
}

/// Immutable snapshot of the user's query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    region: RegionFilter,
    search_text: String,
}

impl QueryState {
    #[must_use]
    pub fn new(region: RegionFilter, search_text: impl Into<String>) -> Self {
        Self {
            region,
            search_text: search_text.into(),
        }
    }

    /// Returns a copy with the region replaced; the search text is kept.
    #[must_use]
    pub fn with_region(&self, region: RegionFilter) -> Self {
        Self {
            region,
            search_text: self.search_text.clone(),
        }
    }

    /// Returns a copy with the search text replaced; the region is kept.
    #[must_use]
    pub fn with_search_text(&self, search_text: impl Into<String>) -> Self {
        Self {
            region: self.region,
            search_text: search_text.into(),
        }
    }

    #[must_use]
    pub const fn region(&self) -> RegionFilter {
        self.region
    }

    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Derives the request to issue for this query.
    #[must_use]
    pub fn remote_query(&self) -> RemoteQuery {
        match self.region {
            RegionFilter::Only(region) => RemoteQuery {
                endpoint: Endpoint::Region(region),
                name_filter: (!self.search_text.is_empty()).then(|| self.search_text.clone()),
            },
            RegionFilter::All if !self.search_text.is_empty() => RemoteQuery {
                endpoint: Endpoint::Name(self.search_text.clone()),
                name_filter: None,
            },
            RegionFilter::All => RemoteQuery {
                endpoint: Endpoint::All,
                name_filter: None,
            },
        }
    }
}

/// Returns whether a character may appear in the search field.
#[must_use]
pub const fn is_allowed_search_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '-' | '\'' | ' ')
}

/// Drops disallowed characters and trims leading whitespace.
///
/// # Examples
///
/// ```
/// use country_explorer::domain::query::sanitize_search_input;
///
/// assert_eq!(sanitize_search_input("  1fr@nce!"), "frnce");
/// assert_eq!(sanitize_search_input("cote d'ivoire"), "cote d'ivoire");
/// ```
#[must_use]
pub fn sanitize_search_input(raw: &str) -> String {
    let kept: String = raw.chars().filter(|&c| is_allowed_search_char(c)).collect();
    kept.trim_start().to_string()
}

/// Case-insensitive substring match of a filter against a country name.
#[must_use]
pub fn name_matches(name: &str, filter: &str) -> bool {
    name.to_lowercase().contains(&filter.to_lowercase())
}

/// Percent-encodes a path segment built from sanitized search text.
fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for ch in segment.chars() {
        match ch {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '.' | '_' | '~' => encoded.push(ch),
            other => {
                let mut buf = [0u8; 4];
                for byte in other.encode_utf8(&mut buf).bytes() {
                    encoded.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    encoded
}
