//! Country view record and its normalization from raw API items.
//!
//! The remote dataset returns loosely shaped JSON objects. [`Country::from_api`]
//! turns one such object into a flat, UI-ready record. Normalization is total:
//! any missing or mistyped field degrades to its documented default instead of
//! failing, so a single odd record can never break a result list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Separator used when a list field is shown on one line.
const LIST_SEPARATOR: &str = ", ";

/// Placeholder shown in the detail modal for empty currency, language, and border lists.
pub const NONE_PLACEHOLDER: &str = "None";

/// Top-level domain(s) of a country.
///
/// A single entry is unwrapped to [`Tld::Single`]; zero or several entries stay
/// a list. Serialized untagged so it round-trips as either a JSON string or array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tld {
    /// Exactly one domain, e.g. `.fr`.
    Single(String),
    /// Zero or more than one domain.
    Many(Vec<String>),
}

impl Default for Tld {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl Tld {
    /// Builds a `Tld` from the domains listed by the API.
    #[must_use]
    pub fn from_entries(mut entries: Vec<String>) -> Self {
        if entries.len() == 1 {
            Self::Single(entries.remove(0))
        } else {
            Self::Many(entries)
        }
    }

    /// Returns the domains joined by comma (blank when there are none).
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Single(tld) => tld.clone(),
            Self::Many(tlds) => tlds.join(LIST_SEPARATOR),
        }
    }
}

/// Normalized, UI-ready view of one country.
///
/// Created per API item at fetch time and owned by the presentation state for
/// as long as its card is listed. The detail modal renders a clone of exactly
/// this value, so list and modal can never drift apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Flag image URL (PNG variant), empty if absent.
    pub flag: String,
    /// Flag description text, empty if absent.
    pub alt: String,
    /// Common name, empty if absent.
    pub name: String,
    pub population: u64,
    pub region: String,
    pub subregion: String,
    pub capital: Vec<String>,
    pub tld: Tld,
    /// Currency names in API order.
    pub currencies: Vec<String>,
    /// Language names in API order.
    pub languages: Vec<String>,
    /// Bordering country codes (cca3).
    pub borders: Vec<String>,
}

impl Country {
    /// Derives a view record from one raw API item.
    ///
    /// # Examples
    ///
    /// ```
    /// use country_explorer::domain::{Country, Tld};
    ///
    /// let raw = serde_json::json!({
    ///     "name": { "common": "France" },
    ///     "population": 67391582,
    ///     "tld": [".fr"]
    /// });
    /// let country = Country::from_api(&raw);
    /// assert_eq!(country.name, "France");
    /// assert_eq!(country.tld, Tld::Single(".fr".to_string()));
    /// assert!(country.currencies.is_empty());
    /// ```
    #[must_use]
    pub fn from_api(item: &Value) -> Self {
        let flags = item.get("flags");

        Self {
            flag: nested_str(flags, "png"),
            alt: nested_str(flags, "alt"),
            name: nested_str(item.get("name"), "common"),
            population: item.get("population").map_or(0, population_value),
            region: nested_str(Some(item), "region"),
            subregion: nested_str(Some(item), "subregion"),
            capital: string_array(item.get("capital")),
            tld: Tld::from_entries(string_array(item.get("tld"))),
            currencies: item
                .get("currencies")
                .and_then(Value::as_object)
                .map(|map| {
                    map.values()
                        .filter_map(|currency| currency.get("name").and_then(Value::as_str))
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            languages: item
                .get("languages")
                .and_then(Value::as_object)
                .map(|map| map.values().filter_map(Value::as_str).map(String::from).collect())
                .unwrap_or_default(),
            borders: string_array(item.get("borders")),
        }
    }

    /// Population with grouped thousands, e.g. `67,391,582`.
    #[must_use]
    pub fn population_display(&self) -> String {
        group_thousands(self.population)
    }

    /// Capitals joined by comma; blank when there are none.
    #[must_use]
    pub fn capital_display(&self) -> String {
        self.capital.join(LIST_SEPARATOR)
    }

    /// Currencies joined by comma, or `None`.
    #[must_use]
    pub fn currencies_display(&self) -> String {
        join_or_none(&self.currencies)
    }

    /// Languages joined by comma, or `None`.
    #[must_use]
    pub fn languages_display(&self) -> String {
        join_or_none(&self.languages)
    }
}

/// Formats an integer with `,` between groups of three digits.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        NONE_PLACEHOLDER.to_string()
    } else {
        values.join(LIST_SEPARATOR)
    }
}

fn nested_str(parent: Option<&Value>, key: &str) -> String {
    parent
        .and_then(|value| value.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(String::from).collect())
        .unwrap_or_default()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn population_value(value: &Value) -> u64 {
    value.as_u64().unwrap_or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n > 0.0)
            .map_or(0, |n| n as u64)
    })
}
