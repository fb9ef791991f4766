//! Response decoding and result shaping.

use crate::domain::query::name_matches;
use crate::domain::{Country, ExplorerError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of one completed fetch, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchOutcome {
    /// At least one country to list, in API order.
    Countries(Vec<Country>),
    /// The request succeeded but nothing matched.
    NoResults,
    /// Transport, status, or body failure.
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

/// Decodes a response and applies the optional client-side name filter.
///
/// # Examples
///
/// ```
/// use country_explorer::fetch::{parse_countries, FetchOutcome};
///
/// let body = br#"[{"name":{"common":"France"}},{"name":{"common":"Spain"}}]"#;
/// match parse_countries(200, body, Some("fra")) {
///     FetchOutcome::Countries(countries) => assert_eq!(countries[0].name, "France"),
///     other => panic!("unexpected outcome {other:?}"),
/// }
/// ```
#[must_use]
pub fn parse_countries(status: u16, body: &[u8], name_filter: Option<&str>) -> FetchOutcome {
    let items = match decode_items(status, body) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(status, error = %e, "fetch failed");
            return FetchOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    let countries: Vec<Country> = items
        .iter()
        .map(Country::from_api)
        .filter(|country| name_filter.map_or(true, |filter| name_matches(&country.name, filter)))
        .collect();

    tracing::debug!(
        received = items.len(),
        kept = countries.len(),
        filtered = name_filter.is_some(),
        "response decoded"
    );

    if countries.is_empty() {
        FetchOutcome::NoResults
    } else {
        FetchOutcome::Countries(countries)
    }
}

fn decode_items(status: u16, body: &[u8]) -> Result<Vec<Value>> {
    if !(200..300).contains(&status) {
        return Err(ExplorerError::Http { status });
    }

    match serde_json::from_slice::<Value>(body)? {
        Value::Array(items) => Ok(items),
        _ => Err(ExplorerError::UnexpectedBody),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EUROPE: &[u8] = br#"[
        {"name":{"common":"United Kingdom"},"region":"Europe"},
        {"name":{"common":"France"},"region":"Europe"},
        {"name":{"common":"Germany"},"region":"Europe"}
    ]"#;

    fn names(outcome: &FetchOutcome) -> Vec<&str> {
        match outcome {
            FetchOutcome::Countries(countries) => countries.iter().map(|c| c.name.as_str()).collect(),
            _ => vec![],
        }
    }

    #[test]
    fn region_results_filtered_by_name() {
        let outcome = parse_countries(200, EUROPE, Some("united"));
        assert_eq!(names(&outcome), vec!["United Kingdom"]);
    }

    #[test]
    fn unfiltered_results_keep_api_order() {
        let outcome = parse_countries(200, EUROPE, None);
        assert_eq!(names(&outcome), vec!["United Kingdom", "France", "Germany"]);
    }

    #[test]
    fn empty_array_is_no_results() {
        assert_eq!(parse_countries(200, b"[]", None), FetchOutcome::NoResults);
    }

    #[test]
    fn filter_matching_nothing_is_no_results() {
        assert_eq!(parse_countries(200, EUROPE, Some("zzz")), FetchOutcome::NoResults);
    }

    #[test]
    fn non_success_status_fails() {
        let outcome = parse_countries(404, br#"{"status":404,"message":"Not Found"}"#, None);
        assert_eq!(
            outcome,
            FetchOutcome::Failed {
                reason: "Request failed with HTTP status 404".to_string()
            }
        );
    }

    #[test]
    fn non_array_body_fails() {
        assert!(matches!(
            parse_countries(200, br#"{"message":"oops"}"#, None),
            FetchOutcome::Failed { .. }
        ));
        assert!(matches!(
            parse_countries(200, b"<html>", None),
            FetchOutcome::Failed { .. }
        ));
    }
}
