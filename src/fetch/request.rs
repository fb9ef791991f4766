//! Request descriptors for the remote countries dataset.
//!
//! A [`FetchRequest`] is everything the plugin shim needs to issue one HTTP GET
//! through Zellij's `web_request`: the full URL, the request id carried in the
//! host's context map, and the client-side name filter to apply once the body
//! arrives.

use crate::domain::{Endpoint, RemoteQuery};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default base endpoint of the REST Countries API.
pub const DEFAULT_API_BASE: &str = "https://restcountries.com/v3.1";

/// Fixed field selection appended to every request.
pub const FIELDS_QUERY: &str =
    "fields=name,flags,population,region,subregion,capital,tld,borders,languages,currencies";

/// Context key carrying the request id through `web_request`.
pub const CONTEXT_REQUEST_ID: &str = "request_id";

/// Context key carrying the issue timestamp (Unix milliseconds).
pub const CONTEXT_ISSUED_AT: &str = "issued_at_ms";

/// Monotonic identifier of an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Extracts the request id from a `web_request` context map.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        context
            .get(CONTEXT_REQUEST_ID)
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Self)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One issued GET against the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub url: String,
    pub name_filter: Option<String>,
    pub issued_at_ms: i64,
}

impl FetchRequest {
    /// Builds the request for `query`, stamped with the current time.
    #[must_use]
    pub fn new(id: RequestId, api_base: &str, query: &RemoteQuery) -> Self {
        Self {
            id,
            url: build_url(api_base, &query.endpoint),
            name_filter: query.name_filter.clone(),
            issued_at_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Context map echoed back by the host in `WebRequestResult`.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (CONTEXT_REQUEST_ID.to_string(), self.id.get().to_string()),
            (CONTEXT_ISSUED_AT.to_string(), self.issued_at_ms.to_string()),
        ])
    }
}

/// Milliseconds elapsed since the request recorded in `context` was issued.
#[must_use]
pub fn elapsed_ms(context: &BTreeMap<String, String>) -> Option<i64> {
    let issued = context.get(CONTEXT_ISSUED_AT)?.parse::<i64>().ok()?;
    Some(chrono::Utc::now().timestamp_millis() - issued)
}

/// Joins base, endpoint path, and the fixed field selection.
///
/// # Examples
///
/// ```
/// use country_explorer::domain::Endpoint;
/// use country_explorer::fetch::request::build_url;
///
/// let url = build_url("https://restcountries.com/v3.1/", &Endpoint::All);
/// assert!(url.starts_with("https://restcountries.com/v3.1/all?fields=name,"));
/// ```
#[must_use]
pub fn build_url(api_base: &str, endpoint: &Endpoint) -> String {
    format!(
        "{}{}?{FIELDS_QUERY}",
        api_base.trim_end_matches('/'),
        endpoint.path()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{QueryState, Region, RegionFilter};

    #[test]
    fn builds_urls_for_each_endpoint() {
        assert_eq!(
            build_url(DEFAULT_API_BASE, &Endpoint::Region(Region::Europe)),
            format!("https://restcountries.com/v3.1/region/Europe?{FIELDS_QUERY}")
        );
        assert_eq!(
            build_url(DEFAULT_API_BASE, &Endpoint::Name("united states".into())),
            format!("https://restcountries.com/v3.1/name/united%20states?{FIELDS_QUERY}")
        );
    }

    #[test]
    fn context_round_trips_request_id() {
        let query = QueryState::new(RegionFilter::Only(Region::Asia), "ko").remote_query();
        let request = FetchRequest::new(RequestId::new(7), DEFAULT_API_BASE, &query);

        assert_eq!(request.name_filter.as_deref(), Some("ko"));
        assert_eq!(RequestId::from_context(&request.context()), Some(RequestId::new(7)));
        assert!(elapsed_ms(&request.context()).is_some_and(|ms| ms >= 0));
    }

    #[test]
    fn missing_or_garbled_context_has_no_id() {
        assert_eq!(RequestId::from_context(&BTreeMap::new()), None);
        let garbled = BTreeMap::from([(CONTEXT_REQUEST_ID.to_string(), "x".to_string())]);
        assert_eq!(RequestId::from_context(&garbled), None);
    }
}
