//! Domain layer for the country explorer plugin.
//!
//! This module contains the core domain types, independent of Zellij-specific APIs
//! or rendering concerns.
//!
//! # Organization
//!
//! - [`country`]: The `Country` view record and its normalization from raw API items
//! - [`query`]: Region filter, immutable query state, and remote query derivation
//! - [`error`]: Error types and result aliases
//!
//! # Examples
//!
//! ```
//! use country_explorer::domain::{QueryState, Region, RegionFilter};
//!
//! let query = QueryState::default()
//!     .with_region(RegionFilter::Only(Region::Europe))
//!     .with_search_text("united");
//! let remote = query.remote_query();
//! assert_eq!(remote.name_filter.as_deref(), Some("united"));
//! ```

pub mod country;
pub mod error;
pub mod query;

pub use country::{Country, Tld};
pub use error::{ExplorerError, Result};
pub use query::{Endpoint, QueryState, Region, RegionFilter, RemoteQuery};
