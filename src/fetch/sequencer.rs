//! Request sequencing for stale-response rejection.
//!
//! Superseded requests are never cancelled at the host; their responses still
//! arrive. The sequencer remembers only the latest issued request, so anything
//! carrying an older id is ignored and cannot overwrite newer results or clear
//! the loading state early.

use super::request::{FetchRequest, RequestId};
use crate::domain::RemoteQuery;

/// Issues monotonic request ids and tracks the single current request.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    last_issued: u64,
    current: Option<FetchRequest>,
}

impl RequestSequencer {
    /// Issues a new request for `query`, superseding any in-flight one.
    pub fn begin(&mut self, api_base: &str, query: &RemoteQuery) -> FetchRequest {
        self.last_issued += 1;
        let request = FetchRequest::new(RequestId::new(self.last_issued), api_base, query);
        tracing::debug!(
            request_id = %request.id,
            superseded = ?self.current.as_ref().map(|r| r.id),
            "request issued"
        );
        self.current = Some(request.clone());
        request
    }

    /// Returns the in-flight request if `id` is still current.
    #[must_use]
    pub fn current(&self, id: RequestId) -> Option<&FetchRequest> {
        self.current.as_ref().filter(|request| request.id == id)
    }

    /// Completes the request `id` if it is current; returns `None` for stale ids.
    ///
    /// A request completes at most once, so the loading state is cleared exactly once.
    pub fn finish(&mut self, id: RequestId) -> Option<FetchRequest> {
        if self.current(id).is_some() {
            self.current.take()
        } else {
            tracing::debug!(request_id = %id, "discarding stale response");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QueryState;
    use crate::fetch::request::DEFAULT_API_BASE;

    fn query(text: &str) -> RemoteQuery {
        QueryState::default().with_search_text(text).remote_query()
    }

    #[test]
    fn ids_are_monotonic() {
        let mut sequencer = RequestSequencer::default();
        let first = sequencer.begin(DEFAULT_API_BASE, &query("a"));
        let second = sequencer.begin(DEFAULT_API_BASE, &query("b"));
        assert!(second.id > first.id);
        assert_eq!(second.id, RequestId::new(2));
    }

    #[test]
    fn stale_response_is_rejected() {
        let mut sequencer = RequestSequencer::default();
        let stale = sequencer.begin(DEFAULT_API_BASE, &query("fr"));
        let latest = sequencer.begin(DEFAULT_API_BASE, &query("france"));

        assert!(sequencer.current(stale.id).is_none());
        assert!(sequencer.finish(stale.id).is_none());
        assert!(sequencer.current(latest.id).is_some());

        assert_eq!(sequencer.finish(latest.id).map(|r| r.url), Some(latest.url));
        assert!(sequencer.current(latest.id).is_none());
    }

    #[test]
    fn request_finishes_once() {
        let mut sequencer = RequestSequencer::default();
        let request = sequencer.begin(DEFAULT_API_BASE, &query(""));
        assert!(sequencer.finish(request.id).is_some());
        assert!(sequencer.finish(request.id).is_none());
    }
}
