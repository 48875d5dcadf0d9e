//! Store API transport.
//!
//! Helpers in this crate only ever issue `GET <path>?<query>` and decode a
//! JSON body. Anything that can do that is a [`StoreClient`].

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::{DataError, DataResult};

/// A single query parameter.
pub type QueryParam = (&'static str, String);

/// Read-only access to the store API.
pub trait StoreClient {
    /// Issues a GET and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    fn get(&self, path: &str, query: &[QueryParam]) -> DataResult<String>;
}

/// Issues a GET and decodes the JSON body.
///
/// # Errors
///
/// Returns the client's error, or [`DataError::Decode`] if the body does not
/// match `T`.
pub fn fetch_json<T, C>(client: &C, path: &str, query: &[QueryParam]) -> DataResult<T>
where
    T: DeserializeOwned,
    C: StoreClient + ?Sized,
{
    trace!(path, params = query.len(), "store GET");
    let body = client.get(path, query)?;
    serde_json::from_str(&body).map_err(|source| DataError::Decode {
        path: path.to_owned(),
        source,
    })
}

/// A recorded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Requested path.
    pub path: String,
    /// Query parameters in request order.
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Returns the value of a query parameter.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
enum Fixture {
    Body(String),
    Status(u16, String),
    Unreachable(String),
}

/// Fixture-backed client: canned responses keyed by path.
///
/// Unknown paths answer 404. Every request is recorded.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Responses by path.
    fixtures: HashMap<String, Fixture>,
    /// Requests seen so far.
    requests: Mutex<Vec<RecordedRequest>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `path` with a JSON body.
    #[must_use]
    pub fn with_json(mut self, path: &str, body: impl Into<String>) -> Self {
        self.fixtures.insert(path.to_owned(), Fixture::Body(body.into()));
        self
    }

    /// Answers `path` with an error status.
    #[must_use]
    pub fn with_status(mut self, path: &str, status: u16, message: impl Into<String>) -> Self {
        self.fixtures
            .insert(path.to_owned(), Fixture::Status(status, message.into()));
        self
    }

    /// Makes `path` fail before any response arrives.
    #[must_use]
    pub fn with_unreachable(mut self, path: &str, message: impl Into<String>) -> Self {
        self.fixtures
            .insert(path.to_owned(), Fixture::Unreachable(message.into()));
        self
    }

    /// Returns every request made so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

impl StoreClient for InMemoryStore {
    fn get(&self, path: &str, query: &[QueryParam]) -> DataResult<String> {
        self.requests.lock().push(RecordedRequest {
            path: path.to_owned(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_owned(), v.clone()))
                .collect(),
        });

        match self.fixtures.get(path) {
            Some(Fixture::Body(body)) => Ok(body.clone()),
            Some(Fixture::Status(status, message)) => Err(DataError::Status {
                path: path.to_owned(),
                status: *status,
                message: message.clone(),
            }),
            Some(Fixture::Unreachable(message)) => Err(DataError::Transport {
                path: path.to_owned(),
                message: message.clone(),
            }),
            None => Err(DataError::Status {
                path: path.to_owned(),
                status: 404,
                message: "Not Found".to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Ping {
        ok: bool,
    }

    #[test]
    fn test_fetch_json_decodes_and_records() {
        let store = InMemoryStore::new().with_json("/store/ping", r#"{"ok":true}"#);

        let ping: Ping = fetch_json(&store, "/store/ping", &[("limit", "1".to_owned())]).unwrap();

        assert!(ping.ok);
        let requests = store.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].param("limit"), Some("1"));
    }

    #[test]
    fn test_decode_error_names_path() {
        let store = InMemoryStore::new().with_json("/store/ping", "not json");

        let err = fetch_json::<Ping, _>(&store, "/store/ping", &[]).unwrap_err();
        assert!(matches!(err, DataError::Decode { ref path, .. } if path == "/store/ping"));
    }

    #[test]
    fn test_unknown_path_is_404() {
        let store = InMemoryStore::new();
        let err = store.get("/store/missing", &[]).unwrap_err();
        assert!(matches!(err, DataError::Status { status: 404, .. }));
    }
}
