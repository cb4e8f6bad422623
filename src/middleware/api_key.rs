//! API-key gate.

use std::collections::HashSet;

use tracing::debug;

use super::Middleware;
use crate::error::ApiError;
use crate::request::Request;

/// The query parameter the key is read from.
const API_KEY_PARAM: &str = "api-key";

/// Admits requests whose `api-key` query parameter is in a fixed allow-set.
///
/// - no key (or an empty one) → `400 "API Key Required"`
/// - unknown key → `401 "Invalid API Key"`
/// - otherwise the key is attached to the request ([`Request::api_key`])
pub struct ApiKeyGate {
    keys: HashSet<String>,
}

impl ApiKeyGate {
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self { keys: keys.into_iter().map(Into::into).collect() }
    }
}

impl Middleware for ApiKeyGate {
    fn handle(&self, mut req: Request) -> Result<Request, ApiError> {
        let Some(key) = req.query(API_KEY_PARAM).filter(|k| !k.is_empty()) else {
            return Err(ApiError::bad_request("API Key Required"));
        };

        if !self.keys.contains(key) {
            debug!(path = req.path(), "rejected unknown api key");
            return Err(ApiError::unauthorized("Invalid API Key"));
        }

        let key = key.to_owned();
        req.set_api_key(key);
        Ok(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::tests::request;
    use crate::Status;

    fn gate() -> ApiKeyGate {
        ApiKeyGate::new(["perscholas", "ps-example"])
    }

    #[test]
    fn missing_key_is_bad_request() {
        for uri in ["/api/users", "/api/users?api-key="] {
            let err = gate().handle(request(uri)).unwrap_err();
            assert_eq!(err.status(), Status::BadRequest);
            assert_eq!(err.message(), "API Key Required");
        }
    }

    #[test]
    fn unknown_key_is_unauthorized() {
        let err = gate().handle(request("/api/users?api-key=bad")).unwrap_err();
        assert_eq!(err.status(), Status::Unauthorized);
        assert_eq!(err.message(), "Invalid API Key");
    }

    #[test]
    fn valid_key_is_attached() {
        let req = gate().handle(request("/api/users?api-key=ps-example")).unwrap();
        assert_eq!(req.api_key(), Some("ps-example"));
    }
}
