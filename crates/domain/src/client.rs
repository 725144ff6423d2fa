//! Known HTTP clients for code samples.
//!
//! A client is identified by a `target/client` string such as `shell/curl`
//! or `js/fetch`. Only pairs listed in [`AVAILABLE_CLIENTS`] are accepted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// Every `target/client` pair the client can generate code samples for.
pub const AVAILABLE_CLIENTS: &[&str] = &[
    "c/libcurl",
    "clojure/clj_http",
    "csharp/httpclient",
    "csharp/restsharp",
    "dart/http",
    "fsharp/httpclient",
    "go/native",
    "http/http1.1",
    "java/asynchttp",
    "java/nethttp",
    "java/okhttp",
    "java/unirest",
    "js/axios",
    "js/fetch",
    "js/jquery",
    "js/ofetch",
    "js/xhr",
    "kotlin/okhttp",
    "node/axios",
    "node/fetch",
    "node/ofetch",
    "node/undici",
    "objc/nsurlsession",
    "ocaml/cohttp",
    "php/curl",
    "php/guzzle",
    "powershell/restmethod",
    "powershell/webrequest",
    "python/httpx_async",
    "python/httpx_sync",
    "python/python3",
    "python/requests",
    "r/httr",
    "ruby/native",
    "rust/reqwest",
    "shell/curl",
    "shell/httpie",
    "shell/wget",
    "swift/nsurlsession",
];

/// Returns true when `id` names a known client.
#[must_use]
pub fn is_client(id: &str) -> bool {
    AVAILABLE_CLIENTS.contains(&id)
}

/// A validated `target/client` identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(&'static str);

impl ClientId {
    /// Builds an id from its two halves.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownClient`] when the pair is not listed.
    pub fn from_parts(target_key: &str, client_key: &str) -> Result<Self, DomainError> {
        format!("{target_key}/{client_key}").parse()
    }

    /// The full `target/client` string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }

    /// The target half, e.g. `shell`.
    #[must_use]
    pub fn target_key(self) -> &'static str {
        self.0.split_once('/').map_or(self.0, |(target, _)| target)
    }

    /// The client half, e.g. `curl`.
    #[must_use]
    pub fn client_key(self) -> &'static str {
        self.0.split_once('/').map_or("", |(_, client)| client)
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self("shell/curl")
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for ClientId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AVAILABLE_CLIENTS
            .iter()
            .copied()
            .find(|known| *known == s)
            .map(Self)
            .ok_or_else(|| DomainError::UnknownClient(s.to_string()))
    }
}

impl Serialize for ClientId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for ClientId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_pairs_parse() {
        let id = ClientId::from_parts("node", "undici").unwrap();
        assert_eq!(id.as_str(), "node/undici");
        assert_eq!(id.target_key(), "node");
        assert_eq!(id.client_key(), "undici");
    }

    #[test]
    fn unknown_pairs_are_rejected() {
        assert!(ClientId::from_parts("shell", "netcat").is_err());
        assert!("curl".parse::<ClientId>().is_err());
        assert!(!is_client("js/"));
    }

    #[test]
    fn deserialize_validates() {
        let ok: ClientId = serde_json::from_str("\"js/fetch\"").unwrap();
        assert_eq!(ok.as_str(), "js/fetch");
        assert!(serde_json::from_str::<ClientId>("\"js/nope\"").is_err());
    }
}
