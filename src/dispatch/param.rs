//! Scalar parameter binding.
//!
//! Inbound scalars (query parameters over HTTP, name/payload pairs parsed
//! out of the WebSocket handshake query string) are collected once per
//! invocation into a [`ScalarMap`] and bound into the controller method's
//! parameters according to the target type: a raw string is taken
//! verbatim, a `FromStr` scalar is parsed directly, and anything else goes
//! through `serde_json` either as a bare primitive or a structured value.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Ordered, case-preserving name -> raw string value map built from a
/// request's query string (or, for HTTP, also carrying the request body
/// under [`BODY_KEY`]).
pub type ScalarMap = IndexMap<String, String>;

/// Reserved scalar-map key under which the HTTP driver stores the
/// request body text, so body binding reuses the same lookup path as
/// every other parameter.
pub(crate) const BODY_KEY: &str = "$body";

/// Builds a [`ScalarMap`] from a URL query string, preserving order and
/// tolerating a missing or malformed string as an empty map.
///
/// A repeated key takes its first value; later occurrences are ignored,
/// matching "each key is taken at most once".
pub(crate) fn scalars_from_query(query: Option<&str>) -> ScalarMap {
    let Some(query) = query else { return ScalarMap::new() };
    serde_urlencoded::from_str::<Vec<(String, String)>>(query)
        .unwrap_or_default()
        .into_iter()
        .fold(ScalarMap::new(), |mut map, (key, value)| {
            map.entry(key).or_insert(value);
            map
        })
}

/// Binding helpers for a [`ScalarMap`], implemented for it directly — a
/// controller method's handler closure calls these on the map it's handed
/// to pull out its own parameters by name.
pub trait ScalarMapExt {
    /// The raw string value for `name`, unparsed.
    fn raw(&self, name: &str) -> Option<&str>;

    /// Parses `name` with `T::from_str`. A missing name or parse failure
    /// both yield `T::default()` — an absent or malformed scalar behaves
    /// like one that was never sent.
    fn scalar<T>(&self, name: &str) -> T
    where
        T: FromStr + Default;

    /// Decodes `name` as a JSON primitive (e.g. a date-time or an enum
    /// matched by name).
    ///
    /// The raw value is always quote-wrapped before being handed to
    /// `serde_json`, unconditionally — a query string like `status=2`
    /// decodes as the JSON string `"2"`, never the bare number `2`.
    fn primitive<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, Error>;

    /// Decodes `name` as a structured JSON value (object or array),
    /// already valid JSON text as sent by the peer.
    fn json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, Error>;

    /// Decodes the request body (stored under [`BODY_KEY`]) as JSON.
    fn body<T: DeserializeOwned>(&self) -> Result<T, Error>;
}

impl ScalarMapExt for ScalarMap {
    #[inline]
    fn raw(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }

    fn scalar<T>(&self, name: &str) -> T
    where
        T: FromStr + Default,
    {
        self.raw(name)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    fn primitive<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, Error> {
        let Some(raw) = self.raw(name) else { return Ok(None) };
        let quoted = serde_json::to_string(raw).map_err(Error::client_error)?;
        serde_json::from_str::<T>(&quoted).map(Some).map_err(Error::client_error)
    }

    fn json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, Error> {
        let Some(raw) = self.raw(name) else { return Ok(None) };
        serde_json::from_str(raw).map(Some).map_err(Error::client_error)
    }

    fn body<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let raw = self
            .raw(BODY_KEY)
            .ok_or_else(|| Error::client_error("missing request body"))?;
        serde_json::from_str(raw).map_err(Error::client_error)
    }
}
