//! ---
//! plt_section: "03-fixtures-payloads"
//! plt_subsection: "module"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Request header and gRPC metadata stubs."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
use std::time::Duration;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use uuid::Uuid;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// Header the backends trust as the authenticated user id behind the gateway.
pub const USER_UID_HEADER: &str = "Instill-User-Uid";
/// Older backends read the JWT subject from this header instead.
pub const JWT_SUB_HEADER: &str = "Jwt-Sub";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Transport {
    Http,
    Grpc,
}

impl Transport {
    /// Key the runner expects the header map under.
    pub fn headers_key(&self) -> &'static str {
        match self {
            Transport::Http => "headers",
            Transport::Grpc => "metadata",
        }
    }
}

/// Headers (HTTP) or metadata (gRPC) plus an optional timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    transport: Transport,
    headers: IndexMap<String, String>,
    timeout: Option<Duration>,
}

impl RequestParams {
    fn json(transport: Transport) -> Self {
        let mut headers = IndexMap::new();
        headers.insert(CONTENT_TYPE_HEADER.to_owned(), JSON_CONTENT_TYPE.to_owned());
        Self {
            transport,
            headers,
            timeout: None,
        }
    }

    pub fn http() -> Self {
        Self::json(Transport::Http)
    }

    pub fn grpc() -> Self {
        Self::json(Transport::Grpc)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_user_uid(self, uid: Uuid) -> Self {
        self.with_header(USER_UID_HEADER, uid.to_string())
    }

    pub fn with_jwt_sub(self, uid: Uuid) -> Self {
        self.with_header(JWT_SUB_HEADER, uid.to_string())
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Whole seconds with an `s` suffix, e.g. `300s`.
pub fn format_timeout(timeout: Duration) -> String {
    format!("{}s", timeout.as_secs())
}

impl Serialize for RequestParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.timeout.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(self.transport.headers_key(), &self.headers)?;
        if let Some(timeout) = self.timeout {
            map.serialize_entry("timeout", &format_timeout(timeout))?;
        }
        map.end()
    }
}
