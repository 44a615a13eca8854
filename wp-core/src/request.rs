//! Transport-agnostic HTTP request descriptors and push service specific endpoint handling.

use crate::base64url;
use crate::consts::{FCM_ENDPOINT_PREFIX, MOZILLA_PUSH_DOMAIN};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Header carrying the time-to-live in seconds.
pub const TTL: &str = "TTL";
/// Header naming the content coding of the body.
pub const CONTENT_ENCODING: &str = "Content-Encoding";
/// Header announcing an empty body.
pub const CONTENT_LENGTH: &str = "Content-Length";
/// Header carrying the VAPID token.
pub const AUTHORIZATION: &str = "Authorization";
/// Header carrying public keys, `dh=` and `p256ecdsa=` parameters.
pub const CRYPTO_KEY: &str = "Crypto-Key";
/// Header carrying the salt of the legacy "aesgcm" coding.
pub const ENCRYPTION: &str = "Encryption";

/// Separator between parameters of one `Crypto-Key` header.
pub(crate) const CRYPTO_KEY_SEPARATOR: &str = "; ";

/// The HTTP method of a push request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Used when there is no payload.
    Get,
    /// Used when there is an encrypted body.
    Post,
}

impl Method {
    /// The method as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A header value, either a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeaderValue {
    /// A string value.
    Text(String),
    /// A numeric value such as `TTL` or `Content-Length`.
    Number(u64),
}

impl core::fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<String> for HeaderValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for HeaderValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<u64> for HeaderValue {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for HeaderValue {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

/// An ordered set of headers with case-insensitive names.
///
/// Serializes as a map in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, HeaderValue)>);

impl Headers {
    /// Create an empty set of headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a header.
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.position(name).map(|i| &self.0[i].1)
    }

    /// Set a header, replacing an existing value in place.
    pub fn insert(&mut self, name: &str, value: impl Into<HeaderValue>) {
        let value = value.into();
        match self.position(name) {
            Some(i) => self.0[i].1 = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    /// Add a parameter to a header, joining it to an existing value with `separator`.
    pub fn append(&mut self, name: &str, value: &str, separator: &str) {
        match self.position(name) {
            Some(i) => {
                let joined = format!("{}{separator}{value}", self.0[i].1);
                self.0[i].1 = HeaderValue::Text(joined);
            }
            None => self.0.push((name.to_string(), value.into())),
        }
    }

    /// Merge `other` into these headers.
    ///
    /// `Crypto-Key` parameters are combined, every other header is overwritten.
    pub fn merge(&mut self, other: Headers) {
        for (name, value) in other.0 {
            if name.eq_ignore_ascii_case(CRYPTO_KEY) {
                self.append(&name, &value.to_string(), CRYPTO_KEY_SEPARATOR);
            } else {
                self.insert(&name, value);
            }
        }
    }

    /// Iterate over all headers in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The number of headers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no headers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Push services that need special treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushService {
    /// Firebase Cloud Messaging, which serves the Web Push protocol under `/wp/`.
    Fcm,
    /// Mozilla autopush, the only service answering CORS preflights.
    Mozilla,
    /// Any other push service.
    Other,
}

impl PushService {
    /// Classify a subscription endpoint.
    pub fn classify(endpoint: &str) -> Self {
        if endpoint.starts_with(FCM_ENDPOINT_PREFIX) {
            Self::Fcm
        } else if endpoint.contains(MOZILLA_PUSH_DOMAIN) {
            Self::Mozilla
        } else {
            Self::Other
        }
    }

    /// Whether a browser can reach the service directly.
    pub fn supports_cors(&self) -> bool {
        matches!(self, Self::Mozilla)
    }
}

/// Rewrite an endpoint to where its push service accepts Web Push requests.
///
/// Legacy FCM endpoints (`/fcm/send/`) are served under `/wp/`, all others are returned as is.
pub fn rewrite_endpoint(endpoint: &str) -> String {
    match PushService::classify(endpoint) {
        PushService::Fcm => endpoint.replacen("fcm/send", "wp", 1),
        _ => endpoint.to_string(),
    }
}

/// A ready to send push request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// The (rewritten) endpoint.
    pub url: String,
    /// The HTTP method.
    pub method: Method,
    /// The headers, in order.
    pub headers: Headers,
    /// The encrypted body, absent for an empty payload.
    pub body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    /// The push service this request is addressed to.
    pub fn push_service(&self) -> PushService {
        PushService::classify(&self.url)
    }

    /// The URL a browser has to send this request to.
    ///
    /// Services that do not answer CORS preflights are reached through `proxy`, a prefix to which
    /// the percent-encoded endpoint is appended (e.g. `https://corsproxy.io/?`).
    pub fn delivery_url(&self, proxy: Option<&str>) -> String {
        match proxy {
            Some(prefix) if !self.push_service().supports_cors() => {
                let encoded: String = url::form_urlencoded::byte_serialize(self.url.as_bytes())
                    .collect::<String>()
                    .replace('+', "%20");
                format!("{prefix}{encoded}")
            }
            _ => self.url.clone(),
        }
    }
}

impl Serialize for RequestDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Init<'a> {
            headers: &'a Headers,
            body: Option<String>,
            method: Method,
        }

        // The body is base64url encoded for human-readable output.
        (
            &self.url,
            Init {
                headers: &self.headers,
                body: self.body.as_deref().map(base64url::encode),
                method: self.method,
            },
        )
            .serialize(serializer)
    }
}
