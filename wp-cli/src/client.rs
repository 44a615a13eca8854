use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{ClientBuilder, Method, StatusCode};
use std::fmt::{Display, Formatter};
use std::time::Duration;
use wp_core::request::{self, RequestDescriptor};

use lazy_static::lazy_static;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

lazy_static! {
    static ref HEADER_VAL: String = format!("wp-cli/{PKG_VERSION}");
    static ref HEADERS: HeaderMap = {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(&HEADER_VAL));
        headers
    };
}

pub struct Client {
    client: reqwest::Client,
    proxy: Option<String>,
}

#[derive(Debug)]
pub enum ClientError {
    Reqwest(reqwest::Error),
    InvalidHeader(String),
    /// The subscription no longer exists and should be removed.
    Gone(StatusCode),
    /// The push service refused the message.
    Rejected { status: StatusCode, body: String },
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reqwest(e) => write!(f, "request failed: {e}"),
            Self::InvalidHeader(h) => write!(f, "invalid header: {h}"),
            Self::Gone(s) => write!(f, "subscription expired or unsubscribed ({s})"),
            Self::Rejected { status, body } => {
                write!(f, "push service rejected the message ({status}): {body}")
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Reqwest(e)
    }
}

impl Client {
    pub fn new(timeout: Duration, proxy: Option<String>) -> Result<Client, ClientError> {
        let client = ClientBuilder::new().timeout(timeout).build()?;
        Ok(Client { client, proxy })
    }

    fn header_map(req: &RequestDescriptor) -> Result<HeaderMap, ClientError> {
        let mut headers = HEADERS.clone();
        for (name, value) in req.headers.iter() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ClientError::InvalidHeader(name.to_string()))?;
            let value = HeaderValue::from_str(&value.to_string())
                .map_err(|_| ClientError::InvalidHeader(name.to_string()))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Deliver a push request, returning the status on acceptance.
    pub async fn deliver(&self, req: &RequestDescriptor) -> Result<StatusCode, ClientError> {
        let method = match req.method {
            request::Method::Get => Method::GET,
            request::Method::Post => Method::POST,
        };

        let url = req.delivery_url(self.proxy.as_deref());
        log::debug!("{method} {url}");

        let mut builder = self
            .client
            .request(method, url)
            .headers(Self::header_map(req)?);

        if let Some(body) = &req.body {
            builder = builder.body(body.clone());
        }

        let res = builder.send().await?;
        let status = res.status();

        match status {
            s if s.is_success() => Ok(s),
            StatusCode::NOT_FOUND | StatusCode::GONE => Err(ClientError::Gone(status)),
            _ => {
                let body = res.text().await.unwrap_or_default();
                Err(ClientError::Rejected { status, body })
            }
        }
    }
}
