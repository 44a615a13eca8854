use crate::client::ClientError;
use std::fmt::{Display, Formatter};

/// Errors that end a command.
#[derive(Debug)]
pub enum Error {
    /// Encryption, key or VAPID error.
    Core(wp_core::error::Error),
    /// IO error.
    StdIO(std::io::Error),
    /// Serde JSON error.
    Json(serde_json::Error),
    /// The push request could not be delivered.
    Client(ClientError),
    /// No VAPID keys were configured.
    NoVapidKeys,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core(e) => write!(f, "{e}"),
            Self::StdIO(e) => write!(f, "IO error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Client(e) => write!(f, "{e}"),
            Self::NoVapidKeys => write!(
                f,
                "no VAPID keys, use --vapid-keys or set WEB_PUSH_VAPID_PUBLIC_KEY and WEB_PUSH_VAPID_PRIVATE_KEY"
            ),
        }
    }
}

impl From<wp_core::error::Error> for Error {
    fn from(e: wp_core::error::Error) -> Self {
        Self::Core(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::StdIO(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<ClientError> for Error {
    fn from(e: ClientError) -> Self {
        Self::Client(e)
    }
}
