//! Voluntary Application Server Identification.
//!
//! The application server proves its identity to the push service with a short-lived JWT, signed
//! with ES256 under the VAPID key the subscription was created with:
//!
//! ```text
//! token = b64url({"typ":"JWT","alg":"ES256"}) "." b64url({"aud","exp","sub"}) "." b64url(r || s)
//! ```
//!
//! Two header schemes exist. The default, [`VapidScheme::WebPush`], is understood by every push
//! service:
//!
//! ```text
//! Authorization: WebPush <token>
//! Crypto-Key: p256ecdsa=<b64url(public key)>
//! ```
//!
//! RFC 8292 folds both into a single header, see [`VapidScheme::Vapid`].

use crate::base64url;
use crate::consts::VAPID_VALIDITY;
use crate::crypto::Signer;
use crate::error::Error;
use crate::keys::VapidKeys;
use crate::request::{Headers, AUTHORIZATION, CRYPTO_KEY};
use crate::util::now;
use serde::{Deserialize, Serialize};

/// How the VAPID token and key are put into headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VapidScheme {
    /// `Authorization: WebPush <token>` plus `Crypto-Key: p256ecdsa=<key>`.
    #[default]
    WebPush,
    /// `Authorization: vapid t=<token>, k=<key>` (RFC 8292).
    Vapid,
}

#[derive(Serialize)]
struct JwtHeader {
    typ: &'static str,
    alg: &'static str,
}

const JWT_HEADER: JwtHeader = JwtHeader {
    typ: "JWT",
    alg: "ES256",
};

/// The claims of a VAPID token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The origin of the push service.
    pub aud: String,
    /// Expiry, in seconds since the UNIX epoch.
    pub exp: u64,
    /// Contact information of the application server, a `mailto:` or `https:` URL.
    pub sub: String,
}

/// The headers that authenticate a push request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VapidHeaders {
    /// The `Authorization` value.
    pub authorization: String,
    /// The `Crypto-Key` parameter, only for [`VapidScheme::WebPush`].
    pub crypto_key: Option<String>,
}

impl VapidHeaders {
    /// Convert into request headers.
    pub fn into_headers(self) -> Headers {
        let mut headers = Headers::new();
        headers.insert(AUTHORIZATION, self.authorization);
        if let Some(crypto_key) = self.crypto_key {
            headers.insert(CRYPTO_KEY, crypto_key);
        }

        headers
    }
}

/// The origin (scheme, host and non-default port) of a URL.
pub fn audience(url: &str) -> Result<String, Error> {
    let origin = url::Url::parse(url)?.origin();
    if !origin.is_tuple() {
        return Err(Error::InvalidUrl(url.to_string()));
    }

    Ok(origin.ascii_serialization())
}

/// Sign the claims into a compact JWT.
pub fn create_token<S>(signer: &S, vapid_keys: &VapidKeys, claims: &Claims) -> Result<String, Error>
where
    S: Signer + ?Sized,
{
    let header = base64url::encode(&serde_json::to_vec(&JWT_HEADER)?);
    let body = base64url::encode(&serde_json::to_vec(claims)?);
    let unsigned = format!("{header}.{body}");

    let signature = signer.sign(&vapid_keys.private_key, unsigned.as_bytes())?;

    Ok(format!("{unsigned}.{}", base64url::encode(&signature)))
}

/// Create the `WebPush` scheme VAPID headers for a request to `audience_url`.
///
/// The token expires at `exp`, or 12 hours from now.
pub fn create_auth_header<S>(
    signer: &S,
    vapid_keys: &VapidKeys,
    audience_url: &str,
    subject: &str,
    exp: Option<u64>,
) -> Result<VapidHeaders, Error>
where
    S: Signer + ?Sized,
{
    create_auth_header_with_scheme(
        signer,
        vapid_keys,
        audience_url,
        subject,
        exp,
        VapidScheme::WebPush,
    )
}

/// Create VAPID headers in the given scheme.
pub fn create_auth_header_with_scheme<S>(
    signer: &S,
    vapid_keys: &VapidKeys,
    audience_url: &str,
    subject: &str,
    exp: Option<u64>,
    scheme: VapidScheme,
) -> Result<VapidHeaders, Error>
where
    S: Signer + ?Sized,
{
    if audience_url.is_empty() {
        return Err(Error::MissingAudience);
    }
    if subject.is_empty() {
        return Err(Error::MissingSubject);
    }

    let exp = match exp {
        Some(exp) => exp,
        None => now()? + VAPID_VALIDITY,
    };

    let claims = Claims {
        aud: audience(audience_url)?,
        exp,
        sub: subject.to_string(),
    };

    let token = create_token(signer, vapid_keys, &claims)?;
    let key = vapid_keys.public_key.to_base64url();

    log::debug!("signed VAPID token for {}, valid until {}", claims.aud, claims.exp);

    Ok(match scheme {
        VapidScheme::WebPush => VapidHeaders {
            authorization: format!("WebPush {token}"),
            crypto_key: Some(format!("p256ecdsa={key}")),
        },
        VapidScheme::Vapid => VapidHeaders {
            authorization: format!("vapid t={token}, k={key}"),
            crypto_key: None,
        },
    })
}
