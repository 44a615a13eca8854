//! The push pipeline: from a subscription and a payload to a ready to send request.

use crate::consts::*;
use crate::crypto::CryptoProvider;
use crate::encryption::{ContentCoding, EncryptedPayload};
use crate::error::Error;
use crate::keys::{ServerKeyPair, VapidKeys};
use crate::request::{
    rewrite_endpoint, Headers, Method, PushService, RequestDescriptor, CONTENT_LENGTH, TTL,
};
use crate::subscription::Subscription;
use crate::vapid::{self, VapidHeaders, VapidScheme};

#[cfg(feature = "rust")]
use crate::crypto::rust::RustCrypto;

/// Configuration of a [`Pusher`].
#[derive(Debug, Clone)]
pub struct PushOptions {
    /// The application server identity.
    pub vapid_keys: VapidKeys,
    /// The VAPID subject, a `mailto:` or `https:` contact URL.
    pub subject: String,
    /// The content coding, "aes128gcm" unless configured otherwise.
    pub coding: ContentCoding,
    /// Time-to-live of a message at the push service, in seconds.
    pub ttl: u32,
    /// How VAPID credentials are put into headers.
    pub vapid_scheme: VapidScheme,
    /// Use this server key pair for every message instead of a fresh one.
    pub server_keys: Option<ServerKeyPair>,
    /// Use this salt for every message instead of a fresh one.
    pub salt: Option<[u8; SALT_SIZE]>,
}

impl PushOptions {
    /// Options with the defaults: "aes128gcm", a TTL of 60 seconds and fresh keys per message.
    pub fn new(vapid_keys: VapidKeys, subject: impl Into<String>) -> Self {
        Self {
            vapid_keys,
            subject: subject.into(),
            coding: ContentCoding::default(),
            ttl: DEFAULT_TTL,
            vapid_scheme: VapidScheme::default(),
            server_keys: None,
            salt: None,
        }
    }

    /// Select the content coding.
    pub fn with_coding(mut self, coding: ContentCoding) -> Self {
        self.coding = coding;
        self
    }

    /// Set the time-to-live.
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Select the VAPID header scheme.
    pub fn with_vapid_scheme(mut self, scheme: VapidScheme) -> Self {
        self.vapid_scheme = scheme;
        self
    }

    /// Pin the server key pair.
    ///
    /// Only meant for reproducing known vectors: together with a pinned salt every message is
    /// encrypted under the same key and nonce.
    pub fn with_server_keys(mut self, server_keys: ServerKeyPair) -> Self {
        self.server_keys = Some(server_keys);
        self
    }

    /// Pin the salt. See [`PushOptions::with_server_keys`].
    pub fn with_salt(mut self, salt: [u8; SALT_SIZE]) -> Self {
        self.salt = Some(salt);
        self
    }
}

/// Encrypts messages and assembles push requests.
///
/// A pusher holds no mutable state, build it once and share it by reference.
#[derive(Debug, Clone)]
pub struct Pusher<P> {
    options: PushOptions,
    provider: P,
}

#[cfg(feature = "rust")]
impl Pusher<RustCrypto> {
    /// Create a new [`Pusher`] backed by Rust Crypto.
    pub fn new(options: PushOptions) -> Self {
        Self::with_provider(options, RustCrypto)
    }
}

impl<P: CryptoProvider> Pusher<P> {
    /// Create a new [`Pusher`] with the given cryptographic provider.
    pub fn with_provider(options: PushOptions, provider: P) -> Self {
        if options.salt.is_some() && options.server_keys.is_some() {
            log::warn!("salt and server keys are pinned, all messages share one key and nonce");
        }

        Self { options, provider }
    }

    /// The options of this pusher.
    pub fn options(&self) -> &PushOptions {
        &self.options
    }

    /// Encrypt `plaintext` for `subscription`.
    ///
    /// Returns `None` for an empty payload: a push without data is not encrypted.
    pub fn encrypt_payload(
        &self,
        subscription: &Subscription,
        plaintext: &[u8],
    ) -> Result<Option<EncryptedPayload>, Error> {
        if plaintext.is_empty() {
            return Ok(None);
        }

        let coding = self.options.coding;
        coding.check_payload_size(plaintext.len())?;

        let salt = match self.options.salt {
            Some(salt) => salt,
            None => {
                let mut salt = [0u8; SALT_SIZE];
                self.provider.fill(&mut salt)?;
                salt
            }
        };

        let fresh_keys;
        let server_keys = match &self.options.server_keys {
            Some(keys) => keys,
            None => {
                fresh_keys = self.provider.generate_key_pair()?;
                &fresh_keys
            }
        };

        log::debug!("encrypting {} bytes using {coding}", plaintext.len());

        coding
            .encrypt(&self.provider, subscription, plaintext, salt, server_keys)
            .map(Some)
    }

    /// Create the VAPID headers for a request to `endpoint`.
    pub fn vapid_headers(&self, endpoint: &str, exp: Option<u64>) -> Result<VapidHeaders, Error> {
        vapid::create_auth_header_with_scheme(
            &self.provider,
            &self.options.vapid_keys,
            endpoint,
            &self.options.subject,
            exp,
            self.options.vapid_scheme,
        )
    }

    /// Build the request that delivers `payload` to `subscription`.
    ///
    /// The VAPID token is valid for 12 hours.
    pub fn get_request_details(
        &self,
        subscription: &Subscription,
        payload: &[u8],
    ) -> Result<RequestDescriptor, Error> {
        self.get_request_details_with_expiry(subscription, payload, None)
    }

    /// Build the request that delivers `payload` to `subscription`, with an explicit VAPID
    /// expiry in seconds since the UNIX epoch.
    pub fn get_request_details_with_expiry(
        &self,
        subscription: &Subscription,
        payload: &[u8],
        exp: Option<u64>,
    ) -> Result<RequestDescriptor, Error> {
        let url = rewrite_endpoint(&subscription.endpoint);
        log::debug!("building push request for {:?}", PushService::classify(&url));

        let vapid_headers = self.vapid_headers(&url, exp)?;
        let encrypted = self.encrypt_payload(subscription, payload)?;

        let mut headers = Headers::new();
        headers.insert(TTL, self.options.ttl);

        let (method, body) = match encrypted {
            Some(payload) => {
                headers.merge(self.options.coding.content_headers(&payload));
                (Method::Post, Some(payload.cipher_text))
            }
            None => {
                headers.insert(CONTENT_LENGTH, 0u32);
                (Method::Get, None)
            }
        };

        headers.merge(vapid_headers.into_headers());

        Ok(RequestDescriptor {
            url,
            method,
            headers,
            body,
        })
    }
}
