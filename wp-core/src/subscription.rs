//! Push subscriptions, as handed out by `PushManager.subscribe()` in the browser.
//!
//! A subscription is normalized when it is deserialized: the receiver public key is validated as
//! a P-256 point and the authentication secret must be exactly 16 bytes. A [`Subscription`]
//! therefore never carries malformed key material into the encryption pipeline.

use crate::base64url::{self, deserialize_bin_or_b64url, serialize_bin_or_b64url};
use crate::consts::AUTH_SECRET_SIZE;
use crate::error::Error;
use crate::keys::PublicKey;
use crate::util::to_array;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The receiver's push endpoint and encryption material.
///
/// Serializes as the JSON form of a browser `PushSubscription`:
///
/// ```json
/// { "endpoint": "https://...", "keys": { "p256dh": "<base64url>", "auth": "<base64url>" } }
/// ```
///
/// Other fields, such as `expirationTime`, are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// The push service URL.
    pub endpoint: String,
    /// The encryption material of the user agent.
    pub keys: SubscriptionKeys,
}

/// The receiver's encryption material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    /// The receiver's ECDH public key.
    pub p256dh: PublicKey,
    /// The authentication secret.
    pub auth: AuthSecret,
}

/// The 16-byte authentication secret shared between user agent and application server.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSecret(pub [u8; AUTH_SECRET_SIZE]);

impl core::fmt::Debug for AuthSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("AuthSecret(..)")
    }
}

impl AsRef<[u8]> for AuthSecret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AuthSecret {
    /// Import a raw secret.
    pub fn from_raw(raw: &[u8]) -> Result<Self, Error> {
        Ok(Self(to_array(raw)?))
    }
}

impl Serialize for AuthSecret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_bin_or_b64url(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for AuthSecret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_bin_or_b64url::<D, AUTH_SECRET_SIZE>(deserializer).map(Self)
    }
}

impl Subscription {
    /// Build a subscription from an endpoint and the base64url encoded keys.
    pub fn new(endpoint: impl Into<String>, p256dh: &str, auth: &str) -> Result<Self, Error> {
        Ok(Self {
            endpoint: endpoint.into(),
            keys: SubscriptionKeys {
                p256dh: PublicKey::from_base64url(p256dh)?,
                auth: AuthSecret::from_raw(&base64url::decode(auth)?)?,
            },
        })
    }

    /// Parse the JSON form of a subscription.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestSetup;

    #[test]
    fn test_from_browser_json() {
        let json = format!(
            r#"{{"endpoint":"https://fcm.googleapis.com/fcm/send/ABC","expirationTime":null,"keys":{{"p256dh":"{}","auth":"{}"}}}}"#,
            TestSetup::UA_PUBLIC,
            TestSetup::AUTH
        );

        let sub = Subscription::from_json(&json).unwrap();
        let expected = Subscription::new(
            "https://fcm.googleapis.com/fcm/send/ABC",
            TestSetup::UA_PUBLIC,
            TestSetup::AUTH,
        )
        .unwrap();

        assert_eq!(sub, expected);
        assert_eq!(sub.keys.p256dh.to_base64url(), TestSetup::UA_PUBLIC);
    }

    #[test]
    fn test_json_round_trip() {
        let setup = TestSetup::default();
        let json = serde_json::to_string(&setup.subscription).unwrap();

        assert!(json.contains(TestSetup::AUTH));
        assert_eq!(Subscription::from_json(&json).unwrap(), setup.subscription);
    }

    #[test]
    fn test_rejects_bad_auth() {
        assert!(matches!(
            Subscription::new("https://push.example.net", TestSetup::UA_PUBLIC, "AAAA"),
            Err(Error::InvalidKeyLength {
                expected: 16,
                found: 3
            })
        ));

        let json = format!(
            r#"{{"endpoint":"https://push.example.net","keys":{{"p256dh":"{}","auth":"AAAA"}}}}"#,
            TestSetup::UA_PUBLIC,
        );
        assert!(Subscription::from_json(&json).is_err());
    }

    #[test]
    fn test_rejects_bad_p256dh() {
        // A compressed point.
        let mut raw = base64url::decode(TestSetup::UA_PUBLIC).unwrap();
        raw[0] = 0x02;

        assert!(matches!(
            Subscription::new(
                "https://push.example.net",
                &base64url::encode(&raw),
                TestSetup::AUTH
            ),
            Err(Error::InvalidKeyFormat)
        ));
    }
}
