#![deny(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links
)]
//! Web Push wasm API.
//!
//! Encrypts push messages and builds the requests that deliver them, ready to be passed to
//! `fetch(url, init)`.

use wp_core::consts::VAPID_VALIDITY;
use wp_core::crypto::rust::RustCrypto;
use wp_core::keys::VapidKeys;
use wp_core::request::{Headers, Method, RequestDescriptor};
use wp_core::vapid::VapidScheme;
use wp_core::{ContentCoding, PushOptions, Pusher, Subscription};

use js_sys::{Array, Object, Reflect, Uint8Array};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, JsValue};

#[wasm_bindgen(typescript_custom_section)]
const TS_APPEND_CONTENT: &'static str = r#"
interface IPushOptions {
  vapidKeys: IKeyPair;
  subject: string;
  contentEncoding?: "aes128gcm" | "aesgcm";
  ttl?: number;
  vapidScheme?: "webpush" | "vapid";
}

interface IKeyPair {
  publicKey: string;
  privateKey: string;
}

interface ISubscription {
  endpoint: string;
  keys: { p256dh: string; auth: string };
}

interface IEncryptedPayload {
  cipherText: Uint8Array;
  salt: string;
  publicServerKey: string;
}

export type RequestDetails = [
  string,
  { headers: { [name: string]: string | number }; body: Uint8Array | null; method: "GET" | "POST" }
];
"#;

#[wasm_bindgen]
extern "C" {
    /// Options of a [`JsWebPush`].
    #[wasm_bindgen(typescript_type = "IPushOptions")]
    pub type IPushOptions;

    /// A push subscription in its JSON form.
    #[wasm_bindgen(typescript_type = "ISubscription")]
    pub type ISubscription;

    /// A base64url encoded key pair.
    #[wasm_bindgen(typescript_type = "IKeyPair")]
    pub type IKeyPair;

    /// An encrypted payload.
    #[wasm_bindgen(typescript_type = "IEncryptedPayload")]
    pub type IEncryptedPayload;

    /// Arguments for `fetch`.
    #[wasm_bindgen(typescript_type = "RequestDetails")]
    pub type RequestDetails;
}

/// Push options.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPushOptions {
    /// The VAPID key pair.
    pub vapid_keys: VapidKeys,

    /// Contact information, a `mailto:` or `https:` URL.
    pub subject: String,

    /// The content coding, `aes128gcm` when absent.
    #[serde(default)]
    pub content_encoding: ContentCoding,

    /// Time-to-live in seconds.
    pub ttl: Option<u32>,

    /// The VAPID header scheme, `webpush` when absent.
    #[serde(default)]
    pub vapid_scheme: VapidScheme,
}

impl From<WebPushOptions> for PushOptions {
    fn from(o: WebPushOptions) -> Self {
        let options = PushOptions::new(o.vapid_keys, o.subject)
            .with_coding(o.content_encoding)
            .with_vapid_scheme(o.vapid_scheme);

        match o.ttl {
            Some(ttl) => options.with_ttl(ttl),
            None => options,
        }
    }
}

/// Encrypts push messages and builds push requests.
#[derive(Debug)]
#[wasm_bindgen(js_name = WebPush)]
pub struct JsWebPush(Pusher<RustCrypto>);

fn to_js<E: core::fmt::Display>(e: E) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

fn set(obj: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(obj, &JsValue::from_str(key), value).map(|_| ())
}

// `SystemTime` is not available in the browser.
fn expiry() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64 + VAPID_VALIDITY
}

fn headers_to_js(headers: &Headers) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(headers.serialize(&serializer)?)
}

fn payload_bytes(payload: Option<Uint8Array>) -> Vec<u8> {
    payload.map(|p| p.to_vec()).unwrap_or_default()
}

#[wasm_bindgen(js_class = WebPush)]
impl JsWebPush {
    /// Constructs a new `WebPush` from [`IPushOptions`].
    #[wasm_bindgen(constructor)]
    pub fn new(options: IPushOptions) -> Result<JsWebPush, JsValue> {
        let options: WebPushOptions = serde_wasm_bindgen::from_value(options.into())?;

        Ok(JsWebPush(Pusher::new(options.into())))
    }

    /// Builds the request that delivers `payload` to `subscription`.
    ///
    /// Returns `[url, { headers, body, method }]`. The body is `null` for an empty payload.
    ///
    /// # Arguments
    ///
    /// * `subscription` - The subscription, e.g. `pushSubscription.toJSON()`.
    /// * `payload`      - The plaintext, at most 4079 bytes for `aes128gcm` and 4078 for `aesgcm`.
    #[wasm_bindgen(js_name = getRequestDetails)]
    pub fn get_request_details(
        &self,
        subscription: ISubscription,
        payload: Option<Uint8Array>,
    ) -> Result<RequestDetails, JsValue> {
        let subscription: Subscription = serde_wasm_bindgen::from_value(subscription.into())?;
        let payload = payload_bytes(payload);

        let RequestDescriptor {
            url,
            method,
            headers,
            body,
        } = self
            .0
            .get_request_details_with_expiry(&subscription, &payload, Some(expiry()))
            .map_err(to_js)?;

        let init = Object::new();
        set(&init, "headers", &headers_to_js(&headers)?)?;
        set(
            &init,
            "body",
            &body.map_or(JsValue::NULL, |b| Uint8Array::from(&b[..]).into()),
        )?;
        set(&init, "method", &JsValue::from_str(method.as_str()))?;

        let res = Array::of2(&JsValue::from_str(&url), &init);

        Ok(res.unchecked_into())
    }

    /// Encrypts `payload` for `subscription` without building a request.
    ///
    /// Returns `null` for an empty payload.
    #[wasm_bindgen(js_name = encryptPayload)]
    pub fn encrypt_payload(
        &self,
        subscription: ISubscription,
        payload: Option<Uint8Array>,
    ) -> Result<Option<IEncryptedPayload>, JsValue> {
        let subscription: Subscription = serde_wasm_bindgen::from_value(subscription.into())?;

        let encrypted = match self
            .0
            .encrypt_payload(&subscription, &payload_bytes(payload))
            .map_err(to_js)?
        {
            Some(encrypted) => encrypted,
            None => return Ok(None),
        };

        let obj = Object::new();
        set(
            &obj,
            "cipherText",
            &Uint8Array::from(&encrypted.cipher_text[..]).into(),
        )?;
        set(&obj, "salt", &JsValue::from_str(&encrypted.salt_base64url()))?;
        set(
            &obj,
            "publicServerKey",
            &JsValue::from_str(&encrypted.public_server_key_base64url()),
        )?;

        Ok(Some(obj.unchecked_into()))
    }
}

/// Generates a VAPID key pair, both keys base64url encoded.
#[wasm_bindgen(js_name = generateVapidKeys)]
pub fn js_generate_vapid_keys() -> Result<IKeyPair, JsValue> {
    let mut rng = rand::thread_rng();
    let keys = VapidKeys::generate(&mut rng);

    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let res = keys.serialize(&serializer)?;

    Ok(res.unchecked_into())
}

/// The URL to `fetch` a push request for `endpoint` from a browser.
///
/// Push services that do not allow cross-origin requests are reached through `proxy`, a prefix
/// to which the percent-encoded endpoint is appended.
#[wasm_bindgen(js_name = deliveryUrl)]
pub fn js_delivery_url(endpoint: &str, proxy: Option<String>) -> String {
    let req = RequestDescriptor {
        url: endpoint.to_string(),
        method: Method::Post,
        headers: Headers::new(),
        body: None,
    };

    req.delivery_url(proxy.as_deref())
}
