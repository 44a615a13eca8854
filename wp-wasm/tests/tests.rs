use js_sys::{Array, Reflect, Uint8Array};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use wp_core::base64url;
use wp_core::test::TestSetup;
use wp_wasm::{js_delivery_url, js_generate_vapid_keys, JsWebPush};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn to_js<T: Serialize>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).unwrap()
}

fn get(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).unwrap()
}

fn web_push(setup: &TestSetup, coding: &str) -> JsWebPush {
    let options = serde_json::json!({
        "vapidKeys": setup.vapid_keys,
        "subject": "mailto:admin@example.com",
        "contentEncoding": coding,
    });

    JsWebPush::new(to_js(&options).unchecked_into()).unwrap()
}

fn subscription(endpoint: &str) -> JsValue {
    let setup = TestSetup::new(endpoint);
    to_js(&setup.subscription)
}

#[wasm_bindgen_test]
fn test_request_details() {
    let setup = TestSetup::default();
    let wp = web_push(&setup, "aes128gcm");

    let payload = Uint8Array::from(TestSetup::PLAINTEXT);
    let res: Array = wp
        .get_request_details(
            subscription("https://fcm.googleapis.com/fcm/send/abc").unchecked_into(),
            Some(payload),
        )
        .unwrap()
        .unchecked_into();

    assert_eq!(
        res.get(0).as_string().unwrap(),
        "https://fcm.googleapis.com/wp/abc"
    );

    let init = res.get(1);
    assert_eq!(get(&init, "method").as_string().unwrap(), "POST");

    let headers = get(&init, "headers");
    assert_eq!(get(&headers, "TTL").as_f64().unwrap(), 60.0);
    assert_eq!(
        get(&headers, "Content-Encoding").as_string().unwrap(),
        "aes128gcm"
    );
    assert!(get(&headers, "Authorization")
        .as_string()
        .unwrap()
        .starts_with("WebPush "));

    let body: Uint8Array = get(&init, "body").unchecked_into();
    assert_eq!(
        body.length() as usize,
        86 + TestSetup::PLAINTEXT.len() + 1 + 16
    );
}

#[wasm_bindgen_test]
fn test_empty_payload() {
    let setup = TestSetup::default();
    let wp = web_push(&setup, "aesgcm");

    let res: Array = wp
        .get_request_details(subscription(TestSetup::ENDPOINT).unchecked_into(), None)
        .unwrap()
        .unchecked_into();

    let init = res.get(1);
    assert_eq!(get(&init, "method").as_string().unwrap(), "GET");
    assert!(get(&init, "body").is_null());
    assert_eq!(
        get(&get(&init, "headers"), "Content-Length").as_f64().unwrap(),
        0.0
    );

    let encrypted = wp
        .encrypt_payload(subscription(TestSetup::ENDPOINT).unchecked_into(), None)
        .unwrap();
    assert!(encrypted.is_none());
}

#[wasm_bindgen_test]
fn test_payload_too_large() {
    let setup = TestSetup::default();
    let wp = web_push(&setup, "aesgcm");

    let payload = Uint8Array::from(&[0u8; 4079][..]);
    assert!(wp
        .get_request_details(
            subscription(TestSetup::ENDPOINT).unchecked_into(),
            Some(payload)
        )
        .is_err());
}

#[wasm_bindgen_test]
fn test_encrypt_payload() {
    let setup = TestSetup::default();
    let wp = web_push(&setup, "aesgcm");

    let payload = Uint8Array::from(&b"hi"[..]);
    let encrypted: JsValue = wp
        .encrypt_payload(
            subscription(TestSetup::ENDPOINT).unchecked_into(),
            Some(payload),
        )
        .unwrap()
        .unwrap()
        .into();

    let cipher_text: Uint8Array = get(&encrypted, "cipherText").unchecked_into();
    assert_eq!(cipher_text.length(), 2 + 2 + 16);

    let salt = get(&encrypted, "salt").as_string().unwrap();
    assert_eq!(base64url::decode(&salt).unwrap().len(), 16);

    let key = get(&encrypted, "publicServerKey").as_string().unwrap();
    assert_eq!(base64url::decode(&key).unwrap().len(), 65);
}

#[wasm_bindgen_test]
fn test_generate_vapid_keys() {
    let keys: JsValue = js_generate_vapid_keys().unwrap().into();

    let public = get(&keys, "publicKey").as_string().unwrap();
    let private = get(&keys, "privateKey").as_string().unwrap();

    assert_eq!(public.len(), 87);
    assert_eq!(private.len(), 43);
}

#[wasm_bindgen_test]
fn test_delivery_url() {
    let fcm = "https://fcm.googleapis.com/wp/abc";
    assert_eq!(
        js_delivery_url(fcm, Some("https://corsproxy.io/?".to_string())),
        "https://corsproxy.io/?https%3A%2F%2Ffcm.googleapis.com%2Fwp%2Fabc"
    );

    let mozilla = "https://updates.push.services.mozilla.com/wpush/v2/abc";
    assert_eq!(
        js_delivery_url(mozilla, Some("https://corsproxy.io/?".to_string())),
        mozilla
    );
    assert_eq!(js_delivery_url(fcm, None), fcm);
}
