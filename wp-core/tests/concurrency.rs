use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use wp_core::crypto::rust::RustCrypto;
use wp_core::test::TestSetup;
use wp_core::{ContentCoding, PushOptions, Pusher};

const THREADS: usize = 8;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_pusher_is_send_sync() {
    assert_send_sync::<Pusher<RustCrypto>>();
    assert_send_sync::<PushOptions>();
}

fn encrypt_in_threads(coding: ContentCoding) {
    let setup = TestSetup::default();
    let pusher = Arc::new(Pusher::new(
        PushOptions::new(setup.vapid_keys.clone(), "mailto:admin@example.com").with_coding(coding),
    ));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let pusher = Arc::clone(&pusher);
            let subscription = setup.subscription.clone();
            thread::spawn(move || {
                pusher
                    .encrypt_payload(&subscription, TestSetup::PLAINTEXT)
                    .unwrap()
                    .unwrap()
            })
        })
        .collect();

    let payloads: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let salts: HashSet<_> = payloads.iter().map(|p| p.salt).collect();
    let server_keys: HashSet<_> = payloads
        .iter()
        .map(|p| p.public_server_key.to_uncompressed())
        .collect();
    let bodies: HashSet<_> = payloads.iter().map(|p| p.cipher_text.clone()).collect();

    assert_eq!(salts.len(), THREADS);
    assert_eq!(server_keys.len(), THREADS);
    assert_eq!(bodies.len(), THREADS);
}

#[test]
fn test_shared_pusher_aes128gcm() {
    encrypt_in_threads(ContentCoding::Aes128Gcm);
}

#[test]
fn test_shared_pusher_aesgcm() {
    encrypt_in_threads(ContentCoding::AesGcm);
}
