use crate::error::Error;
use crate::opts::KeysOpts;
use crate::util::write_owned;
use serde_json::json;
use wp_core::base64url;
use wp_core::consts::{COORDINATE_SIZE, PUBLIC_KEY_SIZE};
use wp_core::keys::VapidKeys;

pub fn exec(opts: KeysOpts) -> Result<(), Error> {
    let mut rng = rand::thread_rng();
    let keys = VapidKeys::generate(&mut rng);

    let (public, private) = keys.to_base64url();
    let raw = keys.public_key.to_uncompressed();

    // Skip the uncompressed point tag, then split into the coordinates.
    let jwk = json!({
        "kty": "EC",
        "crv": "P-256",
        "x": base64url::encode_range(&raw, Some(1), Some(1 + COORDINATE_SIZE))?,
        "y": base64url::encode_range(&raw, Some(1 + COORDINATE_SIZE), Some(PUBLIC_KEY_SIZE))?,
    });

    let json = serde_json::to_string_pretty(&keys)?;

    match &opts.output {
        Some(path) => {
            write_owned(path, &json)?;
            log::info!("VAPID key pair written to {path}");
        }
        None => println!("{json}"),
    }

    println!("WEB_PUSH_VAPID_PUBLIC_KEY={public}");
    if opts.output.is_none() {
        println!("WEB_PUSH_VAPID_PRIVATE_KEY={private}");
    }
    println!("{}", serde_json::to_string_pretty(&jwk)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vapid.json");

        exec(KeysOpts {
            output: Some(path.to_string_lossy().into_owned()),
        })
        .unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let keys: VapidKeys = serde_json::from_str(&json).unwrap();
        assert_eq!(keys.private_key.public_key(), keys.public_key);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_existing_file_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vapid.json");
        std::fs::write(&path, "keep").unwrap();

        let res = exec(KeysOpts {
            output: Some(path.to_string_lossy().into_owned()),
        });

        assert!(matches!(res, Err(Error::StdIO(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep");
    }
}
