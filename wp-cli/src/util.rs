use crate::error::Error;
use crate::opts::{PushArgs, VapidArgs};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use wp_core::crypto::rust::RustCrypto;
use wp_core::keys::VapidKeys;
use wp_core::vapid::VapidScheme;
use wp_core::{PushOptions, Pusher, Subscription};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Write `contents` to a new file only readable by the owner.
pub(crate) fn write_owned<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    contents: C,
) -> std::io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true);

    #[cfg(unix)]
    opts.mode(0o600);

    opts.open(path)?.write_all(contents.as_ref())
}

/// Inline JSON, or else the contents of the file it names.
fn json_or_file(arg: &str) -> Result<String, Error> {
    if arg.trim_start().starts_with('{') {
        Ok(arg.to_string())
    } else {
        Ok(std::fs::read_to_string(arg)?)
    }
}

pub(crate) fn load_subscription(arg: &str) -> Result<Subscription, Error> {
    let json = json_or_file(arg)?;
    Ok(Subscription::from_json(&json)?)
}

pub(crate) fn load_message(args: &PushArgs) -> Result<Vec<u8>, Error> {
    match (&args.message, &args.message_file) {
        (_, Some(path)) => Ok(std::fs::read(path)?),
        (Some(msg), None) => Ok(msg.as_bytes().to_vec()),
        (None, None) => Ok(Vec::new()),
    }
}

pub(crate) fn load_vapid_keys(args: &VapidArgs) -> Result<VapidKeys, Error> {
    if let Some(path) = &args.vapid_keys {
        let json = std::fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&json)?);
    }

    match (&args.vapid_public_key, &args.vapid_private_key) {
        (Some(public), Some(private)) => Ok(VapidKeys::from_base64url(public, private)?),
        _ => Err(Error::NoVapidKeys),
    }
}

pub(crate) fn build_pusher(args: &PushArgs) -> Result<Pusher<RustCrypto>, Error> {
    let scheme = if args.rfc8292 {
        VapidScheme::Vapid
    } else {
        VapidScheme::WebPush
    };

    let options = PushOptions::new(load_vapid_keys(&args.vapid)?, args.vapid.subject.clone())
        .with_coding(args.coding)
        .with_ttl(args.ttl)
        .with_vapid_scheme(scheme);

    Ok(Pusher::new(options))
}
