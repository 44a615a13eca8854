use clap::{Args, Parser, ValueHint};
use wp_core::ContentCoding;

/// Command line interface for Web Push: generate VAPID keys, build and send push messages.
#[derive(Parser, Debug)]
#[clap(
    name = "wp-cli",
    version = "0.1",
    author = "Wouter Geraedts <w.geraedts@sarif.nl>, Leon Botros <l.botros@cs.ru.nl>"
)]
pub struct Opts {
    #[clap(subcommand)]
    pub subcmd: Subcommand,
}

#[derive(Parser, Debug)]
pub enum Subcommand {
    Keys(KeysOpts),
    Request(RequestOpts),
    Send(SendOpts),
}

/// Generate a VAPID key pair.
#[derive(Parser, Debug)]
#[clap(name = "Keys")]
pub struct KeysOpts {
    /// Write the key pair as JSON to this file (created with mode 0600) instead of stdout.
    #[clap(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<String>,
}

/// Print the encrypted push request as JSON, without sending it.
#[derive(Parser, Debug)]
#[clap(name = "Request")]
pub struct RequestOpts {
    #[clap(flatten)]
    pub push: PushArgs,
}

/// Encrypt and deliver a push message.
#[derive(Parser, Debug)]
#[clap(name = "Send")]
pub struct SendOpts {
    #[clap(flatten)]
    pub push: PushArgs,

    /// Request timeout in seconds.
    #[clap(long, default_value = "30")]
    pub timeout: u64,
}

/// The VAPID identity of the application server.
#[derive(Args, Debug)]
pub struct VapidArgs {
    /// JSON key pair file, as written by `keys`.
    #[clap(long, value_hint = ValueHint::FilePath)]
    pub vapid_keys: Option<String>,

    /// Base64url encoded VAPID public key.
    #[clap(long, env = "WEB_PUSH_VAPID_PUBLIC_KEY", hide_env_values = true)]
    pub vapid_public_key: Option<String>,

    /// Base64url encoded VAPID private key.
    #[clap(long, env = "WEB_PUSH_VAPID_PRIVATE_KEY", hide_env_values = true)]
    pub vapid_private_key: Option<String>,

    /// Contact URL of the application server (`mailto:` or `https:`).
    #[clap(short, long, env = "WEB_PUSH_VAPID_SUBJECT", value_hint = ValueHint::Url)]
    pub subject: String,
}

/// What to send, to whom and how.
#[derive(Args, Debug)]
pub struct PushArgs {
    /// Subscription JSON, or a path to a file containing it.
    #[clap(index = 1)]
    pub subscription: String,

    /// Message text. Without a message (or file) an empty push is sent.
    #[clap(index = 2)]
    pub message: Option<String>,

    /// Read the message from this file.
    #[clap(short = 'f', long, value_hint = ValueHint::FilePath, conflicts_with = "message")]
    pub message_file: Option<String>,

    #[clap(flatten)]
    pub vapid: VapidArgs,

    /// Content coding of the body.
    #[clap(short, long, possible_values = &["aes128gcm", "aesgcm"], default_value = "aes128gcm")]
    pub coding: ContentCoding,

    /// Time-to-live at the push service, in seconds.
    #[clap(short, long, default_value = "60")]
    pub ttl: u32,

    /// Use the RFC 8292 `Authorization: vapid` header instead of `WebPush` plus `Crypto-Key`.
    #[clap(long)]
    pub rfc8292: bool,

    /// CORS proxy prefix for push services that do not support CORS, e.g. `https://corsproxy.io/?`.
    #[clap(long, value_hint = ValueHint::Url)]
    pub proxy: Option<String>,
}
