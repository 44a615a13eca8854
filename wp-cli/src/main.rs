mod client;
mod error;
mod keys;
mod opts;
mod request;
mod send;
mod util;

use crate::opts::{Opts, Subcommand};
use clap::Parser;

#[tokio::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let opts = Opts::parse();

    let res = match opts.subcmd {
        Subcommand::Keys(o) => crate::keys::exec(o),
        Subcommand::Request(o) => crate::request::exec(o),
        Subcommand::Send(o) => crate::send::exec(o).await,
    };

    if let Err(e) = res {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
