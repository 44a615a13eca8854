use crate::client::Client;
use crate::error::Error;
use crate::opts::SendOpts;
use crate::util::{build_pusher, load_message, load_subscription};
use std::time::Duration;

pub async fn exec(opts: SendOpts) -> Result<(), Error> {
    let SendOpts { push, timeout } = opts;

    let subscription = load_subscription(&push.subscription)?;
    let message = load_message(&push)?;
    let pusher = build_pusher(&push)?;

    let req = pusher.get_request_details(&subscription, &message)?;
    let client = Client::new(Duration::from_secs(timeout), push.proxy.clone())?;

    log::info!(
        "sending {} bytes to {:?} push service",
        message.len(),
        req.push_service()
    );

    let status = client.deliver(&req).await?;
    log::info!("delivered ({status})");

    Ok(())
}
