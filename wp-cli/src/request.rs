use crate::error::Error;
use crate::opts::RequestOpts;
use crate::util::{build_pusher, load_message, load_subscription};

pub fn exec(opts: RequestOpts) -> Result<(), Error> {
    let RequestOpts { push } = opts;

    let subscription = load_subscription(&push.subscription)?;
    let message = load_message(&push)?;
    let pusher = build_pusher(&push)?;

    let req = pusher.get_request_details(&subscription, &message)?;
    let service = req.push_service();

    println!("{}", serde_json::to_string_pretty(&req)?);

    if push.proxy.is_some() && !service.supports_cors() {
        eprintln!("delivery url: {}", req.delivery_url(push.proxy.as_deref()));
    }

    Ok(())
}
