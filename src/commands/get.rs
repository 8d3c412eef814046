use anyhow::{bail, Context as AnyhowContext, Result};
use restconf::RestconfClient;

use crate::cli::GetArgs;
use crate::config::{self, StateFile};
use crate::progress;
use crate::Context;

pub fn run(ctx: &Context, args: &GetArgs) -> Result<()> {
    let file_device = match &args.file {
        Some(path) => StateFile::load(path)?.device,
        None => None,
    };
    let device = config::resolve_device(file_device.as_ref(), &args.device)?;
    let client = RestconfClient::new(device).context("Invalid device settings")?;

    let pb = (!ctx.quiet).then(|| progress::spinner(&format!("GET {}", args.uri)));
    let response = client.get(&args.uri);
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let response = response.with_context(|| format!("Could not read {}", args.uri))?;
    if !response.is_read_success() {
        let detail = response.body_text().unwrap_or_default();
        bail!("{} returned status {} {}", args.uri, response.status, detail);
    }

    match &response.body {
        Some(body) => println!("{}", serde_json::to_string_pretty(body)?),
        None => log::info!("{} returned an empty body", args.uri),
    }
    Ok(())
}
