//! Run the proxy routes locally.

use anyhow::{Context as _, Result};
use woodie_proxy::ProxyState;

use super::ServeArgs;
use crate::context::Context;

/// Run the serve command.
pub async fn run(args: ServeArgs, ctx: &Context) -> Result<()> {
    let bind = args.bind.unwrap_or_else(|| ctx.config.server.bind.clone());
    let client = ctx.client()?;

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    let addr = listener.local_addr()?;

    ctx.output.success(&format!("Proxy listening on http://{}", addr));
    ctx.output.kv("Upstream", &ctx.config.api.base_url);
    ctx.output.kv("Store", &ctx.config.api.store_id);
    ctx.output.info("Press Ctrl-C to stop.");

    woodie_proxy::serve(listener, ProxyState::new(client))
        .await
        .context("Proxy server failed")?;

    ctx.output.info("Proxy stopped.");
    Ok(())
}
