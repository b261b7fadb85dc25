//! Serve command: run the shared lineage sync API

use clap::Args;
use std::net::SocketAddr;

use crate::AppContext;

#[derive(Args)]
pub struct ServeArgs {
    /// Listen address
    #[arg(long, default_value = "127.0.0.1:8787")]
    pub addr: String,
}

pub async fn run(args: &ServeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let addr: SocketAddr = args.addr.parse()?;
    tracing::info!("Starting lineage sync API on {}", addr);
    kinroots_server::serve(addr, ctx.store.clone()).await
}
