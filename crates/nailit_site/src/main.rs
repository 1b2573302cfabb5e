// SPDX-License-Identifier: MIT OR Apache-2.0
//! `nailit` - headless preview of the Nail It! site
//!
//! Plays a scripted visit through the landing and signup pages and logs what
//! the motion layer does. Pass a RON config path as the first argument or in
//! `NAILIT_CONFIG`; set `emit_snapshots` in the preview section to stream
//! JSON frames to stdout.

use nailit_site::{driver, SiteConfig, SiteError};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("nailit_site=info,nailit_motion=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Nail It! preview v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        tracing::error!("Preview failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), SiteError> {
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = SiteConfig::resolve(path.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(driver::run(config))?;
    Ok(())
}
