//! Serve a rendered site directory.

use log::warn;
use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

pub async fn run_serve(root: PathBuf, host: IpAddr, port: u16) -> anyhow::Result<()> {
    if !root.join("index.html").is_file() {
        warn!(
            "{} has no index.html; run `tmx-cli render` first",
            root.display()
        );
    }
    tmx_server::serve(SocketAddr::new(host, port), root).await
}
