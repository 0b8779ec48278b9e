use std::net::SocketAddr;

use anyhow::{anyhow, Result};
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio::net::{lookup_host, TcpListener};
use tokio::signal;
use tracing::{error, info, warn};
use wakecast_wol::{MacAddr, Password};

use crate::route;

const DEFAULT_REMOTE: &str = "255.255.255.255:9";

pub async fn start(http_addr: &str) -> Result<()> {
    let listener = TcpListener::bind(http_addr).await?;
    let local_addr = listener.local_addr()?;
    if !local_addr.ip().is_loopback() {
        warn!("listening on a non-loopback address");
    }
    info!("serving on http://{local_addr}");

    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(usage))
        .route("/:macs", get(wake_targets))
}

async fn usage() -> &'static str {
    "wake targets with GET /<comma separated mac address list>\n\
     valid params are:\n\
     \tvia: the local address or device to send on\n\
     \tremote: the remote address to send to (default: 255.255.255.255:9)\n\
     \tpass: the wake password for all targets - 12 digit hex number\n"
}

#[derive(Debug, Deserialize)]
struct WakeParams {
    via: Option<String>,
    remote: Option<String>,
    pass: Option<String>,
}

async fn wake_targets(
    Path(macs): Path<String>,
    Query(params): Query<WakeParams>,
) -> Result<String, (StatusCode, String)> {
    let via = params.via.unwrap_or_default();
    let local_source = route::resolve_source(&via)
        .await
        .map_err(|e| bad_request(format!("invalid via parameter: {e:#}")))?;
    let local = match local_source.as_str() {
        "" => None,
        addr => Some(resolve_udp_addr(addr).await.map_err(|e| {
            bad_request(format!("could not resolve local {addr:?} as a UDP address: {e:#}"))
        })?),
    };

    let remote_addr = match params.remote.as_deref() {
        None | Some("") => DEFAULT_REMOTE,
        Some(remote) => remote,
    };
    let remote = resolve_udp_addr(remote_addr).await.map_err(|e| {
        bad_request(format!(
            "could not resolve remote {remote_addr:?} as a UDP address: {e:#}"
        ))
    })?;

    let password = match params.pass.as_deref() {
        None | Some("") => None,
        Some(pass) => Some(
            pass.parse::<Password>()
                .map_err(|e| bad_request(format!("invalid wake password: {e}")))?,
        ),
    };

    let mut body = String::new();
    for target in macs.split(',') {
        let mac = match target.parse::<MacAddr>() {
            Ok(mac) => mac,
            Err(e) => {
                error!("could not parse {target:?} as a MAC address: {e}");
                continue;
            }
        };

        match wakecast_wol::wake(mac, password, local, remote) {
            Ok(()) => {
                info!("sent wake packet to {mac}");
                body.push_str(&format!("👋 {mac}\n"));
            }
            Err(e) => error!("error attempting to wake {mac}: {e}"),
        }
    }

    Ok(body)
}

fn bad_request(message: String) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, message)
}

async fn resolve_udp_addr(addr: &str) -> Result<SocketAddr> {
    lookup_host(addr)
        .await?
        .next()
        .ok_or_else(|| anyhow!("no addresses found"))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
