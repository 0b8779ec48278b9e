use std::net::{SocketAddr, ToSocketAddrs};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{error, info, Level};
use wakecast_wol::{MacAddr, Password};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Opt {
    /// Local address to send on.
    #[clap(long)]
    via: Option<String>,

    /// Remote address to send to.
    #[clap(long, default_value = "255.255.255.255:9")]
    remote: String,

    /// Wake password for all targets, 12 hex digits.
    #[clap(long)]
    pass: Option<String>,

    /// Target MAC addresses.
    #[clap(required = true)]
    macs: Vec<String>,
}

fn main() -> Result<()> {
    let opt = Opt::parse();

    wakecast_trace::setup_tracing_to_stdout(Level::INFO);

    let remote = resolve_udp_addr(&opt.remote)
        .with_context(|| format!("could not resolve remote {:?} as a UDP address", opt.remote))?;
    let local = opt
        .via
        .as_deref()
        .map(|via| {
            resolve_udp_addr(via)
                .with_context(|| format!("could not resolve local {via:?} as a UDP address"))
        })
        .transpose()?;
    let password = opt
        .pass
        .as_deref()
        .map(str::parse::<Password>)
        .transpose()
        .context("invalid wake password")?;

    for target in &opt.macs {
        let mac = match target.parse::<MacAddr>() {
            Ok(mac) => mac,
            Err(e) => {
                error!("could not parse {target:?} as a MAC address: {e}");
                continue;
            }
        };

        match wakecast_wol::wake(mac, password, local, remote) {
            Ok(()) => info!("sent wake packet to {mac}"),
            Err(e) => error!("error attempting to wake {mac}: {e}"),
        }
    }

    Ok(())
}

fn resolve_udp_addr(addr: &str) -> Result<SocketAddr> {
    addr.to_socket_addrs()?
        .next()
        .ok_or_else(|| anyhow!("no addresses found"))
}
