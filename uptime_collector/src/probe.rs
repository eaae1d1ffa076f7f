//! Connectivity probe deciding whether the internet is reachable

use crate::config::Config;
use crate::errors::{CollectorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Anything able to tell whether the connection is currently up
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn is_up(&self) -> bool;
}

/// Outcome of a single probe attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Host dialed and page loaded with a status below 400
    Up,
    /// TCP connection could not be opened in time
    Unreachable(String),
    /// The peer answering the dial lives on the local network
    LocalNetwork(SocketAddr),
    /// Page request failed before a response arrived
    RequestFailed(String),
    /// Page answered with an error status
    BadStatus(u16),
}

/// Dial-then-fetch probe with escalating timeouts
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    check_host: String,
    check_port: u16,
    check_url: String,
    timeouts: Vec<Duration>,
    is_local: fn(IpAddr) -> bool,
}

impl HttpProbe {
    pub fn new(
        check_host: String,
        check_port: u16,
        check_url: String,
        timeouts: Vec<Duration>,
    ) -> Result<Self> {
        if timeouts.is_empty() {
            return Err(CollectorError::Config(
                "probe needs at least one timeout".to_string(),
            ));
        }

        let client = Client::builder()
            .user_agent(format!("uptime_collector/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CollectorError::Http)?;

        Ok(Self {
            client,
            check_host,
            check_port,
            check_url,
            timeouts,
            is_local: is_local_network,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.check_host.clone(),
            config.check_port,
            config.check_url.clone(),
            config.probe_timeouts.clone(),
        )
    }

    /// Replace the check deciding which peers sit on the local network
    pub fn with_local_network_check(mut self, is_local: fn(IpAddr) -> bool) -> Self {
        self.is_local = is_local;
        self
    }

    /// Run one attempt bounded by `limit` for both the dial and the fetch
    pub async fn attempt(&self, limit: Duration) -> ProbeOutcome {
        let address = (self.check_host.as_str(), self.check_port);
        let stream = match timeout(limit, TcpStream::connect(address)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return ProbeOutcome::Unreachable(e.to_string()),
            Err(_) => return ProbeOutcome::Unreachable("dial timeout".to_string()),
        };

        let peer = match stream.peer_addr() {
            Ok(peer) => peer,
            Err(e) => return ProbeOutcome::Unreachable(e.to_string()),
        };
        drop(stream);
        debug!("Reachable {}", peer);

        if (self.is_local)(peer.ip()) {
            return ProbeOutcome::LocalNetwork(peer);
        }

        match self.client.get(&self.check_url).timeout(limit).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                debug!("Response status {}", status);
                if status < 400 {
                    ProbeOutcome::Up
                } else {
                    ProbeOutcome::BadStatus(status)
                }
            }
            Err(e) => ProbeOutcome::RequestFailed(e.to_string()),
        }
    }
}

#[async_trait]
impl ConnectivityProbe for HttpProbe {
    async fn is_up(&self) -> bool {
        for limit in &self.timeouts {
            match self.attempt(*limit).await {
                ProbeOutcome::Up => return true,
                ProbeOutcome::LocalNetwork(peer) => {
                    debug!("Response from {} came from inside the local network", peer);
                }
                other => debug!("Probe attempt failed: {:?}", other),
            }
            debug!("Unreachable within {:?}", limit);
        }

        false
    }
}

/// True when the address belongs to a private LAN range, e.g. a captive
/// router answering on behalf of the real host.
pub fn is_local_network(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_link_local(),
        IpAddr::V6(v6) => (v6.segments()[0] & 0xfe00) == 0xfc00,
    }
}
