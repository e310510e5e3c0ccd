//! HTTP server configuration.

use std::net::SocketAddr;

use backend::inbound::http::session_config::SessionSettings;

use super::state_builders::OutboundPorts;

/// Everything `create_server` needs, resolved from settings at startup.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) ports: OutboundPorts,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, ports: OutboundPorts) -> Self {
        Self {
            session,
            bind_addr,
            ports,
        }
    }
}
