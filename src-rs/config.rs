use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::helpers::{env_or_parse, load_list_from_env};

pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["https://your-app-name.vercel.app", "http://localhost:3000"];

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|origin| origin.to_string()).collect(),
        }
    }
}

impl ServerConfig {
    /// Reads `HOST`, `PORT` and `TASKMASTER_ALLOWED_ORIGINS`, keeping the
    /// default for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let origins = load_list_from_env("TASKMASTER_ALLOWED_ORIGINS");
        Self {
            host: env_or_parse("HOST", defaults.host),
            port: env_or_parse("PORT", defaults.port),
            allowed_origins: if origins.is_empty() {
                defaults.allowed_origins
            } else {
                origins
            },
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
