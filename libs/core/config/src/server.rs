use crate::{env_or_default, env_parse, ConfigError, FromEnv};
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

/// Fixed bound on reading a request and on producing its response.
pub const IO_TIMEOUT: Duration = Duration::from_secs(10);

/// Socket file name used when `LISTEN_TYPE=sock` and no `SOCKET_PATH` is given
pub const DEFAULT_SOCKET_NAME: &str = "app.sock";

/// Where the HTTP server accepts connections
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Listen {
    /// TCP socket bound to `host:port`
    Tcp { host: String, port: u16 },
    /// Unix domain socket at the given filesystem path
    Unix(PathBuf),
}

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub listen: Listen,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            listen: Listen::Tcp { host, port },
            read_timeout: IO_TIMEOUT,
            write_timeout: IO_TIMEOUT,
        }
    }

    pub fn unix(path: impl Into<PathBuf>) -> Self {
        Self {
            listen: Listen::Unix(path.into()),
            read_timeout: IO_TIMEOUT,
            write_timeout: IO_TIMEOUT,
        }
    }

    /// Human-readable listen address ("host:port" or the socket path)
    pub fn address(&self) -> String {
        match &self.listen {
            Listen::Tcp { host, port } => format!("{}:{}", host, port),
            Listen::Unix(path) => path.display().to_string(),
        }
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables:
    /// - LISTEN_TYPE: `port` (default) or `sock`
    /// - HOST: defaults to 0.0.0.0
    /// - PORT: defaults to 8080
    /// - SOCKET_PATH: defaults to `app.sock` next to the executable
    fn from_env() -> Result<Self, ConfigError> {
        let listen_type = env_or_default("LISTEN_TYPE", "port");

        match listen_type.to_ascii_lowercase().as_str() {
            "port" | "tcp" => {
                let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
                let port = env_parse("PORT", "8080")?;
                Ok(Self::new(host, port))
            }
            "sock" | "unix" => {
                let path = match std::env::var("SOCKET_PATH") {
                    Ok(path) => PathBuf::from(path),
                    Err(_) => default_socket_path()?,
                };
                Ok(Self::unix(path))
            }
            other => Err(ConfigError::ParseError {
                key: "LISTEN_TYPE".to_string(),
                details: format!("expected 'port' or 'sock', got '{}'", other),
            }),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED.to_string(), 8080)
    }
}

fn default_socket_path() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(|e| ConfigError::ParseError {
        key: "SOCKET_PATH".to_string(),
        details: format!("cannot resolve executable directory: {}", e),
    })?;

    let dir = exe.parent().map(PathBuf::from).unwrap_or_default();
    Ok(dir.join(DEFAULT_SOCKET_NAME))
}
