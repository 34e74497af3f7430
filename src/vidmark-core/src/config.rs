//! Configuration management
//!
//! Settings come from an optional TOML file; command-line flags override
//! individual values. The result is read-only once the server starts.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub tool: ToolConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body, in megabytes
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,
}

/// Scratch storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root for per-request workspaces, removed on shutdown
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,
}

/// External tool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// FFmpeg executable, looked up on PATH unless absolute
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: PathBuf,
}

fn default_host() -> IpAddr { IpAddr::V4(Ipv4Addr::LOCALHOST) }
fn default_port() -> u16 { 8000 }
fn default_body_limit_mb() -> usize { 2048 }
fn default_temp_dir() -> PathBuf { PathBuf::from("temp_files") }
fn default_ffmpeg() -> PathBuf { PathBuf::from("ffmpeg") }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_mb: default_body_limit_mb(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { temp_dir: default_temp_dir() }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self { ffmpeg: default_ffmpeg() }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {:?}", path.as_ref()))?;
        toml::from_str(&content).context("Failed to parse config TOML")
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.server.body_limit_mb.saturating_mul(1024 * 1024)
    }
}
