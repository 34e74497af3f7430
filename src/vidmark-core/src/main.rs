//! Vidmark - logo and text overlay service
//!
//! Serves `POST /overlay` and delegates the actual compositing to FFmpeg.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::{info, warn, Level};

use vidmark_core::colored_logger::{init_component_logger, Component};
use vidmark_core::config::Config;
use vidmark_processing::check_tool;
use vidmark_web::{AppState, ScratchRoot, ServerSettings};

#[derive(Parser)]
#[command(name = "vidmark")]
#[command(about = "Overlay a logo or text onto uploaded videos over HTTP")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Root directory for per-request scratch files
        #[arg(long)]
        temp_dir: Option<PathBuf>,

        /// FFmpeg executable
        #[arg(long)]
        ffmpeg: Option<PathBuf>,
    },

    /// Check that FFmpeg can be executed
    Check {
        /// FFmpeg executable
        #[arg(long)]
        ffmpeg: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port, temp_dir, ffmpeg } => {
            init_component_logger(Component::Server, level)?;

            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(dir) = temp_dir {
                config.storage.temp_dir = dir;
            }
            if let Some(ffmpeg) = ffmpeg {
                config.tool.ffmpeg = ffmpeg;
            }

            cmd_serve(config)?;
        }
        Commands::Check { ffmpeg } => {
            init_component_logger(Component::Check, level)?;

            if let Some(ffmpeg) = ffmpeg {
                config.tool.ffmpeg = ffmpeg;
            }

            cmd_check(&config)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn cmd_serve(config: Config) -> Result<()> {
    info!("starting vidmark overlay service");
    info!("temp directory: {:?}", config.storage.temp_dir);
    info!("ffmpeg: {:?}", config.tool.ffmpeg);

    if !check_tool(&config.tool.ffmpeg) {
        warn!("ffmpeg not runnable at {:?}, overlay requests will fail", config.tool.ffmpeg);
    }

    let scratch = ScratchRoot::init(&config.storage.temp_dir)?;
    let state = AppState::new(scratch, config.tool.ffmpeg.clone());

    let settings = ServerSettings {
        addr: config.socket_addr(),
        body_limit: config.body_limit_bytes(),
    };

    vidmark_web::serve(state, settings, shutdown_signal()).await?;

    info!("vidmark stopped");
    Ok(())
}

fn cmd_check(config: &Config) -> Result<()> {
    println!("checking dependencies...\n");

    let ffmpeg_ok = check_tool(&config.tool.ffmpeg);
    println!(
        "  ffmpeg ({}): {}",
        config.tool.ffmpeg.display(),
        if ffmpeg_ok { "OK" } else { "NOT FOUND" }
    );
    println!();

    if !ffmpeg_ok {
        println!("WARNING: FFmpeg is required to process videos.");
        println!("Please install FFmpeg and ensure it's in your PATH.");
        println!("Download: https://ffmpeg.org/download.html");
        return Err(anyhow::anyhow!("FFmpeg not found"));
    }

    println!("all checks passed!");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("received shutdown signal");
}
