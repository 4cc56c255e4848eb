//! Server configuration from command-line flags and environment.

use clap::Parser;
use perf_core::SvgRenderer;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "perfcalc-backend")]
#[command(about = "Web calculator for parallel-computing performance formulas")]
#[command(version)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "PERFCALC_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PERFCALC_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory served under /static
    #[arg(long, env = "PERFCALC_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Width of rendered plots in pixels
    #[arg(long, env = "PERFCALC_PLOT_WIDTH", default_value_t = 640)]
    pub plot_width: u32,

    /// Height of rendered plots in pixels
    #[arg(long, env = "PERFCALC_PLOT_HEIGHT", default_value_t = 400)]
    pub plot_height: u32,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
    pub plot_width: u32,
    pub plot_height: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: [127, 0, 0, 1].into(),
            port: 3000,
            static_dir: None,
            plot_width: 640,
            plot_height: 400,
        }
    }
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            static_dir: cli.static_dir,
            plot_width: cli.plot_width,
            plot_height: cli.plot_height,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }

    pub fn renderer(&self) -> SvgRenderer {
        SvgRenderer::new(self.plot_width, self.plot_height)
    }
}
