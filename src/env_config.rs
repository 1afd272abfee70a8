//! Environment configuration for the server binary.
//!
//! | Variable | Default | |
//! |----------|---------|---|
//! | `FUNDSIM_HOST` | `127.0.0.1` | bind address |
//! | `FUNDSIM_PORT` | `8050` | listen port |
//! | `FUNDSIM_SEED` | unset | fixed seed for renders that don't pass one |
//! | `FUNDSIM_EXPECTATION` | `monte_carlo` | `monte_carlo` or `closed_form` |
//! | `RAYON_NUM_THREADS` | 8 | falls back to `OMP_NUM_THREADS` |
//! | `RUST_LOG` | `info,fundsim=debug` | tracing filter |
//!
//! Unparseable values are logged and replaced by the default.

use std::str::FromStr;

use crate::dashboard::RenderOptions;
use crate::simulation::ExpectationMethod;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;
const DEFAULT_RAYON_THREADS: usize = 8;
const DEFAULT_LOG_FILTER: &str = "info,fundsim=debug";

/// Server settings plus the render defaults applied to every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub render: RenderOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            render: RenderOptions::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("FUNDSIM_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: server_port(),
            render: RenderOptions {
                seed: fixed_seed(),
                expectation: default_expectation(),
                ..RenderOptions::default()
            },
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse `name`; `None` if unset, warn and `None` if malformed.
fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "ignoring unparseable environment value");
            None
        }
    }
}

/// Read `FUNDSIM_PORT` (default 8050).
pub fn server_port() -> u16 {
    env_parse("FUNDSIM_PORT").unwrap_or(DEFAULT_PORT)
}

/// Read `FUNDSIM_SEED`.
pub fn fixed_seed() -> Option<u64> {
    env_parse("FUNDSIM_SEED")
}

/// Read `FUNDSIM_EXPECTATION` (default Monte Carlo).
pub fn default_expectation() -> ExpectationMethod {
    env_parse("FUNDSIM_EXPECTATION").unwrap_or_default()
}

/// Read `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`, default 8) and
/// build the global pool. Tolerates an already-initialized pool.
pub fn init_rayon_threads_lenient() -> usize {
    let num_threads = env_parse("RAYON_NUM_THREADS")
        .or_else(|| env_parse("OMP_NUM_THREADS"))
        .unwrap_or(DEFAULT_RAYON_THREADS);
    if rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .is_err()
    {
        tracing::debug!("rayon global pool already initialized");
    }
    tracing::info!(num_threads, "rayon pool ready");
    num_threads
}

/// Install the tracing subscriber: fmt layer filtered by `RUST_LOG`.
pub fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}
