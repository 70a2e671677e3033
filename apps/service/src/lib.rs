//! torwatch - probes a site through a SOCKS5 (Tor) proxy and reports every
//! outcome to a Telegram chat.

pub mod config;
pub mod connectivity;
pub mod error;
pub mod monitoring;
pub mod notify;
pub mod orchestrator;
pub mod proxy;
pub mod shutdown;

pub use config::Config;
pub use error::{Error, Result};
pub use orchestrator::Orchestrator;
