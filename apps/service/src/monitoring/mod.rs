pub mod checker;
/// Probing engine
///
/// This module is responsible for:
/// - Timing an HTTP GET of the target through the proxy
/// - Classifying the outcome as up, slow or down
/// - Driving probes on a fixed period
pub mod executor;
pub mod scheduler;
pub mod types;

pub use executor::SiteProber;
pub use scheduler::ProbeScheduler;
pub use types::{ProbeResult, ProbeStatus};
