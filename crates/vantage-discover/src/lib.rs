//! Endpoint discovery: infer which monitoring checks make sense for a host.
//!
//! [`Discovery`] fans the protocol [`probe`]s out concurrently and stamps every
//! surviving check with the default probe route. [`fallback`] builds the same
//! output shape from fixed templates without touching the network.
mod config;
pub use config::DiscoverConfig;

mod errors;
pub use errors::{DiscoverError, ProbeError};

pub mod probe;
pub use probe::{DnsProbe, HickoryLookup, HttpProbe, HttpScheme, NsLookup, Probe, ReachabilityProbe};

mod engine;
pub use engine::Discovery;

pub mod fallback;
pub use fallback::{generate_defaults, generate_routed_defaults};
