pub mod error;
pub use error::CoreError;

pub mod normalize;
pub use normalize::{Normalizer, PassthroughNormalizer, UrlNormalizer};

pub mod store;
pub use store::{EndpointStore, MemoryStore, ProbeStore, StoreError};

pub mod probes;
pub use probes::{DEFAULT_PROBE_NAMES, DEFAULT_PROBE_SCOPE, DefaultProbeSet};
