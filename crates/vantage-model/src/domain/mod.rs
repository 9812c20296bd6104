mod ids;
pub use ids::{CheckId, EndpointId, OrgId, ProbeId};

mod descriptor;
pub use descriptor::EndpointDescriptor;

mod endpoint;
pub use endpoint::EndpointDto;

mod endpoint_query;
pub use endpoint_query::{EndpointPage, EndpointQuery};

/// Check frequency in seconds.
pub type FrequencySecs = u32;

/// Timeout value in seconds, as carried inside check settings.
pub type TimeoutSecs = u32;
