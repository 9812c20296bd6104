use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Raw numeric value.
            #[inline]
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(v: i64) -> Self {
                Self(v)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id! {
    /// Platform-assigned identifier of a probe agent.
    ProbeId
}

numeric_id! {
    /// Organisation scope used by every storage call.
    OrgId
}

numeric_id! {
    /// Identifier assigned to an endpoint by the storage collaborator.
    EndpointId
}

numeric_id! {
    /// Identifier assigned to a check by the storage collaborator.
    CheckId
}
