mod error;
pub use error::{ExecError, ExecResult};

mod util;

pub mod proc;
pub use proc::{ProcConfig, run_to_exit};
