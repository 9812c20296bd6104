mod domain;
pub use domain::*;

mod check;
pub use check::*;
