// provgraph-domain library entry point
pub mod constants;
pub mod hashing;
pub mod identity;
pub mod model;

pub use model::*;
