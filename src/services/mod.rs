pub mod detail;
pub mod ghost;

pub use detail::flatten_content;
pub use ghost::{GhostClient, GhostError, GhostOutcome};
