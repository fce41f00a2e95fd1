// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Liveness probes, the service banner and the list of enabled query configs.
pub mod configs;
pub mod health;

pub use configs::list as configs_list;
pub use health::{health, root, utils_health};
