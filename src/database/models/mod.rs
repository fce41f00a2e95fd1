pub mod data_query;
pub mod data_query_config;

pub use data_query::{DataQuery, DataQueryPublic};
pub use data_query_config::{DataQueryConfig, DataQueryConfigPublic};
