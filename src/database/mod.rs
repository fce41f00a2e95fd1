pub mod manager;
pub mod models;
pub mod rows;
pub mod service;

pub use manager::{DatabaseError, DatabaseManager, DatabaseRole};
pub use rows::RowMap;
