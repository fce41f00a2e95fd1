pub mod configs;
pub mod tables;
