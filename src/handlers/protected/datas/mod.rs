pub mod detail;
pub mod sql;
pub mod table;

// Re-export handler functions for use in routing
pub use table::by_config as table_by_config;
pub use table::by_name as table_by_name;
pub use table::columns as table_columns;
pub use table::list as tables_list;

pub use sql::list_for_config as sqls_list;
pub use sql::run as sql_run;

pub use detail::get as detail_get;
pub use detail::send_ghost as detail_send_ghost;
