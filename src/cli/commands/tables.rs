use clap::Subcommand;

use crate::cli::utils::{output_json, output_names, output_rows};
use crate::cli::OutputFormat;
use crate::database::manager::DatabaseManager;
use crate::query::{Page, SchemaProvider, TableQueryResolver};

#[derive(Subcommand)]
pub enum TablesCommands {
    #[command(about = "List tables visible in the data-center database")]
    List,

    #[command(about = "Show reflected columns of a table")]
    Columns {
        #[arg(help = "Table name")]
        table: String,
    },

    #[command(about = "Query a page of rows from a table")]
    Query {
        #[arg(help = "Table name")]
        table: String,
        #[arg(long, help = "Rows to skip")]
        offset: Option<u32>,
        #[arg(long, help = "Maximum rows to return")]
        limit: Option<u32>,
    },
}

pub async fn handle(cmd: TablesCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::data_pool().await?;
    let resolver = TableQueryResolver::for_pool(pool.clone());

    match cmd {
        TablesCommands::List => {
            let tables = resolver.provider().table_names().await?;
            output_names(output_format, "tables", &tables)
        }
        TablesCommands::Columns { table } => {
            let plan = resolver.plan(&table).await?;
            match output_format {
                OutputFormat::Json => output_json(plan.columns()),
                OutputFormat::Text => {
                    for column in plan.columns().iter() {
                        let nullable = if column.is_nullable { "" } else { " not null" };
                        println!("{}\t{}{}", column.name, column.data_type, nullable);
                    }
                    Ok(())
                }
            }
        }
        TablesCommands::Query { table, offset, limit } => {
            let plan = resolver.plan(&table).await?;
            let result = plan.execute(&pool, Page::new(offset, limit)).await?;
            output_rows(output_format, &result.data, result.count)
        }
    }
}
