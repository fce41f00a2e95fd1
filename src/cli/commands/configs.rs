use clap::Subcommand;

use crate::cli::utils::output_json;
use crate::cli::OutputFormat;
use crate::database::manager::DatabaseManager;
use crate::database::service;
use crate::query::Page;

#[derive(Subcommand)]
pub enum ConfigsCommands {
    #[command(about = "List enabled query configs")]
    List {
        #[arg(long, help = "Configs to skip")]
        offset: Option<u32>,
        #[arg(long, help = "Maximum configs to return")]
        limit: Option<u32>,
    },
}

pub async fn handle(cmd: ConfigsCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::main_pool().await?;

    match cmd {
        ConfigsCommands::List { offset, limit } => {
            let (configs, count) = service::list_enabled_configs(&pool, Page::new(offset, limit)).await?;
            match output_format {
                OutputFormat::Json => output_json(&serde_json::json!({ "data": configs, "count": count })),
                OutputFormat::Text => {
                    for config in &configs {
                        println!("{}\t{}\t{}", config.id, config.name, config.table_name);
                    }
                    println!("({} of {} enabled configs)", configs.len(), count);
                    Ok(())
                }
            }
        }
    }
}
