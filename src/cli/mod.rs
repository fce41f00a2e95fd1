pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "datas")]
#[command(about = "Datas CLI - inspect and query data-center tables")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Data-center table introspection and queries")]
    Tables {
        #[command(subcommand)]
        cmd: commands::tables::TablesCommands,
    },

    #[command(about = "Registered query configs")]
    Configs {
        #[command(subcommand)]
        cmd: commands::configs::ConfigsCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Tables { cmd } => commands::tables::handle(cmd, output_format).await,
        Commands::Configs { cmd } => commands::configs::handle(cmd, output_format).await,
    }
}
