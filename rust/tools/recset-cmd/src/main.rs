use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "recset-cmd")]
#[command(about = "Command-line utility for delimited record file operations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a record file and display summary information
    Inspect {
        /// Field delimiter character
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Number of leading physical lines forming the header
        #[arg(long, default_value_t = 1)]
        header_span: u64,

        /// Record file to inspect
        file_path: String,
    },

    /// Print the first records of a record file
    Head {
        /// Field delimiter character
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Number of leading physical lines forming the header
        #[arg(long, default_value_t = 1)]
        header_span: u64,

        /// Number of records to print
        #[arg(short, long, default_value_t = 10)]
        count: u64,

        /// Record file to read
        file_path: String,
    },

    /// Append all records matching an indexed column value to a target file
    Export {
        /// Field delimiter character
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Number of leading physical lines forming the header
        #[arg(long, default_value_t = 1)]
        header_span: u64,

        /// Column to index on
        #[arg(long)]
        column: String,

        /// Column value to match
        #[arg(long)]
        key: String,

        /// Source record file
        file_path: String,

        /// Destination file (created with the header line if absent)
        target_path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            delimiter,
            header_span,
            file_path,
        } => commands::inspect::run(delimiter, header_span, file_path),
        Commands::Head {
            delimiter,
            header_span,
            count,
            file_path,
        } => commands::head::run(delimiter, header_span, count, file_path),
        Commands::Export {
            delimiter,
            header_span,
            column,
            key,
            file_path,
            target_path,
        } => commands::export::run(delimiter, header_span, column, key, file_path, target_path),
    }
}
