use clap::{Parser, Subcommand};
use colored::Colorize;
use gradle2std::commands::{self, ConvertOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gradle2std")]
#[command(about = "Convert a gradle Android project into the standard layout", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./gradle2std.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy classes, layouts, libs and manifest into the standard layout
    Convert {
        /// Gradle project directory
        app_dir: PathBuf,
        /// Destination directory for the standard layout
        dest_dir: PathBuf,
        /// Build variant (debug, release, ...)
        #[arg(long)]
        variant: Option<String>,
        /// Directory of support jars merged into libs/
        #[arg(long)]
        support_libs: Option<PathBuf>,
    },
    /// Show which source each artifact would be copied from
    Plan {
        /// Gradle project directory
        app_dir: PathBuf,
        /// Destination directory used to display target paths
        #[arg(long, default_value = ".")]
        dest: PathBuf,
        /// Build variant (debug, release, ...)
        #[arg(long)]
        variant: Option<String>,
        /// Directory of support jars merged into libs/
        #[arg(long)]
        support_libs: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Convert {
            app_dir,
            dest_dir,
            variant,
            support_libs,
        } => {
            let options = ConvertOptions {
                variant: variant.as_deref(),
                support_libs: support_libs.as_deref(),
                config: cli.config.as_deref(),
            };
            commands::convert::execute(app_dir, dest_dir, &options)
        }
        Commands::Plan {
            app_dir,
            dest,
            variant,
            support_libs,
        } => {
            let options = ConvertOptions {
                variant: variant.as_deref(),
                support_libs: support_libs.as_deref(),
                config: cli.config.as_deref(),
            };
            commands::plan::execute(app_dir, dest, &options)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
