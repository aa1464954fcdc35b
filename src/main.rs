use std::path::PathBuf;

use blogdex::commands::{self, Overrides};
use blogdex::fs::DiskFs;
use blogdex::model::{IndexStyle, Strategy};
use blogdex::output::Format;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "blogdex",
    version,
    about = "Regenerate a blog README index from markdown articles"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    format: Format,
    /// Repository root holding the index and cache files (default: current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    /// Config file (default: blogdex.json in the root, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Where modification times come from
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,
    /// Index layout
    #[arg(long, value_enum)]
    style: Option<IndexStyle>,
    /// Subdirectory holding the articles, e.g. docs
    #[arg(long)]
    source_dir: Option<String>,
    /// Base URL that article links are appended to
    #[arg(long)]
    base_url: Option<String>,
    /// Format times in UTC instead of local time
    #[arg(long)]
    utc: bool,
}

impl From<RunArgs> for Overrides {
    fn from(args: RunArgs) -> Self {
        Self {
            strategy: args.strategy,
            style: args.style,
            source_dir: args.source_dir,
            base_url: args.base_url,
            utc: args.utc,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default blogdex.json
    Init,
    /// Reconcile timestamps and rewrite the index and cache
    Update {
        #[command(flatten)]
        args: RunArgs,
        /// Print the index to stdout instead of writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// Show articles newest first without writing anything
    List {
        #[command(flatten)]
        args: RunArgs,
    },
}

fn run(cli: Cli, format: Format) -> blogdex::error::Result<()> {
    let fs = DiskFs;
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init => commands::init::run(&fs, &root),
        Commands::Update { args, dry_run } => {
            let config = commands::resolve_config(&fs, &root, config_path, args.into())?;
            commands::update::run(&fs, &root, &config, dry_run, format)
        }
        Commands::List { args } => {
            let config = commands::resolve_config(&fs, &root, config_path, args.into())?;
            commands::list::run(&fs, &root, &config, format)
        }
    }
}

fn main() {
    let matches = Cli::command()
        .long_version(blogdex::build_info::long_version())
        .get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let format = cli.format;
    if let Err(e) = run(cli, format) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}
