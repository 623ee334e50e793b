mod check;
mod import;
mod load;
mod query;
mod schema;
mod view;

use clap::{Args, Parser, Subcommand, ValueEnum};
use docmerge_core::DocmergeConfig;
use docmerge_core::loader::ArtifactFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "docmerge",
    version,
    about = "Merge per-package documentation indexes and query the result",
    long_about = "docmerge reads the partial index each documented package emits (sidebar tree, \
                  trait implementors, source listing), merges them in whatever order they arrive, \
                  and answers sidebar, implementor and prefix-search queries over the merged index."
)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also log to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Auto,
    Records,
    Rustdoc,
}

#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Directory holding record files or rustdoc output
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Artifact layout of DIR
    #[arg(long, value_enum, default_value = "auto")]
    pub format: FormatArg,
}

impl SourceArgs {
    pub fn artifact_format(&self) -> ArtifactFormat {
        match self.format {
            FormatArg::Auto => ArtifactFormat::detect(&self.dir),
            FormatArg::Records => ArtifactFormat::Records,
            FormatArg::Rustdoc => ArtifactFormat::Rustdoc,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every registered package in name order
    Packages {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print one package's sidebar tree
    Sidebar {
        #[command(flatten)]
        source: SourceArgs,
        /// Package name
        package: String,
    },
    /// List the implementors of a trait
    #[command(long_about = "Lists every type declared to implement TRAIT (a full path such as \
                            `core::borrow::Borrow`), ordered by contributing package.")]
    Implementors {
        #[command(flatten)]
        source: SourceArgs,
        /// Fully-qualified trait path
        trait_path: String,
    },
    /// Case-sensitive prefix search over every sidebar item
    Search {
        #[command(flatten)]
        source: SourceArgs,
        /// Name prefix
        prefix: String,
        /// Only items of these kinds (module, struct, trait, ...)
        #[arg(long = "kind", value_name = "KIND")]
        kinds: Vec<String>,
        /// Maximum number of hits (defaults to the configured search limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List a package's documented source files
    Sources {
        #[command(flatten)]
        source: SourceArgs,
        /// Package name
        package: String,
    },
    /// Show merged index counts
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Convert rustdoc output into one JSON record file per package
    Import {
        /// rustdoc output directory
        #[arg(value_name = "RUSTDOC_DIR")]
        input: PathBuf,
        /// Where to write `<package>.json` files
        #[arg(value_name = "OUT_DIR")]
        output: PathBuf,
    },
    /// Validate every record without merging
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the JSON schema of a partial index record
    Schema,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DocmergeConfig::load(path)?,
        None => DocmergeConfig::default(),
    };
    if cli.verbose {
        config.logging.to_stderr = true;
    }
    let _guard = docmerge_core::logging::init_logging(
        &config.logging.component,
        config.logging.to_stderr,
    );

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Packages { source } => rt.block_on(query::packages(&source, &config)),
        Commands::Sidebar { source, package } => {
            rt.block_on(query::sidebar(&source, &config, &package))
        }
        Commands::Implementors { source, trait_path } => {
            rt.block_on(query::implementors(&source, &config, &trait_path))
        }
        Commands::Search {
            source,
            prefix,
            kinds,
            limit,
        } => rt.block_on(query::search(&source, &config, &prefix, &kinds, limit)),
        Commands::Sources { source, package } => {
            rt.block_on(query::sources(&source, &config, &package))
        }
        Commands::Stats { source } => rt.block_on(query::stats(&source, &config)),
        Commands::Import { input, output } => import::run(&input, &output),
        Commands::Check { source } => check::run(&source),
        Commands::Schema => schema::run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_with_kinds() {
        let cli = Cli::try_parse_from([
            "docmerge", "search", "docs/", "Ha", "--kind", "struct", "--kind", "trait",
            "--limit", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Search {
                source,
                prefix,
                kinds,
                limit,
            } => {
                assert_eq!(source.dir, PathBuf::from("docs/"));
                assert_eq!(prefix, "Ha");
                assert_eq!(kinds, vec!["struct", "trait"]);
                assert_eq!(limit, Some(5));
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_explicit_format_overrides_detection() {
        let cli = Cli::try_parse_from(["docmerge", "stats", "--format", "rustdoc", "missing/"])
            .unwrap();
        match cli.command {
            Commands::Stats { source } => {
                assert_eq!(source.artifact_format(), ArtifactFormat::Rustdoc)
            }
            _ => panic!("expected stats"),
        }
    }
}
