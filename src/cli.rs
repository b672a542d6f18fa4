// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use thiserror::Error as TeError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    version = env!("GIT_DESCRIBE_OR_CARGO_PKG_VERSION"),
    about = "A commandline tool to turn spreadsheet-authored CoMapeo categories, fields and translations into configuration bundles, and back."
)]
pub struct Cli {
    /// Print debug logs. RUST_LOG takes precedence when set.
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue, default_value_t = false)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(name = "build")]
    #[command(
        about = "Builds a .comapeocat bundle from a workbook directory",
        long_about = "Reads the Categories, Details and translation sheets of a workbook directory, \
            sends them to the build service and writes the returned .comapeocat bundle.\n\n\
            The build service URL and retry policy come from settings.ini in the user config directory, \
            and can be overridden with --api-url and --retries.",
    )]
    Build {
        workbook_dir: PathBuf,
        /// Directory to write the bundle (or payload.json) to. Defaults to the workbook directory.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        #[arg(long)]
        api_url: Option<String>,
        /// Retries after the first failed attempt.
        #[arg(long)]
        retries: Option<u32>,
        /// Only build the given category slugs, e.g. --category trees,water-source
        #[arg(short, long = "category", value_delimiter = ',')]
        categories: Vec<String>,
        /// Write payload.json instead of calling the build service.
        #[clap(long, action = clap::ArgAction::SetTrue, default_value_t = false)]
        dry_run: bool,
    },
    #[command(name = "messages")]
    #[command(
        about = "Prints the translation messages of a workbook directory",
        long_about = "Builds the message catalog from the translation sheets of a workbook directory \
            and prints it together with every data-quality warning found on the way.",
    )]
    Messages {
        workbook_dir: PathBuf,
        #[clap(short, long, default_value_t, value_enum)]
        format: crate::subcmd::messages::MessagesFormat,
    },
    #[command(name = "import")]
    #[command(
        about = "Creates a workbook directory from an existing configuration",
        long_about = "Reads a CoMapeo or Mapeo configuration (an extracted bundle directory, a JSON document \
            or a JSON .mapeosettings file) and writes its categories, fields, translations and icons as a workbook directory.",
    )]
    Import {
        bundle: PathBuf,
        workbook_dir: PathBuf,
        /// Overwrite the sheets of an existing workbook.
        #[clap(short, long, action = clap::ArgAction::SetTrue, default_value_t = false)]
        force: bool,
    },
    #[command(name = "languages")]
    #[command(about = "Lists known languages, or looks one up by code or name")]
    Languages {
        query: Option<String>,
    },
}

#[derive(TeError, Debug)]
#[error("{0}")]
pub enum CliError {
    Build(#[from] crate::subcmd::build::CmdError),
    Messages(#[from] crate::subcmd::messages::CmdError),
    Import(#[from] crate::subcmd::import::CmdError),
    Languages(#[from] crate::subcmd::languages::CmdError),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn execute() -> Result<(), CliError> {
    let args = Cli::parse();
    init_logging(args.verbose);

    use crate::subcmd;
    match args.command {
        Commands::Build { workbook_dir, output_dir, api_url, retries, categories, dry_run } => {
            let options = subcmd::BuildOptions { output_dir, api_url, retries, categories, dry_run };
            subcmd::subcmd_build(&workbook_dir, &options)?;
        },
        Commands::Messages { workbook_dir, format } => {
            subcmd::subcmd_messages(&workbook_dir, format)?;
        },
        Commands::Import { bundle, workbook_dir, force } => {
            subcmd::subcmd_import(&bundle, &workbook_dir, force)?;
        },
        Commands::Languages { query } => {
            subcmd::subcmd_languages(query.as_deref())?;
        },
    }

    Ok(())
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn tst_parse_build_args() {
        let cli = Cli::try_parse_from([
            "comapeo-config-utils", "build", "forest", "-v", "--category", "trees,water-source", "--dry-run", "--retries", "5",
        ]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Build { workbook_dir, categories, dry_run, retries, api_url, .. } => {
                assert_eq!(workbook_dir, PathBuf::from("forest"));
                assert_eq!(categories, vec!["trees", "water-source"]);
                assert!(dry_run);
                assert_eq!(retries, Some(5));
                assert_eq!(api_url, None);
            },
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn tst_parse_messages_format() {
        let cli = Cli::try_parse_from(["comapeo-config-utils", "messages", "forest", "-f", "yaml"]).unwrap();
        assert!(matches!(cli.command, Commands::Messages { format: crate::subcmd::messages::MessagesFormat::Yaml, .. }));
        assert!(Cli::try_parse_from(["comapeo-config-utils", "messages", "forest", "-f", "xml"]).is_err());
    }
}
