//! Main merge executable, to be used as a post-build step. Run without
//! arguments from the working directory the defaults are relative to. For help
//! run this command with `-h`.

#![warn(missing_docs)]

use anyhow::{Context, Error};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::{
    io::{self, IsTerminal, Write},
    path::PathBuf,
};
use zip_resource_merge::{directory, merge};

/// Archive built by the build system, relative to working directory.
const ARCHIVE_PATH_DEFAULT: &str = "../build/src/Automaton.jar";
/// Resources to be merged, relative to working directory.
const RESOURCES_PATH_DEFAULT: &str = "../res";
/// Archive directory resources are placed under, where the application loads
/// them from (eg. `res/presets/glider.life`).
const PREFIX_DEFAULT: &str = "res";

#[derive(Parser, Debug)]
#[command(version, about)]
struct Arguments {
    /// Archive to merge resources into. Must already exist and be a valid zip
    /// (or jar).
    #[arg(long, default_value = ARCHIVE_PATH_DEFAULT)]
    pub archive: PathBuf,

    /// Resources directory. Its content is placed under `--prefix` inside the
    /// archive.
    #[arg(long, default_value = RESOURCES_PATH_DEFAULT)]
    pub resources: PathBuf,

    /// Archive directory to place resources under. Pass an empty string to
    /// place resources in the archive root.
    #[arg(long, default_value = PREFIX_DEFAULT)]
    pub prefix: String,

    /// Compression of added files. If not set, files are stored.
    #[arg(long, value_enum)]
    pub compression: Option<CompressionArgument>,

    /// Skip files already present in the archive, not only directories.
    #[arg(long)]
    pub dedupe_files: bool,

    /// Merge into a temporary copy and replace the archive only on success.
    #[arg(long)]
    pub atomic: bool,

    /// Whether to follow links while traversing directories. If not set, uses
    /// sane defaults.
    #[arg(long)]
    pub follow_links: Option<bool>,
}
impl Arguments {
    pub fn merge_options(&self) -> merge::MergeOptions {
        let mut search_options = directory::SearchOptions::default();
        if let Some(follow_links) = self.follow_links {
            search_options.follow_links = follow_links;
        }

        let mut merge_options = merge::MergeOptions {
            dedupe_files: self.dedupe_files,
            entry_prefix: Some(self.prefix.clone()),
            search: search_options,
            atomic: self.atomic,
            ..merge::MergeOptions::default()
        };
        if let Some(compression) = self.compression {
            merge_options.compression = compression.into();
        }

        merge_options
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CompressionArgument {
    Stored,
    Deflated,
}
impl From<CompressionArgument> for merge::Compression {
    fn from(compression: CompressionArgument) -> Self {
        match compression {
            CompressionArgument::Stored => Self::Stored,
            CompressionArgument::Deflated => Self::Deflated,
        }
    }
}

fn main() -> Result<(), Error> {
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()?;

    let arguments = Arguments::parse();
    let merge_options = arguments.merge_options();

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Merging...")?;
    stdout.flush()?;

    merge::merge(&arguments.archive, &arguments.resources, &merge_options).with_context(|| {
        format!(
            "merge {} into {}",
            arguments.resources.display(),
            arguments.archive.display()
        )
    })?;

    // replace progress line in place: cursor to previous line, clear it
    if stdout.is_terminal() {
        write!(stdout, "\x1b[F\x1b[K")?;
    }
    writeln!(stdout, "Success")?;

    Ok(())
}
