//! zip-resource-merge is a post-build packaging step: it merges a directory
//! of static resources (images, presets, configuration, etc.) into an already
//! built zip based archive, usually an executable `jar`, without duplicating
//! directory entries the archive already has.
//!
//! It runs once per build, after the archive is produced by the build system
//! and before it is distributed. Existing entries are never modified or
//! removed, new entries are appended and the central directory is rewritten.
//!
//! This crate can be used in two ways:
//! - As a standalone application, run from a fixed working directory with no
//!   arguments, or with options described by `--help`.
//! - As a library, from a build script or another tool.
//!
//! # Using as a standalone application
//!
//! With a project laid out like:
//! ```text
//! project
//! +---build
//! |   \---src
//! |           Automaton.jar
//! +---res
//! |   +---presets
//! |   |       glider.life
//! |   \---texture
//! |           icon.png
//! \---work
//! ```
//! running `$ zip-resource-merge` inside `work` prints `Merging...`, then
//! replaces it with `Success`, and the jar gains `res/`, `res/presets/`,
//! `res/presets/glider.life`, `res/texture/` and `res/texture/icon.png`
//! entries, where the application looks them up. Use `--prefix ""` to put
//! `presets/glider.life` and so on in the archive root instead.
//!
//! # Using as a library
//!
//! [merge::merge] works on an archive file, [merge::merge_into] on anything
//! readable, writable and seekable (eg. in-memory `Cursor`). Both are
//! configured with [merge::MergeOptions].
//!
//! ```no_run
//! # use anyhow::Error;
//! # use std::path::PathBuf;
//! # use zip_resource_merge::merge::{merge, MergeOptions};
//! #
//! # fn main() -> Result<(), Error> {
//! let report = merge(
//!     &PathBuf::from("../build/src/Automaton.jar"),
//!     &PathBuf::from("../res"),
//!     &MergeOptions::default(),
//! )?;
//! println!("{} entries added", report.entries_written());
//! # Ok(())
//! # }
//! ```
//!
//! ### Duplicates
//! Existing entry names are read once, before anything is written (see
//! [namelist::Namelist]). Directories present there are skipped. Files are
//! appended unconditionally unless [merge::MergeOptions::dedupe_files] is set,
//! so running the merge twice on the same archive leaves two entries with the
//! same name for every file. Most readers resolve such names to the last entry.

#![warn(missing_docs)]

pub mod archive_path;
pub mod directory;
pub mod error;
pub mod merge;
pub mod namelist;
pub mod resource_entry;
pub mod staging;
