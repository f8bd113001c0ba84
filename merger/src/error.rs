//! Error type for merge operations. Contains [Error] and its coarse
//! classification [ErrorKind].

use std::{io, path::PathBuf};
use zip::result::ZipError;

/// Coarse category of [Error], describing which stage of the merge failed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
    /// The archive could not be opened or its index is malformed. Nothing was
    /// written.
    ArchiveOpen,
    /// The resource tree is missing, unreadable or contains paths that cannot
    /// be stored in the archive.
    ResourceRoot,
    /// Appending an entry, finalizing the archive or replacing it failed. The
    /// archive may be partially merged.
    Write,
}

/// All errors produced by this crate.
///
/// Every error is fatal for the merge it came from, there is no local
/// recovery.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Opening the archive or reading its central directory failed.
    #[error("cannot open archive")]
    ArchiveOpen(#[source] ZipError),

    /// Resource root metadata could not be read (usually it does not exist).
    #[error("cannot access resource root {}", path.display())]
    ResourceRoot {
        /// Resource root path, as given.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Resource root exists, but is not a directory.
    #[error("resource root {} is not a directory", path.display())]
    ResourceRootNotDirectory {
        /// Resource root path, as given.
        path: PathBuf,
    },
    /// Directory traversal failed somewhere below resource root.
    #[error("cannot traverse resource tree")]
    Traversal(#[from] walkdir::Error),
    /// Resource path cannot be represented as an archive path.
    #[error("path {} cannot be stored in archive: {reason}", path.display())]
    InvalidPath {
        /// Offending path.
        path: PathBuf,
        /// Human readable reason.
        reason: String,
    },
    /// Resource file could not be opened for reading.
    #[error("cannot read resource file {}", path.display())]
    ResourceFile {
        /// Resource file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Writing directory or file entry failed.
    #[error("cannot write archive entry {name}")]
    WriteEntry {
        /// Archive path of the entry being written.
        name: String,
        /// Underlying error.
        #[source]
        source: ZipError,
    },
    /// Writing central directory or flushing the archive failed.
    #[error("cannot finalize archive")]
    Finalize(#[source] ZipError),
    /// Preparing temporary copy of the archive failed.
    #[error("cannot stage archive copy")]
    Staging(#[source] io::Error),
    /// Moving merged temporary copy over the original archive failed.
    #[error("cannot replace archive with merged copy")]
    Persist(#[source] tempfile::PersistError),
}
impl Error {
    /// Classifies the error into [ErrorKind].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ArchiveOpen(_) => ErrorKind::ArchiveOpen,
            Self::ResourceRoot { .. }
            | Self::ResourceRootNotDirectory { .. }
            | Self::Traversal(_)
            | Self::InvalidPath { .. }
            | Self::ResourceFile { .. } => ErrorKind::ResourceRoot,
            Self::WriteEntry { .. }
            | Self::Finalize(_)
            | Self::Staging(_)
            | Self::Persist(_) => ErrorKind::Write,
        }
    }
}
