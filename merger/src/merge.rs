//! Merge helpers. Contains [merge_into] and [merge], appending resource tree
//! to an existing archive.

use crate::{
    archive_path::{self, EntryKind},
    directory::{self, SearchOptions},
    error::Error,
    namelist::Namelist,
    resource_entry::ResourceEntry,
    staging,
};
use std::{
    fs,
    io::{self, Read, Seek, Write},
    path::Path,
};
use zip::{CompressionMethod, ZipArchive, ZipWriter, write::FileOptions};

/// Compression used for newly written file entries. Existing entries are
/// never touched.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Compression {
    /// No compression.
    #[default]
    Stored,
    /// Deflate, readable by every zip / jar tool.
    Deflated,
}
impl Compression {
    fn method(self) -> CompressionMethod {
        match self {
            Self::Stored => CompressionMethod::Stored,
            Self::Deflated => CompressionMethod::Deflated,
        }
    }
}

/// Settings for [merge] and [merge_into].
///
/// If not sure what to set here, use [Default].
#[derive(Clone, Debug)]
pub struct MergeOptions {
    /// Skip files which name already exists in the archive. When false (the
    /// default), only directories are deduplicated and merging the same tree
    /// twice leaves two entries for every file.
    pub dedupe_files: bool,
    /// Archive directory to put the resource tree under, eg. "res". Segments
    /// are separated with "/".
    pub entry_prefix: Option<String>,
    /// Compression of new file entries.
    pub compression: Compression,
    /// Resource tree traversal settings.
    pub search: SearchOptions,
    /// Merge into a temporary copy and move it over the archive only after
    /// everything succeeded. Used by [merge] only.
    pub atomic: bool,
}
impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            dedupe_files: false,
            entry_prefix: None,
            compression: Compression::default(),
            search: SearchOptions::default(),
            atomic: false,
        }
    }
}

/// What the merge did.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct MergeReport {
    /// Directory entries appended.
    pub directories_written: usize,
    /// Directories already present in the archive.
    pub directories_skipped: usize,
    /// File entries appended.
    pub files_written: usize,
    /// Files already present in the archive, skipped in strict mode.
    pub files_skipped: usize,
}
impl MergeReport {
    /// Total number of entries appended.
    pub fn entries_written(&self) -> usize {
        self.directories_written + self.files_written
    }
}

/// Merges resource tree rooted at `resource_root` into `archive`, returning
/// the archive back with a report.
///
/// The archive must already be a valid zip. Its entry names are read once,
/// before anything else happens, and this snapshot alone decides what counts
/// as already present. Then the whole resource tree is searched. Only after
/// both succeeded is the archive reopened for append, so errors up to this
/// point leave it untouched. Finally entries are written: directories only if
/// missing from the snapshot, files always (or only if missing, with
/// [MergeOptions::dedupe_files]) and the central directory is rewritten.
///
/// [MergeOptions::atomic] is ignored here, `archive` is modified in place.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::{io::Cursor, path::PathBuf};
/// # use zip::{ZipArchive, ZipWriter};
/// # use zip_resource_merge::merge::{merge_into, MergeOptions};
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// // empty archive in memory
/// let archive = ZipWriter::new(Cursor::new(Vec::new())).finish()?;
///
/// let (archive, report) = merge_into(
///     archive,
///     &PathBuf::from(env!("CARGO_MANIFEST_DIR"))
///         .parent()
///         .unwrap()
///         .join("tests")
///         .join("data")
///         .join("scenario"),
///     &MergeOptions::default(),
/// )?;
/// assert_eq!(report.directories_written, 2);
/// assert_eq!(report.files_written, 2);
///
/// let archive = ZipArchive::new(archive)?;
/// assert!(archive.file_names().any(|name| name == "meta/extra.txt"));
/// #
/// # Ok(())
/// # }
/// ```
pub fn merge_into<A: Read + Write + Seek>(
    mut archive: A,
    resource_root: &Path,
    options: &MergeOptions,
) -> Result<(A, MergeReport), Error> {
    // existing entries snapshot, never refreshed during this run
    let namelist = {
        let archive = ZipArchive::new(&mut archive).map_err(Error::ArchiveOpen)?;
        Namelist::from_archive(&archive)
    };
    log::trace!("archive contains {} entries", namelist.len());

    // walk everything before first write
    let prefix = archive_path::prefix_components(options.entry_prefix.as_deref().unwrap_or(""))?;
    let resource_entries = directory::search(resource_root, &options.search, &prefix)?;

    let mut writer = ZipWriter::new_append(archive).map_err(Error::ArchiveOpen)?;

    let mut report = MergeReport::default();
    for resource_entry in resource_entries.into_vec() {
        entry_write(&mut writer, &namelist, resource_entry, options, &mut report)?;
    }

    let archive = writer.finish().map_err(Error::Finalize)?;

    log::info!(
        "merged {}: {} directories ({} existing), {} files ({} existing)",
        resource_root.display(),
        report.directories_written,
        report.directories_skipped,
        report.files_written,
        report.files_skipped,
    );

    Ok((archive, report))
}

/// Merges resource tree rooted at `resource_root` into archive file at
/// `archive_path`. See [merge_into] for details.
///
/// With [MergeOptions::atomic] the archive file is replaced only if the whole
/// merge succeeded. Otherwise it is appended to in place and a failure while
/// writing leaves it partially merged.
pub fn merge(
    archive_path: &Path,
    resource_root: &Path,
    options: &MergeOptions,
) -> Result<MergeReport, Error> {
    if options.atomic {
        return staging::merge_staged(archive_path, resource_root, options);
    }

    let archive = fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(archive_path)
        .map_err(|error| Error::ArchiveOpen(error.into()))?;

    let (archive, report) = merge_into(archive, resource_root, options)?;

    archive
        .sync_all()
        .map_err(|error| Error::Finalize(error.into()))?;

    Ok(report)
}

fn entry_write<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    namelist: &Namelist,
    resource_entry: ResourceEntry,
    options: &MergeOptions,
    report: &mut MergeReport,
) -> Result<(), Error> {
    let ResourceEntry {
        archive_path,
        path,
        unix_mode,
    } = resource_entry;

    match archive_path.kind() {
        EntryKind::Directory => {
            if namelist.contains(&archive_path) {
                log::debug!("directory {archive_path} already exists, skipping");
                report.directories_skipped += 1;
                return Ok(());
            }

            log::debug!("adding directory {archive_path}");
            writer
                .add_directory(archive_path.to_string(), FileOptions::default())
                .map_err(|source| Error::WriteEntry {
                    name: archive_path.to_string(),
                    source,
                })?;
            report.directories_written += 1;
        }
        EntryKind::File => {
            if options.dedupe_files && namelist.contains(&archive_path) {
                log::debug!("file {archive_path} already exists, skipping");
                report.files_skipped += 1;
                return Ok(());
            }

            let mut file = fs::File::open(&path).map_err(|source| Error::ResourceFile {
                path: path.clone(),
                source,
            })?;

            let mut file_options =
                FileOptions::default().compression_method(options.compression.method());
            if let Some(unix_mode) = unix_mode {
                file_options = file_options.unix_permissions(unix_mode);
            }

            log::debug!("adding file {archive_path}");
            let write_error = |source| Error::WriteEntry {
                name: archive_path.to_string(),
                source,
            };
            writer
                .start_file(archive_path.to_string(), file_options)
                .map_err(write_error)?;
            io::copy(&mut file, writer).map_err(|error| write_error(error.into()))?;
            report.files_written += 1;
        }
    }

    Ok(())
}
