//! Directory helpers. Contains [search] function, used to gather directories
//! and files of the resource tree recursively.

use crate::{archive_path::EntryKind, error::Error, resource_entry::ResourceEntry};
use std::{fs, path::Path};
use walkdir::WalkDir;

/// Settings for [search] function.
///
/// If not sure what to set here, use [Default].
#[derive(Clone, Debug)]
pub struct SearchOptions {
    /// Whether to follow links while traversing directories.
    pub follow_links: bool,
}
impl Default for SearchOptions {
    fn default() -> Self {
        Self { follow_links: true }
    }
}

/// Searches fs recursively and builds [ResourceEntry] for each directory
/// (including `path` itself) and each file.
///
/// Traverses directory specified in `path` using [SearchOptions], depth first,
/// sorted by file name, every directory listed before its content. Archive
/// paths are created by stripping `path` from full fs path and putting the
/// rest under `prefix` components. Anything that is neither a directory nor a
/// file (eg. sockets, broken links) is ignored.
///
/// Fails if `path` is not an accessible directory, or if anything below it
/// cannot be read or named.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::path::PathBuf;
/// # use zip_resource_merge::directory::{search, SearchOptions};
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// // traverse directory from tests
/// let resource_entries = search(
///     &PathBuf::from(env!("CARGO_MANIFEST_DIR"))
///         .parent()
///         .unwrap()
///         .join("tests")
///         .join("data")
///         .join("scenario"),
///     &SearchOptions::default(),
///     &[],
/// )?;
///
/// // collect archive paths
/// let archive_paths = resource_entries
///     .iter()
///     .map(|resource_entry| &*resource_entry.archive_path)
///     .collect::<Vec<_>>();
///
/// assert_eq!(
///     archive_paths,
///     ["icons/", "icons/app.png", "meta/", "meta/extra.txt"]
/// );
/// #
/// # Ok(())
/// # }
/// ```
pub fn search(
    path: &Path,
    options: &SearchOptions,
    prefix: &[&str],
) -> Result<Box<[ResourceEntry]>, Error> {
    // make sure root exists before walking, walkdir would report it as a
    // generic traversal error
    let metadata = fs::metadata(path).map_err(|source| Error::ResourceRoot {
        path: path.to_owned(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(Error::ResourceRootNotDirectory {
            path: path.to_owned(),
        });
    }

    let resource_entries = WalkDir::new(path)
        .follow_links(options.follow_links)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| -> Result<Option<ResourceEntry>, Error> {
            // detect search errors
            let entry = entry?;

            // if follow_links is true, this will be resolved as link target
            let file_type = entry.file_type();
            let (kind, unix_mode) = if file_type.is_dir() {
                (EntryKind::Directory, None)
            } else if file_type.is_file() {
                (EntryKind::File, unix_mode(&entry.metadata()?))
            } else {
                return Ok(None);
            };

            ResourceEntry::build_from_path(entry.path(), path, kind, prefix, unix_mode)
        })
        .filter_map(|entry_result| entry_result.transpose()) // strips Ok(None)
        .collect::<Result<Box<[_]>, Error>>()?;

    log::trace!(
        "found {} resource entries in {}",
        resource_entries.len(),
        path.display()
    );

    Ok(resource_entries)
}

#[cfg(unix)]
fn unix_mode(metadata: &fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;

    Some(metadata.permissions().mode())
}
#[cfg(not(unix))]
fn unix_mode(_metadata: &fs::Metadata) -> Option<u32> {
    None
}
