//! Resource entry helpers. Contains [ResourceEntry], a combination of fs path
//! and [ArchivePath].

use crate::{
    archive_path::{self, ArchivePath, EntryKind},
    error::Error,
};
use std::path::{Path, PathBuf};

/// Single item found in the resource tree, either a directory or a file, and
/// the name it will get inside the archive.
#[derive(Debug)]
pub struct ResourceEntry {
    /// The path inside the archive. Its kind tells if this is a directory or
    /// a file.
    pub archive_path: ArchivePath,

    /// Path on the fs, used to read file content.
    pub path: PathBuf,

    /// Unix permission bits of the file, where the platform has them.
    pub unix_mode: Option<u32>,
}
impl ResourceEntry {
    /// Creates [self] for `path` found inside `base_directory_path`.
    ///
    /// The archive path is made of `prefix` components followed by `path`
    /// relative to `base_directory_path`, see
    /// [archive_path::from_resource_relative_path]. Returns [None] if the
    /// entry has no name (resource root without prefix).
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::path::PathBuf;
    /// # use zip_resource_merge::{
    /// #     archive_path::EntryKind, error::Error, resource_entry::ResourceEntry,
    /// # };
    /// #
    /// # fn main() -> Result<(), Error> {
    /// #
    /// let base_directory = PathBuf::from("res");
    ///
    /// let resource_entry = ResourceEntry::build_from_path(
    ///     &base_directory.join("icons").join("app.png"),
    ///     &base_directory,
    ///     EntryKind::File,
    ///     &[],
    ///     None,
    /// )?
    /// .unwrap();
    /// assert_eq!(&*resource_entry.archive_path, "icons/app.png");
    /// #
    /// # Ok(())
    /// # }
    /// ```
    pub fn build_from_path(
        path: &Path,
        base_directory_path: &Path,
        kind: EntryKind,
        prefix: &[&str],
        unix_mode: Option<u32>,
    ) -> Result<Option<Self>, Error> {
        // strip prefix, so path is relative to resource root
        let resource_relative_path = path
            .strip_prefix(base_directory_path)
            .map_err(|_| Error::InvalidPath {
                path: path.to_owned(),
                reason: format!("not inside {}", base_directory_path.display()),
            })?;

        // create archive path
        let Some(archive_path) =
            archive_path::from_resource_relative_path(resource_relative_path, kind, prefix)?
        else {
            return Ok(None);
        };

        Ok(Some(Self {
            archive_path,
            path: path.to_owned(),
            unix_mode,
        }))
    }

    /// Kind of this entry, shortcut for [ArchivePath::kind].
    pub fn kind(&self) -> EntryKind {
        self.archive_path.kind()
    }
}
