//! Archive path helpers. Contains [ArchivePath], a path of an entry inside the
//! archive, and [from_resource_relative_path] that creates it from fs paths.

use crate::error::Error;
use std::{
    fmt,
    ops::Deref,
    path::{Component, Path, PathBuf},
};

/// What an archive entry holds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EntryKind {
    /// Empty directory marker, name ends with "/".
    Directory,
    /// File with content, name never ends with "/".
    File,
}

/// [ArchivePath] represents name of an entry inside the archive, eg.
/// "icons/app.png" or "icons/".
///
/// Names are "/" separated regardless of platform, never start with "/" and
/// end with "/" if and only if the entry is a directory.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ArchivePath {
    inner: String,
    kind: EntryKind,
}
impl ArchivePath {
    /// Kind of entry this path names.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns the entry name.
    pub fn into_string(self) -> String {
        self.inner
    }
}

// to allow looking up names in the existing entry snapshot directly
impl Deref for ArchivePath {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl fmt::Display for ArchivePath {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

/// Splits user provided entry prefix (eg. "res" or "assets/res/") into
/// components.
///
/// Empty segments are ignored, so "", "/" and "res/" are all valid. "." and
/// ".." are rejected.
pub fn prefix_components(prefix: &str) -> Result<Vec<&str>, Error> {
    prefix
        .split('/')
        .filter(|component| !component.is_empty())
        .map(|component| {
            if component == "." || component == ".." {
                return Err(Error::InvalidPath {
                    path: PathBuf::from(prefix),
                    reason: format!("prefix must not contain {component:?}"),
                });
            }
            Ok(component)
        })
        .collect()
}

/// Creates archive path (eg. "res/dir1/file.png") from path relative to the
/// resource root (eg. "dir1\\file.png"), placing it under `prefix`
/// components.
///
/// Returns [None] when there is nothing to name, which happens for the
/// resource root itself when `prefix` is empty.
///
/// # Examples
///
/// ```
/// # use std::path::PathBuf;
/// # use zip_resource_merge::{
/// #     archive_path::{from_resource_relative_path, EntryKind},
/// #     error::Error,
/// # };
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let archive_path = from_resource_relative_path(
///     &PathBuf::from("a/b/c/f"),
///     EntryKind::File,
///     &[],
/// )?
/// .unwrap();
/// assert_eq!(&*archive_path, "a/b/c/f");
///
/// let archive_path = from_resource_relative_path(
///     &PathBuf::from("icons"),
///     EntryKind::Directory,
///     &["res"],
/// )?
/// .unwrap();
/// assert_eq!(&*archive_path, "res/icons/");
///
/// // resource root without prefix has no name
/// assert!(from_resource_relative_path(&PathBuf::new(), EntryKind::Directory, &[])?.is_none());
/// #
/// # Ok(())
/// # }
/// ```
pub fn from_resource_relative_path(
    resource_relative_path: &Path,
    kind: EntryKind,
    prefix: &[&str],
) -> Result<Option<ArchivePath>, Error> {
    let invalid = |reason: String| Error::InvalidPath {
        path: resource_relative_path.to_owned(),
        reason,
    };

    // list of path components, eg. ["dir1", "dir2", "file.bin"]
    let resource_relative_path_components = resource_relative_path
        .components()
        .map(|component| {
            // we cannot handle things like '/' or '..' here
            let Component::Normal(component) = component else {
                return Err(invalid(format!("unsupported component {component:?}")));
            };

            component
                .to_str()
                .ok_or_else(|| invalid("component is not valid utf-8".to_owned()))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let components = prefix
        .iter()
        .copied()
        .chain(resource_relative_path_components)
        .collect::<Vec<_>>();

    if components.is_empty() {
        return Ok(None);
    }

    let mut inner = itertools::join(components, "/");
    if kind == EntryKind::Directory {
        inner.push('/');
    }

    Ok(Some(ArchivePath { inner, kind }))
}
