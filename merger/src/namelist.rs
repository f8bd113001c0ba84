//! Existing entry snapshot. Contains [Namelist], read once from the archive
//! before anything is written to it.

use std::{
    collections::HashSet,
    io::{Read, Seek},
};
use zip::ZipArchive;

/// Set of entry names present in the archive at the moment it was read.
///
/// This is a snapshot, not a live view: entries appended during a merge are
/// never added to it, so two new entries sharing a name are not detected as
/// duplicates of each other. Once built, it cannot be modified.
#[derive(Clone, Default, Debug)]
pub struct Namelist {
    names: HashSet<String>,
}
impl Namelist {
    /// Reads names of all entries from opened `archive`.
    pub fn from_archive<R: Read + Seek>(archive: &ZipArchive<R>) -> Self {
        archive.file_names().collect()
    }

    /// Whether entry named exactly `name` existed in the archive.
    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.names.contains(name)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the archive had no entries at all.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over names, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
impl<S: Into<String>> FromIterator<S> for Namelist {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let names = iter.into_iter().map(Into::into).collect::<HashSet<_>>();

        Self { names }
    }
}
