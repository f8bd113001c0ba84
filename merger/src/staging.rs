//! Atomic merge. Contains [merge_staged], which merges into a temporary copy
//! of the archive and moves it over the original only on success.

use crate::{
    error::Error,
    merge::{MergeOptions, MergeReport, merge_into},
};
use std::{fs, io, path::Path};

/// Copies archive at `archive_path` to a temporary file next to it, merges
/// `resource_root` into the copy and renames the copy over the original.
///
/// On any error the temporary file is removed and the original archive is
/// left untouched. The copy is created in the same directory, so the final
/// rename does not cross filesystems. File permissions of the original are
/// carried over.
pub fn merge_staged(
    archive_path: &Path,
    resource_root: &Path,
    options: &MergeOptions,
) -> Result<MergeReport, Error> {
    let mut original =
        fs::File::open(archive_path).map_err(|error| Error::ArchiveOpen(error.into()))?;
    let permissions = original
        .metadata()
        .map_err(|error| Error::ArchiveOpen(error.into()))?
        .permissions();

    let directory = match archive_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = tempfile::Builder::new()
        .prefix(".merge-")
        .suffix(".tmp")
        .tempfile_in(directory)
        .map_err(Error::Staging)?;
    log::trace!("staging merge in {}", staged.path().display());

    io::copy(&mut original, staged.as_file_mut()).map_err(Error::Staging)?;
    drop(original);
    fs::set_permissions(staged.path(), permissions).map_err(Error::Staging)?;

    let report = {
        let (file, report) = merge_into(staged.as_file_mut(), resource_root, options)?;
        file.sync_all()
            .map_err(|error| Error::Finalize(error.into()))?;
        report
    };

    staged.persist(archive_path).map_err(Error::Persist)?;

    Ok(report)
}
