#![doc(hidden)]

use anyhow::{Context, Error, anyhow};
use std::{
    fs,
    io::{Cursor, Read, Write},
    path::{Path, PathBuf},
    sync::Once,
};
use zip::{ZipArchive, ZipWriter, write::FileOptions};

// enables merge logs in test output, controlled by RUST_LOG
pub fn logger_init() {
    static LOGGER: Once = Once::new();
    LOGGER.call_once(|| {
        simple_logger::SimpleLogger::new()
            .with_level(log::LevelFilter::Warn)
            .env()
            .init()
            .unwrap();
    });
}

// path of fixture directory from data/
pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(name)
}

// builds zip in memory, names ending with "/" become directories, others
// become files with given content
pub fn archive_build(entries: &[(&str, &[u8])]) -> Result<Vec<u8>, Error> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, FileOptions::default())?;
        } else {
            writer.start_file(*name, FileOptions::default())?;
            writer.write_all(content)?;
        }
    }

    let archive = writer.finish()?.into_inner();
    Ok(archive)
}

// same as archive_build, stored as directory/name
pub fn archive_file_build(
    directory: &Path,
    name: &str,
    entries: &[(&str, &[u8])],
) -> Result<PathBuf, Error> {
    let path = directory.join(name);
    fs::write(&path, archive_build(entries)?)
        .with_context(|| path.to_string_lossy().into_owned())?;
    Ok(path)
}

// names of all entries in central directory order, duplicates included
pub fn archive_entry_names(archive: &[u8]) -> Result<Vec<String>, Error> {
    let mut archive = ZipArchive::new(Cursor::new(archive))?;

    let names = (0..archive.len())
        .map(|index| Ok(archive.by_index(index)?.name().to_owned()))
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(names)
}

// content of the last entry named `name`
pub fn archive_entry_content(
    archive: &[u8],
    name: &str,
) -> Result<Vec<u8>, Error> {
    let mut archive = ZipArchive::new(Cursor::new(archive))?;

    let mut index_last = None;
    for index in 0..archive.len() {
        if archive.by_index(index)?.name() == name {
            index_last = Some(index);
        }
    }
    let index = index_last.ok_or_else(|| anyhow!("entry {name} missing"))?;

    let mut content = Vec::new();
    archive.by_index(index)?.read_to_end(&mut content)?;
    Ok(content)
}

// creates files (and their parent directories) under root
pub fn resource_tree_build(
    root: &Path,
    files: &[(&str, &[u8])],
) -> Result<(), Error> {
    fs::create_dir_all(root)?;
    for (name, content) in files {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
    }
    Ok(())
}
