//! tar.gz archiving helpers.
//!
//! Whole-archive operations only; no incremental or streaming semantics.
//! Directory compression walks entries in sorted path order so identical
//! trees produce archives with identical member ordering.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use tracing::debug;

use crate::error::{Error, Result};

/// Behavior knobs for [`extract_archive_with`].
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Directory removed (recursively) before extraction, if it exists.
    pub remove_dir_before_extract: Option<PathBuf>,
    /// Delete the archive file after a successful extraction.
    pub remove_archive_on_extract: bool,
}

fn walk_sorted(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|e| e.map(|e| e.path()))
        .collect::<io::Result<_>>()?;
    entries.sort();
    for path in entries {
        if path.is_dir() {
            out.push(path.clone());
            walk_sorted(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

/// Compress a directory tree into a tar.gz archive. Entries are stored
/// relative to `source_dir`.
pub fn compress_directory(
    source_dir: impl AsRef<Path>,
    archive_path: impl AsRef<Path>,
) -> Result<()> {
    let source_dir = source_dir.as_ref();
    let archive_path = archive_path.as_ref();

    if !source_dir.is_dir() {
        return Err(Error::filesystem(
            source_dir,
            io::Error::new(io::ErrorKind::NotFound, "source directory does not exist"),
        ));
    }

    let file = File::create(archive_path).map_err(|e| Error::filesystem(archive_path, e))?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let mut entries = Vec::new();
    walk_sorted(source_dir, &mut entries).map_err(|e| Error::filesystem(source_dir, e))?;

    for path in entries {
        // walk_sorted only yields descendants of source_dir
        let rel = path
            .strip_prefix(source_dir)
            .map_err(|e| Error::ArchiveFormat(format!("path outside source tree: {e}")))?;
        if path.is_dir() {
            builder
                .append_dir(rel, &path)
                .map_err(|e| Error::filesystem(&path, e))?;
        } else {
            builder
                .append_path_with_name(&path, rel)
                .map_err(|e| Error::filesystem(&path, e))?;
        }
    }

    let encoder = builder
        .into_inner()
        .map_err(|e| Error::filesystem(archive_path, e))?;
    encoder
        .finish()
        .map_err(|e| Error::filesystem(archive_path, e))?;
    debug!(source = %source_dir.display(), archive = %archive_path.display(), "compressed directory");
    Ok(())
}

/// Compress individual files into a tar.gz archive, each stored under its
/// basename.
pub fn compress_files(
    files: &[impl AsRef<Path>],
    archive_path: impl AsRef<Path>,
) -> Result<()> {
    let archive_path = archive_path.as_ref();
    let file = File::create(archive_path).map_err(|e| Error::filesystem(archive_path, e))?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for path in files {
        let path = path.as_ref();
        let name = path.file_name().ok_or_else(|| {
            Error::filesystem(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
            )
        })?;
        builder
            .append_path_with_name(path, name)
            .map_err(|e| Error::filesystem(path, e))?;
    }

    let encoder = builder
        .into_inner()
        .map_err(|e| Error::filesystem(archive_path, e))?;
    encoder
        .finish()
        .map_err(|e| Error::filesystem(archive_path, e))?;
    Ok(())
}

/// Extract a tar.gz archive into a directory, creating it if needed.
pub fn extract_archive(
    archive_path: impl AsRef<Path>,
    dest_dir: impl AsRef<Path>,
) -> Result<()> {
    extract_archive_with(archive_path, dest_dir, &ExtractOptions::default())
}

/// [`extract_archive`] with pre/post cleanup options.
pub fn extract_archive_with(
    archive_path: impl AsRef<Path>,
    dest_dir: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<()> {
    let archive_path = archive_path.as_ref();
    let dest_dir = dest_dir.as_ref();

    if let Some(dir) = &options.remove_dir_before_extract {
        if dir.is_dir() {
            fs::remove_dir_all(dir).map_err(|e| Error::filesystem(dir, e))?;
        }
    }

    let file = File::open(archive_path).map_err(|e| Error::filesystem(archive_path, e))?;
    fs::create_dir_all(dest_dir).map_err(|e| Error::filesystem(dest_dir, e))?;

    let mut archive = tar::Archive::new(GzDecoder::new(file));
    archive.unpack(dest_dir).map_err(|e| match e.kind() {
        // Garbage gzip/tar streams surface as data errors from the decoders.
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidInput => {
            Error::ArchiveFormat(format!("{}: {e}", archive_path.display()))
        }
        _ => Error::filesystem(dest_dir, e),
    })?;

    if options.remove_archive_on_extract {
        fs::remove_file(archive_path).map_err(|e| Error::filesystem(archive_path, e))?;
    }
    debug!(archive = %archive_path.display(), dest = %dest_dir.display(), "extracted archive");
    Ok(())
}
