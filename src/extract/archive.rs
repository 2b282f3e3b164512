//! Archive handling for package extraction.
//!
//! Unzips the package into a scratch directory, locates `imsmanifest.xml`
//! (tolerating and hoisting one superfluous wrapper folder), and collects
//! the extracted file list. Entries that would escape the scratch root are
//! skipped rather than written.

use crate::common::error::{Error, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;

/// An unzipped package with its manifest located and read.
pub(crate) struct ExtractedArchive {
    /// Scratch directory; removed on drop
    #[allow(dead_code)]
    scratch: TempDir,
    /// Package root inside the scratch dir (the wrapper folder if one was
    /// hoisted, else the scratch dir itself)
    pub root: PathBuf,
    /// Raw manifest text
    pub manifest_xml: String,
    /// Package-relative paths of every extracted file
    pub entry_names: Vec<String>,
}

/// Unzip `path` and locate its manifest.
pub(crate) fn open(path: &Path) -> Result<ExtractedArchive> {
    let file = File::open(path)
        .map_err(|e| Error::InvalidArchive(format!("{}: {e}", path.display())))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| Error::InvalidArchive(format!("{}: {e}", path.display())))?;

    let scratch = TempDir::new()?;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        // enclosed_name rejects traversal and absolute entry paths
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let target = scratch.path().join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
    }

    let root = locate_manifest_root(scratch.path())?;
    let manifest_xml = fs::read_to_string(root.join("imsmanifest.xml"))?;

    let mut files = Vec::new();
    collect_files(&root, &root, &mut files)?;
    files.sort();

    Ok(ExtractedArchive {
        scratch,
        root,
        manifest_xml,
        entry_names: files,
    })
}

/// Find the directory holding `imsmanifest.xml`: the scratch root itself,
/// or exactly one top-level wrapper folder to hoist.
fn locate_manifest_root(scratch: &Path) -> Result<PathBuf> {
    if scratch.join("imsmanifest.xml").is_file() {
        return Ok(scratch.to_path_buf());
    }

    let entries: Vec<PathBuf> = fs::read_dir(scratch)?
        .collect::<io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .collect();
    if let [single] = entries.as_slice() {
        if single.is_dir() && single.join("imsmanifest.xml").is_file() {
            return Ok(single.clone());
        }
    }

    Err(Error::ManifestNotFound(
        "no imsmanifest.xml at the package root or inside a single wrapper folder".to_string(),
    ))
}

fn collect_files(base: &Path, dir: &Path, out: &mut Vec<String>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(base, &path, out)?;
        } else if let Ok(relative) = path.strip_prefix(base) {
            // Extracted paths are scratch-local, so they are valid UTF-8
            // whenever the archive entry names were
            out.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
    Ok(())
}

/// Copy the extracted package tree into `dest`, creating it if needed.
pub(crate) fn copy_out(root: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;
    copy_tree(root, dest)
}

fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in fs::read_dir(from)? {
        let path = entry?.path();
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = to.join(name);
        if path.is_dir() {
            fs::create_dir_all(&target)?;
            copy_tree(&path, &target)?;
        } else {
            fs::copy(&path, &target)?;
        }
    }
    Ok(())
}
