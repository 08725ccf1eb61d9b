//! Input discovery, output naming and all-or-nothing writes

use crate::{BioPathPredError, BioPathPredResult};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Resolve an input path to the files it names.
///
/// A file resolves to itself; a directory to the entries matching `pattern`
/// beneath it, sorted by path.
pub fn find_files(input: &Path, pattern: &str) -> BioPathPredResult<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(BioPathPredError::MissingInput(input.to_path_buf()));
    }
    find_in_dir(input, pattern)
}

/// Entries matching `pattern` beneath a directory, sorted by path
pub fn find_in_dir(dir: &Path, pattern: &str) -> BioPathPredResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(BioPathPredError::MissingInput(dir.to_path_buf()));
    }

    let full_pattern = dir.join(pattern);
    let entries = glob::glob(&full_pattern.to_string_lossy()).map_err(|e| {
        BioPathPredError::Configuration(format!("Invalid file pattern '{}': {}", pattern, e))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| BioPathPredError::Io(e.into_error()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// `<output_dir>/<input stem>.<extension>`
pub fn create_savename(output_dir: &Path, input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{}.{}", stem, extension))
}

/// Pair every input with its `<output_dir>/<stem>.<extension>` target.
///
/// Fails before anything is written when two inputs share a target.
pub fn plan_savenames(
    output_dir: &Path,
    inputs: &[PathBuf],
    extension: &str,
) -> BioPathPredResult<Vec<(PathBuf, PathBuf)>> {
    let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::with_capacity(inputs.len());
    let mut plan = Vec::with_capacity(inputs.len());

    for input in inputs {
        let target = create_savename(output_dir, input, extension);
        if let Some(first) = claimed.insert(target.clone(), input) {
            return Err(BioPathPredError::OutputCollision {
                first: first.clone(),
                second: input.clone(),
                target,
            });
        }
        plan.push((input.clone(), target));
    }
    Ok(plan)
}

/// A file written next to its destination and moved into place on commit.
///
/// Dropping without committing removes the temporary file, so a failed run never
/// leaves a truncated artifact behind.
pub struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    pub fn new(target: &Path) -> BioPathPredResult<Self> {
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;
        let temp = NamedTempFile::new_in(&parent)?;
        Ok(Self {
            temp,
            target: target.to_path_buf(),
        })
    }

    pub fn file_mut(&mut self) -> &mut File {
        self.temp.as_file_mut()
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn commit(self) -> BioPathPredResult<()> {
        self.temp.as_file().sync_all()?;
        self.temp.persist(&self.target)?;
        Ok(())
    }
}
