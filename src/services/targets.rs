//! Builds the ordered target list from command-line arguments.
//!
//! Order matters: the retry cache is keyed by position in this list, so the
//! same inputs must always produce the same sequence. Folder contents are
//! therefore sorted by file name.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::domain::models::{Target, TargetKind};

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("Failed to read target list {path}: {source}")]
    ListRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Target list {path} must be a JSON array of strings: {source}")]
    ListFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to scan folder {path}: {source}")]
    FolderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Nothing to mint: no targets were given")]
    Empty,
}

/// Decide whether `arg` names a remote URI or a local path
///
/// Anything that parses as a URL with a scheme longer than one character
/// is a URI; the length check keeps Windows drive letters (`C:\...`) local.
pub fn classify(arg: &str) -> TargetKind {
    match reqwest::Url::parse(arg) {
        Ok(url) if url.scheme().len() > 1 && url.scheme() != "file" => TargetKind::Uri,
        _ => TargetKind::File,
    }
}

/// Resolve positional arguments followed by the entries of `list_file`
pub async fn resolve_targets(
    args: &[String],
    list_file: Option<&Path>,
) -> Result<Vec<Target>, TargetError> {
    let mut inputs: Vec<String> = args.to_vec();
    if let Some(path) = list_file {
        inputs.extend(read_list_file(path).await?);
    }

    let mut targets = Vec::with_capacity(inputs.len());
    for input in inputs {
        expand_input(&input, &mut targets).await?;
    }

    if targets.is_empty() {
        return Err(TargetError::Empty);
    }

    debug!(count = targets.len(), "targets resolved");
    Ok(targets)
}

/// Read a JSON array of target strings
pub async fn read_list_file(path: &Path) -> Result<Vec<String>, TargetError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| TargetError::ListRead {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&content).map_err(|source| TargetError::ListFormat {
        path: path.to_path_buf(),
        source,
    })
}

async fn expand_input(input: &str, targets: &mut Vec<Target>) -> Result<(), TargetError> {
    if classify(input) == TargetKind::Uri {
        targets.push(Target::uri(input));
        return Ok(());
    }

    let path = Path::new(input);
    let is_dir = fs::metadata(path).await.is_ok_and(|m| m.is_dir());
    if !is_dir {
        targets.push(Target::file(input));
        return Ok(());
    }

    for file in scan_folder(path).await? {
        targets.push(Target::file(file.display().to_string()));
    }
    Ok(())
}

/// Regular files directly inside `dir`, sorted by file name
async fn scan_folder(dir: &Path) -> Result<Vec<PathBuf>, TargetError> {
    let read_err = |source| TargetError::FolderRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(read_err)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
        let file_type = entry.file_type().await.map_err(read_err)?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(folder = %dir.display(), count = files.len(), "folder scanned");
    Ok(files)
}
