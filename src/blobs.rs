//! Blob Store Module
//!
//! Uploaded files on disk, named `<epoch-millis><.ext>`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::cache::current_timestamp_ms;
use crate::records::StoredImage;

/// Last stamp handed out, shared by every store in the process.
static LAST_STAMP: AtomicU64 = AtomicU64::new(0);

/// Returns the current epoch milliseconds, bumped past the previous call so
/// no two calls in this process ever see the same value.
fn next_stamp() -> u64 {
    let mut prev = LAST_STAMP.load(Ordering::Relaxed);
    loop {
        let candidate = current_timestamp_ms().max(prev + 1);
        match LAST_STAMP.compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
        {
            Ok(_) => return candidate,
            Err(actual) => prev = actual,
        }
    }
}

/// Directory of uploaded files.
#[derive(Debug, Clone)]
pub struct BlobStore {
    dir: PathBuf,
}

impl BlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the upload directory if it is missing.
    pub async fn init(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir).await?;
        info!(upload_dir = ?self.dir, "Blob store initialized");
        Ok(())
    }

    /// Writes `bytes` under a generated name that keeps the extension of
    /// `original_name`.
    pub async fn save(&self, bytes: &[u8], original_name: &str) -> std::io::Result<StoredImage> {
        let extension = extension_of(original_name);

        loop {
            let name = format!("{}{}", next_stamp(), extension);
            let path = self.dir.join(&name);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                // left over from an earlier run with a skewed clock
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            };

            file.write_all(bytes).await?;
            file.flush().await?;

            debug!(original = %original_name, stored = %name, size = bytes.len(), "Blob saved");
            return Ok(StoredImage {
                photopath: normalize_path(&path),
                photo: name,
            });
        }
    }

    /// Reads a stored file. Unknown names and names that would leave the
    /// upload directory read as `Ok(None)`.
    pub async fn read(&self, name: &str) -> std::io::Result<Option<Vec<u8>>> {
        if !is_plain_file_name(name) {
            return Ok(None);
        }

        match fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// `.png` for `cat.png`, empty for `README`.
fn extension_of(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}

/// Path as a string with forward slashes only.
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Content type served for a stored file, from its extension.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("ico") => "image/x-icon",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}
