use std::{
    fs,
    path::{Path, PathBuf},
};

use uuid::Uuid;

use crate::{error::EngineError, result::QrImage};

/// File-backed reference to a displayed QR image.
///
/// The file exists for as long as the handle does; dropping the handle
/// revokes it and removes the file.
#[derive(Debug)]
pub struct ImageHandle {
    path: PathBuf,
    len: usize,
}

impl ImageHandle {
    pub fn create(dir: &Path, image: &QrImage) -> Result<Self, EngineError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("qr-{}.{}", Uuid::new_v4(), image.extension()));
        fs::write(&path, image.bytes())?;
        tracing::debug!(path = %path.display(), bytes = image.bytes().len(), "image handle created");
        Ok(Self {
            path,
            len: image.bytes().len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for ImageHandle {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "image handle revoked"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!("failed to remove {}: {err}", self.path.display()),
        }
    }
}
