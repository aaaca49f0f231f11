use std::path::{Path, PathBuf};

use crate::{error::EngineError, image::ImageHandle, result::RequestResult};

/// Holds what is currently shown: the latest result and, for a success, the
/// handle of its image. Every new result releases the previous handle.
#[derive(Debug)]
pub struct Presenter {
    dir: PathBuf,
    result: Option<RequestResult>,
    image: Option<ImageHandle>,
}

impl Presenter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            result: None,
            image: None,
        }
    }

    /// Stores `result` and derives the displayed image from its payload.
    ///
    /// The result is kept even when the image file cannot be written.
    pub fn apply(&mut self, result: RequestResult) -> Result<(), EngineError> {
        self.image = None;
        self.result = Some(result);

        if let Some(payload) = self.result.as_ref().and_then(RequestResult::payload) {
            self.image = Some(ImageHandle::create(&self.dir, payload)?);
        }
        Ok(())
    }

    pub fn result(&self) -> Option<&RequestResult> {
        self.result.as_ref()
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image.as_ref().map(ImageHandle::path)
    }
}
