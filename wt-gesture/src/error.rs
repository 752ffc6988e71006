//! This module contains [`DetectorError`].

use std::io;
use thiserror::Error;

/// The error returned when a keypoint source can't be started or can't run.
///
/// None of these are fatal to the scene. Tracking just stays off.
#[derive(Debug, Error)]
#[allow(missing_docs, reason = "the #[error] attributes document the variants")]
pub enum DetectorError {
    #[error("the keypoint source is unavailable: {0}")]
    Unavailable(String),

    #[error("permission to use the video source was denied")]
    PermissionDenied,

    #[error("the detector failed to initialise: {0}")]
    Initialisation(String),

    #[error("the detector failed to process a frame: {0}")]
    Inference(String),

    #[error("failed to spawn the tracking thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("failed to read the keypoint script: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse the keypoint script: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
