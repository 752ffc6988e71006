//! This module contains [`ScriptedSource`], a keypoint source that replays a recorded script of
//! hands instead of watching a camera.

use crate::{DetectorError, HandSnapshot, KeypointSource};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

/// A recording of hands to replay, one entry per poll.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeypointScript {
    /// The hand seen on each poll, or `None` if there was no hand in view.
    pub frames: Vec<Option<HandSnapshot>>,

    /// Start again from the beginning after the last frame. Otherwise, the hand disappears once
    /// the script has finished.
    pub repeat: bool,
}

impl KeypointScript {
    /// Parse a script from RON.
    pub fn from_ron(text: &str) -> Result<Self, DetectorError> {
        Ok(ron::from_str(text)?)
    }
}

/// Where a [`ScriptedSource`] gets its script from.
#[derive(Clone, Debug, PartialEq)]
enum ScriptOrigin {
    /// A RON file which gets read when the source starts.
    File(PathBuf),

    /// A script that we already have.
    Loaded(KeypointScript),
}

/// A keypoint source that replays a [`KeypointScript`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedSource {
    /// Where the script comes from.
    origin: ScriptOrigin,

    /// The script, once it's been loaded.
    script: KeypointScript,

    /// The index of the next frame to replay.
    cursor: usize,
}

impl ScriptedSource {
    /// Create a source that will read its script from the given RON file when it starts.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            origin: ScriptOrigin::File(path.as_ref().to_path_buf()),
            script: KeypointScript::default(),
            cursor: 0,
        }
    }

    /// Create a source that replays the given script.
    pub fn from_script(script: KeypointScript) -> Self {
        Self {
            origin: ScriptOrigin::Loaded(script),
            script: KeypointScript::default(),
            cursor: 0,
        }
    }
}

impl KeypointSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn start(&mut self) -> Result<(), DetectorError> {
        self.script = match &self.origin {
            ScriptOrigin::Loaded(script) => script.clone(),
            ScriptOrigin::File(path) => match fs::read_to_string(path) {
                Ok(text) => KeypointScript::from_ron(&text)?,
                Err(error) if error.kind() == io::ErrorKind::NotFound => {
                    return Err(DetectorError::Unavailable(format!(
                        "no keypoint script at {}",
                        path.display()
                    )));
                }
                Err(error) => return Err(error.into()),
            },
        };
        self.cursor = 0;

        debug!(frames = self.script.frames.len(), "Loaded keypoint script");
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<HandSnapshot>, DetectorError> {
        let frame_count = self.script.frames.len();
        if frame_count == 0 {
            return Ok(None);
        }

        if self.cursor >= frame_count {
            if !self.script.repeat {
                return Ok(None);
            }
            self.cursor = 0;
        }

        let frame = self.script.frames[self.cursor].clone();
        self.cursor += 1;
        Ok(frame)
    }

    fn stop(&mut self) {
        self.script = KeypointScript::default();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn hand(x: f32) -> HandSnapshot {
        HandSnapshot::new(vec![Vec3::new(x, 0.5, 0.)])
    }

    #[test]
    fn scripted_source_replays_test() {
        let script = KeypointScript {
            frames: vec![Some(hand(0.1)), None, Some(hand(0.3))],
            repeat: false,
        };
        let mut source = ScriptedSource::from_script(script.clone());
        source.start().unwrap();

        assert_eq!(source.poll().unwrap(), Some(hand(0.1)));
        assert_eq!(source.poll().unwrap(), None);
        assert_eq!(source.poll().unwrap(), Some(hand(0.3)));
        assert_eq!(source.poll().unwrap(), None);
        assert_eq!(source.poll().unwrap(), None);

        let mut looping = ScriptedSource::from_script(KeypointScript {
            repeat: true,
            ..script
        });
        looping.start().unwrap();
        let polled: Vec<_> = (0..4).map(|_| looping.poll().unwrap()).collect();
        assert_eq!(polled[3], Some(hand(0.1)));
    }

    #[test]
    fn script_from_ron_test() {
        let script = KeypointScript::from_ron(
            "(frames: [Some((keypoints: [(0.25, 0.5, 0.0)])), None], repeat: true)",
        )
        .unwrap();

        assert_eq!(script.frames.len(), 2);
        assert_eq!(
            script.frames[0],
            Some(HandSnapshot::new(vec![Vec3::new(0.25, 0.5, 0.)]))
        );
        assert!(script.repeat);

        assert!(matches!(
            KeypointScript::from_ron("not a script"),
            Err(DetectorError::Parse(_))
        ));
    }

    #[test]
    fn missing_script_is_unavailable_test() {
        let mut source = ScriptedSource::from_file("/definitely/not/a/real/keypoints.ron");
        assert!(matches!(source.start(), Err(DetectorError::Unavailable(_))));
        assert_eq!(source.poll().unwrap(), None);
    }
}
