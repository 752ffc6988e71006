//! This crate provides a very simple [`DebugRenderer`] to test things with.

use tracing::{debug, info, instrument, trace};
use wt_frame::{DecorationKind, SceneFrame};
use wt_renderer_trait::Renderer;

/// How many frames to wait between each summary logged at the info level.
const SUMMARY_INTERVAL: u64 = 60;

/// A simple debug renderer that just logs its input with tracing.
///
/// Every frame gets logged in full at the trace level, and a short summary gets logged at the
/// info level once every [`SUMMARY_INTERVAL`] frames.
#[derive(Debug, Default)]
pub struct DebugRenderer {
    /// The number of frames rendered so far.
    frames_rendered: u64,
}

impl DebugRenderer {
    /// The number of frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl Renderer for DebugRenderer {
    fn init() -> Self {
        Self::default()
    }

    #[instrument(skip_all, fields(frame = self.frames_rendered))]
    fn render_frame(&mut self, frame: &SceneFrame<'_>) {
        trace!(?frame);

        if self.frames_rendered % SUMMARY_INTERVAL == 0 {
            info!(
                particles = frame.particle_count(),
                gifts = frame.decorations_of_kind(DecorationKind::Gift).count(),
                ornaments = frame.decorations_of_kind(DecorationKind::Ornament).count(),
                wishes = frame.wishes.len(),
                scale = frame.root.scale,
                auto_rotate = frame.auto_rotate,
                "Rendered frame"
            );
        }

        self.frames_rendered += 1;
    }

    fn shutdown(&mut self) {
        debug!(frames_rendered = self.frames_rendered, "Shutting down debug renderer");
    }
}
