//! This crate provides the [`Renderer`] trait and nothing else.
//!
//! It's structured like this so that renderers don't need to depend on the scene itself.

use wt_frame::SceneFrame;

/// The trait implemented by all renderers.
///
/// A renderer only consumes what the scene produces. It never mutates the scene, and it gets a
/// fresh [`SceneFrame`] once per tick.
pub trait Renderer {
    /// Initialise the renderer.
    fn init() -> Self
    where
        Self: Sized;

    /// Draw the given frame.
    fn render_frame(&mut self, frame: &SceneFrame<'_>);

    /// Release anything held by the renderer before the scene is torn down.
    ///
    /// The default implementation does nothing.
    fn shutdown(&mut self) {}
}
