//! This module handles events that come into the scene from outside of the frame loop.

use tokio::sync::mpsc;
use tracing::warn;
use wt_frame::DecorationId;

/// Something that happened outside of the frame loop, to be applied at the start of the next
/// frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    /// The user made a wish.
    SubmitWish(String),

    /// The user added a gift with the given image.
    SubmitGift(String),

    /// The user turned hand tracking on or off.
    SetTracking(bool),

    /// The pointer moved onto or off of a decoration.
    Hover {
        /// The decoration under the pointer.
        id: DecorationId,

        /// Whether the pointer is now over it.
        hovered: bool,
    },

    /// The user clicked on a decoration.
    Click(DecorationId),
}

/// A cheap handle to send events to a [`Scene`](crate::Scene) from anywhere, including other
/// threads.
///
/// Sending never blocks. If the scene has gone away, the event is dropped with a warning and the
/// method returns `false`.
#[derive(Clone, Debug)]
pub struct SceneHandle {
    /// The sending half of the scene's event queue.
    tx: mpsc::UnboundedSender<SceneEvent>,
}

impl SceneHandle {
    /// Create a new handle around the given sender.
    pub(crate) fn new(tx: mpsc::UnboundedSender<SceneEvent>) -> Self {
        Self { tx }
    }

    /// Send an arbitrary event to the scene.
    pub fn send(&self, event: SceneEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                warn!(?event, "Scene has shut down, so dropping event");
                false
            }
        }
    }

    /// Make a wish.
    pub fn submit_wish(&self, text: impl Into<String>) -> bool {
        self.send(SceneEvent::SubmitWish(text.into()))
    }

    /// Add a gift with the given image.
    pub fn submit_gift(&self, image: impl Into<String>) -> bool {
        self.send(SceneEvent::SubmitGift(image.into()))
    }

    /// Turn hand tracking on or off.
    pub fn set_tracking_enabled(&self, enabled: bool) -> bool {
        self.send(SceneEvent::SetTracking(enabled))
    }

    /// Tell the scene that the pointer moved onto or off of a decoration.
    pub fn hover(&self, id: DecorationId, hovered: bool) -> bool {
        self.send(SceneEvent::Hover { id, hovered })
    }

    /// Click on a decoration.
    pub fn click(&self, id: DecorationId) -> bool {
        self.send(SceneEvent::Click(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_queues_events_test() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = SceneHandle::new(tx);

        assert!(handle.submit_wish("HELLO"));
        assert!(handle.clone().set_tracking_enabled(true));
        assert!(handle.click(DecorationId::User(7)));

        assert_eq!(rx.try_recv(), Ok(SceneEvent::SubmitWish("HELLO".to_string())));
        assert_eq!(rx.try_recv(), Ok(SceneEvent::SetTracking(true)));
        assert_eq!(rx.try_recv(), Ok(SceneEvent::Click(DecorationId::User(7))));
        assert!(rx.try_recv().is_err());

        drop(rx);
        assert!(!handle.submit_gift("gift.jpg"));
    }
}
