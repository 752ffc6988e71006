//! This module contains the live entities owned by the scene.

use crate::Placement;
use std::fmt;
use wt_animation::{FallAndSettle, FlightWithTrail, MaterializeAndIdle};
use wt_frame::DecorationId;

/// The thing that a decoration carries, which gets handed back when it's clicked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// A reference to an image, usually a URL, carried by a gift.
    Image(String),

    /// The text of a wish, carried by an ornament.
    Text(String),
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image(image) => write!(f, "image {image}"),
            Self::Text(text) => write!(f, "text {text:?}"),
        }
    }
}

/// A gift box on the ground around the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Gift {
    /// The identity of this gift.
    pub(crate) id: DecorationId,

    /// The image inside the gift.
    pub(crate) image: String,

    /// Where this gift was placed.
    pub(crate) placement: Placement,

    /// The animator moving this gift.
    pub(crate) animator: FallAndSettle,
}

impl Gift {
    /// The identity of this gift.
    pub fn id(&self) -> DecorationId {
        self.id
    }

    /// The image inside the gift.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Where this gift was placed, including the angle around the tree.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// The animator moving this gift.
    pub fn animator(&self) -> &FallAndSettle {
        &self.animator
    }

    /// The payload to hand back when this gift is clicked.
    pub fn payload(&self) -> Payload {
        Payload::Image(self.image.clone())
    }
}

/// A star ornament hanging on the tree, carrying the text of a wish.
#[derive(Clone, Debug, PartialEq)]
pub struct Ornament {
    /// The identity of this ornament. For ornaments made from wishes, this is the id of the wish.
    pub(crate) id: DecorationId,

    /// The text of the wish.
    pub(crate) text: String,

    /// The animator moving this ornament.
    pub(crate) animator: MaterializeAndIdle,
}

impl Ornament {
    /// The identity of this ornament.
    pub fn id(&self) -> DecorationId {
        self.id
    }

    /// The text of the wish.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The animator moving this ornament.
    pub fn animator(&self) -> &MaterializeAndIdle {
        &self.animator
    }

    /// The payload to hand back when this ornament is clicked.
    pub fn payload(&self) -> Payload {
        Payload::Text(self.text.clone())
    }
}

/// A wish flying up to the top of the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct WishProjectile {
    /// The identity of this wish, which the ornament inherits.
    pub(crate) id: DecorationId,

    /// The text of the wish.
    pub(crate) text: String,

    /// The animator flying this wish.
    pub(crate) animator: FlightWithTrail,
}

impl WishProjectile {
    /// The identity of this wish.
    pub fn id(&self) -> DecorationId {
        self.id
    }

    /// The text of the wish.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The animator flying this wish.
    pub fn animator(&self) -> &FlightWithTrail {
        &self.animator
    }
}

/// A wish that has arrived and is waiting to become an ornament.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PendingOrnament {
    /// The id of the wish.
    pub id: DecorationId,

    /// The text of the wish.
    pub text: String,

    /// Seconds left until the ornament appears.
    pub remaining: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_display_test() {
        assert_eq!(
            Payload::Image("gift.jpg".to_string()).to_string(),
            "image gift.jpg"
        );
        assert_eq!(Payload::Text("HELLO".to_string()).to_string(), "text \"HELLO\"");
    }
}
