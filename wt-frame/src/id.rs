//! This module provides [`DecorationId`], the stable identity of a decoration or wish.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// The two kinds of persistent decoration.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, strum::EnumIter, strum::Display,
)]
pub enum DecorationKind {
    /// A gift box sitting on the ground around the tree, carrying an image.
    Gift,

    /// A star ornament hanging on the tree, carrying the text of a wish.
    Ornament,
}

/// The identity of a decoration or wish, stable for its whole lifetime.
///
/// Decorations that exist when the scene starts are told apart from ones the user added. Default
/// gifts display as negative numbers counting down from -1, default ornaments display as
/// `default-wish-N`, and user-added things display as their millisecond timestamp.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DecorationId {
    /// A decoration that was created along with the scene.
    Default {
        /// What kind of decoration this is.
        kind: DecorationKind,

        /// The index of this decoration in the list of defaults.
        index: usize,
    },

    /// Something the user added. A wish keeps its id when it becomes an ornament.
    User(u64),
}

impl fmt::Display for DecorationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default {
                kind: DecorationKind::Gift,
                index,
            } => write!(f, "-{}", index + 1),
            Self::Default {
                kind: DecorationKind::Ornament,
                index,
            } => write!(f, "default-wish-{index}"),
            Self::User(id) => write!(f, "{id}"),
        }
    }
}

/// The error returned when parsing a [`DecorationId`] fails.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("`{0}` is not a valid decoration id")]
pub struct ParseDecorationIdError(pub String);

impl FromStr for DecorationId {
    type Err = ParseDecorationIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDecorationIdError(s.to_string());

        if let Some(index) = s.strip_prefix("default-wish-") {
            let index = index.parse().map_err(|_| err())?;
            return Ok(Self::Default {
                kind: DecorationKind::Ornament,
                index,
            });
        }

        if let Some(number) = s.strip_prefix('-') {
            let number: usize = number.parse().map_err(|_| err())?;
            return match number.checked_sub(1) {
                Some(index) => Ok(Self::Default {
                    kind: DecorationKind::Gift,
                    index,
                }),
                None => Err(err()),
            };
        }

        s.parse().map(Self::User).map_err(|_| err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_test() {
        let ids = [
            DecorationId::Default {
                kind: DecorationKind::Gift,
                index: 0,
            },
            DecorationId::Default {
                kind: DecorationKind::Gift,
                index: 4,
            },
            DecorationId::Default {
                kind: DecorationKind::Ornament,
                index: 3,
            },
            DecorationId::User(1_703_462_400_000),
        ];
        let strings = ["-1", "-5", "default-wish-3", "1703462400000"];

        for (id, string) in ids.into_iter().zip(strings) {
            assert_eq!(id.to_string(), string);
            assert_eq!(string.parse::<DecorationId>(), Ok(id));
        }
    }

    #[test]
    fn parse_garbage_test() {
        for garbage in ["", "-0", "-", "default-wish-", "default-wish-x", "gift", "12a"] {
            assert_eq!(
                garbage.parse::<DecorationId>(),
                Err(ParseDecorationIdError(garbage.to_string())),
                "{garbage:?} should not parse"
            );
        }
    }
}
