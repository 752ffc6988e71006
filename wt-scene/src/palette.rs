//! This module contains [`Palette`].

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use wt_frame::RGBArray;

/// The colour used when a palette is empty.
const FALLBACK_COLOUR: RGBArray = [255, 255, 255];

/// A fixed list of colours for decorations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(pub Vec<RGBArray>);

impl Palette {
    /// The palette for gifts.
    pub fn gifts() -> Self {
        Self(vec![
            [255, 0, 85],
            [0, 255, 204],
            [255, 204, 0],
            [255, 255, 255],
            [125, 0, 255],
            [255, 85, 0],
            [0, 153, 255],
        ])
    }

    /// The palette for ornaments.
    pub fn ornaments() -> Self {
        Self(vec![
            [255, 215, 0],
            [255, 0, 127],
            [229, 176, 158],
            [255, 244, 224],
            [255, 204, 230],
            [255, 255, 255],
        ])
    }

    /// Pick a colour uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> RGBArray {
        self.0.choose(rng).copied().unwrap_or(FALLBACK_COLOUR)
    }

    /// Get the colour at the given index, wrapping round to the start of the palette.
    pub fn cycle(&self, index: usize) -> RGBArray {
        if self.0.is_empty() {
            FALLBACK_COLOUR
        } else {
            self.0[index % self.0.len()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn palette_test() {
        let palette = Palette::gifts();
        assert_eq!(palette.cycle(0), [255, 0, 85]);
        assert_eq!(palette.cycle(8), [0, 255, 204]);

        let mut rng = StdRng::seed_from_u64(12345);
        for _ in 0..50 {
            assert!(palette.0.contains(&palette.choose(&mut rng)));
        }

        let empty = Palette(vec![]);
        assert_eq!(empty.cycle(3), FALLBACK_COLOUR);
        assert_eq!(empty.choose(&mut rng), FALLBACK_COLOUR);
    }
}
