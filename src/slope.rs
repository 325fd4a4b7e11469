//! Tile-scoped row and column slope estimation.
//!
//! Every difference is taken between two texels of the active [`Tile`]; a
//! pair that reaches outside the tile contributes no gradient at all.  With
//! wrapping enabled the tile's opposite edge stands in for the missing
//! neighbour, so a tile repeats seamlessly on its own.

use crate::{height::HeightField, tile::Tile};

/// Which degenerate column makes [`SlopeSampler::row_slope`] return 0.
///
/// The column estimator bails out when the tile is a single row tall.  The
/// row estimator has two historical behaviours:
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RowGuard {
    /// Return 0 when the tile is a single column wide, mirroring the column
    /// estimator.
    #[default]
    SingleColumn,
    /// Return 0 at tile-relative column 1, reproducing legacy output
    /// byte-for-byte.
    SecondColumn,
}

/// Reads intensity differences from one tile of a height field.
#[derive(Clone, Copy, Debug)]
pub struct SlopeSampler<'a> {
    field: &'a HeightField<'a>,
    tile: Tile,
    wrap: bool,
    guard: RowGuard,
}

impl<'a> SlopeSampler<'a> {
    pub fn new(field: &'a HeightField<'a>, tile: Tile, wrap: bool, guard: RowGuard) -> Self {
        Self {
            field,
            tile,
            wrap,
            guard,
        }
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }

    pub fn wraps(&self) -> bool {
        self.wrap
    }

    /// `sample(b) - sample(a)` along row `y` at tile-relative columns, or 0 if
    /// either column lies outside the tile.
    fn diff_x(&self, y: u32, a: u32, b: u32) -> i32 {
        let Tile { x, width, .. } = self.tile;
        if a >= width || b >= width || self.tile.local_y(y).is_none() {
            return 0;
        }
        self.field.sample(x + b, y) as i32 - self.field.sample(x + a, y) as i32
    }

    /// `sample(b) - sample(a)` down column `x` at tile-relative rows, or 0 if
    /// either row lies outside the tile.
    fn diff_y(&self, x: u32, a: u32, b: u32) -> i32 {
        let Tile { y, height, .. } = self.tile;
        if a >= height || b >= height || self.tile.local_x(x).is_none() {
            return 0;
        }
        self.field.sample(x, y + b) as i32 - self.field.sample(x, y + a) as i32
    }

    /// Horizontal intensity difference at global `(x, y)`.
    ///
    /// Negated so that intensity rising to the right tilts the normal left.
    pub fn row_slope(&self, x: u32, y: u32) -> i32 {
        let w = self.tile.width;
        let Some(lx) = self.tile.local_x(x) else {
            return 0;
        };
        let degenerate = match self.guard {
            RowGuard::SingleColumn => w == 1,
            RowGuard::SecondColumn => lx == 1,
        };
        if degenerate {
            return 0;
        }

        if lx == 0 {
            if self.wrap {
                -self.diff_x(y, 1, w - 1)
            } else {
                -self.diff_x(y, 0, 1)
            }
        } else if lx == w - 1 {
            if self.wrap {
                -self.diff_x(y, w - 2, 0)
            } else {
                -self.diff_x(y, w - 2, w - 1)
            }
        } else {
            -self.diff_x(y, lx - 1, lx + 1)
        }
    }

    /// Vertical intensity difference at global `(x, y)`.
    pub fn col_slope(&self, x: u32, y: u32) -> i32 {
        let h = self.tile.height;
        if h == 1 {
            return 0;
        }
        let Some(ly) = self.tile.local_y(y) else {
            return 0;
        };

        if ly == 0 {
            if self.wrap {
                self.diff_y(x, 1, h - 1)
            } else {
                self.diff_y(x, 0, 1)
            }
        } else if ly == h - 1 {
            if self.wrap {
                self.diff_y(x, h - 2, 0)
            } else {
                self.diff_y(x, h - 2, h - 1)
            }
        } else {
            self.diff_y(x, ly - 1, ly + 1)
        }
    }
}
