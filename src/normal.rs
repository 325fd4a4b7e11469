//! Combine row and column slopes into a tangent-space unit normal.
//!
//! Each axis uses a 1-2-1 weighted stencil: the slope at the texel itself
//! counts twice and the slopes of the two neighbouring rows (for X) or
//! columns (for Y) count once each, so the divisor starts at 5.  At a clamped
//! tile edge the missing neighbour is dropped and the divisor shrinks with
//! it; under wrapping the tile's opposite edge supplies the neighbour.
//!
//! The vector is normalised as `(nx, ny, 1) / len`, so Z is always positive
//! and the normal points out of the surface.

use crate::slope::SlopeSampler;

/// Unit surface normal in tangent space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl NormalVector {
    /// Straight up: the normal of a flat surface.
    pub const FLAT: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };
}

/// Estimate the unit normal at global `(x, y)` inside the sampler's tile.
///
/// `scale` converts raw intensity differences into slope; see
/// [`effective_scale`](crate::range::effective_scale).
pub fn estimate_normal(sampler: &SlopeSampler<'_>, x: u32, y: u32, scale: f64) -> NormalVector {
    let tile = sampler.tile();
    let wrap = sampler.wraps();
    let (top, bottom) = (tile.y, tile.y + tile.height - 1);
    let (left, right) = (tile.x, tile.x + tile.width - 1);

    let mut div = 5.0;
    let mut dh = sampler.row_slope(x, y) * 2;
    if y == top {
        if wrap {
            dh += sampler.row_slope(x, bottom);
        } else {
            div -= 1.0;
        }
    } else {
        dh += sampler.row_slope(x, y - 1);
    }
    if y == bottom {
        if wrap {
            dh += sampler.row_slope(x, top);
        } else {
            div -= 1.0;
        }
    } else {
        dh += sampler.row_slope(x, y + 1);
    }
    let nx = scale * dh as f64 / div;

    let mut div = 5.0;
    let mut dh = sampler.col_slope(x, y) * 2;
    if x == left {
        if wrap {
            dh += sampler.col_slope(right, y);
        } else {
            div -= 1.0;
        }
    } else {
        dh += sampler.col_slope(x - 1, y);
    }
    if x == right {
        if wrap {
            dh += sampler.col_slope(left, y);
        } else {
            div -= 1.0;
        }
    } else {
        dh += sampler.col_slope(x + 1, y);
    }
    let ny = scale * dh as f64 / div;

    let len = (nx * nx + ny * ny + 1.0).sqrt();
    NormalVector {
        x: nx / len,
        y: ny / len,
        z: 1.0 / len,
    }
}
