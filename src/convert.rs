//! Tiled heightmap → normal map conversion.
//!
//! The conversion runs in two strictly ordered passes:
//!
//! 1. A single scan over the whole height field fixes the slope scale (see
//!    [`effective_scale`]).
//! 2. The image is walked tile by tile.  Each texel's normal is estimated
//!    from neighbours inside its own tile only, quantised, and written to the
//!    channels named by the [`ChannelMapping`](crate::config::ChannelMapping).
//!
//! Channels not named by the mapping stay zero.

use bevy::log::debug;

use crate::{
    config::NormalMapConfig,
    error::NormalMapError,
    height::HeightField,
    normal::estimate_normal,
    quantize::{to_signed_byte, to_unsigned_byte},
    range::effective_scale,
    slope::SlopeSampler,
    tile::tiles,
};

/// Packed normal map produced by [`convert`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalMap {
    width: u32,
    height: u32,
    channels: usize,
    /// Row-major pixels, `channels` bytes each.
    data: Vec<u8>,
    /// Whether the map was built with wrapping edges, i.e. it tiles.
    tileable: bool,
}

impl NormalMap {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per pixel: 3 (RGB) or 4 (RGBA).
    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn is_tileable(&self) -> bool {
        self.tileable
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// The `channels` bytes of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = (y as usize * self.width as usize + x as usize) * self.channels;
        &self.data[start..start + self.channels]
    }
}

/// Allocate a zero-filled buffer, reporting failure instead of aborting.
fn zeroed(bytes: usize) -> Result<Vec<u8>, NormalMapError> {
    let mut data = Vec::new();
    data.try_reserve_exact(bytes)
        .map_err(|_| NormalMapError::Allocation { bytes })?;
    data.resize(bytes, 0);
    Ok(data)
}

/// Convert `field` into a normal map according to `config`.
///
/// Fails only for an invalid `config` or if the output buffer cannot be
/// allocated; the numeric path itself is total.
pub fn convert(
    field: &HeightField<'_>,
    config: &NormalMapConfig,
) -> Result<NormalMap, NormalMapError> {
    config.validate()?;

    let width = field.width();
    let height = field.height();
    let mapping = config.channel_mapping;
    let channels = mapping.channel_count();
    let mut data = zeroed(width as usize * height as usize * channels)?;

    let (xo, yo, zo) = (mapping.x.offset(), mapping.y.offset(), mapping.z.offset());

    // Must be frozen before the first tile: every texel uses the same scale.
    let scale = effective_scale(field, config.scale, config.normalise);
    debug!(
        "converting {width}×{height} heightmap: scale={scale}, tile_size={}, wrap={}, mapping={mapping}",
        config.tile_size, config.wrap
    );

    for tile in tiles(width, height, config.tile_size) {
        let sampler = SlopeSampler::new(field, tile, config.wrap, config.row_guard);
        for (x, y) in tile.pixels() {
            let n = estimate_normal(&sampler, x, y, scale);
            let i = (y as usize * width as usize + x as usize) * channels;
            data[i + xo] = to_signed_byte(n.x);
            data[i + yo] = to_signed_byte(n.y);
            data[i + zo] = if config.unsigned_z {
                to_unsigned_byte(n.z)
            } else {
                to_signed_byte(n.z)
            };
        }
    }

    Ok(NormalMap {
        width,
        height,
        channels,
        data,
        tileable: config.wrap,
    })
}
