//! `bevy_symbios_normalmap` — heightmap to tangent-space normal map conversion.
//!
//! # Architecture
//! [`convert`] turns a borrowed 8-bit [`HeightField`] into a packed
//! [`NormalMap`] according to a [`NormalMapConfig`].  The work is layered,
//! leaves first:
//!
//! - [`height`]: bounds-checked sample access.
//! - [`slope`]: tile-scoped row/column differences with clamp or wrap edges.
//! - [`normal`]: 1-2-1 weighted slopes combined into a unit vector.
//! - [`quantize`]: offset-128 and full-range byte encodings.
//! - [`range`]: global min/max scan that fixes the slope scale.
//! - [`convert`](mod@convert): tile traversal and channel packing.
//!
//! Edge handling is scoped to a [`tile::Tile`]: with `tile_size > 0` every tile
//! is converted as if it were a standalone texture.
//!
//! [`PendingNormalMap`] runs conversions off the main thread and
//! [`NormalMapPlugin`] uploads the results as Bevy images.

pub mod async_gen;
pub mod config;
pub mod convert;
pub mod error;
pub mod height;
pub mod image;
pub mod normal;
pub mod quantize;
pub mod range;
pub mod slope;
pub mod tile;

pub use async_gen::{NormalMapReady, PendingNormalMap};
pub use config::{Channel, ChannelMapping, NormalMapConfig};
pub use convert::{NormalMap, convert};
pub use error::NormalMapError;
pub use height::HeightField;
pub use slope::RowGuard;

use bevy::prelude::*;

/// Bevy plugin — registers the background-conversion polling system.
pub struct NormalMapPlugin;

impl Plugin for NormalMapPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, async_gen::poll_normal_map_tasks);
    }
}
