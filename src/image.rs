//! Bridge between Bevy [`Image`] assets and the raw conversion buffers.
//!
//! Heights are read from the first channel of an 8-bit image as stored, with
//! no colour-space conversion.  Normal maps are uploaded as linear
//! `Rgba8Unorm`; Bevy has no 3-channel 8-bit format, so RGB maps gain an opaque
//! alpha channel on the way in.

use bevy::{
    asset::RenderAssetUsages,
    image::{Image, ImageAddressMode, ImageSampler, ImageSamplerDescriptor},
    render::render_resource::{Extent3d, TextureDimension, TextureFormat},
};

use crate::{convert::NormalMap, error::NormalMapError};

/// Extract one height byte per texel from an 8-bit Bevy image.
///
/// Accepts `R8Unorm`, `Rg8Unorm`, `Rgba8Unorm` and `Rgba8UnormSrgb`; the first
/// channel of each texel is used verbatim.
pub fn height_samples_from_image(image: &Image) -> Result<Vec<u8>, NormalMapError> {
    let format = image.texture_descriptor.format;
    let stride = match format {
        TextureFormat::R8Unorm => 1,
        TextureFormat::Rg8Unorm => 2,
        TextureFormat::Rgba8Unorm | TextureFormat::Rgba8UnormSrgb => 4,
        other => return Err(NormalMapError::UnsupportedFormat(other)),
    };
    let data = image
        .data
        .as_deref()
        .ok_or(NormalMapError::MissingImageData)?;
    let texels = image.width() as usize * image.height() as usize;
    if data.len() < texels * stride {
        return Err(NormalMapError::SampleCountMismatch {
            expected: texels * stride,
            actual: data.len(),
        });
    }
    Ok(data.iter().step_by(stride).take(texels).copied().collect())
}

/// Sampler address mode matching how the map was built.
///
/// Wrapped maps tile, so they repeat; clamped maps must not bleed across the
/// border.
pub fn sampler_address_mode(map: &NormalMap) -> ImageAddressMode {
    if map.is_tileable() {
        ImageAddressMode::Repeat
    } else {
        ImageAddressMode::ClampToEdge
    }
}

impl NormalMap {
    /// Upload into a linear `Rgba8Unorm` [`Image`] with `address_mode` on both
    /// axes.
    ///
    /// Takes `self` by value so a 4-channel map moves its buffer straight into
    /// the image.
    pub fn into_image(self, address_mode: ImageAddressMode) -> Image {
        let (width, height, channels) = (self.width(), self.height(), self.channels());
        let data = if channels == 4 {
            self.into_data()
        } else {
            self.data()
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect()
        };
        let mut image = Image::new(
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            data,
            TextureFormat::Rgba8Unorm,
            RenderAssetUsages::default(),
        );
        image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            // wgpu requires all filter modes to be Linear when anisotropy_clamp > 1.
            mag_filter: bevy::image::ImageFilterMode::Linear,
            min_filter: bevy::image::ImageFilterMode::Linear,
            mipmap_filter: bevy::image::ImageFilterMode::Linear,
            anisotropy_clamp: 16,
            ..Default::default()
        });
        image
    }
}
