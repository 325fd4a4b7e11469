//! Conversion settings.

use std::{fmt, str::FromStr};

use crate::{error::NormalMapError, slope::RowGuard};

/// Output colour channel, identified by its byte offset within a pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    /// Byte offset within an RGB(A) pixel.
    pub fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'r' => Some(Channel::Red),
            'g' => Some(Channel::Green),
            'b' => Some(Channel::Blue),
            'a' => Some(Channel::Alpha),
            _ => None,
        }
    }

    fn letter(self) -> char {
        match self {
            Channel::Red => 'r',
            Channel::Green => 'g',
            Channel::Blue => 'b',
            Channel::Alpha => 'a',
        }
    }
}

/// Assignment of the normal's X, Y and Z components to output channels.
///
/// Written as three letters from `rgba`, e.g. `"rgb"` or `"agb"`.  Parsing is
/// case-insensitive and rejects repeated channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelMapping {
    pub x: Channel,
    pub y: Channel,
    pub z: Channel,
}

impl ChannelMapping {
    /// X in red, Y in green, Z in blue.
    pub const RGB: Self = Self {
        x: Channel::Red,
        y: Channel::Green,
        z: Channel::Blue,
    };

    /// Trackmania layout: X in alpha, Y in green, Z in blue.
    pub const TRACKMANIA: Self = Self {
        x: Channel::Alpha,
        y: Channel::Green,
        z: Channel::Blue,
    };

    /// `true` if any component is written to the alpha channel.
    pub fn uses_alpha(&self) -> bool {
        [self.x, self.y, self.z].contains(&Channel::Alpha)
    }

    /// Bytes per output pixel: 4 when alpha is used, otherwise 3.
    pub fn channel_count(&self) -> usize {
        if self.uses_alpha() { 4 } else { 3 }
    }
}

impl Default for ChannelMapping {
    fn default() -> Self {
        Self::RGB
    }
}

impl FromStr for ChannelMapping {
    type Err = NormalMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || NormalMapError::InvalidChannelMapping(s.to_string());
        let mut letters = s.chars().map(Channel::from_letter);
        let (Some(Some(x)), Some(Some(y)), Some(Some(z)), None) = (
            letters.next(),
            letters.next(),
            letters.next(),
            letters.next(),
        ) else {
            return Err(bad());
        };
        if x == y || y == z || x == z {
            return Err(bad());
        }
        Ok(Self { x, y, z })
    }
}

impl TryFrom<String> for ChannelMapping {
    type Error = NormalMapError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ChannelMapping> for String {
    fn from(m: ChannelMapping) -> Self {
        m.to_string()
    }
}

impl fmt::Display for ChannelMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.x.letter(), self.y.letter(), self.z.letter())
    }
}

/// Configures a heightmap → normal map conversion.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NormalMapConfig {
    /// Output channel for each normal component.
    pub channel_mapping: ChannelMapping,
    /// Height-to-slope multiplier; larger values produce steeper normals.
    pub scale: f64,
    /// Multiply `scale` by the observed intensity range `(max - min) / 255`.
    pub normalise: bool,
    /// Store Z over the full 0-255 range instead of offset-128.
    pub unsigned_z: bool,
    /// Treat each tile as repeating, sampling the opposite edge at borders.
    pub wrap: bool,
    /// Side length of independently processed tiles; 0 for the whole image.
    pub tile_size: u32,
    /// Which degenerate column flattens the horizontal slope to zero.
    pub row_guard: RowGuard,
}

impl Default for NormalMapConfig {
    fn default() -> Self {
        Self {
            channel_mapping: ChannelMapping::RGB,
            scale: 1.0,
            normalise: false,
            unsigned_z: false,
            wrap: false,
            tile_size: 0,
            row_guard: RowGuard::SingleColumn,
        }
    }
}

impl NormalMapConfig {
    /// Defaults with the [`ChannelMapping::TRACKMANIA`] layout.
    pub fn trackmania() -> Self {
        Self {
            channel_mapping: ChannelMapping::TRACKMANIA,
            ..Self::default()
        }
    }

    /// Reject settings the converter cannot honour.
    pub fn validate(&self) -> Result<(), NormalMapError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(NormalMapError::InvalidScale(self.scale));
        }
        Ok(())
    }
}
