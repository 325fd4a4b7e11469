//! Tile partitioning.
//!
//! Tiles are visited row-major and never overlap.  The last tile in each row
//! and column is clipped to the image, so it may be narrower or shorter than
//! the nominal tile size.

/// Rectangle in global image coordinates that scopes every neighbour read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Tile {
    /// Tile-relative column of global `x`, or `None` outside the tile.
    #[inline]
    pub fn local_x(&self, x: u32) -> Option<u32> {
        x.checked_sub(self.x).filter(|&lx| lx < self.width)
    }

    /// Tile-relative row of global `y`, or `None` outside the tile.
    #[inline]
    pub fn local_y(&self, y: u32) -> Option<u32> {
        y.checked_sub(self.y).filter(|&ly| ly < self.height)
    }

    /// Global coordinates of every pixel in the tile, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let Tile {
            x,
            y,
            width,
            height,
        } = *self;
        (y..y + height).flat_map(move |py| (x..x + width).map(move |px| (px, py)))
    }
}

/// Partition a `width × height` image into tiles of `tile_size` texels.
///
/// A `tile_size` of 0 yields one tile covering the whole image.
pub fn tiles(width: u32, height: u32, tile_size: u32) -> impl Iterator<Item = Tile> {
    let tile_w = if tile_size > 0 { tile_size } else { width };
    let tile_h = if tile_size > 0 { tile_size } else { height };
    (0..height).step_by(tile_h.max(1) as usize).flat_map(move |ty| {
        (0..width).step_by(tile_w.max(1) as usize).map(move |tx| Tile {
            x: tx,
            y: ty,
            width: tile_w.min(width - tx),
            height: tile_h.min(height - ty),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tile_size_is_whole_image() {
        let all: Vec<Tile> = tiles(7, 5, 0).collect();
        assert_eq!(
            all,
            vec![Tile {
                x: 0,
                y: 0,
                width: 7,
                height: 5
            }]
        );
    }

    #[test]
    fn edge_tiles_are_clipped() {
        let all: Vec<Tile> = tiles(5, 3, 2).collect();
        assert_eq!(all.len(), 6);
        assert_eq!(
            all[2],
            Tile {
                x: 4,
                y: 0,
                width: 1,
                height: 2
            }
        );
        assert_eq!(
            all[5],
            Tile {
                x: 4,
                y: 2,
                width: 1,
                height: 1
            }
        );
    }

    #[test]
    fn tiles_cover_every_pixel_once() {
        let (w, h) = (13u32, 9u32);
        let mut hits = vec![0u32; (w * h) as usize];
        for tile in tiles(w, h, 4) {
            for (x, y) in tile.pixels() {
                hits[(y * w + x) as usize] += 1;
            }
        }
        assert!(hits.iter().all(|&n| n == 1), "coverage: {hits:?}");
    }

    #[test]
    fn oversized_tile_is_clipped_to_image() {
        let all: Vec<Tile> = tiles(3, 2, 64).collect();
        assert_eq!(all.len(), 1);
        assert_eq!((all[0].width, all[0].height), (3, 2));
    }

    #[test]
    fn local_coordinates_respect_bounds() {
        let tile = Tile {
            x: 4,
            y: 8,
            width: 4,
            height: 2,
        };
        assert_eq!(tile.local_x(3), None);
        assert_eq!(tile.local_x(4), Some(0));
        assert_eq!(tile.local_x(7), Some(3));
        assert_eq!(tile.local_x(8), None);
        assert_eq!(tile.local_y(9), Some(1));
        assert_eq!(tile.local_y(10), None);
    }
}
