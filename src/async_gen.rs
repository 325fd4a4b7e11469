//! Background normal map conversion.
//!
//! Conversions run on a private, bounded [`rayon`] thread pool so large
//! heightmaps never stall the main thread.  Each conversion is itself
//! sequential; the pool only runs independent conversions side by side.
//! When one finishes, [`poll_normal_map_tasks`] uploads the result to
//! [`Assets<Image>`] and the entity receives [`NormalMapReady`].
//!
//! # Usage
//! ```rust,ignore
//! let heights: Vec<u8> = load_heights();
//! commands.spawn(PendingNormalMap::new(heights, 512, 512, NormalMapConfig::default()));
//!
//! // Later, query for NormalMapReady to consume the handle.
//! ```

use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicBool, Ordering},
    mpsc,
};

use bevy::{
    asset::Assets,
    ecs::{
        component::Component,
        entity::Entity,
        system::{Commands, Query, ResMut},
    },
    image::Image,
    prelude::Handle,
};

use crate::{
    config::NormalMapConfig,
    convert::{NormalMap, convert},
    error::NormalMapError,
    height::HeightField,
    image::{height_samples_from_image, sampler_address_mode},
};

/// Maximum number of conversions that run concurrently.
const MAX_CONVERSION_THREADS: usize = 4;

/// Returns the library-private rayon thread pool used for conversions.
///
/// Isolated from the application's global rayon pool so conversion work does
/// not starve unrelated parallel workloads.
fn conversion_pool() -> &'static rayon::ThreadPool {
    static POOL: OnceLock<rayon::ThreadPool> = OnceLock::new();
    POOL.get_or_init(|| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(MAX_CONVERSION_THREADS)
            .thread_name(|i| format!("normalmap-{i}"))
            .build()
            .expect("failed to build normal map conversion thread pool")
    })
}

pub type ConversionResult = Result<NormalMap, NormalMapError>;

/// Spawned onto an entity to request a background conversion.
///
/// Dropping it (e.g. when the entity is despawned) sets a cancellation flag;
/// a task that has not started yet exits without converting.
#[derive(Component)]
pub struct PendingNormalMap {
    // Wrapped in Mutex so the struct is Sync, which Bevy's Component bound requires.
    pub(crate) rx: std::sync::Mutex<mpsc::Receiver<ConversionResult>>,
    cancelled: Arc<AtomicBool>,
}

impl Drop for PendingNormalMap {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl PendingNormalMap {
    /// Convert an owned `width × height` height buffer in the background.
    ///
    /// Invalid dimensions or configuration surface through the task result,
    /// not here.
    pub fn new(samples: Vec<u8>, width: u32, height: u32, config: NormalMapConfig) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let (tx, rx) = mpsc::sync_channel(1);
        conversion_pool().spawn(move || {
            if flag.load(Ordering::Relaxed) {
                return;
            }
            let result = HeightField::new(width, height, &samples)
                .and_then(|field| convert(&field, &config));
            tx.send(result).ok();
        });
        Self {
            rx: std::sync::Mutex::new(rx),
            cancelled,
        }
    }

    /// Convert the first channel of an 8-bit Bevy image in the background.
    pub fn from_image(image: &Image, config: NormalMapConfig) -> Result<Self, NormalMapError> {
        let samples = height_samples_from_image(image)?;
        Ok(Self::new(samples, image.width(), image.height(), config))
    }

    /// Block until the conversion finishes.
    ///
    /// For tools and tests that have no Bevy schedule to poll from.
    pub fn wait(self) -> Option<ConversionResult> {
        let rx = self.rx.lock().ok()?;
        rx.recv().ok()
    }
}

/// Added to the entity by [`poll_normal_map_tasks`] when conversion is done.
#[derive(Component)]
pub struct NormalMapReady(pub Handle<Image>);

/// Bevy system: polls pending conversions and uploads finished maps.
pub fn poll_normal_map_tasks(
    mut commands: Commands,
    tasks: Query<(Entity, &PendingNormalMap)>,
    mut images: ResMut<Assets<Image>>,
) {
    for (entity, pending) in &tasks {
        let poll = pending
            .rx
            .lock()
            .expect("normal map thread poisoned")
            .try_recv();
        match poll {
            Ok(Ok(map)) => {
                let mode = sampler_address_mode(&map);
                let handle = images.add(map.into_image(mode));
                commands
                    .entity(entity)
                    .remove::<PendingNormalMap>()
                    .insert(NormalMapReady(handle));
            }
            Ok(Err(e)) => {
                bevy::log::error!("Normal map conversion failed: {e}");
                commands.entity(entity).remove::<PendingNormalMap>();
            }
            Err(mpsc::TryRecvError::Disconnected) => {
                bevy::log::error!("Normal map conversion thread panicked");
                commands.entity(entity).remove::<PendingNormalMap>();
            }
            Err(mpsc::TryRecvError::Empty) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::{
        asset::RenderAssetUsages,
        render::render_resource::{Extent3d, TextureDimension, TextureFormat},
    };

    use super::*;

    fn r8_image(width: u32, height: u32, data: Vec<u8>) -> Image {
        Image::new(
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            data,
            TextureFormat::R8Unorm,
            RenderAssetUsages::default(),
        )
    }

    #[test]
    fn background_conversion_matches_direct() {
        let samples: Vec<u8> = (0..64u32).map(|i| (i * 13 % 251) as u8).collect();
        let config = NormalMapConfig {
            wrap: true,
            tile_size: 4,
            ..NormalMapConfig::default()
        };
        let field = HeightField::new(8, 8, &samples).unwrap();
        let direct = convert(&field, &config).unwrap();

        let pending = PendingNormalMap::new(samples.clone(), 8, 8, config);
        let background = pending.wait().expect("task dropped").unwrap();
        assert_eq!(background, direct);
    }

    #[test]
    fn invalid_input_surfaces_through_result() {
        let pending = PendingNormalMap::new(vec![0; 3], 2, 2, NormalMapConfig::default());
        assert_eq!(
            pending.wait().expect("task dropped"),
            Err(NormalMapError::SampleCountMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn converts_r8_image_in_background() {
        let data = vec![0u8, 0, 255];
        let image = r8_image(3, 1, data.clone());
        let config = NormalMapConfig {
            normalise: true,
            ..NormalMapConfig::default()
        };
        let field = HeightField::new(3, 1, &data).unwrap();
        let direct = convert(&field, &config).unwrap();

        let pending = PendingNormalMap::from_image(&image, config).unwrap();
        let map = pending.wait().expect("task dropped").unwrap();
        assert_eq!((map.width(), map.height()), (3, 1));
        assert_eq!(map.pixel(1, 0), [1, 128, 128]);
        assert_eq!(map, direct);
    }

    #[test]
    fn from_image_rejects_unsupported_format() {
        let image = Image::new(
            Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            vec![0; 16],
            TextureFormat::Rgba32Float,
            RenderAssetUsages::default(),
        );
        assert!(matches!(
            PendingNormalMap::from_image(&image, NormalMapConfig::default()),
            Err(NormalMapError::UnsupportedFormat(TextureFormat::Rgba32Float))
        ));
    }
}
