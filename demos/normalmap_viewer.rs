//! `normalmap_viewer` — converts one noise heightmap three ways and displays
//! the results side-by-side.
//!
//! Run with:
//!   cargo run --example normalmap_viewer

use bevy::prelude::*;
use bevy_symbios_normalmap::{
    NormalMapConfig, NormalMapPlugin, NormalMapReady, PendingNormalMap,
};
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

const TEX_SIZE: u32 = 512;
const SPACING: f32 = TEX_SIZE as f32 + 20.0;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "bevy_symbios_normalmap — viewer".into(),
                resolution: ((SPACING * 3.0 + 40.0) as u32, (TEX_SIZE + 80)).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(NormalMapPlugin)
        .add_systems(Startup, spawn_tasks)
        .add_systems(Update, show_ready_maps)
        .run();
}

/// Marker so we know which slot to place a finished map in.
#[derive(Component)]
struct MapSlot(usize);

fn heights() -> Vec<u8> {
    let fbm: Fbm<Perlin> = Fbm::new(3).set_octaves(6);
    let step = 6.0 / TEX_SIZE as f64;
    (0..TEX_SIZE)
        .flat_map(|y| (0..TEX_SIZE).map(move |x| (x, y)))
        .map(|(x, y)| {
            let h = fbm.get([x as f64 * step, y as f64 * step]);
            ((h * 0.5 + 0.5).clamp(0.0, 1.0) * 255.0).round() as u8
        })
        .collect()
}

fn spawn_tasks(mut commands: Commands) {
    commands.spawn(Camera2d);

    let samples = heights();
    let configs = [
        NormalMapConfig {
            normalise: true,
            scale: 8.0,
            ..default()
        },
        NormalMapConfig {
            normalise: true,
            scale: 8.0,
            wrap: true,
            ..default()
        },
        NormalMapConfig {
            normalise: true,
            scale: 8.0,
            tile_size: 128,
            ..default()
        },
    ];
    for (slot, config) in configs.into_iter().enumerate() {
        commands.spawn((
            PendingNormalMap::new(samples.clone(), TEX_SIZE, TEX_SIZE, config),
            MapSlot(slot),
        ));
    }
}

fn show_ready_maps(
    mut commands: Commands,
    ready: Query<(Entity, &NormalMapReady, &MapSlot)>,
    mut shown: Local<Vec<Entity>>,
) {
    for (entity, ready_map, slot) in &ready {
        if shown.contains(&entity) {
            continue;
        }
        shown.push(entity);

        let x = (slot.0 as f32 - 1.0) * SPACING;

        commands.spawn((
            Sprite {
                image: ready_map.0.clone(),
                custom_size: Some(Vec2::splat(TEX_SIZE as f32)),
                ..default()
            },
            Transform::from_translation(Vec3::new(x, 0.0, 0.0)),
        ));

        let label = match slot.0 {
            0 => "Clamped",
            1 => "Wrapped",
            _ => "Tiled (128)",
        };
        commands.spawn((
            Text2d::new(label),
            Transform::from_translation(Vec3::new(x, -(TEX_SIZE as f32 * 0.5 + 18.0), 0.0)),
        ));
    }
}
