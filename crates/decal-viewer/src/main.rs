//! Decal-Live desktop viewer.
//!
//! Renders the host object with its decal and drives placement from the mouse
//! and keyboard. Configuration is read from the JSON file named by
//! `DECAL_CONFIG`, falling back to defaults.

mod controls;
mod scene;

use anyhow::Context;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use decal_core::bevy::{CommandQueue, DecalSet, DecalViewerPlugin};
use decal_core::{DecalConfig, PlacementStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CONFIG_ENV: &str = "DECAL_CONFIG";

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,wgpu=error,naga=warn")),
        )
        .init();
}

fn load_config() -> anyhow::Result<DecalConfig> {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        tracing::info!("[config] {} not set, using defaults", CONFIG_ENV);
        return Ok(DecalConfig::default());
    };
    let config = DecalConfig::from_path(&path)
        .with_context(|| format!("failed to load decal config from {path}"))?;
    tracing::info!("[config] loaded {}", path);
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config()?;
    let store = PlacementStore::from_config(&config);
    let command_queue = CommandQueue::new();

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Decal Live".to_string(),
                    ..default()
                }),
                ..default()
            })
            .disable::<LogPlugin>(),
    );
    app.insert_resource(ClearColor(Color::srgb(0.93, 0.93, 0.93)));

    tracing::info!("[viewer] adding DecalViewerPlugin");
    app.add_plugins(DecalViewerPlugin::new(config, store, command_queue));

    app.add_systems(Startup, scene::setup_scene);
    app.add_systems(Update, controls::keyboard_controls.in_set(DecalSet::Input));
    app.add_systems(
        Update,
        (scene::rebuild_host_mesh, scene::apply_image_source).in_set(DecalSet::Binding),
    );

    app.run();
    Ok(())
}
