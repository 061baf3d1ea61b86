//! Scene composition: camera, lights, host object and decal quad.

use bevy::prelude::*;
use decal_core::bevy::{CameraRig, DecalMarker, HostObject, MainCamera, ModelChangedEvent, PlacementStoreRes};
use decal_core::{ImageSource, TargetModel};

/// Texture path for an image source. Built-in decals ship as `<id>.png` in the asset folder.
fn texture_path(source: &ImageSource) -> String {
    match source {
        ImageSource::BuiltIn(id) => format!("{}.png", id.0),
        ImageSource::Custom(image) => image.0.clone(),
    }
}

fn decal_material(texture: Option<Handle<Image>>) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: texture,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

fn host_mesh(model: TargetModel) -> Mesh {
    Mesh::from(Cuboid::from_size(model.host_size()))
}

/// Startup system spawning everything the viewer plugin expects.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    store: Res<PlacementStoreRes>,
) {
    let rig = CameraRig::default();
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 25f32.to_radians(),
            ..default()
        }),
        Transform::from_translation(rig.home),
        MainCamera,
        rig,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(2.0, 4.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            intensity: 150_000.0,
            ..default()
        },
        Transform::from_xyz(-2.0, 1.0, 2.0),
    ));

    let model = store.read(|state| state.model);
    let host_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.94, 0.94, 0.94),
        perceptual_roughness: 1.0,
        ..default()
    });
    commands
        .spawn((
            Mesh3d(meshes.add(host_mesh(model))),
            MeshMaterial3d(host_material),
            Transform::default(),
            HostObject,
        ))
        .with_children(|host| {
            host.spawn((
                Mesh3d(meshes.add(Rectangle::new(1.0, 1.0))),
                MeshMaterial3d(materials.add(decal_material(None))),
                Transform::default(),
                DecalMarker,
            ));
        });

    tracing::info!("[viewer] scene ready ({})", model);
}

/// System to swap the host mesh when the model changes.
pub fn rebuild_host_mesh(
    mut commands: Commands,
    mut model_events: MessageReader<ModelChangedEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    hosts: Query<Entity, With<HostObject>>,
) {
    let Some(model) = model_events.read().last().map(|event| event.model) else {
        return;
    };
    for entity in &hosts {
        commands.entity(entity).insert(Mesh3d(meshes.add(host_mesh(model))));
    }
}

/// System to reload the decal texture when the image source changes.
pub fn apply_image_source(
    mut commands: Commands,
    store: Res<PlacementStoreRes>,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    decals: Query<Entity, With<DecalMarker>>,
    mut current: Local<Option<ImageSource>>,
) {
    let source = store.read(|state| state.image_source.clone());
    if current.as_ref() == Some(&source) {
        return;
    }

    let path = texture_path(&source);
    tracing::info!("[viewer] loading decal texture {}", path);
    let texture = asset_server.load(path);
    for entity in &decals {
        commands
            .entity(entity)
            .insert(MeshMaterial3d(materials.add(decal_material(Some(texture.clone())))));
    }
    *current = Some(source);
}

#[cfg(test)]
mod tests {
    use decal_core::{BuiltInDecalId, ImageRef};

    use super::*;

    #[test]
    fn test_texture_paths() {
        let builtin = ImageSource::BuiltIn(BuiltInDecalId("three2".to_string()));
        assert_eq!(texture_path(&builtin), "three2.png");
        let custom = ImageSource::Custom(ImageRef("uploads/logo.png".to_string()));
        assert_eq!(texture_path(&custom), "uploads/logo.png");
        assert_eq!(texture_path(&ImageSource::default()), "react.png");
    }
}
