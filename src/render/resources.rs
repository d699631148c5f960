use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::client::MatchService;
use crate::session::MatchSession;

/// Server access shared with request tasks.
#[derive(Resource, Clone)]
pub struct MatchClient(pub Arc<dyn MatchService>);

impl MatchClient {
    pub fn new(service: impl MatchService) -> Self {
        Self(Arc::new(service))
    }
}

/// The running match, once the server has created it.
#[derive(Resource, Default)]
pub struct MatchRes(pub Option<MatchSession>);

/// Set when the scene must be torn down and rebuilt on this frame.
#[derive(Resource, Default)]
pub struct SceneDirty(pub bool);

#[derive(Resource, Clone, Debug)]
pub struct SceneLayout {
    /// Grid stride in pixels
    pub tile_size: u32,
    pub show_grid: bool,
    /// Size of the surface the scene was last drawn for
    pub viewport: UVec2,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            tile_size: 64,
            show_grid: true,
            viewport: UVec2::new(768, 384),
        }
    }
}

/// Image and font handles used by the scene.
///
/// Unit sprites are keyed by unit id and loaded the first time a unit shows up.
#[derive(Resource, Default)]
pub struct SceneAssets {
    pub background: Handle<Image>,
    pub font: Handle<Font>,
    units: HashMap<String, Handle<Image>>,
}

impl SceneAssets {
    pub fn ensure_unit(&mut self, server: Option<&AssetServer>, id: &str) {
        if self.units.contains_key(id) {
            return;
        }
        let handle: Handle<Image> = server
            .map(|s| s.load(format!("{id}.png")))
            .unwrap_or_default();
        self.units.insert(id.to_string(), handle);
    }

    pub fn unit(&self, id: &str) -> Handle<Image> {
        self.units.get(id).cloned().unwrap_or_default()
    }
}

/// Font file to use for scene text; `None` keeps Bevy's default font.
#[derive(Resource, Clone, Debug, Default)]
pub struct FontPath(pub Option<String>);

#[derive(Resource)]
pub struct UnitMeshes {
    pub quad: Handle<Mesh>,
}

pub fn setup_global_scene(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub fn setup_unit_meshes(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let quad = meshes.add(Mesh::from(Rectangle::new(1.0, 1.0)));
    commands.insert_resource(UnitMeshes { quad });
}

pub fn load_scene_assets(
    mut assets: ResMut<SceneAssets>,
    font: Res<FontPath>,
    server: Option<Res<AssetServer>>,
) {
    let Some(server) = server else {
        return;
    };
    assets.background = server.load("game_bg_2.png");
    if let Some(path) = &font.0 {
        assets.font = server.load(path.clone());
    }
}
