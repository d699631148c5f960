pub mod components;
pub mod draw;
pub mod resources;
pub mod systems;

pub use components::*;
pub use draw::*;
pub use resources::*;
use systems::*;

use bevy::prelude::*;

/// Match controller and scene drawing.
///
/// Expects a [`MatchClient`] resource; creates a match on startup.
#[derive(Default)]
pub struct MatchRenderPlugin;

impl Plugin for MatchRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MatchRes>()
            .init_resource::<SceneDirty>()
            .init_resource::<SceneLayout>()
            .init_resource::<SceneAssets>()
            .init_resource::<FontPath>()
            .add_systems(
                Startup,
                (
                    setup_global_scene,
                    setup_unit_meshes,
                    load_scene_assets,
                    begin_match,
                ),
            )
            .add_systems(
                Update,
                (
                    poll_match_requests,
                    handle_clicks,
                    redraw_scene,
                    draw_hud_bars,
                )
                    .chain(),
            );
    }
}
