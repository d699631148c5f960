use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use error_stack::Report;

use crate::ClientError;
use crate::client::HttpMatchClient;
use crate::config::ClientConfig;
use crate::render::{FontPath, MatchClient, MatchRenderPlugin};

/// Open the game window and play one match against `config.server_url`.
pub fn run_match(config: ClientConfig) -> crate::Result<()> {
    config.validate()?;

    let exit = App::new()
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(MatchClient::new(HttpMatchClient::new(&config.server_url)))
        .insert_resource(config.scene_layout())
        .insert_resource(FontPath(config.font.clone()))
        .add_plugins((
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Skirmish".to_string(),
                        resolution: WindowResolution::new(config.width, config.height),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: config.assets.clone(),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,skirmish_client=debug".to_string(),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
            MatchRenderPlugin,
        ))
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => {
            Err(Report::new(ClientError).attach(format!("client exited with code {code}")))
        }
    }
}
