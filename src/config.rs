//! Client configuration

use clap::Parser;
use error_stack::Report;

use crate::ClientError;
use crate::client::DEFAULT_SERVER_URL;
use crate::render::SceneLayout;

/// Turn-based skirmish client
#[derive(Parser, Clone, Debug)]
#[command(name = "skirmish-client")]
#[command(about = "Play a hero-vs-enemy match hosted by a skirmish server")]
pub struct ClientConfig {
    /// Base URL of the match server
    #[arg(long, env = "SKIRMISH_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Window width in pixels
    #[arg(long, default_value = "768")]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "384")]
    pub height: u32,

    /// Grid stride in pixels
    #[arg(long, default_value = "64")]
    pub tile_size: u32,

    /// Directory holding background and unit images
    #[arg(long, default_value = "assets")]
    pub assets: String,

    /// Font file, relative to the assets directory (Bevy's default font otherwise)
    #[arg(long)]
    pub font: Option<String>,

    /// Hide the debug coordinate grid
    #[arg(long)]
    pub no_grid: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            width: 768,
            height: 384,
            tile_size: 64,
            assets: "assets".to_string(),
            font: None,
            no_grid: false,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Report::new(ClientError)
                .attach(format!("window size {}x{} is empty", self.width, self.height)));
        }
        if self.tile_size == 0 {
            return Err(Report::new(ClientError).attach("tile size must be positive"));
        }
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(Report::new(ClientError)
                .attach(format!("server url {:?} is not http(s)", self.server_url)));
        }
        Ok(())
    }

    pub fn scene_layout(&self) -> SceneLayout {
        SceneLayout {
            tile_size: self.tile_size,
            show_grid: !self.no_grid,
            viewport: bevy::math::UVec2::new(self.width, self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_flags() {
        let parsed = ClientConfig::parse_from(["skirmish-client"]);
        let defaults = ClientConfig::default();
        assert_eq!(parsed.width, defaults.width);
        assert_eq!(parsed.height, defaults.height);
        assert_eq!(parsed.tile_size, defaults.tile_size);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn flags_shape_the_layout() {
        let config = ClientConfig::parse_from([
            "skirmish-client",
            "--server-url",
            "https://arena.example:8443",
            "--tile-size",
            "32",
            "--no-grid",
        ]);
        assert_eq!(config.server_url, "https://arena.example:8443");
        let layout = config.scene_layout();
        assert_eq!(layout.tile_size, 32);
        assert!(!layout.show_grid);
    }

    #[test]
    fn rejects_unusable_values() {
        let zero_tiles = ClientConfig {
            tile_size: 0,
            ..ClientConfig::default()
        };
        assert!(zero_tiles.validate().is_err());

        let bad_url = ClientConfig {
            server_url: "localhost:3000".into(),
            ..ClientConfig::default()
        };
        assert!(bad_url.validate().is_err());
    }
}
