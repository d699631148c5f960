use bevy::prelude::*;
use bevy::tasks::Task;

use super::draw::BarKind;
use crate::TransportResult;
use crate::core::MatchState;

/// What a click on an interactive element means.
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HitTarget {
    Enemy { id: String },
    Ability { id: String },
}

impl HitTarget {
    pub fn id(&self) -> &str {
        match self {
            HitTarget::Enemy { id } | HitTarget::Ability { id } => id,
        }
    }
}

/// Clickable area of a hit target, in window coordinates (top-left origin, y down).
#[derive(Component, Clone, Copy, Debug)]
pub struct HitBox {
    pub rect: Rect,
    /// Draw depth; the highest box under the cursor wins.
    pub z: f32,
}

/// Marker for top-level entities of the current scene. All of them go on redraw.
#[derive(Component)]
pub struct SceneNode;

/// A health or stamina bar. Children are rebuilt whenever this changes.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct HudBar {
    pub kind: BarKind,
    /// Percentage, clamped to [0, 100] when drawn
    pub value: f32,
    /// Top-left corner of the track, window coordinates
    pub origin: Vec2,
    pub z: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Create,
    Submit,
}

/// A call to the match server running on the IO task pool.
#[derive(Component)]
pub struct MatchRequest {
    pub kind: RequestKind,
    pub task: Task<TransportResult<MatchState>>,
}
