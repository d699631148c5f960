//! Scene drawing.
//!
//! Layout is planned in window coordinates (top-left origin, y down) by pure
//! functions, then spawned as entities:
//! - `common`: coordinate conversion, colours, quad spawning
//! - `hud`: health and stamina bars
//! - `grid`: debug coordinate grid
//! - `scene`: the full match scene

mod common;
mod grid;
mod hud;
mod scene;

pub use common::{hex, rect_transform, screen_to_world, spawn_quad};
pub use grid::{GRID_COLOR, GRID_LABEL_SIZE, plan_grid};
pub use hud::{
    BarKind, BarLayout, BarSpec, INSET_COLOR, WARNING_COLOR, WARNING_THRESHOLD, spawn_bar,
};
pub use scene::{NodeKind, PlannedNode, ScenePlan, plan_scene, spawn_plan};
