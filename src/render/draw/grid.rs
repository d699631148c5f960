//! Debug coordinate grid drawn over the scene.

use super::common::hex;
use super::scene::{NodeKind, PlannedNode};
use bevy::prelude::*;

pub const GRID_COLOR: Color = hex(0x00ff00);
pub const GRID_LABEL_SIZE: f32 = 10.0;

const LINE_Z: f32 = 800.0;
const LABEL_Z: f32 = 900.0;

/// Lines every `tile_size` pixels across `viewport`, edges included, each
/// labelled with its coordinate.
pub fn plan_grid(viewport: UVec2, tile_size: u32) -> Vec<PlannedNode> {
    let mut nodes = Vec::new();
    if tile_size == 0 {
        return nodes;
    }
    let (width, height) = (viewport.x as f32, viewport.y as f32);

    for x in (0..=viewport.x).step_by(tile_size as usize) {
        let x = x as f32;
        nodes.push(line(Rect::new(x, 0.0, x + 1.0, height)));
        nodes.push(label(x, Vec2::new(x + 2.0, 10.0)));
    }

    for y in (0..=viewport.y).step_by(tile_size as usize) {
        let y = y as f32;
        nodes.push(line(Rect::new(0.0, y, width, y + 1.0)));
        let label_y = if y - 2.0 > 0.0 { y - 2.0 } else { 10.0 };
        nodes.push(label(y, Vec2::new(2.0, label_y)));
    }

    nodes
}

fn line(rect: Rect) -> PlannedNode {
    PlannedNode {
        kind: NodeKind::Quad { color: GRID_COLOR },
        rect,
        z: LINE_Z,
        hit: None,
    }
}

fn label(coord: f32, at: Vec2) -> PlannedNode {
    PlannedNode {
        kind: NodeKind::Text {
            text: format!("{coord}"),
            size: GRID_LABEL_SIZE,
            color: GRID_COLOR,
        },
        rect: Rect::from_corners(at, at),
        z: LABEL_Z,
        hit: None,
    }
}
