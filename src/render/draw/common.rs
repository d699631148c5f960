//! Common drawing utilities shared by the scene, bars and grid.

use crate::render::UnitMeshes;
use bevy::prelude::*;

/// Colour from a `0xRRGGBB` literal.
pub const fn hex(rgb: u32) -> Color {
    Color::srgb(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    )
}

/// Convert window coordinates to world coordinates of a centred 2D camera.
pub fn screen_to_world(point: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(point.x - viewport.x * 0.5, viewport.y * 0.5 - point.y)
}

/// Transform placing a unit quad over `rect`.
pub fn rect_transform(rect: Rect, viewport: Vec2, z: f32) -> Transform {
    Transform {
        translation: screen_to_world(rect.center(), viewport).extend(z),
        scale: rect.size().extend(1.0),
        ..default()
    }
}

/// Spawn a flat coloured rectangle under `parent`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_quad(
    commands: &mut Commands,
    parent: Entity,
    rect: Rect,
    color: Color,
    viewport: Vec2,
    z: f32,
    unit: &UnitMeshes,
    materials: &mut Assets<ColorMaterial>,
) {
    let mat = materials.add(ColorMaterial::from(color));
    commands.entity(parent).with_children(|p| {
        p.spawn((
            Mesh2d(unit.quad.clone()),
            MeshMaterial2d(mat),
            rect_transform(rect, viewport, z),
        ));
    });
}
