//! Health and stamina bars.
//!
//! A bar is a coloured track, a white inset, and a fill whose width is
//! proportional to a 0-100 value. Values under [`WARNING_THRESHOLD`] switch
//! the fill to [`WARNING_COLOR`].

use super::common::{hex, spawn_quad};
use crate::render::UnitMeshes;
use bevy::prelude::*;

pub const WARNING_THRESHOLD: f32 = 30.0;
pub const WARNING_COLOR: Color = hex(0xff0000);
pub const INSET_COLOR: Color = hex(0xffffff);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarKind {
    Health,
    Stamina,
}

/// Dimensions and palette of one bar variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSpec {
    pub track_width: u32,
    pub track_height: u32,
    pub fill_height: u32,
    pub inset: u32,
    pub track_color: Color,
    pub healthy_color: Color,
}

const HEALTH: BarSpec = BarSpec {
    track_width: 192,
    track_height: 12,
    fill_height: 10,
    inset: 2,
    track_color: hex(0x009c40),
    healthy_color: hex(0x009c40),
};

const STAMINA: BarSpec = BarSpec {
    track_width: 128,
    track_height: 10,
    fill_height: 6,
    inset: 2,
    track_color: hex(0x0000ff),
    healthy_color: hex(0x1e90ff),
};

impl BarKind {
    pub const fn spec(self) -> BarSpec {
        match self {
            BarKind::Health => HEALTH,
            BarKind::Stamina => STAMINA,
        }
    }
}

/// Rectangles making up one drawn bar, in window coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarLayout {
    pub track: Rect,
    pub inset: Rect,
    /// `None` when the value rounds down to an empty bar
    pub fill: Option<Rect>,
    pub fill_color: Color,
}

fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

impl BarSpec {
    /// `floor(track_width * value / 100)` with `value` clamped to [0, 100].
    pub fn fill_width(&self, value: f32) -> u32 {
        (self.track_width as f32 * clamp_percent(value) / 100.0).floor() as u32
    }

    pub fn fill_color(&self, value: f32) -> Color {
        if clamp_percent(value) < WARNING_THRESHOLD {
            WARNING_COLOR
        } else {
            self.healthy_color
        }
    }

    pub fn layout(&self, origin: Vec2, value: f32) -> BarLayout {
        let inset_origin = origin + Vec2::splat(self.inset as f32);
        let fill_width = self.fill_width(value);
        BarLayout {
            track: Rect::from_corners(
                origin,
                origin + Vec2::new(self.track_width as f32, self.track_height as f32),
            ),
            inset: Rect::from_corners(
                inset_origin,
                inset_origin + Vec2::new(self.track_width as f32, self.fill_height as f32),
            ),
            fill: (fill_width > 0).then(|| {
                Rect::from_corners(
                    inset_origin,
                    inset_origin + Vec2::new(fill_width as f32, self.fill_height as f32),
                )
            }),
            fill_color: self.fill_color(value),
        }
    }
}

/// Spawn the quads of one bar as children of `parent`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_bar(
    commands: &mut Commands,
    parent: Entity,
    kind: BarKind,
    origin: Vec2,
    value: f32,
    viewport: Vec2,
    z: f32,
    unit: &UnitMeshes,
    materials: &mut Assets<ColorMaterial>,
) {
    let spec = kind.spec();
    let layout = spec.layout(origin, value);

    spawn_quad(commands, parent, layout.track, spec.track_color, viewport, z, unit, materials);
    spawn_quad(commands, parent, layout.inset, INSET_COLOR, viewport, z + 0.01, unit, materials);
    if let Some(fill) = layout.fill {
        spawn_quad(commands, parent, fill, layout.fill_color, viewport, z + 0.02, unit, materials);
    }
}
