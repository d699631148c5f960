//! Full match scene: background, units, bars, ability tiles, status and grid.

use super::common::{hex, rect_transform, screen_to_world};
use super::grid::plan_grid;
use super::hud::BarKind;
use crate::core::{Ability, MatchState, Side};
use crate::render::{HitBox, HitTarget, HudBar, SceneAssets, SceneLayout, SceneNode, UnitMeshes};
use bevy::prelude::*;
use bevy::sprite::Anchor;

const ROW_STRIDE: f32 = 64.0;
const SPRITE_SIZE: f32 = 50.0;

const HERO_X: f32 = 192.0;
/// Middle hero of a three-hero party stands one tile forward.
const HERO_FORWARD_X: f32 = 256.0;
const HERO_Y: f32 = 128.0;
const HERO_HEALTH_OFFSET: Vec2 = Vec2::new(58.0, 10.0);
const HERO_STAMINA_OFFSET: Vec2 = Vec2::new(58.0, 28.0);

const ENEMY_X: f32 = 600.0;
const ENEMY_Y: f32 = 70.0;
const ENEMY_HEALTH_OFFSET: Vec2 = Vec2::new(-200.0, 19.0);

const ABILITY_X: f32 = 207.0;
const ABILITY_STEP: f32 = 80.0;
const ABILITY_Y: f32 = 320.0;
const ABILITY_SIZE: f32 = 64.0;
const ABILITY_LABEL_OFFSET: Vec2 = Vec2::new(10.0, 20.0);
const ABILITY_COLOR: Color = hex(0x333333);
const ABILITY_SELECTED_COLOR: Color = hex(0x4a6fa5);

const STATUS_AT: Vec2 = Vec2::new(16.0, 24.0);
const INTENT_AT: Vec2 = Vec2::new(16.0, 44.0);
const STATUS_COLOR: Color = hex(0xffffff);
const INTENT_COLOR: Color = hex(0xffd700);

const BACKGROUND_Z: f32 = 0.0;
const UNIT_Z: f32 = 1.0;
const LABEL_Z: f32 = 2.0;
const BAR_Z: f32 = 3.0;
const STATUS_Z: f32 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Background,
    Sprite { unit_id: String },
    Quad { color: Color },
    Bar { kind: BarKind, value: f32 },
    Text { text: String, size: f32, color: Color },
}

/// One element of the scene, laid out in window coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedNode {
    pub kind: NodeKind,
    /// Covered area; text and bars only use `min` as their top-left corner.
    pub rect: Rect,
    pub z: f32,
    pub hit: Option<HitTarget>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenePlan {
    pub nodes: Vec<PlannedNode>,
}

impl ScenePlan {
    pub fn hit_targets(&self) -> impl Iterator<Item = &HitTarget> {
        self.nodes.iter().filter_map(|n| n.hit.as_ref())
    }

    fn push(&mut self, kind: NodeKind, rect: Rect, z: f32, hit: Option<HitTarget>) {
        self.nodes.push(PlannedNode { kind, rect, z, hit });
    }

    fn text(&mut self, text: String, at: Vec2, size: f32, color: Color, z: f32) {
        self.push(
            NodeKind::Text { text, size, color },
            Rect::from_corners(at, at),
            z,
            None,
        );
    }

    fn bar(&mut self, kind: BarKind, at: Vec2, value: f32) {
        self.push(NodeKind::Bar { kind, value }, Rect::from_corners(at, at), BAR_Z, None);
    }
}

fn sprite_rect(at: Vec2) -> Rect {
    Rect::from_corners(at, at + Vec2::splat(SPRITE_SIZE))
}

pub fn hero_origin(index: usize, count: usize) -> Vec2 {
    let x = if count == 3 && index == 1 {
        HERO_FORWARD_X
    } else {
        HERO_X
    };
    Vec2::new(x, HERO_Y + index as f32 * ROW_STRIDE)
}

pub fn enemy_origin(index: usize) -> Vec2 {
    Vec2::new(ENEMY_X, ENEMY_Y + index as f32 * ROW_STRIDE)
}

pub fn ability_origin(index: usize) -> Vec2 {
    Vec2::new(ABILITY_X + index as f32 * ABILITY_STEP, ABILITY_Y)
}

fn status_line(snapshot: &MatchState) -> String {
    match snapshot.winner() {
        Some(Side::Heroes) => "Heroes win".to_string(),
        Some(Side::Enemies) => "Enemies win".to_string(),
        None => {
            let player = snapshot
                .unit(snapshot.current_player())
                .map(|u| u.display_name())
                .unwrap_or(snapshot.current_player());
            format!("Turn: {player}")
        }
    }
}

/// Lay out the whole scene for `snapshot`.
///
/// `abilities` are the current player's; `selected` highlights one of them.
/// Enemies and ability tiles are the only interactive nodes.
pub fn plan_scene(
    snapshot: &MatchState,
    abilities: &[Ability],
    selected: Option<usize>,
    layout: &SceneLayout,
) -> ScenePlan {
    let mut plan = ScenePlan::default();
    let viewport = layout.viewport.as_vec2();

    plan.push(
        NodeKind::Background,
        Rect::from_corners(Vec2::ZERO, viewport),
        BACKGROUND_Z,
        None,
    );

    plan.text(status_line(snapshot), STATUS_AT, 14.0, STATUS_COLOR, STATUS_Z);
    if let Some(intent) = &snapshot.state.pending_enemy_action {
        let target = snapshot
            .unit(&intent.target_id)
            .map(|u| u.display_name())
            .unwrap_or(intent.target_id.as_str());
        plan.text(
            format!("Enemy intent: action {} on {target}", intent.action_index),
            INTENT_AT,
            12.0,
            INTENT_COLOR,
            STATUS_Z,
        );
    }

    let heroes = &snapshot.state.heroes;
    for (i, hero) in heroes.iter().enumerate() {
        let at = hero_origin(i, heroes.len());
        plan.push(
            NodeKind::Sprite {
                unit_id: hero.id.clone(),
            },
            sprite_rect(at),
            UNIT_Z,
            None,
        );
        plan.bar(BarKind::Health, at + HERO_HEALTH_OFFSET, hero.stats.health_percent());
        plan.bar(BarKind::Stamina, at + HERO_STAMINA_OFFSET, hero.stats.stamina_percent());
    }

    for (i, enemy) in snapshot.state.enemies.iter().enumerate() {
        let at = enemy_origin(i);
        plan.push(
            NodeKind::Sprite {
                unit_id: enemy.id.clone(),
            },
            sprite_rect(at),
            UNIT_Z,
            Some(HitTarget::Enemy {
                id: enemy.id.clone(),
            }),
        );
        plan.bar(BarKind::Health, at + ENEMY_HEALTH_OFFSET, enemy.stats.health_percent());
    }

    for (i, ability) in abilities.iter().enumerate() {
        let at = ability_origin(i);
        let color = if selected == Some(i) {
            ABILITY_SELECTED_COLOR
        } else {
            ABILITY_COLOR
        };
        plan.push(
            NodeKind::Quad { color },
            Rect::from_corners(at, at + Vec2::splat(ABILITY_SIZE)),
            UNIT_Z,
            Some(HitTarget::Ability {
                id: ability.id.clone(),
            }),
        );
        plan.text(
            ability.label().to_string(),
            at + ABILITY_LABEL_OFFSET,
            10.0,
            STATUS_COLOR,
            LABEL_Z,
        );
    }

    if layout.show_grid {
        plan.nodes.extend(plan_grid(layout.viewport, layout.tile_size));
    }

    plan
}

/// Spawn every node of `plan` as a top-level [`SceneNode`] entity.
pub fn spawn_plan(
    commands: &mut Commands,
    plan: &ScenePlan,
    viewport: Vec2,
    assets: &SceneAssets,
    unit: &UnitMeshes,
    materials: &mut Assets<ColorMaterial>,
) {
    for node in &plan.nodes {
        let centre = screen_to_world(node.rect.center(), viewport).extend(node.z);
        let mut entity = match &node.kind {
            NodeKind::Background => commands.spawn((
                Sprite {
                    image: assets.background.clone(),
                    custom_size: Some(node.rect.size()),
                    ..default()
                },
                Transform::from_translation(centre),
            )),
            NodeKind::Sprite { unit_id } => commands.spawn((
                Sprite {
                    image: assets.unit(unit_id),
                    custom_size: Some(node.rect.size()),
                    ..default()
                },
                Transform::from_translation(centre),
            )),
            NodeKind::Quad { color } => commands.spawn((
                Mesh2d(unit.quad.clone()),
                MeshMaterial2d(materials.add(ColorMaterial::from(*color))),
                rect_transform(node.rect, viewport, node.z),
            )),
            NodeKind::Bar { kind, value } => commands.spawn((
                HudBar {
                    kind: *kind,
                    value: *value,
                    origin: node.rect.min,
                    z: node.z,
                },
                Transform::default(),
                Visibility::default(),
            )),
            NodeKind::Text { text, size, color } => commands.spawn((
                Text2d::new(text.clone()),
                TextFont {
                    font: assets.font.clone(),
                    font_size: *size,
                    ..default()
                },
                TextColor(*color),
                Anchor::TOP_LEFT,
                Transform::from_translation(
                    screen_to_world(node.rect.min, viewport).extend(node.z),
                ),
            )),
        };

        entity.insert(SceneNode);
        if let Some(hit) = &node.hit {
            entity.insert((
                hit.clone(),
                HitBox {
                    rect: node.rect,
                    z: node.z,
                },
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::*;
    use std::collections::HashSet;

    fn no_grid() -> SceneLayout {
        SceneLayout {
            show_grid: false,
            ..SceneLayout::default()
        }
    }

    fn texts(plan: &ScenePlan) -> Vec<&str> {
        plan.nodes
            .iter()
            .filter_map(|n| match &n.kind {
                NodeKind::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn only_enemies_and_current_abilities_are_interactive() {
        let snapshot = avengers();
        let abilities = snapshot.current_abilities();
        let plan = plan_scene(&snapshot, abilities, None, &SceneLayout::default());

        let drawn: HashSet<_> = plan.hit_targets().cloned().collect();
        let expected: HashSet<_> = snapshot
            .state
            .enemies
            .iter()
            .map(|e| HitTarget::Enemy { id: e.id.clone() })
            .chain(
                snapshot
                    .current_abilities()
                    .iter()
                    .map(|a| HitTarget::Ability { id: a.id.clone() }),
            )
            .collect();
        assert_eq!(drawn, expected);
        assert_eq!(plan.hit_targets().count(), 5);
    }

    #[test]
    fn single_hero_scenario_offers_its_ability() {
        let snapshot = thor_vs_thanos();
        let plan = plan_scene(&snapshot, snapshot.current_abilities(), None, &no_grid());

        let tiles: Vec<_> = plan
            .hit_targets()
            .filter(|h| matches!(h, HitTarget::Ability { .. }))
            .map(HitTarget::id)
            .collect();
        assert_eq!(tiles, ["strike"]);
        assert!(texts(&plan).contains(&"Turn: thor"));
        assert!(texts(&plan).contains(&"Skill"));
    }

    #[test]
    fn bars_show_stat_percentages() {
        let snapshot = thor_vs_thanos();
        let plan = plan_scene(&snapshot, &[], None, &no_grid());
        let bars: Vec<_> = plan
            .nodes
            .iter()
            .filter_map(|n| match n.kind {
                NodeKind::Bar { kind, value } => Some((kind, value)),
                _ => None,
            })
            .collect();
        assert_eq!(
            bars,
            [
                (BarKind::Health, 80.0),
                (BarKind::Stamina, 60.0),
                (BarKind::Health, 100.0)
            ]
        );
    }

    #[test]
    fn middle_of_three_heroes_steps_forward() {
        assert_eq!(hero_origin(0, 3), Vec2::new(192.0, 128.0));
        assert_eq!(hero_origin(1, 3), Vec2::new(256.0, 192.0));
        assert_eq!(hero_origin(2, 3), Vec2::new(192.0, 256.0));
        assert_eq!(hero_origin(1, 2), Vec2::new(192.0, 192.0));
    }

    #[test]
    fn ability_tiles_step_horizontally_and_highlight_selection() {
        let snapshot = avengers();
        let plan = plan_scene(&snapshot, snapshot.current_abilities(), Some(1), &no_grid());
        let tiles: Vec<_> = plan
            .nodes
            .iter()
            .filter(|n| matches!(n.hit, Some(HitTarget::Ability { .. })))
            .collect();

        assert_eq!(tiles[0].rect.min, Vec2::new(207.0, 320.0));
        assert_eq!(tiles[1].rect.min, Vec2::new(287.0, 320.0));
        assert_eq!(tiles[0].kind, NodeKind::Quad { color: ABILITY_COLOR });
        assert_eq!(tiles[1].kind, NodeKind::Quad { color: ABILITY_SELECTED_COLOR });
    }

    #[test]
    fn enemy_intent_and_outcome_in_status() {
        let snapshot = avengers();
        let plan = plan_scene(&snapshot, &[], None, &no_grid());
        assert!(texts(&plan).contains(&"Enemy intent: action 0 on thor"));

        let mut over = thor_vs_thanos();
        over.state.heroes[0].stats.health = 0;
        let plan = plan_scene(&over, &[], None, &no_grid());
        assert_eq!(texts(&plan)[0], "Enemies win");
    }

    #[test]
    fn grid_follows_layout_flag() {
        let snapshot = thor_vs_thanos();
        let with_grid = plan_scene(&snapshot, &[], None, &SceneLayout::default());
        let without = plan_scene(&snapshot, &[], None, &no_grid());
        assert_eq!(with_grid.nodes.len() - without.nodes.len(), 40);
    }
}
