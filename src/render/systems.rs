use super::*;
use crate::session::{ClickOutcome, MatchSession, Selection};
use bevy::log::{error, info, warn};
use bevy::prelude::*;
use bevy::tasks::futures_lite::future;
use bevy::tasks::{IoTaskPool, block_on};
use bevy::window::PrimaryWindow;

/// Ask the server for a new match.
pub fn begin_match(mut commands: Commands, client: Res<MatchClient>) {
    let service = client.0.clone();
    let task = IoTaskPool::get().spawn(async move { service.create_match() });
    commands.spawn(MatchRequest {
        kind: RequestKind::Create,
        task,
    });
}

/// Collect finished server calls and fold them into the session.
pub fn poll_match_requests(
    mut commands: Commands,
    mut requests: Query<(Entity, &mut MatchRequest)>,
    mut session: ResMut<MatchRes>,
    mut dirty: ResMut<SceneDirty>,
    mut exit: MessageWriter<AppExit>,
) {
    for (entity, mut request) in requests.iter_mut() {
        let Some(result) = block_on(future::poll_once(&mut request.task)) else {
            continue;
        };
        commands.entity(entity).despawn();

        match request.kind {
            RequestKind::Create => match result {
                Ok(snapshot) => {
                    info!(
                        "match {} started: {} heroes vs {} enemies",
                        snapshot.id,
                        snapshot.state.heroes.len(),
                        snapshot.state.enemies.len()
                    );
                    session.0 = Some(MatchSession::new(snapshot));
                    dirty.0 = true;
                }
                Err(report) => {
                    error!("could not create a match: {report:?}");
                    exit.write(AppExit::error());
                }
            },
            RequestKind::Submit => {
                let Some(session) = session.0.as_mut() else {
                    continue;
                };
                if let Err(report) = &result {
                    warn!("action rejected, keeping last snapshot: {report:?}");
                }
                // Settling always clears the selection highlight.
                session.apply_response(result);
                dirty.0 = true;
            }
        }
    }
}

/// Topmost hit target under `cursor`.
pub fn pick_target<'a>(
    cursor: Vec2,
    targets: impl IntoIterator<Item = (&'a HitTarget, &'a HitBox)>,
) -> Option<HitTarget> {
    targets
        .into_iter()
        .filter(|(_, hit_box)| hit_box.rect.contains(cursor))
        .max_by(|(_, a), (_, b)| a.z.total_cmp(&b.z))
        .map(|(target, _)| target.clone())
}

/// Route left clicks through the selection machine; submit completed actions.
pub fn handle_clicks(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    targets: Query<(&HitTarget, &HitBox)>,
    client: Res<MatchClient>,
    mut session: ResMut<MatchRes>,
    mut dirty: ResMut<SceneDirty>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Some(session) = session.0.as_mut() else {
        return;
    };
    let Some(target) = pick_target(cursor, targets.iter()) else {
        return;
    };

    let before = session.interaction().selection();
    let outcome = session.click(&target);
    if session.interaction().selection() != before {
        dirty.0 = true;
    }

    if let ClickOutcome::Submit(action) = outcome {
        let service = client.0.clone();
        let match_id = session.snapshot().id.clone();
        let task =
            IoTaskPool::get().spawn(async move { service.submit_action(&match_id, &action) });
        commands.spawn(MatchRequest {
            kind: RequestKind::Submit,
            task,
        });
    }
}

/// Tear down the whole scene and rebuild it from the current session.
#[allow(clippy::too_many_arguments)]
pub fn redraw_scene(
    mut commands: Commands,
    mut dirty: ResMut<SceneDirty>,
    mut layout: ResMut<SceneLayout>,
    mut assets: ResMut<SceneAssets>,
    session: Res<MatchRes>,
    server: Option<Res<AssetServer>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    nodes: Query<Entity, With<SceneNode>>,
    unit: Res<UnitMeshes>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    if let Ok(window) = windows.single() {
        let viewport = UVec2::new(
            window.width().round() as u32,
            window.height().round() as u32,
        );
        if viewport != layout.viewport {
            layout.viewport = viewport;
            dirty.0 = true;
        }
    }

    if !dirty.0 {
        return;
    }
    let Some(session) = session.0.as_ref() else {
        return;
    };
    dirty.0 = false;

    for entity in nodes.iter() {
        commands.entity(entity).try_despawn();
    }

    let snapshot = session.snapshot();
    for unit_id in snapshot
        .state
        .heroes
        .iter()
        .chain(snapshot.state.enemies.iter())
        .map(|u| u.id.as_str())
    {
        assets.ensure_unit(server.as_deref(), unit_id);
    }

    let selected = match session.interaction().selection() {
        Selection::AbilitySelected(index) => Some(index),
        _ => None,
    };
    let plan = plan_scene(snapshot, session.abilities(), selected, &layout);
    spawn_plan(
        &mut commands,
        &plan,
        layout.viewport.as_vec2(),
        &assets,
        &unit,
        &mut materials,
    );
}

/// Rebuild the quads of every bar whose value changed.
pub fn draw_hud_bars(
    mut commands: Commands,
    bars: Query<(Entity, &HudBar), Changed<HudBar>>,
    children_q: Query<&Children>,
    layout: Res<SceneLayout>,
    unit: Res<UnitMeshes>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, bar) in bars.iter() {
        if let Ok(children) = children_q.get(entity) {
            for child in children.iter() {
                commands.entity(child).try_despawn();
            }
        }
        spawn_bar(
            &mut commands,
            entity,
            bar.kind,
            bar.origin,
            bar.value,
            layout.viewport.as_vec2(),
            bar.z,
            &unit,
            &mut materials,
        );
    }
}
