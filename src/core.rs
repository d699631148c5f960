use serde::{Deserialize, Serialize};
use std::fmt;

/// Denominator used for stat percentages when the server does not send a maximum.
pub const DEFAULT_STAT_MAX: u32 = 100;

/// Label shown on ability tiles without a name.
pub const DEFAULT_ABILITY_LABEL: &str = "Skill";

/// Opaque match identifier assigned by the server.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authoritative match snapshot as returned by the server.
///
/// Every response replaces the previous snapshot wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub id: MatchId,
    pub state: Board,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unit whose turn it is.
    #[serde(rename = "currentPlayer", alias = "currentPlayerId")]
    pub current_player: String,
    #[serde(default)]
    pub heroes: Vec<Unit>,
    #[serde(default)]
    pub enemies: Vec<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_enemy_action: Option<PendingEnemyAction>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub stats: Stats,
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

impl Unit {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn is_down(&self) -> bool {
        self.stats.health == 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub health: u32,
    pub stamina: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_health: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stamina: Option<u32>,
}

impl Stats {
    /// Health as a percentage of the maximum, in [0, 100].
    pub fn health_percent(&self) -> f32 {
        percent(self.health, self.max_health.unwrap_or(DEFAULT_STAT_MAX))
    }

    /// Stamina as a percentage of the maximum, in [0, 100].
    pub fn stamina_percent(&self) -> f32 {
        percent(self.stamina, self.max_stamina.unwrap_or(DEFAULT_STAT_MAX))
    }
}

fn percent(current: u32, max: u32) -> f32 {
    if max == 0 {
        return 0.0;
    }
    (current as f32 * 100.0 / max as f32).clamp(0.0, 100.0)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Ability {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_ABILITY_LABEL)
    }
}

/// Enemy move computed by the server ahead of time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingEnemyAction {
    pub action_index: usize,
    pub target_id: String,
}

/// Body of `POST /game/{id}/apply-action`.
///
/// `ability_index` is a position in the current player's ability list,
/// so it is only valid for the snapshot it was captured from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerActionRequest {
    #[serde(rename = "targetId")]
    pub target_id: String,
    #[serde(rename = "ability")]
    pub ability_index: usize,
}

/// Side that won a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Heroes,
    Enemies,
}

impl MatchState {
    pub fn current_player(&self) -> &str {
        &self.state.current_player
    }

    pub fn hero(&self, id: &str) -> Option<&Unit> {
        self.state.heroes.iter().find(|h| h.id == id)
    }

    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.state
            .heroes
            .iter()
            .chain(self.state.enemies.iter())
            .find(|u| u.id == id)
    }

    /// Abilities offered this turn: those of the hero whose turn it is.
    ///
    /// Empty when the current player is not a hero.
    pub fn current_abilities(&self) -> &[Ability] {
        self.hero(self.current_player())
            .map(|h| h.abilities.as_slice())
            .unwrap_or_default()
    }

    /// Winner once one side has no unit left standing.
    pub fn winner(&self) -> Option<Side> {
        let all_down = |units: &[Unit]| !units.is_empty() && units.iter().all(Unit::is_down);
        if all_down(&self.state.enemies) {
            Some(Side::Heroes)
        } else if all_down(&self.state.heroes) {
            Some(Side::Enemies)
        } else {
            None
        }
    }
}
