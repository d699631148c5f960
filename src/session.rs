//! Two-step action selection and the client's view of the match.
//!
//! A turn is played by clicking an ability tile, then an enemy. The second
//! click hands back a [`PlayerActionRequest`] and the machine stays in
//! [`Selection::Submitting`] until the server answers, so a selection can
//! only ever be submitted once.

use bevy::log::{debug, info};

use crate::TransportResult;
use crate::core::{Ability, MatchState, PlayerActionRequest, Side};
use crate::render::HitTarget;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// No ability chosen.
    #[default]
    Idle,
    /// Ability at this index of the current player's list, waiting for a target.
    AbilitySelected(usize),
    /// An action is in flight.
    Submitting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    AbilitySelected { index: usize },
    Submit(PlayerActionRequest),
}

/// Click gate for one player turn.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    selection: Selection,
}

impl Interaction {
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Whether an enemy click would be taken as a target.
    pub fn clickable(&self) -> bool {
        matches!(self.selection, Selection::AbilitySelected(_))
    }

    pub fn on_click(&mut self, target: &HitTarget, abilities: &[Ability]) -> ClickOutcome {
        match (self.selection, target) {
            (Selection::Submitting, _) => ClickOutcome::Ignored,
            (_, HitTarget::Ability { id }) => {
                match abilities.iter().position(|a| a.id == *id) {
                    Some(index) => {
                        self.selection = Selection::AbilitySelected(index);
                        ClickOutcome::AbilitySelected { index }
                    }
                    None => {
                        self.selection = Selection::Idle;
                        ClickOutcome::Ignored
                    }
                }
            }
            (Selection::AbilitySelected(index), HitTarget::Enemy { id }) => {
                self.selection = Selection::Submitting;
                ClickOutcome::Submit(PlayerActionRequest {
                    target_id: id.clone(),
                    ability_index: index,
                })
            }
            (Selection::Idle, HitTarget::Enemy { .. }) => ClickOutcome::Ignored,
        }
    }

    /// Back to `Idle` once a request has settled, whatever its outcome.
    pub fn settle(&mut self) {
        self.selection = Selection::Idle;
    }
}

/// Last good snapshot plus the selection state built on top of it.
#[derive(Clone, Debug)]
pub struct MatchSession {
    snapshot: MatchState,
    abilities: Vec<Ability>,
    interaction: Interaction,
}

impl MatchSession {
    pub fn new(snapshot: MatchState) -> Self {
        let abilities = snapshot.current_abilities().to_vec();
        Self {
            snapshot,
            abilities,
            interaction: Interaction::default(),
        }
    }

    pub fn snapshot(&self) -> &MatchState {
        &self.snapshot
    }

    /// Abilities of the player whose turn it is.
    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn winner(&self) -> Option<Side> {
        self.snapshot.winner()
    }

    pub fn click(&mut self, target: &HitTarget) -> ClickOutcome {
        if self.winner().is_some() {
            return ClickOutcome::Ignored;
        }
        let outcome = self.interaction.on_click(target, &self.abilities);
        debug!("click on {target:?}: {outcome:?}");
        outcome
    }

    /// Ingest the answer to a submitted action.
    ///
    /// A new snapshot replaces the old one; on failure the old one stays.
    /// Returns whether the scene has to be redrawn.
    pub fn apply_response(&mut self, response: TransportResult<MatchState>) -> bool {
        self.interaction.settle();
        match response {
            Ok(snapshot) => {
                self.abilities = snapshot.current_abilities().to_vec();
                self.snapshot = snapshot;
                if let Some(side) = self.winner() {
                    info!("match {} over, {side:?} won", self.snapshot.id);
                }
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransportError;
    use crate::core::fixtures::*;
    use error_stack::Report;

    fn ability(id: &str) -> HitTarget {
        HitTarget::Ability { id: id.into() }
    }

    fn enemy(id: &str) -> HitTarget {
        HitTarget::Enemy { id: id.into() }
    }

    #[test]
    fn ability_then_enemy_submits_once() {
        let mut session = MatchSession::new(thor_vs_thanos());
        assert!(!session.interaction().clickable());

        assert_eq!(
            session.click(&ability("strike")),
            ClickOutcome::AbilitySelected { index: 0 }
        );
        assert!(session.interaction().clickable());

        assert_eq!(
            session.click(&enemy("thanos")),
            ClickOutcome::Submit(PlayerActionRequest {
                target_id: "thanos".into(),
                ability_index: 0,
            })
        );
        assert!(!session.interaction().clickable());
        assert_eq!(session.click(&enemy("thanos")), ClickOutcome::Ignored);
    }

    #[test]
    fn enemy_before_ability_is_ignored() {
        let mut session = MatchSession::new(thor_vs_thanos());
        assert_eq!(session.click(&enemy("thanos")), ClickOutcome::Ignored);
        assert_eq!(session.interaction().selection(), Selection::Idle);
    }

    #[test]
    fn unknown_ability_leaves_machine_idle() {
        let mut session = MatchSession::new(thor_vs_thanos());
        assert_eq!(session.click(&ability("snap")), ClickOutcome::Ignored);
        assert_eq!(session.interaction().selection(), Selection::Idle);

        session.click(&ability("strike"));
        assert_eq!(session.click(&ability("snap")), ClickOutcome::Ignored);
        assert_eq!(session.interaction().selection(), Selection::Idle);
        assert_eq!(session.click(&enemy("thanos")), ClickOutcome::Ignored);
    }

    #[test]
    fn reselecting_replaces_the_ability() {
        let mut session = MatchSession::new(avengers());
        session.click(&ability("repulsor"));
        session.click(&ability("unibeam"));
        assert_eq!(
            session.click(&enemy("ultron")),
            ClickOutcome::Submit(PlayerActionRequest {
                target_id: "ultron".into(),
                ability_index: 1,
            })
        );
    }

    #[test]
    fn clicks_during_submission_are_ignored() {
        let mut session = MatchSession::new(avengers());
        session.click(&ability("repulsor"));
        session.click(&enemy("thanos"));
        assert_eq!(session.click(&ability("unibeam")), ClickOutcome::Ignored);
        assert_eq!(session.interaction().selection(), Selection::Submitting);
    }

    #[test]
    fn new_snapshot_switches_abilities_to_next_player() {
        let mut session = MatchSession::new(avengers());
        session.click(&ability("repulsor"));
        session.click(&enemy("thanos"));

        let mut next = avengers();
        next.state.current_player = "thor".into();
        next.state.enemies[0].stats.health = 70;
        assert!(session.apply_response(Ok(next.clone())));

        assert_eq!(session.snapshot(), &next);
        let ids: Vec<_> = session.abilities().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["strike", "lightning", "hammer_toss"]);
        assert_eq!(session.interaction().selection(), Selection::Idle);

        assert_eq!(
            session.click(&ability("hammer_toss")),
            ClickOutcome::AbilitySelected { index: 2 }
        );
    }

    #[test]
    fn failed_submission_keeps_snapshot_and_resets() {
        let mut session = MatchSession::new(thor_vs_thanos());
        session.click(&ability("strike"));
        session.click(&enemy("thanos"));

        let failed = Err(Report::new(TransportError::Status(500)));
        assert!(!session.apply_response(failed));
        assert_eq!(session.snapshot(), &thor_vs_thanos());
        assert_eq!(session.interaction().selection(), Selection::Idle);

        session.click(&ability("strike"));
        assert!(matches!(session.click(&enemy("thanos")), ClickOutcome::Submit(_)));
    }

    #[test]
    fn finished_match_takes_no_input() {
        let mut over = thor_vs_thanos();
        over.state.enemies[0].stats.health = 0;
        let mut session = MatchSession::new(over);
        assert_eq!(session.winner(), Some(Side::Heroes));
        assert_eq!(session.click(&ability("strike")), ClickOutcome::Ignored);
    }
}
