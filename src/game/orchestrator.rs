//! The match state machine.
//!
//! `Match` owns the state of one game and is the only writer to it. Every
//! entry point is a synchronous transition: validate, delegate to the
//! evaluator or the resolver, apply the results, record the command, then
//! hold or advance the turn.
//!
//! ## Turn rules
//!
//! A free move, an uncontested pass, a direct goal and every resolved
//! battle end the turn, with one exception: a dribble won by the attacker
//! enters `PostBattleMove` and the turn ends after the bonus step (or skip).
//! Substitutions never end the turn.

use std::sync::Arc;

use im::Vector;
use tracing::{debug, info, warn};

use super::command::{ActionRecord, Command};
use super::phase::MatchPhase;
use super::snapshot::MatchSnapshot;
use super::state::MatchState;
use crate::battle::{
    resolve_battle, BattleOutcome, BattleRequest, BattleSide, DiceRolls, PendingBattle, PostEffect,
    Resolution,
};
use crate::board::NodeId;
use crate::cards::{CardCatalog, CardId, Unit};
use crate::core::{Action, ActionKind, GameRng, MatchConfig, PlayerId, PlayerMap, UnitId, World};
use crate::error::{IllegalAction, InvariantViolation, MatchError};
use crate::rules::{self, ActionOutcome};

/// One match in progress.
#[derive(Clone, Debug)]
pub struct Match {
    catalog: Arc<CardCatalog>,
    config: MatchConfig,
    state: MatchState,
    rng: GameRng,
}

impl Match {
    pub(crate) fn from_parts(
        catalog: Arc<CardCatalog>,
        config: MatchConfig,
        state: MatchState,
        rng: GameRng,
    ) -> Self {
        Self {
            catalog,
            config,
            state,
            rng,
        }
    }

    /// Rebuild a match from a snapshot, RNG position included.
    pub fn restore(catalog: Arc<CardCatalog>, config: MatchConfig, snapshot: MatchSnapshot) -> Self {
        let rng = GameRng::from_state(&snapshot.rng);
        Self::from_parts(catalog, config, snapshot.state, rng)
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    #[must_use]
    pub fn score(&self) -> &PlayerMap<u32> {
        &self.state.score
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.state.turns.turn
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.state.turns.active
    }

    #[must_use]
    pub fn coin_toss_winner(&self) -> Option<PlayerId> {
        self.state.coin_toss_winner
    }

    #[must_use]
    pub fn pending_battle(&self) -> Option<&PendingBattle> {
        self.state.pending.as_ref()
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.state.world
    }

    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.state.world.unit(id)
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<CardCatalog> {
        &self.catalog
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.state.history
    }

    /// Actions `unit` may take now. Empty outside normal play or while a
    /// battle is pending.
    #[must_use]
    pub fn legal_actions(&self, unit: UnitId) -> Vec<Action> {
        if self.state.phase != MatchPhase::InProgress || self.state.pending.is_some() {
            return Vec::new();
        }
        rules::legal_actions(&self.state.world, self.state.turns.active, unit)
    }

    /// Verify the world's occupancy and ball invariants.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.state.world.check_invariants()
    }

    /// Capture the state and RNG position.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            state: self.state.clone(),
            rng: self.rng.state(),
        }
    }

    // === Kickoff ===

    /// Toss the coin with the match RNG.
    pub fn coin_toss(&mut self) -> Result<PlayerId, MatchError> {
        self.expect_phase(MatchPhase::CoinToss)?;
        let winner = if self.rng.gen_bool(0.5) {
            PlayerId::HOME
        } else {
            PlayerId::AWAY
        };
        self.set_coin_toss_winner(winner)?;
        Ok(winner)
    }

    /// Record an externally decided coin toss.
    pub fn set_coin_toss_winner(&mut self, winner: PlayerId) -> Result<(), MatchError> {
        self.expect_phase(MatchPhase::CoinToss)?;
        self.state.coin_toss_winner = Some(winner);
        info!("{} won the coin toss", winner);
        self.record(winner, Command::CoinToss { winner });
        Ok(())
    }

    /// Hand the ball to one of the coin-toss winner's units and start play.
    pub fn set_kickoff_unit(&mut self, unit: UnitId) -> Result<(), MatchError> {
        self.expect_phase(MatchPhase::CoinToss)?;
        let winner = self.state.coin_toss_winner.ok_or(MatchError::CoinTossUndecided)?;
        self.ensure_owner(unit, winner)?;

        self.state.world.give_ball(unit);
        self.state.turns = rules::TurnManager::new(winner);
        self.state.phase = MatchPhase::InProgress;
        info!("kickoff: {} starts with {}", winner, unit);

        self.record(winner, Command::Kickoff { unit });
        self.debug_check();
        Ok(())
    }

    // === Play ===

    /// Dribble, pass or shoot with `unit`.
    ///
    /// Refusals come back as `ActionOutcome::Illegal`. `Err` is reserved for
    /// an inconsistent world.
    pub fn perform_action(&mut self, unit: UnitId, action: Action) -> Result<ActionOutcome, MatchError> {
        if self.state.phase != MatchPhase::InProgress {
            return Ok(ActionOutcome::Illegal(IllegalAction::NotInProgress));
        }
        if self.state.pending.is_some() {
            return Ok(ActionOutcome::Illegal(IllegalAction::BattlePending));
        }

        let active = self.state.turns.active;
        let outcome = rules::perform_action(&mut self.state.world, active, unit, action)?;

        match outcome {
            ActionOutcome::Illegal(reason) => {
                if matches!(reason, IllegalAction::UnknownUnit(_)) {
                    warn!("rejected {:?}: {}", action, reason);
                } else {
                    debug!("rejected {:?} by {}: {}", action, unit, reason);
                }
                return Ok(outcome);
            }
            ActionOutcome::Moved { .. } | ActionOutcome::Passed { .. } => {
                self.record(active, Command::Act { unit, action });
                self.advance_turn();
            }
            ActionOutcome::Goal { player, .. } => {
                self.record(active, Command::Act { unit, action });
                self.score_goal(player);
            }
            ActionOutcome::BattlePending(battle) => {
                self.record(active, Command::Act { unit, action });
                debug!("battle pending at {}: {:?}", battle.node, battle.matchup);
                self.state.pending = Some(battle);
            }
        }

        self.debug_check();
        Ok(outcome)
    }

    /// Perform `action` toward `to`, provided `unit` still stands on `from`.
    pub fn move_if_allowed(
        &mut self,
        unit: UnitId,
        from: NodeId,
        to: NodeId,
        action: ActionKind,
    ) -> Result<ActionOutcome, MatchError> {
        match self.state.world.unit(unit) {
            None => return Ok(ActionOutcome::Illegal(IllegalAction::UnknownUnit(unit))),
            Some(u) if u.position != from => {
                return Ok(ActionOutcome::Illegal(IllegalAction::NotOnNode(from)));
            }
            Some(_) => {}
        }

        let action = match action {
            ActionKind::Dribble => Action::Dribble(to),
            ActionKind::Pass => Action::Pass(to),
            ActionKind::Shoot => Action::Shoot,
        };
        self.perform_action(unit, action)
    }

    // === Battles ===

    /// Settle the pending battle. Only a recorded attacker may call this.
    ///
    /// The pending battle is consumed exactly once; if resolution fails it
    /// stays pending and the error is returned.
    pub fn resolve_pending_battle(
        &mut self,
        unit: UnitId,
        resolution: Resolution,
        pass_target: Option<UnitId>,
        rolls: Option<DiceRolls>,
    ) -> Result<BattleOutcome, MatchError> {
        let battle = self.state.pending.ok_or(MatchError::NoPendingBattle)?;
        if battle.matchup.side_of(unit) != Some(BattleSide::Attacker) {
            return Err(MatchError::NotAttacker(unit));
        }
        if resolution == Resolution::Surrender(BattleSide::Defender) {
            return Err(MatchError::NotDefender(battle.attacking_player));
        }

        let request = BattleRequest {
            battle,
            resolution,
            pass_target,
            rolls,
        };
        let outcome = self.settle(request)?;

        self.record(
            battle.attacking_player,
            Command::Resolve {
                unit,
                resolution,
                pass_target,
                rolls: outcome.rolls(),
            },
        );
        self.finish_battle(&outcome);
        self.debug_check();
        Ok(outcome)
    }

    /// The defending player gives up the pending battle.
    pub fn concede_pending_battle(&mut self, player: PlayerId) -> Result<BattleOutcome, MatchError> {
        let battle = self.state.pending.ok_or(MatchError::NoPendingBattle)?;
        if player != battle.defending_player() {
            return Err(MatchError::NotDefender(player));
        }

        let outcome = self.settle(BattleRequest::surrender(battle, BattleSide::Defender))?;

        self.record(player, Command::Concede { player });
        self.finish_battle(&outcome);
        self.debug_check();
        Ok(outcome)
    }

    /// Take the pending battle, resolve it and apply its effects.
    fn settle(&mut self, request: BattleRequest) -> Result<BattleOutcome, MatchError> {
        let Some(battle) = self.state.pending.take() else {
            return Err(MatchError::NoPendingBattle);
        };

        let resolved = resolve_battle(
            &self.state.world,
            &self.catalog,
            &self.config.battle,
            &request,
            &mut self.rng,
        );
        let outcome = match resolved {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("battle at {} could not be resolved: {}", battle.node, err);
                self.state.pending = Some(battle);
                return Err(err.into());
            }
        };

        for effect in &outcome.effects {
            self.apply_effect(*effect)?;
        }
        Ok(outcome)
    }

    fn apply_effect(&mut self, effect: PostEffect) -> Result<(), MatchError> {
        let world = &mut self.state.world;
        match effect {
            PostEffect::SpendStamina { unit, cost } => {
                world.spend_stamina(unit, cost).ok_or(MatchError::UnknownUnit(unit))?;
            }
            PostEffect::Lock { unit, turns } => {
                world.unit_mut(unit).ok_or(MatchError::UnknownUnit(unit))?.lock(turns);
            }
            PostEffect::GiveBall { unit } => {
                if !world.give_ball(unit) {
                    return Err(MatchError::UnknownUnit(unit));
                }
            }
            PostEffect::Reposition { unit, to } => world.relocate(unit, to)?,
            // Scored in finish_battle, after the other effects.
            PostEffect::Goal { .. } => {}
        }
        Ok(())
    }

    fn finish_battle(&mut self, outcome: &BattleOutcome) {
        if let Some(player) = outcome.goal() {
            self.score_goal(player);
        } else if outcome.battle.action == ActionKind::Dribble && outcome.attacker_won() {
            let unit = outcome.battle.matchup.primary(BattleSide::Attacker);
            self.state.phase = MatchPhase::PostBattleMove { unit };
            debug!("{} may take a post-battle step", unit);
        } else {
            self.advance_turn();
        }
    }

    // === Post-battle move ===

    /// Step the dribble winner onto an adjacent empty node and end the turn.
    pub fn execute_post_battle_move(&mut self, unit: UnitId, to: NodeId) -> Result<(), MatchError> {
        let MatchPhase::PostBattleMove { unit: mover } = self.state.phase else {
            return Err(MatchError::WrongPhase(self.state.phase));
        };
        if unit != mover {
            return Err(MatchError::NotPostBattleMover(unit));
        }

        let from = self
            .state
            .world
            .unit(unit)
            .ok_or(MatchError::UnknownUnit(unit))?
            .position;
        if !self.state.world.board.is_adjacent(from, to) {
            return Err(IllegalAction::NotAdjacent { from, to }.into());
        }
        if !self.state.world.board.is_empty(to) {
            return Err(MatchError::NodeOccupied(to));
        }

        self.state.world.move_unit(unit, to)?;
        self.state.phase = MatchPhase::InProgress;

        let player = self.state.turns.active;
        self.record(player, Command::PostBattleMove { unit, to });
        self.advance_turn();
        self.debug_check();
        Ok(())
    }

    /// Decline the bonus step and end the turn.
    pub fn skip_post_battle_move(&mut self) -> Result<(), MatchError> {
        if !matches!(self.state.phase, MatchPhase::PostBattleMove { .. }) {
            return Err(MatchError::WrongPhase(self.state.phase));
        }
        self.state.phase = MatchPhase::InProgress;

        let player = self.state.turns.active;
        self.record(player, Command::SkipPostBattleMove);
        self.advance_turn();
        Ok(())
    }

    // === Substitution ===

    /// Replace one of the active player's units with a fresh unit from
    /// `card`. Does not end the turn. Returns the new unit's ID.
    pub fn substitute(&mut self, unit: UnitId, card: CardId) -> Result<UnitId, MatchError> {
        self.expect_phase(MatchPhase::InProgress)?;
        if self.state.pending.is_some() {
            return Err(IllegalAction::BattlePending.into());
        }
        let active = self.state.turns.active;
        self.ensure_owner(unit, active)?;

        let incoming = self.state.world.substitute(&self.catalog, unit, card)?;
        info!("{} substitutes {} with {} ({})", active, unit, incoming, card);

        self.record(active, Command::Substitute { unit, card });
        self.debug_check();
        Ok(incoming)
    }

    // === Replay ===

    /// Apply one recorded command.
    ///
    /// An action the evaluator refuses is an error here, since recorded
    /// commands were all accepted.
    pub fn apply_command(&mut self, command: Command) -> Result<(), MatchError> {
        match command {
            Command::CoinToss { winner } => self.set_coin_toss_winner(winner),
            Command::Kickoff { unit } => self.set_kickoff_unit(unit),
            Command::Act { unit, action } => match self.perform_action(unit, action)? {
                ActionOutcome::Illegal(reason) => Err(reason.into()),
                _ => Ok(()),
            },
            Command::Resolve {
                unit,
                resolution,
                pass_target,
                rolls,
            } => self
                .resolve_pending_battle(unit, resolution, pass_target, rolls)
                .map(|_| ()),
            Command::Concede { player } => self.concede_pending_battle(player).map(|_| ()),
            Command::PostBattleMove { unit, to } => self.execute_post_battle_move(unit, to),
            Command::SkipPostBattleMove => self.skip_post_battle_move(),
            Command::Substitute { unit, card } => self.substitute(unit, card).map(|_| ()),
        }
    }

    /// Apply commands in order, stopping at the first failure.
    pub fn replay(&mut self, commands: impl IntoIterator<Item = Command>) -> Result<(), MatchError> {
        for command in commands {
            self.apply_command(command)?;
        }
        Ok(())
    }

    // === Internals ===

    fn expect_phase(&self, phase: MatchPhase) -> Result<(), MatchError> {
        if self.state.phase == phase {
            Ok(())
        } else {
            Err(MatchError::WrongPhase(self.state.phase))
        }
    }

    fn ensure_owner(&self, unit: UnitId, player: PlayerId) -> Result<(), MatchError> {
        let owner = self
            .state
            .world
            .unit(unit)
            .ok_or(MatchError::UnknownUnit(unit))?
            .owner;
        if owner == player {
            Ok(())
        } else {
            Err(MatchError::NotOwnedBy { unit, player })
        }
    }

    fn record(&mut self, player: PlayerId, command: Command) {
        let record = ActionRecord {
            sequence: self.state.history.len() as u64,
            turn: self.state.turns.turn,
            player,
            command,
        };
        self.state.history.push_back(record);
    }

    fn advance_turn(&mut self) {
        self.state.turns.next_turn(&mut self.state.world);
    }

    fn score_goal(&mut self, player: PlayerId) {
        self.state.score[player] += 1;
        let (home, away) = (self.state.score[PlayerId::HOME], self.state.score[PlayerId::AWAY]);
        info!("goal for {}, score {}-{}", player, home, away);

        if self.state.score[player] >= self.config.goal_target {
            self.state.phase = MatchPhase::Finished { winner: player };
            self.state.pending = None;
            info!("match over, {} wins {}-{}", player, home, away);
            return;
        }

        self.kickoff_reset(player);
        self.advance_turn();
    }

    /// Everyone back to their kickoff node; the scorer's keeper takes the ball.
    fn kickoff_reset(&mut self, player: PlayerId) {
        let world = &mut self.state.world;
        world.reset_positions();
        world.clear_locks();
        world.clear_ball();

        let receiver = world
            .owned_on(NodeId::own_goal(player), player)
            .next()
            .or_else(|| world.units_of(player).find(|u| u.goalkeeper).map(|u| u.id))
            .or_else(|| world.units_of(player).next().map(|u| u.id));

        if let Some(unit) = receiver {
            world.give_ball(unit);
            info!("kickoff: {} restarts with {}", player, unit);
        }
        self.state.phase = MatchPhase::InProgress;
    }

    fn debug_check(&self) {
        debug_assert!(
            self.state.world.check_invariants().is_ok(),
            "world invariant broken: {:?}",
            self.state.world.check_invariants()
        );
    }
}
