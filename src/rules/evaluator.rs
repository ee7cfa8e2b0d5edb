//! Action evaluation.
//!
//! `evaluate` decides what a requested action would do without touching the
//! world. `perform_action` evaluates and then applies the outcomes that need
//! no battle: a free move or a pass to an uncontested teammate. Goals and
//! battles are reported back for the match to handle.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::battle::{Matchup, PendingBattle};
use crate::board::NodeId;
use crate::cards::Unit;
use crate::core::{Action, ActionKind, PlayerId, UnitId, World};
use crate::error::{IllegalAction, MatchError};

/// What an action did (or would do).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The unit moved onto an empty node.
    Moved { unit: UnitId, from: NodeId, to: NodeId },
    /// The ball went to a teammate without a contest.
    Passed { from: UnitId, to: UnitId },
    /// A shot at an undefended goal.
    Goal { scorer: UnitId, player: PlayerId },
    /// The target is held by the opponent; a battle must be resolved.
    BattlePending(PendingBattle),
    /// The action was refused.
    Illegal(IllegalAction),
}

impl ActionOutcome {
    #[must_use]
    pub const fn is_legal(&self) -> bool {
        !matches!(self, ActionOutcome::Illegal(_))
    }

    /// The refusal reason, if any.
    #[must_use]
    pub const fn illegal_reason(&self) -> Option<IllegalAction> {
        match self {
            ActionOutcome::Illegal(reason) => Some(*reason),
            _ => None,
        }
    }
}

type NodeUnits = SmallVec<[UnitId; 4]>;

/// Decide what `action` by `unit` would do, with `active` to move.
#[must_use]
pub fn evaluate(world: &World, active: PlayerId, unit: UnitId, action: Action) -> ActionOutcome {
    match check(world, active, unit, action) {
        Ok(outcome) => outcome,
        Err(reason) => ActionOutcome::Illegal(reason),
    }
}

/// Evaluate `action` and apply it if it resolves without a battle.
///
/// Moves and uncontested passes change the world. Goals, pending battles and
/// refusals are returned unapplied.
pub fn perform_action(
    world: &mut World,
    active: PlayerId,
    unit: UnitId,
    action: Action,
) -> Result<ActionOutcome, MatchError> {
    let outcome = evaluate(world, active, unit, action);
    debug!("{} {:?}: {:?}", unit, action, outcome);

    match outcome {
        ActionOutcome::Moved { unit, to, .. } => world.move_unit(unit, to)?,
        ActionOutcome::Passed { to, .. } => {
            if !world.give_ball(to) {
                return Err(MatchError::UnknownUnit(to));
            }
        }
        ActionOutcome::Goal { .. } | ActionOutcome::BattlePending(_) | ActionOutcome::Illegal(_) => {}
    }

    Ok(outcome)
}

/// Every action `unit` could take right now without being refused.
#[must_use]
pub fn legal_actions(world: &World, active: PlayerId, unit: UnitId) -> Vec<Action> {
    let Some(position) = world.unit(unit).map(|u| u.position) else {
        return Vec::new();
    };

    position
        .neighbors()
        .iter()
        .flat_map(|&to| [Action::Dribble(to), Action::Pass(to)])
        .chain(std::iter::once(Action::Shoot))
        .filter(|&action| evaluate(world, active, unit, action).is_legal())
        .collect()
}

fn check(world: &World, active: PlayerId, id: UnitId, action: Action) -> Result<ActionOutcome, IllegalAction> {
    let unit = world.unit(id).ok_or(IllegalAction::UnknownUnit(id))?;

    if unit.owner != active {
        return Err(IllegalAction::NotYourTurn);
    }
    if !unit.is_free() {
        return Err(IllegalAction::Locked {
            turns: unit.lock_turns,
        });
    }
    if action.kind().requires_ball() && !unit.has_ball {
        return Err(IllegalAction::NoBall);
    }

    match action {
        Action::Dribble(to) => dribble(world, unit, to),
        Action::Pass(to) => pass(world, unit, to),
        Action::Shoot => shoot(world, unit),
    }
}

fn dribble(world: &World, unit: &Unit, to: NodeId) -> Result<ActionOutcome, IllegalAction> {
    ensure_adjacent(world, unit.position, to)?;
    let (teammates, enemies) = split_occupants(world, to, unit);

    match (teammates.is_empty(), enemies.is_empty()) {
        (true, true) => Ok(ActionOutcome::Moved {
            unit: unit.id,
            from: unit.position,
            to,
        }),
        (false, true) => Err(IllegalAction::TeammateBlocking),
        (_, false) => contest(unit, to, ActionKind::Dribble, &teammates, &enemies),
    }
}

fn pass(world: &World, unit: &Unit, to: NodeId) -> Result<ActionOutcome, IllegalAction> {
    ensure_adjacent(world, unit.position, to)?;
    let (teammates, enemies) = split_occupants(world, to, unit);

    if !enemies.is_empty() {
        return contest(unit, to, ActionKind::Pass, &teammates, &enemies);
    }
    match teammates.first() {
        Some(&receiver) => Ok(ActionOutcome::Passed {
            from: unit.id,
            to: receiver,
        }),
        None => Err(IllegalAction::NoPassTarget),
    }
}

fn shoot(world: &World, unit: &Unit) -> Result<ActionOutcome, IllegalAction> {
    let goal = NodeId::target_goal(unit.owner);
    if unit.position != goal {
        return Err(IllegalAction::NotInShootingRange);
    }

    let (teammates, mut enemies) = split_occupants(world, goal, unit);
    if enemies.is_empty() {
        return Ok(ActionOutcome::Goal {
            scorer: unit.id,
            player: unit.owner,
        });
    }

    // Keeper faces the shot first.
    enemies.sort_by_key(|id| (!world.unit(*id).is_some_and(|u| u.goalkeeper), *id));
    contest(unit, goal, ActionKind::Shoot, &teammates, &enemies)
}

fn ensure_adjacent(world: &World, from: NodeId, to: NodeId) -> Result<(), IllegalAction> {
    if world.board.is_adjacent(from, to) {
        Ok(())
    } else {
        Err(IllegalAction::NotAdjacent { from, to })
    }
}

/// Teammates (excluding the actor) and enemies on `node`, ascending by ID.
fn split_occupants(world: &World, node: NodeId, actor: &Unit) -> (NodeUnits, NodeUnits) {
    let mut teammates = NodeUnits::new();
    let mut enemies = NodeUnits::new();

    for &id in world.board.occupants(node) {
        if id == actor.id {
            continue;
        }
        match world.unit(id) {
            Some(u) if u.owner == actor.owner => teammates.push(id),
            Some(_) => enemies.push(id),
            None => {}
        }
    }

    (teammates, enemies)
}

fn contest(
    actor: &Unit,
    node: NodeId,
    action: ActionKind,
    teammates: &[UnitId],
    enemies: &[UnitId],
) -> Result<ActionOutcome, IllegalAction> {
    let mut attackers: SmallVec<[UnitId; 3]> = SmallVec::new();
    attackers.push(actor.id);
    attackers.extend(teammates.iter().copied());

    let matchup = Matchup::from_sides(&attackers, enemies).ok_or(IllegalAction::Overcrowded)?;

    Ok(ActionOutcome::BattlePending(PendingBattle {
        matchup,
        node,
        action,
        attacking_player: actor.owner,
    }))
}
