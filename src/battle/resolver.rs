//! Battle resolution.
//!
//! `resolve_battle` is a pure function of the world, the catalog, the rules
//! and the dice. It reads unit and card data, decides a winner, and returns
//! the post-effects as data. Nothing is mutated here; the match applies the
//! effects in order.
//!
//! ## Algorithm
//!
//! 1. Each participant contributes `action stat + speed` (a pass defender
//!    contributes speed only, doubled when alone). A unit that cannot afford
//!    its stamina cost loses a flat amount of speed.
//! 2. The attacking side's total is multiplied by 1.95 in both outnumbered
//!    variants.
//! 3. If the totals differ by more than the threshold (5 alone, 10
//!    outnumbered) the higher side wins outright. Otherwise both sides roll;
//!    the side with the strictly lower total takes a penalty and the
//!    attacker must be strictly ahead to win.

use smallvec::SmallVec;
use tracing::debug;

use super::dice::{DiceRolls, DiceSource, FixedDice};
use super::matchup::{BattleSide, Matchup, PendingBattle};
use super::outcome::{BattleOutcome, BattleRequest, Decision, PostEffect, Resolution, Strength};
use crate::cards::{CardCatalog, Stat};
use crate::core::{ActionKind, BattleRules, UnitId, World};
use crate::error::ResolveError;

/// One unit's share of its side's strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub unit: UnitId,
    /// Stat points after any exhaustion penalty.
    pub value: i64,
    /// Stamina the unit pays to take part.
    pub cost: i32,
    /// The unit could not afford `cost`.
    pub exhausted: bool,
}

type Contributions = SmallVec<[Contribution; 2]>;

/// Resolve a battle. See the module docs for the rules.
///
/// Supplied rolls in `request` take precedence over `dice`.
pub fn resolve_battle(
    world: &World,
    catalog: &CardCatalog,
    rules: &BattleRules,
    request: &BattleRequest,
    dice: &mut dyn DiceSource,
) -> Result<BattleOutcome, ResolveError> {
    Resolver::new(world, catalog, rules).resolve(request, dice)
}

/// Borrowed view of everything resolution reads.
pub struct Resolver<'a> {
    world: &'a World,
    catalog: &'a CardCatalog,
    rules: &'a BattleRules,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub fn new(world: &'a World, catalog: &'a CardCatalog, rules: &'a BattleRules) -> Self {
        Self {
            world,
            catalog,
            rules,
        }
    }

    /// Resolve `request`, rolling with `dice` unless rolls were supplied.
    pub fn resolve(
        &self,
        request: &BattleRequest,
        dice: &mut dyn DiceSource,
    ) -> Result<BattleOutcome, ResolveError> {
        match request.rolls {
            Some(rolls) => self.resolve_with(request, &mut FixedDice(rolls)),
            None => self.resolve_with(request, dice),
        }
    }

    fn resolve_with(
        &self,
        request: &BattleRequest,
        dice: &mut dyn DiceSource,
    ) -> Result<BattleOutcome, ResolveError> {
        let battle = &request.battle;
        let attackers = self.side_contributions(battle, BattleSide::Attacker)?;
        let defenders = self.side_contributions(battle, BattleSide::Defender)?;

        let (attack, defense) = self.strengths(battle, &attackers, &defenders);

        let (winner, decided_by) = match request.resolution {
            Resolution::Surrender(side) => (side.other(), Decision::Surrender { side }),
            Resolution::Contest => self.decide(battle, attack, defense, dice)?,
        };

        debug!(
            "{:?} at {}: attack {} vs defense {}, {:?} wins by {:?}",
            battle.action, battle.node, attack, defense, winner, decided_by
        );

        let effects = self.post_effects(request, winner, decided_by, &attackers, &defenders)?;

        Ok(BattleOutcome {
            battle: *battle,
            winner,
            attack,
            defense,
            decided_by,
            effects,
        })
    }

    /// Values and costs for one side of the battle.
    pub fn side_contributions(
        &self,
        battle: &PendingBattle,
        side: BattleSide,
    ) -> Result<Contributions, ResolveError> {
        let alone = !battle.matchup.is_outnumbered();
        battle
            .matchup
            .side(side)
            .iter()
            .map(|&id| self.contribution(id, side, battle.action, alone))
            .collect()
    }

    fn contribution(
        &self,
        id: UnitId,
        side: BattleSide,
        action: ActionKind,
        alone: bool,
    ) -> Result<Contribution, ResolveError> {
        let unit = self.world.unit(id).ok_or(ResolveError::MissingUnit(id))?;
        let template = self
            .catalog
            .get(unit.card)
            .ok_or(ResolveError::MissingCard(unit.card))?;

        let speed = template.stat(Stat::Speed);
        let (action_stat, speed_factor) = match (side, action) {
            (BattleSide::Attacker, ActionKind::Dribble) => (Some(Stat::Dribbling), 1),
            (BattleSide::Attacker, ActionKind::Pass) => (Some(Stat::Passing), 1),
            (BattleSide::Attacker, ActionKind::Shoot) => (Some(Stat::Shooting), 1),
            (BattleSide::Defender, ActionKind::Pass) if alone => {
                (None, self.rules.pass_defense_speed_factor)
            }
            (BattleSide::Defender, ActionKind::Pass) => (None, 1),
            (BattleSide::Defender, _) => (Some(Stat::Defending), 1),
        };

        let line = action_stat.map(|stat| template.stat(stat));
        let cost = line.map_or(speed.cost, |l| l.cost.max(speed.cost));
        let exhausted = !unit.can_afford(cost);

        let mut value = line.map_or(0, |l| l.value) + speed.value * speed_factor;
        if exhausted {
            value -= self.rules.exhaustion_speed_penalty;
        }

        Ok(Contribution {
            unit: id,
            value,
            cost,
            exhausted,
        })
    }

    fn strengths(
        &self,
        battle: &PendingBattle,
        attackers: &[Contribution],
        defenders: &[Contribution],
    ) -> (Strength, Strength) {
        let attack = Strength::from_points(attackers.iter().map(|c| c.value).sum());
        let defense = Strength::from_points(defenders.iter().map(|c| c.value).sum());

        if battle.matchup.is_outnumbered() {
            (attack.scaled(self.rules.outnumbered_multiplier_percent), defense)
        } else {
            (attack, defense)
        }
    }

    fn threshold(&self, battle: &PendingBattle) -> Strength {
        if battle.matchup.is_outnumbered() {
            Strength::from_points(self.rules.outnumbered_threshold)
        } else {
            Strength::from_points(self.rules.single_threshold)
        }
    }

    fn decide(
        &self,
        battle: &PendingBattle,
        attack: Strength,
        defense: Strength,
        dice: &mut dyn DiceSource,
    ) -> Result<(BattleSide, Decision), ResolveError> {
        let diff = attack - defense;
        if diff.abs() > self.threshold(battle) {
            let winner = if diff > Strength::ZERO {
                BattleSide::Attacker
            } else {
                BattleSide::Defender
            };
            return Ok((winner, Decision::Threshold));
        }

        let sides = self.rules.die_sides.max(1);
        let rolls = DiceRolls::new(
            dice.roll(BattleSide::Attacker, sides),
            dice.roll(BattleSide::Defender, sides),
        );
        for roll in [rolls.attacker, rolls.defender] {
            if roll == 0 || roll > sides {
                return Err(ResolveError::InvalidDieRoll(roll));
            }
        }

        let attacker_penalty = if attack < defense { self.rules.underdog_penalty } else { 0 };
        let defender_penalty = if defense < attack { self.rules.underdog_penalty } else { 0 };

        let attack_total = attack + Strength::from_points(i64::from(rolls.attacker) - attacker_penalty);
        let defense_total =
            defense + Strength::from_points(i64::from(rolls.defender) - defender_penalty);

        // Ties go to the defender.
        let winner = if attack_total > defense_total {
            BattleSide::Attacker
        } else {
            BattleSide::Defender
        };

        Ok((
            winner,
            Decision::Dice {
                rolls,
                attacker_penalty,
                defender_penalty,
            },
        ))
    }

    fn post_effects(
        &self,
        request: &BattleRequest,
        winner: BattleSide,
        decided_by: Decision,
        attackers: &[Contribution],
        defenders: &[Contribution],
    ) -> Result<Vec<PostEffect>, ResolveError> {
        let battle = &request.battle;
        let matchup = battle.matchup;
        let loser = winner.other();
        let mut effects = Vec::new();

        // Stamina
        let spend = |effects: &mut Vec<PostEffect>, side: &[Contribution], cost: Option<i32>| {
            for c in side {
                let cost = cost.unwrap_or(c.cost);
                if cost > 0 {
                    effects.push(PostEffect::SpendStamina { unit: c.unit, cost });
                }
            }
        };
        match decided_by {
            Decision::Surrender { side } => {
                let conceding = match side {
                    BattleSide::Attacker => attackers,
                    BattleSide::Defender => defenders,
                };
                spend(&mut effects, conceding, Some(self.rules.surrender_stamina_penalty));
            }
            Decision::Threshold if winner == BattleSide::Defender => {
                spend(&mut effects, attackers, None);
            }
            Decision::Threshold | Decision::Dice { .. } => {
                spend(&mut effects, attackers, None);
                spend(&mut effects, defenders, None);
            }
        }

        // Locks
        let turns = self.rules.locks.for_action(battle.action);
        if turns > 0 {
            for &unit in &matchup.side(loser) {
                effects.push(PostEffect::Lock { unit, turns });
            }
        }

        // Possession and position
        let carrier = self.world.ball_carrier();
        match battle.action {
            ActionKind::Dribble => {
                if carrier.is_some_and(|c| matchup.side(loser).contains(&c)) {
                    effects.push(PostEffect::GiveBall {
                        unit: matchup.primary(winner),
                    });
                }
                if winner == BattleSide::Attacker {
                    let mover = matchup.primary(BattleSide::Attacker);
                    let at = self.world.unit(mover).ok_or(ResolveError::MissingUnit(mover))?.position;
                    if at != battle.node {
                        effects.push(PostEffect::Reposition {
                            unit: mover,
                            to: battle.node,
                        });
                    }
                }
            }
            ActionKind::Shoot => {
                if winner == BattleSide::Attacker {
                    effects.push(PostEffect::Goal {
                        scorer: matchup.primary(BattleSide::Attacker),
                        player: battle.attacking_player,
                    });
                } else {
                    let keeper = matchup.primary(BattleSide::Defender);
                    if carrier != Some(keeper) {
                        effects.push(PostEffect::GiveBall { unit: keeper });
                    }
                    for &unit in &matchup.attackers() {
                        let at = self.world.unit(unit).ok_or(ResolveError::MissingUnit(unit))?.position;
                        if let Some(to) = at.push_back() {
                            effects.push(PostEffect::Reposition { unit, to });
                        }
                    }
                }
            }
            ActionKind::Pass => {
                let receiver = self.pass_receiver(battle, winner, request.pass_target);
                if carrier != Some(receiver) {
                    effects.push(PostEffect::GiveBall { unit: receiver });
                }
            }
        }

        Ok(effects)
    }

    /// Who ends up with the ball after a contested pass.
    fn pass_receiver(&self, battle: &PendingBattle, winner: BattleSide, target: Option<UnitId>) -> UnitId {
        let winning_player = match winner {
            BattleSide::Attacker => battle.attacking_player,
            BattleSide::Defender => battle.defending_player(),
        };

        let chosen = target.and_then(|id| self.world.unit(id)).filter(|u| {
            u.owner == winning_player
                && (u.position == battle.node || self.world.board.is_adjacent(battle.node, u.position))
        });
        if let Some(unit) = chosen {
            return unit.id;
        }

        match winner {
            // Resident teammate if there is one, else the passer keeps it.
            BattleSide::Attacker => match battle.matchup {
                Matchup::TwoAttackersVOne { attackers, .. } => attackers[1],
                _ => battle.matchup.primary(BattleSide::Attacker),
            },
            BattleSide::Defender => battle.matchup.primary(BattleSide::Defender),
        }
    }
}
