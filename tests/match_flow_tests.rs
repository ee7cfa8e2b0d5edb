//! Match flow integration tests.
//!
//! These drive a `Match` through its public commands: kickoff, free moves,
//! passes, battles, goals, the finish, and history replay.

use soccer_ccg::battle::{DiceRolls, Resolution};
use soccer_ccg::board::NodeId;
use soccer_ccg::cards::{CardCatalog, CardId, CardTemplate, Stat};
use soccer_ccg::core::{Action, MatchConfig, PlayerId, UnitId};
use soccer_ccg::error::{IllegalAction, MatchError};
use soccer_ccg::game::{Formation, Match, MatchBuilder, MatchPhase, MatchSnapshot, Squad};
use soccer_ccg::rules::ActionOutcome;

const KEEPER: CardId = CardId::new(1);
const RUNNER: CardId = CardId::new(2);

fn node(n: u8) -> NodeId {
    NodeId::new(n).unwrap()
}

fn catalog() -> CardCatalog {
    CardCatalog::new()
        .with_card(
            CardTemplate::new(KEEPER, "Keeper", 20)
                .with_stat(Stat::Defending, 4, 1)
                .with_stat(Stat::Speed, 1, 1),
        )
        .unwrap()
        .with_card(
            CardTemplate::new(RUNNER, "Runner", 20)
                .with_stat(Stat::Dribbling, 6, 1)
                .with_stat(Stat::Passing, 4, 1)
                .with_stat(Stat::Shooting, 5, 1)
                .with_stat(Stat::Defending, 2, 1)
                .with_stat(Stat::Speed, 3, 1),
        )
        .unwrap()
}

fn standard_match(seed: u64) -> Match {
    let squad = Squad::new(KEEPER, [RUNNER; 3]);
    MatchBuilder::new(catalog())
        .squad(PlayerId::HOME, squad.clone())
        .squad(PlayerId::AWAY, squad)
        .build(seed)
        .unwrap()
}

/// Home striker on 10, away keeper pulled off its goal to 9.
fn open_goal_match(config: MatchConfig) -> Match {
    MatchBuilder::new(catalog())
        .config(config)
        .squad(PlayerId::HOME, Squad::new(KEEPER, [RUNNER]))
        .squad(PlayerId::AWAY, Squad::new(KEEPER, [RUNNER]))
        .formation(PlayerId::HOME, Formation::new(node(1), [node(10)]))
        .formation(PlayerId::AWAY, Formation::new(node(9), [node(3)]))
        .build(11)
        .unwrap()
}

/// Home striker on 10, away keeper guarding 12.
fn guarded_goal_match() -> Match {
    MatchBuilder::new(catalog())
        .squad(PlayerId::HOME, Squad::new(KEEPER, [RUNNER]))
        .squad(PlayerId::AWAY, Squad::new(KEEPER, [RUNNER]))
        .formation(PlayerId::HOME, Formation::new(node(1), [node(10)]))
        .formation(PlayerId::AWAY, Formation::new(node(12), [node(3)]))
        .build(11)
        .unwrap()
}

fn unit_at(game: &Match, player: PlayerId, at: u8) -> UnitId {
    game.world().owned_on(node(at), player).next().unwrap()
}

fn kick_off(game: &mut Match, player: PlayerId, at: u8) -> UnitId {
    game.set_coin_toss_winner(player).unwrap();
    let unit = unit_at(game, player, at);
    game.set_kickoff_unit(unit).unwrap();
    unit
}

/// Play `steps` commands, always taking the first legal option and letting
/// the match RNG roll every battle.
fn autoplay(game: &mut Match, steps: usize) {
    for _ in 0..steps {
        match game.phase() {
            MatchPhase::Finished { .. } | MatchPhase::CoinToss => return,
            MatchPhase::PostBattleMove { .. } => {
                game.skip_post_battle_move().unwrap();
                continue;
            }
            MatchPhase::InProgress => {}
        }

        if let Some(battle) = game.pending_battle().copied() {
            let attacker = battle.matchup.primary(soccer_ccg::battle::BattleSide::Attacker);
            game.resolve_pending_battle(attacker, Resolution::Contest, None, None)
                .unwrap();
            continue;
        }

        let active = game.active_player();
        let choice = game
            .world()
            .units_of(active)
            .map(|u| u.id)
            .collect::<Vec<_>>()
            .into_iter()
            .find_map(|id| game.legal_actions(id).last().map(|&a| (id, a)));
        let Some((unit, action)) = choice else {
            return;
        };
        assert!(game.perform_action(unit, action).unwrap().is_legal());
    }
}

#[test]
fn test_pass_to_teammate_transfers_ball() {
    let mut game = standard_match(1);
    let striker = kick_off(&mut game, PlayerId::HOME, 5);
    let receiver = unit_at(&game, PlayerId::HOME, 2);

    let outcome = game.perform_action(striker, Action::Pass(node(2))).unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::Passed {
            from: striker,
            to: receiver
        }
    );
    assert_eq!(game.world().ball_carrier(), Some(receiver));
    assert!(game.pending_battle().is_none());
    assert_eq!(game.active_player(), PlayerId::AWAY);
    assert_eq!(game.turn(), 2);
}

#[test]
fn test_shot_off_goal_is_refused() {
    let mut game = standard_match(1);
    let striker = kick_off(&mut game, PlayerId::HOME, 5);

    let outcome = game.perform_action(striker, Action::Shoot).unwrap();

    let reason = outcome.illegal_reason().unwrap();
    assert_eq!(reason, IllegalAction::NotInShootingRange);
    assert!(reason.to_string().contains("not at opponent's goal"));
    assert_eq!(game.active_player(), PlayerId::HOME);
    assert_eq!(game.turn(), 1);
}

#[test]
fn test_wrong_player_cannot_act() {
    let mut game = standard_match(1);
    kick_off(&mut game, PlayerId::HOME, 5);
    let enemy = unit_at(&game, PlayerId::AWAY, 10);

    let outcome = game.perform_action(enemy, Action::Dribble(node(7))).unwrap();
    assert_eq!(outcome.illegal_reason(), Some(IllegalAction::NotYourTurn));
}

#[test]
fn test_empty_goal_shot_scores_and_resets() {
    let mut game = open_goal_match(MatchConfig::default());
    let striker = kick_off(&mut game, PlayerId::HOME, 10);
    let away_runner = unit_at(&game, PlayerId::AWAY, 3);
    let home_keeper = unit_at(&game, PlayerId::HOME, 1);

    game.perform_action(striker, Action::Dribble(node(12))).unwrap();
    game.perform_action(away_runner, Action::Dribble(node(6))).unwrap();
    let outcome = game.perform_action(striker, Action::Shoot).unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::Goal {
            scorer: striker,
            player: PlayerId::HOME
        }
    );
    assert_eq!(game.score()[PlayerId::HOME], 1);
    assert_eq!(game.phase(), MatchPhase::InProgress);

    // Kickoff positions, scorer's keeper on the ball, opponent to move.
    assert_eq!(game.unit(striker).unwrap().position, node(10));
    assert_eq!(game.unit(away_runner).unwrap().position, node(3));
    assert_eq!(game.world().ball_carrier(), Some(home_keeper));
    assert_eq!(game.active_player(), PlayerId::AWAY);
    assert!(game.check_invariants().is_ok());
}

#[test]
fn test_goal_target_finishes_match() {
    let mut game = open_goal_match(MatchConfig::new().with_goal_target(1));
    let striker = kick_off(&mut game, PlayerId::HOME, 10);
    let away_runner = unit_at(&game, PlayerId::AWAY, 3);

    game.perform_action(striker, Action::Dribble(node(12))).unwrap();
    game.perform_action(away_runner, Action::Dribble(node(6))).unwrap();
    game.perform_action(striker, Action::Shoot).unwrap();

    assert_eq!(
        game.phase(),
        MatchPhase::Finished {
            winner: PlayerId::HOME
        }
    );
    assert_eq!(game.phase().winner(), Some(PlayerId::HOME));

    let history = game.history().len();
    let refused = game.perform_action(away_runner, Action::Dribble(node(5))).unwrap();
    assert_eq!(refused.illegal_reason(), Some(IllegalAction::NotInProgress));
    assert!(game.legal_actions(away_runner).is_empty());
    assert!(matches!(game.coin_toss(), Err(MatchError::WrongPhase(_))));
    assert_eq!(game.history().len(), history);
}

#[test]
fn test_contested_shot_scores_and_resets() {
    let mut game = guarded_goal_match();
    let striker = kick_off(&mut game, PlayerId::HOME, 10);
    let keeper = unit_at(&game, PlayerId::AWAY, 12);
    let home_keeper = unit_at(&game, PlayerId::HOME, 1);
    let away_runner = unit_at(&game, PlayerId::AWAY, 3);

    game.perform_action(striker, Action::Dribble(node(12))).unwrap();
    game.resolve_pending_battle(striker, Resolution::Contest, None, Some(DiceRolls::new(6, 1)))
        .unwrap();
    game.skip_post_battle_move().unwrap();
    game.perform_action(away_runner, Action::Dribble(node(6))).unwrap();

    // Shot: 8 + 6 vs 5 + 1 - 2.
    let outcome = game.perform_action(striker, Action::Shoot).unwrap();
    assert!(matches!(outcome, ActionOutcome::BattlePending(_)));
    let scored = game
        .resolve_pending_battle(striker, Resolution::Contest, None, Some(DiceRolls::new(6, 1)))
        .unwrap();

    assert_eq!(scored.goal(), Some(PlayerId::HOME));
    assert_eq!(game.score()[PlayerId::HOME], 1);
    assert_eq!(game.score()[PlayerId::AWAY], 0);
    assert_eq!(game.phase(), MatchPhase::InProgress);
    assert!(game.pending_battle().is_none());

    for unit in game.world().units() {
        assert_eq!(unit.position, unit.home, "{} not at kickoff position", unit.id);
        assert_eq!(unit.lock_turns, 0);
    }
    assert_eq!(game.unit(keeper).unwrap().position, node(12));
    assert_eq!(game.world().ball_carrier(), Some(home_keeper));
    assert_eq!(game.active_player(), PlayerId::AWAY);
    assert!(game.check_invariants().is_ok());
}

#[test]
fn test_keeper_saves_and_pushes_shooter_back() {
    let mut game = guarded_goal_match();
    let striker = kick_off(&mut game, PlayerId::HOME, 10);
    let keeper = unit_at(&game, PlayerId::AWAY, 12);
    let away_runner = unit_at(&game, PlayerId::AWAY, 3);

    // Dribble into the box: 9 vs 5, decided by dice.
    let outcome = game.perform_action(striker, Action::Dribble(node(12))).unwrap();
    assert!(matches!(outcome, ActionOutcome::BattlePending(_)));
    let won = game
        .resolve_pending_battle(striker, Resolution::Contest, None, Some(DiceRolls::new(6, 1)))
        .unwrap();
    assert!(won.attacker_won());
    assert_eq!(game.unit(striker).unwrap().position, node(12));
    assert_eq!(game.world().ball_carrier(), Some(striker));
    game.skip_post_battle_move().unwrap();

    game.perform_action(away_runner, Action::Dribble(node(6))).unwrap();

    // Shot: 8 + 1 vs 5 + 6 - 2, tie goes to the keeper.
    let outcome = game.perform_action(striker, Action::Shoot).unwrap();
    assert!(matches!(outcome, ActionOutcome::BattlePending(_)));
    let saved = game
        .resolve_pending_battle(striker, Resolution::Contest, None, Some(DiceRolls::new(1, 6)))
        .unwrap();

    assert!(!saved.attacker_won());
    assert!(saved.goal().is_none());
    assert_eq!(game.score()[PlayerId::HOME], 0);
    assert_eq!(game.world().ball_carrier(), Some(keeper));
    assert_eq!(game.unit(striker).unwrap().position, node(10));
    assert_eq!(game.unit(striker).unwrap().stamina, 18);
    assert_eq!(game.unit(keeper).unwrap().stamina, 18);
    assert_eq!(game.active_player(), PlayerId::AWAY);
}

#[test]
fn test_pending_battle_resolves_once() {
    let mut game = standard_match(1);
    let striker = kick_off(&mut game, PlayerId::HOME, 5);

    game.perform_action(striker, Action::Dribble(node(8))).unwrap();
    game.resolve_pending_battle(striker, Resolution::Contest, None, Some(DiceRolls::new(2, 5)))
        .unwrap();

    assert!(matches!(
        game.resolve_pending_battle(striker, Resolution::Contest, None, Some(DiceRolls::new(2, 5))),
        Err(MatchError::NoPendingBattle)
    ));
    assert!(matches!(
        game.concede_pending_battle(PlayerId::AWAY),
        Err(MatchError::NoPendingBattle)
    ));
}

#[test]
fn test_attacker_surrender_costs_stamina() {
    let mut game = standard_match(1);
    let striker = kick_off(&mut game, PlayerId::HOME, 5);
    let defender = unit_at(&game, PlayerId::AWAY, 8);

    game.perform_action(striker, Action::Dribble(node(8))).unwrap();
    let outcome = game
        .resolve_pending_battle(
            striker,
            Resolution::Surrender(soccer_ccg::battle::BattleSide::Attacker),
            None,
            None,
        )
        .unwrap();

    assert!(!outcome.attacker_won());
    assert_eq!(game.unit(striker).unwrap().stamina, 18);
    assert_eq!(game.unit(defender).unwrap().stamina, 20);
    assert_eq!(game.world().ball_carrier(), Some(defender));
    assert_eq!(game.active_player(), PlayerId::AWAY);
}

#[test]
fn test_replay_reproduces_state() {
    let mut game = standard_match(21);
    let winner = game.coin_toss().unwrap();
    let at = if winner == PlayerId::HOME { 5 } else { 8 };
    let unit = unit_at(&game, winner, at);
    game.set_kickoff_unit(unit).unwrap();
    autoplay(&mut game, 40);

    let commands: Vec<_> = game.history().iter().map(|r| r.command).collect();
    let mut copy = standard_match(21);
    copy.replay(commands).unwrap();

    assert_eq!(copy.state(), game.state());
}

#[test]
fn test_snapshot_restores_playable_match() {
    let mut game = standard_match(3);
    kick_off(&mut game, PlayerId::AWAY, 8);
    autoplay(&mut game, 6);

    let bytes = game.snapshot().to_bytes().unwrap();
    let snapshot = MatchSnapshot::from_bytes(&bytes).unwrap();
    let mut restored = Match::restore(game.catalog().clone(), *game.config(), snapshot);
    assert_eq!(restored.state(), game.state());

    // Same RNG position, so the same future.
    autoplay(&mut game, 20);
    autoplay(&mut restored, 20);
    assert_eq!(restored.state(), game.state());
}

#[test]
fn test_snapshot_json() {
    let mut game = standard_match(3);
    kick_off(&mut game, PlayerId::HOME, 5);
    autoplay(&mut game, 4);

    let snapshot = game.snapshot();
    let json = snapshot.to_json().unwrap();
    assert_eq!(MatchSnapshot::from_json(&json).unwrap(), snapshot);
}
