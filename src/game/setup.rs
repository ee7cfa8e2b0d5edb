//! Match construction: squads, formations and the builder.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::orchestrator::Match;
use super::state::MatchState;
use crate::board::NodeId;
use crate::cards::{CardCatalog, CardId};
use crate::core::{GameRng, MatchConfig, PlayerId, PlayerMap, World};
use crate::error::MatchError;

/// Kickoff nodes for one side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    /// Where the goalkeeper stands.
    pub keeper: NodeId,
    /// Outfield slots, filled in squad order.
    pub outfield: Vec<NodeId>,
}

impl Formation {
    #[must_use]
    pub fn new(keeper: NodeId, outfield: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            keeper,
            outfield: outfield.into_iter().collect(),
        }
    }

    /// Default layout: keeper on the own goal, three outfielders ahead of it.
    ///
    /// ```
    /// use soccer_ccg::core::PlayerId;
    /// use soccer_ccg::game::Formation;
    ///
    /// let away = Formation::standard(PlayerId::AWAY);
    /// assert_eq!(away.keeper.raw(), 12);
    /// assert_eq!(away.outfield.iter().map(|n| n.raw()).collect::<Vec<_>>(), vec![11, 10, 8]);
    /// ```
    #[must_use]
    pub fn standard(player: PlayerId) -> Self {
        let outfield: [u8; 3] = if player == PlayerId::HOME {
            [2, 3, 5]
        } else {
            [11, 10, 8]
        };
        Self::new(
            NodeId::own_goal(player),
            outfield.into_iter().filter_map(NodeId::new),
        )
    }
}

/// Cards one player brings to the pitch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squad {
    pub keeper: CardId,
    /// Outfield cards. Cards beyond the formation's slots are not fielded.
    pub outfield: Vec<CardId>,
}

impl Squad {
    #[must_use]
    pub fn new(keeper: CardId, outfield: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            keeper,
            outfield: outfield.into_iter().collect(),
        }
    }
}

/// Builder for a [`Match`].
///
/// ```
/// use soccer_ccg::cards::{CardCatalog, CardId, CardTemplate};
/// use soccer_ccg::core::PlayerId;
/// use soccer_ccg::game::{MatchBuilder, MatchPhase, Squad};
///
/// let catalog = CardCatalog::new()
///     .with_card(CardTemplate::new(CardId::new(1), "Anyone", 10))
///     .unwrap();
/// let squad = Squad::new(CardId::new(1), [CardId::new(1); 3]);
///
/// let game = MatchBuilder::new(catalog)
///     .squad(PlayerId::HOME, squad.clone())
///     .squad(PlayerId::AWAY, squad)
///     .build(7)
///     .unwrap();
///
/// assert_eq!(game.phase(), MatchPhase::CoinToss);
/// assert_eq!(game.world().unit_count(), 8);
/// ```
pub struct MatchBuilder {
    catalog: Arc<CardCatalog>,
    config: MatchConfig,
    squads: PlayerMap<Option<Squad>>,
    formations: PlayerMap<Formation>,
}

impl MatchBuilder {
    pub fn new(catalog: impl Into<Arc<CardCatalog>>) -> Self {
        Self {
            catalog: catalog.into(),
            config: MatchConfig::default(),
            squads: PlayerMap::default(),
            formations: PlayerMap::new(Formation::standard),
        }
    }

    pub fn config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn squad(mut self, player: PlayerId, squad: Squad) -> Self {
        self.squads[player] = Some(squad);
        self
    }

    pub fn formation(mut self, player: PlayerId, formation: Formation) -> Self {
        self.formations[player] = formation;
        self
    }

    /// Spawn both squads and return a match waiting for its coin toss.
    pub fn build(self, seed: u64) -> Result<Match, MatchError> {
        let mut world = World::new();

        for player in PlayerId::both() {
            let squad = self.squads[player].as_ref().ok_or(MatchError::EmptySquad(player))?;
            let formation = &self.formations[player];

            world.spawn_goalkeeper_from_card(&self.catalog, player, squad.keeper, formation.keeper)?;
            for (&card, &node) in squad.outfield.iter().zip(&formation.outfield) {
                world.spawn_unit_from_card(&self.catalog, player, card, node)?;
            }
        }

        world.check_invariants()?;

        Ok(Match::from_parts(
            self.catalog,
            self.config,
            MatchState::new(world),
            GameRng::new(seed),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardTemplate;

    fn catalog() -> CardCatalog {
        CardCatalog::new()
            .with_card(CardTemplate::new(CardId::new(1), "Keeper", 12))
            .unwrap()
            .with_card(CardTemplate::new(CardId::new(2), "Field", 8))
            .unwrap()
    }

    fn squad() -> Squad {
        Squad::new(CardId::new(1), [CardId::new(2); 3])
    }

    #[test]
    fn test_standard_formation() {
        let home = Formation::standard(PlayerId::HOME);
        assert_eq!(home.keeper, NodeId::HOME_GOAL);
        assert_eq!(
            home.outfield.iter().map(|n| n.raw()).collect::<Vec<_>>(),
            vec![2, 3, 5]
        );
    }

    #[test]
    fn test_build_places_squads() {
        let game = MatchBuilder::new(catalog())
            .squad(PlayerId::HOME, squad())
            .squad(PlayerId::AWAY, squad())
            .build(1)
            .unwrap();

        let world = game.world();
        assert_eq!(world.units_of(PlayerId::HOME).count(), 4);
        assert_eq!(world.units_of(PlayerId::AWAY).count(), 4);

        let keeper = world
            .units_of(PlayerId::AWAY)
            .find(|u| u.goalkeeper)
            .unwrap();
        assert_eq!(keeper.position, NodeId::AWAY_GOAL);
        assert_eq!(keeper.stamina, 12);
        assert!(world.ball_carrier().is_none());
    }

    #[test]
    fn test_missing_squad() {
        let err = MatchBuilder::new(catalog())
            .squad(PlayerId::HOME, squad())
            .build(1)
            .err()
            .unwrap();
        assert!(matches!(err, MatchError::EmptySquad(p) if p == PlayerId::AWAY));
    }

    #[test]
    fn test_unknown_card_in_squad() {
        let err = MatchBuilder::new(catalog())
            .squad(PlayerId::HOME, Squad::new(CardId::new(9), []))
            .squad(PlayerId::AWAY, squad())
            .build(1)
            .err()
            .unwrap();
        assert!(matches!(err, MatchError::UnknownCard(_)));
    }

    #[test]
    fn test_extra_cards_stay_off_the_pitch() {
        let game = MatchBuilder::new(catalog())
            .squad(PlayerId::HOME, Squad::new(CardId::new(1), [CardId::new(2); 6]))
            .squad(PlayerId::AWAY, squad())
            .formation(
                PlayerId::HOME,
                Formation::new(NodeId::HOME_GOAL, [NodeId::new(5).unwrap()]),
            )
            .build(1)
            .unwrap();

        assert_eq!(game.world().units_of(PlayerId::HOME).count(), 2);
    }
}
