//! Roster arena: the immutable card pool a side plays a game with.
//!
//! All game state refers to cards by `CardId`; the roster is the only
//! place card data lives. Every roster also carries the two built-in
//! replacement cards so a lineup hole can always be filled, at a price.

use crate::cards::{Chart, FieldingRatings, Outcome, PlayerCard, Position, Speed};
use crate::core::CardId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// The replacement-level hitter (`CardId(-1)`), usable in any lineup slot.
#[must_use]
pub fn replacement_hitter() -> PlayerCard {
    PlayerCard {
        card_id: CardId::REPLACEMENT_HITTER,
        name: "Replacement Hitter".into(),
        control: None,
        on_base: -10,
        speed: Speed::B,
        ip: None,
        fielding: FieldingRatings::from_pairs(&[
            (Position::Catcher, 0),
            (Position::FirstBase, 0),
            (Position::SecondBase, 0),
            (Position::Shortstop, 0),
            (Position::ThirdBase, 0),
            (Position::LeftField, 0),
            (Position::CenterField, 0),
            (Position::RightField, 0),
        ]),
        chart: Chart::from_ranges(&[(1, 2, Outcome::Strikeout), (3, 20, Outcome::GroundBall)]),
    }
}

/// The replacement-level pitcher (`CardId(-2)`).
#[must_use]
pub fn replacement_pitcher() -> PlayerCard {
    PlayerCard {
        card_id: CardId::REPLACEMENT_PITCHER,
        name: "Replacement Pitcher".into(),
        control: Some(-1),
        on_base: 0,
        speed: Speed::C,
        ip: Some(1),
        fielding: FieldingRatings::none(),
        chart: Chart::from_ranges(&[
            (1, 3, Outcome::PopUp),
            (4, 8, Outcome::Strikeout),
            (9, 12, Outcome::GroundBall),
            (13, 16, Outcome::FlyBall),
            (17, 17, Outcome::Walk),
            (18, 19, Outcome::Single),
            (20, 20, Outcome::Double),
        ]),
    }
}

/// One side's card pool for a game.
///
/// Lookup is O(1) by id. The replacement cards are always present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PlayerCard>", into = "Vec<PlayerCard>")]
pub struct Roster {
    cards: Vec<PlayerCard>,
    index: FxHashMap<CardId, usize>,
}

impl Roster {
    /// Build a roster, appending the replacement cards if absent.
    #[must_use]
    pub fn new(mut cards: Vec<PlayerCard>) -> Self {
        for replacement in [replacement_hitter(), replacement_pitcher()] {
            if !cards.iter().any(|c| c.card_id == replacement.card_id) {
                cards.push(replacement);
            }
        }
        let index = cards
            .iter()
            .enumerate()
            .map(|(i, c)| (c.card_id, i))
            .collect();
        Self { cards, index }
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&PlayerCard> {
        self.index.get(&id).map(|&i| &self.cards[i])
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.index.contains_key(&id)
    }

    /// Display name for a card, or a placeholder for an unknown id.
    #[must_use]
    pub fn name(&self, id: CardId) -> &str {
        self.get(id).map_or("Unknown Player", |c| c.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerCard> {
        self.cards.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl From<Vec<PlayerCard>> for Roster {
    fn from(cards: Vec<PlayerCard>) -> Self {
        Roster::new(cards)
    }
}

impl From<Roster> for Vec<PlayerCard> {
    fn from(roster: Roster) -> Self {
        roster.cards
    }
}
