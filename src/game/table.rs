//! Player registry, card registry and piles.
//!
//! The `Table` is the one place that knows where every card is: in a hand,
//! in the deck, or on the used pile. Moving a card in or out of a hand goes
//! through `give` / `take` so score and ownership follow the card:
//!
//! - entering a hand credits a Valued card's points to the holder
//! - leaving a hand debits them again
//! - Owned cards record their holder
//!
//! `play` is the exception: a card played from hand keeps its points banked.
//!
//! Lookups that come from the attack context return the fatal
//! `MissingPlayer` / `MissingCard` errors; callers validating client input
//! check `contains` first and report their own error.

use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{AttackKind, Capability, Card, CardInstanceId, CardKind, CatalogEntry};
use crate::core::{GameRng, PlayerId, PlayerMap};
use crate::error::EngineError;

/// A seat as it joins the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub name: String,
    pub image: String,
}

impl Seat {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let image = format!("avatars/{}.png", name.to_lowercase());
        Self { name, image }
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// A player at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub image: String,
    /// `false` once eliminated or gone.
    pub active: bool,
    pub score: i64,
    hand: Vec<CardInstanceId>,
}

impl Player {
    fn seated(id: PlayerId, seat: Seat) -> Self {
        Self {
            id,
            name: seat.name,
            image: seat.image,
            active: true,
            score: 0,
            hand: Vec::new(),
        }
    }

    /// Cards held, in the order they arrived.
    #[must_use]
    pub fn hand(&self) -> &[CardInstanceId] {
        &self.hand
    }

    #[must_use]
    pub fn holds(&self, card: CardInstanceId) -> bool {
        self.hand.contains(&card)
    }
}

/// Players, cards and piles.
#[derive(Clone, Debug)]
pub struct Table {
    players: PlayerMap<Player>,
    cards: FxHashMap<CardInstanceId, Card>,
    deck: Vec<CardInstanceId>,
    used: Vec<CardInstanceId>,
    rng: GameRng,
}

impl Table {
    /// Seat players in order. The deck starts empty.
    #[must_use]
    pub fn new(seats: Vec<Seat>, rng: GameRng) -> Self {
        let players = seats
            .into_iter()
            .enumerate()
            .map(|(i, seat)| Player::seated(PlayerId::new(i as u8), seat))
            .collect();

        Self {
            players: PlayerMap::from_vec(players),
            cards: FxHashMap::default(),
            deck: Vec::new(),
            used: Vec::new(),
            rng,
        }
    }

    // === Setup ===

    /// Instantiate the catalog for this table size into the deck.
    pub fn build_deck(&mut self, entries: &[CatalogEntry]) {
        let player_count = self.players.player_count();
        let mut next_id = self.cards.len() as u32;

        for entry in entries {
            for _ in 0..entry.multiplicity.count(player_count) {
                let id = CardInstanceId::new(next_id);
                next_id += 1;
                self.cards
                    .insert(id, Card::new(id, entry.kind, entry.name.clone(), entry.image.clone()));
                self.deck.push(id);
            }
        }
        debug!("table: built deck of {} cards", self.deck.len());
    }

    /// Deal `hand_size` cards to every seat.
    ///
    /// Disasters are held back while dealing and shuffled in afterwards, so
    /// no one starts with one in hand.
    pub fn deal(&mut self, hand_size: usize) -> Result<(), EngineError> {
        let deck = std::mem::take(&mut self.deck);
        let (disasters, mut safe): (Vec<_>, Vec<_>) = deck
            .into_iter()
            .partition(|id| self.cards.get(id).is_some_and(|c| c.kind.is_disaster()));

        self.rng.shuffle(&mut safe);
        let seats: Vec<PlayerId> = self.players.player_ids().collect();
        'deal: for _ in 0..hand_size {
            for &seat in &seats {
                let Some(card) = safe.pop() else { break 'deal };
                self.give(seat, card)?;
            }
        }

        safe.extend(disasters);
        self.rng.shuffle(&mut safe);
        self.deck = safe;
        debug!("table: dealt {} each, {} left in deck", hand_size, self.deck.len());
        Ok(())
    }

    // === Card movement ===

    /// Take the top card off the deck.
    pub fn draw(&mut self) -> Option<CardInstanceId> {
        self.deck.pop()
    }

    /// Put a card into a hand, crediting points and recording ownership.
    pub fn give(&mut self, player: PlayerId, card: CardInstanceId) -> Result<(), EngineError> {
        let holder = self
            .players
            .get_checked_mut(player)
            .ok_or(EngineError::MissingPlayer(player))?;
        let instance = self.cards.get_mut(&card).ok_or(EngineError::MissingCard(card))?;

        if let Some(points) = instance.credit() {
            holder.score += points;
        }
        instance.set_owner(Some(player));
        holder.hand.push(card);
        Ok(())
    }

    /// Remove a card from a hand, debiting its points and clearing ownership.
    pub fn take(&mut self, player: PlayerId, card: CardInstanceId) -> Result<(), EngineError> {
        self.remove_from_hand(player, card)?;
        let instance = self.cards.get_mut(&card).ok_or(EngineError::MissingCard(card))?;
        if let Some(points) = instance.kind.score_value() {
            self.players[player].score -= points;
        }
        instance.set_owner(None);
        Ok(())
    }

    /// Move a card between hands.
    pub fn transfer(&mut self, from: PlayerId, to: PlayerId, card: CardInstanceId) -> Result<(), EngineError> {
        self.take(from, card)?;
        self.give(to, card)?;
        debug!("table: {} moved from {} to {}", card, from, to);
        Ok(())
    }

    /// Play a card from hand onto the used pile. Points stay banked.
    pub fn play(&mut self, player: PlayerId, card: CardInstanceId) -> Result<(), EngineError> {
        self.remove_from_hand(player, card)?;
        let instance = self.cards.get_mut(&card).ok_or(EngineError::MissingCard(card))?;
        instance.set_owner(None);
        self.used.push(card);
        Ok(())
    }

    /// Put a card that is in no hand onto the used pile.
    pub fn discard(&mut self, card: CardInstanceId) -> Result<(), EngineError> {
        if !self.cards.contains_key(&card) {
            return Err(EngineError::MissingCard(card));
        }
        self.used.push(card);
        Ok(())
    }

    /// Discard a whole hand with score adjustment. Returns how many cards went.
    pub fn discard_hand(&mut self, player: PlayerId) -> Result<usize, EngineError> {
        let hand = self.player(player)?.hand.clone();
        for &card in &hand {
            self.take(player, card)?;
            self.used.push(card);
        }
        Ok(hand.len())
    }

    /// Discard the hand and take the seat out of play.
    pub fn eliminate(&mut self, player: PlayerId) -> Result<(), EngineError> {
        let discarded = self.discard_hand(player)?;
        self.players[player].active = false;
        info!("table: {} eliminated, {} cards discarded", player, discarded);
        Ok(())
    }

    pub fn adjust_score(&mut self, player: PlayerId, delta: i64) -> Result<(), EngineError> {
        self.players
            .get_checked_mut(player)
            .ok_or(EngineError::MissingPlayer(player))?
            .score += delta;
        Ok(())
    }

    fn remove_from_hand(&mut self, player: PlayerId, card: CardInstanceId) -> Result<(), EngineError> {
        let holder = self
            .players
            .get_checked_mut(player)
            .ok_or(EngineError::MissingPlayer(player))?;
        let pos = holder
            .hand
            .iter()
            .position(|&c| c == card)
            .ok_or(EngineError::CardNotInHand { player, card })?;
        holder.hand.remove(pos);
        Ok(())
    }

    // === Selection ===

    /// A card chosen uniformly from the player's hand.
    pub fn random_card(&mut self, player: PlayerId) -> Result<Option<CardInstanceId>, EngineError> {
        let hand_len = self.player(player)?.hand.len();
        Ok(self
            .rng
            .index_below(hand_len)
            .map(|i| self.players[player].hand[i]))
    }

    /// First card in the player's hand that would stop `attack`.
    pub fn defense_for(&self, player: PlayerId, attack: AttackKind) -> Result<Option<CardInstanceId>, EngineError> {
        let holder = self.player(player)?;
        for &id in &holder.hand {
            let card = self.card(id)?;
            if attack.defense_succeeded(card.kind.as_defender().as_ref()) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// Does the player hold any card of `kind`?
    pub fn holds_kind(&self, player: PlayerId, kind: CardKind) -> Result<bool, EngineError> {
        let holder = self.player(player)?;
        Ok(holder
            .hand
            .iter()
            .filter_map(|id| self.cards.get(id))
            .any(|c| c.kind == kind))
    }

    /// Active seats holding a win-type special card, in seat order.
    #[must_use]
    pub fn map_holders(&self) -> Vec<PlayerId> {
        let mut holders: Vec<PlayerId> = self
            .cards
            .values()
            .filter(|c| c.kind.is_win_special() && c.kind.has(Capability::Owned))
            .filter_map(Card::owner)
            .filter(|&p| self.players.get_checked(p).is_some_and(|pl| pl.active))
            .collect();
        holders.sort_unstable();
        holders.dedup();
        holders
    }

    // === Queries ===

    pub fn player(&self, player: PlayerId) -> Result<&Player, EngineError> {
        self.players
            .get_checked(player)
            .ok_or(EngineError::MissingPlayer(player))
    }

    pub fn card(&self, card: CardInstanceId) -> Result<&Card, EngineError> {
        self.cards.get(&card).ok_or(EngineError::MissingCard(card))
    }

    #[must_use]
    pub fn contains_player(&self, player: PlayerId) -> bool {
        self.players.contains(player)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().map(|(_, p)| p)
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.player_ids()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players().filter(|p| p.active)
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn used_pile(&self) -> &[CardInstanceId] {
        &self.used
    }

    /// Every card instance the table knows about.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Cards currently sitting in hands.
    #[must_use]
    pub fn cards_in_hands(&self) -> usize {
        self.players().map(|p| p.hand.len()).sum()
    }

    /// Put a deck card into a hand directly. Test setup only.
    #[doc(hidden)]
    pub fn deal_specific(&mut self, player: PlayerId, card: CardInstanceId) -> Result<(), EngineError> {
        let pos = self
            .deck
            .iter()
            .position(|&c| c == card)
            .ok_or(EngineError::MissingCard(card))?;
        self.deck.remove(pos);
        self.give(player, card)
    }

    /// Move the first deck card of `kind` to the top of the deck. Test setup only.
    #[doc(hidden)]
    pub fn stack_deck(&mut self, kind: CardKind) -> Option<CardInstanceId> {
        let pos = self
            .deck
            .iter()
            .position(|id| self.cards.get(id).is_some_and(|c| c.kind == kind))?;
        let card = self.deck.remove(pos);
        self.deck.push(card);
        Some(card)
    }

    /// First deck card of `kind`, if any.
    #[must_use]
    pub fn find_in_deck(&self, kind: CardKind) -> Option<CardInstanceId> {
        self.deck
            .iter()
            .copied()
            .find(|id| self.cards.get(id).is_some_and(|c| c.kind == kind))
    }
}
