//! Card catalog: what goes into the deck and how it is presented.
//!
//! The catalog is consulted once, when a game builds its deck. Each entry
//! names a `CardKind`, its decorative fields, and how many copies a table
//! of a given size gets. The catalog also supplies the message templates
//! the attack engine renders.
//!
//! `StandardCatalog` is the built-in set; servers with their own card data
//! implement `CardCatalog` over it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::capability::DisasterKind;
use super::kind::{CardKind, Forage, MapSide};
use crate::messages::TemplateBook;

/// Copies of an entry for a given table size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Multiplicity {
    /// Same count at every table size.
    Fixed(u32),
    /// `base + per_player * player_count`.
    Scaled { base: u32, per_player: u32 },
    /// Indexed by player count; sizes past the end use the last value.
    ByPlayerCount(Vec<u32>),
}

impl Multiplicity {
    /// Copies for a table of `player_count` seats.
    #[must_use]
    pub fn count(&self, player_count: usize) -> usize {
        match self {
            Multiplicity::Fixed(n) => *n as usize,
            Multiplicity::Scaled { base, per_player } => {
                *base as usize + *per_player as usize * player_count
            }
            Multiplicity::ByPlayerCount(table) => table
                .get(player_count)
                .or_else(|| table.last())
                .copied()
                .unwrap_or(0) as usize,
        }
    }
}

/// One catalog line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub kind: CardKind,
    pub name: String,
    pub image: String,
    pub multiplicity: Multiplicity,
}

impl CatalogEntry {
    /// Entry using the kind's default name and a derived image path.
    #[must_use]
    pub fn new(kind: CardKind, multiplicity: Multiplicity) -> Self {
        let name = kind.default_name().to_string();
        let image = format!("cards/{}.png", name.to_lowercase().replace(' ', "_"));
        Self {
            kind,
            name,
            image,
            multiplicity,
        }
    }

    /// Override the display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// Source of card data for deck construction.
pub trait CardCatalog {
    /// All entries, in deck-building order.
    fn entries(&self) -> Vec<CatalogEntry>;

    /// Message templates for every attack kind.
    fn templates(&self) -> TemplateBook;

    /// Entry for a kind, if the catalog has one.
    fn entry(&self, kind: CardKind) -> Option<CatalogEntry> {
        self.entries().into_iter().find(|e| e.kind == kind)
    }
}

/// The built-in catalog.
///
/// ```
/// use wildtrail::cards::{CardCatalog, CardKind, StandardCatalog};
///
/// let catalog = StandardCatalog::new();
/// let tree = catalog.entry(CardKind::Tree).unwrap();
/// assert_eq!(tree.name, "Tree");
/// ```
#[derive(Clone, Debug)]
pub struct StandardCatalog {
    entries: Vec<CatalogEntry>,
    index: FxHashMap<CardKind, usize>,
    templates: TemplateBook,
}

impl Default for StandardCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardCatalog {
    /// Build the standard card set.
    #[must_use]
    pub fn new() -> Self {
        use Multiplicity::{ByPlayerCount, Fixed, Scaled};

        let mut catalog = Self::empty(TemplateBook::standard());

        for forage in Forage::ALL {
            catalog.register(CatalogEntry::new(
                CardKind::Forage(forage),
                Scaled { base: 2, per_player: 1 },
            ));
        }
        catalog.register(CatalogEntry::new(CardKind::Steal, Scaled { base: 1, per_player: 1 }));
        catalog.register(CatalogEntry::new(CardKind::Rock, Scaled { base: 1, per_player: 1 }));
        catalog.register(CatalogEntry::new(CardKind::River, Fixed(3)));
        catalog.register(CatalogEntry::new(CardKind::Tree, Fixed(2)));
        catalog.register(CatalogEntry::new(CardKind::Guard, Scaled { base: 1, per_player: 1 }));
        catalog.register(CatalogEntry::new(CardKind::Rope, Scaled { base: 0, per_player: 1 }));
        catalog.register(CatalogEntry::new(CardKind::Shelter, Fixed(2)));
        catalog.register(CatalogEntry::new(CardKind::MapHalf(MapSide::West), Fixed(1)));
        catalog.register(CatalogEntry::new(CardKind::MapHalf(MapSide::East), Fixed(1)));
        catalog.register(CatalogEntry::new(CardKind::Flint, Fixed(2)));
        catalog.register(CatalogEntry::new(CardKind::Tinder, Fixed(2)));
        catalog.register(CatalogEntry::new(CardKind::Lifeline, Scaled { base: 0, per_player: 1 }));

        // player_count - 1 disasters in total, spread over the three kinds
        catalog.register(CatalogEntry::new(
            CardKind::Disaster(DisasterKind::Pit),
            ByPlayerCount(vec![0, 0, 1, 1, 1, 2, 2, 2, 3]),
        ));
        catalog.register(CatalogEntry::new(
            CardKind::Disaster(DisasterKind::Cliff),
            ByPlayerCount(vec![0, 0, 0, 1, 1, 1, 2, 2, 2]),
        ));
        catalog.register(CatalogEntry::new(
            CardKind::Disaster(DisasterKind::Avalanche),
            ByPlayerCount(vec![0, 0, 0, 0, 1, 1, 1, 2, 2]),
        ));

        catalog
    }

    /// Catalog with no entries, for servers assembling their own set.
    #[must_use]
    pub fn empty(templates: TemplateBook) -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
            templates,
        }
    }

    /// Add an entry.
    ///
    /// Panics if the kind is already registered.
    pub fn register(&mut self, entry: CatalogEntry) {
        if self.index.contains_key(&entry.kind) {
            panic!("Card kind {:?} already registered", entry.kind);
        }
        self.index.insert(entry.kind, self.entries.len());
        self.entries.push(entry);
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total deck size for a table.
    #[must_use]
    pub fn deck_size(&self, player_count: usize) -> usize {
        self.entries
            .iter()
            .map(|e| e.multiplicity.count(player_count))
            .sum()
    }
}

impl CardCatalog for StandardCatalog {
    fn entries(&self) -> Vec<CatalogEntry> {
        self.entries.clone()
    }

    fn templates(&self) -> TemplateBook {
        self.templates.clone()
    }

    fn entry(&self, kind: CardKind) -> Option<CatalogEntry> {
        self.index.get(&kind).map(|&i| self.entries[i].clone())
    }
}
