use std::fmt;

use parse_display::Display;

use crate::{CartStore, Item, ItemId};


/// A purchasable product.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
#[display("{id} {name}")]
pub struct CatalogEntry {
    pub id: ItemId,
    pub name: &'static str,
}

impl CatalogEntry {
    pub const fn new(id: i64, name: &'static str) -> Self {
        Self {
            id: ItemId(id),
            name,
        }
    }
    pub fn to_item(&self) -> Item {
        Item::new(self.id.0, self.name)
    }
}

pub const DEFAULT_CATALOG: &[CatalogEntry] = &[
    CatalogEntry::new(1, "Top"),
    CatalogEntry::new(2, "Dress"),
    CatalogEntry::new(3, "Rings"),
];

/// The product list.
///
/// Only issues `add` commands to the cart and never reads it.
pub struct ProductCatalog {
    store: CartStore,
    entries: &'static [CatalogEntry],
}

impl ProductCatalog {
    pub fn new(store: CartStore) -> Self {
        Self {
            store,
            entries: DEFAULT_CATALOG,
        }
    }

    pub fn entries(&self) -> &'static [CatalogEntry] {
        self.entries
    }

    /// Adds the entry shown at the 1-based `position` to the cart.
    ///
    /// Returns `None` without touching the cart if there is no such entry.
    pub fn add(&self, position: usize) -> Option<&'static CatalogEntry> {
        let entry = self.entries.get(position.checked_sub(1)?)?;
        self.add_entry(entry);
        Some(entry)
    }

    pub fn add_entry(&self, entry: &CatalogEntry) {
        self.store.add(entry.to_item());
    }
}

impl fmt::Display for ProductCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shopping")?;
        for (index, entry) in self.entries.iter().enumerate() {
            writeln!(f, "{}. {} [Add to Card]", index + 1, entry.name)?;
        }
        Ok(())
    }
}
