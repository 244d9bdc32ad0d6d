use std::rc::Rc;

use parse_display::Display;
use serde::{Deserialize, Serialize};


/// Identifier of a product or cart entry.
///
/// Several items in a cart may share the same id.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[display("{0}")]
#[serde(transparent)]
pub struct ItemId(pub i64);

/// An immutable `{id, name}` record.
#[derive(Display, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display("{id} {name}")]
pub struct Item {
    id: ItemId,
    name: Rc<str>,
}

impl Item {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
        }
    }
    pub fn id(&self) -> ItemId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}
