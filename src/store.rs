use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use parse_display::Display;
use serde::{Serialize, Serializer};
use slabmap::SlabMap;
use tracing::debug;

use crate::{Item, ItemId, Subscription};

#[cfg(test)]
mod tests;

/// A mutation applied to a [`CartStore`], delivered to every subscriber.
#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// `item` was appended and now sits at `index`.
    #[display("added {item} at {index}")]
    Added { index: usize, item: Item },

    /// Every item with `id` was removed. `count` is `0` when none matched.
    #[display("removed {count} of {id}")]
    Removed { id: ItemId, count: usize },
}

type Subscriber = Rc<dyn Fn(&CartStore, &CartChange)>;

/// Similar to `Rc<RefCell<Vec<Item>>>`, but notifies subscribers after every mutation.
///
/// Cloning a `CartStore` clones the handle. All clones share the same items.
#[derive(Clone)]
pub struct CartStore(Rc<CartStoreNode>);

struct CartStoreNode {
    items: RefCell<Vec<Item>>,
    subscribers: RefCell<SlabMap<Subscriber>>,
}

impl CartStore {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self(Rc::new(CartStoreNode {
            items: RefCell::new(Vec::new()),
            subscribers: RefCell::new(SlabMap::new()),
        }))
    }

    /// Borrows the current items in insertion order.
    ///
    /// Panics if the cart is mutated while the returned reference is alive.
    pub fn items(&self) -> Ref<'_, [Item]> {
        Ref::map(self.0.items.borrow(), |items| items.as_slice())
    }

    /// Returns a copy of the current items.
    pub fn snapshot(&self) -> Vec<Item> {
        self.0.items.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.items.borrow().is_empty()
    }

    /// Appends `item` and notifies the subscribers.
    ///
    /// Items with an id already present in the cart are appended as well.
    pub fn add(&self, item: Item) {
        let index = {
            let mut items = self.0.items.borrow_mut();
            items.push(item.clone());
            items.len() - 1
        };
        debug!(id = %item.id(), name = item.name(), index, "cart item added");
        self.notify(&CartChange::Added { index, item });
    }

    /// Removes every item whose id is `id` and notifies the subscribers.
    ///
    /// The subscribers are notified even if no item matched.
    pub fn remove(&self, id: ItemId) {
        let (count, len) = {
            let mut items = self.0.items.borrow_mut();
            let old_len = items.len();
            items.retain(|item| item.id() != id);
            (old_len - items.len(), items.len())
        };
        debug!(%id, count, len, "cart items removed");
        self.notify(&CartChange::Removed { id, count });
    }

    /// Registers `f` to be called synchronously after every mutation.
    ///
    /// Subscribers are called in slot order. Slots are assigned in registration order,
    /// and the slot of a dropped subscriber is reused by the next registration.
    pub fn subscribe(&self, f: impl Fn(&CartStore, &CartChange) + 'static) -> Subscription {
        let key = self.0.subscribers.borrow_mut().insert(Rc::new(f));
        Subscription::from_weak_fn(Rc::downgrade(&self.0), move |node| {
            node.subscribers.borrow_mut().remove(key);
        })
    }

    /// Returns `true` if both handles refer to the same cart.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.0, &other.0)
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.0.subscribers.borrow().len()
    }

    fn notify(&self, change: &CartChange) {
        // Subscribers added or dropped by a callback take effect from the next mutation.
        let subscribers: Vec<Subscriber> = self
            .0
            .subscribers
            .borrow()
            .iter()
            .map(|(_, s)| s.clone())
            .collect();
        for subscriber in subscribers {
            subscriber(self, change);
        }
    }
}
impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}
impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.items.try_borrow() {
            Ok(items) => std::fmt::Debug::fmt(&*items, f),
            Err(_) => write!(f, "<borrowed>"),
        }
    }
}
impl Serialize for CartStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0.items.try_borrow() {
            Ok(items) => items.serialize(serializer),
            Err(_) => Err(serde::ser::Error::custom("borrowed")),
        }
    }
}
