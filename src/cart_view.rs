use std::{cell::RefCell, fmt, rc::Rc};

use parse_display::Display;
use tracing::trace;

use crate::{CartStore, Item, Subscription};


/// One displayed line of the cart. `position` starts at 1.
#[derive(Display, Debug, Clone, PartialEq, Eq)]
#[display("{position}. {item}")]
pub struct CartRow {
    pub position: usize,
    pub item: Item,
}

/// The cart list.
///
/// Rebuilds its rows from the store every time the store notifies a change.
pub struct CartView {
    store: CartStore,
    state: Rc<RefCell<ViewState>>,
    _subscription: Subscription,
}

#[derive(Default)]
struct ViewState {
    rows: Vec<CartRow>,
    renders: usize,
}
impl ViewState {
    fn render(&mut self, store: &CartStore) {
        self.rows = store
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| CartRow {
                position: index + 1,
                item: item.clone(),
            })
            .collect();
        self.renders += 1;
        trace!(rows = self.rows.len(), renders = self.renders, "cart view rendered");
    }
}

impl CartView {
    pub fn new(store: CartStore) -> Self {
        let state = Rc::new(RefCell::new(ViewState::default()));
        state.borrow_mut().render(&store);
        let state0 = state.clone();
        let subscription = store.subscribe(move |store, _| state0.borrow_mut().render(store));
        Self {
            store,
            state,
            _subscription: subscription,
        }
    }

    pub fn rows(&self) -> Vec<CartRow> {
        self.state.borrow().rows.clone()
    }

    /// Number of times the rows have been rebuilt, including the initial build.
    pub fn renders(&self) -> usize {
        self.state.borrow().renders
    }

    /// Removes the item shown at the 1-based `position` from the cart.
    ///
    /// Every item sharing its id is removed too. Returns `None` without touching the
    /// cart if there is no such row.
    pub fn remove(&self, position: usize) -> Option<Item> {
        let item = self
            .state
            .borrow()
            .rows
            .get(position.checked_sub(1)?)?
            .item
            .clone();
        self.store.remove(item.id());
        Some(item)
    }
}

impl fmt::Display for CartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Card")?;
        for row in &self.state.borrow().rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
