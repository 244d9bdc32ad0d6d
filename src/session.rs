use std::fmt;

use tracing::info;

use crate::{CartStore, CartView, Command, CommandError, ProductCatalog, Reply, View};


/// One run of the shop, from composition to teardown.
///
/// Owns the only [`CartStore`] of the session and hands a handle of it to both views.
pub struct Session {
    store: CartStore,
    catalog: ProductCatalog,
    cart: CartView,
}

impl Session {
    pub fn new() -> Self {
        let store = CartStore::new();
        let catalog = ProductCatalog::new(store.clone());
        let cart = CartView::new(store.clone());
        info!("session started");
        Self {
            store,
            catalog,
            cart,
        }
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartView {
        &self.cart
    }

    /// Applies one user interaction.
    ///
    /// The views reflect an `add` or `remove` before this returns.
    pub fn dispatch(&self, command: Command) -> Result<Reply, CommandError> {
        match command {
            Command::Add(position) => self
                .catalog
                .add(position)
                .map(|entry| Reply::Added(*entry))
                .ok_or(CommandError::UnknownPosition {
                    view: View::Catalog,
                    position,
                }),
            Command::Remove(position) => self
                .cart
                .remove(position)
                .map(Reply::Removed)
                .ok_or(CommandError::UnknownPosition {
                    view: View::Cart,
                    position,
                }),
            Command::Show => Ok(Reply::Render(self.to_string())),
            Command::Json => Ok(Reply::Json(serde_json::to_string_pretty(&self.store)?)),
            Command::Help => Ok(Reply::Help),
            Command::Quit => Ok(Reply::Quit),
        }
    }
}
impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Context api")?;
        writeln!(f)?;
        write!(f, "{}", self.catalog)?;
        writeln!(f, "---")?;
        write!(f, "{}", self.cart)
    }
}
