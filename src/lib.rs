mod cart_view;
mod catalog;
mod command;
mod item;
mod session;
mod store;
mod subscription;

pub use cart_view::*;
pub use catalog::*;
pub use command::*;
pub use item::*;
pub use session::*;
pub use store::*;
pub use subscription::*;
