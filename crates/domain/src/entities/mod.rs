//! Domain entities

mod display_list;
mod item;

pub use display_list::DisplayList;
pub use item::Item;
