//! Buying, selling, and equipping items.

mod buy_item;
mod error;
mod inventory;
mod sell_item;
mod take_off;
mod take_on;

#[cfg(test)]
mod tests;

pub use buy_item::BuyItem;
pub use error::EconomyError;
pub use inventory::ListInventory;
pub use sell_item::SellItem;
pub use take_off::TakeOffItem;
pub use take_on::TakeOnItem;
