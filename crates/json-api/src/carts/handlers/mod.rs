//! Cart Handlers

pub(crate) mod add_item;
pub(crate) mod all;
pub(crate) mod clear;
pub(crate) mod item_total;
pub(crate) mod items;
pub(crate) mod modify_item;
pub(crate) mod replace;
pub(crate) mod value_total;
