//! Item catalog: templates, kinds and equip locations

mod item;

pub use item::{Item, ItemId, ObjType, WieldLocation, EMPTY_HANDS_DAMAGE};
