pub mod toggle;
pub mod toggle_group;
