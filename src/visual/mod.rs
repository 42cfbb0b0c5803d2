pub mod cards;
pub mod interactions;
pub mod plugin;
