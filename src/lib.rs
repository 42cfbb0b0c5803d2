//! A draggable swipe card: it follows the pointer, tilts and fades as it is
//! dragged, and when let go either springs back with a two-pass rubber band
//! or leaves through the edge it was pulled past.
//!
//! [`card`] is the toolkit-independent core. [`visual`], [`input`] and
//! [`camera`] drive it from Bevy.

pub mod camera;
pub mod card;
pub mod input;
pub mod visual;

pub use card::{
    AllowedDirections, CardConfig, CardDelegate, CardError, CardEvent, CardFactory, CardState,
    CardView, Direction,
};
pub use visual::cards::{Card, CardLeft, CardOverlay, spawn_card};
pub use visual::plugin::CardPlugin;
