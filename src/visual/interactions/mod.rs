pub mod pointer;

pub use pointer::{DragState, Grab, handle_pointer_input};
