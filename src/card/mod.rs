pub mod animation;
pub mod config;
pub mod delegate;
pub mod direction;
pub mod easing;
pub mod edge;
pub mod error;
pub mod factory;
pub mod gesture;
pub mod view;
pub mod visuals;

pub use animation::{Animation, AnimationFrame, Fade, Segment};
pub use config::CardConfig;
pub use delegate::{CardDelegate, DelegateHandle};
pub use direction::{AllowedDirections, Axis, Direction, DirectionMap};
pub use edge::{Release, evaluate_release};
pub use error::{CardError, ConfigError};
pub use factory::CardFactory;
pub use gesture::{GestureRelease, GestureTracker};
pub use view::{CardEvent, CardState, CardView};
pub use visuals::{CardVisuals, VisualMapper};
