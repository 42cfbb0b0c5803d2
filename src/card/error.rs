use std::fmt;

/// Errors raised while building a card
#[derive(Debug, Clone, PartialEq)]
pub enum CardError {
    /// The factory was asked for a card before its rest frame was set
    FrameNotSet,
    /// The rest frame has no area
    EmptyFrame,
    InvalidConfig(ConfigError),
}

/// Errors raised while loading or validating a [`CardConfig`](super::CardConfig)
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    OutOfRange { field: &'static str, value: f32 },
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardError::FrameNotSet => {
                write!(f, "No frame specified: set the card frame before creating cards")
            }
            CardError::EmptyFrame => write!(f, "Card frame must have a non-zero size"),
            CardError::InvalidConfig(err) => write!(f, "Invalid card config: {}", err),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Failed to read card config: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Failed to parse card config: {}", msg),
            ConfigError::OutOfRange { field, value } => {
                write!(f, "Config field `{}` is out of range: {}", field, value)
            }
        }
    }
}

impl std::error::Error for CardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CardError::FrameNotSet | CardError::EmptyFrame => None,
            CardError::InvalidConfig(err) => Some(err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for CardError {
    fn from(err: ConfigError) -> Self {
        CardError::InvalidConfig(err)
    }
}
