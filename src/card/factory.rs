use super::config::CardConfig;
use super::direction::DirectionMap;
use super::error::CardError;
use super::view::CardView;
use bevy::math::Rect;
use std::sync::Arc;

/// Builds cards that share one rest frame, one overlay set and one config.
///
/// Configure the factory first, then create cards. Cards keep the frame,
/// overlays and config they were created with.
#[derive(Debug, Clone)]
pub struct CardFactory<O = ()> {
    frame: Option<Rect>,
    overlays: Arc<DirectionMap<Option<O>>>,
    config: Arc<CardConfig>,
}

impl<O> Default for CardFactory<O> {
    fn default() -> Self {
        CardFactory {
            frame: None,
            overlays: Arc::new(DirectionMap {
                left: None,
                right: None,
                up: None,
                down: None,
            }),
            config: Arc::new(CardConfig::default()),
        }
    }
}

impl<O> CardFactory<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rest frame every card from this factory sits in
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.set_frame(frame);
        self
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = Some(frame);
    }

    /// Overlays faded in while a card is dragged toward each edge.
    /// `None` leaves that edge without an overlay.
    pub fn with_overlays(
        mut self,
        left: Option<O>,
        right: Option<O>,
        up: Option<O>,
        down: Option<O>,
    ) -> Self {
        self.set_overlays(left, right, up, down);
        self
    }

    pub fn set_overlays(&mut self, left: Option<O>, right: Option<O>, up: Option<O>, down: Option<O>) {
        self.overlays = Arc::new(DirectionMap::new(left, right, up, down));
    }

    pub fn with_config(mut self, config: CardConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Create a card at rest.
    ///
    /// Fails with [`CardError::FrameNotSet`] until a frame has been given,
    /// and with [`CardError::InvalidConfig`] if the config doesn't validate.
    pub fn create(&self) -> Result<CardView<O>, CardError> {
        let frame = self.frame.ok_or(CardError::FrameNotSet)?;
        if frame.is_empty() {
            return Err(CardError::EmptyFrame);
        }
        self.config.validate()?;

        Ok(CardView::new(
            frame,
            Arc::clone(&self.overlays),
            Arc::clone(&self.config),
        ))
    }
}
