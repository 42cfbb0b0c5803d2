use bevy::prelude::*;

use crate::card::{CardView, Direction};

/// A swipe card entity. Overlays are tinted sprites, one child per edge.
#[derive(Component, Debug)]
pub struct Card {
    pub view: CardView<Color>,
}

impl Card {
    pub fn new(view: CardView<Color>) -> Self {
        Card { view }
    }
}

/// Child sprite faded in while its card is dragged toward `0`
#[derive(Component, Debug, Clone, Copy)]
pub struct CardOverlay(pub Direction);

/// Message: a card finished leaving through an edge
#[derive(Message, Debug, Clone, Copy)]
pub struct CardLeft {
    pub entity: Entity,
    pub direction: Direction,
}
