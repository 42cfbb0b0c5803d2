use bevy::math::Vec2;
use std::fmt;

/// The four edges a card can be dragged toward.
///
/// World coordinates are y-up: `Up` is `+y`, `Right` is `+x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    /// +1.0 for `Right`/`Up`, -1.0 for `Left`/`Down`
    pub fn sign(self) -> f32 {
        match self {
            Direction::Right | Direction::Up => 1.0,
            Direction::Left | Direction::Down => -1.0,
        }
    }

    pub fn unit(self) -> Vec2 {
        match self.axis() {
            Axis::Horizontal => Vec2::new(self.sign(), 0.0),
            Axis::Vertical => Vec2::new(0.0, self.sign()),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Direction an offset component points toward, `None` at zero
    pub fn from_component(axis: Axis, value: f32) -> Option<Direction> {
        if value == 0.0 {
            return None;
        }
        Some(match (axis, value > 0.0) {
            (Axis::Horizontal, true) => Direction::Right,
            (Axis::Horizontal, false) => Direction::Left,
            (Axis::Vertical, true) => Direction::Up,
            (Axis::Vertical, false) => Direction::Down,
        })
    }
}

impl Axis {
    /// Pick this axis' component out of a vector
    pub fn component(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        write!(f, "{}", name)
    }
}

/// One value per direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionMap<T> {
    pub left: T,
    pub right: T,
    pub up: T,
    pub down: T,
}

impl<T> DirectionMap<T> {
    pub fn new(left: T, right: T, up: T, down: T) -> Self {
        DirectionMap {
            left,
            right,
            up,
            down,
        }
    }

    pub fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        }
    }

    pub fn get_mut(&mut self, direction: Direction) -> &mut T {
        match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Direction, &T) -> U) -> DirectionMap<U> {
        DirectionMap {
            left: f(Direction::Left, &self.left),
            right: f(Direction::Right, &self.right),
            up: f(Direction::Up, &self.up),
            down: f(Direction::Down, &self.down),
        }
    }
}

impl<T: Clone> DirectionMap<T> {
    pub fn splat(value: T) -> Self {
        DirectionMap {
            left: value.clone(),
            right: value.clone(),
            up: value.clone(),
            down: value,
        }
    }
}

/// Per-card allow flags. A `false` flag suppresses both leaving through
/// that edge and the visual feedback for dragging toward it.
pub type AllowedDirections = DirectionMap<bool>;

impl AllowedDirections {
    pub fn all() -> Self {
        DirectionMap::splat(true)
    }

    pub fn allows(&self, direction: Direction) -> bool {
        *self.get(direction)
    }

    /// Zero out offset components that point into a disallowed direction
    pub fn mask(&self, offset: Vec2) -> Vec2 {
        let mut masked = offset;
        if (masked.x < 0.0 && !self.left) || (masked.x > 0.0 && !self.right) {
            masked.x = 0.0;
        }
        if (masked.y > 0.0 && !self.up) || (masked.y < 0.0 && !self.down) {
            masked.y = 0.0;
        }
        masked
    }
}
