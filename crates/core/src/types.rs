use serde::{Deserialize, Serialize};

/// A head or cell coordinate in grid units. Live coordinates are always a
/// multiple of the configured speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn offset(self, heading: Heading) -> Self {
        Self { x: self.x + heading.dx, y: self.y + heading.dy }
    }
}

pub(crate) fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Ray-cast order used by percepts: north, south, east, west.
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];

    pub fn heading(self, speed: i32) -> Heading {
        match self {
            Self::North => Heading { dx: 0, dy: speed },
            Self::South => Heading { dx: 0, dy: -speed },
            Self::East => Heading { dx: speed, dy: 0 },
            Self::West => Heading { dx: -speed, dy: 0 },
        }
    }
}

/// Axis-aligned unit vector scaled by speed. North is `+y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    pub dx: i32,
    pub dy: i32,
}

impl Heading {
    pub fn direction(self) -> Option<Direction> {
        match (self.dx.signum(), self.dy.signum()) {
            (0, 1) => Some(Direction::North),
            (0, -1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    #[default]
    Ongoing,
    RedWon,
    BlueWon,
    Tie,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self != Self::Ongoing
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            Self::RedWon => Some(Side::Red),
            Self::BlueWon => Some(Side::Blue),
            Self::Ongoing | Self::Tie => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Ran into the border frame, or off the playfield.
    Wall,
    /// Ran into a trail cell left by either agent.
    Trail,
    /// Both heads landed on the same open cell.
    HeadOn,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MatchEvent {
    Turned { tick: u64, side: Side, direction: Direction },
    MalformedDecision { tick: u64, side: Side, reason: String },
    Died { tick: u64, side: Side, cause: DeathCause, pos: Pos },
    Finished { tick: u64, state: GameState },
    Aborted { tick: u64 },
}
