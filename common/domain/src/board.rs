use derived_deref::Deref;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Position;

/// Side length of every board handed out by the server
pub const BOARD_SIZE: usize = 5;

/// Question category assigned to a board cell, one of `1..=3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TileKind(u8);

impl TileKind {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    pub fn new(kind: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&kind).then_some(Self(kind))
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(Self::MIN..=Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for TileKind {
    type Error = String;

    fn try_from(kind: u8) -> Result<Self, Self::Error> {
        Self::new(kind).ok_or_else(|| {
            format!(
                "tile kind {kind} is outside {}..={}",
                Self::MIN,
                Self::MAX
            )
        })
    }
}

impl From<TileKind> for u8 {
    fn from(kind: TileKind) -> Self {
        kind.0
    }
}

/// Square grid of tile kinds, indexed `[row][col]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Deref)]
#[serde(transparent)]
pub struct Board(Vec<Vec<TileKind>>);

impl Board {
    /// Every cell drawn independently and uniformly from the tile kinds
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        Self(
            (0..size)
                .map(|_| (0..size).map(|_| TileKind::random(rng)).collect())
                .collect(),
        )
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.is_within(self.size())
    }
}
