//! Holds the block id type

use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Identifies the _material_ a world column layer is made of.
///
/// The partition core doesn't interpret these values; they are opaque handles
/// into whatever block catalogue the host platform provides. The textual form
/// is `id` or `id:meta`, with the meta value omitted when it is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockId {
    /// numeric id of the block material
    pub id: u16,
    /// material sub-variant (damage value in legacy catalogues)
    pub meta: u8,
}

impl BlockId {
    /// The material through which players can walk. Unset layers of a
    /// generated chunk consist of this.
    pub const AIR: Self = Self::new(0, 0);

    /// Default plot floor material
    pub const GRASS: Self = Self::new(2, 0);

    /// Default plot fill material
    pub const DIRT: Self = Self::new(3, 0);

    /// Default road surface material
    pub const PLANKS: Self = Self::new(5, 0);

    /// Default world floor material
    pub const BEDROCK: Self = Self::new(7, 0);

    /// Default wall top material
    pub const STONE_SLAB: Self = Self::new(44, 0);

    /// Creates a block id from its numeric parts.
    #[must_use]
    pub const fn new(id: u16, meta: u8) -> Self {
        Self { id, meta }
    }

    /// Returns whether this is the air material.
    #[must_use]
    pub const fn is_air(self) -> bool {
        self.id == Self::AIR.id
    }
}

impl Display for BlockId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.meta == 0 {
            write!(formatter, "{id}", id = self.id)
        } else {
            write!(formatter, "{id}:{meta}", id = self.id, meta = self.meta)
        }
    }
}

/// The reasons a textual block id may fail to parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockIdError {
    /// the id part before the `:` was not a valid `u16`
    #[error("invalid block id: {0}")]
    Id(ParseIntError),
    /// the meta part after the `:` was not a valid `u8`
    #[error("invalid block meta: {0}")]
    Meta(ParseIntError),
}

impl FromStr for BlockId {
    type Err = BlockIdError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let (id, meta) = match source.split_once(':') {
            Some((id, meta)) => (id, meta.parse().map_err(BlockIdError::Meta)?),
            None => (source, 0),
        };
        let id = id.parse().map_err(BlockIdError::Id)?;
        Ok(Self { id, meta })
    }
}
