//! Contains the plot identity and the claimable plot record.

use std::collections::HashSet;
use std::fmt::{self, Display};

use flexstr::SharedStr;

/// The name that, when present in a helper or deny list, matches every player.
pub const WILDCARD_NAME: &str = "*";

/// Identifies one cell of the plot grid by its signed grid indices.
///
/// Ids are derived from world coordinates and never stored independently of a
/// [`Plot`] record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlotId {
    /// plot grid index along the x axis
    pub x: i64,
    /// plot grid index along the z axis
    pub z: i64,
}

impl Display for PlotId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({x};{z})", x = self.x, z = self.z)
    }
}

/// One claimable grid cell of the land partition together with its ownership
/// and permission state.
///
/// A record with an empty `owner` represents the unclaimed state. Such a
/// record exists so that callers can distinguish "this position is not a plot"
/// from "this plot has no owner yet"; it must never satisfy any ownership
/// check.
#[derive(Clone, Debug, PartialEq)]
pub struct Plot {
    /// grid cell this record describes
    pub id: PlotId,
    /// name of the owning player; empty while unclaimed
    pub owner: SharedStr,
    /// players allowed to build here besides the owner
    pub helpers: HashSet<SharedStr>,
    /// players barred from entering; may contain [`WILDCARD_NAME`]
    pub denied: HashSet<SharedStr>,
    /// asking price; a claimed plot with a positive price is for sale
    pub price: f64,
    /// whether combat between players is allowed inside this plot
    pub pvp: bool,
    /// the ids this plot forms one logical unit with, if it has been merged
    pub merged_group: Option<HashSet<PlotId>>,
    /// marks the record the host reserves for the world-origin/spawn road
    /// plot; enter/leave notifications are suppressed for it
    pub reserved_origin: bool,
}

impl Plot {
    /// Creates the transient record for a grid cell nobody has claimed yet.
    #[must_use]
    pub fn unclaimed(id: PlotId) -> Self {
        Self {
            id,
            owner: SharedStr::empty(),
            helpers: HashSet::new(),
            denied: HashSet::new(),
            price: 0.0,
            pvp: false,
            merged_group: None,
            reserved_origin: false,
        }
    }

    /// Returns whether any player has claimed this plot.
    #[must_use]
    pub fn is_claimed(&self) -> bool {
        !self.owner.is_empty()
    }

    /// Returns whether the named player owns this plot.
    ///
    /// Always false for an unclaimed record; the empty sentinel owner is not
    /// owner-equivalent to anybody.
    #[must_use]
    pub fn is_owner(&self, name: &str) -> bool {
        self.is_claimed() && self.owner == name
    }

    /// Returns whether the named player is on the helper list, either by name
    /// or through the wildcard entry.
    #[must_use]
    pub fn is_helper(&self, name: &str) -> bool {
        self.helpers
            .iter()
            .any(|helper| helper == WILDCARD_NAME || helper == name)
    }

    /// Returns whether the named player is on the deny list, either by name
    /// or through the wildcard entry.
    #[must_use]
    pub fn is_denied(&self, name: &str) -> bool {
        self.denied
            .iter()
            .any(|denied| denied == WILDCARD_NAME || denied == name)
    }

    /// Returns whether two records describe the same logical plot.
    ///
    /// Merged plots act as one unit for boundary crossing, spread and
    /// explosion checks, so membership of either record's merged group counts
    /// as equality.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.id == other.id
            || self
                .merged_group
                .as_ref()
                .is_some_and(|group| group.contains(&other.id))
            || other
                .merged_group
                .as_ref()
                .is_some_and(|group| group.contains(&self.id))
    }
}

impl Display for Plot {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.id.fmt(formatter)
    }
}
