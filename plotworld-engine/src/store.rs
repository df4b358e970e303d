//! The plot record store collaborator.

use anyhow::Result;
use plotworld_core::{BlockId, Plot, PlotId};

pub mod memory;

/// Where plot records live.
///
/// The rule engine only ever reads records through this trait; ownership and
/// permission mutations happen elsewhere. Implementations back the records
/// with whatever persistence the host provides.
pub trait PlotStore {
    /// Tries to load the record for a plot.
    /// Returns `None` if nobody has claimed the plot yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store is unavailable. Callers treat
    /// that as "no plot" rather than propagating it into a game action.
    fn lookup(&self, id: PlotId) -> Result<Option<Plot>>;

    /// Starts refilling a plot's ground layer with the given material,
    /// placing at most `max_blocks_per_tick` blocks per world tick.
    /// Returns whether the fill was accepted.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store is unavailable.
    fn fill_plot(
        &mut self,
        plot: &Plot,
        block: BlockId,
        max_blocks_per_tick: u32,
    ) -> Result<bool>;

    /// Returns whether the named player may build on the plot besides the
    /// owner.
    fn is_helper(&self, plot: &Plot, name: &str) -> bool {
        plot.is_helper(name)
    }

    /// Returns whether the named player is barred from entering the plot.
    fn is_denied(&self, plot: &Plot, name: &str) -> bool {
        plot.is_denied(name)
    }
}
