use std::collections::HashMap;

use anyhow::Result;
use plotworld_core::{BlockId, Plot, PlotId};

use super::PlotStore;

/// A plot store keeping all records in a hash map.
///
/// This is useful for temporary throwaway worlds and for rule engine tests.
#[derive(Default)]
pub struct MemoryStore {
    plots: HashMap<PlotId, Plot>,
    fills: Vec<(PlotId, BlockId)>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a plot record.
    pub fn insert(&mut self, plot: Plot) {
        self.plots.insert(plot.id, plot);
    }

    /// The fills accepted so far, in order.
    #[must_use]
    pub fn fills(&self) -> &[(PlotId, BlockId)] {
        &self.fills
    }
}

impl PlotStore for MemoryStore {
    fn lookup(&self, id: PlotId) -> Result<Option<Plot>> {
        Ok(self.plots.get(&id).cloned())
    }

    fn fill_plot(
        &mut self,
        plot: &Plot,
        block: BlockId,
        _max_blocks_per_tick: u32,
    ) -> Result<bool> {
        self.fills.push((plot.id, block));
        Ok(true)
    }
}
