//! Bridges the grid geometry to plot identity and ownership.

use log::warn;
use plotworld_core::{Plot, PlotGrid, PlotId};

use crate::store::PlotStore;

/// Answers "which plot owns this position" and "which plot does this position
/// border on" for one world, by combining the pure grid partition with the
/// injected [`PlotStore`].
pub struct PlotResolver {
    grid: PlotGrid,
    store: Box<dyn PlotStore>,
}

impl PlotResolver {
    /// Creates a resolver over the given grid and record store.
    #[must_use]
    pub fn new(grid: PlotGrid, store: Box<dyn PlotStore>) -> Self {
        Self { grid, store }
    }

    /// The partition this resolver works on.
    #[must_use]
    pub const fn grid(&self) -> &PlotGrid {
        &self.grid
    }

    /// Mutable access to the record store, for operations like the plot fill.
    pub fn store_mut(&mut self) -> &mut dyn PlotStore {
        &mut *self.store
    }

    /// Returns the plot whose interior contains `(x, z)`.
    ///
    /// `None` means the position is road or wall space. A plot nobody has
    /// claimed yet is returned as a transient unclaimed record, so callers
    /// can tell "not a plot" and "unclaimed plot" apart.
    #[must_use]
    pub fn plot_at_position(&self, x: i64, z: i64) -> Option<Plot> {
        self.resolve(self.grid.plot_id_at(x, z)?)
    }

    /// Returns the plot a road/wall position is directly adjacent to, under
    /// the same unclaimed-vs-absent contract as [`Self::plot_at_position`].
    #[must_use]
    pub fn plot_bordering_position(&self, x: i64, z: i64) -> Option<Plot> {
        self.resolve(self.grid.bordering_plot_id(x, z)?)
    }

    /// Returns whether the position is road/wall space adjacent to a plot.
    #[must_use]
    pub fn is_position_bordering_plot(&self, x: i64, z: i64) -> bool {
        self.grid.is_bordering_plot(x, z)
    }

    /// Looks a plot id up in the store, degrading store failures to "no
    /// plot". Denying a privileged action is the safe direction when records
    /// are unavailable.
    fn resolve(&self, id: PlotId) -> Option<Plot> {
        match self.store.lookup(id) {
            Ok(Some(plot)) => Some(plot),
            Ok(None) => Some(Plot::unclaimed(id)),
            Err(error) => {
                warn!("plot store lookup for {id} failed: {error}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use anyhow::{Result, bail};
    use plotworld_core::BlockId;

    fn resolver_with(plots: &[Plot]) -> PlotResolver {
        let mut store = MemoryStore::new();
        for plot in plots {
            store.insert(plot.clone());
        }
        PlotResolver::new(PlotGrid::new(32, 7), Box::new(store))
    }

    fn owned(x: i64, z: i64, owner: &str) -> Plot {
        Plot {
            owner: owner.to_string().into(),
            ..Plot::unclaimed(PlotId { x, z })
        }
    }

    #[test]
    fn positions_resolve_to_claimed_records() {
        let resolver = resolver_with(&[owned(0, 0, "alex")]);
        let plot = resolver.plot_at_position(10, 10).expect("plot cell");
        assert!(plot.is_owner("alex"));
    }

    #[test]
    fn unclaimed_plots_differ_from_absent_ones() {
        let resolver = resolver_with(&[]);
        // inside a plot cell: a transient unclaimed record
        let plot = resolver.plot_at_position(10, 10).expect("plot cell");
        assert!(!plot.is_claimed());
        assert_eq!(PlotId { x: 0, z: 0 }, plot.id);
        // on the road: no plot at all
        assert_eq!(None, resolver.plot_at_position(34, 10));
    }

    #[test]
    fn bordering_positions_resolve_to_the_neighbour() {
        let resolver = resolver_with(&[owned(0, 0, "alex")]);
        assert!(resolver.is_position_bordering_plot(32, 10));
        let plot = resolver.plot_bordering_position(32, 10).expect("bordering");
        assert!(plot.is_owner("alex"));
        assert_eq!(None, resolver.plot_bordering_position(35, 10));
        assert_eq!(None, resolver.plot_bordering_position(10, 10));
    }

    struct BrokenStore;

    impl PlotStore for BrokenStore {
        fn lookup(&self, _id: PlotId) -> Result<Option<Plot>> {
            bail!("store offline");
        }

        fn fill_plot(&mut self, _plot: &Plot, _block: BlockId, _max: u32) -> Result<bool> {
            bail!("store offline");
        }
    }

    #[test]
    fn store_failures_degrade_to_no_plot() {
        let resolver = PlotResolver::new(PlotGrid::new(32, 7), Box::new(BrokenStore));
        assert_eq!(None, resolver.plot_at_position(10, 10));
        assert_eq!(None, resolver.plot_bordering_position(32, 10));
    }
}
