//! Contains the deterministic partition of the world plane into plots, roads
//! and walls.

use crate::plot::PlotId;

/// The classification of a single world column within the repeating grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// inside a plot's interior
    Plot,
    /// on the road band between plots
    Road,
    /// on the wall ring immediately enclosing a plot
    Wall,
}

impl CellKind {
    /// Returns whether this cell belongs to a plot interior.
    #[must_use]
    pub const fn is_plot(self) -> bool {
        matches!(self, Self::Plot)
    }
}

/// The repeating plot grid, parameterized by the plot interior side length and
/// the width of the road band separating two plot interiors.
///
/// Classification is a pure function of `(x, z, plot_size, road_width)`; the
/// grid holds no other state and is freely shareable across threads.
///
/// The grid period is `plot_size + road_width` and must stay constant for a
/// world's lifetime. Changing either parameter moves every plot boundary, so
/// such a change has to be treated as a migration to a distinct world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlotGrid {
    plot_size: i64,
    road_width: i64,
}

/// The four cardinal neighbour offsets of a column, in the fixed priority
/// order used to resolve bordering-plot ties: north, south, east, west.
const NEIGHBOUR_OFFSETS: [(i64, i64); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

impl PlotGrid {
    /// Creates a grid for the given plot interior size and road width.
    ///
    /// Both parameters are forced to at least `1`; a degenerate value would
    /// collapse the grid period and with it every boundary computation.
    #[must_use]
    pub const fn new(plot_size: i64, road_width: i64) -> Self {
        Self {
            plot_size: if plot_size < 1 { 1 } else { plot_size },
            road_width: if road_width < 1 { 1 } else { road_width },
        }
    }

    /// Side length of a plot's interior.
    #[must_use]
    pub const fn plot_size(&self) -> i64 {
        self.plot_size
    }

    /// Width of the band (wall ring plus road) separating two plot interiors.
    #[must_use]
    pub const fn road_width(&self) -> i64 {
        self.road_width
    }

    /// The period of the repeating pattern on both axes.
    #[must_use]
    pub const fn total_size(&self) -> i64 {
        self.plot_size + self.road_width
    }

    /// Classifies a single axis coordinate within the repeating pattern.
    ///
    /// `rem_euclid` performs the floor modulo; negative coordinates wrap into
    /// `[0, total_size)` instead of mirroring around zero.
    fn classify_axis(&self, value: i64) -> CellKind {
        let normalized = value.rem_euclid(self.total_size());
        if normalized < self.plot_size {
            CellKind::Plot
        } else if normalized == self.plot_size || normalized == self.total_size() - 1 {
            CellKind::Wall
        } else {
            CellKind::Road
        }
    }

    /// Classifies the world column at `(x, z)`.
    ///
    /// Per-axis classifications combine as follows: agreeing axes keep their
    /// kind, a `Plot` axis defers to the other axis, and a `Road`/`Wall`
    /// disagreement yields `Road`. The deferral is what draws the road/wall
    /// cross pattern at plot edges and keeps the wall ring closed around each
    /// corner.
    #[must_use]
    pub fn classify(&self, x: i64, z: i64) -> CellKind {
        match (self.classify_axis(x), self.classify_axis(z)) {
            (kind_x, kind_z) if kind_x == kind_z => kind_x,
            (CellKind::Plot, kind_z) => kind_z,
            (kind_x, CellKind::Plot) => kind_x,
            _ => CellKind::Road,
        }
    }

    /// Returns the grid index of the plot containing `(x, z)`, or `None` when
    /// the column is road or wall space.
    ///
    /// Callers that already know the classification may still use this as the
    /// single source of the floor division.
    #[must_use]
    pub fn plot_id_at(&self, x: i64, z: i64) -> Option<PlotId> {
        self.classify(x, z).is_plot().then(|| PlotId {
            x: x.div_euclid(self.total_size()),
            z: z.div_euclid(self.total_size()),
        })
    }

    /// Returns the minimum world coordinate of the plot's interior.
    #[must_use]
    pub const fn plot_origin(&self, id: PlotId) -> (i64, i64) {
        (id.x * self.total_size(), id.z * self.total_size())
    }

    /// Returns the bounding box of the plot's interior.
    #[must_use]
    pub const fn plot_bounds(&self, id: PlotId) -> PlotBounds {
        let (min_x, min_z) = self.plot_origin(id);
        PlotBounds {
            min_x,
            min_z,
            max_x: min_x + self.plot_size,
            max_z: min_z + self.plot_size,
        }
    }

    /// Returns whether the column at `(x, z)` is road or wall space directly
    /// adjacent to a plot interior.
    #[must_use]
    pub fn is_bordering_plot(&self, x: i64, z: i64) -> bool {
        self.bordering_plot_id(x, z).is_some()
    }

    /// Returns the id of the plot a road/wall column borders on, or `None`
    /// when the column is itself a plot cell or has no plot neighbour.
    ///
    /// When several neighbours are plots (wall corners), the first match in
    /// north, south, east, west order wins.
    #[must_use]
    pub fn bordering_plot_id(&self, x: i64, z: i64) -> Option<PlotId> {
        if self.classify(x, z).is_plot() {
            return None;
        }
        NEIGHBOUR_OFFSETS
            .iter()
            .find_map(|&(dx, dz)| self.plot_id_at(x + dx, z + dz))
    }
}

/// The half-open bounding box of a plot interior on the world plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlotBounds {
    /// minimum contained x coordinate
    pub min_x: i64,
    /// minimum contained z coordinate
    pub min_z: i64,
    /// first x coordinate beyond the interior
    pub max_x: i64,
    /// first z coordinate beyond the interior
    pub max_z: i64,
}

impl PlotBounds {
    /// Returns whether the column at `(x, z)` lies within these bounds,
    /// ignoring the vertical axis.
    #[must_use]
    pub const fn contains_column(&self, x: i64, z: i64) -> bool {
        x >= self.min_x && z >= self.min_z && x < self.max_x && z < self.max_z
    }

    /// Returns the same box shrunk by `margin` on all four sides.
    #[must_use]
    pub const fn shrunk_by(&self, margin: i64) -> Self {
        Self {
            min_x: self.min_x + margin,
            min_z: self.min_z + margin,
            max_x: self.max_x - margin,
            max_z: self.max_z - margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: PlotGrid = PlotGrid::new(32, 7);

    #[test]
    fn classify_reference_pattern() {
        // one period along the x axis at a plot row (z = 0)
        assert_eq!(CellKind::Plot, GRID.classify(0, 0));
        assert_eq!(CellKind::Plot, GRID.classify(16, 16));
        assert_eq!(CellKind::Plot, GRID.classify(31, 0));
        assert_eq!(CellKind::Wall, GRID.classify(32, 0));
        assert_eq!(CellKind::Road, GRID.classify(33, 0));
        assert_eq!(CellKind::Road, GRID.classify(37, 0));
        assert_eq!(CellKind::Wall, GRID.classify(38, 0));
        assert_eq!(CellKind::Plot, GRID.classify(39, 0));
    }

    #[test]
    fn classify_combines_axes() {
        // both axes on the wall ring
        assert_eq!(CellKind::Wall, GRID.classify(32, 32));
        // wall crossing road keeps the road open
        assert_eq!(CellKind::Road, GRID.classify(32, 34));
        assert_eq!(CellKind::Road, GRID.classify(34, 38));
        // road crossing road
        assert_eq!(CellKind::Road, GRID.classify(34, 34));
    }

    #[test]
    fn classify_is_periodic() {
        let period = GRID.total_size();
        for (x, z) in [(0, 0), (16, 16), (32, 0), (33, 5), (38, 38)] {
            let kind = GRID.classify(x, z);
            for multiple in [-3, -1, 1, 7] {
                assert_eq!(kind, GRID.classify(x + multiple * period, z));
                assert_eq!(kind, GRID.classify(x, z + multiple * period));
                assert_eq!(
                    kind,
                    GRID.classify(x + multiple * period, z - multiple * period)
                );
            }
        }
    }

    #[test]
    fn negative_coordinates_wrap_with_floor_modulo() {
        // -1..=-7 is the band west of plot (-1; 0): wall, road, wall
        assert_eq!(CellKind::Wall, GRID.classify(-1, 0));
        assert_eq!(CellKind::Road, GRID.classify(-2, 0));
        assert_eq!(CellKind::Road, GRID.classify(-6, 0));
        assert_eq!(CellKind::Wall, GRID.classify(-7, 0));
        assert_eq!(CellKind::Plot, GRID.classify(-8, 0));
        assert_eq!(CellKind::Plot, GRID.classify(-39, 0));
    }

    #[test]
    fn plot_id_uses_floor_division() {
        assert_eq!(Some(PlotId { x: 0, z: 0 }), GRID.plot_id_at(0, 0));
        assert_eq!(Some(PlotId { x: 0, z: 0 }), GRID.plot_id_at(31, 31));
        assert_eq!(Some(PlotId { x: 1, z: 0 }), GRID.plot_id_at(39, 0));
        assert_eq!(Some(PlotId { x: -1, z: -1 }), GRID.plot_id_at(-8, -39));
        assert_eq!(None, GRID.plot_id_at(32, 0));
    }

    #[test]
    fn bounds_contain_their_columns() {
        for (x, z) in [(0, 0), (31, 31), (39, 45), (-8, -39), (-100, 200)] {
            let Some(id) = GRID.plot_id_at(x, z) else {
                continue;
            };
            assert!(
                GRID.plot_bounds(id).contains_column(x, z),
                "bounds of {id} must contain ({x}, {z})"
            );
        }
    }

    #[test]
    fn bounds_are_exactly_plot_size_wide() {
        for id in [
            PlotId { x: 0, z: 0 },
            PlotId { x: -4, z: 17 },
            PlotId { x: 1000, z: -1000 },
        ] {
            let bounds = GRID.plot_bounds(id);
            assert_eq!(32, bounds.max_x - bounds.min_x);
            assert_eq!(32, bounds.max_z - bounds.min_z);
        }
    }

    #[test]
    fn bordering_detects_adjacent_plots() {
        // the wall at x = 32 touches plot (0; 0) to the west
        assert_eq!(
            Some(PlotId { x: 0, z: 0 }),
            GRID.bordering_plot_id(32, 10)
        );
        // the wall at x = 38 touches plot (1; 0) to the east
        assert_eq!(
            Some(PlotId { x: 1, z: 0 }),
            GRID.bordering_plot_id(38, 10)
        );
        // the middle of the road touches nothing
        assert_eq!(None, GRID.bordering_plot_id(35, 10));
        // neither does a wall corner, whose plot contact is diagonal only
        assert_eq!(None, GRID.bordering_plot_id(32, 32));
        // plot interiors are not considered bordering
        assert_eq!(None, GRID.bordering_plot_id(10, 10));
        assert!(GRID.is_bordering_plot(32, 10));
        assert!(!GRID.is_bordering_plot(35, 10));
    }

    #[test]
    fn bordering_ties_resolve_in_cardinal_priority_order() {
        // with a single-column separator the wall touches plots on both sides
        let grid = PlotGrid::new(8, 1);
        // north (z - 1) wins over south (z + 1)
        assert_eq!(Some(PlotId { x: 0, z: 0 }), grid.bordering_plot_id(3, 8));
        // east (x + 1) wins over west when north and south are wall cells
        assert_eq!(Some(PlotId { x: 1, z: 0 }), grid.bordering_plot_id(8, 3));
    }

    #[test]
    fn degenerate_parameters_are_clamped() {
        let grid = PlotGrid::new(0, 0);
        assert_eq!(1, grid.plot_size());
        assert_eq!(1, grid.road_width());
        assert_eq!(2, grid.total_size());
    }

    #[test]
    fn shrunk_bounds() {
        let bounds = GRID.plot_bounds(PlotId { x: 0, z: 0 }).shrunk_by(3);
        assert!(bounds.contains_column(3, 3));
        assert!(!bounds.contains_column(2, 3));
        assert!(!bounds.contains_column(29, 16));
    }
}
