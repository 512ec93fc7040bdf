//! Whole-grid passes built from point kernels.
//!
//! Every pass splits the grid into `i2` planes. Each plane only reads the coordinates of its own
//! points and writes only their slots, so with the `parallel` feature enabled the planes are
//! dispatched across the rayon thread pool. Results do not depend on the number of threads.

use crate::coords::CoordSystem;
use crate::exact::ExactSolution;
use crate::field::{GridFunction, GridFunctionStore, NUM_EVOL_GFS, ScalarWave, UUGF, VVGF};
use crate::grid::GridSpace;

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Overwrites `uu` and `vv` at every point of `store`, ghost points included, with `solution`
/// evaluated at time `time`.
pub fn impose_exact_solution<C, S>(
    grid: &GridSpace,
    chart: &C,
    solution: &S,
    time: f64,
    store: &mut GridFunctionStore<ScalarWave>,
) where
    C: CoordSystem,
    S: ExactSolution + ?Sized,
{
    assert_eq!(
        store.size(),
        grid.size(),
        "store extents do not match the grid"
    );

    log::trace!(
        "Imposing exact solution on {} grid of {} points at t = {time}",
        C::NAME,
        grid.num_points()
    );

    let points = grid.points();
    let shared = store.shared();

    let plane = |i2: usize| {
        for index in points.plane(2, i2) {
            let position = chart.to_cartesian(grid.position(index));
            let state = solution.evaluate(position, time);
            // Planes are disjoint, so no other closure touches these points.
            unsafe { state.store_shared(&shared, index) };
        }
    };

    #[cfg(feature = "parallel")]
    (0..grid.size()[2]).into_par_iter().for_each(plane);

    #[cfg(not(feature = "parallel"))]
    (0..grid.size()[2]).for_each(plane);
}

/// Smallest proper distance spanned by a single grid step, over every interior point and axis.
pub fn min_proper_spacing<C: CoordSystem>(grid: &GridSpace, chart: &C) -> f64 {
    let ghost = grid.ghost();
    let cells = grid.cells();
    let spacing = grid.spacing();

    let plane = |i2: usize| {
        grid.points()
            .window([ghost, ghost, i2], [cells[0], cells[1], 1])
            .flat_map(|index| chart.ds_dirn(spacing, grid.position(index)))
            .fold(f64::INFINITY, f64::min)
    };

    let planes = ghost..ghost + cells[2];

    #[cfg(feature = "parallel")]
    return planes
        .into_par_iter()
        .map(plane)
        .reduce(|| f64::INFINITY, f64::min);

    #[cfg(not(feature = "parallel"))]
    return planes.map(plane).fold(f64::INFINITY, f64::min);
}

/// Computes the CFL-limited timestep `cfl * min(ds) / wavespeed`.
pub fn find_timestep<C: CoordSystem>(
    grid: &GridSpace,
    chart: &C,
    cfl: f64,
    wavespeed: f64,
) -> f64 {
    let min_spacing = min_proper_spacing(grid, chart);

    if min_spacing <= 0.0 {
        log::warn!(
            "Minimum proper spacing on {} grid is {min_spacing:e}, timestep is degenerate",
            C::NAME
        );
    }

    let dt = cfl * min_spacing / wavespeed;
    log::debug!("Minimum proper spacing {min_spacing:.5e}, timestep {dt:.5e}");
    dt
}

/// Difference between a numerical grid function and an exact solution, over interior points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldError {
    pub field: ScalarWave,
    /// Root mean square of the pointwise difference.
    pub l2: f64,
    /// Largest absolute pointwise difference.
    pub max: f64,
}

#[derive(Clone, Copy, Default)]
struct Accumulator {
    sum_sq: f64,
    max: f64,
}

impl Accumulator {
    fn push(&mut self, diff: f64) {
        self.sum_sq += diff * diff;
        self.max = self.max.max(diff.abs());
    }

    fn merge(self, other: Self) -> Self {
        Self {
            sum_sq: self.sum_sq + other.sum_sq,
            max: self.max.max(other.max),
        }
    }
}

/// Compares `store` against `solution` at time `time` on every interior point.
pub fn error_norms<C, S>(
    grid: &GridSpace,
    chart: &C,
    solution: &S,
    time: f64,
    store: &GridFunctionStore<ScalarWave>,
) -> [FieldError; NUM_EVOL_GFS]
where
    C: CoordSystem,
    S: ExactSolution + ?Sized,
{
    assert_eq!(
        store.size(),
        grid.size(),
        "store extents do not match the grid"
    );

    let ghost = grid.ghost();
    let cells = grid.cells();
    let fields = store.view();

    let plane = |i2: usize| {
        let mut result = [Accumulator::default(); NUM_EVOL_GFS];

        for index @ [i0, i1, i2] in grid
            .points()
            .window([ghost, ghost, i2], [cells[0], cells[1], 1])
        {
            let exact = solution.evaluate(chart.to_cartesian(grid.position(index)), time);

            result[UUGF.index()].push(fields.read(UUGF, i0, i1, i2) - exact.uu);
            result[VVGF.index()].push(fields.read(VVGF, i0, i1, i2) - exact.vv);
        }

        result
    };

    let merge = |a: [Accumulator; NUM_EVOL_GFS],
                 b: [Accumulator; NUM_EVOL_GFS]|
     -> [Accumulator; NUM_EVOL_GFS] { std::array::from_fn(|gf| a[gf].merge(b[gf])) };

    let planes = ghost..ghost + cells[2];

    #[cfg(feature = "parallel")]
    let total = planes
        .into_par_iter()
        .map(plane)
        .reduce(|| [Accumulator::default(); NUM_EVOL_GFS], merge);

    #[cfg(not(feature = "parallel"))]
    let total = planes
        .map(plane)
        .fold([Accumulator::default(); NUM_EVOL_GFS], merge);

    let count = cells.iter().product::<usize>() as f64;

    std::array::from_fn(|gf| FieldError {
        field: ScalarWave::from_index(gf),
        l2: (total[gf].sum_sq / count).sqrt(),
        max: total[gf].max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Cartesian, Chart, Spherical};
    use crate::exact::{Constant, PlaneWave, SphericalGaussian};
    use crate::grid::Bounds;
    use std::f64::consts::PI;

    fn spherical_grid() -> GridSpace {
        GridSpace::new([4, 4, 4], 2, Spherical.default_bounds(1.0)).unwrap()
    }

    #[test]
    fn constant_everywhere() {
        let grid = spherical_grid();
        let mut store = GridFunctionStore::from_grid(&grid);
        store.fill(-9.0);

        let solution = Constant {
            uu_in: 1.5,
            vv_in: 0.25,
        };
        impose_exact_solution(&grid, &Spherical, &solution, 0.0, &mut store);

        assert!(store.field(UUGF).iter().all(|v| *v == 1.5));
        assert!(store.field(VVGF).iter().all(|v| *v == 0.25));
    }

    #[test]
    fn matches_pointwise_imposition() {
        let grid = GridSpace::new(
            [6, 5, 7],
            3,
            Bounds::from_aabb([-1.0, -2.0, 0.0], [2.0, 1.0, 3.5]),
        )
        .unwrap();
        let solution = SphericalGaussian {
            amplitude: 1.0,
            sigma: 0.7,
            center: [0.2, -0.4, 1.0],
            wavespeed: 1.0,
        };
        let chart = Chart::Cylindrical;
        let time = 0.35;

        let mut pass = GridFunctionStore::from_grid(&grid);
        impose_exact_solution(&grid, &chart, &solution, time, &mut pass);

        let mut pointwise = GridFunctionStore::from_grid(&grid);
        for index in grid.points().iter() {
            let position = chart.to_cartesian(grid.position(index));
            solution.impose(pointwise.view_mut(), index, position, time);
        }

        assert_eq!(pass.storage(), pointwise.storage());
    }

    #[test]
    fn cartesian_timestep() {
        let grid = GridSpace::new(
            [4, 8, 2],
            1,
            Bounds::from_aabb([0.0; 3], [2.0, 2.0, 2.0]),
        )
        .unwrap();

        assert_eq!(min_proper_spacing(&grid, &Cartesian), 0.25);
        assert_eq!(find_timestep(&grid, &Cartesian, 0.5, 1.0), 0.125);
        assert_eq!(find_timestep(&grid, &Cartesian, 0.5, 2.0), 0.0625);
    }

    #[test]
    fn spherical_timestep() {
        let grid = spherical_grid();

        // Innermost radial shell, nearest the poles, along phi.
        let expected = (PI / 2.0) * 0.125 * (PI / 8.0).sin();
        let min = min_proper_spacing(&grid, &Spherical);

        assert!(min > 0.0);
        assert!((min - expected).abs() < 1e-14 * expected);
        assert!((find_timestep(&grid, &Spherical, 0.4, 1.0) - 0.4 * expected).abs() < 1e-14);
    }

    #[test]
    fn norms_of_exact_data() {
        let grid = GridSpace::new([8, 8, 8], 2, Cartesian.default_bounds(2.0)).unwrap();
        let solution = PlaneWave {
            wavevector: [1.0, 1.0, 0.0],
            wavespeed: 1.0,
        };

        let mut store = GridFunctionStore::from_grid(&grid);
        impose_exact_solution(&grid, &Cartesian, &solution, 0.5, &mut store);

        let [uu, vv] = error_norms(&grid, &Cartesian, &solution, 0.5, &store);
        assert_eq!(uu.field, UUGF);
        assert_eq!(vv.field, VVGF);
        assert_eq!([uu.l2, uu.max, vv.l2, vv.max], [0.0; 4]);

        // Ghost points are ignored.
        store.write(UUGF, 0, 0, 0, 100.0);
        let [uu, _] = error_norms(&grid, &Cartesian, &solution, 0.5, &store);
        assert_eq!(uu.max, 0.0);

        let perturbed = store.read(VVGF, 3, 4, 5) + 1e-3;
        store.write(VVGF, 3, 4, 5, perturbed);

        let [uu, vv] = error_norms(&grid, &Cartesian, &solution, 0.5, &store);
        assert_eq!(uu.max, 0.0);
        assert!((vv.max - 1e-3).abs() < 1e-12);
        assert!((vv.l2 - 1e-3 / (512.0f64).sqrt()).abs() < 1e-12);
    }
}
