//! Coordinate charts and the proper-distance (line-element) factors finite difference stencils
//! need to turn index-space differences into physical ones.
//!
//! For a chart with coordinates `xx = (xx0, xx1, xx2)` and uniform coordinate spacing `dxx`,
//! `ds_dirn[i]` is the physical length of one grid step along axis `i` at a point. Curvilinear
//! charts have coordinate singularities (origin, poles, axis) where some of these factors vanish.
//! The factors are returned exactly as the line element gives them; any regularization belongs to
//! the stencil consuming them.

use crate::grid::Bounds;
use std::f64::consts::PI;

mod spherical;

pub use spherical::{Spherical, ds_dirn_spherical};

/// A coordinate chart on three dimensional flat space.
pub trait CoordSystem: Sync {
    /// Name of the chart, used for logging and serialization.
    const NAME: &'static str;

    /// Proper distance spanned by one grid step along each axis.
    fn ds_dirn(&self, dxx: [f64; 3], xx: [f64; 3]) -> [f64; 3];

    /// Converts chart coordinates into cartesian coordinates.
    fn to_cartesian(&self, xx: [f64; 3]) -> [f64; 3];

    /// Natural coordinate domain of the chart out to the given extent.
    fn default_bounds(&self, extent: f64) -> Bounds;
}

/// Plain cartesian coordinates `(x, y, z)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cartesian;

impl CoordSystem for Cartesian {
    const NAME: &'static str = "Cartesian";

    fn ds_dirn(&self, dxx: [f64; 3], _xx: [f64; 3]) -> [f64; 3] {
        dxx
    }

    fn to_cartesian(&self, xx: [f64; 3]) -> [f64; 3] {
        xx
    }

    fn default_bounds(&self, extent: f64) -> Bounds {
        Bounds::from_aabb([-extent; 3], [extent; 3])
    }
}

/// Cylindrical coordinates `(rho, phi, z)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cylindrical;

impl CoordSystem for Cylindrical {
    const NAME: &'static str = "Cylindrical";

    fn ds_dirn(&self, dxx: [f64; 3], xx: [f64; 3]) -> [f64; 3] {
        [dxx[0], dxx[1] * xx[0], dxx[2]]
    }

    fn to_cartesian(&self, [rho, phi, z]: [f64; 3]) -> [f64; 3] {
        [rho * phi.cos(), rho * phi.sin(), z]
    }

    fn default_bounds(&self, extent: f64) -> Bounds {
        Bounds::from_aabb([0.0, -PI, -extent], [extent, PI, extent])
    }
}

/// Runtime selection of a coordinate chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chart {
    Cartesian,
    Cylindrical,
    Spherical,
}

impl Chart {
    pub fn name(self) -> &'static str {
        match self {
            Chart::Cartesian => Cartesian::NAME,
            Chart::Cylindrical => Cylindrical::NAME,
            Chart::Spherical => Spherical::NAME,
        }
    }
}

impl CoordSystem for Chart {
    const NAME: &'static str = "Chart";

    fn ds_dirn(&self, dxx: [f64; 3], xx: [f64; 3]) -> [f64; 3] {
        match self {
            Chart::Cartesian => Cartesian.ds_dirn(dxx, xx),
            Chart::Cylindrical => Cylindrical.ds_dirn(dxx, xx),
            Chart::Spherical => Spherical.ds_dirn(dxx, xx),
        }
    }

    fn to_cartesian(&self, xx: [f64; 3]) -> [f64; 3] {
        match self {
            Chart::Cartesian => Cartesian.to_cartesian(xx),
            Chart::Cylindrical => Cylindrical.to_cartesian(xx),
            Chart::Spherical => Spherical.to_cartesian(xx),
        }
    }

    fn default_bounds(&self, extent: f64) -> Bounds {
        match self {
            Chart::Cartesian => Cartesian.default_bounds(extent),
            Chart::Cylindrical => Cylindrical.default_bounds(extent),
            Chart::Spherical => Spherical.default_bounds(extent),
        }
    }
}
