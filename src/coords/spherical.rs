use crate::coords::CoordSystem;
use crate::grid::Bounds;
use std::f64::consts::PI;

/// Line-element factors of the spherical chart `(r, theta, phi)`:
///
/// ```text
/// ds0 = dxx0
/// ds1 = dxx1 * r
/// ds2 = dxx2 * r * sin(theta)
/// ```
///
/// `ds1` and `ds2` vanish at the origin (`r = 0`) and `ds2` vanishes on the poles
/// (`theta = 0, pi`). Those zeros are returned as is.
#[inline]
pub fn ds_dirn_spherical(dxx: [f64; 3], xx0: f64, xx1: f64) -> [f64; 3] {
    [dxx[0], dxx[1] * xx0, dxx[2] * xx0 * xx1.sin()]
}

/// Spherical coordinates `(r, theta, phi)`, with `theta` the polar angle measured from the `z`
/// axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spherical;

impl CoordSystem for Spherical {
    const NAME: &'static str = "Spherical";

    fn ds_dirn(&self, dxx: [f64; 3], xx: [f64; 3]) -> [f64; 3] {
        ds_dirn_spherical(dxx, xx[0], xx[1])
    }

    fn to_cartesian(&self, [r, theta, phi]: [f64; 3]) -> [f64; 3] {
        let (sin_theta, cos_theta) = theta.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();

        [r * sin_theta * cos_phi, r * sin_theta * sin_phi, r * cos_theta]
    }

    fn default_bounds(&self, extent: f64) -> Bounds {
        Bounds::from_aabb([0.0, 0.0, -PI], [extent, PI, PI])
    }
}
