use serde::{Deserialize, Serialize};
use sfcollapse::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_directory")]
    pub directory: String,

    #[serde(default)]
    pub logging: Logging,
    pub grid: Grid,
    pub evolve: Evolve,
    pub initial: Initial,
}

impl Config {
    /// Retrieves the output directory in absolute form.
    pub fn directory(&self) -> eyre::Result<PathBuf> {
        crate::misc::abs_or_relative(Path::new(&self.directory))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Logging {
    /// Verbosity of logging
    pub level: usize,
}

impl Logging {
    /// Converts a logging level to a `log::LevelFilter`.
    pub fn filter(&self) -> log::LevelFilter {
        match self.level {
            0 => log::LevelFilter::Off,
            1 => log::LevelFilter::Error,
            2 => log::LevelFilter::Warn,
            3 => log::LevelFilter::Info,
            4 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self { level: 2 }
    }
}

/// Settings deciding the shape and resolution of the grid.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Grid {
    pub chart: Chart,
    /// Number of interior points along each axis.
    pub cells: [usize; 3],
    /// Number of ghost points on each face.
    #[serde(default = "default_ghost")]
    pub ghost: usize,
    /// Outer radius (or half width) of the chart's natural domain.
    #[serde(default = "default_extent")]
    pub extent: f64,
    /// Overrides the lower corner of the natural domain.
    pub xxmin: Option<[f64; 3]>,
    /// Overrides the upper corner of the natural domain.
    pub xxmax: Option<[f64; 3]>,
}

impl Grid {
    pub fn bounds(&self) -> Bounds {
        let natural = self.chart.default_bounds(self.extent);
        Bounds::from_aabb(
            self.xxmin.unwrap_or(natural.aa()),
            self.xxmax.unwrap_or(natural.bb()),
        )
    }

    pub fn build(&self) -> eyre::Result<GridSpace> {
        Ok(GridSpace::new(self.cells, self.ghost, self.bounds())?)
    }
}

/// Settings for the timestep handed to an evolution.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Evolve {
    /// CFL factor for evolution
    pub cfl: f64,
    /// Characteristic speed of the system.
    #[serde(default = "default_onef")]
    pub wavespeed: f64,
}

/// Initial data to impose on the grid.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Initial {
    Constant(Constant),
    PlaneWave(PlaneWave),
    SphericalGaussian(SphericalGaussian),
    RadialTable {
        /// Path to a text file of radial samples.
        path: String,
        /// Radial distance between samples.
        spacing: f64,
        #[serde(default)]
        center: [f64; 3],
    },
}

impl Initial {
    pub fn build(&self) -> eyre::Result<InitialData> {
        Ok(match self {
            Initial::Constant(data) => InitialData::Constant(*data),
            Initial::PlaneWave(data) => {
                InitialData::PlaneWave(PlaneWave::new(data.wavevector, data.wavespeed)?)
            }
            Initial::SphericalGaussian(data) => {
                eyre::ensure!(data.sigma > 0.0, "gaussian width must be positive");
                InitialData::SphericalGaussian(*data)
            }
            Initial::RadialTable {
                path,
                spacing,
                center,
            } => {
                let path = crate::misc::abs_or_relative(Path::new(path))?;
                InitialData::RadialTable(RadialTable::load(path, *spacing, *center)?)
            }
        })
    }

    /// Prints a one line description of the initial data.
    pub fn println(&self) {
        match self {
            Initial::Constant(data) => {
                println!("- Constant: uu = {}, vv = {}", data.uu_in, data.vv_in)
            }
            Initial::PlaneWave(data) => println!(
                "- Plane Wave: k = {:?}, c = {}",
                data.wavevector, data.wavespeed
            ),
            Initial::SphericalGaussian(data) => println!(
                "- Spherical Gaussian: A = {}, σ = {}, center = {:?}",
                data.amplitude, data.sigma, data.center
            ),
            Initial::RadialTable { path, spacing, .. } => {
                println!("- Radial Table: {path}, dr = {spacing}")
            }
        }
    }
}

fn default_name() -> String {
    "scalar_wave".to_string()
}

fn default_directory() -> String {
    "output".to_string()
}

fn default_ghost() -> usize {
    3
}

fn default_extent() -> f64 {
    10.0
}

fn default_onef() -> f64 {
    1.0
}
