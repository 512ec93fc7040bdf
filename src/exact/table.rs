use crate::exact::{ExactSolution, ScalarWaveState};
use std::path::Path;
use thiserror::Error;

/// Error raised while building or loading a radial table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("radial table contains no samples")]
    Empty,
    #[error("radial table spacing must be positive and finite, found {0}")]
    InvalidSpacing(f64),
    #[error("radial table columns have different lengths ({uu} and {vv})")]
    LengthMismatch { uu: usize, vv: usize },
    #[error("line {line}: expected {expected} column(s), found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: failed to parse value {value:?}")]
    ParseFailed {
        line: usize,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("failed to read radial table")]
    Io(#[from] std::io::Error),
}

/// Spherically symmetric data sampled on a uniform radial grid `r = 0, dr, 2 dr, ...` about a
/// center, linearly interpolated between samples. Beyond the final sample the last value is
/// used. The data does not depend on time.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RadialTableData")]
pub struct RadialTable {
    spacing: f64,
    uu: Vec<f64>,
    vv: Vec<f64>,
    center: [f64; 3],
}

impl RadialTable {
    pub fn new(
        spacing: f64,
        uu: Vec<f64>,
        vv: Vec<f64>,
        center: [f64; 3],
    ) -> Result<Self, TableError> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(TableError::InvalidSpacing(spacing));
        }

        if uu.len() != vv.len() {
            return Err(TableError::LengthMismatch {
                uu: uu.len(),
                vv: vv.len(),
            });
        }

        if uu.is_empty() {
            return Err(TableError::Empty);
        }

        Ok(Self {
            spacing,
            uu,
            vv,
            center,
        })
    }

    /// Parses a table from text with one sample per line. Lines hold either two values
    /// (`uu vv`) or a single value, which is taken as `vv` (the momentum of the field) with
    /// `uu = 0`. Values may be separated by commas or whitespace; blank lines and lines starting
    /// with `#` are skipped.
    pub fn parse(text: &str, spacing: f64, center: [f64; 3]) -> Result<Self, TableError> {
        let mut uu = Vec::new();
        let mut vv = Vec::new();
        let mut columns = None;

        for (line, content) in text.lines().enumerate() {
            let line = line + 1;
            let content = content.trim();

            if content.is_empty() || content.starts_with('#') {
                continue;
            }

            let values = content
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|value| !value.is_empty())
                .map(|value| {
                    value
                        .parse::<f64>()
                        .map_err(|source| TableError::ParseFailed {
                            line,
                            value: value.to_string(),
                            source,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let expected = *columns.get_or_insert(values.len());

            if values.len() != expected || !(1..=2).contains(&expected) {
                return Err(TableError::ColumnCount {
                    line,
                    expected: expected.clamp(1, 2),
                    found: values.len(),
                });
            }

            match values[..] {
                [pi] => {
                    uu.push(0.0);
                    vv.push(pi);
                }
                [phi, pi] => {
                    uu.push(phi);
                    vv.push(pi);
                }
                _ => unreachable!(),
            }
        }

        Self::new(spacing, uu, vv, center)
    }

    /// Loads a table from a file (see `parse()` for the format).
    pub fn load(
        path: impl AsRef<Path>,
        spacing: f64,
        center: [f64; 3],
    ) -> Result<Self, TableError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, spacing, center)
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Number of radial samples.
    pub fn len(&self) -> usize {
        self.uu.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uu.is_empty()
    }

    /// Radius of the final sample.
    pub fn extent(&self) -> f64 {
        (self.len() - 1) as f64 * self.spacing
    }

    fn interpolate(samples: &[f64], s: f64) -> f64 {
        let last = samples.len() - 1;

        if s >= last as f64 {
            return samples[last];
        }

        let i = s.floor() as usize;
        let w = s - i as f64;
        (1.0 - w) * samples[i] + w * samples[i + 1]
    }
}

/// Unvalidated form of `RadialTable`, as read from disk.
#[derive(serde::Deserialize)]
struct RadialTableData {
    spacing: f64,
    uu: Vec<f64>,
    vv: Vec<f64>,
    center: [f64; 3],
}

impl TryFrom<RadialTableData> for RadialTable {
    type Error = TableError;

    fn try_from(data: RadialTableData) -> Result<Self, Self::Error> {
        RadialTable::new(data.spacing, data.uu, data.vv, data.center)
    }
}

impl ExactSolution for RadialTable {
    fn evaluate(&self, position: [f64; 3], _time: f64) -> ScalarWaveState {
        let r = (0..3)
            .map(|axis| (position[axis] - self.center[axis]).powi(2))
            .sum::<f64>()
            .sqrt();
        let s = r / self.spacing;

        ScalarWaveState {
            uu: Self::interpolate(&self.uu, s),
            vv: Self::interpolate(&self.vv, s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolation() {
        let table =
            RadialTable::new(0.5, vec![1.0, 3.0, 2.0], vec![0.0, -1.0, -4.0], [0.0; 3]).unwrap();

        assert_eq!(table.extent(), 1.0);

        let at = |r: f64| table.evaluate([0.0, r, 0.0], 0.0);

        assert_eq!(at(0.0), ScalarWaveState { uu: 1.0, vv: 0.0 });
        assert_eq!(at(0.25), ScalarWaveState { uu: 2.0, vv: -0.5 });
        assert_eq!(at(0.5), ScalarWaveState { uu: 3.0, vv: -1.0 });
        assert_eq!(at(0.75), ScalarWaveState { uu: 2.5, vv: -2.5 });
        assert_eq!(at(1.0), ScalarWaveState { uu: 2.0, vv: -4.0 });
        assert_eq!(at(10.0), ScalarWaveState { uu: 2.0, vv: -4.0 });

        // Time independent.
        assert_eq!(table.evaluate([0.1, 0.2, 0.0], 5.0), table.evaluate([0.1, 0.2, 0.0], 0.0));
    }

    #[test]
    fn parsing() {
        let table = RadialTable::parse("# pi\n0.5\n\n0.25\n0.0\n", 0.01, [0.0; 3]).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.evaluate([0.0; 3], 0.0), ScalarWaveState { uu: 0.0, vv: 0.5 });

        let table = RadialTable::parse("1.0, 0.5\n2.0 0.25\n", 1.0, [0.0; 3]).unwrap();
        assert_eq!(table.evaluate([1.0, 0.0, 0.0], 0.0), ScalarWaveState { uu: 2.0, vv: 0.25 });

        assert!(matches!(
            RadialTable::parse("1.0 2.0\n3.0\n", 1.0, [0.0; 3]),
            Err(TableError::ColumnCount {
                line: 2,
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(
            RadialTable::parse("1.0\nabc\n", 1.0, [0.0; 3]),
            Err(TableError::ParseFailed { line: 2, .. })
        ));
        assert!(matches!(
            RadialTable::parse("1 2 3\n", 1.0, [0.0; 3]),
            Err(TableError::ColumnCount { found: 3, .. })
        ));
        assert!(matches!(
            RadialTable::parse("# empty\n", 1.0, [0.0; 3]),
            Err(TableError::Empty)
        ));
        assert!(matches!(
            RadialTable::parse("1.0\n", 0.0, [0.0; 3]),
            Err(TableError::InvalidSpacing(_))
        ));
    }

    #[test]
    fn deserialization_validates() {
        let table = RadialTable::new(0.5, vec![1.0, 2.0], vec![0.0, 0.5], [0.0; 3]).unwrap();
        let text = ron::to_string(&table).unwrap();
        assert_eq!(ron::from_str::<RadialTable>(&text).unwrap(), table);

        let invalid = [
            RadialTable {
                uu: Vec::new(),
                vv: Vec::new(),
                ..table.clone()
            },
            RadialTable {
                vv: vec![0.0],
                ..table.clone()
            },
            RadialTable {
                spacing: -1.0,
                ..table.clone()
            },
        ];

        for table in &invalid {
            let text = ron::to_string(table).unwrap();
            assert!(ron::from_str::<RadialTable>(&text).is_err(), "{text}");
        }
    }
}
