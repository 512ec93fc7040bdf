use crate::exact::{ExactSolution, ScalarWaveState};
use thiserror::Error;

/// Error raised when constructing an analytic wave.
#[derive(Debug, Error, PartialEq)]
pub enum WaveError {
    #[error("plane wave requires a finite, non-zero wavevector, found {0:?}")]
    InvalidWavevector([f64; 3]),
}

/// A sinusoidal plane wave travelling along `wavevector`:
///
/// ```text
/// uu = 2 + sin(k.x - c t)
/// vv = -c cos(k.x - c t)
/// ```
///
/// where `k` is the normalized wavevector. The constant offset keeps the field away from zero so
/// relative errors stay meaningful. A zero wavevector has no direction and evaluates to NaN;
/// `new()` and deserialization reject it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PlaneWaveData")]
pub struct PlaneWave {
    /// Direction of propagation. Must be finite and non-zero.
    pub wavevector: [f64; 3],
    pub wavespeed: f64,
}

impl PlaneWave {
    pub fn new(wavevector: [f64; 3], wavespeed: f64) -> Result<Self, WaveError> {
        let norm = wavevector.iter().map(|k| k * k).sum::<f64>().sqrt();

        if !(norm.is_finite() && norm > 0.0) {
            return Err(WaveError::InvalidWavevector(wavevector));
        }

        Ok(Self {
            wavevector,
            wavespeed,
        })
    }
}

#[derive(serde::Deserialize)]
struct PlaneWaveData {
    wavevector: [f64; 3],
    #[serde(default = "default_wavespeed")]
    wavespeed: f64,
}

impl TryFrom<PlaneWaveData> for PlaneWave {
    type Error = WaveError;

    fn try_from(data: PlaneWaveData) -> Result<Self, Self::Error> {
        PlaneWave::new(data.wavevector, data.wavespeed)
    }
}

impl ExactSolution for PlaneWave {
    fn evaluate(&self, position: [f64; 3], time: f64) -> ScalarWaveState {
        let norm = self.wavevector.iter().map(|k| k * k).sum::<f64>().sqrt();
        let phase = (0..3)
            .map(|axis| self.wavevector[axis] / norm * position[axis])
            .sum::<f64>()
            - self.wavespeed * time;

        ScalarWaveState {
            uu: 2.0 + phase.sin(),
            vv: -self.wavespeed * phase.cos(),
        }
    }
}

/// A spherically symmetric Gaussian pulse that splits into an ingoing and an outgoing shell:
///
/// ```text
/// uu = (f(r - c t) + f(r + c t)) / r,    f(s) = A/2 s exp(-s^2 / (2 sigma^2))
/// ```
///
/// with `r` measured from `center`. At `t = 0` this is `A exp(-r^2 / (2 sigma^2))`. The solution
/// is regular at `r = 0`, where the analytic limits are used instead of the quotient.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SphericalGaussian {
    pub amplitude: f64,
    pub sigma: f64,
    #[serde(default)]
    pub center: [f64; 3],
    #[serde(default = "default_wavespeed")]
    pub wavespeed: f64,
}

impl SphericalGaussian {
    fn profile(&self, s: f64) -> f64 {
        0.5 * self.amplitude * s * self.envelope(s)
    }

    fn profile_d1(&self, s: f64) -> f64 {
        let sigma2 = self.sigma * self.sigma;
        0.5 * self.amplitude * self.envelope(s) * (1.0 - s * s / sigma2)
    }

    fn profile_d2(&self, s: f64) -> f64 {
        let sigma2 = self.sigma * self.sigma;
        0.5 * self.amplitude * self.envelope(s) * (s * s * s / (sigma2 * sigma2) - 3.0 * s / sigma2)
    }

    fn envelope(&self, s: f64) -> f64 {
        (-s * s / (2.0 * self.sigma * self.sigma)).exp()
    }
}

impl ExactSolution for SphericalGaussian {
    fn evaluate(&self, position: [f64; 3], time: f64) -> ScalarWaveState {
        let r = (0..3)
            .map(|axis| (position[axis] - self.center[axis]).powi(2))
            .sum::<f64>()
            .sqrt();
        let ct = self.wavespeed * time;

        // Below this radius the quotient loses all precision to cancellation.
        if r <= 1e-8 * self.sigma {
            return ScalarWaveState {
                uu: 2.0 * self.profile_d1(ct),
                vv: 2.0 * self.wavespeed * self.profile_d2(ct),
            };
        }

        ScalarWaveState {
            uu: (self.profile(r - ct) + self.profile(r + ct)) / r,
            vv: self.wavespeed * (self.profile_d1(r + ct) - self.profile_d1(r - ct)) / r,
        }
    }
}

fn default_wavespeed() -> f64 {
    1.0
}
