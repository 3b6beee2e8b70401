//! Moving-average smoothing
//!
//! Centered uniform-kernel moving average with "same" output length: the
//! window for output element `i` spans the same indices a length-preserving
//! convolution with a `1/window` kernel would touch. Edge elements only
//! overlap part of the window; [`EdgePolicy`] controls whether those sums
//! are divided by the full window (attenuating the edges) or by the actual
//! overlap.

use crate::error::AnalysisError;

/// How partial windows at the sequence edges are normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// Divide by the actual number of in-range elements, so edge values
    /// stay on the same scale as the interior
    #[default]
    Renormalize,
    /// Divide by the full window size, treating out-of-range elements as
    /// zero; edge values are attenuated
    ZeroPad,
}

/// Fixed-window moving-average smoother
#[derive(Debug, Clone, Copy)]
pub struct Smoother {
    window: usize,
    edge: EdgePolicy,
}

impl Smoother {
    /// Create a smoother with the default edge policy. Rejects a zero window.
    pub fn new(window: usize) -> Result<Self, AnalysisError> {
        if window == 0 {
            return Err(AnalysisError::ZeroWindow);
        }
        Ok(Self {
            window,
            edge: EdgePolicy::default(),
        })
    }

    /// Create a smoother with an explicit edge policy
    pub fn with_edge_policy(window: usize, edge: EdgePolicy) -> Result<Self, AnalysisError> {
        let mut smoother = Self::new(window)?;
        smoother.edge = edge;
        Ok(smoother)
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Smooth a sequence, preserving its length.
    ///
    /// Rejects windows larger than the sequence; a window of 1 is the
    /// identity under either edge policy.
    pub fn smooth(&self, data: &[f64]) -> Result<Vec<f64>, AnalysisError> {
        if self.window > data.len() {
            return Err(AnalysisError::WindowTooLarge {
                window: self.window,
                len: data.len(),
            });
        }

        let half = (self.window - 1) / 2;
        let out = (0..data.len())
            .map(|i| {
                // Window [i + half - window + 1, i + half], clamped in range
                let hi = (i + half).min(data.len() - 1);
                let lo = (i + half + 1).saturating_sub(self.window);
                let sum: f64 = data[lo..=hi].iter().sum();
                let divisor = match self.edge {
                    EdgePolicy::Renormalize => (hi - lo + 1) as f64,
                    EdgePolicy::ZeroPad => self.window as f64,
                };
                sum / divisor
            })
            .collect();

        Ok(out)
    }
}
