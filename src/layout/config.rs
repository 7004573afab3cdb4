//! Simulation parameters and per-step statistics.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Spring stiffness applied to bond stretch or compression.
pub const K_SPRING: f32 = 0.1;

/// How the spring pass commits bond forces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BondIntegration {
    /// Each bond moves its endpoints before the next bond is read. Results
    /// depend on bond insertion order when bonds share a node.
    #[default]
    Sequential,
    /// Every bond reads positions from the start of the pass; forces are
    /// accumulated and applied once.
    Simultaneous,
}

/// Configuration for one simulation step.
///
/// Defaults are the constants of the interactive driver loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Spring stiffness (default: 0.1).
    pub spring_stiffness: f32,
    /// Outward push away from the centroid (default: 0.01).
    pub centroid_strength: f32,
    /// Cutoff distance of pairwise repulsion (default: 150.0).
    pub repulsion_range: f32,
    /// Pairwise repulsion at zero distance (default: 1.0).
    pub repulsion_strength: f32,
    /// Spring pass commit mode (default: sequential).
    pub bond_integration: BondIntegration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            spring_stiffness: K_SPRING,
            centroid_strength: 0.01,
            repulsion_range: 150.0,
            repulsion_strength: 1.0,
            bond_integration: BondIntegration::Sequential,
        }
    }
}

impl SimulationConfig {
    /// Check that every parameter is finite and the repulsion range positive.
    ///
    /// This does not bound the magnitudes: finite but huge strengths can
    /// still overflow positions to infinity or NaN. Such nodes stay in the
    /// system but drop out of picking.
    pub fn validate(&self) -> Result<()> {
        check_finite("springStiffness", self.spring_stiffness)?;
        check_finite("centroidStrength", self.centroid_strength)?;
        check_range(self.repulsion_range)?;
        check_finite("repulsionStrength", self.repulsion_strength)
    }
}

pub(crate) fn check_finite(name: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{name} must be finite, got {value}")))
    }
}

pub(crate) fn check_range(max_range: f32) -> Result<()> {
    if max_range.is_finite() && max_range > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "repulsionRange must be finite and positive, got {max_range}"
        )))
    }
}

/// What one simulation step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepStats {
    /// Bonds whose endpoints coincided and produced no spring force.
    pub degenerate_bonds: usize,
    /// Whether the centroid pass found no nodes and did nothing.
    pub centroid_skipped: bool,
    /// Node pairs closer than the repulsion range.
    pub interacting_pairs: usize,
    /// Of those, pairs that coincided and were pushed along a fallback direction.
    pub coincident_pairs: usize,
}
