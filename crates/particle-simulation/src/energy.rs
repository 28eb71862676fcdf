//! Energy diagnostics
//!
//! Purely observational. Nothing here feeds back into the simulation; the
//! semi-implicit integrator and the coarse grid both drift, and the numbers
//! are only logged so that drift can be watched.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyReport {
    pub kinetic: f32,
    pub potential: f32,
}

impl EnergyReport {
    pub fn total(&self) -> f32 {
        self.kinetic + self.potential
    }

    /// Relative change of the total compared to `reference`
    pub fn drift_from(&self, reference: &EnergyReport) -> f32 {
        let base = reference.total();
        if base == 0.0 {
            return 0.0;
        }
        (self.total() - base) / base.abs()
    }
}

impl fmt::Display for EnergyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kinetic={:.4e} potential={:.4e} total={:.4e}",
            self.kinetic,
            self.potential,
            self.total()
        )
    }
}
