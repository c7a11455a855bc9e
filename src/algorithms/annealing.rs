//! Simulated annealing acceptance used by the bees local search.

use rand::{Rng, RngCore};

/// Temperature schedule with multiplicative decay.
///
/// A temperature of zero disables annealing: only strict improvements are
/// accepted and the temperature stays at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annealing {
    temperature: f64,
    decay: f64,
}

impl Annealing {
    /// Creates a schedule.
    ///
    /// # Arguments
    /// * `temperature` - Initial temperature (higher = more exploration)
    /// * `decay` - Multiplicative decay per iteration (e.g., 0.99)
    pub fn new(temperature: f64, decay: f64) -> Self {
        Self { temperature, decay }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn is_enabled(&self) -> bool {
        self.temperature > 0.0
    }

    /// Returns the schedule after one more iteration
    pub fn cooled(self) -> Self {
        if self.is_enabled() {
            Self {
                temperature: self.temperature * self.decay,
                ..self
            }
        } else {
            self
        }
    }

    /// Decides whether to move from the current solution to a neighbour.
    ///
    /// `delta` is current cost minus neighbour cost, so positive values are
    /// improvements and are always taken. Otherwise the move is taken with
    /// probability exp(delta / temperature) while annealing is enabled.
    pub fn accepts(&self, delta: f64, rng: &mut dyn RngCore) -> bool {
        if delta > 0.0 {
            return true;
        }

        self.is_enabled() && rng.gen::<f64>() < (delta / self.temperature).exp()
    }
}
