//! Physical configuration shared by every routine in the crate
//!
//! The scene loader deserializes this from whatever format it reads
//! (the crate itself does no file I/O). Missing fields take defaults:
//!
//! ```
//! use spring_nbody::config::PhysicsConfig;
//!
//! let config: PhysicsConfig = serde_json::from_str(r#"{ "g": 2.0 }"#).unwrap();
//! assert_eq!(config.g, 2.0);
//! assert_eq!(config.softening, spring_nbody::forces::RSOFT);
//! ```

use crate::error::{Error, Result};
use crate::forces::RSOFT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravitational constant in simulation units
    pub g: f64,
    /// Softening length used by the quadrupole force models
    pub softening: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            g: 1.0,
            softening: RSOFT,
        }
    }
}

impl PhysicsConfig {
    /// Checks that `g` is finite and positive and `softening` is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        if !self.g.is_finite() || self.g <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "gravitational constant must be finite and > 0, got {}",
                self.g
            )));
        }
        if !self.softening.is_finite() || self.softening < 0.0 {
            return Err(Error::InvalidParam(format!(
                "softening must be finite and >= 0, got {}",
                self.softening
            )));
        }
        Ok(())
    }
}
