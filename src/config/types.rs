//! Configuration types.
//!
//! The policy and limits themselves live in [`crate::models`]; this module
//! bundles them as one loaded configuration.

use serde::{Deserialize, Serialize};

use crate::models::{LegalHolidayPolicy, StatutoryLimits};

/// The loaded engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Which days are legal holidays and where weeks start.
    pub policy: LegalHolidayPolicy,
    /// Daily and weekly limits.
    pub limits: StatutoryLimits,
}

impl EngineConfig {
    /// Bundles a policy and limits.
    pub fn new(policy: LegalHolidayPolicy, limits: StatutoryLimits) -> Self {
        Self { policy, limits }
    }
}
