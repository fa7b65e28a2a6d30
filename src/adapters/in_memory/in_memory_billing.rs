// In memory implementation of the BillingPolicy port.
//
// Purpose
// - Fixed per-project hourly rates for tests and local development. A real
//   deployment backs this port with the firm's billing-rate source.

use std::collections::HashMap;

use crate::core::ports::BillingPolicy;

#[derive(Debug, Clone, Default)]
pub struct FixedRateBilling {
    rates: HashMap<String, f64>,
}

impl FixedRateBilling {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, project_id: impl Into<String>, rate: f64) -> Self {
        self.rates.insert(project_id.into(), rate);
        self
    }
}

impl BillingPolicy for FixedRateBilling {
    fn hourly_rate(&self, project_id: &str) -> Option<f64> {
        self.rates.get(project_id).copied()
    }
}
