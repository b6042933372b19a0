//! Subscription plans shown on the pricing page.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    /// List price for one month on monthly billing.
    pub monthly_price_pence: u32,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Plan {
    pub fn new(id: impl Into<String>, name: impl Into<String>, monthly_price_pence: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            monthly_price_pence,
            features: Vec::new(),
        }
    }

    pub fn is_free(&self) -> bool {
        self.monthly_price_pence == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Annual,
}

impl BillingCycle {
    pub fn months(&self) -> u32 {
        match self {
            BillingCycle::Monthly => 1,
            BillingCycle::Annual => 12,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Annual => "Annual",
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
