//! Price calculations for the pricing page.

use serde::Serialize;

use crate::models::{BillingCycle, Plan};

/// Discount applied to twelve months of the monthly price on annual billing.
pub const ANNUAL_DISCOUNT_PERCENT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub cycle: BillingCycle,
    /// Amount charged per billing period. Twelve months of a `u32` price
    /// can exceed `u32`, so quotes are widened.
    pub total_pence: u64,
    /// Effective monthly cost, rounded to the nearest penny.
    pub per_month_pence: u64,
    /// Saving against paying monthly for the same period.
    pub saving_pence: u64,
}

/// Divide rounding half up.
fn div_round(numerator: u64, denominator: u64) -> u64 {
    (numerator + denominator / 2) / denominator
}

pub fn quote(plan: &Plan, cycle: BillingCycle) -> PriceQuote {
    let months = u64::from(cycle.months());
    let list = u64::from(plan.monthly_price_pence) * months;

    let total = match cycle {
        BillingCycle::Monthly => list,
        BillingCycle::Annual => {
            div_round(list * u64::from(100 - ANNUAL_DISCOUNT_PERCENT), 100)
        }
    };

    PriceQuote {
        cycle,
        total_pence: total,
        per_month_pence: div_round(total, months),
        saving_pence: list - total,
    }
}
