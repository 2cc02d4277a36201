use serde::Serialize;

use quotekit_catalog::ProductId;
use quotekit_core::Entity;
use quotekit_pricing::{BillingCycle, Money, SeatCount, per_seat_rate, price};

use crate::selections::{LicenseType, Selections};

/// Currency label printed after the total.
pub const CURRENCY_LABEL: &str = "AU";

/// One priced line of the estimate panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimateLine {
    pub product_id: ProductId,
    pub name: String,
    pub license_type: LicenseType,
    pub seats: SeatCount,
    pub amount: Money,
}

/// Price breakdown derived from a selections snapshot.
///
/// Always recomputed from scratch; never stored on the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Estimate {
    pub cycle: BillingCycle,
    pub lines: Vec<EstimateLine>,
    pub total: Money,
}

impl Estimate {
    pub fn from_selections(selections: &Selections) -> Self {
        let cycle = selections.billing_cycle;
        let lines: Vec<EstimateLine> = selections
            .selected_products
            .iter()
            .map(|line| EstimateLine {
                product_id: line.id().clone(),
                name: line.name().to_string(),
                license_type: line.license_type,
                seats: line.user_count,
                amount: price(line.user_count, cycle),
            })
            .collect();
        let total = lines.iter().map(|l| l.amount).sum();

        Self {
            cycle,
            lines,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `"$1260.00 monthly"`.
    pub fn format_amount(&self, amount: Money) -> String {
        format!("${amount} {}", self.cycle.amount_suffix())
    }

    /// `"$90 per user"` / `"$76.50 per user (billed annually)"`.
    pub fn per_user_caption(&self) -> String {
        let rate = per_seat_rate(self.cycle);
        match self.cycle {
            // Whole-dollar rate is shown without cents.
            BillingCycle::Monthly => format!("${} per user", rate.cents() / 100),
            BillingCycle::Annual => format!("${rate} per user (billed annually)"),
        }
    }

    /// `"$12852.00 AU"`.
    pub fn format_total(&self) -> String {
        format!("${} {CURRENCY_LABEL}", self.total)
    }

    /// `"Estimated annual cost excluding GST"`.
    pub fn total_caption(&self) -> String {
        format!("Estimated {} cost excluding GST", self.cycle.adjective())
    }
}
