use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Money;
use crate::seats::SeatCount;

/// List price of one seat for one month.
pub const MONTHLY_SEAT_RATE: Money = Money::from_major(90);

/// Discount applied to the annualised total when billing annually.
pub const ANNUAL_DISCOUNT_PERCENT: u64 = 15;

/// How the customer is billed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Annual,
}

impl BillingCycle {
    pub fn all() -> &'static [BillingCycle] {
        &[BillingCycle::Monthly, BillingCycle::Annual]
    }

    /// Toggle label ("Monthly" / "Annually").
    pub fn label(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Annual => "Annually",
        }
    }

    /// Suffix after an amount: "$1260.00 monthly", "$12852.00 annually".
    pub fn amount_suffix(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Annual => "annually",
        }
    }

    /// Adjective used in the estimate caption ("Estimated annual cost").
    pub fn adjective(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Annual => "annual",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown billing cycle '{0}' (expected monthly or annual)")]
pub struct ParseBillingCycleError(String);

impl FromStr for BillingCycle {
    type Err = ParseBillingCycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" => Ok(BillingCycle::Monthly),
            "annual" | "annually" | "yearly" | "year" => Ok(BillingCycle::Annual),
            _ => Err(ParseBillingCycleError(s.to_string())),
        }
    }
}

impl core::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.adjective())
    }
}

/// Price of `seats` users for one billing period.
///
/// Monthly: `seats × 90`. Annual: `seats × 90 × 12`, less 15%.
pub fn price(seats: SeatCount, cycle: BillingCycle) -> Money {
    let monthly = MONTHLY_SEAT_RATE.cents() * u64::from(seats.get());
    match cycle {
        BillingCycle::Monthly => Money::from_cents(monthly),
        BillingCycle::Annual => {
            Money::from_cents(monthly * 12 * (100 - ANNUAL_DISCOUNT_PERCENT) / 100)
        }
    }
}

/// Effective price of one seat per month under `cycle` (90.00 or 76.50).
pub fn per_seat_rate(cycle: BillingCycle) -> Money {
    match cycle {
        BillingCycle::Monthly => MONTHLY_SEAT_RATE,
        BillingCycle::Annual => Money::from_cents(
            MONTHLY_SEAT_RATE.cents() * (100 - ANNUAL_DISCOUNT_PERCENT) / 100,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seats::MAX_SEATS;

    fn seats(n: u32) -> SeatCount {
        SeatCount::new(n)
    }

    #[test]
    fn zero_seats_cost_nothing() {
        assert_eq!(price(seats(0), BillingCycle::Monthly), Money::ZERO);
        assert_eq!(price(seats(0), BillingCycle::Annual), Money::ZERO);
    }

    #[test]
    fn default_seed_prices_match_published_figures() {
        assert_eq!(price(seats(14), BillingCycle::Monthly), Money::from_major(1_260));
        assert_eq!(price(seats(14), BillingCycle::Annual), Money::from_major(12_852));
        assert_eq!(price(seats(14), BillingCycle::Annual).to_string(), "12852.00");
    }

    #[test]
    fn per_seat_rates() {
        assert_eq!(per_seat_rate(BillingCycle::Monthly).to_string(), "90.00");
        assert_eq!(per_seat_rate(BillingCycle::Annual).to_string(), "76.50");
    }

    #[test]
    fn annual_price_is_twelve_discounted_months() {
        let n = seats(3);
        assert_eq!(
            price(n, BillingCycle::Annual).cents(),
            per_seat_rate(BillingCycle::Annual).cents() * 12 * 3
        );
    }

    #[test]
    fn billing_cycle_parses_loosely() {
        assert_eq!("Monthly".parse::<BillingCycle>().unwrap(), BillingCycle::Monthly);
        assert_eq!(" annually ".parse::<BillingCycle>().unwrap(), BillingCycle::Annual);
        assert!("weekly".parse::<BillingCycle>().is_err());
    }

    #[test]
    fn billing_cycle_defaults_to_monthly() {
        assert_eq!(BillingCycle::default(), BillingCycle::Monthly);
    }

    #[test]
    fn max_seats_do_not_overflow() {
        let annual = price(seats(MAX_SEATS), BillingCycle::Annual);
        assert_eq!(annual.cents(), u64::from(MAX_SEATS) * 91_800);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: monthly price is exactly 90 per seat.
            #[test]
            fn monthly_is_ninety_per_seat(n in 0u32..=MAX_SEATS) {
                let expected = Money::from_major(90 * u64::from(n));
                prop_assert_eq!(price(seats(n), BillingCycle::Monthly), expected);
            }

            /// Property: annual price is n × 90 × 12 × 0.85, i.e. 918 per seat.
            #[test]
            fn annual_is_discounted_twelve_months(n in 0u32..=MAX_SEATS) {
                let expected = Money::from_major(918 * u64::from(n));
                prop_assert_eq!(price(seats(n), BillingCycle::Annual), expected);
            }

            /// Property: for a fixed cycle, price never decreases as seats grow.
            #[test]
            fn price_is_monotonic_in_seats(a in 0u32..=MAX_SEATS, b in 0u32..=MAX_SEATS) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                for cycle in BillingCycle::all() {
                    prop_assert!(price(seats(lo), *cycle) <= price(seats(hi), *cycle));
                }
            }
        }
    }
}
