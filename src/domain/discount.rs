//! Tiered discount applied once to the aggregate total of an invoice.
//!
//! A tier `(threshold, percent)` grants `percent` off the whole amount when
//! the total is strictly above `threshold`; the highest matching tier wins.
//! Results are rounded to two decimals, half-up.

use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use thiserror::Error;

const CURRENCY_SCALE: i64 = 2;

#[derive(Debug, Error, PartialEq)]
pub enum DiscountPolicyError {
    #[error("discount percent {0} is outside 0..=100")]
    PercentOutOfRange(BigDecimal),
    #[error("discount threshold {0} is negative")]
    NegativeThreshold(BigDecimal),
    #[error("discount threshold {0} is listed twice")]
    DuplicateThreshold(BigDecimal),
    #[error("malformed discount tier '{0}', expected threshold:percent")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscountTier {
    pub threshold: BigDecimal,
    pub percent: BigDecimal,
}

impl DiscountTier {
    pub fn new(threshold: BigDecimal, percent: BigDecimal) -> Self {
        Self { threshold, percent }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscountPolicy {
    // sorted by threshold, ascending
    tiers: Vec<DiscountTier>,
}

impl DiscountPolicy {
    pub fn new(mut tiers: Vec<DiscountTier>) -> Result<Self, DiscountPolicyError> {
        let hundred = BigDecimal::from(100);
        for tier in &tiers {
            if tier.percent < BigDecimal::zero() || tier.percent > hundred {
                return Err(DiscountPolicyError::PercentOutOfRange(tier.percent.clone()));
            }
            if tier.threshold < BigDecimal::zero() {
                return Err(DiscountPolicyError::NegativeThreshold(
                    tier.threshold.clone(),
                ));
            }
        }
        tiers.sort_by(|a, b| a.threshold.cmp(&b.threshold));
        if let Some(pair) = tiers.windows(2).find(|w| w[0].threshold == w[1].threshold) {
            return Err(DiscountPolicyError::DuplicateThreshold(
                pair[0].threshold.clone(),
            ));
        }
        Ok(Self { tiers })
    }

    /// Policy that never discounts.
    pub fn none() -> Self {
        Self { tiers: Vec::new() }
    }

    pub fn tiers(&self) -> &[DiscountTier] {
        &self.tiers
    }

    /// Percent granted to `total`, zero below the first threshold.
    pub fn percent_for(&self, total: &BigDecimal) -> BigDecimal {
        self.tiers
            .iter()
            .rev()
            .find(|tier| total > &tier.threshold)
            .map(|tier| tier.percent.clone())
            .unwrap_or_else(BigDecimal::zero)
    }

    /// Total after discount, never negative and never above `total`.
    ///
    /// Crossing a threshold never makes a larger invoice cheaper than a
    /// smaller one: the result is floored at the best amount any lower
    /// total could reach.
    pub fn apply(&self, total: &BigDecimal) -> BigDecimal {
        if *total <= BigDecimal::zero() {
            return BigDecimal::zero().with_scale(CURRENCY_SCALE);
        }

        let mut discounted = self.raw(total);
        for tier in self.tiers.iter().take_while(|tier| &tier.threshold < total) {
            let at_threshold = self.raw(&tier.threshold);
            if at_threshold > discounted {
                discounted = at_threshold;
            }
        }

        discounted
            .with_scale_round(CURRENCY_SCALE, RoundingMode::HalfUp)
            .min(total.with_scale_round(CURRENCY_SCALE, RoundingMode::Down))
    }

    fn raw(&self, total: &BigDecimal) -> BigDecimal {
        let hundred = BigDecimal::from(100);
        total * (&hundred - self.percent_for(total)) / hundred
    }
}

impl Default for DiscountPolicy {
    /// 10% above 200.00, 15% above 1000.00.
    fn default() -> Self {
        Self {
            tiers: vec![
                DiscountTier::new(BigDecimal::from(200), BigDecimal::from(10)),
                DiscountTier::new(BigDecimal::from(1000), BigDecimal::from(15)),
            ],
        }
    }
}

/// Parses `threshold:percent` pairs separated by commas, e.g. `200:10,1000:15`.
/// An empty string yields a policy without tiers.
impl FromStr for DiscountPolicy {
    type Err = DiscountPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiers = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                let malformed = || DiscountPolicyError::Malformed(part.to_string());
                let (threshold, percent) = part.split_once(':').ok_or_else(malformed)?;
                let threshold =
                    BigDecimal::from_str(threshold.trim()).map_err(|_| malformed())?;
                let percent = BigDecimal::from_str(percent.trim()).map_err(|_| malformed())?;
                Ok(DiscountTier::new(threshold, percent))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tiers)
    }
}
