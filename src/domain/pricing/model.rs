//! Pricing value types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::types::{PricingError, PricingResult};

/// Customer loyalty tier, serialised as `NEW`, `SILVER` or `GOLD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerTier {
    #[serde(alias = "new")]
    New,
    #[serde(alias = "silver")]
    Silver,
    /// Highest loyalty tier
    #[serde(alias = "gold")]
    Gold,
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::Silver => write!(f, "SILVER"),
            Self::Gold => write!(f, "GOLD"),
        }
    }
}

impl FromStr for CustomerTier {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NEW" => Ok(Self::New),
            "SILVER" => Ok(Self::Silver),
            "GOLD" => Ok(Self::Gold),
            other => Err(PricingError::InvalidInput(format!(
                "unknown customer tier '{}'",
                other
            ))),
        }
    }
}

/// Which pricing strategy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    /// Flat base charge plus rarity-weighted per-pet rate
    Simple,
    /// Rarity and infancy coefficients with tier × volume discounts
    #[default]
    CustomerDependent,
    /// Infancy coefficients with visit-recency volume adjustments
    VisitRecency,
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::CustomerDependent => write!(f, "customer_dependent"),
            Self::VisitRecency => write!(f, "visit_recency"),
        }
    }
}

impl FromStr for CalculatorKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "simple" => Ok(Self::Simple),
            "customer_dependent" => Ok(Self::CustomerDependent),
            "visit_recency" => Ok(Self::VisitRecency),
            other => Err(PricingError::InvalidInput(format!(
                "unknown calculator '{}'",
                other
            ))),
        }
    }
}

/// Caller-supplied rates. What each rate means is up to the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateParameters {
    /// Flat charge (rate A)
    pub base_charge: f64,
    /// Per-pet rate (rate B)
    pub price_per_pet: f64,
}

impl RateParameters {
    pub fn new(base_charge: f64, price_per_pet: f64) -> Self {
        Self {
            base_charge,
            price_per_pet,
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        for (name, value) in [
            ("base_charge", self.base_charge),
            ("price_per_pet", self.price_per_pet),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PricingError::InvalidInput(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Result of a pricing run
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub calculator: CalculatorKind,
    pub pet_count: usize,
    /// Volume score the policy was evaluated at
    pub volume_score: u32,
    /// Σ price_per_pet × coefficient, before any tier or volume adjustment
    pub subtotal: f64,
    /// Final price, never negative
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_tier_parses_case_insensitively() {
        assert_eq!("gold".parse::<CustomerTier>().unwrap(), CustomerTier::Gold);
        assert_eq!(" Silver ".parse::<CustomerTier>().unwrap(), CustomerTier::Silver);
        assert_eq!(CustomerTier::New.to_string(), "NEW");
        assert!("platinum".parse::<CustomerTier>().is_err());
    }

    #[test]
    fn customer_tier_serialises_in_upper_case() {
        assert_eq!(serde_json::to_string(&CustomerTier::Silver).unwrap(), "\"SILVER\"");
        let tier: CustomerTier = serde_json::from_str("\"GOLD\"").unwrap();
        assert_eq!(tier, CustomerTier::Gold);
        let tier: CustomerTier = serde_json::from_str("\"new\"").unwrap();
        assert_eq!(tier, CustomerTier::New);
        assert!(serde_json::from_str::<CustomerTier>("\"platinum\"").is_err());
    }

    #[test]
    fn calculator_kind_round_trips_through_display() {
        for kind in [
            CalculatorKind::Simple,
            CalculatorKind::CustomerDependent,
            CalculatorKind::VisitRecency,
        ] {
            assert_eq!(kind.to_string().parse::<CalculatorKind>().unwrap(), kind);
        }
        assert_eq!(
            "visit-recency".parse::<CalculatorKind>().unwrap(),
            CalculatorKind::VisitRecency
        );
    }

    #[test]
    fn negative_or_nan_rates_are_rejected() {
        assert!(RateParameters::new(0.0, 0.0).validate().is_ok());
        assert!(RateParameters::new(-1.0, 10.0).validate().is_err());
        assert!(RateParameters::new(1.0, -0.5).validate().is_err());
        assert!(RateParameters::new(f64::NAN, 1.0).validate().is_err());
        assert!(RateParameters::new(1.0, f64::INFINITY).validate().is_err());
    }
}
