//! Attribute coefficient tables
//!
//! Each table is an ordered list of rules; the first rule matching a pet's
//! attributes supplies its price coefficient and volume score.

use super::classifier::PetAttributes;

/// Uplift for rare species
pub const RARE_COEFFICIENT: f64 = 1.2;
/// Extra uplift for infants, stacked on top of the base coefficient
pub const INFANCY_COEFFICIENT: f64 = 1.4;
/// Volume points an infant contributes towards discounts
pub const INFANT_VOLUME_SCORE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientRule {
    /// `None` matches any rarity
    pub rare: Option<bool>,
    /// `None` matches any age
    pub infant: Option<bool>,
    pub coefficient: f64,
    pub volume_score: u32,
}

impl CoefficientRule {
    pub const fn new(rare: Option<bool>, infant: Option<bool>, coefficient: f64, volume_score: u32) -> Self {
        Self {
            rare,
            infant,
            coefficient,
            volume_score,
        }
    }

    fn matches(&self, attrs: &PetAttributes) -> bool {
        self.rare.map_or(true, |r| r == attrs.is_rare)
            && self.infant.map_or(true, |i| i == attrs.is_infant)
    }
}

/// Coefficient and volume score for one pet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficient {
    pub value: f64,
    pub volume_score: u32,
}

impl Coefficient {
    pub const BASELINE: Coefficient = Coefficient {
        value: 1.0,
        volume_score: 1,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    rules: Vec<CoefficientRule>,
}

impl CoefficientTable {
    pub fn new(rules: Vec<CoefficientRule>) -> Self {
        Self { rules }
    }

    /// Rare pets cost more; age is ignored
    pub fn rarity() -> Self {
        Self::new(vec![
            CoefficientRule::new(Some(true), None, RARE_COEFFICIENT, 1),
            CoefficientRule::new(Some(false), None, 1.0, 1),
        ])
    }

    /// Rarity and infancy stack; infants weigh double in volume
    pub fn rarity_and_infancy() -> Self {
        Self::new(vec![
            CoefficientRule::new(
                Some(true),
                Some(true),
                RARE_COEFFICIENT * INFANCY_COEFFICIENT,
                INFANT_VOLUME_SCORE,
            ),
            CoefficientRule::new(Some(true), Some(false), RARE_COEFFICIENT, 1),
            CoefficientRule::new(Some(false), Some(true), RARE_COEFFICIENT, INFANT_VOLUME_SCORE),
            CoefficientRule::new(Some(false), Some(false), 1.0, 1),
        ])
    }

    /// Every pet carries the base uplift, infants the infancy uplift on top
    pub fn infancy() -> Self {
        Self::new(vec![
            CoefficientRule::new(
                None,
                Some(true),
                RARE_COEFFICIENT * INFANCY_COEFFICIENT,
                INFANT_VOLUME_SCORE,
            ),
            CoefficientRule::new(None, Some(false), RARE_COEFFICIENT, 1),
        ])
    }

    pub fn lookup(&self, attrs: &PetAttributes) -> Coefficient {
        self.rules
            .iter()
            .find(|rule| rule.matches(attrs))
            .map(|rule| Coefficient {
                value: rule.coefficient,
                volume_score: rule.volume_score,
            })
            .unwrap_or(Coefficient::BASELINE)
    }

    /// Highest coefficient a single volume point can carry, unmatched pets included
    pub fn max_coefficient_per_score(&self) -> f64 {
        self.rules
            .iter()
            .map(|rule| rule.coefficient / rule.volume_score.max(1) as f64)
            .fold(
                Coefficient::BASELINE.value / Coefficient::BASELINE.volume_score as f64,
                f64::max,
            )
    }

    pub fn rules(&self) -> &[CoefficientRule] {
        &self.rules
    }
}
