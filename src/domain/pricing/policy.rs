//! Tier and recency adjustment policies
//!
//! Both policies are plain lookup tables of [`Adjustment`]s so new tiers or
//! buckets can be added without touching the calculators.

use super::model::CustomerTier;

/// Volume score at which group discounts start
pub const DISCOUNT_MIN_SCORE: u32 = 10;
/// Visits younger than this many days count as recent
pub const RECENT_VISIT_DAYS: i64 = 100;

/// Where the flat base charge enters an adjusted price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseChargeMode {
    /// `subtotal × m`
    Excluded,
    /// `(subtotal + base) × m`
    BeforeMultiplier,
    /// `subtotal × m + base`
    AfterMultiplier,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub multiplier: f64,
    pub base_charge: BaseChargeMode,
}

impl Adjustment {
    /// Leaves the subtotal untouched
    pub const NONE: Adjustment = Adjustment {
        multiplier: 1.0,
        base_charge: BaseChargeMode::Excluded,
    };

    pub const fn new(multiplier: f64, base_charge: BaseChargeMode) -> Self {
        Self {
            multiplier,
            base_charge,
        }
    }

    pub fn apply(&self, subtotal: f64, base_charge: f64) -> f64 {
        match self.base_charge {
            BaseChargeMode::Excluded => subtotal * self.multiplier,
            BaseChargeMode::BeforeMultiplier => (subtotal + base_charge) * self.multiplier,
            BaseChargeMode::AfterMultiplier => subtotal * self.multiplier + base_charge,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierBucket {
    pub tier: CustomerTier,
    /// Lowest volume score this bucket applies to
    pub min_score: u32,
    pub adjustment: Adjustment,
}

impl TierBucket {
    pub const fn new(tier: CustomerTier, min_score: u32, adjustment: Adjustment) -> Self {
        Self {
            tier,
            min_score,
            adjustment,
        }
    }
}

/// Tier × volume bucket → adjustment
#[derive(Debug, Clone, PartialEq)]
pub struct TierPolicy {
    buckets: Vec<TierBucket>,
    fallback: Adjustment,
}

impl TierPolicy {
    pub fn new(buckets: Vec<TierBucket>, fallback: Adjustment) -> Self {
        Self { buckets, fallback }
    }

    /// New customers get 5% off; the base charge is discounted too
    pub fn simple() -> Self {
        Self::new(
            vec![TierBucket::new(
                CustomerTier::New,
                0,
                Adjustment::new(0.95, BaseChargeMode::BeforeMultiplier),
            )],
            Adjustment::new(1.0, BaseChargeMode::BeforeMultiplier),
        )
    }

    /// Gold always pays 80% plus the base charge; New and Silver only get a
    /// volume rate once the group reaches [`DISCOUNT_MIN_SCORE`].
    pub fn customer_dependent() -> Self {
        Self::new(
            vec![
                TierBucket::new(
                    CustomerTier::Gold,
                    0,
                    Adjustment::new(0.8, BaseChargeMode::AfterMultiplier),
                ),
                TierBucket::new(
                    CustomerTier::New,
                    DISCOUNT_MIN_SCORE,
                    Adjustment::new(0.95, BaseChargeMode::AfterMultiplier),
                ),
                TierBucket::new(
                    CustomerTier::Silver,
                    DISCOUNT_MIN_SCORE,
                    Adjustment::new(0.9, BaseChargeMode::BeforeMultiplier),
                ),
            ],
            Adjustment::NONE,
        )
    }

    fn bucket_for(&self, tier: CustomerTier, volume_score: u32) -> Option<&TierBucket> {
        self.buckets
            .iter()
            .filter(|b| b.tier == tier && b.min_score <= volume_score)
            .max_by_key(|b| b.min_score)
    }

    /// Adjustment of the tier's bucket with the highest floor not above `volume_score`
    pub fn adjustment_for(&self, tier: CustomerTier, volume_score: u32) -> Adjustment {
        self.bucket_for(tier, volume_score)
            .map(|b| b.adjustment)
            .unwrap_or(self.fallback)
    }

    /// Adjusted total of a group.
    ///
    /// A group that has just entered a volume bucket never pays less than the
    /// most any group below that bucket's floor can pay. `max_price_per_score`
    /// bounds the subtotal a single volume point can add.
    pub fn price(
        &self,
        tier: CustomerTier,
        volume_score: u32,
        subtotal: f64,
        base_charge: f64,
        max_price_per_score: f64,
    ) -> f64 {
        let adjusted = self
            .adjustment_for(tier, volume_score)
            .apply(subtotal, base_charge);
        adjusted.max(self.bucket_entry_price(tier, volume_score, base_charge, max_price_per_score))
    }

    /// Highest total reachable by a group scoring below the floor of the
    /// bucket `volume_score` falls into
    fn bucket_entry_price(
        &self,
        tier: CustomerTier,
        volume_score: u32,
        base_charge: f64,
        max_price_per_score: f64,
    ) -> f64 {
        match self.bucket_for(tier, volume_score) {
            Some(bucket) if bucket.min_score > 0 => {
                let below = bucket.min_score - 1;
                self.price(
                    tier,
                    below,
                    max_price_per_score * below as f64,
                    base_charge,
                    max_price_per_score,
                )
            }
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecencyBucket {
    /// Applies when the last visit is strictly fewer days ago than this
    pub below_days: i64,
    pub adjustment: Adjustment,
}

/// Days since last visit → adjustment of the running total
#[derive(Debug, Clone, PartialEq)]
pub struct RecencyPolicy {
    min_score: u32,
    buckets: Vec<RecencyBucket>,
    fallback: Adjustment,
}

impl RecencyPolicy {
    pub fn new(min_score: u32, mut buckets: Vec<RecencyBucket>, fallback: Adjustment) -> Self {
        buckets.sort_by_key(|b| b.below_days);
        Self {
            min_score,
            buckets,
            fallback,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            DISCOUNT_MIN_SCORE,
            vec![RecencyBucket {
                below_days: RECENT_VISIT_DAYS,
                adjustment: Adjustment::new(2.0, BaseChargeMode::AfterMultiplier),
            }],
            Adjustment::new(2.0, BaseChargeMode::BeforeMultiplier),
        )
    }

    /// Volume score from which the running total gets adjusted
    pub fn min_score(&self) -> u32 {
        self.min_score
    }

    /// Pets never seen fall into the fallback bucket
    pub fn adjustment_for(&self, days_since_last_visit: Option<i64>) -> Adjustment {
        days_since_last_visit
            .and_then(|days| self.buckets.iter().find(|b| days < b.below_days))
            .map(|b| b.adjustment)
            .unwrap_or(self.fallback)
    }
}
