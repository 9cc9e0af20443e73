//! Weighted multi-criteria scoring of filtered plans.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::plan::Plan;
use crate::domain::profile::UserProfile;
use crate::domain::result::{PlanScore, ScoreBreakdown, VoiceNeed};
use crate::domain::settings::{CommonSettings, Priority, SupportNeed};

use super::estimator::{estimate_data_usage, recommend_voice_option};
use super::filter::covers;
use super::pricing::{calculate_monthly_price, card_applies, home_internet_applies, yearly};
use super::DEFAULT_WEIGHTS;

/// Score given to every plan when the filtered set has a single price point.
pub const NEUTRAL_PRICE_SCORE: u8 = 50;
/// Above this many GB a capacity-unlimited plan is a full fit.
const UNLIMITED_FIT_THRESHOLD_GB: f64 = 20.0;
const DISCOUNT_BASE_SCORE: u8 = 50;
const DISCOUNT_STEP: u8 = 25;
const FIVE_G_BONUS: u8 = 5;

/// Weights for the six sub-scores. They always sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub price: f64,
    pub quality: f64,
    pub data: f64,
    pub voice: f64,
    pub discount: f64,
    pub support: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl ScoringWeights {
    /// Doubles the weight of a dominant price, quality or support priority and
    /// renormalizes. Other priorities keep the base weights.
    pub fn for_priority(priority: Priority) -> Self {
        let mut weights = DEFAULT_WEIGHTS;
        match priority {
            Priority::Price => weights.price *= 2.0,
            Priority::Quality => weights.quality *= 2.0,
            Priority::Support => weights.support *= 2.0,
            Priority::Data | Priority::Points | Priority::Balance => return weights,
        }
        weights.normalized()
    }

    pub fn sum(&self) -> f64 {
        self.price + self.quality + self.data + self.voice + self.discount + self.support
    }

    fn normalized(self) -> Self {
        let total = self.sum();
        Self {
            price: self.price / total,
            quality: self.quality / total,
            data: self.data / total,
            voice: self.voice / total,
            discount: self.discount / total,
            support: self.support / total,
        }
    }

    /// Rounded weighted sum, clamped to 0..=100.
    pub fn total(&self, breakdown: &ScoreBreakdown) -> u8 {
        let total = f64::from(breakdown.price) * self.price
            + f64::from(breakdown.quality) * self.quality
            + f64::from(breakdown.data) * self.data
            + f64::from(breakdown.voice) * self.voice
            + f64::from(breakdown.discount) * self.discount
            + f64::from(breakdown.support) * self.support;
        total.round().clamp(0.0, 100.0) as u8
    }
}

/// Min and max base monthly price across the whole filtered set.
///
/// The price sub-score is relative to the set, so a plan is never scored in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    pub fn from_plans<'a, I>(plans: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Plan>,
    {
        plans.into_iter().fold(None, |range, plan| {
            let price = plan.monthly_price;
            Some(match range {
                None => Self { min: price, max: price },
                Some(Self { min, max }) => Self { min: min.min(price), max: max.max(price) },
            })
        })
    }

    pub fn score(&self, price: Decimal) -> u8 {
        let spread = self.max - self.min;
        if spread.is_zero() {
            return NEUTRAL_PRICE_SCORE;
        }

        let ratio = ((self.max - price) / spread).to_f64().unwrap_or(0.0);
        (ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

pub fn quality_score(plan: &Plan) -> u8 {
    let bonus = if plan.has_5g { FIVE_G_BONUS } else { 0 };
    plan.network_type.quality_score().saturating_add(bonus).min(100)
}

pub fn data_fit_score(plan: &Plan, usage_gb: f64) -> u8 {
    let Some(capacity) = plan.data_capacity_gb else {
        return if usage_gb > UNLIMITED_FIT_THRESHOLD_GB { 100 } else { 80 };
    };

    if covers(capacity, usage_gb, 1.5) {
        90
    } else if covers(capacity, usage_gb, 1.0) {
        100
    } else if covers(capacity, usage_gb, 0.8) {
        70
    } else {
        40
    }
}

pub fn voice_fit_score(plan: &Plan, need: VoiceNeed) -> u8 {
    let short = plan.has_short_call_option();
    let unlimited = plan.has_unlimited_calls();
    match need {
        VoiceNeed::None => 100,
        VoiceNeed::Limited if short => 100,
        VoiceNeed::Limited if unlimited => 80,
        VoiceNeed::Limited => 60,
        VoiceNeed::Unlimited if unlimited => 100,
        VoiceNeed::Unlimited if short => 70,
        VoiceNeed::Unlimited => 50,
    }
}

pub fn discount_score(plan: &Plan, settings: &CommonSettings) -> u8 {
    let mut score = DISCOUNT_BASE_SCORE;
    if home_internet_applies(plan, settings) {
        score += DISCOUNT_STEP;
    }
    if card_applies(plan, settings) {
        score += DISCOUNT_STEP;
    }
    score.min(100)
}

pub fn support_score(plan: &Plan, settings: &CommonSettings) -> u8 {
    let shop = plan.shop_support.available;
    match settings.support_need {
        SupportNeed::ShopRequired if shop => 100,
        SupportNeed::ShopRequired => 0,
        SupportNeed::ShopPreferred if shop => 100,
        SupportNeed::ShopPreferred => 60,
        SupportNeed::OnlineOk => 100,
        SupportNeed::Unspecified => 70,
    }
}

pub fn warnings_for(plan: &Plan, usage_gb: f64, settings: &CommonSettings) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(capacity) = plan.data_capacity_gb {
        if !covers(capacity, usage_gb, 1.0) {
            warnings.push(format!(
                "Estimated usage ({usage_gb}GB) may exceed the {capacity}GB data allowance"
            ));
        }
    }

    if settings.support_need.wants_shop() && !plan.shop_support.available {
        warnings.push("No in-store support is available".to_string());
    }

    if plan.lacks_carrier_email() {
        warnings.push("Carrier email is not available".to_string());
    }

    warnings
}

/// Per-person inputs shared by every plan scored in one pass.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub usage_gb: f64,
    pub voice: VoiceNeed,
    pub settings: &'a CommonSettings,
    pub weights: ScoringWeights,
    pub range: PriceRange,
}

impl<'a> ScoringContext<'a> {
    pub fn new(profile: &UserProfile, settings: &'a CommonSettings, range: PriceRange) -> Self {
        Self {
            usage_gb: estimate_data_usage(profile),
            voice: recommend_voice_option(profile),
            settings,
            weights: ScoringWeights::for_priority(settings.priority),
            range,
        }
    }

    pub fn breakdown(&self, plan: &Plan) -> ScoreBreakdown {
        ScoreBreakdown {
            price: self.range.score(plan.monthly_price),
            quality: quality_score(plan),
            data: data_fit_score(plan, self.usage_gb),
            voice: voice_fit_score(plan, self.voice),
            discount: discount_score(plan, self.settings),
            support: support_score(plan, self.settings),
        }
    }

    pub fn score(&self, plan: &Plan) -> PlanScore {
        let breakdown = self.breakdown(plan);
        let (monthly_price, applied_discounts) =
            calculate_monthly_price(plan, self.usage_gb, self.voice, self.settings, true);

        PlanScore {
            plan: plan.clone(),
            total_score: self.weights.total(&breakdown),
            breakdown,
            monthly_price,
            yearly_price: yearly(monthly_price),
            savings_per_year: None,
            applied_discounts,
            warnings: warnings_for(plan, self.usage_gb, self.settings),
            recommended_voice_option: self.voice,
        }
    }
}

/// Scores one plan against a pre-computed price range of the filtered set.
pub fn score_plan(
    plan: &Plan,
    profile: &UserProfile,
    settings: &CommonSettings,
    range: &PriceRange,
) -> PlanScore {
    ScoringContext::new(profile, settings, *range).score(plan)
}

/// Scores every filtered plan and ranks by total score, descending.
///
/// The sort is stable, so equal scores keep catalog order.
pub fn score_plans(
    filtered: &[&Plan],
    profile: &UserProfile,
    settings: &CommonSettings,
) -> Vec<PlanScore> {
    let Some(range) = PriceRange::from_plans(filtered.iter().copied()) else {
        return Vec::new();
    };

    let context = ScoringContext::new(profile, settings, range);
    let mut scored: Vec<PlanScore> = filtered.iter().map(|plan| context.score(plan)).collect();
    scored.sort_by(|left, right| right.total_score.cmp(&left.total_score));
    scored
}
