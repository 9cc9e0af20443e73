use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::plan::{CarrierId, Plan};

/// Voice add-on tier recommended for a person.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceNeed {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "5min")]
    Limited,
    #[serde(rename = "unlimited")]
    Unlimited,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingTip {
    pub id: String,
    pub title: String,
    pub description: String,
    pub estimated_saving: Option<String>,
}

/// Six independent sub-scores, each within 0..=100.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub price: u8,
    pub quality: u8,
    pub data: u8,
    pub voice: u8,
    pub discount: u8,
    pub support: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    HomeInternet,
    Card,
    Family,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub kind: DiscountKind,
    pub name: String,
    pub amount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanScore {
    pub plan: Plan,
    pub total_score: u8,
    pub breakdown: ScoreBreakdown,
    pub monthly_price: Decimal,
    pub yearly_price: Decimal,
    pub savings_per_year: Option<Decimal>,
    pub applied_discounts: Vec<AppliedDiscount>,
    pub warnings: Vec<String>,
    pub recommended_voice_option: VoiceNeed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersonResult {
    pub person_index: usize,
    pub estimated_data_usage: f64,
    pub recommended_voice_option: VoiceNeed,
    pub ranked_plans: Vec<PlanScore>,
}

impl PersonResult {
    pub fn top_plan(&self) -> Option<&PlanScore> {
        self.ranked_plans.first()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersonPlanAssignment {
    pub person_index: usize,
    pub plan: Plan,
    pub monthly_price: Decimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyPatternKind {
    SameCarrier,
    Separate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FamilyPattern {
    pub kind: FamilyPatternKind,
    pub carrier_id: Option<CarrierId>,
    pub carrier_name: Option<String>,
    pub total_monthly_price: Decimal,
    pub total_yearly_price: Decimal,
    pub savings_per_year: Option<Decimal>,
    /// The one household-wide deduction of the same-carrier pattern.
    pub family_discount: Option<AppliedDiscount>,
    pub person_plans: Vec<PersonPlanAssignment>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisSummary {
    pub total_persons: usize,
    /// `None` when nobody supplied a current fee; savings are then unknown rather than zero.
    pub current_total_monthly_fee: Option<Decimal>,
    pub recommended_total_monthly_fee: Decimal,
    pub estimated_yearly_savings: Option<Decimal>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub summary: DiagnosisSummary,
    pub saving_tips: Vec<SavingTip>,
    pub person_results: Vec<PersonResult>,
    /// Only present for households of two or more.
    pub family_patterns: Option<Vec<FamilyPattern>>,
    pub global_warnings: Vec<String>,
    pub diagnosed_at: DateTime<Utc>,
}
