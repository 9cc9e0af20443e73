//! Plan diagnosis pipeline: estimate, filter, score, rank, then aggregate.

pub mod engine;
pub mod estimator;
pub mod family;
pub mod filter;
pub mod pricing;
pub mod scoring;
pub mod tips;

pub use engine::{
    calculate_diagnosis, Clock, DiagnosisEngine, DiagnosisRuntime, FixedClock, SystemClock,
};
pub use estimator::{estimate_data_usage, estimate_monthly_call_minutes, recommend_voice_option};
pub use family::{dominant_carrier, family_patterns, Household};
pub use filter::filter_plans;
pub use pricing::calculate_monthly_price;
pub use scoring::{score_plan, score_plans, PriceRange, ScoringWeights};
pub use tips::{generate_tips, merge_tips};

/// Base weights before any priority boost.
pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    price: 0.25,
    quality: 0.15,
    data: 0.20,
    voice: 0.10,
    discount: 0.15,
    support: 0.15,
};
