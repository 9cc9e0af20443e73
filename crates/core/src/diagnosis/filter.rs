use crate::domain::plan::Plan;
use crate::domain::profile::UserProfile;
use crate::domain::settings::{CommonSettings, OverseasUsage, SupportNeed, TetheringUsage};

use super::estimator::estimate_data_usage;

/// A plan may fall short of the estimate by this share before it is excluded.
pub const CAPACITY_TOLERANCE: f64 = 0.8;

/// Whether `capacity_gb` reaches `share` of `usage_gb`, compared in whole megabytes so
/// binary float drift cannot move a plan across a boundary (4.8GB against 80% of 6GB).
pub fn covers(capacity_gb: f64, usage_gb: f64, share: f64) -> bool {
    whole_mb(capacity_gb) >= whole_mb(usage_gb * share)
}

fn whole_mb(gb: f64) -> i64 {
    (gb * 1000.0).round() as i64
}

/// Why a plan was dropped; the first failing rule wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exclusion {
    Capacity,
    ShopSupport,
    Roaming,
    Tethering,
}

/// Plans structurally compatible with the person's hard constraints, in catalog order.
pub fn filter_plans<'a>(
    plans: &'a [Plan],
    profile: &UserProfile,
    settings: &CommonSettings,
) -> Vec<&'a Plan> {
    let usage_gb = estimate_data_usage(profile);
    plans.iter().filter(|plan| exclusion_for(plan, usage_gb, settings).is_none()).collect()
}

pub fn exclusion_for(plan: &Plan, usage_gb: f64, settings: &CommonSettings) -> Option<Exclusion> {
    // Tiered plans stay in; their price is resolved against the tiers later.
    if let Some(capacity) = plan.data_capacity_gb {
        if !covers(capacity, usage_gb, CAPACITY_TOLERANCE) && !plan.is_tiered() {
            return Some(Exclusion::Capacity);
        }
    }

    if settings.support_need == SupportNeed::ShopRequired && !plan.shop_support.available {
        return Some(Exclusion::ShopSupport);
    }

    if settings.overseas_usage != OverseasUsage::Rarely && !plan.overseas_roaming {
        return Some(Exclusion::Roaming);
    }

    if settings.tethering_usage != TetheringUsage::Never && !plan.tethering_available {
        return Some(Exclusion::Tethering);
    }

    None
}
