//! Effective monthly price of a plan for one person.

use rust_decimal::Decimal;

use crate::domain::plan::{Plan, VoiceOption};
use crate::domain::result::{AppliedDiscount, DiscountKind, VoiceNeed};
use crate::domain::settings::CommonSettings;

pub fn yearly(monthly: Decimal) -> Decimal {
    monthly * Decimal::from(12)
}

/// Whether the household's home internet service unlocks the plan's bundle discount.
pub fn home_internet_applies(plan: &Plan, settings: &CommonSettings) -> bool {
    let discount = &plan.home_internet_discount;
    discount.available && settings.home_internet.is_eligible_for(&discount.target_services)
}

/// Whether any held card unlocks the plan's card discount.
pub fn card_applies(plan: &Plan, settings: &CommonSettings) -> bool {
    let discount = &plan.card_discount;
    discount.available && settings.holds_eligible_card(&discount.target_cards)
}

/// The add-on the person would buy for the given voice tier, if the plan sells one.
pub fn voice_add_on(plan: &Plan, need: VoiceNeed) -> Option<&VoiceOption> {
    match need {
        VoiceNeed::None => None,
        VoiceNeed::Limited => plan.voice_options.iter().find(|option| option.covers_short_calls()),
        VoiceNeed::Unlimited => plan.voice_options.iter().find(|option| option.unlimited),
    }
}

/// Monthly price after tier resolution, the voice add-on and every eligible discount.
///
/// `include_family` controls the per-line family discount; household patterns leave it
/// out and deduct it once for the whole group. The result is floored at zero and the
/// returned list records exactly the subtractions that were made.
pub fn calculate_monthly_price(
    plan: &Plan,
    usage_gb: f64,
    voice: VoiceNeed,
    settings: &CommonSettings,
    include_family: bool,
) -> (Decimal, Vec<AppliedDiscount>) {
    let mut price = base_price(plan, usage_gb);
    let mut applied = Vec::new();

    if let Some(option) = voice_add_on(plan, voice) {
        price += option.price;
    }

    if let Some(amount) = plan.home_internet_discount.discount_amount {
        if home_internet_applies(plan, settings) {
            price -= amount;
            applied.push(AppliedDiscount {
                kind: DiscountKind::HomeInternet,
                name: "Home internet bundle discount".to_string(),
                amount,
            });
        }
    }

    if let Some(amount) = plan.card_discount.discount_amount {
        if card_applies(plan, settings) {
            price -= amount;
            applied.push(AppliedDiscount {
                kind: DiscountKind::Card,
                name: "Card payment discount".to_string(),
                amount,
            });
        }
    }

    if include_family && settings.has_family_lines() {
        if let Some(amount) = plan.family_discount.per_line() {
            price -= amount;
            applied.push(AppliedDiscount {
                kind: DiscountKind::Family,
                name: format!("Family discount ({} lines)", settings.family_lines),
                amount,
            });
        }
    }

    (price.max(Decimal::ZERO), applied)
}

/// Tiered plans replace the list price with the first tier covering the usage.
fn base_price(plan: &Plan, usage_gb: f64) -> Decimal {
    if plan.is_tiered() {
        plan.tier_price_for(usage_gb).unwrap_or(plan.monthly_price)
    } else {
        plan.monthly_price
    }
}
