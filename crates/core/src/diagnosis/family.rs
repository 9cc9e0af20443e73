//! Household purchasing strategies built on top of the per-person rankings.

use rust_decimal::Decimal;

use crate::catalog::Catalog;
use crate::domain::plan::CarrierId;
use crate::domain::result::{
    AppliedDiscount, DiscountKind, FamilyPattern, FamilyPatternKind, PersonPlanAssignment,
    PersonResult, PlanScore,
};
use crate::domain::settings::{CommonSettings, FamilyCarrierPreference};

use super::pricing::{calculate_monthly_price, yearly};

/// Household-wide inputs for building patterns.
#[derive(Debug, Clone, Copy)]
pub struct Household<'a> {
    pub persons: &'a [PersonResult],
    pub settings: &'a CommonSettings,
    pub catalog: &'a Catalog,
    /// What the household pays today, with persons of unknown fee priced at their top
    /// plan. `None` when nobody supplied a fee.
    pub savings_baseline: Option<Decimal>,
    /// How many of each person's top plans vote for the shared carrier.
    pub top_k: usize,
}

/// Same-carrier and separate patterns, or nothing when any person has no eligible plan.
pub fn family_patterns(household: &Household<'_>) -> Vec<FamilyPattern> {
    let Some(separate) = separate_pattern(household) else {
        return Vec::new();
    };

    let mut patterns = Vec::with_capacity(2);
    if let Some(same_carrier) = same_carrier_pattern(household) {
        patterns.push(same_carrier);
    }
    if household.settings.family_carrier_preference == FamilyCarrierPreference::Separate {
        patterns.insert(0, separate);
    } else {
        patterns.push(separate);
    }
    patterns
}

/// Everyone takes their own top-ranked plan.
pub fn separate_pattern(household: &Household<'_>) -> Option<FamilyPattern> {
    let person_plans = household
        .persons
        .iter()
        .map(|person| person.top_plan().map(|top| assignment(person, top, top.monthly_price)))
        .collect::<Option<Vec<_>>>()?;

    let total: Decimal = person_plans.iter().map(|assignment| assignment.monthly_price).sum();
    let distinct_carriers = {
        let mut carriers: Vec<_> = person_plans.iter().map(|a| &a.plan.carrier_id).collect();
        carriers.sort();
        carriers.dedup();
        carriers.len()
    };

    let mut cons = vec!["No household-wide family discount".to_string()];
    if distinct_carriers > 1 {
        cons.push(format!("{distinct_carriers} carriers to manage, each with its own bill"));
    }

    Some(FamilyPattern {
        kind: FamilyPatternKind::Separate,
        carrier_id: None,
        carrier_name: None,
        total_monthly_price: total,
        total_yearly_price: yearly(total),
        savings_per_year: household.savings_baseline.map(|baseline| yearly(baseline - total)),
        family_discount: None,
        person_plans,
        pros: vec![
            "Each person gets the plan that fits their own usage best".to_string(),
            "Members can switch carriers independently".to_string(),
        ],
        cons,
    })
}

/// Everyone moves to the carrier that dominates the household's top picks and shares
/// one family discount.
pub fn same_carrier_pattern(household: &Household<'_>) -> Option<FamilyPattern> {
    let carrier = dominant_carrier(household.persons, household.top_k)?;

    let mut person_plans = Vec::with_capacity(household.persons.len());
    let mut fallbacks = 0;
    for person in household.persons {
        let on_carrier = person.ranked_plans.iter().find(|score| score.plan.carrier_id == carrier);
        if on_carrier.is_none() {
            fallbacks += 1;
        }
        let chosen = on_carrier.or_else(|| person.top_plan())?;
        // The family discount is deducted once for the group below.
        let (price, _) = calculate_monthly_price(
            &chosen.plan,
            person.estimated_data_usage,
            person.recommended_voice_option,
            household.settings,
            false,
        );
        person_plans.push(assignment(person, chosen, price));
    }

    let naive_total: Decimal = person_plans.iter().map(|assignment| assignment.monthly_price).sum();
    let family_discount = group_discount(&person_plans, &carrier, household.persons.len());
    let deduction = family_discount.as_ref().map_or(Decimal::ZERO, |discount| discount.amount);
    let total = (naive_total - deduction).max(Decimal::ZERO);

    let carrier_name = household.catalog.carrier_name(&carrier).map(str::to_string);
    let display_name = carrier_name.clone().unwrap_or_else(|| carrier.to_string());

    let mut pros = vec![format!("Single contract and bill with {display_name}")];
    if let Some(discount) = &family_discount {
        pros.push(format!("{} saves {} yen per month", discount.name, discount.amount));
    }
    let mut cons = Vec::new();
    if fallbacks > 0 {
        cons.push(format!(
            "{fallbacks} member(s) have no suitable {display_name} plan and keep their own pick"
        ));
    }
    if family_discount.is_none() {
        cons.push(format!("No family discount applies with {display_name}"));
    }
    cons.push("Some members may pay for more capacity than they use".to_string());

    Some(FamilyPattern {
        kind: FamilyPatternKind::SameCarrier,
        carrier_id: Some(carrier),
        carrier_name,
        total_monthly_price: total,
        total_yearly_price: yearly(total),
        savings_per_year: household.savings_baseline.map(|baseline| yearly(baseline - total)),
        family_discount,
        person_plans,
        pros,
        cons,
    })
}

/// Carrier appearing most often across every person's top `top_k` plans.
///
/// Ties go to the carrier encountered first, scanning persons in order and each
/// person's plans in rank order.
pub fn dominant_carrier(persons: &[PersonResult], top_k: usize) -> Option<CarrierId> {
    let mut tally: Vec<(&CarrierId, usize)> = Vec::new();
    for person in persons {
        for score in person.ranked_plans.iter().take(top_k) {
            let carrier = &score.plan.carrier_id;
            match tally.iter_mut().find(|(seen, _)| *seen == carrier) {
                Some((_, count)) => *count += 1,
                None => tally.push((carrier, 1)),
            }
        }
    }

    let mut best: Option<(&CarrierId, usize)> = None;
    for (carrier, count) in tally {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((carrier, count));
        }
    }
    best.map(|(carrier, _)| carrier.clone())
}

/// Per-line amount times the household size, capped at the plan's line limit. The
/// amount comes from the first assigned plan on the carrier that offers it.
fn group_discount(
    person_plans: &[PersonPlanAssignment],
    carrier: &CarrierId,
    person_count: usize,
) -> Option<AppliedDiscount> {
    let (anchor, per_line) = person_plans
        .iter()
        .filter(|a| &a.plan.carrier_id == carrier)
        .find_map(|a| a.plan.family_discount.per_line().map(|per_line| (a, per_line)))?;

    let max_lines = anchor.plan.family_discount.max_lines.map_or(usize::MAX, |lines| lines as usize);
    let lines = person_count.min(max_lines);
    if lines == 0 {
        return None;
    }

    Some(AppliedDiscount {
        kind: DiscountKind::Family,
        name: format!("Family discount ({lines} lines)"),
        amount: per_line * Decimal::from(lines as u64),
    })
}

fn assignment(person: &PersonResult, score: &PlanScore, monthly_price: Decimal) -> PersonPlanAssignment {
    PersonPlanAssignment { person_index: person.person_index, plan: score.plan.clone(), monthly_price }
}
