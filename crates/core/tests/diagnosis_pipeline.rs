use chrono::{TimeZone, Utc};
use planfit_core::diagnosis::{
    calculate_monthly_price, estimate_data_usage, filter_plans, score_plans, FixedClock,
};
use planfit_core::domain::profile::{CallFrequency, DataUsage, WifiAvailability, WifiConnection};
use planfit_core::domain::result::{FamilyPatternKind, VoiceNeed};
use planfit_core::domain::settings::{CommonSettings, HomeInternet, Priority};
use planfit_core::{
    calculate_diagnosis, Catalog, CarrierId, DiagnosisEngine, DiagnosisInput, DiagnosisRuntime,
    UserProfile,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};

fn plan_doc(id: &str, carrier: &str, price: i64, capacity: Option<f64>) -> Value {
    let capacity_type = if capacity.is_some() { "fixed" } else { "unlimited" };
    json!({
        "id": id,
        "carrier_id": carrier,
        "name": id,
        "data_capacity_gb": capacity,
        "data_capacity_type": capacity_type,
        "monthly_price": price,
        "network_type": "docomo",
        "tethering_available": true,
        "overseas_roaming": true,
    })
}

fn catalog_of(plans: Vec<Value>) -> Catalog {
    Catalog::from_json_str(&json!({ "plans": plans }).to_string()).expect("valid catalog")
}

fn mid_usage_profile() -> UserProfile {
    UserProfile {
        data_usage: DataUsage::From3To10Gb,
        call_frequency: CallFrequency::Sometimes,
        has_wifi: WifiAvailability::Yes,
        wifi_connection: WifiConnection::Mostly,
        ..UserProfile::default()
    }
}

fn price_first_settings() -> CommonSettings {
    CommonSettings {
        home_internet: HomeInternet::None,
        credit_cards: Vec::new(),
        priority: Priority::Price,
        ..CommonSettings::default()
    }
}

#[test]
fn mid_usage_person_gets_the_cheapest_qualifying_plan() {
    let catalog = catalog_of(vec![
        plan_doc("tiny", "a", 500, Some(3.0)),
        plan_doc("roomy", "b", 2900, Some(20.0)),
        plan_doc("right-sized", "c", 1900, Some(10.0)),
        plan_doc("premium", "d", 4900, Some(20.0)),
    ]);
    let profile = mid_usage_profile();
    let settings = price_first_settings();

    assert_eq!(estimate_data_usage(&profile), 6.0);

    let filtered = filter_plans(catalog.plans(), &profile, &settings);
    let kept: Vec<_> = filtered.iter().map(|plan| plan.id.0.as_str()).collect();
    assert_eq!(kept, vec!["roomy", "right-sized", "premium"]);

    let ranked = score_plans(&filtered, &profile, &settings);
    assert_eq!(ranked[0].plan.id.0, "right-sized");
}

#[test]
fn bundled_catalog_filter_respects_the_capacity_tolerance() {
    let catalog = Catalog::bundled().expect("bundled catalog");
    let profile = mid_usage_profile();

    let filtered = filter_plans(catalog.plans(), &profile, &price_first_settings());
    assert!(!filtered.is_empty());
    for plan in filtered {
        if let Some(capacity) = plan.data_capacity_gb {
            assert!(capacity >= 4.8 || plan.is_tiered(), "{} should have been excluded", plan.id);
        }
    }
}

#[test]
fn scores_stay_in_range_and_cheapest_base_price_never_scores_below_priciest() {
    let catalog = Catalog::bundled().expect("bundled catalog");
    for priority in [Priority::Price, Priority::Quality, Priority::Support, Priority::Balance] {
        let settings = CommonSettings { priority, ..CommonSettings::default() };
        let profile = mid_usage_profile();
        let filtered = filter_plans(catalog.plans(), &profile, &settings);
        let ranked = score_plans(&filtered, &profile, &settings);

        assert!(ranked.iter().all(|score| score.total_score <= 100));
        for window in ranked.windows(2) {
            assert!(window[0].total_score >= window[1].total_score);
        }

        let cheapest = ranked.iter().min_by_key(|score| score.plan.monthly_price).expect("plans");
        let priciest = ranked.iter().max_by_key(|score| score.plan.monthly_price).expect("plans");
        assert!(cheapest.breakdown.price >= priciest.breakdown.price);
    }
}

#[test]
fn discounted_price_is_never_negative() {
    let catalog = catalog_of(vec![json!({
        "id": "bundle-heavy",
        "carrier_id": "x",
        "name": "Bundle heavy",
        "data_capacity_gb": 3,
        "data_capacity_type": "fixed",
        "monthly_price": 990,
        "network_type": "au",
        "home_internet_discount": { "available": true, "discount_amount": 1100 },
        "family_discount": { "available": true, "discount_per_line": 1100, "max_lines": 10 }
    })]);
    let settings = CommonSettings {
        home_internet: HomeInternet::AuHikari,
        family_lines: 4,
        ..CommonSettings::default()
    };

    let (price, applied) =
        calculate_monthly_price(&catalog.plans()[0], 1.0, VoiceNeed::None, &settings, true);
    assert_eq!(price, Decimal::ZERO);
    assert_eq!(applied.len(), 2);
}

#[test]
fn same_carrier_pattern_deducts_one_family_discount_for_two_members() {
    let family = json!({ "available": true, "discount_per_line": 1000, "max_lines": 4 });
    let mut small = plan_doc("fam-small", "fam", 2000, Some(3.0));
    small["family_discount"] = family.clone();
    let mut big = plan_doc("fam-big", "fam", 3500, Some(20.0));
    big["family_discount"] = family;
    let catalog = catalog_of(vec![small, big, plan_doc("solo", "solo", 3000, Some(20.0))]);

    let input = DiagnosisInput::household(
        vec![
            UserProfile { data_usage: DataUsage::From1To3Gb, ..UserProfile::default() },
            UserProfile { data_usage: DataUsage::From10To20Gb, ..UserProfile::default() },
        ],
        CommonSettings::default(),
    );

    let result = calculate_diagnosis(&catalog, &input);
    let patterns = result.family_patterns.expect("household patterns");
    let same = patterns
        .iter()
        .find(|pattern| pattern.kind == FamilyPatternKind::SameCarrier)
        .expect("same-carrier pattern");
    assert_eq!(same.carrier_id, Some(CarrierId("fam".to_string())));

    let best_on_fam: Decimal = result
        .person_results
        .iter()
        .map(|person| {
            person
                .ranked_plans
                .iter()
                .find(|score| score.plan.carrier_id.0 == "fam")
                .map(|score| score.plan.monthly_price)
                .expect("plan on the shared carrier")
        })
        .sum();
    assert_eq!(same.total_monthly_price, best_on_fam - Decimal::from(2000));
}

#[test]
fn separate_pattern_total_is_the_sum_of_each_top_plan() {
    let catalog = Catalog::bundled().expect("bundled catalog");
    let input = DiagnosisInput::household(
        vec![
            mid_usage_profile(),
            UserProfile { data_usage: DataUsage::Over50Gb, ..UserProfile::default() },
            UserProfile { data_usage: DataUsage::Under1Gb, ..UserProfile::default() },
        ],
        CommonSettings { family_lines: 3, ..CommonSettings::default() },
    );

    let result = calculate_diagnosis(&catalog, &input);
    let separate = result
        .family_patterns
        .as_ref()
        .and_then(|patterns| patterns.iter().find(|p| p.kind == FamilyPatternKind::Separate))
        .expect("separate pattern");

    let expected: Decimal = result
        .person_results
        .iter()
        .filter_map(|person| person.top_plan())
        .map(|top| top.monthly_price)
        .sum();
    assert_eq!(separate.total_monthly_price, expected);
    assert_eq!(result.summary.recommended_total_monthly_fee, expected);
}

#[test]
fn yearly_savings_are_known_only_with_a_current_fee() {
    let catalog = catalog_of(vec![plan_doc("only", "x", 3000, None)]);
    let instant = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).single().expect("valid instant");
    let engine = DiagnosisEngine::new().with_clock(FixedClock(instant));

    let with_fee = DiagnosisInput::single(
        UserProfile { current_monthly_fee: Some(Decimal::from(5000)), ..UserProfile::default() },
        CommonSettings::default(),
    );
    let result = engine.diagnose(&catalog, &with_fee);
    assert_eq!(result.summary.recommended_total_monthly_fee, Decimal::from(3000));
    assert_eq!(result.summary.estimated_yearly_savings, Some(Decimal::from(24_000)));
    assert_eq!(result.diagnosed_at, instant);

    let without_fee = DiagnosisInput::single(UserProfile::default(), CommonSettings::default());
    let result = engine.diagnose(&catalog, &without_fee);
    assert_eq!(result.summary.estimated_yearly_savings, None);
}

#[test]
fn household_tips_are_merged_without_duplicates() {
    let catalog = Catalog::bundled().expect("bundled catalog");
    let light = UserProfile { data_usage: DataUsage::Under1Gb, ..UserProfile::default() };
    let input = DiagnosisInput::household(vec![light.clone(), light], CommonSettings::default());

    let result = calculate_diagnosis(&catalog, &input);
    let ids: Vec<_> = result.saving_tips.iter().map(|tip| tip.id.as_str()).collect();
    assert_eq!(ids, vec!["light_usage"]);
}
