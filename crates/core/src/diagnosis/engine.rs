use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::{DiagnosisConfig, DEFAULT_FAMILY_TOP_K, DEFAULT_TOP_N};
use crate::domain::input::DiagnosisInput;
use crate::domain::profile::UserProfile;
use crate::domain::result::{DiagnosisResult, DiagnosisSummary, PersonResult};
use crate::domain::settings::CommonSettings;

use super::estimator::{estimate_data_usage, recommend_voice_option};
use super::family::{family_patterns, Household};
use super::filter::filter_plans;
use super::pricing::yearly;
use super::scoring::score_plans;
use super::tips::merge_tips;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub trait DiagnosisRuntime: Send + Sync {
    fn diagnose(&self, catalog: &Catalog, input: &DiagnosisInput) -> DiagnosisResult;
}

/// Runs one household through the pipeline. Always returns a result; persons left
/// without eligible plans are reported through global warnings.
#[derive(Clone, Debug)]
pub struct DiagnosisEngine<C = SystemClock> {
    top_n: usize,
    family_top_k: usize,
    clock: C,
}

impl Default for DiagnosisEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosisEngine<SystemClock> {
    pub fn new() -> Self {
        Self { top_n: DEFAULT_TOP_N, family_top_k: DEFAULT_FAMILY_TOP_K, clock: SystemClock }
    }

    pub fn from_config(config: &DiagnosisConfig) -> Self {
        Self { top_n: config.top_n, family_top_k: config.family_top_k, clock: SystemClock }
    }
}

impl<C> DiagnosisEngine<C> {
    pub fn with_clock<D: Clock>(self, clock: D) -> DiagnosisEngine<D> {
        DiagnosisEngine { top_n: self.top_n, family_top_k: self.family_top_k, clock }
    }

    fn diagnose_person(
        &self,
        person_index: usize,
        profile: &UserProfile,
        catalog: &Catalog,
        settings: &CommonSettings,
    ) -> PersonResult {
        let filtered = filter_plans(catalog.plans(), profile, settings);
        debug!(
            event_name = "diagnosis.person.filtered",
            person_index,
            eligible = filtered.len(),
            catalog_size = catalog.plans().len(),
            "filtered catalog for person"
        );

        let mut ranked_plans = score_plans(&filtered, profile, settings);
        ranked_plans.truncate(self.top_n);
        if let Some(current_fee) = profile.current_monthly_fee {
            for score in &mut ranked_plans {
                score.savings_per_year = Some(yearly(current_fee - score.monthly_price));
            }
        }

        PersonResult {
            person_index,
            estimated_data_usage: estimate_data_usage(profile),
            recommended_voice_option: recommend_voice_option(profile),
            ranked_plans,
        }
    }
}

impl<C: Clock> DiagnosisRuntime for DiagnosisEngine<C> {
    fn diagnose(&self, catalog: &Catalog, input: &DiagnosisInput) -> DiagnosisResult {
        info!(
            event_name = "diagnosis.started",
            persons = input.persons.len(),
            catalog_size = catalog.plans().len(),
            "starting diagnosis"
        );

        let mut global_warnings = Vec::new();
        let person_results: Vec<PersonResult> = input
            .persons
            .iter()
            .enumerate()
            .map(|(index, profile)| {
                let result = self.diagnose_person(index, profile, catalog, &input.common);
                if result.ranked_plans.is_empty() {
                    warn!(
                        event_name = "diagnosis.person.empty",
                        person_index = index,
                        "no plan survived filtering"
                    );
                    global_warnings.push(format!(
                        "No eligible plans found for person {}; try relaxing the support, \
                         roaming or tethering requirements",
                        index + 1
                    ));
                }
                result
            })
            .collect();

        let current_total = current_total(&input.persons);
        let recommended_total: Decimal = person_results
            .iter()
            .filter_map(PersonResult::top_plan)
            .map(|top| top.monthly_price)
            .sum();
        // Persons without a known fee neither save nor spend: they sit at their top plan
        // on both sides of the comparison.
        let savings_baseline = current_total
            .map(|current| current + top_total_without_fee(&input.persons, &person_results));

        let family_patterns = input.is_household().then(|| {
            let patterns = family_patterns(&Household {
                persons: &person_results,
                settings: &input.common,
                catalog,
                savings_baseline,
                top_k: self.family_top_k,
            });
            info!(
                event_name = "diagnosis.family.patterns",
                patterns = patterns.len(),
                "built household patterns"
            );
            patterns
        });

        let summary = DiagnosisSummary {
            total_persons: input.persons.len(),
            current_total_monthly_fee: current_total,
            recommended_total_monthly_fee: recommended_total,
            estimated_yearly_savings: savings_baseline
                .map(|baseline| yearly(baseline - recommended_total)),
        };

        info!(
            event_name = "diagnosis.completed",
            persons = summary.total_persons,
            warnings = global_warnings.len(),
            "diagnosis completed"
        );

        DiagnosisResult {
            summary,
            saving_tips: merge_tips(&input.persons),
            person_results,
            family_patterns,
            global_warnings,
            diagnosed_at: self.clock.now(),
        }
    }
}

/// Sum of the current fees that were supplied; `None` when nobody supplied one.
fn current_total(persons: &[UserProfile]) -> Option<Decimal> {
    persons.iter().filter_map(|person| person.current_monthly_fee).reduce(|sum, fee| sum + fee)
}

fn top_total_without_fee(persons: &[UserProfile], results: &[PersonResult]) -> Decimal {
    persons
        .iter()
        .zip(results)
        .filter(|(profile, _)| profile.current_monthly_fee.is_none())
        .filter_map(|(_, result)| result.top_plan())
        .map(|top| top.monthly_price)
        .sum()
}

/// Diagnoses with default settings and the system clock.
pub fn calculate_diagnosis(catalog: &Catalog, input: &DiagnosisInput) -> DiagnosisResult {
    DiagnosisEngine::new().diagnose(catalog, input)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::{DiagnosisEngine, DiagnosisRuntime, FixedClock};
    use crate::catalog::Catalog;
    use crate::config::DiagnosisConfig;
    use crate::domain::input::DiagnosisInput;
    use crate::domain::profile::{DataUsage, UserProfile};
    use crate::domain::result::FamilyPatternKind;
    use crate::domain::settings::{CommonSettings, SupportNeed};
    use crate::fixtures::plan;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            plan("big", "alpha", 4000, Some(30.0)),
            plan("mid", "beta", 2000, Some(10.0)),
            plan("small", "gamma", 1000, Some(3.0)),
        ])
    }

    fn profile(data_usage: DataUsage, fee: Option<i64>) -> UserProfile {
        UserProfile {
            data_usage,
            current_monthly_fee: fee.map(Decimal::from),
            ..UserProfile::default()
        }
    }

    #[test]
    fn single_person_summary_reports_savings_against_current_fee() {
        let engine = DiagnosisEngine::new();
        let input = DiagnosisInput::single(
            profile(DataUsage::From3To10Gb, Some(5000)),
            CommonSettings::default(),
        );

        let result = engine.diagnose(&catalog(), &input);

        assert_eq!(result.summary.total_persons, 1);
        let top = result.person_results[0].top_plan().expect("ranked plan");
        assert_eq!(top.plan.id.0, "mid");
        assert_eq!(result.summary.recommended_total_monthly_fee, Decimal::from(2000));
        assert_eq!(result.summary.estimated_yearly_savings, Some(Decimal::from(36_000)));
        assert_eq!(top.savings_per_year, Some(Decimal::from(36_000)));
        assert!(result.family_patterns.is_none());
    }

    #[test]
    fn unknown_current_fee_leaves_savings_unknown() {
        let input = DiagnosisInput::single(
            profile(DataUsage::From3To10Gb, None),
            CommonSettings::default(),
        );
        let result = DiagnosisEngine::new().diagnose(&catalog(), &input);

        assert_eq!(result.summary.current_total_monthly_fee, None);
        assert_eq!(result.summary.estimated_yearly_savings, None);
    }

    #[test]
    fn empty_filter_result_becomes_a_global_warning() {
        let settings =
            CommonSettings { support_need: SupportNeed::ShopRequired, ..CommonSettings::default() };
        let input = DiagnosisInput::single(profile(DataUsage::Under1Gb, None), settings);

        let result = DiagnosisEngine::new().diagnose(&catalog(), &input);

        assert!(result.person_results[0].ranked_plans.is_empty());
        assert_eq!(result.global_warnings.len(), 1);
        assert!(result.global_warnings[0].contains("person 1"));
        assert_eq!(result.summary.recommended_total_monthly_fee, Decimal::ZERO);
    }

    #[test]
    fn ranking_is_truncated_to_top_n_and_timestamp_comes_from_the_clock() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().expect("valid instant");
        let engine = DiagnosisEngine::from_config(&DiagnosisConfig { top_n: 1, family_top_k: 3 })
            .with_clock(FixedClock(instant));
        let input = DiagnosisInput::single(
            profile(DataUsage::Under1Gb, None),
            CommonSettings::default(),
        );

        let result = engine.diagnose(&catalog(), &input);

        assert_eq!(result.person_results[0].ranked_plans.len(), 1);
        assert_eq!(result.diagnosed_at, instant);
    }

    #[test]
    fn household_sums_only_supplied_fees_and_builds_patterns() {
        let input = DiagnosisInput::household(
            vec![
                profile(DataUsage::From3To10Gb, Some(6000)),
                profile(DataUsage::Under1Gb, None),
            ],
            CommonSettings::default(),
        );

        let result = DiagnosisEngine::new().diagnose(&catalog(), &input);

        assert_eq!(result.summary.total_persons, 2);
        assert_eq!(result.summary.current_total_monthly_fee, Some(Decimal::from(6000)));
        let patterns = result.family_patterns.expect("household patterns");
        assert!(!patterns.is_empty());
    }

    #[test]
    fn household_savings_compare_only_persons_with_a_known_fee() {
        let input = DiagnosisInput::household(
            vec![
                profile(DataUsage::From3To10Gb, Some(6000)),
                profile(DataUsage::Under1Gb, None),
            ],
            CommonSettings::default(),
        );

        let result = DiagnosisEngine::new().diagnose(&catalog(), &input);

        let payer_top = result.person_results[0].top_plan().expect("ranked plan").monthly_price;
        let other_top = result.person_results[1].top_plan().expect("ranked plan").monthly_price;
        assert_eq!(payer_top, Decimal::from(2000));
        assert_eq!(result.summary.recommended_total_monthly_fee, payer_top + other_top);
        assert_eq!(result.summary.estimated_yearly_savings, Some(Decimal::from(48_000)));

        let patterns = result.family_patterns.expect("household patterns");
        let separate = patterns
            .iter()
            .find(|pattern| pattern.kind == FamilyPatternKind::Separate)
            .expect("separate pattern");
        assert_eq!(separate.savings_per_year, Some(Decimal::from(48_000)));
    }
}
