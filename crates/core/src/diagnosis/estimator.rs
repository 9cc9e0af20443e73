use crate::domain::profile::{Answer, CallFrequency, UserProfile};
use crate::domain::result::VoiceNeed;

/// GB assumed when a qualitative profile names no outside activity.
const DEFAULT_ACTIVITY_GB: f64 = 5.0;
/// Share of call minutes left when the person accepts app-based calling.
const APP_CALL_REDUCTION: f64 = 0.3;
const LIMITED_CALL_MINUTES: u32 = 15;
const UNLIMITED_CALL_MINUTES: u32 = 45;

/// Monthly data usage in GB.
///
/// A quantitative bucket maps straight to its midpoint. Otherwise usage is built
/// bottom-up from outside activities, then scaled by home Wi-Fi habits and where the
/// phone is mostly used, and rounded to whole GB.
pub fn estimate_data_usage(profile: &UserProfile) -> f64 {
    if let Some(midpoint) = profile.data_usage.midpoint_gb() {
        return midpoint;
    }

    let mut estimated: f64 =
        profile.outside_activities.iter().map(|activity| activity.monthly_gb()).sum();
    if estimated == 0.0 {
        estimated = DEFAULT_ACTIVITY_GB;
    }

    (estimated * profile.wifi_reduction() * profile.main_usage_location.multiplier()).round()
}

/// Estimated monthly call minutes from frequency and typical call length.
pub fn estimate_monthly_call_minutes(profile: &UserProfile) -> u32 {
    let minutes_per_call =
        profile.call_duration.map_or(3.0, |duration| duration.minutes_per_call());
    let reduction = if profile.line_call_ok == Answer::Yes {
        APP_CALL_REDUCTION
    } else {
        1.0
    };

    (profile.call_frequency.calls_per_month() * minutes_per_call * reduction).round() as u32
}

pub fn recommend_voice_option(profile: &UserProfile) -> VoiceNeed {
    if profile.call_duration.is_none() {
        return voice_need_from_frequency(profile.call_frequency);
    }

    let minutes = estimate_monthly_call_minutes(profile);
    if minutes < LIMITED_CALL_MINUTES {
        VoiceNeed::None
    } else if minutes < UNLIMITED_CALL_MINUTES {
        VoiceNeed::Limited
    } else {
        VoiceNeed::Unlimited
    }
}

/// Simple questionnaire: no call length was asked, so frequency decides alone.
fn voice_need_from_frequency(frequency: CallFrequency) -> VoiceNeed {
    match frequency {
        CallFrequency::Rarely | CallFrequency::Unknown => VoiceNeed::None,
        CallFrequency::Sometimes | CallFrequency::Often => VoiceNeed::Limited,
        CallFrequency::Daily | CallFrequency::Long => VoiceNeed::Unlimited,
    }
}
