//! Savings advice derived from a person's answers alone.

use std::collections::HashSet;

use crate::domain::profile::{
    Activity, Answer, CallDuration, UserProfile, WifiAvailability, WifiConnection,
};
use crate::domain::result::SavingTip;

fn tip(id: &str, title: &str, description: &str, estimated_saving: Option<&str>) -> SavingTip {
    SavingTip {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        estimated_saving: estimated_saving.map(str::to_string),
    }
}

/// Tips whose predicate holds for the profile, in evaluation order.
pub fn generate_tips(profile: &UserProfile) -> Vec<SavingTip> {
    let mut tips = Vec::new();
    let wifi_at_home = profile.has_wifi == WifiAvailability::Yes;
    let frequent_caller = profile.call_frequency.is_frequent();

    if profile.has_wifi == WifiAvailability::Unused {
        tips.push(tip(
            "wifi_unused",
            "Use the Wi-Fi you already have",
            "Your home has Wi-Fi that goes unused. Connecting at home moves most of your \
             traffic off the mobile plan.",
            Some("Up to 1,000-3,000 yen per month"),
        ));
    }

    if wifi_at_home
        && matches!(profile.wifi_connection, WifiConnection::Rarely | WifiConnection::Never)
    {
        tips.push(tip(
            "wifi_connection",
            "Connect to Wi-Fi more often",
            "Let the phone join your home Wi-Fi automatically so browsing at home stops \
             counting against your data allowance.",
            Some("Up to 500-1,500 yen per month"),
        ));
    }

    if profile.home_activities.contains(&Activity::Video)
        && wifi_at_home
        && profile.wifi_connection != WifiConnection::Always
    {
        tips.push(tip(
            "video_at_home",
            "Watch video on Wi-Fi",
            "Video is the heaviest data consumer. Watch at home over Wi-Fi or download \
             episodes before you leave.",
            Some("Up to 1,000-2,000 yen per month"),
        ));
    }

    if profile.outside_activities.contains(&Activity::Video) {
        tips.push(tip(
            "video_outside",
            "Cut back on streaming while out",
            "Streaming on the go burns through data. Download ahead of time or switch to \
             audio when outside.",
            Some("Up to 1,500-3,000 yen per month"),
        ));
    }

    if profile.line_call_ok == Answer::Unknown && frequent_caller {
        tips.push(tip(
            "line_call",
            "Try app-based calling",
            "Calls through a messaging app are free when the other side uses it too. \
             Family and friends are the easiest place to start.",
            Some("Up to 500-1,000 yen per month"),
        ));
    }

    if frequent_caller && profile.call_duration.is_some_and(CallDuration::is_long) {
        tips.push(tip(
            "call_option",
            "Consider a calling add-on",
            "With frequent longer calls, a flat-rate calling option is usually cheaper \
             than paying per call. The ranking already prices in the matching add-on.",
            None,
        ));
    }

    if profile.data_usage.is_heavy() {
        tips.push(tip(
            "heavy_usage",
            "Look at large or unlimited plans",
            "At this level of usage a large or unlimited plan often costs less per GB \
             than a mid-sized one plus top-ups.",
            None,
        ));
    }

    if profile.data_usage.is_light() {
        tips.push(tip(
            "light_usage",
            "A small plan is probably enough",
            "Light users are well served by low-capacity budget plans, many of them \
             under 1,000 yen per month.",
            Some("Up to 3,000-5,000 yen per month"),
        ));
    }

    if profile.current_carrier.is_major() {
        tips.push(tip(
            "switch_brand",
            "Compare budget brands",
            "Sub-brands and online plans run on the same major networks for a fraction \
             of the price. Porting your number keeps it unchanged.",
            Some("Up to 2,000-5,000 yen per month"),
        ));
    }

    tips
}

/// Tips for every person, de-duplicated by id; the first occurrence wins.
pub fn merge_tips<'a, I>(profiles: I) -> Vec<SavingTip>
where
    I: IntoIterator<Item = &'a UserProfile>,
{
    let mut seen = HashSet::new();
    profiles
        .into_iter()
        .flat_map(generate_tips)
        .filter(|tip| seen.insert(tip.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{generate_tips, merge_tips};
    use crate::domain::profile::{
        Activity, Answer, CallDuration, CallFrequency, CurrentCarrier, DataUsage, UserProfile,
        WifiAvailability, WifiConnection,
    };

    fn ids(profile: &UserProfile) -> Vec<String> {
        generate_tips(profile).into_iter().map(|tip| tip.id).collect()
    }

    #[test]
    fn default_profile_produces_no_tips() {
        assert!(generate_tips(&UserProfile::default()).is_empty());
    }

    #[test]
    fn independent_predicates_fire_together_in_evaluation_order() {
        let profile = UserProfile {
            has_wifi: WifiAvailability::Yes,
            wifi_connection: WifiConnection::Rarely,
            home_activities: vec![Activity::Video],
            outside_activities: vec![Activity::Video],
            call_frequency: CallFrequency::Daily,
            call_duration: Some(CallDuration::Over10Min),
            data_usage: DataUsage::Over50Gb,
            current_carrier: CurrentCarrier::Docomo,
            ..UserProfile::default()
        };

        assert_eq!(
            ids(&profile),
            vec![
                "wifi_connection",
                "video_at_home",
                "video_outside",
                "line_call",
                "call_option",
                "heavy_usage",
                "switch_brand",
            ]
        );
    }

    #[test]
    fn always_connected_wifi_suppresses_home_video_tip() {
        let profile = UserProfile {
            has_wifi: WifiAvailability::Yes,
            wifi_connection: WifiConnection::Always,
            home_activities: vec![Activity::Video],
            ..UserProfile::default()
        };
        assert!(ids(&profile).is_empty());
    }

    #[test]
    fn app_calling_answer_suppresses_line_tip() {
        let profile = UserProfile {
            call_frequency: CallFrequency::Often,
            line_call_ok: Answer::No,
            ..UserProfile::default()
        };
        assert!(ids(&profile).is_empty());
    }

    #[test]
    fn light_users_and_unused_wifi_get_their_tips() {
        let profile = UserProfile {
            has_wifi: WifiAvailability::Unused,
            data_usage: DataUsage::From1To3Gb,
            current_carrier: CurrentCarrier::Mvno,
            ..UserProfile::default()
        };
        assert_eq!(ids(&profile), vec!["wifi_unused", "light_usage"]);
    }

    #[test]
    fn merged_tips_are_unique_by_id_and_keep_first_occurrence_order() {
        let light = UserProfile { data_usage: DataUsage::Under1Gb, ..UserProfile::default() };
        let streamer = UserProfile {
            outside_activities: vec![Activity::Video],
            data_usage: DataUsage::Under1Gb,
            ..UserProfile::default()
        };

        let merged: Vec<_> =
            merge_tips([&light, &streamer]).into_iter().map(|tip| tip.id).collect();
        assert_eq!(merged, vec!["light_usage", "video_outside"]);
    }
}
