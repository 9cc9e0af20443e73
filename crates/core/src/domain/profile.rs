use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Self-reported monthly data usage bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataUsage {
    #[serde(rename = "under_1gb")]
    Under1Gb,
    #[serde(rename = "1_3gb")]
    From1To3Gb,
    #[serde(rename = "3_10gb")]
    From3To10Gb,
    #[serde(rename = "10_20gb")]
    From10To20Gb,
    #[serde(rename = "20_50gb")]
    From20To50Gb,
    #[serde(rename = "over_50gb")]
    Over50Gb,
    #[serde(rename = "unlimited")]
    Unlimited,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl DataUsage {
    /// Bucket midpoint in GB. `Unknown` has no midpoint and must be estimated.
    pub fn midpoint_gb(self) -> Option<f64> {
        match self {
            Self::Under1Gb => Some(0.5),
            Self::From1To3Gb => Some(2.0),
            Self::From3To10Gb => Some(6.0),
            Self::From10To20Gb => Some(15.0),
            Self::From20To50Gb => Some(35.0),
            Self::Over50Gb => Some(70.0),
            Self::Unlimited => Some(100.0),
            Self::Unknown => None,
        }
    }

    pub fn is_heavy(self) -> bool {
        matches!(self, Self::Over50Gb | Self::Unlimited)
    }

    pub fn is_light(self) -> bool {
        matches!(self, Self::Under1Gb | Self::From1To3Gb)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Video,
    Sns,
    Music,
    Game,
    Work,
    Rarely,
}

impl Activity {
    /// Monthly GB attributed to the activity when done away from Wi-Fi.
    pub fn monthly_gb(self) -> f64 {
        match self {
            Self::Video => 15.0,
            Self::Sns => 3.0,
            Self::Music => 2.0,
            Self::Game => 5.0,
            Self::Work => 5.0,
            Self::Rarely => 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WifiAvailability {
    Yes,
    #[default]
    No,
    Unused,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WifiConnection {
    Always,
    Mostly,
    #[default]
    Sometimes,
    Rarely,
    Never,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageLocation {
    Home,
    Outside,
    #[default]
    Both,
}

impl UsageLocation {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Home => 0.5,
            Self::Outside => 1.5,
            Self::Both => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallFrequency {
    Rarely,
    Sometimes,
    Often,
    Daily,
    Long,
    #[default]
    Unknown,
}

impl CallFrequency {
    pub fn calls_per_month(self) -> f64 {
        match self {
            Self::Rarely => 3.0,
            Self::Sometimes => 6.0,
            Self::Often => 15.0,
            Self::Daily => 30.0,
            // `long` is a simple-questionnaire answer; the detailed count has no bucket for it.
            Self::Long | Self::Unknown => 5.0,
        }
    }

    pub fn is_frequent(self) -> bool {
        matches!(self, Self::Often | Self::Daily | Self::Long)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallDuration {
    #[serde(rename = "under_1min")]
    Under1Min,
    #[serde(rename = "1_5min")]
    From1To5Min,
    #[serde(rename = "5_10min")]
    From5To10Min,
    #[serde(rename = "over_10min")]
    Over10Min,
    #[serde(rename = "unknown")]
    Unknown,
}

impl CallDuration {
    pub fn minutes_per_call(self) -> f64 {
        match self {
            Self::Under1Min => 0.5,
            Self::From1To5Min => 3.0,
            Self::From5To10Min => 7.0,
            Self::Over10Min => 15.0,
            Self::Unknown => 3.0,
        }
    }

    pub fn is_long(self) -> bool {
        matches!(self, Self::From5To10Min | Self::Over10Min)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    #[default]
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentCarrier {
    Docomo,
    Au,
    Softbank,
    Rakuten,
    Ymobile,
    Uq,
    Mvno,
    #[default]
    Unknown,
}

impl CurrentCarrier {
    pub fn is_major(self) -> bool {
        matches!(self, Self::Docomo | Self::Au | Self::Softbank)
    }
}

/// One person's usage answers. Unanswered questions fall back to conservative defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub data_usage: DataUsage,
    pub home_activities: Vec<Activity>,
    pub outside_activities: Vec<Activity>,
    pub has_wifi: WifiAvailability,
    pub wifi_connection: WifiConnection,
    pub main_usage_location: UsageLocation,
    pub call_frequency: CallFrequency,
    /// Absent in the simple questionnaire, where frequency alone decides the voice tier.
    pub call_duration: Option<CallDuration>,
    pub line_call_ok: Answer,
    pub current_carrier: CurrentCarrier,
    pub current_monthly_fee: Option<Decimal>,
}

impl UserProfile {
    /// Wi-Fi reduction factor applied to bottom-up usage estimates.
    pub fn wifi_reduction(&self) -> f64 {
        if self.has_wifi != WifiAvailability::Yes {
            return 1.0;
        }
        match self.wifi_connection {
            WifiConnection::Always => 0.3,
            WifiConnection::Mostly => 0.5,
            WifiConnection::Sometimes | WifiConnection::Rarely => 0.8,
            WifiConnection::Never => 1.0,
        }
    }
}
