use serde::{Deserialize, Serialize};

/// Loose, case-insensitive match of any keyword against any eligible entry.
fn matches_keywords(keywords: &[&str], eligible: &[String]) -> bool {
    eligible.iter().any(|entry| {
        let entry = entry.to_lowercase();
        keywords.iter().any(|keyword| entry.contains(&keyword.to_lowercase()))
    })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeInternet {
    DocomoHikari,
    AuHikari,
    SoftbankHikari,
    Nuro,
    Other,
    #[default]
    None,
}

impl HomeInternet {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::DocomoHikari => &["docomo hikari", "docomo_hikari", "ドコモ光"],
            Self::AuHikari => &["au hikari", "au_hikari", "auひかり", "eo光"],
            Self::SoftbankHikari => &["softbank hikari", "softbank_hikari", "ソフトバンク光"],
            Self::Nuro => &["nuro"],
            Self::Other | Self::None => &[],
        }
    }

    /// Whether this service qualifies for a bundle discount restricted to `eligible`.
    /// An empty list means the discount accepts any home internet service.
    pub fn is_eligible_for(self, eligible: &[String]) -> bool {
        if self == Self::None {
            return false;
        }
        eligible.is_empty() || matches_keywords(self.keywords(), eligible)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditCard {
    DCard,
    AuPay,
    Paypay,
    Rakuten,
    Other,
}

impl CreditCard {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::DCard => &["dカード", "dcard", "d-card", "d card"],
            Self::AuPay => &["au payカード", "aupay", "au pay"],
            Self::Paypay => &["paypayカード", "paypay"],
            Self::Rakuten => &["楽天カード", "rakuten", "楽天"],
            Self::Other => &[],
        }
    }

    pub fn is_eligible_for(self, eligible: &[String]) -> bool {
        eligible.is_empty() || matches_keywords(self.keywords(), eligible)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Price,
    Quality,
    Support,
    Data,
    Points,
    Balance,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportNeed {
    ShopRequired,
    ShopPreferred,
    #[default]
    OnlineOk,
    Unspecified,
}

impl SupportNeed {
    pub fn wants_shop(self) -> bool {
        matches!(self, Self::ShopRequired | Self::ShopPreferred)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverseasUsage {
    #[default]
    Rarely,
    Sometimes,
    Often,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TetheringUsage {
    #[default]
    Never,
    Sometimes,
    Often,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyCarrierPreference {
    SameCarrier,
    Separate,
    #[default]
    NoPreference,
}

/// Household-wide discount eligibility and preferences, fixed for one diagnosis run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonSettings {
    pub home_internet: HomeInternet,
    pub credit_cards: Vec<CreditCard>,
    /// Lines contracted with the same carrier, the person included.
    pub family_lines: u8,
    pub priority: Priority,
    pub support_need: SupportNeed,
    pub overseas_usage: OverseasUsage,
    pub tethering_usage: TetheringUsage,
    pub family_carrier_preference: FamilyCarrierPreference,
}

impl Default for CommonSettings {
    fn default() -> Self {
        Self {
            home_internet: HomeInternet::None,
            credit_cards: Vec::new(),
            family_lines: 1,
            priority: Priority::Price,
            support_need: SupportNeed::OnlineOk,
            overseas_usage: OverseasUsage::Rarely,
            tethering_usage: TetheringUsage::Never,
            family_carrier_preference: FamilyCarrierPreference::NoPreference,
        }
    }
}

impl CommonSettings {
    pub fn holds_eligible_card(&self, eligible: &[String]) -> bool {
        self.credit_cards.iter().any(|card| card.is_eligible_for(eligible))
    }

    pub fn has_family_lines(&self) -> bool {
        self.family_lines >= 2
    }
}
