use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CarrierId(pub String);

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for CarrierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarrierCategory {
    Mno,
    SubBrand,
    Online,
    Mvno,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    pub id: CarrierId,
    pub name: String,
    pub category: CarrierCategory,
}

/// Physical network a plan rides on. Unknown networks fall back to `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkType {
    Docomo,
    Au,
    Softbank,
    Rakuten,
    #[serde(other)]
    Other,
}

impl NetworkType {
    /// Base quality score for the network; budget and unknown networks score lower.
    pub fn quality_score(self) -> u8 {
        match self {
            Self::Docomo => 90,
            Self::Au => 88,
            Self::Softbank => 85,
            Self::Rakuten => 75,
            Self::Other => 70,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityType {
    Fixed,
    Tiered,
    Unlimited,
    UnlimitedSpeedLimited,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    pub up_to_gb: f64,
    pub price: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoiceOption {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub free_minutes: Option<u32>,
    #[serde(default)]
    pub unlimited: bool,
}

impl VoiceOption {
    pub fn covers_short_calls(&self) -> bool {
        self.free_minutes.is_some_and(|minutes| minutes >= 5)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyDiscount {
    pub available: bool,
    #[serde(default)]
    pub discount_per_line: Option<Decimal>,
    #[serde(default)]
    pub max_lines: Option<u32>,
}

impl FamilyDiscount {
    pub fn per_line(&self) -> Option<Decimal> {
        self.discount_per_line.filter(|_| self.available)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeInternetDiscount {
    pub available: bool,
    #[serde(default)]
    pub target_services: Vec<String>,
    #[serde(default)]
    pub discount_amount: Option<Decimal>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardDiscount {
    pub available: bool,
    #[serde(default)]
    pub target_cards: Vec<String>,
    #[serde(default)]
    pub discount_amount: Option<Decimal>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopSupport {
    pub available: bool,
    #[serde(default)]
    pub shop_count: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteSupport {
    #[serde(default)]
    pub phone: bool,
    #[serde(default)]
    pub chat: bool,
}

/// Catalog entry. Loaded once and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub carrier_id: CarrierId,
    pub name: String,
    /// `None` means the plan has no data cap.
    pub data_capacity_gb: Option<f64>,
    pub data_capacity_type: CapacityType,
    pub monthly_price: Decimal,
    #[serde(default)]
    pub price_tiers: Vec<PriceTier>,
    /// Per 30 seconds.
    #[serde(default)]
    pub voice_base_rate: Decimal,
    #[serde(default)]
    pub voice_free_minutes: u32,
    #[serde(default)]
    pub voice_options: Vec<VoiceOption>,
    pub network_type: NetworkType,
    #[serde(default)]
    pub has_5g: bool,
    #[serde(default)]
    pub tethering_available: bool,
    #[serde(default)]
    pub overseas_roaming: bool,
    #[serde(default)]
    pub family_discount: FamilyDiscount,
    #[serde(default)]
    pub home_internet_discount: HomeInternetDiscount,
    #[serde(default)]
    pub card_discount: CardDiscount,
    #[serde(default)]
    pub shop_support: ShopSupport,
    #[serde(default)]
    pub remote_support: RemoteSupport,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub cautions: Vec<String>,
}

impl Plan {
    pub fn is_tiered(&self) -> bool {
        self.data_capacity_type == CapacityType::Tiered
    }

    pub fn has_unlimited_calls(&self) -> bool {
        self.voice_options.iter().any(|option| option.unlimited)
    }

    pub fn has_short_call_option(&self) -> bool {
        self.voice_options.iter().any(VoiceOption::covers_short_calls)
    }

    /// First tier whose threshold covers the usage, scanning in catalog order.
    pub fn tier_price_for(&self, usage_gb: f64) -> Option<Decimal> {
        self.price_tiers.iter().find(|tier| usage_gb <= tier.up_to_gb).map(|tier| tier.price)
    }

    pub fn lacks_carrier_email(&self) -> bool {
        self.cautions.iter().any(|caution| {
            caution.contains("キャリアメール") || caution.to_lowercase().contains("carrier email")
        })
    }
}
