//! Plan builders shared by unit tests.

use rust_decimal::Decimal;

use crate::domain::plan::{
    CapacityType, CarrierId, CardDiscount, FamilyDiscount, HomeInternetDiscount, NetworkType,
    Plan, PlanId, RemoteSupport, ShopSupport, VoiceOption,
};

/// A bare plan: fixed capacity when `capacity_gb` is set, unlimited otherwise.
pub(crate) fn plan(id: &str, carrier: &str, price: i64, capacity_gb: Option<f64>) -> Plan {
    Plan {
        id: PlanId(id.to_owned()),
        carrier_id: CarrierId(carrier.to_owned()),
        name: id.to_owned(),
        data_capacity_gb: capacity_gb,
        data_capacity_type: if capacity_gb.is_some() {
            CapacityType::Fixed
        } else {
            CapacityType::Unlimited
        },
        monthly_price: Decimal::from(price),
        price_tiers: Vec::new(),
        voice_base_rate: Decimal::from(22),
        voice_free_minutes: 0,
        voice_options: Vec::new(),
        network_type: NetworkType::Docomo,
        has_5g: false,
        tethering_available: true,
        overseas_roaming: true,
        family_discount: FamilyDiscount::default(),
        home_internet_discount: HomeInternetDiscount::default(),
        card_discount: CardDiscount::default(),
        shop_support: ShopSupport::default(),
        remote_support: RemoteSupport::default(),
        features: Vec::new(),
        cautions: Vec::new(),
    }
}

pub(crate) fn short_calls(price: i64) -> VoiceOption {
    VoiceOption {
        id: "short".to_owned(),
        name: "5-minute calls".to_owned(),
        price: Decimal::from(price),
        free_minutes: Some(5),
        unlimited: false,
    }
}

pub(crate) fn unlimited_calls(price: i64) -> VoiceOption {
    VoiceOption {
        id: "unlimited".to_owned(),
        name: "Unlimited calls".to_owned(),
        price: Decimal::from(price),
        free_minutes: None,
        unlimited: true,
    }
}

pub(crate) fn family(per_line: i64, max_lines: Option<u32>) -> FamilyDiscount {
    FamilyDiscount {
        available: true,
        discount_per_line: Some(Decimal::from(per_line)),
        max_lines,
    }
}
