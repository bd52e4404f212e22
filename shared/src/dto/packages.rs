use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Market a signal package covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    Forex,
    Crypto,
    Psx,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationType {
    ShortTerm,
    LongTerm,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingCycle {
    Monthly,
    SixMonths,
    Yearly,
}

/// A subscribable signal package.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Package {
    pub id: i64,
    pub name: String,
    pub asset_class: AssetClass,
    pub duration_type: DurationType,
    pub billing_cycle: BillingCycle,
    pub duration_days: u32,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signals_per_day: Option<u32>,
    #[serde(default)]
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Package {
    /// Price as shown on a package card: `$49`, `$49.5`.
    pub fn formatted_price(&self) -> String {
        format!("${}", self.price)
    }

    /// First `limit` features plus how many were left out.
    pub fn feature_preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.features.len().min(limit);
        (&self.features[..shown], self.features.len() - shown)
    }
}

/// One page of the package catalogue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackagesPage {
    pub limit: u32,
    pub offset: u32,
    pub packages: Vec<Package>,
    pub total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(features: &[&str], price: f64) -> Package {
        serde_json::from_value(json!({
            "id": 1,
            "name": "Gold Forex",
            "asset_class": "FOREX",
            "duration_type": "SHORT_TERM",
            "billing_cycle": "SIX_MONTHS",
            "duration_days": 180,
            "price": price,
            "description": "Daily FX setups",
            "is_active": true,
            "features": features,
            "created_at": "2025-02-01T00:00:00Z",
            "updated_at": "2025-02-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn parses_catalogue_enums() {
        let package = sample(&[], 49.0);
        assert_eq!(package.asset_class, AssetClass::Forex);
        assert_eq!(package.billing_cycle, BillingCycle::SixMonths);
        assert_eq!(package.signals_per_day, None);
    }

    #[test]
    fn formats_price_without_trailing_zeros() {
        assert_eq!(sample(&[], 49.0).formatted_price(), "$49");
        assert_eq!(sample(&[], 49.5).formatted_price(), "$49.5");
    }

    #[test]
    fn feature_preview_reports_hidden_count() {
        let package = sample(&["a", "b", "c", "d", "e"], 10.0);
        let (shown, hidden) = package.feature_preview(3);
        assert_eq!(shown.len(), 3);
        assert_eq!(hidden, 2);

        let single = sample(&["a"], 10.0);
        let (shown, hidden) = single.feature_preview(3);
        assert_eq!(shown, ["a".to_string()]);
        assert_eq!(hidden, 0);
    }
}
