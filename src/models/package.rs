use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub pricing_mode: PricingMode,
    pub price: Option<i64>,
    pub price_tiers: Vec<PriceTier>,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub menu_sections: Vec<MenuSection>,
    pub terms: Vec<String>,
    pub images: Vec<String>,
    pub created_by: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum PricingMode {
    #[serde(rename = "fixed")]
    Fixed,
    #[serde(rename = "perPerson")]
    PerPerson,
    #[serde(rename = "custom")]
    Custom,
}

impl PricingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingMode::Fixed => "fixed",
            PricingMode::PerPerson => "perPerson",
            PricingMode::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "perPerson" => PricingMode::PerPerson,
            "custom" => PricingMode::Custom,
            _ => PricingMode::Fixed,
        }
    }
}

/// One row of a people-count → price table for `perPerson` packages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTier {
    pub people: i64,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSection {
    pub title: String,
    pub items: Vec<String>,
}
