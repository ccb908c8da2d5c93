use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use franchise_core::{DomainError, DomainResult, ValueObject};

use crate::catalog::{seeded_catalog, CatalogItemId, EquipmentCatalogItem};

/// Base per-student prices and management costs for both program types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pricing {
    /// BEST package price per student.
    pub best_price: f64,
    /// Management cost per student for the BEST package.
    pub best_management_cost: f64,
    /// Price per individual program per student.
    pub individual_price: f64,
    /// Management cost per individual program per student.
    pub individual_management_cost: f64,
}

impl ValueObject for Pricing {}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            best_price: 4_200.0,
            best_management_cost: 1_000.0,
            individual_price: 2_000.0,
            individual_management_cost: 350.0,
        }
    }
}

/// Process-wide defaults read by the projection engine and school creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub pricing: Pricing,
    /// Licensee share of net revenue given to new schools (0.0–1.0).
    pub default_split: f64,
    pub catalog: Vec<EquipmentCatalogItem>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            pricing: Pricing::default(),
            default_split: 0.40,
            catalog: seeded_catalog(),
        }
    }
}

impl GlobalConfig {
    pub fn catalog_item(&self, id: &CatalogItemId) -> Option<&EquipmentCatalogItem> {
        self.catalog.iter().find(|item| &item.id == id)
    }

    pub fn active_catalog(&self) -> impl Iterator<Item = &EquipmentCatalogItem> {
        self.catalog.iter().filter(|item| item.active)
    }

    /// Reject configurations the configuration editor must never store.
    pub fn validate(&self) -> DomainResult<()> {
        let prices = [
            ("best_price", self.pricing.best_price),
            ("best_management_cost", self.pricing.best_management_cost),
            ("individual_price", self.pricing.individual_price),
            ("individual_management_cost", self.pricing.individual_management_cost),
        ];
        for (name, value) in prices {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::validation(format!(
                    "pricing.{name} must be a non-negative number"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.default_split) {
            return Err(DomainError::validation(
                "default_split must be between 0 and 1",
            ));
        }

        let mut seen = HashSet::new();
        for item in &self.catalog {
            if item.name.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "catalog item {} has no name",
                    item.id
                )));
            }
            if !item.default_unit_price.is_finite() || item.default_unit_price < 0.0 {
                return Err(DomainError::validation(format!(
                    "catalog item {} has a negative price",
                    item.id
                )));
            }
            if !seen.insert(&item.id) {
                return Err(DomainError::validation(format!(
                    "duplicate catalog item id {}",
                    item.id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_seeded_price_list() {
        let config = GlobalConfig::default();
        assert_eq!(config.pricing.best_price, 4_200.0);
        assert_eq!(config.pricing.best_management_cost, 1_000.0);
        assert_eq!(config.pricing.individual_price, 2_000.0);
        assert_eq!(config.pricing.individual_management_cost, 350.0);
        assert_eq!(config.default_split, 0.40);
        assert_eq!(config.catalog.len(), 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn catalog_lookup_by_code() {
        let config = GlobalConfig::default();
        let item = config.catalog_item(&CatalogItemId::new("1")).unwrap();
        assert_eq!(item.name, "Mesa Grande");
        assert_eq!(item.default_unit_price, 40_000.0);
        assert!(config.catalog_item(&CatalogItemId::new("99")).is_none());
    }

    #[test]
    fn inactive_items_are_hidden_from_the_active_catalog() {
        let mut config = GlobalConfig::default();
        config.catalog[0].active = false;
        assert_eq!(config.active_catalog().count(), 7);
        assert!(config.active_catalog().all(|i| i.id.as_str() != "1"));
    }

    #[test]
    fn split_outside_unit_interval_is_rejected() {
        let config = GlobalConfig {
            default_split: 1.5,
            ..GlobalConfig::default()
        };
        assert!(matches!(config.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut config = GlobalConfig::default();
        config.pricing.individual_price = -1.0;
        match config.validate() {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("individual_price")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_catalog_codes_are_rejected() {
        let mut config = GlobalConfig::default();
        config.catalog.push(EquipmentCatalogItem::new("1", "Otra Mesa", 1.0));
        match config.validate() {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("duplicate")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
