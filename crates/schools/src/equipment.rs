use serde::{Deserialize, Serialize};

use franchise_config::{CatalogItemId, EquipmentCatalogItem};
use franchise_core::{DomainError, DomainResult, EquipmentLineId};

use crate::override_value::OverrideValue;

/// One equipment line attached to a school.
///
/// Name and price are snapshots taken from the catalog when the line was
/// added; the catalog can change afterwards without rewriting history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolEquipment {
    pub id: EquipmentLineId,
    pub catalog_item_id: CatalogItemId,
    pub name: String,
    pub quantity: i64,
    pub unit_price: OverrideValue<f64>,
    /// `calculated` = quantity × `unit_price.final`.
    pub total: OverrideValue<f64>,
}

impl SchoolEquipment {
    /// New line with quantity 1 at the catalog's default price.
    pub fn from_catalog(id: EquipmentLineId, item: &EquipmentCatalogItem) -> Self {
        Self {
            id,
            catalog_item_id: item.id.clone(),
            name: item.name.clone(),
            quantity: 1,
            unit_price: OverrideValue::automatic(item.default_unit_price),
            total: OverrideValue::automatic(item.default_unit_price),
        }
    }

    /// Look `item_id` up in `catalog` and build a line of `quantity` units.
    ///
    /// Unknown items are `NotFound`; inactive items and negative quantities
    /// are rejected.
    pub fn for_catalog_item(
        id: EquipmentLineId,
        catalog: &[EquipmentCatalogItem],
        item_id: &CatalogItemId,
        quantity: i64,
    ) -> DomainResult<Self> {
        let item = catalog
            .iter()
            .find(|item| &item.id == item_id)
            .ok_or_else(|| DomainError::not_found(format!("catalog item {item_id}")))?;
        if !item.active {
            return Err(DomainError::validation(format!(
                "catalog item {item_id} is inactive"
            )));
        }
        if quantity < 0 {
            return Err(DomainError::validation("equipment quantity cannot be negative"));
        }
        let line = Self::from_catalog(id, item);
        let total = line.unit_price.final_value() * quantity as f64;
        Ok(Self {
            quantity,
            total: OverrideValue::automatic(total),
            ..line
        })
    }
}
