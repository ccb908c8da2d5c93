use serde::{Deserialize, Serialize};

/// Catalog item code (e.g. `"1"` for "Mesa Grande").
///
/// Catalog entries are configuration, not entities, so their ids are short
/// human-assigned codes rather than UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogItemId(String);

impl CatalogItemId {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CatalogItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reusable equipment definition shared by every school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentCatalogItem {
    pub id: CatalogItemId,
    pub name: String,
    /// Suggested unit price; becomes the automatic unit price of school lines.
    pub default_unit_price: f64,
    /// Unit label, e.g. "Pza".
    pub unit: String,
    /// Inactive items stay resolvable for existing lines but cannot be added.
    pub active: bool,
}

impl EquipmentCatalogItem {
    pub fn new(id: &str, name: &str, default_unit_price: f64) -> Self {
        Self {
            id: CatalogItemId::new(id),
            name: name.to_string(),
            default_unit_price,
            unit: "Pza".to_string(),
            active: true,
        }
    }
}

/// The catalog the system ships with.
pub(crate) fn seeded_catalog() -> Vec<EquipmentCatalogItem> {
    vec![
        EquipmentCatalogItem::new("1", "Mesa Grande", 40_000.0),
        EquipmentCatalogItem::new("2", "Mesa Pequeña", 30_000.0),
        EquipmentCatalogItem::new("3", "VR Meta Quest", 7_000.0),
        EquipmentCatalogItem::new("4", "Laptop", 3_500.0),
        EquipmentCatalogItem::new("5", "Tablet", 2_000.0),
        EquipmentCatalogItem::new("6", "Impresora 3D", 3_000.0),
        EquipmentCatalogItem::new("7", "Pantalla 55\"", 5_500.0),
        EquipmentCatalogItem::new("8", "Vinilado AR", 6_000.0),
    ]
}
