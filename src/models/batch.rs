use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::record::{FieldValue, ViewRecord};

labelled_enum! {
    pub enum BatchStatus {
        Harvested => "Harvested",
        Processed => "Processed",
        InTransit => "In Transit",
        Delivered => "Delivered",
        Sold => "Sold",
        Completed => "Completed",
    }
}

/// A harvested lot tracked through the supply chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: String,
    pub status: BatchStatus,
    pub crop: String,
    /// Quantity in kilograms
    pub quantity: u32,
    pub farmer: String,
    pub value: Decimal,
}

impl ViewRecord for Batch {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.as_str().into(),
            "status" => self.status.as_str().into(),
            "crop" => self.crop.as_str().into(),
            "quantity" => self.quantity.into(),
            "farmer" => self.farmer.as_str().into(),
            "value" => self.value.into(),
            _ => return None,
        };
        Some(value)
    }
}
