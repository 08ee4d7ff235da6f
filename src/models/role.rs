//! Supply-chain participants awaiting or holding an approved role.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::record::{FieldValue, ViewRecord};

labelled_enum! {
    pub enum ParticipantRole {
        Farmer => "Farmer",
        Distributor => "Distributor",
        Retailer => "Retailer",
        Consumer => "Consumer",
    }
}

labelled_enum! {
    /// Registration status. `Approved` and `Rejected` are terminal.
    pub enum RoleStatus {
        Approved => "Approved",
        Pending => "Pending",
        Rejected => "Rejected",
    }
}

impl RoleStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoleStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: i64,
    pub name: String,
    pub role: ParticipantRole,
    pub wallet_id: String,
    pub status: RoleStatus,
    pub registration_date: NaiveDate,
    pub location: String,
}

impl ViewRecord for Participant {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "role" => self.role.as_str().into(),
            "walletId" => self.wallet_id.as_str().into(),
            "status" => self.status.as_str().into(),
            "registrationDate" => self.registration_date.format("%Y-%m-%d").to_string().into(),
            "location" => self.location.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}
