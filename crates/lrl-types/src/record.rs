use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TypeError;
use crate::key::{KeyPolicy, RecordKey};

/// Document kind tag carried by every land register.
pub const LAND_REGISTER_OBJECT_TYPE: &str = "landRegister";

/// Title page: the three fields forming a record's business identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitlePage {
    pub district_court: String,
    #[serde(rename = "landRegistryDistrict", alias = "registryDistrict")]
    pub registry_district: String,
    pub sheet_number: String,
}

/// Inventory register: descriptive parcel data, not identity-bearing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRegister {
    pub subdistrict: String,
    pub hall: String,
    pub parcel: String,
    pub economic_type: String,
    pub location: String,
    pub size: String,
}

/// A registered owner, unique within its land register by `identity_number`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub identity_number: String,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub postcode: String,
    pub city: String,
    pub street: String,
    pub street_number: String,
}

/// The root persisted document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandRegister {
    #[serde(rename = "docType", alias = "objectType")]
    pub object_type: String,
    pub title_page: TitlePage,
    pub inventory_register: InventoryRegister,
    /// Semantically a set keyed by identity number; order carries no meaning.
    pub owners: Vec<Owner>,
    /// One-way flag: only ever transitions `false -> true`.
    /// Absent or `null` decodes as `false`.
    #[serde(default, deserialize_with = "null_as_false")]
    pub reservation_note: bool,
}

impl LandRegister {
    /// Composite key under which this record is stored.
    pub fn key(&self, policy: KeyPolicy) -> Result<RecordKey, TypeError> {
        RecordKey::derive(
            &self.object_type,
            &self.title_page.district_court,
            &self.title_page.registry_district,
            &self.title_page.sheet_number,
            policy,
        )
    }

    /// Look up an owner by identity number.
    pub fn owner(&self, identity_number: &str) -> Option<&Owner> {
        self.owners
            .iter()
            .find(|o| o.identity_number == identity_number)
    }
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

/// Caller-supplied claim used to authorize the reservation-note transition.
///
/// Structurally a [`LandRegister`] without the `reservationNote` flag. It is
/// never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationNoteRequest {
    #[serde(rename = "docType", alias = "objectType")]
    pub object_type: String,
    pub title_page: TitlePage,
    pub inventory_register: InventoryRegister,
    pub owners: Vec<Owner>,
}

impl ReservationNoteRequest {
    /// Composite key of the record this request targets.
    pub fn key(&self, policy: KeyPolicy) -> Result<RecordKey, TypeError> {
        RecordKey::derive(
            &self.object_type,
            &self.title_page.district_court,
            &self.title_page.registry_district,
            &self.title_page.sheet_number,
            policy,
        )
    }
}

impl From<&LandRegister> for ReservationNoteRequest {
    fn from(record: &LandRegister) -> Self {
        Self {
            object_type: record.object_type.clone(),
            title_page: record.title_page.clone(),
            inventory_register: record.inventory_register.clone(),
            owners: record.owners.clone(),
        }
    }
}
