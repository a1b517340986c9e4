//! Fixed sample data written by the seed operation.

use crate::record::{InventoryRegister, LandRegister, Owner, TitlePage, LAND_REGISTER_OBJECT_TYPE};

/// Build the land registers the ledger is seeded with.
///
/// Returns fresh values on every call; nothing here is shared state.
pub fn sample_land_registers() -> Vec<LandRegister> {
    vec![LandRegister {
        object_type: LAND_REGISTER_OBJECT_TYPE.into(),
        title_page: TitlePage {
            district_court: "Eutin".into(),
            registry_district: "Malente".into(),
            sheet_number: "3323".into(),
        },
        inventory_register: InventoryRegister {
            subdistrict: "Malente".into(),
            hall: "4".into(),
            parcel: "6/12".into(),
            economic_type: "Hof- und Gebaeudeflaeche".into(),
            location: "Steencamp 112".into(),
            size: "845 m2".into(),
        },
        owners: vec![
            owner("1", "Mr", "Reiner", "17.06.1955"),
            owner("2", "Mrs", "Monika", "16.07.1956"),
        ],
        reservation_note: false,
    }]
}

fn owner(identity_number: &str, title: &str, first_name: &str, date_of_birth: &str) -> Owner {
    Owner {
        identity_number: identity_number.into(),
        title: title.into(),
        first_name: first_name.into(),
        last_name: "Schatz".into(),
        date_of_birth: date_of_birth.into(),
        postcode: "10***".into(),
        city: "Berlin".into(),
        street: "Street".into(),
        street_number: "123".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyPolicy;

    #[test]
    fn sample_keys_are_valid_under_default_policy() {
        for record in sample_land_registers() {
            assert!(record.key(KeyPolicy::default()).is_ok());
            assert!(!record.reservation_note);
        }
    }

    #[test]
    fn sample_owner_identities_are_unique() {
        let record = &sample_land_registers()[0];
        let mut ids: Vec<_> = record.owners.iter().map(|o| &o.identity_number).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), record.owners.len());
    }
}
