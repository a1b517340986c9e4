//! Field-level comparison between a stored land register and a request.
//!
//! Title-page fields are not compared: the lookup key already pins them.

use std::collections::HashMap;

use lrl_types::{InventoryRegister, LandRegister, Owner, ReservationNoteRequest};

use crate::config::OwnerMatching;

/// Name of the first inventory field that differs, if any.
pub fn inventory_difference(
    stored: &InventoryRegister,
    request: &InventoryRegister,
) -> Option<&'static str> {
    [
        ("subdistrict", &stored.subdistrict, &request.subdistrict),
        ("hall", &stored.hall, &request.hall),
        ("parcel", &stored.parcel, &request.parcel),
        ("economicType", &stored.economic_type, &request.economic_type),
        ("location", &stored.location, &request.location),
        ("size", &stored.size, &request.size),
    ]
    .into_iter()
    .find(|(_, a, b)| a != b)
    .map(|(name, _, _)| name)
}

/// Name of the first compared owner field that differs, if any.
///
/// `street` is not part of the comparison.
pub fn owner_difference(stored: &Owner, request: &Owner) -> Option<&'static str> {
    [
        ("dateOfBirth", &stored.date_of_birth, &request.date_of_birth),
        ("city", &stored.city, &request.city),
        ("postcode", &stored.postcode, &request.postcode),
        ("streetNumber", &stored.street_number, &request.street_number),
        ("title", &stored.title, &request.title),
        ("lastName", &stored.last_name, &request.last_name),
        ("firstName", &stored.first_name, &request.first_name),
    ]
    .into_iter()
    .find(|(_, a, b)| a != b)
    .map(|(name, _, _)| name)
}

/// Describe the first disagreement between two owner lists, if any.
pub fn owners_difference(
    stored: &[Owner],
    request: &[Owner],
    matching: OwnerMatching,
) -> Option<String> {
    if stored.len() != request.len() {
        return Some(format!(
            "owner count differs: registered {}, requested {}",
            stored.len(),
            request.len()
        ));
    }

    match matching {
        OwnerMatching::CrossProduct => {
            for s in stored {
                for r in request {
                    if s.identity_number != r.identity_number {
                        continue;
                    }
                    if let Some(field) = owner_difference(s, r) {
                        return Some(field_mismatch(&s.identity_number, field));
                    }
                }
            }
            None
        }
        OwnerMatching::Bijective => {
            let mut by_id: HashMap<&str, &Owner> = HashMap::with_capacity(request.len());
            for r in request {
                if by_id.insert(r.identity_number.as_str(), r).is_some() {
                    return Some(format!(
                        "duplicate identity number {} in request",
                        r.identity_number
                    ));
                }
            }
            // Lengths are equal and request ids unique, so consuming one
            // request owner per stored owner leaves nothing unmatched.
            for s in stored {
                let Some(r) = by_id.remove(s.identity_number.as_str()) else {
                    return Some(format!(
                        "owner {} is not matched by the request",
                        s.identity_number
                    ));
                };
                if let Some(field) = owner_difference(s, r) {
                    return Some(field_mismatch(&s.identity_number, field));
                }
            }
            None
        }
    }
}

fn field_mismatch(identity_number: &str, field: &str) -> String {
    format!("owner {identity_number}: field '{field}' differs")
}

/// Describe the first disagreement between a stored record and a request.
pub fn record_difference(
    stored: &LandRegister,
    request: &ReservationNoteRequest,
    matching: OwnerMatching,
) -> Option<String> {
    if let Some(field) = inventory_difference(&stored.inventory_register, &request.inventory_register)
    {
        return Some(format!("inventory field '{field}' differs"));
    }
    owners_difference(&stored.owners, &request.owners, matching)
}

/// `true` when the request matches the stored record on every compared field.
pub fn same_record(
    stored: &LandRegister,
    request: &ReservationNoteRequest,
    matching: OwnerMatching,
) -> bool {
    record_difference(stored, request, matching).is_none()
}
