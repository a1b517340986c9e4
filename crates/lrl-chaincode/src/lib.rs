//! Land register contract for the Land Register Ledger.
//!
//! This crate wires the record model, the state store, the JSON codec and the
//! reservation gate into the operations a ledger host invokes:
//!
//! | Operation | Args | Success payload |
//! |---|---|---|
//! | `initLedger` / `seed` | ignored | empty |
//! | `queryLandRegister` | `[id]` | raw stored bytes |
//! | `queryAllLandRegisters` | none | `[{"key":..,"record":..}]` |
//! | `createLandRegister` | `[json]` | empty |
//! | `createReservationNote` | `[json]` | empty |
//!
//! Failures come back as status 500 with `{"Error":"<message>"}`.

pub mod config;
pub mod contract;
pub mod error;
pub mod operation;
pub mod reservation;
pub mod response;

pub use config::ChaincodeConfig;
pub use contract::LandRegisterContract;
pub use error::{ChaincodeError, ChaincodeResult};
pub use operation::Operation;
pub use reservation::attach_reservation_note;
pub use response::Response;

#[cfg(test)]
mod tests {
    use super::*;
    use lrl_codec::RecordCodec;
    use lrl_store::{
        CursorLease, InMemoryStateStore, StateEntry, StateIterator, StateStore, StoreError,
        StoreResult,
    };
    use lrl_types::{sample_land_registers, LandRegister, ReservationNoteRequest};
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const EUTIN: &str = "landRegister-Eutin-Malente-3323";

    fn contract() -> LandRegisterContract<InMemoryStateStore> {
        LandRegisterContract::new(InMemoryStateStore::new(), ChaincodeConfig::default())
    }

    fn seeded() -> LandRegisterContract<InMemoryStateStore> {
        let c = contract();
        assert!(c.init().is_ok());
        c
    }

    fn request_json() -> String {
        let request = ReservationNoteRequest::from(&sample_land_registers()[0]);
        String::from_utf8(RecordCodec::encode(&request).unwrap()).unwrap()
    }

    fn error_text(response: &Response) -> String {
        let v: Value = serde_json::from_str(&response.message).unwrap();
        v["Error"].as_str().unwrap().to_string()
    }

    fn query(c: &LandRegisterContract<InMemoryStateStore>, id: &str) -> LandRegister {
        let r = c.invoke("queryLandRegister", &[id]);
        assert!(r.is_ok(), "{}", r.message);
        RecordCodec::decode_land_register(&r.payload).unwrap()
    }

    // -----------------------------------------------------------------------
    // 1. Eutin walkthrough: seed, query, reserve, query, reserve again
    // -----------------------------------------------------------------------
    #[test]
    fn eutin_scenario() {
        let c = seeded();
        assert!(!query(&c, EUTIN).reservation_note);

        let first = c.invoke("createReservationNote", &[request_json()]);
        assert!(first.is_ok(), "{}", first.message);
        assert!(first.payload.is_empty());
        assert!(query(&c, EUTIN).reservation_note);

        let second = c.invoke("createReservationNote", &[request_json()]);
        assert!(!second.is_ok());
        assert_eq!(
            error_text(&second),
            format!("Reservation Note already exists for {EUTIN}!")
        );
    }

    #[test]
    fn seed_alias_and_ignored_arguments() {
        let c = contract();
        assert!(c.invoke("seed", &["whatever", "else"]).is_ok());
        assert_eq!(c.store().len().unwrap(), 1);
        assert_eq!(c.seed().unwrap()[0].as_str(), EUTIN);
    }

    // -----------------------------------------------------------------------
    // 2. Create then query is a byte-for-byte pass-through
    // -----------------------------------------------------------------------
    #[test]
    fn create_preserves_submitted_bytes() {
        let c = contract();
        let mut doc: Value =
            serde_json::from_slice(&RecordCodec::encode(&sample_land_registers()[0]).unwrap())
                .unwrap();
        doc["titlePage"]["sheetNumber"] = "4711".into();
        doc["extraField"] = "kept verbatim".into();
        let submitted = format!("  {}\n", serde_json::to_string_pretty(&doc).unwrap());

        let r = c.invoke("createLandRegister", &[submitted.as_str()]);
        assert!(r.is_ok(), "{}", r.message);
        let stored = c.query_land_register("landRegister-Eutin-Malente-4711").unwrap();
        assert_eq!(stored, submitted.as_bytes());
    }

    #[test]
    fn create_rejects_malformed_json() {
        let c = contract();
        let r = c.invoke("createLandRegister", &["{not json"]);
        assert!(error_text(&r).starts_with("Failed to unmarshal: "));
        assert!(c.store().is_empty().unwrap());
    }

    #[test]
    fn create_accepts_null_reservation_flag() {
        let c = contract();
        let mut doc: Value =
            serde_json::from_slice(&RecordCodec::encode(&sample_land_registers()[0]).unwrap())
                .unwrap();
        doc["reservationNote"] = Value::Null;
        let r = c.invoke("createLandRegister", &[doc.to_string()]);
        assert!(r.is_ok(), "{}", r.message);
        assert!(c.create_reservation_note(&request_json()).is_ok());
    }

    #[test]
    fn create_overwrites_a_reserved_record() {
        let c = seeded();
        c.create_reservation_note(&request_json()).unwrap();

        let fresh = String::from_utf8(RecordCodec::encode(&sample_land_registers()[0]).unwrap())
            .unwrap();
        c.create_land_register(&fresh).unwrap();
        assert!(!query(&c, EUTIN).reservation_note);
        assert!(c.create_reservation_note(&request_json()).is_ok());
    }

    #[test]
    fn create_rejects_separator_in_key_component() {
        let c = contract();
        let mut record = sample_land_registers().remove(0);
        record.title_page.registry_district = "Bad-Malente".into();
        let json = String::from_utf8(RecordCodec::encode(&record).unwrap()).unwrap();
        let err = c.create_land_register(&json).unwrap_err();
        assert_eq!(err.kind(), "invalid-key");
        assert!(c.store().is_empty().unwrap());
    }

    #[test]
    fn legacy_config_accepts_separator_in_key_component() {
        let c = LandRegisterContract::new(InMemoryStateStore::new(), ChaincodeConfig::legacy());
        let mut record = sample_land_registers().remove(0);
        record.title_page.registry_district = "Bad-Malente".into();
        let json = String::from_utf8(RecordCodec::encode(&record).unwrap()).unwrap();
        let key = c.create_land_register(&json).unwrap();
        assert_eq!(key.as_str(), "landRegister-Eutin-Bad-Malente-3323");
    }

    // -----------------------------------------------------------------------
    // 3. Query errors
    // -----------------------------------------------------------------------
    #[test]
    fn query_missing_is_not_found() {
        let c = contract();
        let r = c.invoke("queryLandRegister", &["landRegister-X-Y-1"]);
        assert_eq!(r.status, response::ERROR);
        assert_eq!(error_text(&r), "Landregister does not exist: landRegister-X-Y-1");
    }

    // -----------------------------------------------------------------------
    // 4. queryAll envelope
    // -----------------------------------------------------------------------
    #[test]
    fn query_all_empty_store() {
        let c = contract();
        let r = c.invoke::<&str>("queryAllLandRegisters", &[]);
        assert!(r.is_ok());
        assert_eq!(r.payload, b"[]");
        assert_eq!(c.store().open_cursors(), 0);
    }

    #[test]
    fn query_all_returns_raw_records_in_key_order() {
        let c = contract();
        c.store().put_state("b", b"{\"n\": 2}").unwrap();
        c.store().put_state("a", b"{\"n\":1}").unwrap();

        let payload = c.query_all_land_registers().unwrap();
        assert_eq!(
            payload,
            br#"[{"key":"a","record":{"n":1}},{"key":"b","record":{"n": 2}}]"#
        );
        assert_eq!(c.store().open_cursors(), 0);
    }

    #[test]
    fn query_all_after_seed_holds_the_sample() {
        let c = seeded();
        let v: Value = serde_json::from_slice(&c.query_all_land_registers().unwrap()).unwrap();
        let items = v.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["key"], EUTIN);
        assert_eq!(items[0]["record"]["titlePage"]["districtCourt"], "Eutin");
    }

    // -----------------------------------------------------------------------
    // 5. Reservation mismatches
    // -----------------------------------------------------------------------
    #[test]
    fn reservation_mismatch_reports_reason() {
        let c = seeded();
        let mut request = ReservationNoteRequest::from(&sample_land_registers()[0]);
        request.inventory_register.size = "900 m2".into();
        let json = String::from_utf8(RecordCodec::encode(&request).unwrap()).unwrap();

        let r = c.invoke("createReservationNote", &[json]);
        assert_eq!(
            error_text(&r),
            "Landregister and Reservation note request unequal: inventory field 'size' differs"
        );
        assert!(!query(&c, EUTIN).reservation_note);
    }

    #[test]
    fn reservation_for_unknown_record_is_not_found() {
        let c = contract();
        let r = c.invoke("createReservationNote", &[request_json()]);
        assert_eq!(error_text(&r), format!("Landregister does not exist: {EUTIN}"));
    }

    // -----------------------------------------------------------------------
    // 6. Dispatch errors
    // -----------------------------------------------------------------------
    #[test]
    fn unknown_operation() {
        let c = contract();
        let r = c.invoke::<&str>("deleteLandRegister", &[]);
        assert_eq!(
            error_text(&r),
            "Received unknown function invocation: deleteLandRegister"
        );
    }

    #[test]
    fn arity_is_checked_before_anything_runs() {
        let c = contract();
        for (function, args) in [
            ("queryLandRegister", vec![]),
            ("queryLandRegister", vec!["a", "b"]),
            ("queryAllLandRegisters", vec!["a"]),
            ("createLandRegister", vec![]),
            ("createReservationNote", vec!["a", "b"]),
        ] {
            let r = c.invoke(function, args.as_slice());
            assert!(
                error_text(&r).starts_with("Incorrect number of arguments"),
                "{function}: {}",
                r.message
            );
        }
        assert!(c.store().is_empty().unwrap());
    }

    // -----------------------------------------------------------------------
    // 7. Store failures surface as errors and release cursors
    // -----------------------------------------------------------------------

    /// Store double whose individual operations can be made to fail.
    #[derive(Default)]
    struct FaultyStore {
        inner: InMemoryStateStore,
        fail_get: bool,
        fail_put: bool,
        fail_scan_open: bool,
        fail_scan_after: Option<usize>,
        refuse_cas: bool,
        open: Arc<AtomicUsize>,
    }

    impl StateStore for FaultyStore {
        fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
            if self.fail_get {
                return Err(StoreError::Backend("get unavailable".into()));
            }
            self.inner.get_state(key)
        }

        fn put_state(&self, key: &str, value: &[u8]) -> StoreResult<()> {
            if self.fail_put {
                return Err(StoreError::Backend("put unavailable".into()));
            }
            self.inner.put_state(key, value)
        }

        fn put_state_if(
            &self,
            key: &str,
            expected: Option<&[u8]>,
            value: &[u8],
        ) -> StoreResult<bool> {
            if self.fail_put {
                return Err(StoreError::Backend("put unavailable".into()));
            }
            if self.refuse_cas {
                return Ok(false);
            }
            self.inner.put_state_if(key, expected, value)
        }

        fn scan_range(&self, start: &str, end: &str) -> StoreResult<StateIterator<'_>> {
            if self.fail_scan_open {
                return Err(StoreError::Backend("range unavailable".into()));
            }
            let entries: Vec<StoreResult<StateEntry>> =
                self.inner.scan_range(start, end)?.collect();
            let limit = self.fail_scan_after.unwrap_or(usize::MAX);
            let entries = entries.into_iter().enumerate().map(move |(i, e)| {
                if i >= limit {
                    Err(StoreError::Backend("cursor broke".into()))
                } else {
                    e
                }
            });
            Ok(StateIterator::new(entries, CursorLease::acquire(&self.open)))
        }
    }

    fn faulty(store: FaultyStore) -> LandRegisterContract<FaultyStore> {
        LandRegisterContract::new(store, ChaincodeConfig::default())
    }

    fn seeded_inner() -> InMemoryStateStore {
        let inner = InMemoryStateStore::new();
        let record = &sample_land_registers()[0];
        inner
            .put_state(EUTIN, &RecordCodec::encode(record).unwrap())
            .unwrap();
        inner.put_state("zz", b"{}").unwrap();
        inner
    }

    #[test]
    fn get_failure_is_store_error() {
        let c = faulty(FaultyStore {
            fail_get: true,
            ..Default::default()
        });
        let r = c.invoke("queryLandRegister", &[EUTIN]);
        assert_eq!(error_text(&r), "Failed to access state: backend error: get unavailable");
    }

    #[test]
    fn seed_failure_is_reported() {
        let c = faulty(FaultyStore {
            fail_put: true,
            ..Default::default()
        });
        let err = c.seed().unwrap_err();
        assert_eq!(err.kind(), "store");
        assert!(!c.init().is_ok());
    }

    #[test]
    fn scan_open_failure_is_store_error() {
        let c = faulty(FaultyStore {
            inner: seeded_inner(),
            fail_scan_open: true,
            ..Default::default()
        });
        let r = c.invoke::<&str>("queryAllLandRegisters", &[]);
        assert_eq!(r.status, response::ERROR);
        assert!(r.payload.is_empty());
        assert!(error_text(&r).starts_with("Failed to access state"));
        assert_eq!(c.store().open.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn mid_scan_failure_aborts_and_releases_cursor() {
        let c = faulty(FaultyStore {
            inner: seeded_inner(),
            fail_scan_after: Some(1),
            ..Default::default()
        });
        let r = c.invoke::<&str>("queryAllLandRegisters", &[]);
        assert!(!r.is_ok());
        assert!(r.payload.is_empty());
        assert!(error_text(&r).contains("cursor broke"));
        assert_eq!(c.store().open.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn successful_scan_releases_cursor() {
        let c = faulty(FaultyStore {
            inner: seeded_inner(),
            ..Default::default()
        });
        let v: Value = serde_json::from_slice(&c.query_all_land_registers().unwrap()).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 2);
        assert_eq!(c.store().open.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn reservation_write_failure_leaves_flag_unset() {
        let c = faulty(FaultyStore {
            inner: seeded_inner(),
            fail_put: true,
            ..Default::default()
        });
        let err = c.create_reservation_note(&request_json()).unwrap_err();
        assert_eq!(err.kind(), "store");
        let bytes = c.store().inner.get_state(EUTIN).unwrap().unwrap();
        assert!(!RecordCodec::decode_land_register(&bytes).unwrap().reservation_note);
    }

    #[test]
    fn lost_race_is_conflict() {
        let c = faulty(FaultyStore {
            inner: seeded_inner(),
            refuse_cas: true,
            ..Default::default()
        });
        let err = c.create_reservation_note(&request_json()).unwrap_err();
        assert!(matches!(err, ChaincodeError::Conflict(ref k) if k == EUTIN));
        assert!(err.is_retryable());
    }

    // -----------------------------------------------------------------------
    // 8. Configuration reaches the gate
    // -----------------------------------------------------------------------
    #[test]
    fn owner_matching_follows_config() {
        let mut request = ReservationNoteRequest::from(&sample_land_registers()[0]);
        request.owners[1].identity_number = "42".into();
        let json = String::from_utf8(RecordCodec::encode(&request).unwrap()).unwrap();

        let strict = seeded();
        assert!(strict.create_reservation_note(&json).is_err());

        let legacy = LandRegisterContract::new(InMemoryStateStore::new(), ChaincodeConfig::legacy());
        assert!(legacy.init().is_ok());
        assert!(legacy.create_reservation_note(&json).unwrap().reservation_note);
    }
}
