use lrl_codec::{stream_as_array, RecordCodec};
use lrl_gate::ReservationGate;
use lrl_store::StateStore;
use lrl_types::{sample_land_registers, LandRegister, RecordKey};
use tracing::{debug, info, warn};

use crate::config::ChaincodeConfig;
use crate::error::{ChaincodeError, ChaincodeResult};
use crate::operation::Operation;
use crate::reservation::attach_reservation_note;
use crate::response::Response;

/// The land register contract bound to one world-state store.
///
/// Each invocation runs to completion synchronously and performs at most one
/// write per record, after every check has passed.
pub struct LandRegisterContract<S: StateStore> {
    store: S,
    config: ChaincodeConfig,
    gate: ReservationGate,
}

impl<S: StateStore> LandRegisterContract<S> {
    pub fn new(store: S, config: ChaincodeConfig) -> Self {
        let gate = ReservationGate::with_default_stages(config.gate.clone());
        Self {
            store,
            config,
            gate,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ChaincodeConfig {
        &self.config
    }

    /// Instantiation hook: seeds the sample records.
    pub fn init(&self) -> Response {
        self.invoke::<&str>(Operation::InitLedger.name(), &[])
    }

    /// Dispatch a named operation with positional string arguments.
    pub fn invoke<A: AsRef<str>>(&self, function: &str, args: &[A]) -> Response {
        info!(function, args = args.len(), "invoke is running");
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let result = self.dispatch(function, &args);
        if let Err(e) = &result {
            warn!(function, kind = e.kind(), error = %e, "invocation failed");
        }
        Response::from_result(result)
    }

    fn dispatch(&self, function: &str, args: &[&str]) -> ChaincodeResult<Vec<u8>> {
        let operation: Operation = function.parse()?;
        operation.check_arity(args.len())?;
        match operation {
            Operation::InitLedger => self.seed().map(|_| Vec::new()),
            Operation::QueryLandRegister => self.query_land_register(args[0]),
            Operation::QueryAllLandRegisters => self.query_all_land_registers(),
            Operation::CreateLandRegister => self.create_land_register(args[0]).map(|_| Vec::new()),
            Operation::CreateReservationNote => {
                self.create_reservation_note(args[0]).map(|_| Vec::new())
            }
        }
    }

    /// Write the sample records. Stops at the first failed write.
    pub fn seed(&self) -> ChaincodeResult<Vec<RecordKey>> {
        let records = sample_land_registers();
        let mut keys = Vec::with_capacity(records.len());
        for record in &records {
            let key = record.key(self.config.key_policy)?;
            let bytes = RecordCodec::encode(record)?;
            self.store.put_state(key.as_str(), &bytes)?;
            debug!(%key, "seeded land register");
            keys.push(key);
        }
        info!(records = keys.len(), "ledger initialized");
        Ok(keys)
    }

    /// Raw stored bytes of one land register.
    pub fn query_land_register(&self, id: &str) -> ChaincodeResult<Vec<u8>> {
        self.store
            .get_state(id)?
            .ok_or_else(|| ChaincodeError::NotFound(id.to_string()))
    }

    /// Every stored land register as a `[{"key":..,"record":..}]` array.
    pub fn query_all_land_registers(&self) -> ChaincodeResult<Vec<u8>> {
        let cursor = self.store.scan_all()?;
        Ok(stream_as_array(cursor, Vec::new())?)
    }

    /// Store a land register under its derived key.
    ///
    /// The input is decoded only to validate it and derive the key; the
    /// submitted bytes are persisted unchanged, unknown fields included.
    pub fn create_land_register(&self, json: &str) -> ChaincodeResult<RecordKey> {
        let record = RecordCodec::decode_land_register(json.as_bytes())?;
        let key = record.key(self.config.key_policy)?;
        self.store.put_state(key.as_str(), json.as_bytes())?;
        info!(%key, "land register created");
        Ok(key)
    }

    /// Attach a reservation note described by a JSON request.
    pub fn create_reservation_note(&self, json: &str) -> ChaincodeResult<LandRegister> {
        let request = RecordCodec::decode_request(json.as_bytes())?;
        attach_reservation_note(&self.store, &self.gate, self.config.key_policy, &request)
    }
}

impl<S: StateStore + std::fmt::Debug> std::fmt::Debug for LandRegisterContract<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandRegisterContract")
            .field("store", &self.store)
            .field("config", &self.config)
            .field("gate", &self.gate)
            .finish()
    }
}
