use std::fmt;
use std::str::FromStr;

use crate::error::{ChaincodeError, ChaincodeResult};

/// Operations exposed to the host, addressed by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    InitLedger,
    QueryLandRegister,
    QueryAllLandRegisters,
    CreateLandRegister,
    CreateReservationNote,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::InitLedger,
        Operation::QueryLandRegister,
        Operation::QueryAllLandRegisters,
        Operation::CreateLandRegister,
        Operation::CreateReservationNote,
    ];

    /// Canonical function name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitLedger => "initLedger",
            Self::QueryLandRegister => "queryLandRegister",
            Self::QueryAllLandRegisters => "queryAllLandRegisters",
            Self::CreateLandRegister => "createLandRegister",
            Self::CreateReservationNote => "createReservationNote",
        }
    }

    /// Required argument count. `None` means arguments are ignored.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Self::InitLedger => None,
            Self::QueryAllLandRegisters => Some(0),
            Self::QueryLandRegister | Self::CreateLandRegister | Self::CreateReservationNote => {
                Some(1)
            }
        }
    }

    fn expectation(&self) -> &'static str {
        match self {
            Self::InitLedger => "no arguments",
            Self::QueryLandRegister => "landRegisterId to query",
            Self::QueryAllLandRegisters => "0 arguments",
            Self::CreateLandRegister => "JSON representation of LandRegister",
            Self::CreateReservationNote => "JSON representation of ReservationNoteRequest",
        }
    }

    pub fn check_arity(&self, given: usize) -> ChaincodeResult<()> {
        match self.arity() {
            Some(expected) if expected != given => Err(ChaincodeError::Arity {
                expected: self.expectation(),
                given,
            }),
            _ => Ok(()),
        }
    }
}

impl FromStr for Operation {
    type Err = ChaincodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initLedger" | "seed" => Ok(Self::InitLedger),
            "queryLandRegister" => Ok(Self::QueryLandRegister),
            "queryAllLandRegisters" => Ok(Self::QueryAllLandRegisters),
            "createLandRegister" => Ok(Self::CreateLandRegister),
            "createReservationNote" => Ok(Self::CreateReservationNote),
            other => Err(ChaincodeError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
