//! JSON codec for the Land Register Ledger.
//!
//! Records are persisted and returned as canonical JSON. Full-collection
//! queries are assembled by [`ArrayWriter`], which copies each stored value
//! into the response verbatim instead of decoding and re-encoding it.

pub mod array;
pub mod codec;
pub mod error;

pub use array::{stream_as_array, ArrayWriter};
pub use codec::RecordCodec;
pub use error::{CodecError, CodecResult};
