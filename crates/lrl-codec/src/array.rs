use std::io::Write;

use lrl_store::{StateEntry, StoreResult};
use tracing::debug;

use crate::error::{CodecError, CodecResult};

/// Incremental writer for the `[{"key":..,"record":..}, ..]` query result.
///
/// Each stored value is written as the `record` member byte for byte, so the
/// response reproduces exactly what was persisted. Keys are JSON-escaped.
pub struct ArrayWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> ArrayWriter<W> {
    /// Start a new array on `out`.
    pub fn begin(mut out: W) -> CodecResult<Self> {
        out.write_all(b"[")?;
        Ok(Self { out, written: 0 })
    }

    /// Append one `{key, record}` element.
    pub fn push(&mut self, key: &str, raw_record: &[u8]) -> CodecResult<()> {
        // Comma before every member except the first.
        if self.written > 0 {
            self.out.write_all(b",")?;
        }
        self.out.write_all(b"{\"key\":")?;
        serde_json::to_writer(&mut self.out, key)
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        self.out.write_all(b",\"record\":")?;
        self.out.write_all(raw_record)?;
        self.out.write_all(b"}")?;
        self.written += 1;
        Ok(())
    }

    /// Number of elements written so far.
    pub fn len(&self) -> usize {
        self.written
    }

    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Close the array and hand back the underlying writer.
    pub fn finish(mut self) -> CodecResult<W> {
        self.out.write_all(b"]")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Write every entry of a range scan as one JSON array.
///
/// The first failing entry aborts the whole array: the error is returned and
/// the partially written output is dropped with the writer.
pub fn stream_as_array<I, W>(entries: I, out: W) -> CodecResult<W>
where
    I: IntoIterator<Item = StoreResult<StateEntry>>,
    W: Write,
{
    let mut array = ArrayWriter::begin(out)?;
    for entry in entries {
        let entry = entry?;
        array.push(&entry.key, &entry.value)?;
    }
    debug!(elements = array.len(), "streamed query result");
    array.finish()
}
