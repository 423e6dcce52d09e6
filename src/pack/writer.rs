//! Aggregate file emission
//!
//! Layout of the produced file:
//!
//! ```text
//! <declared count>
//!  <label>
//!  <C> <n> <placeholder>
//! <payload bytes>
//! ...
//! ```

use crate::pack::instance::InstanceHeader;
use std::io::{self, Write};

/// Third header field written when nothing else is configured.
pub const DEFAULT_PLACEHOLDER: i64 = 0;

pub struct BundleWriter<W: Write> {
    inner: W,
    placeholder: i64,
    bytes_written: u64,
}

impl<W: Write> BundleWriter<W> {
    pub fn new(inner: W, placeholder: i64) -> Self {
        Self {
            inner,
            placeholder,
            bytes_written: 0,
        }
    }

    pub fn write_count(&mut self, count: i64) -> io::Result<()> {
        self.emit(format!("{count}\n").as_bytes())
    }

    pub fn write_label(&mut self, label: &str) -> io::Result<()> {
        self.emit(format!(" {label} \n").as_bytes())
    }

    /// Header fields go out as `C n placeholder`, the reverse of read order.
    pub fn write_header(&mut self, header: &InstanceHeader) -> io::Result<()> {
        let line = format!(" {} {} {} \n", header.c, header.n, self.placeholder);
        self.emit(line.as_bytes())
    }

    pub fn write_payload(&mut self, payload: &[u8]) -> io::Result<()> {
        self.emit(payload)
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn emit(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }
}
