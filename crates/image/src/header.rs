//! Fixed-offset header extraction
//!
//! The header layout is undocumented and version dependent. Four windows
//! matter: three 0x40-byte ASCII fields and a base-address area whose
//! location moved between builds, so both candidate slots are captured in
//! one window.

use ibex_core::{Error, Result};
use tracing::trace;

/// Offset of the description field ("<stage> for <device>,...").
pub const DESCRIPTION_OFFSET: u64 = 0x200;
/// Offset of the edition field ("RELEASE", "DEVELOPMENT", ...).
pub const EDITION_OFFSET: u64 = 0x240;
/// Offset of the version field ("iBoot-<digits>...").
pub const VERSION_OFFSET: u64 = 0x280;
/// Each ASCII field occupies a 0x40-byte window, NUL/garbage padded.
pub const FIELD_SIZE: usize = 0x40;

/// Base-address slot in images with build number >= 6603.
pub const BASE_ADDRESS_OFFSET_NEW: u64 = 0x300;
/// Base-address slot in older images.
pub const BASE_ADDRESS_OFFSET_OLD: u64 = 0x318;
/// The base address is an 8-byte little-endian integer.
pub const BASE_ADDRESS_SIZE: usize = 8;

/// Single window covering both base-address slots, so the source is read
/// exactly once per field.
pub(crate) const BASE_ADDRESS_WINDOW: usize =
    (BASE_ADDRESS_OFFSET_OLD - BASE_ADDRESS_OFFSET_NEW) as usize + BASE_ADDRESS_SIZE;

/// Read-only byte access over an offset+length range.
///
/// The parser needs nothing past the first 0x320 bytes of an image; a
/// plain byte slice satisfies this.
pub trait ByteSource {
    /// Total number of bytes the source can serve.
    fn len(&self) -> u64;

    /// Fill `buf` with the bytes starting at `offset`.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()>;
}

impl ByteSource for [u8] {
    fn len(&self) -> u64 {
        <[u8]>::len(self) as u64
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let available = <[u8]>::len(self) as u64;
        let end = offset + buf.len() as u64;
        if end > available {
            return Err(Error::truncated(offset, buf.len(), available));
        }
        buf.copy_from_slice(&self[offset as usize..end as usize]);
        Ok(())
    }
}

/// The four fixed-offset header fields, copied out of a source image.
///
/// Construction copies each window once; nothing aliases the source
/// afterwards and no field changes after construction. Interpreting the
/// bytes is the classifier's job.
#[derive(Debug, Clone)]
pub struct RawHeader {
    pub(crate) description: [u8; FIELD_SIZE],
    pub(crate) edition: [u8; FIELD_SIZE],
    pub(crate) version_text: [u8; FIELD_SIZE],
    pub(crate) base_address_window: [u8; BASE_ADDRESS_WINDOW],
}

impl RawHeader {
    /// Extract the header fields from `source`.
    ///
    /// Fails with [`Error::TruncatedInput`] when the source cannot cover
    /// the base-address window ending at 0x320.
    pub fn read<S: ByteSource + ?Sized>(source: &S) -> Result<Self> {
        let mut description = [0u8; FIELD_SIZE];
        source.read_at(DESCRIPTION_OFFSET, &mut description)?;

        let mut edition = [0u8; FIELD_SIZE];
        source.read_at(EDITION_OFFSET, &mut edition)?;

        let mut version_text = [0u8; FIELD_SIZE];
        source.read_at(VERSION_OFFSET, &mut version_text)?;

        let mut base_address_window = [0u8; BASE_ADDRESS_WINDOW];
        source.read_at(BASE_ADDRESS_OFFSET_NEW, &mut base_address_window)?;

        trace!("read header windows from {} byte source", source.len());

        Ok(Self {
            description,
            edition,
            version_text,
            base_address_window,
        })
    }
}
