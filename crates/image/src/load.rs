//! Load parameters handed to a host disassembler
//!
//! The host owns memory-block creation and instruction decoding; this
//! module only decides whether an image qualifies and where it goes.

use ibex_core::{Address, ImageIdentity, Result};
use tracing::{debug, info};

use crate::classify;
use crate::header::ByteSource;

/// Everything a host needs to map an image for disassembly.
///
/// The image is linked at `image_base`, entered at its first byte, and the
/// mapped region wants read and execute access.
#[derive(Debug, Clone)]
pub struct LoadSpec {
    pub identity: ImageIdentity,
    pub image_base: Address,
    pub image_size: u64,
    pub entry_point: Address,
}

impl LoadSpec {
    /// Build a load spec for `source`, or `None` when the bytes are not a
    /// supported image.
    ///
    /// Only 64-bit images are offered for disassembly; a recognized 32-bit
    /// stage is skipped like any other non-matching binary.
    pub fn find<S: ByteSource + ?Sized>(source: &S) -> Result<Option<Self>> {
        let identity = match classify::identify(source)? {
            Some(identity) => identity,
            None => return Ok(None),
        };

        if !identity.is_64bit() {
            debug!(
                "skipping 32-bit {} image for {}",
                identity.stage, identity.device
            );
            return Ok(None);
        }

        let image_base = identity.base_address;
        info!(
            "{} {} for {} loads at {}",
            identity.stage, identity.version, identity.device, image_base
        );

        Ok(Some(Self {
            image_base,
            image_size: source.len(),
            entry_point: image_base,
            identity,
        }))
    }
}
