//! Field interpretation: stage, device, bitness, version, base address
//!
//! Each accessor is a pure function of the raw header with its own typed
//! failure. Two dependency chains exist (stage -> device -> bitness and
//! version -> base address); a miss early in a chain short-circuits only
//! that chain.

use byteorder::{ByteOrder, LittleEndian};
use ibex_core::{Address, Architecture, Error, ImageIdentity, Result, Stage};
use tracing::debug;

use crate::header::{
    ByteSource, RawHeader, BASE_ADDRESS_OFFSET_NEW, BASE_ADDRESS_OFFSET_OLD, BASE_ADDRESS_SIZE,
};
use crate::tables::DEVICES_32BIT;

/// Version prefix every stage build string carries.
pub const VERSION_PREFIX: &str = "iBoot-";

/// Literal separating the stage name from the device token.
const STAGE_SEPARATOR: &str = " for ";

/// First build number whose images store the base address at 0x300.
const NEW_LAYOUT_VERSION: u32 = 6603;

/// Decode the printable-ASCII prefix of a padded field.
///
/// Fields are NUL/garbage padded to their full window; the logical string
/// ends at the first byte outside 0x20..=0x7E.
fn printable_prefix(field: &[u8]) -> &str {
    let end = field
        .iter()
        .position(|&b| !(0x20..=0x7E).contains(&b))
        .unwrap_or(field.len());
    std::str::from_utf8(&field[..end]).unwrap_or_default()
}

impl RawHeader {
    /// The boot-chain stage this image belongs to.
    ///
    /// A stage matches only when the description starts with the literal
    /// `"<stage> for "`; a stage name appearing later in the text does not
    /// count.
    pub fn stage(&self) -> Result<Stage> {
        let description = printable_prefix(&self.description);
        for stage in Stage::ALL {
            if description
                .strip_prefix(stage.name())
                .is_some_and(|rest| rest.starts_with(STAGE_SEPARATOR))
            {
                return Ok(stage);
            }
        }
        Err(Error::UnrecognizedStage {
            description: description.to_string(),
        })
    }

    /// The device token the image was built for, lowercased.
    ///
    /// SecureROM images carry the SoC name here, later stages the board
    /// name. The token runs up to the first comma of the description.
    pub fn device(&self) -> Result<String> {
        let stage = self.stage()?;
        let description = printable_prefix(&self.description);
        let rest = &description[stage.name().len() + STAGE_SEPARATOR.len()..];
        let (device, _) = rest.split_once(',').ok_or_else(|| Error::MalformedDescription {
            description: description.to_string(),
        })?;
        Ok(device.to_lowercase())
    }

    /// Whether the image targets a 64-bit SoC.
    ///
    /// Known 32-bit devices come from a curated deny-list; anything not
    /// listed, including devices released after the list was written,
    /// counts as 64-bit.
    pub fn is_64bit(&self) -> Result<bool> {
        let device = self.device()?;
        Ok(!DEVICES_32BIT.contains(&device.as_str()))
    }

    /// Architecture implied by the device token.
    pub fn architecture(&self) -> Result<Architecture> {
        Ok(if self.is_64bit()? {
            Architecture::Arm64
        } else {
            Architecture::Arm32
        })
    }

    /// Build string after the "iBoot-" prefix.
    pub fn version(&self) -> Result<String> {
        let text = printable_prefix(&self.version_text);
        match text.strip_prefix(VERSION_PREFIX) {
            Some(version) => Ok(version.to_string()),
            None => Err(Error::MissingVersionPrefix {
                found: text.to_string(),
            }),
        }
    }

    /// Build configuration label, normally "RELEASE".
    pub fn edition(&self) -> String {
        printable_prefix(&self.edition).to_string()
    }

    /// The address the image expects to be loaded at.
    ///
    /// Builds before 6603 store it at file offset 0x318, later builds at
    /// 0x300; the leading build number selects the slot.
    pub fn base_address(&self) -> Result<Address> {
        let version = self.version()?;
        let major = match version.split_once('.') {
            Some((major, _)) => major,
            None => version.as_str(),
        };
        let major: u32 = major.parse().map_err(|_| Error::InvalidVersionNumber {
            text: major.to_string(),
        })?;

        let slot = if major < NEW_LAYOUT_VERSION {
            (BASE_ADDRESS_OFFSET_OLD - BASE_ADDRESS_OFFSET_NEW) as usize
        } else {
            0
        };
        let bytes = &self.base_address_window[slot..slot + BASE_ADDRESS_SIZE];
        Ok(Address::new(LittleEndian::read_u64(bytes)))
    }

    /// Run both classification chains and collect the results.
    pub fn identity(&self) -> Result<ImageIdentity> {
        let stage = self.stage()?;
        let device = self.device()?;
        let architecture = self.architecture()?;
        let version = self.version()?;
        let base_address = self.base_address()?;

        debug!(
            "classified {} {} for {} ({}), base address {}",
            stage, version, device, architecture, base_address
        );

        Ok(ImageIdentity {
            stage,
            device,
            architecture,
            version,
            edition: self.edition(),
            base_address,
        })
    }
}

/// Derive the full identity of an image, or `None` when the bytes are
/// simply not an iBoot-family image.
///
/// The two routine misses (unknown stage prefix, missing version prefix)
/// map to `Ok(None)` so speculative callers can skip non-matching files
/// without noise; genuinely malformed input still surfaces as an error.
pub fn identify<S: ByteSource + ?Sized>(source: &S) -> Result<Option<ImageIdentity>> {
    let header = RawHeader::read(source)?;
    match header.identity() {
        Ok(identity) => Ok(Some(identity)),
        Err(error) if error.is_not_applicable() => Ok(None),
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OLD_BASE: u64 = 0x5FF0_0000;
    const NEW_BASE: u64 = 0x1_8000_0000;

    fn synthetic_image(description: &str, version: &str) -> Vec<u8> {
        let mut data = vec![0u8; 0x400];
        data[0x200..0x200 + description.len()].copy_from_slice(description.as_bytes());
        data[0x240..0x247].copy_from_slice(b"RELEASE");
        data[0x280..0x280 + version.len()].copy_from_slice(version.as_bytes());
        data[0x300..0x308].copy_from_slice(&NEW_BASE.to_le_bytes());
        data[0x318..0x320].copy_from_slice(&OLD_BASE.to_le_bytes());
        data
    }

    fn header(description: &str, version: &str) -> RawHeader {
        RawHeader::read(synthetic_image(description, version).as_slice()).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let header = header("iBoot for n82ap,test", "iBoot-1234");
        assert_eq!(header.stage().unwrap(), Stage::IBoot);
        assert_eq!(header.device().unwrap(), "n82ap");
        assert!(!header.is_64bit().unwrap());
        assert_eq!(header.version().unwrap(), "1234");
        assert_eq!(header.base_address().unwrap().as_u64(), OLD_BASE);
    }

    #[test]
    fn test_securerom_identity() {
        let header = header(
            "SecureROM for t8030si, Copyright 2007-2019, Apple Inc.",
            "iBoot-4479.0.0.100.4",
        );
        let identity = header.identity().unwrap();
        assert_eq!(identity.stage, Stage::SecureRom);
        assert_eq!(identity.device, "t8030si");
        assert_eq!(identity.architecture, Architecture::Arm64);
        assert_eq!(identity.edition, "RELEASE");
        assert_eq!(identity.base_address.as_u64(), OLD_BASE);
    }

    #[test]
    fn test_stage_requires_separator() {
        // "iBootloader" must not satisfy the "iBoot" prefix.
        let header = header("iBootloader for n82ap,test", "iBoot-1234");
        assert!(matches!(
            header.stage(),
            Err(Error::UnrecognizedStage { .. })
        ));
    }

    #[test]
    fn test_longer_stage_names_win() {
        let header = header("iBootStage2 for j274ap,test", "iBoot-7429.41.5");
        assert_eq!(header.stage().unwrap(), Stage::IBootStage2);
    }

    #[test]
    fn test_unrecognized_stage() {
        let header = header("garbage data", "iBoot-6603");
        let err = header.stage().unwrap_err();
        assert!(err.is_not_applicable());

        // The whole stage chain is down, but the version chain still works.
        assert!(header.device().is_err());
        assert!(header.is_64bit().is_err());
        assert_eq!(header.version().unwrap(), "6603");
        assert_eq!(header.base_address().unwrap().as_u64(), NEW_BASE);
    }

    #[test]
    fn test_device_is_lowercased() {
        let header = header("iBoot for N82AP,test", "iBoot-1234");
        assert_eq!(header.device().unwrap(), "n82ap");
        assert!(!header.is_64bit().unwrap());
    }

    #[test]
    fn test_malformed_description() {
        let header = header("iBoot for n82ap", "iBoot-1234");
        let err = header.device().unwrap_err();
        assert!(matches!(err, Error::MalformedDescription { .. }));
        assert!(!err.is_not_applicable());
    }

    #[test]
    fn test_unknown_device_defaults_to_64bit() {
        let header = header("iBoot for d331ap,test", "iBoot-7429.41.5");
        assert!(header.is_64bit().unwrap());
        assert_eq!(header.architecture().unwrap(), Architecture::Arm64);
    }

    #[test]
    fn test_missing_version_prefix() {
        let header = header("iBoot for d331ap,test", "NotBoot-1234");
        assert!(header.version().unwrap_err().is_not_applicable());
        // The base address depends on the version and is equally unavailable.
        assert!(matches!(
            header.base_address(),
            Err(Error::MissingVersionPrefix { .. })
        ));
        // The stage chain is unaffected.
        assert_eq!(header.stage().unwrap(), Stage::IBoot);
    }

    #[test]
    fn test_version_threshold_boundary() {
        let old = header("iBoot for d331ap,test", "iBoot-6602");
        assert_eq!(old.base_address().unwrap().as_u64(), OLD_BASE);

        let new = header("iBoot for d331ap,test", "iBoot-6603");
        assert_eq!(new.base_address().unwrap().as_u64(), NEW_BASE);

        let dotted = header("iBoot for d331ap,test", "iBoot-6603.1");
        assert_eq!(
            dotted.base_address().unwrap(),
            new.base_address().unwrap()
        );
    }

    #[test]
    fn test_invalid_version_number() {
        let header = header("iBoot for d331ap,test", "iBoot-x.y");
        let err = header.base_address().unwrap_err();
        assert!(matches!(err, Error::InvalidVersionNumber { .. }));
        assert!(!err.is_not_applicable());
    }

    #[test]
    fn test_version_stops_at_padding() {
        let mut data = synthetic_image("iBoot for d331ap,test", "iBoot-7429.12");
        // Garbage after the NUL terminator must not leak into the version.
        data[0x28E] = 0xC0;
        data[0x28F] = 0xFE;
        let header = RawHeader::read(data.as_slice()).unwrap();
        assert_eq!(header.version().unwrap(), "7429.12");
    }

    #[test]
    fn test_base_address_is_deterministic() {
        let header = header("iBoot for d331ap,test", "iBoot-7429.41.5");
        assert_eq!(header.base_address().unwrap(), header.base_address().unwrap());
    }

    #[test]
    fn test_identify_gate() {
        let image = synthetic_image("iBEC for d331ap,test", "iBoot-7429.41.5");
        let identity = identify(image.as_slice()).unwrap().unwrap();
        assert_eq!(identity.stage, Stage::IBec);
        assert!(identity.is_64bit());

        // Routine misses are None, not errors.
        let other = synthetic_image("ELF executable", "not a version");
        assert!(identify(other.as_slice()).unwrap().is_none());

        // Truncation is a real error.
        assert!(identify(&image[..0x100]).is_err());

        // A matched stage with a malformed description stays loud.
        let broken = synthetic_image("LLB for n41ap", "iBoot-1234");
        assert!(identify(broken.as_slice()).is_err());
    }
}
