//! Common types used throughout the toolkit

use serde::{Deserialize, Serialize};

/// Represents an address inside an image's address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub u64);

impl Address {
    pub const ZERO: Address = Address(0);

    pub fn new(addr: u64) -> Self {
        Self(addr)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn offset(&self, offset: i64) -> Self {
        Self((self.0 as i64 + offset) as u64)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<u32> for Address {
    fn from(value: u32) -> Self {
        Self(value as u64)
    }
}

/// Named phase of the Apple boot chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    SecureRom,
    Llb,
    IBoot,
    IBec,
    IBss,
    IBootStage1,
    IBootStage2,
    AvpBooter,
}

impl Stage {
    /// Every stage, in the order the classifier tries them
    pub const ALL: [Stage; 8] = [
        Stage::SecureRom,
        Stage::Llb,
        Stage::IBoot,
        Stage::IBec,
        Stage::IBss,
        Stage::IBootStage1,
        Stage::IBootStage2,
        Stage::AvpBooter,
    ];

    /// The stage name exactly as spelled in the image's description field
    pub fn name(&self) -> &'static str {
        match self {
            Stage::SecureRom => "SecureROM",
            Stage::Llb => "LLB",
            Stage::IBoot => "iBoot",
            Stage::IBec => "iBEC",
            Stage::IBss => "iBSS",
            Stage::IBootStage1 => "iBootStage1",
            Stage::IBootStage2 => "iBootStage2",
            Stage::AvpBooter => "AVPBooter",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Architecture type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Architecture {
    Arm32,
    Arm64,
}

impl Architecture {
    pub fn pointer_size(&self) -> usize {
        match self {
            Architecture::Arm32 => 4,
            Architecture::Arm64 => 8,
        }
    }

    pub fn is_64bit(&self) -> bool {
        matches!(self, Architecture::Arm64)
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Architecture::Arm32 => f.write_str("ARM"),
            Architecture::Arm64 => f.write_str("AArch64"),
        }
    }
}

/// Everything the classifier derives from a recognized image header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageIdentity {
    /// Boot-chain stage the binary belongs to
    pub stage: Stage,
    /// Board or SoC token the binary was built for, lowercased
    pub device: String,
    /// Architecture implied by the device token
    pub architecture: Architecture,
    /// Build string after the "iBoot-" prefix
    pub version: String,
    /// Build configuration label, normally "RELEASE"
    pub edition: String,
    /// The address the image expects to be loaded at
    pub base_address: Address,
}

impl ImageIdentity {
    pub fn is_64bit(&self) -> bool {
        self.architecture.is_64bit()
    }
}
