//! Parser for Apple iBoot-family firmware images
//!
//! SecureROM, LLB, iBoot and the later stage binaries carry no magic
//! number; identification rests on build strings and a base address stored
//! at fixed offsets near the start of the image. This crate extracts those
//! fields and derives what a disassembler needs to load the image: stage,
//! device, bitness, version and base address.

pub mod classify;
pub mod header;
pub mod load;
pub mod tables;

pub use classify::{identify, VERSION_PREFIX};
pub use header::{ByteSource, RawHeader};
pub use load::LoadSpec;
