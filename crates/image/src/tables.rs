//! Static reference data
//!
//! Curated from device release history and SoC identifiers. New devices
//! are assumed 64-bit, so only the 32-bit list needs maintenance.

/// Board and SoC codes of 32-bit devices.
///
/// Exact-match deny-list consulted by the bitness check. Entries are kept
/// lowercase; the device accessor lowercases before comparison.
pub const DEVICES_32BIT: &[&str] = &[
    // iPhone boards
    "m68ap",  // iPhone1,1
    "n82ap",  // iPhone1,2
    "n88ap",  // iPhone2,1
    "n90ap",  // iPhone3,1
    "n90bap", // iPhone3,2
    "n92ap",  // iPhone3,3
    "n94ap",  // iPhone4,1
    "n41ap",  // iPhone5,1
    "n42ap",  // iPhone5,2
    "n48ap",  // iPhone5,3
    "n49ap",  // iPhone5,4
    // iPod touch boards
    "n45ap",  // iPod1,1
    "n72ap",  // iPod2,1
    "n18ap",  // iPod3,1
    "n81ap",  // iPod4,1
    "n78ap",  // iPod5,1
    "n78aap", // iPod5,1
    // iPad boards
    "k48ap",  // iPad1,1
    "k93ap",  // iPad2,1
    "k94ap",  // iPad2,2
    "k95ap",  // iPad2,3
    "k93aap", // iPad2,4
    "p105ap", // iPad2,5
    "p106ap", // iPad2,6
    "p107ap", // iPad2,7
    "j1ap",   // iPad3,1
    "j2ap",   // iPad3,2
    "j2aap",  // iPad3,3
    "p101ap", // iPad3,4
    "p102ap", // iPad3,5
    "p103ap", // iPad3,6
    // Apple TV boards
    "k66ap",  // AppleTV2,1
    "j33ap",  // AppleTV3,1
    "j33iap", // AppleTV3,2
    // SoC names, as SecureROM images carry those instead of a board
    "s5l8900xsi",
    "s5l8720xsi",
    "s5l8920xsi",
    "s5l8922xsi",
    "s5l8930xsi", // A4
    "s5l8940xsi", // A5
    "s5l8942xsi", // A5 rev
    "s5l8945xsi", // A5X
    "s5l8947xsi", // A5 single-core
    "s5l8950xsi", // A6
    "s5l8955xsi", // A6X
];
