//! Construction-time failure modes.
//!
//! Nothing in the hot emulation path fails at runtime (see `spec.md` §7):
//! every bus address decodes to *something*, every opcode has a dispatch
//! entry, and interrupts are either serviced or silently ignored. The only
//! place a [`RomError`] can surface is cartridge construction.

use thiserror::Error;

/// Failure building a [`crate::cartridge::Cartridge`] from an iNES image.
#[derive(Debug, Error)]
pub enum RomError {
    /// The first four bytes were not `NES\x1A`.
    #[error("bad iNES magic bytes")]
    BadMagic,

    /// The file ended before the header promised enough PRG/CHR data.
    #[error("truncated iNES file: expected at least {expected} bytes, got {actual}")]
    Truncated {
        /// Minimum byte count the header's PRG/CHR/trainer fields imply.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// iNES 2.0 images are detected but not parsed (no iNES 2.0 fields used).
    #[error("NES 2.0 headers are not supported")]
    Nes20Unsupported,

    /// The mapper id is outside the 0-4 range this core implements.
    #[error("unsupported mapper id {0} (only mappers 0-4 are implemented)")]
    UnsupportedMapper(u16),

    /// Only reachable from [`crate::cartridge::Cartridge::from_file`].
    #[error("failed to read ROM file: {0}")]
    Io(#[from] std::io::Error),
}
