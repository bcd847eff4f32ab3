/*!
Mapper subsystem: the bank-switching logic that sits between the CPU/PPU
address space and a cartridge's PRG/CHR banks.

Each variant (NROM/MMC1/UxROM/CNROM/MMC3) owns only its own bank-select
registers; the actual PRG ROM, CHR, and PRG-RAM bytes are owned by
[`crate::cartridge::Cartridge`] and passed in by reference on every call, so
a mapper never copies cartridge data and the [`MapperChip`] enum can hold
any variant by value with no heap indirection (see `DESIGN.md`).
*/

mod cnrom;
mod mmc1;
mod mmc3;
mod nrom;
mod uxrom;

pub use cnrom::Cnrom;
pub use mmc1::Mmc1;
pub use mmc3::Mmc3;
pub use nrom::Nrom;
pub use uxrom::UxRom;

/// Nametable mirroring mode, as reported by a mapper or the iNES header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    OneScreenLo,
    OneScreenHi,
    FourScreen,
}

/// Capability set every mapper variant implements.
///
/// `prg_rom`/`prg_ram`/`chr` are always the cartridge's full backing stores;
/// implementations index into them with their own bank-select state. CHR
/// methods also receive whether the cartridge's CHR store is RAM (writes to
/// CHR ROM are silently ignored everywhere except mapper 0 with zero CHR
/// banks, per `spec.md` §4.1).
pub trait Mapper {
    /// CPU-visible read of PRG ROM, `addr` in `$8000..=$FFFF`.
    ///
    /// `$6000..=$7FFF` PRG-RAM is handled generically by
    /// [`crate::cartridge::Cartridge`] before reaching the mapper.
    fn cpu_read(&mut self, prg_rom: &[u8], addr: u16) -> Option<u8>;

    /// CPU-visible write, `addr` in `$8000..=$FFFF`: always a bank-select
    /// register write, never a PRG ROM mutation.
    fn cpu_write(&mut self, addr: u16, value: u8);

    /// PPU-visible read in `$0000..=$1FFF` (pattern tables / CHR).
    fn ppu_read(&mut self, chr: &[u8], addr: u16) -> u8;

    /// PPU-visible write in `$0000..=$1FFF`; only effective when CHR is RAM.
    fn ppu_write(&mut self, chr: &mut [u8], chr_is_ram: bool, addr: u16, value: u8);

    /// Mapper-controlled mirroring override, if any. `None` means the
    /// cartridge's header-derived mirroring applies unchanged.
    fn mirror(&self) -> Option<Mirroring> {
        None
    }

    /// Reinitialise mapper-internal registers (not PRG-RAM/CHR-RAM contents).
    fn reset(&mut self) {}

    /// Whether the mapper is currently asserting its IRQ line.
    fn irq_pending(&self) -> bool {
        false
    }

    /// Acknowledge/clear the mapper's IRQ line (CPU services it via `$E000`-style writes).
    fn irq_clear(&mut self) {}

    /// Notify the mapper of a PPU CHR-space memory access, for mappers (MMC3)
    /// that derive their scanline IRQ counter from the PPU address bus's A12
    /// line rather than an explicit scanline callback.
    fn notify_ppu_address(&mut self, _addr: u16) {}
}

/// Tagged union over the mapper variants this core implements (mappers 0-4).
///
/// Held by value in [`crate::cartridge::Cartridge`] — no `Box<dyn Mapper>`.
pub enum MapperChip {
    Nrom(Nrom),
    Mmc1(Mmc1),
    UxRom(UxRom),
    Cnrom(Cnrom),
    Mmc3(Mmc3),
}

impl MapperChip {
    /// `prg_banks` is the iNES header's count of 16 KiB PRG ROM chunks.
    /// CHR bank counts are never needed here — CHR sizing and RAM-vs-ROM
    /// status are [`crate::cartridge::Cartridge`]'s concern, and every
    /// mapper variant derives its CHR bank count from the slice it's
    /// handed on each access instead.
    pub fn new(mapper_id: u16, prg_banks: u8) -> Option<Self> {
        match mapper_id {
            0 => Some(Self::Nrom(Nrom::new(prg_banks))),
            1 => Some(Self::Mmc1(Mmc1::new(prg_banks))),
            2 => Some(Self::UxRom(UxRom::new(prg_banks))),
            3 => Some(Self::Cnrom(Cnrom::new())),
            4 => Some(Self::Mmc3(Mmc3::new(prg_banks))),
            _ => None,
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        match $self {
            MapperChip::Nrom(m) => m.$method($($arg),*),
            MapperChip::Mmc1(m) => m.$method($($arg),*),
            MapperChip::UxRom(m) => m.$method($($arg),*),
            MapperChip::Cnrom(m) => m.$method($($arg),*),
            MapperChip::Mmc3(m) => m.$method($($arg),*),
        }
    };
}

impl Mapper for MapperChip {
    fn cpu_read(&mut self, prg_rom: &[u8], addr: u16) -> Option<u8> {
        dispatch!(self, cpu_read, prg_rom, addr)
    }

    fn cpu_write(&mut self, addr: u16, value: u8) {
        dispatch!(self, cpu_write, addr, value)
    }

    fn ppu_read(&mut self, chr: &[u8], addr: u16) -> u8 {
        dispatch!(self, ppu_read, chr, addr)
    }

    fn ppu_write(&mut self, chr: &mut [u8], chr_is_ram: bool, addr: u16, value: u8) {
        dispatch!(self, ppu_write, chr, chr_is_ram, addr, value)
    }

    fn mirror(&self) -> Option<Mirroring> {
        dispatch!(self, mirror)
    }

    fn reset(&mut self) {
        dispatch!(self, reset)
    }

    fn irq_pending(&self) -> bool {
        dispatch!(self, irq_pending)
    }

    fn irq_clear(&mut self) {
        dispatch!(self, irq_clear)
    }

    fn notify_ppu_address(&mut self, addr: u16) {
        dispatch!(self, notify_ppu_address, addr)
    }
}
