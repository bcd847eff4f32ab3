/*!
Cartridge: iNES (v1) loader plus PRG/CHR/PRG-RAM ownership.

Parses the 16-byte header described in `spec.md` §6, allocates the backing
stores, and constructs the concrete [`MapperChip`] for the header's mapper
id. All CPU/PPU address translation in `$6000..=$FFFF` / `$0000..=$1FFF`
funnels through here so the mapper itself never sees PRG-RAM addresses.
*/

use std::fs;
use std::path::Path;

use log::info;

use crate::error::RomError;
use crate::mapper::{Mapper, MapperChip, Mirroring};

const HEADER_LEN: usize = 16;
const PRG_BANK_LEN: usize = 16 * 1024;
const CHR_BANK_LEN: usize = 8 * 1024;
const PRG_RAM_LEN: usize = 8 * 1024;
const TRAINER_LEN: usize = 512;

pub struct Cartridge {
    mapper_id: u16,
    header_mirroring: Mirroring,
    battery: bool,

    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    chr_is_ram: bool,
    prg_ram: Vec<u8>,

    mapper: MapperChip,
}

impl Cartridge {
    /// Parse an iNES v1 image already loaded into memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self, RomError> {
        if data.len() < HEADER_LEN {
            return Err(RomError::Truncated {
                expected: HEADER_LEN,
                actual: data.len(),
            });
        }
        if &data[0..4] != b"NES\x1A" {
            return Err(RomError::BadMagic);
        }

        let prg_chunks = data[4] as usize;
        let chr_chunks = data[5] as usize;
        let flags6 = data[6];
        let flags7 = data[7];

        if flags7 & 0x0C == 0x08 {
            return Err(RomError::Nes20Unsupported);
        }

        let mapper_id = ((flags7 & 0xF0) as u16) | ((flags6 >> 4) as u16);

        let has_trainer = flags6 & 0x04 != 0;
        let four_screen = flags6 & 0x08 != 0;
        let battery = flags6 & 0x02 != 0;
        let header_mirroring = if four_screen {
            Mirroring::FourScreen
        } else if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let mut offset = HEADER_LEN;
        if has_trainer {
            offset += TRAINER_LEN;
        }

        let prg_len = prg_chunks * PRG_BANK_LEN;
        let chr_len = chr_chunks * CHR_BANK_LEN;
        let expected = offset + prg_len + chr_len;
        if data.len() < expected {
            return Err(RomError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let prg_rom = data[offset..offset + prg_len].to_vec();
        offset += prg_len;

        let (chr, chr_is_ram) = if chr_chunks == 0 {
            (vec![0u8; CHR_BANK_LEN], true)
        } else {
            (data[offset..offset + chr_len].to_vec(), false)
        };

        let prg_banks_16k = prg_chunks as u8;
        let mapper = MapperChip::new(mapper_id, prg_banks_16k)
            .ok_or(RomError::UnsupportedMapper(mapper_id))?;

        info!(
            "loaded cartridge: mapper={mapper_id} prg={}x16KiB chr={}x8KiB mirroring={:?} battery={battery}",
            prg_chunks, chr_chunks, header_mirroring
        );

        Ok(Self {
            mapper_id,
            header_mirroring,
            battery,
            prg_rom,
            chr,
            chr_is_ram,
            prg_ram: vec![0u8; PRG_RAM_LEN],
            mapper,
        })
    }

    /// Convenience wrapper around [`Cartridge::from_bytes`] that reads the
    /// file from disk. The only filesystem access this crate performs.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RomError> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Seed battery-backed PRG-RAM from a previously persisted 8 KiB image
    /// (`spec.md` §6 "Persisted state"). No-op for non-battery cartridges.
    pub fn with_saved_ram(mut self, saved: &[u8]) -> Self {
        if self.battery {
            let n = saved.len().min(self.prg_ram.len());
            self.prg_ram[..n].copy_from_slice(&saved[..n]);
        }
        self
    }

    pub fn is_battery_backed(&self) -> bool {
        self.battery
    }

    /// Current PRG-RAM contents, for persistence by the driver. `None` if
    /// this cartridge is not battery-backed.
    pub fn prg_ram(&self) -> Option<&[u8]> {
        self.battery.then_some(self.prg_ram.as_slice())
    }

    pub fn mapper_id(&self) -> u16 {
        self.mapper_id
    }

    pub fn reset(&mut self) {
        self.mapper.reset();
    }

    /// Resolved mirroring: the mapper's dynamic override if it has one,
    /// otherwise the header's static mirroring.
    pub fn mirroring(&self) -> Mirroring {
        self.mapper.mirror().unwrap_or(self.header_mirroring)
    }

    pub fn irq_pending(&self) -> bool {
        self.mapper.irq_pending()
    }

    pub fn irq_clear(&mut self) {
        self.mapper.irq_clear();
    }

    /// CPU read in `$4020..=$FFFF`. Returns `None` for unmapped expansion
    /// addresses (`$4020..=$5FFF`), which the bus treats as open bus.
    pub fn cpu_read(&mut self, addr: u16) -> Option<u8> {
        if (0x6000..=0x7FFF).contains(&addr) {
            Some(self.prg_ram[(addr & 0x1FFF) as usize])
        } else if addr >= 0x8000 {
            self.mapper.cpu_read(&self.prg_rom, addr)
        } else {
            None
        }
    }

    pub fn cpu_write(&mut self, addr: u16, value: u8) {
        if (0x6000..=0x7FFF).contains(&addr) {
            self.prg_ram[(addr & 0x1FFF) as usize] = value;
        } else if addr >= 0x8000 {
            self.mapper.cpu_write(addr, value);
        }
    }

    pub fn ppu_read(&mut self, addr: u16) -> u8 {
        self.mapper.notify_ppu_address(addr);
        self.mapper.ppu_read(&self.chr, addr)
    }

    pub fn ppu_write(&mut self, addr: u16, value: u8) {
        self.mapper.notify_ppu_address(addr);
        self.mapper.ppu_write(&mut self.chr, self.chr_is_ram, addr, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_nrom_image(prg_banks: u8, chr_banks: u8, mirror_vertical: bool) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data[0..4].copy_from_slice(b"NES\x1A");
        data[4] = prg_banks;
        data[5] = chr_banks;
        data[6] = if mirror_vertical { 0x01 } else { 0x00 };
        data.extend(vec![0u8; prg_banks as usize * PRG_BANK_LEN]);
        data.extend(vec![0u8; chr_banks as usize * CHR_BANK_LEN]);
        data
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = build_nrom_image(1, 1, false);
        data[0] = b'X';
        assert!(matches!(Cartridge::from_bytes(&data), Err(RomError::BadMagic)));
    }

    #[test]
    fn rejects_truncated_file() {
        let data = build_nrom_image(2, 1, false);
        let truncated = &data[..data.len() - 10];
        assert!(matches!(
            Cartridge::from_bytes(truncated),
            Err(RomError::Truncated { .. })
        ));
    }

    #[test]
    fn reads_reset_vector_and_mirrors_16k_prg() {
        let mut data = build_nrom_image(1, 1, false);
        let prg_start = HEADER_LEN;
        data[prg_start + 0x3FFC] = 0x00;
        data[prg_start + 0x3FFD] = 0xC0;
        let mut cart = Cartridge::from_bytes(&data).unwrap();
        assert_eq!(cart.cpu_read(0xFFFC), Some(0x00));
        assert_eq!(cart.cpu_read(0xFFFD), Some(0xC0));
        // $C000 and $8000 both read from the same (only) 16 KiB bank.
        assert_eq!(cart.cpu_read(0xC000), cart.cpu_read(0x8000));
    }

    #[test]
    fn chr_ram_is_allocated_when_header_declares_zero_chr_banks() {
        let data = build_nrom_image(1, 0, false);
        let mut cart = Cartridge::from_bytes(&data).unwrap();
        cart.ppu_write(0x0000, 0xAB);
        assert_eq!(cart.ppu_read(0x0000), 0xAB);
    }

    #[test]
    fn unsupported_mapper_is_rejected() {
        let mut data = build_nrom_image(1, 1, false);
        data[6] |= 0xF0; // mapper low nibble -> 0xF
        assert!(matches!(
            Cartridge::from_bytes(&data),
            Err(RomError::UnsupportedMapper(_))
        ));
    }

    #[test]
    fn prg_ram_round_trips_through_cpu_interface() {
        let data = build_nrom_image(1, 1, false);
        let mut cart = Cartridge::from_bytes(&data).unwrap();
        cart.cpu_write(0x6000, 0x42);
        assert_eq!(cart.cpu_read(0x6000), Some(0x42));
    }
}
