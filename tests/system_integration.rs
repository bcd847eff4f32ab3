//! Cross-module properties from `spec.md` §8 exercised through the public
//! `Bus`/`Cartridge` API rather than any single component's unit tests.

use nescore::bus::Bus;
use nescore::cartridge::Cartridge;

fn nrom_rom(prg_banks: u8, reset_vector: u16) -> Vec<u8> {
    let mut data = vec![0u8; 16 + prg_banks as usize * 0x4000 + 0x2000];
    data[0..4].copy_from_slice(b"NES\x1A");
    data[4] = prg_banks;
    data[5] = 1;
    let bank_start = 16 + (prg_banks as usize - 1) * 0x4000;
    data[bank_start + 0x3FFC] = (reset_vector & 0xFF) as u8;
    data[bank_start + 0x3FFD] = (reset_vector >> 8) as u8;
    data
}

#[test]
fn nrom_16k_prg_aliases_8000_and_c000() {
    let rom = nrom_rom(1, 0x8000);
    let cart = Cartridge::from_bytes(&rom).unwrap();
    let mut bus = Bus::new(cart);
    assert_eq!(bus.cpu.pc, 0x8000);
}

#[test]
fn three_master_clocks_with_no_dma_tick_ppu_three_times() {
    let rom = nrom_rom(1, 0x8000);
    let cart = Cartridge::from_bytes(&rom).unwrap();
    let mut bus = Bus::new(cart);
    let start = bus.ppu.cycle();
    bus.clock();
    bus.clock();
    bus.clock();
    assert_eq!((bus.ppu.cycle() - start).rem_euclid(341), 3);
}

#[test]
fn reset_is_idempotent_across_the_whole_bus() {
    let rom = nrom_rom(1, 0xC123);
    let cart = Cartridge::from_bytes(&rom).unwrap();
    let mut bus = Bus::new(cart);
    bus.reset();
    let pc_after_first = bus.cpu.pc;
    bus.reset();
    assert_eq!(bus.cpu.pc, pc_after_first);
}

#[test]
fn running_a_full_frame_eventually_sets_frame_complete() {
    let rom = nrom_rom(1, 0x8000);
    let cart = Cartridge::from_bytes(&rom).unwrap();
    let mut bus = Bus::new(cart);
    let mut saw_frame = false;
    for _ in 0..(341 * 262 * 2) {
        bus.clock();
        if bus.take_frame_complete() {
            saw_frame = true;
            break;
        }
    }
    assert!(saw_frame);
}

#[test]
fn bad_magic_bytes_are_rejected_end_to_end() {
    let mut rom = nrom_rom(1, 0x8000);
    rom[0] = b'X';
    assert!(Cartridge::from_bytes(&rom).is_err());
}
