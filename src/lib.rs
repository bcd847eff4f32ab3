/*!
Cycle-accurate NES emulation core: the 6502 CPU, the 2C02 PPU, the
cartridge/mapper layer (mappers 0-4), and the system bus that ties them
together with the real 3:1 PPU/CPU clock ratio and OAM DMA.

Audio, windowing/input polling beyond the raw controller shift register,
save-state serialization, and disassembly/debug UIs are out of scope —
narrow interfaces ([`apu::ApuStub`], [`controller::ShiftRegister`]) stand in
for the collaborators that would own those concerns.

Modules:
- `error`: construction-time failure modes ([`error::RomError`]).
- `mapper`: the `Mapper` trait and the five bank-switching variants.
- `cartridge`: iNES loader; owns PRG/CHR/PRG-RAM and the mapper.
- `cpu`: the 6502 interpreter.
- `ppu`: the 2C02 rendering pipeline.
- `controller`: the NES controller shift register.
- `apu`: a narrow open-bus stand-in for the (out of scope) APU.
- `bus`: the tick driver that wires all of the above together.
*/

pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod error;
pub mod mapper;
pub mod ppu;

pub use bus::Bus;
pub use cartridge::Cartridge;
pub use cpu::Cpu;
pub use error::RomError;
pub use ppu::Ppu;
