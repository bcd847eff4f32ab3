//! The 256-entry opcode dispatch table and each instruction's `operate`
//! function. Split out from `mod.rs` per the Design Notes: "represent as a
//! constant array of {operate, addrmode, base_cycles, mnemonic} tuples."

use super::{Cpu, CpuBus, BREAK, CARRY, NEGATIVE, OVERFLOW, UNUSED, ZERO};

type AddrModeFn = fn(&mut Cpu, &mut dyn CpuBus) -> u8;
type OperateFn = fn(&mut Cpu, &mut dyn CpuBus) -> u8;

pub struct Instruction {
    pub mnemonic: &'static str,
    pub addr_mode: AddrModeFn,
    pub operate: OperateFn,
    pub cycles: u8,
}

macro_rules! instr {
    ($mnemonic:literal, $operate:ident, $addr_mode:ident, $cycles:literal) => {
        Instruction {
            mnemonic: $mnemonic,
            addr_mode: Cpu::$addr_mode,
            operate: Cpu::$operate,
            cycles: $cycles,
        }
    };
}

impl Cpu {
    // ---- loads / stores -----------------------------------------------

    fn lda(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        self.a = v;
        self.update_zn(self.a);
        1
    }

    fn ldx(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        self.x = v;
        self.update_zn(self.x);
        1
    }

    fn ldy(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        self.y = v;
        self.update_zn(self.y);
        1
    }

    fn sta(&mut self, bus: &mut dyn CpuBus) -> u8 {
        bus.cpu_write(self.addr_abs, self.a);
        0
    }

    fn stx(&mut self, bus: &mut dyn CpuBus) -> u8 {
        bus.cpu_write(self.addr_abs, self.x);
        0
    }

    fn sty(&mut self, bus: &mut dyn CpuBus) -> u8 {
        bus.cpu_write(self.addr_abs, self.y);
        0
    }

    fn tax(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.x = self.a;
        self.update_zn(self.x);
        0
    }

    fn tay(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.y = self.a;
        self.update_zn(self.y);
        0
    }

    fn txa(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.a = self.x;
        self.update_zn(self.a);
        0
    }

    fn tya(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.a = self.y;
        self.update_zn(self.a);
        0
    }

    fn tsx(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.x = self.sp;
        self.update_zn(self.x);
        0
    }

    fn txs(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.sp = self.x;
        0
    }

    // ---- stack -----------------------------------------------------------

    fn pha(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let a = self.a;
        self.push(bus, a);
        0
    }

    fn pla(&mut self, bus: &mut dyn CpuBus) -> u8 {
        self.a = self.pop(bus);
        self.update_zn(self.a);
        0
    }

    fn php(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let p = self.p | BREAK | UNUSED;
        self.push(bus, p);
        0
    }

    fn plp(&mut self, bus: &mut dyn CpuBus) -> u8 {
        self.p = self.pop(bus);
        self.p |= UNUSED;
        self.p &= !BREAK;
        0
    }

    // ---- logical -----------------------------------------------------------

    fn and(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        self.a &= v;
        self.update_zn(self.a);
        1
    }

    fn ora(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        self.a |= v;
        self.update_zn(self.a);
        1
    }

    fn eor(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        self.a ^= v;
        self.update_zn(self.a);
        1
    }

    fn bit(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        let result = self.a & v;
        self.set_flag(ZERO, result == 0);
        self.set_flag(NEGATIVE, v & 0x80 != 0);
        self.set_flag(OVERFLOW, v & 0x40 != 0);
        0
    }

    // ---- arithmetic -----------------------------------------------------------

    fn add_with_carry(&mut self, operand: u8) {
        let carry_in = self.get_flag(CARRY) as u16;
        let sum = self.a as u16 + operand as u16 + carry_in;
        let result = (sum & 0xFF) as u8;
        self.set_flag(CARRY, sum > 0xFF);
        let overflow = (!(self.a ^ operand) & (self.a ^ result)) & 0x80 != 0;
        self.set_flag(OVERFLOW, overflow);
        self.a = result;
        self.update_zn(self.a);
    }

    fn adc(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        self.add_with_carry(v);
        1
    }

    /// `SBC(M)` == `ADC(M ^ $FF)` (`spec.md` §4.2/§8 SBC law).
    fn sbc(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        self.add_with_carry(v ^ 0xFF);
        1
    }

    fn compare(&mut self, register: u8, operand: u8) {
        let result = register.wrapping_sub(operand);
        self.set_flag(CARRY, register >= operand);
        self.set_flag(ZERO, register == operand);
        self.set_flag(NEGATIVE, result & 0x80 != 0);
    }

    fn cmp(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        self.compare(self.a, v);
        1
    }

    fn cpx(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        self.compare(self.x, v);
        0
    }

    fn cpy(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        self.compare(self.y, v);
        0
    }

    // ---- increments / decrements -------------------------------------------

    fn inc(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus).wrapping_add(1);
        bus.cpu_write(self.addr_abs, v);
        self.update_zn(v);
        0
    }

    fn inx(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.x = self.x.wrapping_add(1);
        self.update_zn(self.x);
        0
    }

    fn iny(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.y = self.y.wrapping_add(1);
        self.update_zn(self.y);
        0
    }

    fn dec(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus).wrapping_sub(1);
        bus.cpu_write(self.addr_abs, v);
        self.update_zn(v);
        0
    }

    fn dex(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.x = self.x.wrapping_sub(1);
        self.update_zn(self.x);
        0
    }

    fn dey(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.y = self.y.wrapping_sub(1);
        self.update_zn(self.y);
        0
    }

    // ---- shifts / rotates ---------------------------------------------------

    fn asl(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        self.set_flag(CARRY, v & 0x80 != 0);
        let result = v << 1;
        self.update_zn(result);
        if self.implied {
            self.a = result;
        } else {
            bus.cpu_write(self.addr_abs, result);
        }
        0
    }

    fn lsr(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        self.set_flag(CARRY, v & 0x01 != 0);
        let result = v >> 1;
        self.update_zn(result);
        if self.implied {
            self.a = result;
        } else {
            bus.cpu_write(self.addr_abs, result);
        }
        0
    }

    fn rol(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        let carry_in = self.get_flag(CARRY) as u8;
        self.set_flag(CARRY, v & 0x80 != 0);
        let result = (v << 1) | carry_in;
        self.update_zn(result);
        if self.implied {
            self.a = result;
        } else {
            bus.cpu_write(self.addr_abs, result);
        }
        0
    }

    fn ror(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let v = self.fetch(bus);
        let carry_in = self.get_flag(CARRY) as u8;
        self.set_flag(CARRY, v & 0x01 != 0);
        let result = (v >> 1) | (carry_in << 7);
        self.update_zn(result);
        if self.implied {
            self.a = result;
        } else {
            bus.cpu_write(self.addr_abs, result);
        }
        0
    }

    // ---- control flow ---------------------------------------------------

    fn jmp(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.pc = self.addr_abs;
        0
    }

    fn jsr(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let return_to = self.pc.wrapping_sub(1);
        self.push(bus, (return_to >> 8) as u8);
        self.push(bus, (return_to & 0xFF) as u8);
        self.pc = self.addr_abs;
        0
    }

    fn rts(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let lo = self.pop(bus) as u16;
        let hi = self.pop(bus) as u16;
        self.pc = ((hi << 8) | lo).wrapping_add(1);
        0
    }

    fn rti(&mut self, bus: &mut dyn CpuBus) -> u8 {
        self.p = self.pop(bus);
        self.p |= UNUSED;
        self.p &= !BREAK;
        let lo = self.pop(bus) as u16;
        let hi = self.pop(bus) as u16;
        self.pc = (hi << 8) | lo;
        0
    }

    fn brk(&mut self, bus: &mut dyn CpuBus) -> u8 {
        self.pc = self.pc.wrapping_add(1);
        let pc = self.pc;
        self.push(bus, (pc >> 8) as u8);
        self.push(bus, (pc & 0xFF) as u8);
        let p = self.p | BREAK | UNUSED;
        self.push(bus, p);
        self.set_flag(super::IRQ_DISABLE, true);
        let lo = bus.cpu_read(0xFFFE) as u16;
        let hi = bus.cpu_read(0xFFFF) as u16;
        self.pc = (hi << 8) | lo;
        0
    }

    fn branch_if(&mut self, taken: bool) -> u8 {
        if !taken {
            return 0;
        }
        self.cycles_remaining += 1;
        let target = self.pc.wrapping_add(self.addr_rel);
        if target & 0xFF00 != self.pc & 0xFF00 {
            self.cycles_remaining += 1;
        }
        self.pc = target;
        0
    }

    fn bcc(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        let taken = !self.get_flag(CARRY);
        self.branch_if(taken)
    }

    fn bcs(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        let taken = self.get_flag(CARRY);
        self.branch_if(taken)
    }

    fn beq(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        let taken = self.get_flag(ZERO);
        self.branch_if(taken)
    }

    fn bne(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        let taken = !self.get_flag(ZERO);
        self.branch_if(taken)
    }

    fn bmi(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        let taken = self.get_flag(NEGATIVE);
        self.branch_if(taken)
    }

    fn bpl(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        let taken = !self.get_flag(NEGATIVE);
        self.branch_if(taken)
    }

    fn bvc(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        let taken = !self.get_flag(OVERFLOW);
        self.branch_if(taken)
    }

    fn bvs(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        let taken = self.get_flag(OVERFLOW);
        self.branch_if(taken)
    }

    // ---- flag instructions ---------------------------------------------------

    fn clc(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.set_flag(CARRY, false);
        0
    }

    fn cld(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.set_flag(super::DECIMAL, false);
        0
    }

    fn cli(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.set_flag(super::IRQ_DISABLE, false);
        0
    }

    fn clv(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.set_flag(OVERFLOW, false);
        0
    }

    fn sec(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.set_flag(CARRY, true);
        0
    }

    fn sed(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.set_flag(super::DECIMAL, true);
        0
    }

    fn sei(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        self.set_flag(super::IRQ_DISABLE, true);
        0
    }

    // ---- no-ops / illegal opcodes -----------------------------------------

    fn nop(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        0
    }

    /// Catch-all for undocumented opcodes: consumes its table-assigned
    /// cycle count and otherwise does nothing (`spec.md` §4.2).
    fn xxx(&mut self, _bus: &mut dyn CpuBus) -> u8 {
        0
    }
}

#[rustfmt::skip]
pub static OPCODES: [Instruction; 256] = [
    instr!("BRK",brk,imp,7), instr!("ORA",ora,izx,6), instr!("???",xxx,imp,2), instr!("???",xxx,imp,8),
    instr!("???",nop,zp0,3), instr!("ORA",ora,zp0,3), instr!("ASL",asl,zp0,5), instr!("???",xxx,imp,5),
    instr!("PHP",php,imp,3), instr!("ORA",ora,imm,2), instr!("ASL",asl,imp,2), instr!("???",xxx,imp,2),
    instr!("???",nop,abs,4), instr!("ORA",ora,abs,4), instr!("ASL",asl,abs,6), instr!("???",xxx,imp,6),

    instr!("BPL",bpl,rel,2), instr!("ORA",ora,izy,5), instr!("???",xxx,imp,2), instr!("???",xxx,imp,8),
    instr!("???",nop,zpx,4), instr!("ORA",ora,zpx,4), instr!("ASL",asl,zpx,6), instr!("???",xxx,imp,6),
    instr!("CLC",clc,imp,2), instr!("ORA",ora,aby,4), instr!("???",nop,imp,2), instr!("???",xxx,imp,7),
    instr!("???",nop,abx,4), instr!("ORA",ora,abx,4), instr!("ASL",asl,abx,7), instr!("???",xxx,imp,7),

    instr!("JSR",jsr,abs,6), instr!("AND",and,izx,6), instr!("???",xxx,imp,2), instr!("???",xxx,imp,8),
    instr!("BIT",bit,zp0,3), instr!("AND",and,zp0,3), instr!("ROL",rol,zp0,5), instr!("???",xxx,imp,5),
    instr!("PLP",plp,imp,4), instr!("AND",and,imm,2), instr!("ROL",rol,imp,2), instr!("???",xxx,imp,2),
    instr!("BIT",bit,abs,4), instr!("AND",and,abs,4), instr!("ROL",rol,abs,6), instr!("???",xxx,imp,6),

    instr!("BMI",bmi,rel,2), instr!("AND",and,izy,5), instr!("???",xxx,imp,2), instr!("???",xxx,imp,8),
    instr!("???",nop,zpx,4), instr!("AND",and,zpx,4), instr!("ROL",rol,zpx,6), instr!("???",xxx,imp,6),
    instr!("SEC",sec,imp,2), instr!("AND",and,aby,4), instr!("???",nop,imp,2), instr!("???",xxx,imp,7),
    instr!("???",nop,abx,4), instr!("AND",and,abx,4), instr!("ROL",rol,abx,7), instr!("???",xxx,imp,7),

    instr!("RTI",rti,imp,6), instr!("EOR",eor,izx,6), instr!("???",xxx,imp,2), instr!("???",xxx,imp,8),
    instr!("???",nop,zp0,3), instr!("EOR",eor,zp0,3), instr!("LSR",lsr,zp0,5), instr!("???",xxx,imp,5),
    instr!("PHA",pha,imp,3), instr!("EOR",eor,imm,2), instr!("LSR",lsr,imp,2), instr!("???",xxx,imp,2),
    instr!("JMP",jmp,abs,3), instr!("EOR",eor,abs,4), instr!("LSR",lsr,abs,6), instr!("???",xxx,imp,6),

    instr!("BVC",bvc,rel,2), instr!("EOR",eor,izy,5), instr!("???",xxx,imp,2), instr!("???",xxx,imp,8),
    instr!("???",nop,zpx,4), instr!("EOR",eor,zpx,4), instr!("LSR",lsr,zpx,6), instr!("???",xxx,imp,6),
    instr!("CLI",cli,imp,2), instr!("EOR",eor,aby,4), instr!("???",nop,imp,2), instr!("???",xxx,imp,7),
    instr!("???",nop,abx,4), instr!("EOR",eor,abx,4), instr!("LSR",lsr,abx,7), instr!("???",xxx,imp,7),

    instr!("RTS",rts,imp,6), instr!("ADC",adc,izx,6), instr!("???",xxx,imp,2), instr!("???",xxx,imp,8),
    instr!("???",nop,zp0,3), instr!("ADC",adc,zp0,3), instr!("ROR",ror,zp0,5), instr!("???",xxx,imp,5),
    instr!("PLA",pla,imp,4), instr!("ADC",adc,imm,2), instr!("ROR",ror,imp,2), instr!("???",xxx,imp,2),
    instr!("JMP",jmp,ind,5), instr!("ADC",adc,abs,4), instr!("ROR",ror,abs,6), instr!("???",xxx,imp,6),

    instr!("BVS",bvs,rel,2), instr!("ADC",adc,izy,5), instr!("???",xxx,imp,2), instr!("???",xxx,imp,8),
    instr!("???",nop,zpx,4), instr!("ADC",adc,zpx,4), instr!("ROR",ror,zpx,6), instr!("???",xxx,imp,6),
    instr!("SEI",sei,imp,2), instr!("ADC",adc,aby,4), instr!("???",nop,imp,2), instr!("???",xxx,imp,7),
    instr!("???",nop,abx,4), instr!("ADC",adc,abx,4), instr!("ROR",ror,abx,7), instr!("???",xxx,imp,7),

    instr!("???",nop,imm,2), instr!("STA",sta,izx,6), instr!("???",nop,imm,2), instr!("???",xxx,imp,6),
    instr!("STY",sty,zp0,3), instr!("STA",sta,zp0,3), instr!("STX",stx,zp0,3), instr!("???",xxx,imp,3),
    instr!("DEY",dey,imp,2), instr!("???",nop,imm,2), instr!("TXA",txa,imp,2), instr!("???",xxx,imp,2),
    instr!("STY",sty,abs,4), instr!("STA",sta,abs,4), instr!("STX",stx,abs,4), instr!("???",xxx,imp,4),

    instr!("BCC",bcc,rel,2), instr!("STA",sta,izy,6), instr!("???",xxx,imp,2), instr!("???",xxx,imp,6),
    instr!("STY",sty,zpx,4), instr!("STA",sta,zpx,4), instr!("STX",stx,zpy,4), instr!("???",xxx,imp,4),
    instr!("TYA",tya,imp,2), instr!("STA",sta,aby,5), instr!("TXS",txs,imp,2), instr!("???",xxx,imp,5),
    instr!("???",nop,abx,5), instr!("STA",sta,abx,5), instr!("???",xxx,imp,5), instr!("???",xxx,imp,5),

    instr!("LDY",ldy,imm,2), instr!("LDA",lda,izx,6), instr!("LDX",ldx,imm,2), instr!("???",xxx,imp,6),
    instr!("LDY",ldy,zp0,3), instr!("LDA",lda,zp0,3), instr!("LDX",ldx,zp0,3), instr!("???",xxx,imp,3),
    instr!("TAY",tay,imp,2), instr!("LDA",lda,imm,2), instr!("TAX",tax,imp,2), instr!("???",xxx,imp,2),
    instr!("LDY",ldy,abs,4), instr!("LDA",lda,abs,4), instr!("LDX",ldx,abs,4), instr!("???",xxx,imp,4),

    instr!("BCS",bcs,rel,2), instr!("LDA",lda,izy,5), instr!("???",xxx,imp,2), instr!("???",xxx,imp,5),
    instr!("LDY",ldy,zpx,4), instr!("LDA",lda,zpx,4), instr!("LDX",ldx,zpy,4), instr!("???",xxx,imp,4),
    instr!("CLV",clv,imp,2), instr!("LDA",lda,aby,4), instr!("TSX",tsx,imp,2), instr!("???",xxx,imp,4),
    instr!("LDY",ldy,abx,4), instr!("LDA",lda,abx,4), instr!("LDX",ldx,aby,4), instr!("???",xxx,imp,4),

    instr!("CPY",cpy,imm,2), instr!("CMP",cmp,izx,6), instr!("???",nop,imm,2), instr!("???",xxx,imp,8),
    instr!("CPY",cpy,zp0,3), instr!("CMP",cmp,zp0,3), instr!("DEC",dec,zp0,5), instr!("???",xxx,imp,5),
    instr!("INY",iny,imp,2), instr!("CMP",cmp,imm,2), instr!("DEX",dex,imp,2), instr!("???",xxx,imp,2),
    instr!("CPY",cpy,abs,4), instr!("CMP",cmp,abs,4), instr!("DEC",dec,abs,6), instr!("???",xxx,imp,6),

    instr!("BNE",bne,rel,2), instr!("CMP",cmp,izy,5), instr!("???",xxx,imp,2), instr!("???",xxx,imp,8),
    instr!("???",nop,zpx,4), instr!("CMP",cmp,zpx,4), instr!("DEC",dec,zpx,6), instr!("???",xxx,imp,6),
    instr!("CLD",cld,imp,2), instr!("CMP",cmp,aby,4), instr!("???",nop,imp,2), instr!("???",xxx,imp,7),
    instr!("???",nop,abx,4), instr!("CMP",cmp,abx,4), instr!("DEC",dec,abx,7), instr!("???",xxx,imp,7),

    instr!("CPX",cpx,imm,2), instr!("SBC",sbc,izx,6), instr!("???",nop,imm,2), instr!("???",xxx,imp,8),
    instr!("CPX",cpx,zp0,3), instr!("SBC",sbc,zp0,3), instr!("INC",inc,zp0,5), instr!("???",xxx,imp,5),
    instr!("INX",inx,imp,2), instr!("SBC",sbc,imm,2), instr!("NOP",nop,imp,2), instr!("???",sbc,imm,2),
    instr!("CPX",cpx,abs,4), instr!("SBC",sbc,abs,4), instr!("INC",inc,abs,6), instr!("???",xxx,imp,6),

    instr!("BEQ",beq,rel,2), instr!("SBC",sbc,izy,5), instr!("???",xxx,imp,2), instr!("???",xxx,imp,8),
    instr!("???",nop,zpx,4), instr!("SBC",sbc,zpx,4), instr!("INC",inc,zpx,6), instr!("???",xxx,imp,6),
    instr!("SED",sed,imp,2), instr!("SBC",sbc,aby,4), instr!("???",nop,imp,2), instr!("???",xxx,imp,7),
    instr!("???",nop,abx,4), instr!("SBC",sbc,abx,4), instr!("INC",inc,abx,7), instr!("???",xxx,imp,7),
];
