//! NES controller: an 8-bit parallel-to-serial shift register per pad.
//!
//! `spec.md` §6: writing 1 then 0 to `$4016` latches the current button
//! state into both controllers' shift registers; each subsequent read of
//! `$4016`/`$4017` shifts out one bit, A first.

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Default)]
    pub struct Buttons: u8 {
        const A      = 0b0000_0001;
        const B      = 0b0000_0010;
        const SELECT = 0b0000_0100;
        const START  = 0b0000_1000;
        const UP     = 0b0001_0000;
        const DOWN   = 0b0010_0000;
        const LEFT   = 0b0100_0000;
        const RIGHT  = 0b1000_0000;
    }
}

#[derive(Default)]
pub struct ShiftRegister {
    buttons: Buttons,
    shift: u8,
    strobe: bool,
}

impl ShiftRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver-facing: set the live button state polled on the next strobe.
    pub fn set_buttons(&mut self, buttons: Buttons) {
        self.buttons = buttons;
        if self.strobe {
            self.shift = self.buttons.bits();
        }
    }

    pub fn write_strobe(&mut self, value: u8) {
        self.strobe = value & 0x01 != 0;
        if self.strobe {
            self.shift = self.buttons.bits();
        }
    }

    /// CPU-visible read: low bit is the next button, register shifts left
    /// with 1s filled in past the eighth read (matches real hardware).
    pub fn read(&mut self) -> u8 {
        if self.strobe {
            self.shift = self.buttons.bits();
        }
        let bit = self.shift & 0x01;
        self.shift = (self.shift >> 1) | 0x80;
        bit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_buttons_in_a_b_select_start_up_down_left_right_order() {
        let mut pad = ShiftRegister::new();
        pad.set_buttons(Buttons::A | Buttons::START | Buttons::RIGHT);
        pad.write_strobe(1);
        pad.write_strobe(0);
        let bits: Vec<u8> = (0..8).map(|_| pad.read()).collect();
        assert_eq!(bits, [1, 0, 0, 1, 0, 0, 0, 1]);
    }

    #[test]
    fn held_strobe_keeps_returning_button_a() {
        let mut pad = ShiftRegister::new();
        pad.set_buttons(Buttons::A);
        pad.write_strobe(1);
        assert_eq!(pad.read(), 1);
        assert_eq!(pad.read(), 1);
    }
}
