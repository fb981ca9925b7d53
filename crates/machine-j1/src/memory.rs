//! J1 memory map and bus implementation.
//!
//! Memory map (byte addresses):
//! - $0000-$3FFF: 8K x 16-bit RAM, word-indexed by address >> 1
//! - $4000-$FFFF: memory-mapped I/O, decoded by exact port address
//!
//! The port layout follows the later board revisions; see [`port`].

use cpu_j1::Bus;

use crate::Console;

/// Number of 16-bit words in RAM.
pub const RAM_WORDS: usize = 0x2000;

/// Any address with one of these bits set is port space, not RAM.
const IO_MASK: u16 = 0xc000;

/// Console I/O ports.
pub mod port {
    /// Console data: read the next byte, write to emit the low byte.
    pub const DATA: u16 = 0x7000;
    /// Console input ready: reads 1 while a byte is waiting.
    pub const READY: u16 = 0x7001;
    /// Halt: any store stops the machine.
    pub const BYE: u16 = 0x7002;
}

/// The J1 memory subsystem: RAM plus the console ports.
pub struct J1Memory<C> {
    ram: [u16; RAM_WORDS],
    console: C,
    bye: bool,
}

impl<C: Console> J1Memory<C> {
    pub fn new(console: C) -> Self {
        Self {
            ram: [0; RAM_WORDS],
            console,
            bye: false,
        }
    }

    /// Copy image words into the bottom of RAM.
    pub fn load(&mut self, words: &[u16]) {
        self.ram[..words.len()].copy_from_slice(words);
    }

    /// RAM word at a word index, for inspection.
    #[must_use]
    pub fn word(&self, index: usize) -> u16 {
        self.ram[index]
    }

    /// True once a store to the bye port has been seen, or input ran out.
    #[must_use]
    pub fn halted(&self) -> bool {
        self.bye
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }
}

impl<C: Console> Bus for J1Memory<C> {
    fn read(&mut self, addr: u16) -> u16 {
        if addr & IO_MASK == 0 {
            return self.ram[(addr >> 1) as usize];
        }
        match addr {
            port::DATA => match self.console.read() {
                Some(byte) => u16::from(byte),
                // Out of input: fold end-of-stream into a halt request so a
                // piped session terminates instead of spinning on the port.
                None => {
                    self.bye = true;
                    0
                }
            },
            port::READY => self.console.len(),
            _ => 0,
        }
    }

    fn write(&mut self, addr: u16, value: u16) {
        if addr & IO_MASK == 0 {
            self.ram[(addr >> 1) as usize] = value;
            return;
        }
        match addr {
            port::DATA => self.console.write(value as u8),
            port::BYE => self.bye = true,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Scripted console: canned input, captured output.
    #[derive(Default)]
    struct ScriptConsole {
        input: VecDeque<u8>,
        output: Vec<u8>,
    }

    impl Console for ScriptConsole {
        fn read(&mut self) -> Option<u8> {
            self.input.pop_front()
        }

        fn write(&mut self, byte: u8) {
            self.output.push(byte);
        }

        fn len(&mut self) -> u16 {
            u16::from(!self.input.is_empty())
        }

        fn stop(&mut self) {}
    }

    fn memory_with_input(input: &[u8]) -> J1Memory<ScriptConsole> {
        J1Memory::new(ScriptConsole {
            input: input.iter().copied().collect(),
            ..ScriptConsole::default()
        })
    }

    #[test]
    fn ram_ignores_the_low_address_bit() {
        let mut mem = memory_with_input(&[]);
        mem.write(0x0010, 0xabcd);
        assert_eq!(mem.read(0x0010), 0xabcd);
        assert_eq!(mem.read(0x0011), 0xabcd);
        assert_eq!(mem.word(0x08), 0xabcd);
    }

    #[test]
    fn high_ram_does_not_alias_the_ports() {
        let mut mem = memory_with_input(&[]);
        // Word index of $7000 >> 1 would be $3800; the carve-out keeps the
        // port write away from RAM entirely.
        mem.write(port::DATA, 0x41);
        assert_eq!(mem.word(0x3800 >> 1), 0);
        assert_eq!(mem.console_mut().output, b"A");
    }

    #[test]
    fn data_port_reads_console_bytes() {
        let mut mem = memory_with_input(b"hi");
        assert_eq!(mem.read(port::DATA), u16::from(b'h'));
        assert_eq!(mem.read(port::DATA), u16::from(b'i'));
        assert!(!mem.halted());
    }

    #[test]
    fn data_port_read_at_end_of_input_halts() {
        let mut mem = memory_with_input(&[]);
        assert_eq!(mem.read(port::DATA), 0);
        assert!(mem.halted());
    }

    #[test]
    fn ready_port_tracks_pending_input() {
        let mut mem = memory_with_input(b"x");
        assert_eq!(mem.read(port::READY), 1);
        assert_eq!(mem.read(port::DATA), u16::from(b'x'));
        assert_eq!(mem.read(port::READY), 0);
    }

    #[test]
    fn data_port_write_emits_low_byte() {
        let mut mem = memory_with_input(&[]);
        mem.write(port::DATA, 0x1241);
        assert_eq!(mem.console_mut().output, b"A");
    }

    #[test]
    fn bye_port_sets_the_latch() {
        let mut mem = memory_with_input(&[]);
        assert!(!mem.halted());
        mem.write(port::BYE, 0);
        assert!(mem.halted());
    }

    #[test]
    fn unknown_ports_read_zero_and_drop_writes() {
        let mut mem = memory_with_input(b"x");
        assert_eq!(mem.read(0x4000), 0);
        assert_eq!(mem.read(0xffff), 0);
        mem.write(0x4000, 0xdead);
        mem.write(0x7004, 0xdead);
        assert!(!mem.halted());
        assert!(mem.console_mut().output.is_empty());
    }
}
