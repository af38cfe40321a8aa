//! A minimal Hack CPU used to run assembled programs in tests.
#![allow(dead_code)]

use hackc::{assembler, translator};

pub const RAM_SIZE: usize = 0x6001;
pub const STACK_BASE: i16 = 256;

pub struct Cpu {
    pub rom: Vec<u16>,
    pub ram: Vec<i16>,
    pub a: i16,
    pub d: i16,
    pub pc: usize,
}

impl Cpu {
    pub fn new(rom: Vec<u16>) -> Self {
        let mut ram = vec![0; RAM_SIZE];
        ram[0] = STACK_BASE;
        Cpu { rom, ram, a: 0, d: 0, pc: 0 }
    }

    pub fn sp(&self) -> i16 {
        self.ram[0]
    }

    /// Value at the top of the operand stack.
    pub fn top(&self) -> i16 {
        self.ram[(self.sp() - 1) as usize]
    }

    /// Runs until the program counter falls off the end of ROM.
    pub fn run(&mut self) {
        let mut steps = 0;
        while self.pc < self.rom.len() {
            self.step();
            steps += 1;
            assert!(steps < 1_000_000, "program did not terminate");
        }
    }

    pub fn step(&mut self) {
        let word = self.rom[self.pc];
        if word & 0x8000 == 0 {
            self.a = word as i16;
            self.pc += 1;
            return;
        }

        let x = self.d;
        let y = if word & 0x1000 != 0 { self.ram[self.a as u16 as usize] } else { self.a };
        let out = alu(x, y, (word >> 6) & 0b111111);

        let old_a = self.a;
        if word & 0b001_000 != 0 {
            self.ram[old_a as u16 as usize] = out;
        }
        if word & 0b010_000 != 0 {
            self.d = out;
        }
        if word & 0b100_000 != 0 {
            self.a = out;
        }

        let jump = word & 0b111;
        let taken = (jump & 0b100 != 0 && out < 0)
            || (jump & 0b010 != 0 && out == 0)
            || (jump & 0b001 != 0 && out > 0);
        self.pc = if taken { old_a as u16 as usize } else { self.pc + 1 };
    }
}

fn alu(mut x: i16, mut y: i16, control: u16) -> i16 {
    if control & 0b100000 != 0 { x = 0; }
    if control & 0b010000 != 0 { x = !x; }
    if control & 0b001000 != 0 { y = 0; }
    if control & 0b000100 != 0 { y = !y; }
    let mut out = if control & 0b000010 != 0 { x.wrapping_add(y) } else { x & y };
    if control & 0b000001 != 0 { out = !out; }
    out
}

/// Translates and assembles a VM program.
pub fn build(vm_source: &str) -> Vec<u16> {
    let asm = translator::translate(vm_source).expect("translation failed");
    assembler::assemble(&asm).expect("assembly failed")
}

/// Translates, assembles and runs a VM program with the given RAM setup.
pub fn run_vm(vm_source: &str, setup: &[(usize, i16)]) -> Cpu {
    let mut cpu = Cpu::new(build(vm_source));
    for &(address, value) in setup {
        cpu.ram[address] = value;
    }
    cpu.run();
    cpu
}
