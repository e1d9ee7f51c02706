//! Register file stand-in for an LSM6DS3 on an I2C bus
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::blocking::i2c;

pub const ADDRESS: u8 = 0x6a;

pub const WHO_AM_I: u8 = 0x0f;
pub const CTRL3_C: u8 = 0x12;
pub const STATUS_REG: u8 = 0x1e;
pub const OUTX_L_G: u8 = 0x22;
pub const OUTX_L_XL: u8 = 0x28;

pub const XLDA: u8 = 0x01;
pub const GDA: u8 = 0x02;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusFault;

struct State {
    regs: [u8; 0x80],
    writes: Vec<(u8, u8)>,
    fail_reads: bool,
}

/// Answers reads from its register file and logs every register write.
/// Clones share the same register file, so a test can keep a handle while
/// the driver owns the bus.
#[derive(Clone)]
pub struct FakeImu {
    state: Rc<RefCell<State>>,
}

impl FakeImu {
    pub fn new() -> Self {
        let fake = FakeImu { state: Rc::new(RefCell::new(State { regs: [0; 0x80],
                                                                   writes: Vec::new(),
                                                                   fail_reads: false })) };
        fake.set(WHO_AM_I, 0x69);
        fake
    }

    pub fn set(&self, reg: u8, value: u8) {
        self.state.borrow_mut().regs[reg as usize] = value;
    }

    pub fn get(&self, reg: u8) -> u8 {
        self.state.borrow().regs[reg as usize]
    }

    /// Stores three samples little-endian from `reg` on
    pub fn set_xyz(&self, reg: u8, xyz: [i16; 3]) {
        for (i, v) in xyz.iter().enumerate() {
            let [lo, hi] = v.to_le_bytes();
            self.set(reg + 2 * i as u8, lo);
            self.set(reg + 2 * i as u8 + 1, hi);
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.state.borrow_mut().fail_reads = fail;
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.state.borrow().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.state.borrow_mut().writes.clear();
    }
}

impl i2c::Write for FakeImu {
    type Error = BusFault;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), BusFault> {
        assert_eq!(address, ADDRESS);
        let mut state = self.state.borrow_mut();
        let reg = bytes[0];
        for (i, value) in bytes[1..].iter().enumerate() {
            let reg = reg + i as u8;
            state.regs[reg as usize] = *value;
            state.writes.push((reg, *value));
        }
        Ok(())
    }
}

impl i2c::WriteRead for FakeImu {
    type Error = BusFault;

    fn write_read(&mut self,
                  address: u8,
                  bytes: &[u8],
                  buffer: &mut [u8])
                  -> Result<(), BusFault> {
        assert_eq!(address, ADDRESS);
        let state = self.state.borrow();
        if state.fail_reads {
            return Err(BusFault);
        }
        let reg = bytes[0] as usize;
        buffer.copy_from_slice(&state.regs[reg..reg + buffer.len()]);
        Ok(())
    }
}

/// Clock advancing `step` milliseconds on every call
pub fn stepping_clock(step: u32) -> impl FnMut() -> u32 {
    let mut now = 0u32;
    move || {
        now = now.wrapping_add(step);
        now
    }
}

/// Raw gyroscope reading converted the way the device documents it
pub fn dps(raw: i16) -> f32 {
    f32::from(raw) * 2000.0 / 32768.0
}

/// Raw accelerometer reading converted the way the device documents it
pub fn g(raw: i16) -> f32 {
    f32::from(raw) * 4.0 / 32768.0
}
