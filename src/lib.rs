//! no_std driver for the LSM6DS3 (accelerometer + gyroscope IMU)
//!
//! The driver talks to the device over I2C or SPI using the blocking
//! [`embedded-hal`] traits. Acquisition is polled: check
//! [`gyroscope_available`] or [`acceleration_available`] before reading.
//!
//! ```no_run
//! # extern crate embedded_hal_mock;
//! # extern crate lsm6ds3;
//! # use embedded_hal_mock::i2c::Mock as I2c;
//! use lsm6ds3::{Config, Lsm6ds3};
//!
//! # let i2c = I2c::new(&[]);
//! # let mut now = 0u32;
//! # let mut millis = || { now += 1; now };
//! let mut imu = Lsm6ds3::i2c_default(i2c);
//! imu.begin(&mut millis, &Config::default()).unwrap();
//!
//! loop {
//!     if imu.gyroscope_available().unwrap() {
//!         let rate = imu.read_gyroscope().unwrap();
//!         // rate.x, rate.y, rate.z in degrees per second
//!     }
//! }
//! ```
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/0.2
//! [`gyroscope_available`]: ./struct.Lsm6ds3.html#method.gyroscope_available
//! [`acceleration_available`]: ./struct.Lsm6ds3.html#method.acceleration_available

#![deny(missing_docs)]
#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate bitflags;
extern crate embedded_hal as hal;
#[macro_use]
extern crate log;

mod clock;
mod conf;
mod device;
mod vec3;

use hal::blocking::i2c;
use hal::blocking::spi;
use hal::digital::v2::OutputPin;
use hal::spi::{Mode, Phase, Polarity};

pub use clock::Clock;
pub use conf::*;
pub use device::{Device, I2cDevice, Releasable, SpiDevice, SpiError,
                 I2C_ADDRESS_SA0_HIGH, I2C_ADDRESS_SA0_LOW};
pub use vec3::{Scale, Vec3};

/// Expected content of `WHO_AM_I`
pub const WHO_AM_I_VALUE: u8 = 0x69;

/// SPI mode
pub const SPI_MODE: Mode = Mode { polarity: Polarity::IdleLow,
                                  phase: Phase::CaptureOnFirstTransition };

/// Highest SPI clock the driver is meant to run at (10 MHz)
pub const SPI_FREQUENCY_HZ: u32 = 10_000_000;

/// LSM6DS3 driver
pub struct Lsm6ds3<DEV> {
    // i2c / spi binding
    dev: DEV,
    // gyroscope zero-rate bias, dps
    gyro_offset: Vec3<f32>,
    fifo_enabled: bool,
}

/// Driver error
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Error<E> {
    /// The device is absent or not an LSM6DS3. Holds the WHO_AM_I value, or
    /// `None` when nothing answered the identity read.
    InvalidDevice(Option<u8>),
    /// No gyroscope sample became ready during the calibration window
    NoCalibrationData,
    /// Underlying bus error
    BusError(E),
}

impl<E> core::convert::From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::BusError(error)
    }
}

impl<E, I2C> Lsm6ds3<I2cDevice<I2C>>
    where I2C: i2c::Write<Error = E> + i2c::WriteRead<Error = E>
{
    /// Creates a driver for the device at `address` on the I2C bus
    pub fn i2c(i2c: I2C, address: u8) -> Self {
        Lsm6ds3::new(I2cDevice::new(i2c, address))
    }

    /// Creates a driver for the device at the default address (SA0 low)
    pub fn i2c_default(i2c: I2C) -> Self {
        Lsm6ds3::i2c(i2c, I2C_ADDRESS_SA0_LOW)
    }
}

impl<E, SPI, NCS> Lsm6ds3<SpiDevice<SPI, NCS>>
    where SPI: spi::Write<u8, Error = E> + spi::Transfer<u8, Error = E>,
          NCS: OutputPin
{
    /// Creates a driver from a SPI peripheral and a NCS pin
    pub fn spi(spi: SPI, ncs: NCS) -> Self {
        Lsm6ds3::new(SpiDevice::new(spi, ncs))
    }
}

impl<E, SPI, NCS, IRQ> Lsm6ds3<SpiDevice<SPI, NCS, IRQ>>
    where SPI: spi::Write<u8, Error = E> + spi::Transfer<u8, Error = E>,
          NCS: OutputPin
{
    /// Creates a driver from a SPI peripheral, a NCS pin and the pin INT1 is
    /// wired to. The interrupt pin is only held and handed back on release.
    pub fn spi_with_irq(spi: SPI, ncs: NCS, irq: IRQ) -> Self {
        Lsm6ds3::new(SpiDevice::with_irq(spi, ncs, irq))
    }
}

impl<E, DEV> Lsm6ds3<DEV> where DEV: Device<Error = E>
{
    /// Wraps an already constructed transport. No bus traffic happens until
    /// [`begin`](#method.begin).
    pub fn new(dev: DEV) -> Self {
        Lsm6ds3 { dev,
                  gyro_offset: Vec3::default(),
                  fifo_enabled: false }
    }

    /// Checks the device identity, configures both sensors, measures the
    /// gyroscope drift and optionally arms the FIFO.
    ///
    /// Only a failed identity check is reported. Failures of the
    /// configuration writes and of the calibration are logged and
    /// otherwise ignored.
    pub fn begin<C>(&mut self,
                    clock: &mut C,
                    config: &Config)
                    -> Result<(), Error<E>>
        where C: Clock
    {
        self.dev.init()?;

        let who_am_i = self.dev.read(Register::WHO_AM_I).ok();
        if who_am_i != Some(WHO_AM_I_VALUE) {
            warn!("lsm6ds3: WHO_AM_I {:?}, expected {:#04x}",
                  who_am_i,
                  WHO_AM_I_VALUE);
            self.teardown();
            return Err(Error::InvalidDevice(who_am_i));
        }

        self.configure(Register::CTRL2_G, conf::ctrl2_g());
        self.configure(Register::CTRL1_XL, conf::ctrl1_xl());
        self.configure(Register::CTRL8_XL, conf::CTRL8_XL);

        // failure is already logged by calibrate; offsets stay at zero
        let _ = self.calibrate(clock, config.calibration_ms);

        self.fifo_enabled = config.fifo;
        if self.fifo_enabled {
            let bdu = Ctrl3C::BDU.bits();
            if self.dev.modify(Register::CTRL3_C, |r| r | bdu).is_err() {
                warn!("lsm6ds3: failed to set block data update");
            }
            self.configure(Register::FIFO_CTRL3, conf::FIFO_CTRL3);
            self.configure(Register::FIFO_CTRL5, conf::fifo_ctrl5());
        }

        debug!("lsm6ds3: configured, gyro offset {:?}", self.gyro_offset);
        Ok(())
    }

    fn configure(&mut self, reg: Register, value: u8) {
        if self.dev.write(reg, value).is_err() {
            warn!("lsm6ds3: failed to write {:?} = {:#04x}", reg, value);
        }
    }

    fn teardown(&mut self) {
        if self.dev.deinit().is_err() {
            warn!("lsm6ds3: failed to release the transport");
        }
    }

    /// Measures the gyroscope zero-rate bias for `duration_ms` milliseconds.
    ///
    /// Busy-polls the data ready flag for the whole window; the device must
    /// be stationary. On success the mean reading replaces the current
    /// offsets, which are subtracted from every later
    /// [`read_gyroscope`](#method.read_gyroscope). If no sample arrived the
    /// previous offsets are kept and `NoCalibrationData` is returned.
    pub fn calibrate<C>(&mut self,
                        clock: &mut C,
                        duration_ms: u32)
                        -> Result<Vec3<f32>, Error<E>>
        where C: Clock
    {
        let mut sum = Vec3::<f32>::default();
        let mut samples: u32 = 0;

        let start = clock.millis();
        while clock.elapsed_since(start) < duration_ms {
            // a failed status or sample read counts as no data
            if !self.gyroscope_available().unwrap_or(false) {
                continue;
            }
            if let Ok(rate) = self.read_gyroscope_uncorrected() {
                sum += rate;
                samples += 1;
            }
        }

        if samples == 0 {
            warn!("lsm6ds3: not enough samples to calibrate IMU");
            return Err(Error::NoCalibrationData);
        }

        self.gyro_offset = sum / samples as f32;
        debug!("lsm6ds3: calibrated from {} samples", samples);
        Ok(self.gyro_offset)
    }

    /// Current gyroscope offsets in dps
    pub fn gyro_offset(&self) -> Vec3<f32> {
        self.gyro_offset
    }

    /// Whether `begin` armed the FIFO
    pub fn fifo_enabled(&self) -> bool {
        self.fifo_enabled
    }

    fn status(&mut self) -> Result<Status, Error<E>> {
        let status = self.dev.read(Register::STATUS_REG)?;
        Ok(Status::from_bits_truncate(status))
    }

    /// True when a new accelerometer sample is ready
    pub fn acceleration_available(&mut self) -> Result<bool, Error<E>> {
        Ok(self.status()?.contains(Status::XLDA))
    }

    /// True when a new gyroscope sample is ready
    pub fn gyroscope_available(&mut self) -> Result<bool, Error<E>> {
        Ok(self.status()?.contains(Status::GDA))
    }

    fn read_xyz(&mut self, reg: Register) -> Result<Vec3<i16>, Error<E>> {
        let mut buffer = [0; 6];
        self.dev.read_many(reg, &mut buffer)?;
        Ok(Vec3::from_le_bytes(&buffer))
    }

    /// Raw accelerometer sample
    pub fn read_raw_acceleration(&mut self) -> Result<Vec3<i16>, Error<E>> {
        self.read_xyz(Register::OUTX_L_XL)
    }

    /// Raw gyroscope sample, without offset correction
    pub fn read_raw_gyroscope(&mut self) -> Result<Vec3<i16>, Error<E>> {
        self.read_xyz(Register::OUTX_L_G)
    }

    /// Acceleration in g
    pub fn read_acceleration(&mut self) -> Result<Vec3<f32>, Error<E>> {
        let raw = self.read_raw_acceleration()?;
        Ok(raw.f32().scale(conf::ACCEL_SCALE.resolution()))
    }

    fn read_gyroscope_uncorrected(&mut self) -> Result<Vec3<f32>, Error<E>> {
        let raw = self.read_raw_gyroscope()?;
        Ok(raw.f32().scale(conf::GYRO_SCALE.resolution()))
    }

    /// Angular rate in degrees per second, minus the calibrated offsets
    pub fn read_gyroscope(&mut self) -> Result<Vec3<f32>, Error<E>> {
        Ok(self.read_gyroscope_uncorrected()? - self.gyro_offset)
    }

    /// Configured accelerometer output data rate in Hz
    pub fn acceleration_sample_rate(&self) -> f32 {
        conf::DATA_RATE.hz()
    }

    /// Configured gyroscope output data rate in Hz
    pub fn gyroscope_sample_rate(&self) -> f32 {
        conf::DATA_RATE.hz()
    }

    /// Number of samples waiting in the FIFO. Not supported: always `None`.
    pub fn unread_fifo_sample_count(&mut self) -> Option<u16> {
        None
    }

    /// Reads a single register
    pub fn read_register(&mut self, reg: Register) -> Result<u8, Error<E>> {
        Ok(self.dev.read(reg)?)
    }

    /// Reads `buffer.len()` consecutive registers starting at `reg`
    pub fn read_registers(&mut self,
                          reg: Register,
                          buffer: &mut [u8])
                          -> Result<(), Error<E>> {
        Ok(self.dev.read_many(reg, buffer)?)
    }

    /// Writes a single register
    pub fn write_register(&mut self,
                          reg: Register,
                          value: u8)
                          -> Result<(), Error<E>> {
        Ok(self.dev.write(reg, value)?)
    }

    /// Ends the session and releases the bus resources. Over I2C both
    /// sensors are powered down first; over SPI NCS is driven low.
    pub fn end(mut self) -> DEV::Released {
        if self.dev.end().is_err() {
            warn!("lsm6ds3: failed to shut down cleanly");
        }
        self.dev.release()
    }

    /// Destroys the driver recovering the bus resources, without any bus
    /// traffic
    pub fn release(self) -> DEV::Released {
        self.dev.release()
    }
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq)]
/// LSM6DS3 registers
pub enum Register {
    /// FIFO control 1, watermark threshold low bits
    FIFO_CTRL1 = 0x06,
    /// FIFO control 2
    FIFO_CTRL2 = 0x07,
    /// FIFO control 3, gyroscope and accelerometer decimation
    FIFO_CTRL3 = 0x08,
    /// FIFO control 4
    FIFO_CTRL4 = 0x09,
    /// FIFO control 5, FIFO data rate and mode
    FIFO_CTRL5 = 0x0a,
    /// Identity, reads 0x69
    WHO_AM_I = 0x0f,
    /// Accelerometer control
    CTRL1_XL = 0x10,
    /// Gyroscope control
    CTRL2_G = 0x11,
    /// Common control
    CTRL3_C = 0x12,
    /// Control 6
    CTRL6_C = 0x15,
    /// Gyroscope control 7
    CTRL7_G = 0x16,
    /// Accelerometer control 8
    CTRL8_XL = 0x17,
    /// Data ready status
    STATUS_REG = 0x1e,
    /// Temperature output, low byte
    OUT_TEMP_L = 0x20,
    /// Temperature output, high byte
    OUT_TEMP_H = 0x21,
    /// Gyroscope X output low byte; Y and Z follow
    OUTX_L_G = 0x22,
    /// Accelerometer X output low byte; Y and Z follow
    OUTX_L_XL = 0x28,
    /// FIFO status 1
    FIFO_STATUS1 = 0x3a,
    /// FIFO status 2
    FIFO_STATUS2 = 0x3b,
    /// FIFO status 3
    FIFO_STATUS3 = 0x3c,
    /// FIFO status 4
    FIFO_STATUS4 = 0x3d,
    /// FIFO data output, low byte
    FIFO_DATA_OUT_L = 0x3e,
    /// FIFO data output, high byte
    FIFO_DATA_OUT_H = 0x3f,
}

const R: u8 = 1 << 7;
const W: u8 = 0 << 7;

impl Register {
    /// Register address
    pub fn addr(&self) -> u8 {
        *self as u8
    }

    fn read_address(&self) -> u8 {
        *self as u8 | R
    }

    fn write_address(&self) -> u8 {
        *self as u8 | W
    }
}
