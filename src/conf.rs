//! Configuration for LSM6DS3.

use core::default::Default;

/// Output data rate selector shared by `ODR_XL`, `ODR_G` and `ODR_FIFO`
/// (upper nibble of the control registers).
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DataRate {
    /// Sensor powered down
    PowerDown = 0b0000,
    /// 104 Hz
    _104Hz = 0b0100,
}
impl DataRate {
    /// Rate in Hz
    pub fn hz(&self) -> f32 {
        match self {
            DataRate::PowerDown => 0.0,
            DataRate::_104Hz => 104.0,
        }
    }
}

/// Gyroscope full scale (`CTRL2_G` `FS_G`); the driver runs at 2000 dps.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GyroScale {
    /// +2000 dps
    _2000DPS = 0b11,
}
impl GyroScale {
    pub(crate) fn resolution(&self) -> f32 {
        match self {
            GyroScale::_2000DPS => 2000.0 / 32768.0,
        }
    }
}

/// Accelerometer full scale (`CTRL1_XL` `FS_XL`); the driver runs at 4g.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AccelScale {
    /// +4g
    _4G = 0b10,
}
impl AccelScale {
    pub(crate) fn resolution(&self) -> f32 {
        match self {
            AccelScale::_4G => 4.0 / 32768.0,
        }
    }
}

/// Accelerometer anti-aliasing filter bandwidth (`CTRL1_XL` `BW_XL`)
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AccelBandwidth {
    /// 100 Hz
    _100Hz = 0b10,
}

/// Rate both sensors are configured for
pub(crate) const DATA_RATE: DataRate = DataRate::_104Hz;
pub(crate) const GYRO_SCALE: GyroScale = GyroScale::_2000DPS;
pub(crate) const ACCEL_SCALE: AccelScale = AccelScale::_4G;

/// `CTRL1_XL` and `CTRL2_G` value that powers the sensor down
pub(crate) fn power_down() -> u8 {
    (DataRate::PowerDown as u8) << 4
}

/// `CTRL2_G`: 104 Hz, 2000 dps. Yields 0x4c.
pub(crate) fn ctrl2_g() -> u8 {
    (DATA_RATE as u8) << 4 | (GYRO_SCALE as u8) << 2
}

/// `CTRL1_XL`: 104 Hz, 4g, 100 Hz anti-aliasing. Yields 0x4a.
pub(crate) fn ctrl1_xl() -> u8 {
    (DATA_RATE as u8) << 4
    | (ACCEL_SCALE as u8) << 2
    | AccelBandwidth::_100Hz as u8
}

/// `CTRL8_XL`: slope filter and 6D low pass enabled, ODR/4 decimation.
pub(crate) const CTRL8_XL: u8 = 0x05;

/// `FIFO_CTRL3`: accelerometer and gyroscope data sets in the FIFO.
pub(crate) const FIFO_CTRL3: u8 = 0x11;

/// FIFO operating mode (`FIFO_CTRL5` `FIFO_MODE`)
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FifoMode {
    /// Continuous mode, new samples overwrite the oldest when full
    Continuous = 0b110,
}

/// `FIFO_CTRL5`: 104 Hz, continuous. Yields 0x26.
pub(crate) fn fifo_ctrl5() -> u8 {
    (DATA_RATE as u8) << 3 | FifoMode::Continuous as u8
}

/// Default length of the gyroscope drift calibration window
pub const DEFAULT_CALIBRATION_MS: u32 = 250;

/// Configuration applied by `begin`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    pub(crate) fifo: bool,
    pub(crate) calibration_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config { fifo: false,
                 calibration_ms: DEFAULT_CALIBRATION_MS }
    }
}

impl Config {
    /// FIFO off and a 250 ms calibration window
    pub fn new() -> Self {
        Default::default()
    }

    /// Arms the hardware FIFO (continuous mode, 104 Hz) after calibration
    pub fn fifo(&mut self, enabled: bool) -> &mut Self {
        self.fifo = enabled;
        self
    }

    /// Sets how long the gyroscope drift is measured for. The device must
    /// be stationary for the whole window.
    pub fn calibration_time_ms(&mut self, ms: u32) -> &mut Self {
        self.calibration_ms = ms;
        self
    }
}

bitflags! {
    /// STATUS_REG: data ready flags
    pub struct Status: u8 {
        /// Temperature data available
        const TDA = 0b0000_0100;
        /// Gyroscope data available
        const GDA = 0b0000_0010;
        /// Accelerometer data available
        const XLDA = 0b0000_0001;
    }
}

bitflags! {
    /// CTRL3_C: common control bits
    pub struct Ctrl3C: u8 {
        /// Reboot memory content
        const BOOT = 0b1000_0000;
        /// Block data update: output registers are not updated until MSB
        /// and LSB have been read
        const BDU = 0b0100_0000;
        /// Interrupt pins active low
        const H_LACTIVE = 0b0010_0000;
        /// Interrupt pins open drain
        const PP_OD = 0b0001_0000;
        /// 3-wire SPI
        const SIM = 0b0000_1000;
        /// Register address auto increment on multi byte access
        const IF_INC = 0b0000_0100;
        /// Big endian data
        const BLE = 0b0000_0010;
        /// Software reset
        const SW_RESET = 0b0000_0001;
    }
}
