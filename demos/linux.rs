//! Linux (Raspberry Pi) demo
//!
//! # Connections
//!
//! - PIN1 = 3V3 = VCC
//! - PIN3 = BCM2 = SDA
//! - PIN5 = BCM3 = SCL
//! - PIN6 = GND = GND, and SA0 to GND for address 0x6a

extern crate linux_embedded_hal as hal;
extern crate lsm6ds3;

use std::thread;
use std::time::{Duration, Instant};

use hal::I2cdev;
use lsm6ds3::{Config, Lsm6ds3};

fn main() {
    let i2c = I2cdev::new("/dev/i2c-1").expect("unable to open /dev/i2c-1");

    let origin = Instant::now();
    let mut millis = || origin.elapsed().as_millis() as u32;

    let mut imu = Lsm6ds3::i2c_default(i2c);
    imu.begin(&mut millis, &Config::default())
       .expect("LSM6DS3 not found");

    println!("gyro offset: {:?}", imu.gyro_offset());

    for _ in 0..100 {
        if imu.acceleration_available().unwrap_or(false) {
            println!("accel: {:?}", imu.read_acceleration());
        }
        if imu.gyroscope_available().unwrap_or(false) {
            println!("gyro: {:?}", imu.read_gyroscope());
        }
        thread::sleep(Duration::from_millis(10));
    }

    imu.end();
}
