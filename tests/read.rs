mod common;

use common::{dps, g, stepping_clock, BusFault, FakeImu, GDA, OUTX_L_G,
             OUTX_L_XL, STATUS_REG, XLDA};
use lsm6ds3::{Error, Lsm6ds3, Register, Vec3};

#[test]
fn acceleration_in_g() {
    let fake = FakeImu::new();
    fake.set_xyz(OUTX_L_XL, [1000, -2000, 8192]);
    let mut imu = Lsm6ds3::i2c_default(fake);

    let accel = imu.read_acceleration().unwrap();

    assert_eq!(accel, Vec3::new(g(1000), g(-2000), g(8192)));
    assert_eq!(accel.z, 1.0);
}

#[test]
fn acceleration_extremes() {
    let fake = FakeImu::new();
    fake.set_xyz(OUTX_L_XL, [i16::MIN, i16::MAX, 0]);
    let mut imu = Lsm6ds3::i2c_default(fake);

    let accel = imu.read_acceleration().unwrap();

    assert_eq!(accel.x, -4.0);
    assert_eq!(accel, Vec3::new(g(i16::MIN), g(i16::MAX), 0.0));
}

#[test]
fn gyroscope_without_calibration() {
    let fake = FakeImu::new();
    fake.set_xyz(OUTX_L_G, [100, -200, 300]);
    let mut imu = Lsm6ds3::i2c_default(fake);

    let rate = imu.read_gyroscope().unwrap();

    assert_eq!(rate, Vec3::new(dps(100), dps(-200), dps(300)));
}

#[test]
fn gyroscope_subtracts_offsets() {
    let fake = FakeImu::new();
    fake.set(STATUS_REG, GDA);
    fake.set_xyz(OUTX_L_G, [10, 20, -30]);
    let mut imu = Lsm6ds3::i2c_default(fake.clone());
    let offset = imu.calibrate(&mut stepping_clock(10), 100).unwrap();

    fake.set_xyz(OUTX_L_G, [100, -200, 300]);
    let rate = imu.read_gyroscope().unwrap();

    assert_eq!(offset, Vec3::new(dps(10), dps(20), dps(-30)));
    assert_eq!(rate,
               Vec3::new(dps(100) - offset.x,
                         dps(-200) - offset.y,
                         dps(300) - offset.z));
}

#[test]
fn acceleration_is_never_offset() {
    let fake = FakeImu::new();
    fake.set(STATUS_REG, GDA);
    fake.set_xyz(OUTX_L_G, [10, 20, -30]);
    fake.set_xyz(OUTX_L_XL, [10, 20, -30]);
    let mut imu = Lsm6ds3::i2c_default(fake);
    imu.calibrate(&mut stepping_clock(10), 100).unwrap();

    assert_eq!(imu.read_acceleration().unwrap(),
               Vec3::new(g(10), g(20), g(-30)));
}

#[test]
fn raw_samples() {
    let fake = FakeImu::new();
    fake.set_xyz(OUTX_L_G, [1, -2, 3]);
    fake.set_xyz(OUTX_L_XL, [-4, 5, -6]);
    let mut imu = Lsm6ds3::i2c_default(fake);

    assert_eq!(imu.read_raw_gyroscope().unwrap(), Vec3::new(1, -2, 3));
    assert_eq!(imu.read_raw_acceleration().unwrap(), Vec3::new(-4, 5, -6));
}

#[test]
fn failed_reads_are_errors() {
    let fake = FakeImu::new();
    fake.fail_reads(true);
    let mut imu = Lsm6ds3::i2c_default(fake);

    assert_eq!(imu.read_acceleration(), Err(Error::BusError(BusFault)));
    assert_eq!(imu.read_gyroscope(), Err(Error::BusError(BusFault)));
    assert!(imu.read_gyroscope().unwrap_or(Vec3::nan()).is_nan());
    assert_eq!(imu.gyroscope_available(), Err(Error::BusError(BusFault)));
}

#[test]
fn availability_follows_status_bits() {
    let fake = FakeImu::new();
    let mut imu = Lsm6ds3::i2c_default(fake.clone());

    assert!(!imu.acceleration_available().unwrap());
    assert!(!imu.gyroscope_available().unwrap());

    fake.set(STATUS_REG, XLDA);
    assert!(imu.acceleration_available().unwrap());
    assert!(!imu.gyroscope_available().unwrap());

    fake.set(STATUS_REG, GDA | 0x04);
    assert!(!imu.acceleration_available().unwrap());
    assert!(imu.gyroscope_available().unwrap());
}

#[test]
fn fixed_rates_and_unsupported_fifo_count() {
    let mut imu = Lsm6ds3::i2c_default(FakeImu::new());

    assert_eq!(imu.acceleration_sample_rate(), 104.0);
    assert_eq!(imu.gyroscope_sample_rate(), 104.0);
    assert_eq!(imu.unread_fifo_sample_count(), None);
}

#[test]
fn register_round_trip() {
    let fake = FakeImu::new();
    let mut imu = Lsm6ds3::i2c_default(fake.clone());

    imu.write_register(Register::CTRL6_C, 0x5a).unwrap();

    assert_eq!(imu.read_register(Register::CTRL6_C), Ok(0x5a));
    assert_eq!(fake.writes(), vec![(0x15, 0x5a)]);
}

#[test]
fn multi_byte_register_read() {
    let fake = FakeImu::new();
    fake.set(0x20, 0xaa);
    fake.set(0x21, 0x55);
    let mut imu = Lsm6ds3::i2c_default(fake);

    let mut buffer = [0; 2];
    imu.read_registers(Register::OUT_TEMP_L, &mut buffer).unwrap();

    assert_eq!(buffer, [0xaa, 0x55]);
}
