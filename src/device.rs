use hal::blocking::i2c;
use hal::blocking::spi;
use hal::digital::v2::OutputPin;

use crate::conf;
use crate::Register;

/// I2C address with SA0 pulled low (default wiring)
pub const I2C_ADDRESS_SA0_LOW: u8 = 0x6a;

/// I2C address with SA0 pulled high
pub const I2C_ADDRESS_SA0_HIGH: u8 = 0x6b;

/// Releasable describes a type that can be destroyed
/// with a released asset.
pub trait Releasable {
    /// The type to be released
    type Released;

    /// Release the underlying asset
    fn release(self) -> Self::Released;
}

/// An LSM6DS3 communication device abstraction
///
/// This allows us to generalize the driver over either an I2C or SPI
/// peripheral. Exactly one of them is bound to a driver instance.
pub trait Device: Releasable {
    /// The type of error for all results
    type Error;

    /// Bring the transport into its idle state before the first transaction
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Put the transport into its released state without touching any
    /// register
    fn deinit(&mut self) -> Result<(), Self::Error>;

    /// Finish a session. Implementations may issue register writes first.
    fn end(&mut self) -> Result<(), Self::Error>;

    /// Read `buffer.len()` consecutive registers starting at `reg`
    fn read_many(&mut self,
                 reg: Register,
                 buffer: &mut [u8])
                 -> Result<(), Self::Error>;

    /// Write the provided value to register
    fn write(&mut self, reg: Register, val: u8) -> Result<(), Self::Error>;

    /// Read a single value from the register
    fn read(&mut self, reg: Register) -> Result<u8, Self::Error> {
        let buffer = &mut [0; 1];
        self.read_many(reg, buffer)?;
        Ok(buffer[0])
    }

    /// Modify the value in the register using the provided closure. The closure
    /// accepts the current value of the register, permitting conditional checks
    /// before modification.
    fn modify<F>(&mut self, reg: Register, f: F) -> Result<(), Self::Error>
        where F: FnOnce(u8) -> u8
    {
        let r = self.read(reg)?;
        self.write(reg, f(r))?;

        Ok(())
    }
}

/// A SPI device. Use a SPI device when the LSM6DS3 is
/// connected via SPI.
///
/// The bus must be configured for [`SPI_MODE`] at up to
/// [`SPI_FREQUENCY_HZ`], most significant bit first.
///
/// [`SPI_MODE`]: ../constant.SPI_MODE.html
/// [`SPI_FREQUENCY_HZ`]: ../constant.SPI_FREQUENCY_HZ.html
pub struct SpiDevice<SPI, GPIO, IRQ = ()> {
    /// Underlying peripheral
    spi: SPI,
    /// nCS
    ncs: GPIO,
    /// INT1, held for the caller; acquisition is polled
    irq: Option<IRQ>,
}

impl<SPI, NCS, E> SpiDevice<SPI, NCS>
    where SPI: spi::Write<u8, Error = E> + spi::Transfer<u8, Error = E>,
          NCS: OutputPin
{
    /// Create a new SpiDevice
    pub fn new(spi: SPI, ncs: NCS) -> Self {
        SpiDevice { spi,
                    ncs,
                    irq: None }
    }
}

impl<SPI, NCS, IRQ, E> SpiDevice<SPI, NCS, IRQ>
    where SPI: spi::Write<u8, Error = E> + spi::Transfer<u8, Error = E>,
          NCS: OutputPin
{
    /// Create a new SpiDevice that also owns the interrupt pin
    pub fn with_irq(spi: SPI, ncs: NCS, irq: IRQ) -> Self {
        SpiDevice { spi,
                    ncs,
                    irq: Some(irq) }
    }
}

impl<SPI, NCS, IRQ, E> Releasable for SpiDevice<SPI, NCS, IRQ>
    where SPI: spi::Write<u8, Error = E> + spi::Transfer<u8, Error = E>,
          NCS: OutputPin
{
    type Released = (SPI, NCS, Option<IRQ>);

    fn release(self) -> (SPI, NCS, Option<IRQ>) {
        (self.spi, self.ncs, self.irq)
    }
}

/// SPI Error
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SpiError<E, E2> {
    /// Bus io error
    BusError(E),
    /// NCS error
    NCSError(E2),
}

impl<SPI, NCS, IRQ, E, EO> SpiDevice<SPI, NCS, IRQ>
    where SPI: spi::Write<u8, Error = E> + spi::Transfer<u8, Error = E>,
          NCS: OutputPin<Error = EO>
{
    // nCS goes high again whether or not the bus transfer succeeded
    fn transaction<F>(&mut self, f: F) -> Result<(), SpiError<E, EO>>
        where F: FnOnce(&mut SPI) -> Result<(), E>
    {
        self.ncs.set_low().map_err(SpiError::NCSError)?;
        let result = f(&mut self.spi);
        self.ncs.set_high().map_err(SpiError::NCSError)?;
        result.map_err(SpiError::BusError)
    }
}

impl<SPI, NCS, IRQ, E, EO> Device for SpiDevice<SPI, NCS, IRQ>
    where SPI: spi::Write<u8, Error = E> + spi::Transfer<u8, Error = E>,
          NCS: OutputPin<Error = EO>
{
    type Error = SpiError<E, EO>;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.ncs.set_high().map_err(SpiError::NCSError)
    }

    fn deinit(&mut self) -> Result<(), Self::Error> {
        self.ncs.set_low().map_err(SpiError::NCSError)
    }

    fn end(&mut self) -> Result<(), Self::Error> {
        self.deinit()
    }

    fn read_many(&mut self,
                 reg: Register,
                 buffer: &mut [u8])
                 -> Result<(), Self::Error> {
        for byte in buffer.iter_mut() {
            *byte = 0;
        }
        self.transaction(|spi| {
                spi.write(&[reg.read_address()])?;
                spi.transfer(buffer)?;
                Ok(())
            })
    }

    fn write(&mut self, reg: Register, val: u8) -> Result<(), Self::Error> {
        self.transaction(|spi| spi.write(&[reg.write_address(), val]))
    }
}

/// An I2C device. Use I2CDevice when the
/// LSM6DS3 is connected via I2C
pub struct I2cDevice<I2C> {
    i2c: I2C,
    address: u8,
}

impl<E, I2C> I2cDevice<I2C>
    where I2C: i2c::Write<Error = E> + i2c::WriteRead<Error = E>
{
    /// Create a new I2C device talking to the slave at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        I2cDevice { i2c,
                    address }
    }
}

impl<E, I2C> Releasable for I2cDevice<I2C>
    where I2C: i2c::Write<Error = E> + i2c::WriteRead<Error = E>
{
    type Released = I2C;

    fn release(self) -> I2C {
        self.i2c
    }
}

impl<E, I2C> Device for I2cDevice<I2C>
    where I2C: i2c::Write<Error = E> + i2c::WriteRead<Error = E>
{
    type Error = E;

    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn deinit(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn end(&mut self) -> Result<(), Self::Error> {
        // power down gyroscope, then accelerometer
        let gyro = Device::write(self, Register::CTRL2_G, conf::power_down());
        let accel = Device::write(self, Register::CTRL1_XL, conf::power_down());
        gyro.and(accel)
    }

    fn read_many(&mut self,
                 reg: Register,
                 buffer: &mut [u8])
                 -> Result<(), Self::Error> {
        // register address, repeated start, then the data phase
        self.i2c.write_read(self.address, &[reg.addr()], buffer)
    }

    fn write(&mut self, reg: Register, val: u8) -> Result<(), Self::Error> {
        let buff: [u8; 2] = [reg.addr(), val];
        self.i2c.write(self.address, &buff)
    }
}
