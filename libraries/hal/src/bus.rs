/// Two-wire register bus interface

/// Synchronous byte-level register access on the device bus.
///
/// The transport has no retry logic of its own and no failure channel: a
/// failed read comes back as a floating-bus byte (`0x00` or `0xFF`) and a
/// write is fire-and-forget.
pub trait RegisterBus {
    /// Write a single register on the device at `address`
    fn write(&mut self, address: u8, register: u8, value: u8);

    /// Read a single register from the device at `address`
    fn read(&mut self, address: u8, register: u8) -> u8;
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    fn write(&mut self, address: u8, register: u8, value: u8) {
        (**self).write(address, register, value)
    }

    fn read(&mut self, address: u8, register: u8) -> u8 {
        (**self).read(address, register)
    }
}
