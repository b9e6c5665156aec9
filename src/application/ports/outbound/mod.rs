//! Outbound ports - Interfaces that the application requires from external systems

mod clock_port;
mod storage_port;

pub use clock_port::{ClockPort, RandomPort};
pub use storage_port::{StorageError, StoragePort};
#[cfg(test)]
pub use storage_port::MockStoragePort;
