//! IPv4 addresses and CIDR networks.

mod address;
pub mod bits;
mod input;
mod network;

pub use address::Address;
pub use input::{AddressOptions, EnumerateOptions, Input};
pub use network::{Addresses, Network};
