//! IPv4 address and network value types.
//!
//! ```
//! use ipv4_net::ipv4;
//!
//! let address = ipv4("192.168.178.1/24").unwrap();
//! let network = address.network();
//! assert_eq!("192.168.178.0/24", network.to_string());
//! assert_eq!(254, network.host_count());
//! assert_eq!("1.178.168.192.in-addr.arpa", address.reverse_pointer());
//! ```

pub mod error;
pub mod ipv4;

pub use crate::error::{Error, Result};
pub use crate::ipv4::bits::{
    common_prefix_length, integer_to_text, network_address, parse_address_with_prefix,
    text_to_integer,
};
pub use crate::ipv4::{Address, AddressOptions, Addresses, EnumerateOptions, Input, Network};

/// Builds an [`Address`] from text, an integer or another address.
pub fn ipv4<I: Into<Input>>(input: I) -> Result<Address> {
    Address::new(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn some_tests() {
        let a = ipv4("192.168.178.1/24").unwrap();
        assert_eq!("192.168.178.1/24", a.address_with_cidr());
        let a = ipv4(3232281089u32).unwrap();
        assert_eq!("192.168.178.1/32", a.address_with_cidr());
        let a = ipv4("10.0.0.1/8").unwrap();
        assert_eq!(a, ipv4(&a).unwrap());
        assert!(matches!(ipv4("0.1.2.3"), Err(Error::Validation(_))));
        assert_eq!(66051, text_to_integer("0.1.2.3").unwrap());
        assert_eq!("0.1.2.3", ipv4(66051u32).unwrap().address());
    }

    #[test]
    fn scenarios() {
        let n = ipv4("10.0.0.0/8").unwrap().network().clone();
        assert!(n.contains_network("10.1.2.0/24").unwrap());
        assert!(!Network::new("10.1.2.0/24").unwrap().contains_network(n).unwrap());

        let a = ipv4("192.168.178.1").unwrap();
        assert_eq!("C0A8B201", a.to_hex());
        assert_eq!("1.178.168.192.in-addr.arpa", a.reverse_pointer());

        assert_eq!(32, common_prefix_length(0x0A000001, 0x0A000001));
        assert_eq!(
            0,
            common_prefix_length(
                text_to_integer("0.0.0.0").unwrap(),
                text_to_integer("255.255.255.255").unwrap()
            )
        );
    }
}
