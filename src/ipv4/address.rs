use log::{debug, trace};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::OnceLock;

use super::bits::{self, MAX_PREFIX};
use super::{AddressOptions, Input, Network};
use crate::error::{Error, Result};

const RFC1918: [(u32, u8); 3] = [(0x0A00_0000, 8), (0xAC10_0000, 12), (0xC0A8_0000, 16)];

/// An IPv4 address together with a prefix length.
///
/// The prefix is carried alongside the address and does not change its bits;
/// [`Address::network`] applies it.
#[derive(Debug, Clone)]
pub struct Address {
    value: u32,
    prefix: u8,
    network: OnceLock<Network>,
}

impl Address {
    pub fn new<I: Into<Input>>(input: I) -> Result<Self> {
        Address::with_options(input, AddressOptions::default())
    }

    /// Builds an address from text, an integer or another address.
    ///
    /// Text whose first octet is 0 is refused unless it is `0.0.0.0` with
    /// prefix 0, 8 or 32, or `options.allow_zero_octet` is set. Integers and
    /// copies are never checked against that rule.
    pub fn with_options<I: Into<Input>>(input: I, options: AddressOptions) -> Result<Self> {
        let input = input.into();
        match Address::build(&input, options) {
            Ok(address) => {
                trace!("parsed {:?} as {}", input, address.address_with_cidr());
                Ok(address)
            }
            Err(e) => {
                debug!("rejected {} input {:?}: {}", input.kind(), input, e);
                Err(e)
            }
        }
    }

    fn build(input: &Input, options: AddressOptions) -> Result<Self> {
        match input {
            Input::Text(text) => {
                let parsed = bits::parse_address_with_prefix(text, options.prefix)?;
                let address = Address::from_parts(parsed.value, parsed.prefix);
                if !options.allow_zero_octet {
                    address.validate_zero_octet()?;
                }
                Ok(address)
            }
            Input::Integer(value) => {
                let value = bits::check_integer(*value)?;
                let prefix = bits::check_prefix(i64::from(options.prefix.unwrap_or(MAX_PREFIX)))?;
                Ok(Address::from_parts(value, prefix))
            }
            Input::Address(other) => {
                let prefix = bits::check_prefix(i64::from(options.prefix.unwrap_or(other.prefix)))?;
                Ok(Address::from_parts(other.value, prefix))
            }
            Input::Network(_) => Err(Error::Type(input.kind().to_owned())),
        }
    }

    pub(crate) fn from_parts(value: u32, prefix: u8) -> Self {
        Address {
            value,
            prefix,
            network: OnceLock::new(),
        }
    }

    fn validate_zero_octet(&self) -> Result<()> {
        if self.value >> 24 != 0 {
            return Ok(());
        }
        if self.value == 0 && [0, 8, 32].contains(&self.prefix) {
            return Ok(());
        }
        Err(Error::Validation(
            "First octet cannot be 0 (except 0.0.0.0 with /0, /8, or /32)".to_owned(),
        ))
    }

    pub fn from_integer(value: u32, prefix: u8) -> Result<Self> {
        Address::with_options(value, AddressOptions::with_prefix(prefix))
    }

    pub fn from_string(text: &str) -> Result<Self> {
        Address::new(text)
    }

    pub fn is_valid<I: Into<Input>>(input: I) -> bool {
        Address::new(input).is_ok()
    }

    /// The RFC 1918 private ranges: `10.0.0.0/8`, `172.16.0.0/12` and
    /// `192.168.0.0/16`.
    pub fn private() -> Vec<Address> {
        RFC1918
            .iter()
            .map(|&(value, prefix)| Address::from_parts(value, prefix))
            .collect()
    }

    pub fn rfc1918() -> Vec<Address> {
        Address::private()
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn address(&self) -> String {
        bits::render(self.value)
    }

    pub fn address_with_cidr(&self) -> String {
        format!("{}/{}", self.address(), self.prefix)
    }

    pub fn to_integer(&self) -> u32 {
        self.value
    }

    /// The network this address belongs to under its own prefix.
    ///
    /// Computed on first use; later calls return the same value.
    pub fn network(&self) -> &Network {
        self.network.get_or_init(|| Network::from(self))
    }

    pub fn is_in_subnet<I: Into<Input>>(&self, subnet: I) -> Result<bool> {
        Ok(Network::new(subnet)?.contains_integer(self.value))
    }

    pub fn equals<I: Into<Input>>(&self, other: I) -> Result<bool> {
        Ok(*self == Address::new(other)?)
    }

    /// Same address, whatever the prefixes.
    pub fn is_same_address<I: Into<Input>>(&self, other: I) -> Result<bool> {
        Ok(self.value == Address::new(other)?.value)
    }

    /// The following address, or `None` at `255.255.255.255`.
    pub fn next(&self) -> Option<Address> {
        self.value
            .checked_add(1)
            .map(|v| Address::from_parts(v, self.prefix))
    }

    pub fn prev(&self) -> Option<Address> {
        self.value
            .checked_sub(1)
            .map(|v| Address::from_parts(v, self.prefix))
    }

    pub fn with_prefix(&self, prefix: u8) -> Result<Address> {
        let prefix = bits::check_prefix(i64::from(prefix))?;
        Ok(Address::from_parts(self.value, prefix))
    }

    pub fn is_private(&self) -> bool {
        RFC1918
            .iter()
            .any(|&(net, prefix)| self.value & bits::prefix_mask(prefix) == net)
    }

    pub fn is_loopback(&self) -> bool {
        self.value & 0xFF00_0000 == 0x7F00_0000
    }

    pub fn is_link_local(&self) -> bool {
        self.value & 0xFFFF_0000 == 0xA9FE_0000
    }

    pub fn is_multicast(&self) -> bool {
        self.value & 0xF000_0000 == 0xE000_0000
    }

    pub fn is_reserved(&self) -> bool {
        self.value & 0xF000_0000 == 0xF000_0000
    }

    pub fn is_public(&self) -> bool {
        !(self.is_private()
            || self.is_loopback()
            || self.is_link_local()
            || self.is_multicast()
            || self.is_reserved())
    }

    /// `d.c.b.a.in-addr.arpa` for `a.b.c.d`.
    pub fn reverse_pointer(&self) -> String {
        let [a, b, c, d] = self.value.to_be_bytes();
        format!("{}.{}.{}.{}.in-addr.arpa", d, c, b, a)
    }

    pub fn to_binary(&self) -> String {
        format!("{:032b}", self.value)
    }

    pub fn to_binary_address(&self) -> String {
        let [a, b, c, d] = self.value.to_be_bytes();
        format!("{:08b}.{:08b}.{:08b}.{:08b}", a, b, c, d)
    }

    pub fn to_hex(&self) -> String {
        format!("{:08X}", self.value)
    }

    pub fn shared_prefix_length<I: Into<Input>>(&self, other: I) -> Result<u8> {
        let other = Address::new(other)?;
        Ok(bits::common_prefix_length(self.value, other.value))
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Address) -> bool {
        self.value == other.value && self.prefix == other.prefix
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.prefix.hash(state);
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Address) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Address) -> Ordering {
        (self.value, self.prefix).cmp(&(other.value, other.prefix))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let [a, b, c, d] = self.value.to_be_bytes();
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl FromStr for Address {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Address::new(s)
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Address::from_parts(u32::from(ip), MAX_PREFIX)
    }
}

impl From<&Address> for Ipv4Addr {
    fn from(address: &Address) -> Self {
        Ipv4Addr::from(address.value)
    }
}
