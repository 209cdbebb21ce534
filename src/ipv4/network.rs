use std::fmt::{self, Display, Formatter};
use std::iter::FusedIterator;
use std::str::FromStr;

use super::bits::{self, MAX_PREFIX};
use super::{Address, EnumerateOptions, Input};
use crate::error::{Error, Result};

/// A CIDR block: a base address with every host bit cleared, and a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Network {
    base: u32,
    prefix: u8,
}

impl Network {
    /// Builds the network of any address input, or copies a network.
    pub fn new<I: Into<Input>>(input: I) -> Result<Self> {
        match input.into() {
            Input::Network(net) => Ok(net),
            Input::Address(address) => Ok(Network::from(&address)),
            other => Ok(Network::from(&Address::new(other)?)),
        }
    }

    pub fn address(&self) -> String {
        bits::render(self.base)
    }

    pub fn address_with_cidr(&self) -> String {
        format!("{}/{}", self.address(), self.prefix)
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn to_integer(&self) -> u32 {
        self.base
    }

    /// Number of addresses in the block, `2^(32 - prefix)`.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_PREFIX - self.prefix)
    }

    fn last(&self) -> u32 {
        self.base | bits::host_mask(self.prefix)
    }

    /// `None` for /31 and /32, which have no host range.
    pub fn first_host(&self) -> Option<Address> {
        if self.prefix >= 31 {
            return None;
        }
        Some(Address::from_parts(self.base + 1, MAX_PREFIX))
    }

    pub fn last_host(&self) -> Option<Address> {
        if self.prefix >= 31 {
            return None;
        }
        Some(Address::from_parts(self.last() - 1, MAX_PREFIX))
    }

    /// The last address of the block, also for /31 and /32.
    pub fn broadcast(&self) -> Address {
        Address::from_parts(self.last(), MAX_PREFIX)
    }

    pub fn netmask(&self) -> Address {
        Address::from_parts(bits::prefix_mask(self.prefix), MAX_PREFIX)
    }

    /// Host bits set, e.g. `0.0.0.255` for a /24.
    pub fn hostmask(&self) -> Address {
        Address::from_parts(bits::host_mask(self.prefix), MAX_PREFIX)
    }

    /// Usable hosts: the size minus network and broadcast, 0 below 3.
    pub fn host_count(&self) -> u64 {
        match self.size() {
            s if s <= 2 => 0,
            s => s - 2,
        }
    }

    pub(crate) fn contains_integer(&self, value: u32) -> bool {
        value & bits::prefix_mask(self.prefix) == self.base
    }

    pub fn contains<I: Into<Input>>(&self, address: I) -> Result<bool> {
        Ok(self.contains_integer(Address::new(address)?.to_integer()))
    }

    /// Whether the two blocks share at least one address.
    pub fn overlaps<I: Into<Input>>(&self, other: I) -> Result<bool> {
        let other = Network::new(other)?;
        Ok(self.base <= other.last() && other.base <= self.last())
    }

    /// Whether every address of `other` is in this block.
    pub fn contains_network<I: Into<Input>>(&self, other: I) -> Result<bool> {
        let other = Network::new(other)?;
        Ok(self.encloses(&other))
    }

    fn encloses(&self, other: &Network) -> bool {
        self.base <= other.base && other.last() <= self.last()
    }

    pub fn is_subnet_of<I: Into<Input>>(&self, other: I) -> Result<bool> {
        Ok(Network::new(other)?.encloses(self))
    }

    pub fn is_supernet_of<I: Into<Input>>(&self, other: I) -> Result<bool> {
        self.contains_network(other)
    }

    pub fn shared_prefix_length<I: Into<Input>>(&self, other: I) -> Result<u8> {
        let other = Network::new(other)?;
        Ok(bits::common_prefix_length(self.base, other.base))
    }

    /// Same base and prefix. Address inputs are compared as given, without
    /// masking their host bits.
    pub fn equals<I: Into<Input>>(&self, other: I) -> Result<bool> {
        let (value, prefix) = match other.into() {
            Input::Network(net) => (net.base, net.prefix),
            other => {
                let address = Address::new(other)?;
                (address.to_integer(), address.prefix())
            }
        };
        Ok(self.base == value && self.prefix == prefix)
    }

    /// Lazily yields the addresses strictly between network and broadcast.
    /// Empty for /31 and /32.
    pub fn hosts(&self, options: EnumerateOptions) -> Addresses {
        let (start, end) = if self.prefix >= 31 {
            (0, 0)
        } else {
            (u64::from(self.base) + 1, u64::from(self.last()))
        };
        Addresses::new(start, end, self.label(options))
    }

    /// Lazily yields every address of the block, network and broadcast
    /// included.
    pub fn addresses(&self, options: EnumerateOptions) -> Addresses {
        let start = u64::from(self.base);
        Addresses::new(start, start + self.size(), self.label(options))
    }

    fn label(&self, options: EnumerateOptions) -> u8 {
        if options.keep_prefix {
            self.prefix
        } else {
            MAX_PREFIX
        }
    }
}

impl From<&Address> for Network {
    fn from(address: &Address) -> Self {
        Network {
            base: address.to_integer() & bits::prefix_mask(address.prefix()),
            prefix: address.prefix(),
        }
    }
}

impl From<Address> for Network {
    fn from(address: Address) -> Self {
        Network::from(&address)
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}/{}", bits::render(self.base), self.prefix)
    }
}

impl FromStr for Network {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Network::new(s)
    }
}

/// Iterator returned by [`Network::hosts`] and [`Network::addresses`].
#[derive(Debug, Clone)]
pub struct Addresses {
    next: u64,
    end: u64,
    prefix: u8,
}

impl Addresses {
    fn new(next: u64, end: u64, prefix: u8) -> Self {
        Addresses { next, end, prefix }
    }

    fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.next)
    }
}

impl Iterator for Addresses {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        if self.next >= self.end {
            return None;
        }
        let value = self.next as u32;
        self.next += 1;
        Some(Address::from_parts(value, self.prefix))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        if n > usize::MAX as u64 {
            (usize::MAX, None)
        } else {
            (n as usize, Some(n as usize))
        }
    }

    fn nth(&mut self, n: usize) -> Option<Address> {
        self.next = self.next.saturating_add(n as u64).min(self.end);
        self.next()
    }
}

impl DoubleEndedIterator for Addresses {
    fn next_back(&mut self) -> Option<Address> {
        if self.next >= self.end {
            return None;
        }
        self.end -= 1;
        Some(Address::from_parts(self.end as u32, self.prefix))
    }
}

impl FusedIterator for Addresses {}
