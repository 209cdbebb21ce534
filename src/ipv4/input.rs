use std::net::Ipv4Addr;

use super::{Address, Network};

/// Anything an [`Address`] or a [`Network`] can be built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// `a.b.c.d` or `a.b.c.d/p`.
    Text(String),
    /// The integer value of the address, prefix `/32`.
    Integer(i64),
    Address(Address),
    /// Only accepted where a network is expected.
    Network(Network),
}

impl Input {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Input::Text(_) => "text",
            Input::Integer(_) => "integer",
            Input::Address(_) => "address",
            Input::Network(_) => "network",
        }
    }
}

impl From<&str> for Input {
    fn from(v: &str) -> Self {
        Input::Text(v.to_owned())
    }
}

impl From<String> for Input {
    fn from(v: String) -> Self {
        Input::Text(v)
    }
}

impl From<&String> for Input {
    fn from(v: &String) -> Self {
        Input::Text(v.clone())
    }
}

impl From<u32> for Input {
    fn from(v: u32) -> Self {
        Input::Integer(i64::from(v))
    }
}

impl From<i64> for Input {
    fn from(v: i64) -> Self {
        Input::Integer(v)
    }
}

impl From<Ipv4Addr> for Input {
    fn from(v: Ipv4Addr) -> Self {
        Input::from(u32::from(v))
    }
}

impl From<Address> for Input {
    fn from(v: Address) -> Self {
        Input::Address(v)
    }
}

impl From<&Address> for Input {
    fn from(v: &Address) -> Self {
        Input::Address(v.clone())
    }
}

impl From<Network> for Input {
    fn from(v: Network) -> Self {
        Input::Network(v)
    }
}

impl From<&Network> for Input {
    fn from(v: &Network) -> Self {
        Input::Network(v.clone())
    }
}

/// How an [`Address`] is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddressOptions {
    /// Replaces the prefix of the input, whatever its kind. `None` keeps it
    /// (`/32` for integers).
    pub prefix: Option<u8>,
    /// Skips the zero-octet rule for text input. Off by default.
    pub allow_zero_octet: bool,
}

impl AddressOptions {
    pub fn with_prefix(prefix: u8) -> Self {
        AddressOptions {
            prefix: Some(prefix),
            ..Default::default()
        }
    }
}

/// How [`Network::hosts`] and [`Network::addresses`] label what they yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnumerateOptions {
    /// Give each address the network's prefix instead of `/32`.
    pub keep_prefix: bool,
}
