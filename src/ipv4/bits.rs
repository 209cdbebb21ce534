//! Conversions between dotted-decimal text and `u32`, plus the mask
//! arithmetic shared by [`Address`](super::Address) and
//! [`Network`](super::Network).

use lazy_static::lazy_static;
use regex::Regex;
use std::convert::TryFrom;

use crate::error::{Error, Result};

pub const MAX_PREFIX: u8 = 32;

lazy_static! {
    static ref DECIMAL: Regex = Regex::new(r"^[+-]?[0-9]+$").expect("Not possible");
}

/// Result of [`parse_address_with_prefix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub address: String,
    pub value: u32,
    pub prefix: u8,
}

/// An address given either as its integer value or as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Raw<'a> {
    Integer(i64),
    Text(&'a str),
}

impl From<u32> for Raw<'_> {
    fn from(v: u32) -> Self {
        Raw::Integer(i64::from(v))
    }
}

impl From<i64> for Raw<'_> {
    fn from(v: i64) -> Self {
        Raw::Integer(v)
    }
}

impl<'a> From<&'a str> for Raw<'a> {
    fn from(v: &'a str) -> Self {
        Raw::Text(v)
    }
}

/// `None` if the token is not a decimal integer, `Some(None)` if it is one
/// but does not fit in an `i64`.
fn decimal(token: &str) -> Option<Option<i64>> {
    if !DECIMAL.is_match(token) {
        return None;
    }
    Some(token.parse::<i64>().ok())
}

fn octet(token: &str) -> Result<u32> {
    match decimal(token) {
        None => Err(Error::Format(format!("Octet \"{}\" is not a valid integer", token))),
        Some(Some(n)) if (0..=255).contains(&n) => Ok(n as u32),
        Some(Some(n)) => Err(Error::Range(format!("Octet {} is out of range (0-255)", n))),
        Some(None) => Err(Error::Range(format!("Octet {} is out of range (0-255)", token))),
    }
}

pub(crate) fn check_prefix(prefix: i64) -> Result<u8> {
    if (0..=i64::from(MAX_PREFIX)).contains(&prefix) {
        Ok(prefix as u8)
    } else {
        Err(Error::Range(format!("Prefix {} is out of range (0-32)", prefix)))
    }
}

fn parse_prefix(token: &str) -> Result<u8> {
    match decimal(token) {
        None => Err(Error::Format(format!("Prefix \"{}\" is not a valid integer", token))),
        Some(Some(n)) => check_prefix(n),
        Some(None) => Err(Error::Range(format!("Prefix {} is out of range (0-32)", token))),
    }
}

pub(crate) fn check_integer(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::Range(format!("Invalid IPv4 integer: {}", value)))
}

fn split_prefix(text: &str) -> Result<(&str, Option<&str>)> {
    let parts: Vec<&str> = text.splitn(3, '/').collect();
    match parts[..] {
        [address] => Ok((address, None)),
        [address, prefix] => Ok((address, Some(prefix))),
        _ => Err(Error::Format(
            "Invalid IPv4 address format: too many \"/\" separators".to_owned(),
        )),
    }
}

/// Parses dotted-decimal text into its integer value.
///
/// A single trailing `/prefix` is accepted and ignored.
pub fn text_to_integer(text: &str) -> Result<u32> {
    let (address, _) = split_prefix(text)?;
    let octets: Vec<&str> = address.split('.').collect();
    if octets.len() != 4 {
        return Err(Error::Format("IPv4 address must have exactly 4 octets".to_owned()));
    }
    octets.iter().try_fold(0u32, |acc, token| -> Result<u32> {
        Ok((acc << 8) | octet(token)?)
    })
}

pub fn integer_to_text(value: i64) -> Result<String> {
    Ok(render(check_integer(value)?))
}

pub(crate) fn render(value: u32) -> String {
    let [a, b, c, d] = value.to_be_bytes();
    format!("{}.{}.{}.{}", a, b, c, d)
}

/// Parses `a.b.c.d[/p]`.
///
/// The prefix defaults to 32. A `prefix_override` replaces whatever prefix
/// the text carries, without looking at it.
pub fn parse_address_with_prefix(text: &str, prefix_override: Option<u8>) -> Result<ParsedAddress> {
    let (address, prefix_text) = split_prefix(text)?;
    let prefix = match (prefix_override, prefix_text) {
        (Some(p), _) => check_prefix(i64::from(p))?,
        (None, Some(p)) => parse_prefix(p)?,
        (None, None) => MAX_PREFIX,
    };
    let value = text_to_integer(address)?;
    Ok(ParsedAddress {
        address: render(value),
        value,
        prefix,
    })
}

/// Mask with the top `prefix` bits set. `prefix` must be at most 32.
pub fn prefix_mask(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (MAX_PREFIX - prefix.min(MAX_PREFIX))
    }
}

/// Complement of [`prefix_mask`]: the host bits of a `/prefix` network.
pub fn host_mask(prefix: u8) -> u32 {
    !prefix_mask(prefix)
}

/// Clears the host bits of `ip` for the given prefix.
pub fn network_address<'a, R: Into<Raw<'a>>>(ip: R, prefix: i64) -> Result<u32> {
    let ip = match ip.into() {
        Raw::Integer(v) => check_integer(v)?,
        Raw::Text(t) => text_to_integer(t)?,
    };
    let prefix = check_prefix(prefix)?;
    Ok(ip & prefix_mask(prefix))
}

pub fn common_prefix_length(a: u32, b: u32) -> u8 {
    (a ^ b).leading_zeros() as u8
}
