use thiserror::Error as ThisError;

/// Errors raised while building addresses and networks.
///
/// Each variant separates one class of bad input so callers can tell a
/// malformed string from a number out of range or a rejected address.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// The input is not something an address can be built from.
    #[error("Invalid IPv4 address type: {0}")]
    Type(String),
    /// The text does not follow the dotted-decimal / CIDR grammar.
    #[error("{0}")]
    Format(String),
    /// A number is outside its legal range.
    #[error("{0}")]
    Range(String),
    /// A well-formed address was refused by the zero-octet rule.
    #[error("{0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            "Invalid IPv4 address type: network",
            Error::Type("network".to_owned()).to_string()
        );
        assert_eq!(
            "Octet 999 is out of range (0-255)",
            Error::Range("Octet 999 is out of range (0-255)".to_owned()).to_string()
        );
    }
}
