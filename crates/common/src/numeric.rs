use num_bigint::BigInt;

/// A type that represents the radix of an integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Hexadecimal,
    Decimal,
    Octal,
    Binary,
}

impl Radix {
    /// Returns number representation of the radix.
    pub fn as_num(self) -> u32 {
        match self {
            Self::Hexadecimal => 16,
            Self::Decimal => 10,
            Self::Octal => 8,
            Self::Binary => 2,
        }
    }
}

/// A helper type to interpret an integer literal represented by string.
///
/// Accepts `0x`, `0o`, `0b` prefixes, the legacy `0`-prefixed octal form and
/// `_` digit separators.
#[derive(Debug, Clone)]
pub struct Literal<'a> {
    /// The number part of the string, prefix stripped.
    num: &'a str,
    radix: Radix,
}

impl<'a> Literal<'a> {
    pub fn new(src: &'a str) -> Self {
        debug_assert!(!src.is_empty());
        debug_assert_ne!(src.chars().next(), Some('-'));
        let (radix, prefix_len) = match src.get(..2) {
            Some("0x" | "0X") => (Radix::Hexadecimal, 2),
            Some("0o" | "0O") => (Radix::Octal, 2),
            Some("0b" | "0B") => (Radix::Binary, 2),
            Some(_)
                if src.starts_with('0')
                    && src.bytes().all(|b| b.is_ascii_digit() || b == b'_') =>
            {
                (Radix::Octal, 1)
            }
            _ => (Radix::Decimal, 0),
        };

        Self {
            num: &src[prefix_len..],
            radix,
        }
    }

    /// Parse the literal into an arbitrary precision integer. Returns `None`
    /// for malformed digits.
    pub fn parse(&self) -> Option<BigInt> {
        let digits: String = self.num.chars().filter(|c| *c != '_').collect();
        if digits.is_empty() {
            return None;
        }
        BigInt::parse_bytes(digits.as_bytes(), self.radix.as_num())
    }

    /// Returns radix of the numeric literal.
    pub fn radix(&self) -> Radix {
        self.radix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radix() {
        assert_eq!(Literal::new("0XFF").radix(), Radix::Hexadecimal);
        assert_eq!(Literal::new("0xFF").radix(), Radix::Hexadecimal);
        assert_eq!(Literal::new("0O77").radix(), Radix::Octal);
        assert_eq!(Literal::new("0o77").radix(), Radix::Octal);
        assert_eq!(Literal::new("017").radix(), Radix::Octal);
        assert_eq!(Literal::new("0B11").radix(), Radix::Binary);
        assert_eq!(Literal::new("1").radix(), Radix::Decimal);
        assert_eq!(Literal::new("0").radix(), Radix::Decimal);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Literal::new("0xff").parse(), Some(BigInt::from(255)));
        assert_eq!(Literal::new("017").parse(), Some(BigInt::from(15)));
        assert_eq!(Literal::new("0b101").parse(), Some(BigInt::from(5)));
        assert_eq!(Literal::new("1_000").parse(), Some(BigInt::from(1000)));
        assert_eq!(Literal::new("0").parse(), Some(BigInt::from(0)));
        assert_eq!(Literal::new("0x").parse(), None);
        assert_eq!(Literal::new("12ab").parse(), None);
    }

    #[test]
    fn non_ascii_literal_is_malformed() {
        assert_eq!(Literal::new("€1").radix(), Radix::Decimal);
        assert_eq!(Literal::new("€1").parse(), None);
        assert_eq!(Literal::new("1€").parse(), None);
    }
}
