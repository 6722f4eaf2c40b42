//! Amounts of the chain's native currency.
//!
//! Amounts are always held in wei so converting a display value like `0.5`
//! ETH into the value attached to a transaction never goes through floating
//! point.

use {
    crate::units,
    alloy::primitives::{
        U256,
        utils::{ParseUnits, parse_units},
    },
    anyhow::{Context, anyhow, bail, ensure},
    serde::{Deserialize, Deserializer, Serialize, Serializer},
    std::{fmt, str::FromStr},
};

/// A non-negative amount of the native currency, stored in wei.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Amount(U256);

impl Amount {
    pub const ZERO: Self = Self(U256::ZERO);

    pub fn from_wei(wei: U256) -> Self {
        Self(wei)
    }

    pub fn wei(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parses a decimal string denominated in `denomination`, for example
    /// `parse("0.5", "ether")`.
    pub fn parse(value: &str, denomination: &str) -> anyhow::Result<Self> {
        let (name, decimals) = units::denomination(denomination)
            .ok_or_else(|| anyhow!("unknown denomination {denomination:?}"))?;
        let value = value.trim();
        ensure!(!value.is_empty(), "empty amount");
        ensure!(!value.starts_with('-'), "amount {value:?} is negative");
        if let Some((_, fraction)) = value.split_once('.') {
            ensure!(
                fraction.len() <= usize::from(decimals),
                "amount {value:?} has more than {decimals} decimals for {name}"
            );
        }
        match parse_units(value, name).with_context(|| format!("invalid amount {value:?}"))? {
            ParseUnits::U256(wei) => Ok(Self(wei)),
            ParseUnits::I256(_) => bail!("amount {value:?} is negative"),
        }
    }

    /// The amount in ETH without trailing zeros, e.g. `"0.5"`.
    pub fn to_eth_string(&self) -> String {
        // Formatting a `U256` in ether cannot fail, the fallback is only there
        // to keep this infallible.
        units::format_trimmed(self.0, "ether").unwrap_or_else(|_| format!("{} wei", self.0))
    }
}

/// Accepts a bare decimal number, which is read as ETH, or a number followed
/// by a denomination: `"0.5"`, `"0.5 ether"`, `"250 gwei"`, `"1wei"`.
impl FromStr for Amount {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (value, denomination) = s.split_at(split);
        let denomination = match denomination.trim() {
            "" => "ether",
            denomination => denomination,
        };
        Self::parse(value, denomination)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ETH", self.to_eth_string())
    }
}

impl From<U256> for Amount {
    fn from(wei: U256) -> Self {
        Self(wei)
    }
}

impl From<Amount> for U256 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{} wei", self.0))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::units::EthUnit};

    #[test]
    fn parses_half_an_ether_exactly() {
        let amount: Amount = "0.5".parse().unwrap();
        assert_eq!(amount.wei(), U256::from(500_000_000_000_000_000u64));
        assert_eq!(amount.to_eth_string(), "0.5");
        assert_eq!(amount.to_string(), "0.5 ETH");
    }

    #[test]
    fn parses_denominations() {
        assert_eq!("2 ether".parse::<Amount>().unwrap().wei(), 2u64.eth());
        assert_eq!("2ETH".parse::<Amount>().unwrap().wei(), 2u64.eth());
        assert_eq!("250 gwei".parse::<Amount>().unwrap().wei(), 250u64.gwei());
        assert_eq!("1 wei".parse::<Amount>().unwrap().wei(), U256::from(1));
    }

    #[test]
    fn keeps_full_precision() {
        let amount: Amount = "1.000000000000000001".parse().unwrap();
        assert_eq!(amount.wei(), 1u64.eth() + U256::from(1));
        assert_eq!(amount.to_eth_string(), "1.000000000000000001");
    }

    #[test]
    fn rejects_invalid_amounts() {
        assert!("-0.5".parse::<Amount>().is_err());
        assert!("0.0000000000000000001".parse::<Amount>().is_err());
        assert!("1.5 wei".parse::<Amount>().is_err());
        assert!("".parse::<Amount>().is_err());
        assert!("abc".parse::<Amount>().is_err());
        assert!("1 dogecoin".parse::<Amount>().is_err());
    }

    #[test]
    fn deserializes_from_string() {
        let amount: Amount = serde_json::from_str("\"0.25 ether\"").unwrap();
        assert_eq!(amount.to_eth_string(), "0.25");
        assert_eq!(
            serde_json::to_string(&amount).unwrap(),
            "\"250000000000000000 wei\""
        );
    }
}
