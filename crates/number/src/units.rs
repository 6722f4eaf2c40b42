use {
    alloy::primitives::{
        U256,
        utils::{Unit, format_units},
    },
    anyhow::{Context, Result},
};

pub trait EthUnit: std::marker::Sized {
    /// Returns the current wei amount.
    fn wei(self) -> U256;

    /// Returns the current Gwei amount as wei (i.e. 1e9 wei).
    fn gwei(self) -> U256 {
        self.wei() * Unit::GWEI.wei()
    }

    /// Returns the current Eth amount as wei (i.e. 1e18 wei).
    fn eth(self) -> U256 {
        self.wei() * Unit::ETHER.wei()
    }
}

impl EthUnit for u64 {
    fn wei(self) -> U256 {
        U256::from(self)
    }
}

impl EthUnit for u128 {
    fn wei(self) -> U256 {
        U256::from(self)
    }
}

/// Denominations accepted when parsing amounts, with the number of decimals
/// they shift a wei amount by.
pub const DENOMINATIONS: &[(&str, u8)] = &[
    ("wei", 0),
    ("kwei", 3),
    ("mwei", 6),
    ("gwei", 9),
    ("szabo", 12),
    ("finney", 15),
    ("ether", 18),
];

/// Resolves a denomination name (case insensitive, `eth` is an alias of
/// `ether`) to its canonical name and number of decimals.
pub fn denomination(name: &str) -> Option<(&'static str, u8)> {
    let name = name.to_ascii_lowercase();
    let name = if name == "eth" { "ether" } else { name.as_str() };
    DENOMINATIONS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .copied()
}

/// Formats a wei amount in the given denomination without trailing zeros,
/// e.g. `500000000000000000` wei in `ether` is `"0.5"`.
pub fn format_trimmed(amount: U256, denomination: &str) -> Result<String> {
    let formatted = format_units(amount, denomination)
        .with_context(|| format!("cannot format {amount} in {denomination}"))?;
    Ok(trim_fraction(&formatted).to_string())
}

fn trim_fraction(formatted: &str) -> &str {
    if !formatted.contains('.') {
        return formatted;
    }
    formatted.trim_end_matches('0').trim_end_matches('.')
}
