use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

const EVM_ADDRESS_LENGTH: usize = 40;
const EVM_HASH_LENGTH: usize = 64;

/// A wallet, token or contract address in canonical form.
///
/// EVM hex addresses are lowercased so that checksummed and lowercase
/// spellings of the same address compare equal. Anything else (for example
/// base58 addresses) is case-sensitive and only trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Canonicalizes a provider-reported address. Returns `None` for blank input.
    pub fn parse(value: &str) -> Option<Self> {
        canonical_hex(value, EVM_ADDRESS_LENGTH).map(Address)
    }

    /// Wraps a value that is already in canonical form.
    pub(crate) fn from_canonical(value: &str) -> Self {
        Address(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_evm(&self) -> bool {
        is_prefixed_hex(&self.0, EVM_ADDRESS_LENGTH)
    }
}

impl Display for Address {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Address::parse(&value).ok_or_else(|| de::Error::custom("Address is an empty string"))
    }
}

/// Canonicalizes a transaction hash the same way addresses are canonicalized.
pub fn canonical_hash(value: &str) -> Option<String> {
    canonical_hex(value, EVM_HASH_LENGTH)
}

fn canonical_hex(value: &str, digits: usize) -> Option<String> {
    let value = value.trim();

    if value.is_empty() {
        return None;
    }

    if is_prefixed_hex(value, digits) {
        Some(value.to_ascii_lowercase())
    } else {
        Some(value.to_string())
    }
}

fn is_prefixed_hex(value: &str, digits: usize) -> bool {
    let Some(body) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) else {
        return false;
    };

    body.len() == digits && body.chars().all(|c| c.is_ascii_hexdigit())
}
