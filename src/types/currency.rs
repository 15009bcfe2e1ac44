use crate::types::address::Address;
use crate::types::chain::{Chain, DEFAULT_NATIVE_ADDRESS, ZERO_ADDRESS};
use crate::types::errors::CurrencyIdError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStandard {
    Native,
    Erc20,
    Erc721,
    Erc1155
}

impl TokenStandard {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "NATIVE" => Some(TokenStandard::Native),
            "ERC20" => Some(TokenStandard::Erc20),
            "ERC721" => Some(TokenStandard::Erc721),
            "ERC1155" => Some(TokenStandard::Erc1155),
            _ => None
        }
    }

    pub fn is_fungible(self) -> bool {
        matches!(self, TokenStandard::Native | TokenStandard::Erc20)
    }
}

/// Lookup key for an asset: the chain it lives on plus its canonical address.
///
/// Renders as `<chainId>-<address>`, which is also its serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyId {
    pub chain: Chain,
    pub address: Address
}

impl CurrencyId {
    pub fn new(chain: Chain, address: Address) -> Self {
        Self { chain, address }
    }

    pub fn native(chain: Chain) -> Self {
        Self {
            chain,
            address: Address::from_canonical(chain.native_address())
        }
    }

    pub fn is_native(&self) -> bool {
        self.address.as_str() == self.chain.native_address()
    }

    pub fn is_wrapped_native(&self) -> bool {
        self.chain.wrapped_native_address() == Some(self.address.as_str())
    }
}

impl Display for CurrencyId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}-{}", self.chain.id(), self.address)
    }
}

impl FromStr for CurrencyId {
    type Err = CurrencyIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (chain, address) = value.trim().split_once('-')
            .ok_or_else(|| CurrencyIdError::InvalidFormat(format!("Value [{value}] is missing a chain separator")))?;

        let chain_id: u64 = chain.parse()?;
        let chain = Chain::from_id(chain_id).ok_or_else(|| CurrencyIdError::UnsupportedChain(chain.to_string()))?;
        let address = Address::parse(address)
            .ok_or_else(|| CurrencyIdError::InvalidFormat(format!("Value [{value}] has an empty address")))?;

        Ok(CurrencyId::new(chain, address))
    }
}

impl Serialize for CurrencyId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CurrencyId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        CurrencyId::from_str(&value).map_err(de::Error::custom)
    }
}

/// Canonicalizes a provider-reported `(chain, tokenStandard, address)` triple.
///
/// Returns `None` when the chain or token standard is not supported, or when a
/// non-native asset is reported without an address. Normalizing an already
/// canonical pair returns it unchanged.
pub fn normalize_currency(chain: &str, token_standard: &str, address: Option<&str>) -> Option<CurrencyId> {
    let chain = Chain::from_str(chain).ok()?;
    let standard = TokenStandard::parse(token_standard)?;

    normalize_for_chain(chain, standard, address)
}

pub fn normalize_for_chain(chain: Chain, standard: TokenStandard, address: Option<&str>) -> Option<CurrencyId> {
    if standard == TokenStandard::Native {
        return Some(CurrencyId::native(chain));
    }

    let address = Address::parse(address?)?;

    if standard.is_fungible() && is_native_placeholder(&address) {
        return Some(CurrencyId::native(chain));
    }

    Some(CurrencyId::new(chain, address))
}

fn is_native_placeholder(address: &Address) -> bool {
    matches!(address.as_str(), ZERO_ADDRESS | DEFAULT_NATIVE_ADDRESS)
}
