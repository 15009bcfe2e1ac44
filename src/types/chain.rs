use crate::types::errors::CurrencyIdError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const DEFAULT_NATIVE_ADDRESS: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

const POLYGON_NATIVE_ADDRESS: &str = "0x0000000000000000000000000000000000001010";
const CELO_NATIVE_ADDRESS: &str = "0x471ece3750da237f93b8e339c536989b8978a438";
const OP_STACK_WETH_ADDRESS: &str = "0x4200000000000000000000000000000000000006";

/// Networks the wallet can display activity for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Chain {
    Mainnet,
    ArbitrumOne,
    Optimism,
    Polygon,
    Base,
    Bnb,
    Avalanche,
    Celo,
    Blast,
    Zora,
    Zksync,
    WorldChain,
    Unichain,
    Sepolia
}

impl Chain {
    pub const ALL: [Chain; 14] = [
        Chain::Mainnet,
        Chain::ArbitrumOne,
        Chain::Optimism,
        Chain::Polygon,
        Chain::Base,
        Chain::Bnb,
        Chain::Avalanche,
        Chain::Celo,
        Chain::Blast,
        Chain::Zora,
        Chain::Zksync,
        Chain::WorldChain,
        Chain::Unichain,
        Chain::Sepolia
    ];

    pub fn id(self) -> u64 {
        match self {
            Chain::Mainnet => 1,
            Chain::ArbitrumOne => 42161,
            Chain::Optimism => 10,
            Chain::Polygon => 137,
            Chain::Base => 8453,
            Chain::Bnb => 56,
            Chain::Avalanche => 43114,
            Chain::Celo => 42220,
            Chain::Blast => 81457,
            Chain::Zora => 7777777,
            Chain::Zksync => 324,
            Chain::WorldChain => 480,
            Chain::Unichain => 130,
            Chain::Sepolia => 11155111
        }
    }

    /// Name used for the chain by the activity GraphQL API.
    pub fn backend_name(self) -> &'static str {
        match self {
            Chain::Mainnet => "ETHEREUM",
            Chain::ArbitrumOne => "ARBITRUM",
            Chain::Optimism => "OPTIMISM",
            Chain::Polygon => "POLYGON",
            Chain::Base => "BASE",
            Chain::Bnb => "BNB",
            Chain::Avalanche => "AVALANCHE",
            Chain::Celo => "CELO",
            Chain::Blast => "BLAST",
            Chain::Zora => "ZORA",
            Chain::Zksync => "ZKSYNC",
            Chain::WorldChain => "WORLDCHAIN",
            Chain::Unichain => "UNICHAIN",
            Chain::Sepolia => "ETHEREUM_SEPOLIA"
        }
    }

    /// Address the wallet uses to identify the chain's native currency.
    pub fn native_address(self) -> &'static str {
        match self {
            Chain::Polygon => POLYGON_NATIVE_ADDRESS,
            Chain::Celo => CELO_NATIVE_ADDRESS,
            _ => DEFAULT_NATIVE_ADDRESS
        }
    }

    pub fn wrapped_native_address(self) -> Option<&'static str> {
        match self {
            Chain::Mainnet => Some("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            Chain::ArbitrumOne => Some("0x82af49447d8a07e3bd95bd0d56f35241523fbab1"),
            Chain::Polygon => Some("0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270"),
            Chain::Bnb => Some("0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c"),
            Chain::Avalanche => Some("0xb31f66aa3c1e785363f0875a1b74e27b85fd66c7"),
            Chain::Blast => Some("0x4300000000000000000000000000000000000004"),
            Chain::Zksync => Some("0x5aea5775959fbc2557cc8789bc1bf90a239d9a91"),
            Chain::Sepolia => Some("0xfff9976782d46cc05630d1f6ebab18b2324d6b14"),
            Chain::Optimism | Chain::Base | Chain::Zora | Chain::WorldChain | Chain::Unichain => Some(OP_STACK_WETH_ADDRESS),
            Chain::Celo => None
        }
    }

    pub fn from_id(id: u64) -> Option<Chain> {
        Chain::ALL.into_iter().find(|chain| chain.id() == id)
    }

    pub fn from_backend_name(name: &str) -> Option<Chain> {
        let name = name.trim();
        Chain::ALL.into_iter().find(|chain| chain.backend_name().eq_ignore_ascii_case(name))
    }
}

impl Display for Chain {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.id())
    }
}

impl FromStr for Chain {
    type Err = CurrencyIdError;

    /// Accepts either a backend chain name (`ARBITRUM`) or a decimal chain id (`42161`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(CurrencyIdError::InvalidFormat("Chain is an empty string".to_string()));
        }

        if value.chars().all(|c| c.is_ascii_digit()) {
            let id: u64 = value.parse()?;
            return Chain::from_id(id).ok_or_else(|| CurrencyIdError::UnsupportedChain(value.to_string()));
        }

        Chain::from_backend_name(value).ok_or_else(|| CurrencyIdError::UnsupportedChain(value.to_string()))
    }
}

impl Serialize for Chain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.id())
    }
}

impl<'de> Deserialize<'de> for Chain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = u64::deserialize(deserializer)?;
        Chain::from_id(id).ok_or_else(|| de::Error::custom(format!("Unsupported chain id [{id}]")))
    }
}
