use {
    super::pair::PairProvider,
    crate::{
        domain::{Fee, route::DEFAULT_SIGNIFICANT_DIGITS},
        query::{Asset, Pricing},
    },
    alloy::primitives::{Address, B256},
    anyhow::{Context, Result},
    number::Scale,
    serde::Deserialize,
    std::path::Path,
    tokio::fs,
    url::Url,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct File {
    /// URL of an Ethereum JSON RPC node.
    node_url: Url,

    legacy: LegacyFile,

    current: CurrentFile,

    uniswap: UniswapFile,

    /// Fee netted from the input of every hop when quoting, in basis points.
    #[serde(default)]
    route_fee_bps: u32,

    /// Number of significant digits quotes are truncated to.
    #[serde(default = "default_significant_digits")]
    significant_digits: u32,
}

fn default_significant_digits() -> u32 {
    DEFAULT_SIGNIFICANT_DIGITS
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct LegacyFile {
    auction: Address,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct CurrentFile {
    token: Address,
    staking: Address,
    auction: Address,
    big_pay_day: Address,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct UniswapFile {
    factory: Address,
    init_code_digest: B256,
    primary: AssetFile,
    native: AssetFile,
    reference: AssetFile,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct AssetFile {
    address: Address,
    decimals: u8,
}

impl From<AssetFile> for Asset {
    fn from(value: AssetFile) -> Self {
        Self {
            address: value.address,
            scale: Scale(value.decimals),
        }
    }
}

/// Contract addresses of the legacy deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Legacy {
    pub auction: Address,
}

/// Contract addresses of the current deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Current {
    pub token: Address,
    pub staking: Address,
    pub auction: Address,
    pub big_pay_day: Address,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Addresses {
    pub legacy: Legacy,
    pub current: Current,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub node_url: Url,
    pub addresses: Addresses,
    pub pairs: PairProvider,
    pub pricing: Pricing,
}

/// Load the ledger configuration from a TOML file.
pub async fn load(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path)
        .await
        .with_context(|| format!("I/O error while reading {path:?}"))?;
    parse(&data).with_context(|| format!("invalid configuration in {path:?}"))
}

fn parse(data: &str) -> Result<Config> {
    let file = toml::de::from_str::<File>(data).context("TOML syntax error")?;
    anyhow::ensure!(
        file.significant_digits > 0,
        "significant-digits must be at least 1"
    );
    Ok(Config {
        node_url: file.node_url,
        addresses: Addresses {
            legacy: Legacy {
                auction: file.legacy.auction,
            },
            current: Current {
                token: file.current.token,
                staking: file.current.staking,
                auction: file.current.auction,
                big_pay_day: file.current.big_pay_day,
            },
        },
        pairs: PairProvider {
            factory: file.uniswap.factory,
            init_code_digest: file.uniswap.init_code_digest.0,
        },
        pricing: Pricing {
            primary: file.uniswap.primary.into(),
            native: file.uniswap.native.into(),
            reference: file.uniswap.reference.into(),
            fee: Fee::from_bps(file.route_fee_bps)?,
            significant_digits: file.significant_digits,
        },
    })
}
