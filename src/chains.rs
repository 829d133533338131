use std::{collections::BTreeMap, fmt};

/// A network the generator can target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    /// Human readable network name.
    pub name: String,
    /// HTTP RPC endpoint.
    pub rpc: String,
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.rpc)
    }
}

/// Built-in networks: menu number, name, RPC override variable, default RPC.
const TESTNETS: &[(u32, &str, &str, &str)] = &[
    (1, "Rari Testnet", "RARI_TESTNET_RPC", "https://rari-testnet.calderachain.xyz/http"),
    (2, "LogX Testnet", "LOGX_TESTNET_RPC", "https://kartel-testnet.alt.technology"),
    (3, "Appchain Testnet", "APPCHAIN_TESTNET_RPC", "https://appchaintestnet.rpc.caldera.xyz"),
    (
        4,
        "NodeOps Testnet",
        "NODEOPS_TESTNET_RPC",
        "https://nodeops-orchestrator-network.calderachain.xyz/http",
    ),
    (
        5,
        "Apechain Testnet",
        "APECHAIN_TESTNET_RPC",
        "https://apechain-testnet.rpc.caldera.xyz/http",
    ),
    (
        6,
        "Rufus Testnet",
        "RUFUS_TESTNET_RPC",
        "https://rufus-sepolia-testnet.rpc.caldera.xyz/http",
    ),
    (7, "T3rn Testnet", "T3RN_TESTNET_RPC", "https://brn-testnet.rpc.caldera.xyz/http"),
    (8, "Huddle01", "HUDDLE01_RPC", "https://huddle-testnet.rpc.caldera.xyz/http"),
    (9, "Custom Network", "CUSTOM_RPC", "https://your-custom-rpc-endpoint.com"),
];

const MAINNETS: &[(u32, &str, &str, &str)] = &[
    (10, "Rari Mainnet", "RARI_MAINNET_RPC", "https://rari.calderachain.xyz/http"),
    (11, "LogX Mainnet", "LOGX_MAINNET_RPC", "https://vzjuxmhfn70kgnlds27h.alt.technology"),
    (12, "Appchain Mainnet", "APPCHAIN_MAINNET_RPC", "https://appchain.calderachain.xyz/http"),
    (13, "Molten Mainnet", "MOLTEN_MAINNET_RPC", "https://molten.calderachain.xyz/http"),
];

fn resolve<F>(entries: &[(u32, &str, &str, &str)], lookup: &F) -> BTreeMap<u32, Chain>
where
    F: Fn(&str) -> Option<String>,
{
    entries
        .iter()
        .map(|&(key, name, var, default)| {
            let rpc = lookup(var)
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| default.to_owned());
            (key, Chain { name: name.to_owned(), rpc })
        })
        .collect()
}

/// The selectable networks, grouped the way the menu presents them.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    testnets: BTreeMap<u32, Chain>,
    mainnets: BTreeMap<u32, Chain>,
}

impl ChainRegistry {
    /// Build the built-in registry, reading RPC overrides from the process
    /// environment.
    pub fn from_env() -> Self {
        Self::with_overrides(|var| std::env::var(var).ok())
    }

    /// Build the built-in registry, resolving each RPC override through
    /// `lookup`. Empty overrides are ignored.
    pub fn with_overrides<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            testnets: resolve(TESTNETS, &lookup),
            mainnets: resolve(MAINNETS, &lookup),
        }
    }

    /// Testnets in menu order.
    pub fn testnets(&self) -> impl Iterator<Item = (u32, &Chain)> {
        self.testnets.iter().map(|(k, c)| (*k, c))
    }

    /// Mainnets in menu order.
    pub fn mainnets(&self) -> impl Iterator<Item = (u32, &Chain)> {
        self.mainnets.iter().map(|(k, c)| (*k, c))
    }

    /// Look up a menu selection across both groups.
    pub fn get(&self, selection: u32) -> Option<&Chain> {
        self.testnets
            .get(&selection)
            .or_else(|| self.mainnets.get(&selection))
    }

    /// Lowest and highest selectable menu numbers.
    pub fn selection_range(&self) -> Option<(u32, u32)> {
        let keys = || self.testnets.keys().chain(self.mainnets.keys()).copied();
        Some((keys().min()?, keys().max()?))
    }
}
