use alloy::primitives::{
    Address, U256,
    utils::{ParseUnits, parse_units},
};
use eyre::{Result, bail, eyre};
use init4_bin_base::utils::{
    from_env::{FromEnv, OptionalU64WithDefault},
    signer::LocalOrAwsConfig,
};
use std::time::Duration;

/// Delay between submissions when `DELAY_MS` is unset.
pub const DEFAULT_DELAY_MS: u64 = 10;
/// Value per transaction, in wei, when `TX_VALUE` is unset.
pub const DEFAULT_TX_VALUE_WEI: &str = "1";
/// Gas price, in gwei, when `GAS_PRICE` is unset.
pub const DEFAULT_GAS_PRICE_GWEI: &str = "5";

/// Environment configuration for the load generator.
#[derive(Debug, Clone, FromEnv)]
pub struct LoadGenConfig {
    /// Key used to sign every submitted transaction.
    /// .env var: SIGNER_KEY
    pub signer_config: LocalOrAwsConfig,
    #[from_env(var = "DELAY_MS", desc = "Time to sleep between transactions, in ms")]
    delay_ms: OptionalU64WithDefault<DEFAULT_DELAY_MS>,
    #[from_env(var = "TX_VALUE", desc = "Value sent with each transaction, in wei", optional)]
    tx_value: Option<String>,
    #[from_env(var = "GAS_PRICE", desc = "Legacy gas price, in gwei", optional)]
    gas_price: Option<String>,
    #[from_env(
        var = "TO_ADDRESS",
        desc = "Recipient address. Defaults to the sender",
        optional
    )]
    to_address: Option<Address>,
}

impl LoadGenConfig {
    /// Resolve defaults and unit conversions.
    pub fn settings(&self) -> Result<TxSettings> {
        TxSettings::resolve(
            Some(self.delay_ms.into_inner()),
            self.tx_value.as_deref(),
            self.gas_price.as_deref(),
            self.to_address,
        )
    }
}

/// Fully resolved per-transaction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxSettings {
    /// Pause after every submission attempt.
    pub delay: Duration,
    /// Value per transaction, in wei.
    pub value: U256,
    /// Legacy gas price, in wei.
    pub gas_price: u128,
    /// Explicit recipient. `None` sends to the signer itself.
    pub to: Option<Address>,
}

impl TxSettings {
    /// Apply defaults to raw configuration values.
    ///
    /// `value` is denominated in wei and `gas_price` in gwei. Both accept
    /// decimal strings; negative or malformed amounts are errors.
    pub fn resolve(
        delay_ms: Option<u64>,
        value: Option<&str>,
        gas_price: Option<&str>,
        to: Option<Address>,
    ) -> Result<Self> {
        let value = value.unwrap_or(DEFAULT_TX_VALUE_WEI);
        let gas_price = gas_price.unwrap_or(DEFAULT_GAS_PRICE_GWEI);

        let gas_price_wei = parse_amount(gas_price, "gwei")?;
        let gas_price = u128::try_from(gas_price_wei)
            .map_err(|_| eyre!("gas price out of range: {gas_price} gwei"))?;

        Ok(Self {
            delay: Duration::from_millis(delay_ms.unwrap_or(DEFAULT_DELAY_MS)),
            value: parse_amount(value, "wei")?,
            gas_price,
            to,
        })
    }

    /// The recipient for transactions sent by `sender`.
    pub fn recipient(&self, sender: Address) -> Address {
        self.to.unwrap_or(sender)
    }
}

fn parse_amount(amount: &str, unit: &str) -> Result<U256> {
    match parse_units(amount.trim(), unit)
        .map_err(|e| eyre!("invalid amount {amount:?} {unit}: {e}"))?
    {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => bail!("amount must not be negative: {amount} {unit}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use std::sync::Mutex;

    #[test]
    fn defaults() {
        let settings = TxSettings::resolve(None, None, None, None).unwrap();
        assert_eq!(settings.delay, Duration::from_millis(10));
        assert_eq!(settings.value, U256::from(1));
        assert_eq!(settings.gas_price, 5_000_000_000);
        assert_eq!(settings.to, None);
    }

    #[test]
    fn explicit_values() {
        let to = address!("0x608Bf7a39D943263c28417a6Cb966E9b269bD90F");
        let settings =
            TxSettings::resolve(Some(250), Some("1000"), Some("0.5"), Some(to)).unwrap();
        assert_eq!(settings.delay, Duration::from_millis(250));
        assert_eq!(settings.value, U256::from(1000));
        assert_eq!(settings.gas_price, 500_000_000);
        assert_eq!(settings.recipient(Address::ZERO), to);
    }

    #[test]
    fn recipient_defaults_to_sender() {
        let sender = address!("0x00000000000000000000000000000000000000aa");
        let settings = TxSettings::resolve(None, None, None, None).unwrap();
        assert_eq!(settings.recipient(sender), sender);
    }

    #[test]
    fn rejects_bad_amounts() {
        assert!(TxSettings::resolve(None, Some("one"), None, None).is_err());
        assert!(TxSettings::resolve(None, None, Some("cheap"), None).is_err());
        assert!(TxSettings::resolve(None, None, Some("-1"), None).is_err());
    }

    /// Tests below mutate the process environment, so they take this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ANVIL_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const VARS: &[&str] = &["SIGNER_KEY", "DELAY_MS", "TX_VALUE", "GAS_PRICE", "TO_ADDRESS"];

    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        // SAFETY: every test touching these variables holds ENV_LOCK.
        unsafe {
            for var in VARS {
                std::env::remove_var(var);
            }
            for (var, value) in vars {
                std::env::set_var(var, value);
            }
        }
        f()
    }

    #[test]
    fn env_defaults() {
        let settings = with_env(&[("SIGNER_KEY", ANVIL_KEY)], || {
            LoadGenConfig::from_env().unwrap().settings().unwrap()
        });
        assert_eq!(settings.delay, Duration::from_millis(DEFAULT_DELAY_MS));
        assert_eq!(settings.value, U256::from(1));
        assert_eq!(settings.gas_price, 5_000_000_000);

        let sender = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(settings.recipient(sender), sender);
    }

    #[test]
    fn env_explicit_values() {
        let settings = with_env(
            &[
                ("SIGNER_KEY", ANVIL_KEY),
                ("DELAY_MS", "0"),
                ("TX_VALUE", "42"),
                ("GAS_PRICE", "1.5"),
                ("TO_ADDRESS", "0x608Bf7a39D943263c28417a6Cb966E9b269bD90F"),
            ],
            || LoadGenConfig::from_env().unwrap().settings().unwrap(),
        );
        assert_eq!(settings.delay, Duration::ZERO);
        assert_eq!(settings.value, U256::from(42));
        assert_eq!(settings.gas_price, 1_500_000_000);
        assert_eq!(
            settings.to,
            Some(address!("0x608Bf7a39D943263c28417a6Cb966E9b269bD90F"))
        );
    }

    #[test]
    fn missing_signer_key_is_fatal() {
        let res = with_env(&[], LoadGenConfig::from_env);
        assert!(res.is_err());
    }

    #[test]
    fn malformed_env_values_are_fatal() {
        let bad_address = with_env(
            &[("SIGNER_KEY", ANVIL_KEY), ("TO_ADDRESS", "not-an-address")],
            LoadGenConfig::from_env,
        );
        assert!(bad_address.is_err());

        let bad_value = with_env(&[("SIGNER_KEY", ANVIL_KEY), ("TX_VALUE", "lots")], || {
            LoadGenConfig::from_env().unwrap().settings()
        });
        assert!(bad_value.is_err());
    }
}
