use alloy::{
    network::{Ethereum, EthereumWallet},
    providers::{
        Identity, ProviderBuilder, RootProvider,
        fillers::{
            ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, SimpleNonceManager,
            WalletFiller,
        },
    },
};

/// Type alias for the provider used to sign and submit load transactions.
///
/// Nonces come from [`SimpleNonceManager`], which asks the node for the
/// pending count before every submission. A failed send therefore never
/// leaves a gap behind it.
pub type LoadGenProvider = FillProvider<
    JoinFill<
        JoinFill<
            JoinFill<JoinFill<Identity, GasFiller>, NonceFiller<SimpleNonceManager>>,
            ChainIdFiller,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider,
    Ethereum,
>;

/// Connect a provider capable of filling and sending transactions to a given chain.
///
/// Any signer an [`EthereumWallet`] can wrap works here, including the
/// local-or-KMS signer built from `SIGNER_KEY`.
pub async fn connect_provider<S>(signer: S, rpc_url: &str) -> eyre::Result<LoadGenProvider>
where
    EthereumWallet: From<S>,
{
    ProviderBuilder::new()
        .disable_recommended_fillers()
        .with_gas_estimation()
        .with_nonce_management(SimpleNonceManager::default())
        .fetch_chain_id()
        .wallet(EthereumWallet::from(signer))
        .connect(rpc_url)
        .await
        .map_err(Into::into)
}
