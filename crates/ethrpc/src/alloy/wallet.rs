use {
    alloy::signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English},
    anyhow::{Context, Result},
};

/// Mnemonic of the accounts that development nodes (Hardhat, Anvil) fund by
/// default.
pub const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// Parses a hex encoded secp256k1 private key, with or without `0x` prefix.
pub fn private_key_signer(private_key: &str) -> Result<PrivateKeySigner> {
    // Not including the parse error because it could leak the key.
    private_key
        .trim()
        .parse()
        .ok()
        .context("private key is not a valid 32 byte hex string")
}

/// Returns the `index`th account of the development mnemonic.
pub fn dev_signer(index: u32) -> Result<PrivateKeySigner> {
    MnemonicBuilder::<English>::default()
        .phrase(DEV_MNEMONIC)
        .index(index)?
        .build()
        .context("failed to derive development account")
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address};

    #[test]
    fn derives_development_accounts() {
        assert_eq!(
            dev_signer(0).unwrap().address(),
            address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
        assert_eq!(
            dev_signer(1).unwrap().address(),
            address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
        );
    }

    #[test]
    fn parses_private_keys() {
        let key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        let signer = private_key_signer(key).unwrap();
        assert_eq!(
            signer.address(),
            address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
        assert_eq!(
            private_key_signer(key.trim_start_matches("0x"))
                .unwrap()
                .address(),
            signer.address()
        );
        assert!(private_key_signer("0x1234").is_err());
    }
}
