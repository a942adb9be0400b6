//! Deployer key derivation from secret URIs

use std::str::FromStr;

use subxt_signer::{sr25519::Keypair, SecretUri};

use crate::error::DeployError;

/// Public development mnemonic behind `//Alice`, `//Bob` and friends
pub const DEV_PHRASE: &str =
    "bottom drive obey lake curtain smoke basket hold race lonely fit walk";

/// Derive the sr25519 deployer keypair from a secret URI such as `//Alice`,
/// `<mnemonic>//hard/soft///password` or `0x<hex seed>`.
pub fn deployer_keypair(uri: &str) -> Result<Keypair, DeployError> {
    // Errors describe the failure only, the URI itself is secret material
    let uri = SecretUri::from_str(uri)
        .map_err(|err| DeployError::InvalidDeployerUri(err.to_string()))?;
    Keypair::from_uri(&uri).map_err(|err| DeployError::InvalidDeployerUri(err.to_string()))
}

/// Whether the URI only derives from the public development phrase
pub fn is_dev_uri(uri: &str) -> bool {
    let phrase = uri.split('/').next().unwrap_or_default().trim();
    phrase.is_empty() || phrase == DEV_PHRASE
}

#[cfg(test)]
mod tests {
    use super::*;
    use subxt_signer::sr25519::dev;

    #[test]
    fn alice_uri_matches_dev_account() {
        let keypair = deployer_keypair("//Alice").unwrap();
        assert_eq!(keypair.public_key().0, dev::alice().public_key().0);
    }

    #[test]
    fn explicit_dev_phrase_matches_shorthand() {
        let long = deployer_keypair(&format!("{DEV_PHRASE}//Bob")).unwrap();
        let short = deployer_keypair("//Bob").unwrap();
        assert_eq!(long.public_key().0, short.public_key().0);
    }

    #[test]
    fn different_junctions_give_different_keys() {
        let alice = deployer_keypair("//Alice").unwrap();
        let bob = deployer_keypair("//Bob").unwrap();
        assert_ne!(alice.public_key().0, bob.public_key().0);
    }

    #[test]
    fn bad_phrase_is_rejected() {
        let err = deployer_keypair("definitely not a mnemonic phrase").unwrap_err();
        assert!(matches!(err, DeployError::InvalidDeployerUri(_)));
        assert!(!err.to_string().contains("definitely"));
    }

    #[test]
    fn recognizes_dev_uris() {
        assert!(is_dev_uri("//Alice"));
        assert!(is_dev_uri(&format!("{DEV_PHRASE}//Charlie")));
        assert!(!is_dev_uri("legal winner thank year wave sausage worth useful legal winner thank yellow"));
    }
}
