use helpers::{ss58, token::initials};
use num::BigUint;
use tests::{deploy, setup, test_config};

#[tokio::test]
#[ignore = "needs a running contracts node and BHC_TEST_ARTIFACT"]
async fn deploys_generated_token() -> anyhow::Result<()> {
    let config = helpers::DeployConfig {
        deployer_uri: "//Alice".to_owned(),
        total_supply: BigUint::from(5u32),
        decimals: 2,
        name: None,
        ..test_config()?
    };
    let setup = setup(&config).await?;

    let (token, contract) = deploy(&setup, &config).await?;

    assert_eq!(token.name.split(' ').count(), 2, "name {:?}", token.name);
    assert_eq!(token.symbol, initials(&token.name));
    assert_eq!(token.decimals, 2);
    assert_eq!(token.supply, BigUint::from(500u32));

    // The printed address must round-trip in the chain's own format
    let (prefix, account) = ss58::decode(&contract.address)?;
    assert_eq!(prefix, setup.client.ss58_prefix());
    assert_eq!(account, contract.account);
    Ok(())
}

#[tokio::test]
#[ignore = "needs a running contracts node and BHC_TEST_ARTIFACT"]
async fn repeated_deployments_get_distinct_addresses() -> anyhow::Result<()> {
    let config = helpers::DeployConfig {
        name: Some("Quiet Fox".to_owned()),
        ..test_config()?
    };
    let setup = setup(&config).await?;

    let (first_token, first) = deploy(&setup, &config).await?;
    let (second_token, second) = deploy(&setup, &config).await?;

    assert_eq!(first_token, second_token);
    assert_eq!(first_token.symbol, "QF");
    assert_ne!(first.address, second.address);
    Ok(())
}

#[tokio::test]
#[ignore = "needs a running contracts node and BHC_TEST_ARTIFACT"]
async fn oversized_supply_is_rejected_before_submission() -> anyhow::Result<()> {
    let config = helpers::DeployConfig {
        decimals: 40,
        ..test_config()?
    };
    let setup = setup(&config).await?;

    let err = deploy(&setup, &config).await.unwrap_err();
    assert!(
        matches!(
            err.downcast_ref::<helpers::DeployError>(),
            Some(helpers::DeployError::SupplyOverflow(_))
        ),
        "{err:#}"
    );
    Ok(())
}

#[tokio::test]
#[ignore = "needs a running contracts node and BHC_TEST_ARTIFACT"]
async fn out_of_gas_instantiation_is_a_dispatch_error() -> anyhow::Result<()> {
    let config = helpers::DeployConfig {
        gas_limit: 1,
        ..test_config()?
    };
    let setup = setup(&config).await?;

    let err = deploy(&setup, &config).await.unwrap_err();
    assert!(
        matches!(
            err.downcast_ref::<helpers::DeployError>(),
            Some(helpers::DeployError::Dispatch(_))
        ),
        "{err:#}"
    );
    Ok(())
}
