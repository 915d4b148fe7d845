#![cfg(test)]
extern crate std;
use super::*;
use soroban_sdk::{testutils::Address as _, Address, Env};

// Helper function: create contract and client
fn create_staking_pool(env: &Env) -> (StakingPoolClient, Address) {
    let admin = Address::generate(env);
    let contract_address = env.register(StakingPool, (&admin,));
    let client = StakingPoolClient::new(env, &contract_address);
    (client, admin)
}

// Helper function: wire a cover contract address so allocation is enabled
fn with_cover_contract(env: &Env, client: &StakingPoolClient) -> Address {
    let cover_contract = Address::generate(env);
    client.set_cover_contract_by_admin(&cover_contract);
    cover_contract
}

// ==================== Initialization Tests ====================

#[test]
fn test_constructor_sets_admin() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, admin) = create_staking_pool(&env);

    assert_eq!(client.admin(), admin);
    assert_eq!(client.cover_contract(), None);
    assert!(!client.has_product(&1));
}

// ==================== Product Management Tests ====================

#[test]
fn test_add_product_and_query() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = create_staking_pool(&env);

    client.add_product_by_admin(&1, &1_000_000, &260);

    assert!(client.has_product(&1));
    let product = client.product(&1);
    assert_eq!(product.capacity, 1_000_000);
    assert_eq!(product.target_price_ratio, 260);
    assert_eq!(product.active_cover, 0);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #404)")]
fn test_add_product_duplicate() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = create_staking_pool(&env);

    client.add_product_by_admin(&1, &1_000_000, &260);
    client.add_product_by_admin(&1, &2_000_000, &300);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #402)")]
fn test_add_product_rejects_zero_capacity() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = create_staking_pool(&env);

    client.add_product_by_admin(&1, &0, &260);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #402)")]
fn test_add_product_rejects_negative_ratio() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = create_staking_pool(&env);

    client.add_product_by_admin(&1, &1_000_000, &-1);
}

#[test]
fn test_update_product_preserves_active_cover() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = create_staking_pool(&env);
    with_cover_contract(&env, &client);

    client.add_product_by_admin(&1, &1_000_000, &260);
    client.allocate(&1, &100_000);

    client.update_product_by_admin(&1, &5_000_000, &300);

    let product = client.product(&1);
    assert_eq!(product.capacity, 5_000_000);
    assert_eq!(product.target_price_ratio, 300);
    // Allocation survives the update
    assert_eq!(product.active_cover, 100_000);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #403)")]
fn test_update_missing_product() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = create_staking_pool(&env);

    client.update_product_by_admin(&9, &1_000_000, &260);
}

#[test]
#[should_panic]
fn test_add_product_requires_admin() {
    let env = Env::default();
    // No mocked auths so require_auth on the admin fails

    let (client, _admin) = create_staking_pool(&env);
    client.add_product_by_admin(&1, &1_000_000, &260);
}

// ==================== Allocation Tests ====================

#[test]
fn test_allocate_accumulates() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = create_staking_pool(&env);
    with_cover_contract(&env, &client);

    client.add_product_by_admin(&1, &1_000_000, &260);

    client.allocate(&1, &400_000);
    assert_eq!(client.product(&1).active_cover, 400_000);

    // Filling to exactly the capacity is allowed
    client.allocate(&1, &600_000);
    assert_eq!(client.product(&1).active_cover, 1_000_000);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #405)")]
fn test_allocate_capacity_exceeded() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = create_staking_pool(&env);
    with_cover_contract(&env, &client);

    client.add_product_by_admin(&1, &1_000_000, &260);

    client.allocate(&1, &999_999);
    client.allocate(&1, &2);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #406)")]
fn test_allocate_requires_cover_contract() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = create_staking_pool(&env);

    client.add_product_by_admin(&1, &1_000_000, &260);
    client.allocate(&1, &100);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #403)")]
fn test_allocate_unknown_product() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = create_staking_pool(&env);
    with_cover_contract(&env, &client);

    client.allocate(&7, &100);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #402)")]
fn test_allocate_rejects_zero_amount() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = create_staking_pool(&env);
    with_cover_contract(&env, &client);

    client.add_product_by_admin(&1, &1_000_000, &260);
    client.allocate(&1, &0);
}

// ==================== Admin Tests ====================

#[test]
fn test_set_cover_contract() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = create_staking_pool(&env);

    let cover_contract = Address::generate(&env);
    client.set_cover_contract_by_admin(&cover_contract);
    assert_eq!(client.cover_contract(), Some(cover_contract));
}

// ==================== Error Code Tests ====================

#[test]
fn test_error_enum() {
    assert_eq!(StakingError::Unauthorized as u32, 401);
    assert_eq!(StakingError::InvalidArgument as u32, 402);
    assert_eq!(StakingError::ProductNotFound as u32, 403);
    assert_eq!(StakingError::ProductAlreadyExists as u32, 404);
    assert_eq!(StakingError::CapacityExceeded as u32, 405);
    assert_eq!(StakingError::CoverContractNotSet as u32, 406);
}
