#![cfg(test)]

extern crate std;
use crate::mutual_token::{MutualToken, MutualTokenClient, MutualTokenError};
use soroban_sdk::{testutils::Address as _, Address, Env, String};

fn create_token<'a>(env: &Env, admin: &Address) -> MutualTokenClient<'a> {
    // Register contract with constructor arguments
    let contract_address = env.register(
        MutualToken,
        (
            admin,
            String::from_str(env, "Mutual Token"),
            String::from_str(env, "MTL"),
            18u32,
        ),
    );
    MutualTokenClient::new(env, &contract_address)
}

// Wire a controller address and enroll the given accounts as members
fn setup_token<'a>(env: &Env, admin: &Address, members: &[&Address]) -> (MutualTokenClient<'a>, Address) {
    let client = create_token(env, admin);
    let controller = Address::generate(env);
    client.set_token_controller(&controller);
    for member in members {
        client.add_member(member);
    }
    (client, controller)
}

#[test]
fn test_constructor_metadata() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let client = create_token(&env, &admin);

    // Verify initialization results
    assert_eq!(client.name(), String::from_str(&env, "Mutual Token"));
    assert_eq!(client.symbol(), String::from_str(&env, "MTL"));
    assert_eq!(client.decimals(), 18);
    assert_eq!(client.total_supply(), 0);
    assert_eq!(client.admin(), Some(admin.clone()));
    assert_eq!(client.token_controller(), None);
    assert!(!client.is_paused());
}

#[test]
#[should_panic(expected = "Error(Contract, #4)")]
fn test_constructor_rejects_oversized_decimals() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    env.register(
        MutualToken,
        (
            &admin,
            String::from_str(&env, "Mutual Token"),
            String::from_str(&env, "MTL"),
            19u32,
        ),
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #7)")]
fn test_mint_requires_registered_controller() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let client = create_token(&env, &admin);

    // No controller registered yet
    client.mint(&user, &1_000);
}

#[test]
fn test_controller_mint_and_burn() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let holder = Address::generate(&env);
    let (client, _controller) = setup_token(&env, &admin, &[&holder]);

    client.mint(&holder, &5_000);
    assert_eq!(client.balance_of(&holder), 5_000);
    assert_eq!(client.total_supply(), 5_000);

    client.burn(&holder, &2_000);
    assert_eq!(client.balance_of(&holder), 3_000);
    assert_eq!(client.total_supply(), 3_000);
}

#[test]
fn test_transfer_between_members() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let (client, _controller) = setup_token(&env, &admin, &[&alice, &bob]);

    client.mint(&alice, &1_000);
    client.transfer(&alice, &bob, &400);

    assert_eq!(client.balance_of(&alice), 600);
    assert_eq!(client.balance_of(&bob), 400);
    assert_eq!(client.total_supply(), 1_000);
}

#[test]
#[should_panic(expected = "Error(Contract, #6)")]
fn test_transfer_to_non_member_reverts() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let outsider = Address::generate(&env);
    let (client, _controller) = setup_token(&env, &admin, &[&alice]);

    client.mint(&alice, &1_000);
    client.transfer(&alice, &outsider, &100);
}

#[test]
#[should_panic(expected = "Error(Contract, #5)")]
fn test_transfer_zero_amount_reverts() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let (client, _controller) = setup_token(&env, &admin, &[&alice, &bob]);

    client.mint(&alice, &1_000);
    client.transfer(&alice, &bob, &0);
}

#[test]
#[should_panic(expected = "Error(Contract, #2)")]
fn test_paused_transfer_reverts() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let (client, _controller) = setup_token(&env, &admin, &[&alice, &bob]);

    client.mint(&alice, &1_000);
    client.pause();
    client.transfer(&alice, &bob, &100);
}

#[test]
fn test_pause_and_unpause() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let (client, _controller) = setup_token(&env, &admin, &[&alice, &bob]);

    client.mint(&alice, &1_000);

    client.pause();
    assert!(client.is_paused());

    client.unpause();
    assert!(!client.is_paused());

    // Transfers work again after unpause
    client.transfer(&alice, &bob, &100);
    assert_eq!(client.balance_of(&bob), 100);
}

#[test]
fn test_membership_register() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let client = create_token(&env, &admin);

    assert!(!client.is_member(&user));

    client.add_member(&user);
    assert!(client.is_member(&user));

    client.remove_member(&user);
    assert!(!client.is_member(&user));
}

#[test]
fn test_approve_and_transfer_from() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let spender = Address::generate(&env);
    let (client, _controller) = setup_token(&env, &admin, &[&alice, &bob]);

    client.mint(&alice, &1_000);
    client.approve(&alice, &spender, &300);
    assert_eq!(client.allowance(&alice, &spender), 300);

    client.transfer_from(&spender, &alice, &bob, &250);
    assert_eq!(client.balance_of(&alice), 750);
    assert_eq!(client.balance_of(&bob), 250);
    assert_eq!(client.allowance(&alice, &spender), 50);
}

#[test]
fn test_admin_transfer() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let new_admin = Address::generate(&env);
    let client = create_token(&env, &admin);

    assert_eq!(client.admin(), Some(admin.clone()));

    client.transfer_admin(&new_admin);
    assert_eq!(client.admin(), Some(new_admin.clone()));
}

#[test]
fn test_set_token_controller() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let controller = Address::generate(&env);
    let client = create_token(&env, &admin);

    assert_eq!(client.token_controller(), None);

    client.set_token_controller(&controller);
    assert_eq!(client.token_controller(), Some(controller.clone()));
}

#[test]
fn test_error_enum() {
    // Verify error code values stay stable
    assert_eq!(MutualTokenError::Unauthorized as u32, 1);
    assert_eq!(MutualTokenError::Paused as u32, 2);
    assert_eq!(MutualTokenError::InsufficientBalance as u32, 3);
    assert_eq!(MutualTokenError::InvalidArgument as u32, 4);
    assert_eq!(MutualTokenError::InvalidAmount as u32, 5);
    assert_eq!(MutualTokenError::NotMember as u32, 6);
    assert_eq!(MutualTokenError::ControllerNotSet as u32, 7);
}
