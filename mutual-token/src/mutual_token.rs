use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Address, Env, String,
    Symbol,
};
use stellar_fungible;
use stellar_pausable;

// Import our defined traits
use crate::traits::{
    AdminTrait, ControlledSupply, InternalHelperTrait, MembershipTrait, PausableToken,
    TokenInterface,
};

/********** Ledger Thresholds **********/

const ONE_DAY_LEDGERS: u32 = 17280; // assumes 5s a ledger

const LEDGER_THRESHOLD_USER: u32 = ONE_DAY_LEDGERS * 100; // ~ 100 days

// Token contract data keys
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    // Token metadata
    Metadata,
    // Contract admin
    Admin,
    // Token controller contract
    TokenController,
}

// Membership register data keys
#[derive(Clone)]
#[contracttype]
pub enum MemberDataKey {
    MemberAddress(Address),
}

// Token metadata structure
#[derive(Clone)]
#[contracttype]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

// Contract error types
#[derive(Clone, Debug, Copy, Eq, PartialEq, PartialOrd, Ord)]
#[contracterror]
#[repr(u32)]
pub enum MutualTokenError {
    // Insufficient permissions
    Unauthorized = 1,
    // Contract is paused
    Paused = 2,
    // Insufficient balance
    InsufficientBalance = 3,
    // Invalid argument
    InvalidArgument = 4,
    // Amount must be positive
    InvalidAmount = 5,
    // Address is not an enrolled member
    NotMember = 6,
    // Token controller has not been registered
    ControllerNotSet = 7,
}

// MutualToken contract
#[contract]
pub struct MutualToken;

// ==================== Constructor ====================

#[contractimpl]
impl MutualToken {
    /// Deploy-time setup: admin and immutable token metadata.
    /// The token controller is wired afterwards via `set_token_controller`.
    pub fn __constructor(env: Env, admin: Address, name: String, symbol: String, decimals: u32) {
        // Validate parameters
        if decimals > 18 {
            panic_with_error!(env, MutualTokenError::InvalidArgument);
        }

        // Set contract admin
        env.storage().instance().set(&DataKey::Admin, &admin);

        // Set token metadata
        let metadata = TokenMetadata {
            name: name.clone(),
            symbol: symbol.clone(),
            decimals,
        };
        env.storage().instance().set(&DataKey::Metadata, &metadata);

        // Publish initialization event
        env.events().publish(
            (Symbol::new(&env, "initialize"),),
            (admin, name, symbol, decimals),
        );
    }
}

// ==================== Core Token Functionality Implementation ====================

#[contractimpl]
impl TokenInterface for MutualToken {
    fn name(env: Env) -> String {
        Self::get_metadata(&env).name
    }

    fn symbol(env: Env) -> String {
        Self::get_metadata(&env).symbol
    }

    fn decimals(env: Env) -> u32 {
        Self::get_metadata(&env).decimals
    }

    fn total_supply(env: Env) -> i128 {
        stellar_fungible::total_supply(&env)
    }

    fn balance_of(env: Env, account: Address) -> i128 {
        stellar_fungible::balance(&env, &account)
    }

    fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        // Check if paused
        Self::require_not_paused(&env);

        // Both ends of a transfer must be enrolled members
        Self::require_member(&env, &from);
        Self::require_member(&env, &to);

        // Validate parameters
        Self::require_positive_amount(&env, amount);

        // Use OpenZeppelin FungibleToken transfer
        stellar_fungible::transfer(&env, &from, &to, amount);

        // Publish transfer event
        env.events()
            .publish((Symbol::new(&env, "transfer"),), (from, to, amount));
    }

    fn approve(env: Env, from: Address, spender: Address, amount: i128) {
        // Check if paused
        Self::require_not_paused(&env);

        // Validate parameters
        Self::require_non_negative_amount(&env, amount);

        // Set authorization validity period
        let live_until_ledger = env.ledger().sequence() + LEDGER_THRESHOLD_USER;

        // Use OpenZeppelin FungibleToken approve
        stellar_fungible::approve(&env, &from, &spender, amount, live_until_ledger);

        // Publish approval event
        env.events().publish(
            (Symbol::new(&env, "approve"),),
            (from, spender, amount, live_until_ledger),
        );
    }

    fn allowance(env: Env, owner: Address, spender: Address) -> i128 {
        stellar_fungible::allowance(&env, &owner, &spender)
    }

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        // Check if paused
        Self::require_not_paused(&env);

        // Both ends of a transfer must be enrolled members
        Self::require_member(&env, &from);
        Self::require_member(&env, &to);

        // Validate parameters
        Self::require_positive_amount(&env, amount);

        // Use OpenZeppelin FungibleToken proxy transfer
        stellar_fungible::transfer_from(&env, &spender, &from, &to, amount);

        // Publish proxy transfer event
        env.events().publish(
            (Symbol::new(&env, "transfer_from"),),
            (spender, from, to, amount),
        );
    }
}

// ==================== Controlled Supply Implementation ====================

#[contractimpl]
impl ControlledSupply for MutualToken {
    fn mint(env: Env, to: Address, amount: i128) {
        // Check if paused
        Self::require_not_paused(&env);

        // Validate parameters
        Self::require_positive_amount(&env, amount);

        // Only the registered token controller may mint
        let controller = Self::require_controller(&env);

        // Use OpenZeppelin FungibleToken minting
        stellar_fungible::mintable::mint(&env, &to, amount);

        // Publish minting event
        env.events()
            .publish((Symbol::new(&env, "mint"),), (controller, to, amount));
    }

    fn burn(env: Env, from: Address, amount: i128) {
        // Check if paused
        Self::require_not_paused(&env);

        // Validate parameters
        Self::require_positive_amount(&env, amount);

        // Only the registered token controller may burn
        let controller = Self::require_controller(&env);

        // Use OpenZeppelin FungibleToken burning
        stellar_fungible::burnable::burn(&env, &from, amount);

        // Publish burning event
        env.events()
            .publish((Symbol::new(&env, "burn"),), (controller, from, amount));
    }
}

// ==================== Pausable Functionality Implementation ====================

#[contractimpl]
impl PausableToken for MutualToken {
    fn pause(env: Env) {
        let admin = Self::require_admin_address(&env);

        // Use OpenZeppelin pause function
        stellar_pausable::pause(&env, &admin);

        // Publish pause event
        env.events().publish((Symbol::new(&env, "pause"),), admin);
    }

    fn unpause(env: Env) {
        let admin = Self::require_admin_address(&env);

        // Use OpenZeppelin unpause function
        stellar_pausable::unpause(&env, &admin);

        // Publish unpause event
        env.events().publish((Symbol::new(&env, "unpause"),), admin);
    }

    fn is_paused(env: Env) -> bool {
        stellar_pausable::paused(&env)
    }
}

// ==================== Membership Functionality Implementation ====================

#[contractimpl]
impl MembershipTrait for MutualToken {
    fn add_member(env: Env, member: Address) {
        let admin = Self::require_admin(&env);

        // Enroll member
        Self::add_member_internal(&env, &member);

        // Publish membership addition event
        env.events()
            .publish((Symbol::new(&env, "member_add"),), (admin, member));
    }

    fn remove_member(env: Env, member: Address) {
        let admin = Self::require_admin(&env);

        // Remove from member register
        Self::remove_member_internal(&env, &member);

        // Publish membership removal event
        env.events()
            .publish((Symbol::new(&env, "member_remove"),), (admin, member));
    }

    fn is_member(env: Env, address: Address) -> bool {
        Self::is_member_internal(&env, &address)
    }
}

// ==================== Admin Functionality Implementation ====================

#[contractimpl]
impl AdminTrait for MutualToken {
    fn admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Admin)
    }

    fn transfer_admin(env: Env, new_admin: Address) {
        let current_admin = Self::require_admin(&env);
        env.storage().instance().set(&DataKey::Admin, &new_admin);

        // Publish admin transfer event
        env.events().publish(
            (Symbol::new(&env, "admin_transfer"),),
            (current_admin, new_admin),
        );
    }

    fn set_token_controller(env: Env, controller: Address) {
        let admin = Self::require_admin(&env);
        env.storage()
            .instance()
            .set(&DataKey::TokenController, &controller);

        // Publish controller registration event
        env.events()
            .publish((Symbol::new(&env, "controller_set"),), (admin, controller));
    }

    fn token_controller(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::TokenController)
    }
}

// ==================== Internal Helper Functions Implementation ====================

impl InternalHelperTrait for MutualToken {
    fn require_admin(env: &Env) -> Address {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .unwrap_or_else(|| panic_with_error!(env, MutualTokenError::Unauthorized));
        admin.require_auth();
        admin
    }

    fn require_admin_address(env: &Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .unwrap_or_else(|| panic_with_error!(env, MutualTokenError::Unauthorized))
    }

    fn require_not_paused(env: &Env) {
        if stellar_pausable::paused(env) {
            panic_with_error!(env, MutualTokenError::Paused);
        }
    }

    fn require_positive_amount(env: &Env, amount: i128) {
        if amount <= 0 {
            panic_with_error!(env, MutualTokenError::InvalidAmount);
        }
    }

    fn require_non_negative_amount(env: &Env, amount: i128) {
        if amount < 0 {
            panic_with_error!(env, MutualTokenError::InvalidAmount);
        }
    }

    fn require_member(env: &Env, address: &Address) {
        if !Self::is_member_internal(env, address) {
            panic_with_error!(env, MutualTokenError::NotMember);
        }
    }

    fn require_controller(env: &Env) -> Address {
        let controller: Address = env
            .storage()
            .instance()
            .get(&DataKey::TokenController)
            .unwrap_or_else(|| panic_with_error!(env, MutualTokenError::ControllerNotSet));
        controller.require_auth();
        controller
    }
}

// ==================== Private Helper Functions ====================

impl MutualToken {
    // Get token metadata
    fn get_metadata(env: &Env) -> TokenMetadata {
        env.storage()
            .instance()
            .get(&DataKey::Metadata)
            .unwrap_or(TokenMetadata {
                name: String::from_str(env, "Unknown"),
                symbol: String::from_str(env, "UNK"),
                decimals: 18,
            })
    }

    // Enroll address in member register
    fn add_member_internal(env: &Env, address: &Address) {
        env.storage()
            .instance()
            .set(&MemberDataKey::MemberAddress(address.clone()), &true);
    }

    // Remove address from member register
    fn remove_member_internal(env: &Env, address: &Address) {
        env.storage()
            .instance()
            .remove(&MemberDataKey::MemberAddress(address.clone()));
    }

    // Check if address is enrolled
    fn is_member_internal(env: &Env, address: &Address) -> bool {
        env.storage()
            .instance()
            .get(&MemberDataKey::MemberAddress(address.clone()))
            .unwrap_or(false)
    }
}
