use soroban_sdk::{Address, Env, String};

// 1. Core token functionality trait
pub trait TokenInterface {
    /// Get token name
    fn name(env: Env) -> String;

    /// Get token symbol
    fn symbol(env: Env) -> String;

    /// Get decimal places
    fn decimals(env: Env) -> u32;

    /// Get total supply
    fn total_supply(env: Env) -> i128;

    /// Get account balance
    fn balance_of(env: Env, account: Address) -> i128;

    /// Transfer between members
    fn transfer(env: Env, from: Address, to: Address, amount: i128);

    /// Approve
    fn approve(env: Env, from: Address, spender: Address, amount: i128);

    /// Get allowance
    fn allowance(env: Env, owner: Address, spender: Address) -> i128;

    /// Transfer from (spender must be approved)
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128);
}

// 2. Controlled supply trait: mint and burn are reserved for the token controller
pub trait ControlledSupply {
    /// Mint tokens (token controller only)
    fn mint(env: Env, to: Address, amount: i128);

    /// Burn tokens from a holder (token controller only)
    fn burn(env: Env, from: Address, amount: i128);
}

// 3. Pausable functionality trait
pub trait PausableToken {
    /// Pause transfers (admin only)
    fn pause(env: Env);

    /// Unpause transfers (admin only)
    fn unpause(env: Env);

    /// Check if transfers are paused
    fn is_paused(env: Env) -> bool;
}

// 4. Membership register trait: only members may hold via transfer
pub trait MembershipTrait {
    /// Enroll an address as a member (admin only)
    fn add_member(env: Env, member: Address);

    /// Remove an address from the member register (admin only)
    fn remove_member(env: Env, member: Address);

    /// Check if address is an enrolled member
    fn is_member(env: Env, address: Address) -> bool;
}

// 5. Admin functionality trait
pub trait AdminTrait {
    /// Get contract admin
    fn admin(env: Env) -> Option<Address>;

    /// Transfer admin permission (admin only)
    fn transfer_admin(env: Env, new_admin: Address);

    /// Register the token controller contract (admin only)
    fn set_token_controller(env: Env, controller: Address);

    /// Get the token controller contract
    fn token_controller(env: Env) -> Option<Address>;
}

// 6. Internal helper trait (not exposed externally)
pub(crate) trait InternalHelperTrait {
    /// Require caller to be admin
    fn require_admin(env: &Env) -> Address;

    /// Get admin address (no authorization check)
    fn require_admin_address(env: &Env) -> Address;

    /// Require transfers not paused
    fn require_not_paused(env: &Env);

    /// Require amount to be positive
    fn require_positive_amount(env: &Env, amount: i128);

    /// Require amount to be non-negative
    fn require_non_negative_amount(env: &Env, amount: i128);

    /// Require address to be an enrolled member
    fn require_member(env: &Env, address: &Address);

    /// Require caller to be the registered token controller
    fn require_controller(env: &Env) -> Address;
}
