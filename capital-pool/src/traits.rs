use soroban_sdk::{contractclient, contracttype, Address, Env, Vec};

use crate::dependencies::CapitalMetrics;

// ==================== Pool Operations ====================

/// Capital movement trait
pub trait PoolOperations {
    /// Buy mutual tokens with the base asset
    ///
    /// # Parameters
    /// - `buyer`: Buyer address (caller)
    /// - `amount`: Base asset amount spent
    /// - `min_tokens_out`: Minimum acceptable token amount
    ///
    /// # Returns
    /// Returns the amount of tokens minted
    fn buy_tokens(env: Env, buyer: Address, amount: i128, min_tokens_out: i128) -> i128;

    /// Collect a cover premium into the pool (cover contract only)
    ///
    /// # Parameters
    /// - `from`: Premium payer
    /// - `asset`: Premium asset, must be supported by the pool
    /// - `amount`: Premium amount
    fn receive_premium(env: Env, from: Address, asset: Address, amount: i128);

    /// Pay out an accepted claim from the pool (claims contract only)
    ///
    /// # Parameters
    /// - `asset`: Payout asset, must be supported by the pool
    /// - `to`: Payout recipient
    /// - `amount`: Payout amount
    fn send_payout(env: Env, asset: Address, to: Address, amount: i128);
}

// ==================== Asset Management Functions ====================

/// Asset management trait
pub trait AssetManagement {
    /// Add a secondary asset by admin
    fn add_asset_by_admin(env: Env, asset: Address, rate: i128);

    /// Remove a secondary asset by admin
    fn remove_asset_by_admin(env: Env, asset: Address);

    /// Update the conversion rate of a secondary asset by admin
    fn set_asset_rate_by_admin(env: Env, asset: Address, rate: i128);

    /// Get secondary assets list
    fn get_supported_assets(env: Env) -> Vec<Address>;

    /// Check if asset is held by the pool (base or secondary)
    fn is_asset_supported(env: Env, asset: Address) -> bool;

    /// Get the conversion rate of a secondary asset
    fn get_asset_rate(env: Env, asset: Address) -> Option<i128>;
}

// ==================== System Management Functions ====================

/// System management trait
pub trait SystemManagement {
    /// Set pricing engine by admin
    fn set_mcr_engine_by_admin(env: Env, mcr_engine: Address);

    /// Set capital requirement by admin
    fn set_mcr_eth_by_admin(env: Env, mcr_eth: i128);

    /// Set token controller by admin
    fn set_token_controller_by_admin(env: Env, token_controller: Address);

    /// Set cover contract by admin
    fn set_cover_contract_by_admin(env: Env, cover_contract: Address);

    /// Set claims contract by admin
    fn set_claims_contract_by_admin(env: Env, claims_contract: Address);
}

// ==================== Query Functions ====================

#[contractclient(name = "PoolClient")]
/// Query trait
pub trait PoolQuery {
    /// Get admin address
    fn get_admin(env: Env) -> Address;

    /// Get base asset address
    fn get_base_asset(env: Env) -> Address;

    /// Get pricing engine address
    fn get_mcr_engine(env: Env) -> Address;

    /// Get token controller address
    fn get_token_controller(env: Env) -> Address;

    /// Get cover contract address
    fn get_cover_contract(env: Env) -> Option<Address>;

    /// Get claims contract address
    fn get_claims_contract(env: Env) -> Option<Address>;

    /// Get capital requirement
    fn get_mcr_eth(env: Env) -> i128;

    /// Get pool value across all held assets, in base asset units
    fn total_asset_value(env: Env) -> i128;

    /// Get the capital position at the current pool value
    fn capital_state(env: Env) -> CapitalMetrics;

    /// Get the spot token price at the current pool value
    fn spot_token_price(env: Env) -> i128;
}

// ==================== Event Definitions ====================

/// Token purchase event
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensPurchasedEvent {
    pub amount: i128,
    pub tokens_minted: i128,
    pub mcr_ratio: i128,
}

/// Premium received event
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PremiumReceivedEvent {
    pub asset: Address,
    pub amount: i128,
}

/// Payout sent event
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayoutSentEvent {
    pub asset: Address,
    pub amount: i128,
}

/// Asset added event
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetAddedEvent {
    pub rate: i128,
}

/// Asset removed event
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetRemovedEvent {
    pub admin: Address,
}
