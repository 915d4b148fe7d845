use soroban_sdk::{contracttype, Address, Env, String};

use crate::cover::{BuyCoverParams, CoverData, ProductConfig};

// ==================== Cover Purchase Functions ====================

pub trait CoverPurchase {
    /// Buy cover against a registered product
    ///
    /// # Parameters
    /// - `buyer`: Account paying for the cover
    /// - `params`: Purchase parameters, see `BuyCoverParams`
    ///
    /// Returns the id of the stored cover record
    fn buy_cover(env: Env, buyer: Address, params: BuyCoverParams) -> u32;
}

// ==================== Product Registry Functions ====================

pub trait ProductRegistry {
    /// Register a product for cover sales (admin only)
    fn add_product_by_admin(env: Env, product_id: u32, config: ProductConfig);

    /// Get a product configuration
    fn product_config(env: Env, product_id: u32) -> ProductConfig;

    /// Check whether a product is registered
    fn has_product(env: Env, product_id: u32) -> bool;
}

// ==================== Query Functions ====================

pub trait CoverQuery {
    /// Get a stored cover record
    fn cover_data(env: Env, cover_id: u32) -> CoverData;

    /// Get the metadata string attached to a cover
    fn cover_metadata(env: Env, cover_id: u32) -> String;

    /// Number of covers written so far
    fn cover_count(env: Env) -> u32;
}

pub trait SystemQuery {
    fn get_admin(env: Env) -> Address;
    fn get_capital_pool(env: Env) -> Address;
    fn get_staking_pool(env: Env) -> Address;
    fn get_token_controller(env: Env) -> Address;
    fn get_mutual_token(env: Env) -> Address;
    fn get_max_commission_ratio(env: Env) -> i128;
}

// ==================== Event Definitions ====================

/// Cover purchased event
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoverPurchasedEvent {
    pub owner: Address,
    pub product_id: u32,
    pub payout_asset: Address,
    pub amount: i128,
    pub period: u64,
    pub premium: i128,
    pub commission: i128,
}

/// Product added event
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProductAddedEvent {
    pub initial_price_ratio: i128,
    pub capacity_reduction_ratio: i128,
}
