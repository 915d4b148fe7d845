use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Address, Env, Map,
    Symbol, Vec,
};
use stellar_default_impl_macro::default_impl;
use stellar_ownable::{self as ownable, Ownable};
use stellar_ownable_macro::only_owner;
use stellar_upgradeable::UpgradeableInternal;
use stellar_upgradeable_macros::Upgradeable;

// Import dependencies
use crate::dependencies::*;
// Import traits
use crate::traits::*;

// ==================== Constants ====================

/// Maximum number of secondary assets
const MAX_ASSETS: u32 = 10;

/// Conversion rate precision (10000 = par with the base asset)
const RATE_PRECISION: i128 = 10000;

/// Coverage ratio ceiling for purchases (400% in 1/10000 units)
const MAX_MCR_RATIO: i128 = 40000;

// ==================== Data Structures ====================

/// Storage data key enum
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Base asset contract address
    BaseAsset,
    /// Pricing engine contract address
    McrEngine,
    /// Token controller contract address
    TokenController,
    /// Cover contract address
    CoverContract,
    /// Claims contract address
    ClaimsContract,
    /// Minimum capital requirement in base asset units
    McrEth,
    /// Secondary assets mapping (Map<Address, i128> conversion rate)
    SecondaryAssets,
}

/// Error code definition
#[contracterror]
#[derive(Clone, Debug, Copy, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    /// Exceeds maximum asset quantity
    TooManyAssets = 301,
    /// Asset already exists
    AssetAlreadyExists = 302,
    /// Asset does not exist
    AssetNotExists = 303,
    /// Invalid amount
    InvalidAmount = 304,
    /// Invalid conversion rate
    InvalidRate = 305,
    /// Coverage ratio above the purchase ceiling
    RatioAboveCeiling = 306,
    /// Token amount below the requested minimum
    SlippageExceeded = 307,
    /// Insufficient pool balance
    InsufficientBalance = 308,
    /// Insufficient permissions
    Unauthorized = 309,
    /// Cover contract not set
    CoverContractNotSet = 310,
    /// Claims contract not set
    ClaimsContractNotSet = 311,
}

/// Capital pool contract
#[derive(Upgradeable)]
#[contract]
pub struct CapitalPool;

// ==================== Constructor ====================

#[contractimpl]
impl CapitalPool {
    pub fn __constructor(
        env: &Env,
        admin: Address,
        base_asset: Address,
        mcr_engine: Address,
        token_controller: Address,
        mcr_eth: i128,
    ) {
        // Verify capital requirement
        if mcr_eth <= 0 {
            panic_with_error!(env, PoolError::InvalidAmount);
        }

        // Set contract owner using OpenZeppelin Ownable
        ownable::set_owner(env, &admin);
        env.storage()
            .instance()
            .set(&DataKey::BaseAsset, &base_asset);
        env.storage()
            .instance()
            .set(&DataKey::McrEngine, &mcr_engine);
        env.storage()
            .instance()
            .set(&DataKey::TokenController, &token_controller);
        env.storage().instance().set(&DataKey::McrEth, &mcr_eth);

        // Publish initialization event
        env.events().publish(
            (Symbol::new(env, "initialize"),),
            (admin.clone(), base_asset, mcr_engine, mcr_eth),
        );
    }
}

// ==================== Capital movement function implementation ====================

#[contractimpl]
impl PoolOperations for CapitalPool {
    fn buy_tokens(env: Env, buyer: Address, amount: i128, min_tokens_out: i128) -> i128 {
        buyer.require_auth(); // Verify caller identity

        // Verify parameters
        if amount <= 0 {
            panic_with_error!(env, PoolError::InvalidAmount);
        }

        let base_asset = Self::get_base_asset_internal(&env);
        let mcr_engine = Self::get_mcr_engine_internal(&env);
        let mcr_eth = Self::get_mcr_eth_internal(&env);

        // Pool value before the purchase funds arrive
        let total_value = Self::total_asset_value_internal(&env);

        // Purchases are blocked above the coverage ceiling
        let pricing = PricingClient::new(&env, &mcr_engine);
        let metrics = pricing.capital_metrics(&total_value, &mcr_eth);
        if metrics.mcr_ratio > MAX_MCR_RATIO {
            panic_with_error!(env, PoolError::RatioAboveCeiling);
        }

        let tokens_out = pricing.tokens_for_purchase(&amount, &total_value, &mcr_eth);
        if tokens_out < min_tokens_out {
            panic_with_error!(env, PoolError::SlippageExceeded);
        }

        // Pull purchase funds into the pool
        Self::transfer_from_user(
            &env,
            &base_asset,
            &buyer,
            &env.current_contract_address(),
            amount,
        );

        // Mint through the token controller; pool acts as operator (must be registered)
        let token_controller = Self::get_token_controller_internal(&env);
        ControllerClient::new(&env, &token_controller).mint(
            &env.current_contract_address(),
            &buyer,
            &tokens_out,
        );

        // Publish purchase event
        env.events().publish(
            (Symbol::new(&env, "buy_tokens"), buyer.clone()),
            TokensPurchasedEvent {
                amount,
                tokens_minted: tokens_out,
                mcr_ratio: metrics.mcr_ratio,
            },
        );

        tokens_out
    }

    fn receive_premium(env: Env, from: Address, asset: Address, amount: i128) {
        // Only the registered cover contract may deposit premiums
        let cover_contract = Self::require_cover_contract(&env);
        cover_contract.require_auth();

        // Verify parameters
        if amount <= 0 {
            panic_with_error!(env, PoolError::InvalidAmount);
        }
        Self::require_supported_asset(&env, &asset);

        // Pull the premium into the pool
        Self::transfer_from_user(&env, &asset, &from, &env.current_contract_address(), amount);

        // Publish premium event
        env.events().publish(
            (Symbol::new(&env, "receive_premium"), from.clone()),
            PremiumReceivedEvent { asset, amount },
        );
    }

    fn send_payout(env: Env, asset: Address, to: Address, amount: i128) {
        // Only the registered claims contract may draw payouts
        let claims_contract = Self::require_claims_contract(&env);
        claims_contract.require_auth();

        // Verify parameters
        if amount <= 0 {
            panic_with_error!(env, PoolError::InvalidAmount);
        }
        Self::require_supported_asset(&env, &asset);

        // Check pool holds enough of the payout asset
        let pool_balance = AssetClient::new(&env, &asset).balance(&env.current_contract_address());
        if pool_balance < amount {
            panic_with_error!(env, PoolError::InsufficientBalance);
        }

        Self::transfer_to_user(&env, &asset, &to, amount);

        // Publish payout event
        env.events().publish(
            (Symbol::new(&env, "send_payout"), to.clone()),
            PayoutSentEvent { asset, amount },
        );
    }
}

// ==================== Asset management function implementation ====================

#[contractimpl]
impl AssetManagement for CapitalPool {
    #[only_owner]
    fn add_asset_by_admin(env: Env, asset: Address, rate: i128) {
        // Verify conversion rate
        if rate <= 0 {
            panic_with_error!(env, PoolError::InvalidRate);
        }

        // Get current asset Map
        let mut assets: Map<Address, i128> = env
            .storage()
            .instance()
            .get(&DataKey::SecondaryAssets)
            .unwrap_or_else(|| Map::new(&env));

        // Check if exceeds maximum quantity
        if assets.len() >= MAX_ASSETS {
            panic_with_error!(env, PoolError::TooManyAssets);
        }

        // Check if asset already exists (the base asset is always held)
        if asset == Self::get_base_asset_internal(&env) || assets.contains_key(asset.clone()) {
            panic_with_error!(env, PoolError::AssetAlreadyExists);
        }

        // Add asset
        assets.set(asset.clone(), rate);
        env.storage()
            .instance()
            .set(&DataKey::SecondaryAssets, &assets);

        // Publish event
        env.events().publish(
            (Symbol::new(&env, "add_asset"), asset.clone()),
            AssetAddedEvent { rate },
        );
    }

    #[only_owner]
    fn remove_asset_by_admin(env: Env, asset: Address) {
        // Get current asset Map
        let mut assets: Map<Address, i128> = env
            .storage()
            .instance()
            .get(&DataKey::SecondaryAssets)
            .unwrap_or_else(|| Map::new(&env));

        // Check if asset exists
        if !assets.contains_key(asset.clone()) {
            panic_with_error!(env, PoolError::AssetNotExists);
        }

        // Remove asset
        assets.remove(asset.clone());
        env.storage()
            .instance()
            .set(&DataKey::SecondaryAssets, &assets);

        // Publish event
        env.events().publish(
            (Symbol::new(&env, "remove_asset"), asset.clone()),
            AssetRemovedEvent {
                admin: Self::get_admin_internal(&env),
            },
        );
    }

    #[only_owner]
    fn set_asset_rate_by_admin(env: Env, asset: Address, rate: i128) {
        // Verify conversion rate
        if rate <= 0 {
            panic_with_error!(env, PoolError::InvalidRate);
        }

        let mut assets: Map<Address, i128> = env
            .storage()
            .instance()
            .get(&DataKey::SecondaryAssets)
            .unwrap_or_else(|| Map::new(&env));

        // Check if asset exists
        if !assets.contains_key(asset.clone()) {
            panic_with_error!(env, PoolError::AssetNotExists);
        }

        assets.set(asset.clone(), rate);
        env.storage()
            .instance()
            .set(&DataKey::SecondaryAssets, &assets);

        // Publish event
        env.events().publish(
            (Symbol::new(&env, "set_asset_rate"), asset.clone()),
            (Self::get_admin_internal(&env), rate),
        );
    }

    fn get_supported_assets(env: Env) -> Vec<Address> {
        let assets: Map<Address, i128> = env
            .storage()
            .instance()
            .get(&DataKey::SecondaryAssets)
            .unwrap_or_else(|| Map::new(&env));
        assets.keys()
    }

    fn is_asset_supported(env: Env, asset: Address) -> bool {
        if asset == Self::get_base_asset_internal(&env) {
            return true;
        }
        let assets: Map<Address, i128> = env
            .storage()
            .instance()
            .get(&DataKey::SecondaryAssets)
            .unwrap_or_else(|| Map::new(&env));
        assets.contains_key(asset)
    }

    fn get_asset_rate(env: Env, asset: Address) -> Option<i128> {
        let assets: Map<Address, i128> = env
            .storage()
            .instance()
            .get(&DataKey::SecondaryAssets)
            .unwrap_or_else(|| Map::new(&env));
        assets.get(asset)
    }
}

// ==================== System management function implementation ====================

#[contractimpl]
impl SystemManagement for CapitalPool {
    #[only_owner]
    fn set_mcr_engine_by_admin(env: Env, mcr_engine: Address) {
        env.storage()
            .instance()
            .set(&DataKey::McrEngine, &mcr_engine);

        // Publish event
        env.events().publish(
            (Symbol::new(&env, "set_mcr_engine"), mcr_engine.clone()),
            Self::get_admin_internal(&env),
        );
    }

    #[only_owner]
    fn set_mcr_eth_by_admin(env: Env, mcr_eth: i128) {
        // Verify capital requirement
        if mcr_eth <= 0 {
            panic_with_error!(env, PoolError::InvalidAmount);
        }

        env.storage().instance().set(&DataKey::McrEth, &mcr_eth);

        // Publish event
        env.events().publish(
            (Symbol::new(&env, "set_mcr_eth"),),
            (Self::get_admin_internal(&env), mcr_eth),
        );
    }

    #[only_owner]
    fn set_token_controller_by_admin(env: Env, token_controller: Address) {
        env.storage()
            .instance()
            .set(&DataKey::TokenController, &token_controller);

        // Publish event
        env.events().publish(
            (
                Symbol::new(&env, "set_token_controller"),
                token_controller.clone(),
            ),
            Self::get_admin_internal(&env),
        );
    }

    #[only_owner]
    fn set_cover_contract_by_admin(env: Env, cover_contract: Address) {
        env.storage()
            .instance()
            .set(&DataKey::CoverContract, &cover_contract);

        // Publish event
        env.events().publish(
            (
                Symbol::new(&env, "set_cover_contract"),
                cover_contract.clone(),
            ),
            Self::get_admin_internal(&env),
        );
    }

    #[only_owner]
    fn set_claims_contract_by_admin(env: Env, claims_contract: Address) {
        env.storage()
            .instance()
            .set(&DataKey::ClaimsContract, &claims_contract);

        // Publish event
        env.events().publish(
            (
                Symbol::new(&env, "set_claims_contract"),
                claims_contract.clone(),
            ),
            Self::get_admin_internal(&env),
        );
    }
}

// ==================== Query function implementation ====================

#[contractimpl]
impl PoolQuery for CapitalPool {
    fn get_admin(env: Env) -> Address {
        Self::get_admin_internal(&env)
    }

    fn get_base_asset(env: Env) -> Address {
        Self::get_base_asset_internal(&env)
    }

    fn get_mcr_engine(env: Env) -> Address {
        Self::get_mcr_engine_internal(&env)
    }

    fn get_token_controller(env: Env) -> Address {
        Self::get_token_controller_internal(&env)
    }

    fn get_cover_contract(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::CoverContract)
    }

    fn get_claims_contract(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::ClaimsContract)
    }

    fn get_mcr_eth(env: Env) -> i128 {
        Self::get_mcr_eth_internal(&env)
    }

    fn total_asset_value(env: Env) -> i128 {
        Self::total_asset_value_internal(&env)
    }

    fn capital_state(env: Env) -> CapitalMetrics {
        let mcr_engine = Self::get_mcr_engine_internal(&env);
        let total_value = Self::total_asset_value_internal(&env);
        let mcr_eth = Self::get_mcr_eth_internal(&env);
        PricingClient::new(&env, &mcr_engine).capital_metrics(&total_value, &mcr_eth)
    }

    fn spot_token_price(env: Env) -> i128 {
        let mcr_engine = Self::get_mcr_engine_internal(&env);
        let total_value = Self::total_asset_value_internal(&env);
        let mcr_eth = Self::get_mcr_eth_internal(&env);
        PricingClient::new(&env, &mcr_engine).spot_price(&total_value, &mcr_eth)
    }
}

// ==================== Internal helper functions ====================

impl CapitalPool {
    /// Get admin address (internal helper)
    fn get_admin_internal(env: &Env) -> Address {
        ownable::get_owner(env).unwrap()
    }

    /// Get base asset address
    fn get_base_asset_internal(env: &Env) -> Address {
        env.storage().instance().get(&DataKey::BaseAsset).unwrap() // Set in constructor
    }

    /// Get pricing engine address
    fn get_mcr_engine_internal(env: &Env) -> Address {
        env.storage().instance().get(&DataKey::McrEngine).unwrap() // Set in constructor
    }

    /// Get token controller address
    fn get_token_controller_internal(env: &Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::TokenController)
            .unwrap() // Set in constructor
    }

    /// Get capital requirement
    fn get_mcr_eth_internal(env: &Env) -> i128 {
        env.storage().instance().get(&DataKey::McrEth).unwrap() // Set in constructor
    }

    /// Get cover contract, panics when not wired yet
    fn require_cover_contract(env: &Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::CoverContract)
            .unwrap_or_else(|| panic_with_error!(env, PoolError::CoverContractNotSet))
    }

    /// Get claims contract, panics when not wired yet
    fn require_claims_contract(env: &Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::ClaimsContract)
            .unwrap_or_else(|| panic_with_error!(env, PoolError::ClaimsContractNotSet))
    }

    /// Panics unless the asset is the base asset or a registered secondary
    fn require_supported_asset(env: &Env, asset: &Address) {
        if *asset == Self::get_base_asset_internal(env) {
            return;
        }
        let assets: Map<Address, i128> = env
            .storage()
            .instance()
            .get(&DataKey::SecondaryAssets)
            .unwrap_or_else(|| Map::new(env));
        if !assets.contains_key(asset.clone()) {
            panic_with_error!(env, PoolError::AssetNotExists);
        }
    }

    /// Pool value across all held assets, in base asset units
    fn total_asset_value_internal(env: &Env) -> i128 {
        let base_asset = Self::get_base_asset_internal(env);
        let pool_address = env.current_contract_address();

        let mut total = AssetClient::new(env, &base_asset).balance(&pool_address);

        // Secondary asset balances are converted at their stored rates
        let assets: Map<Address, i128> = env
            .storage()
            .instance()
            .get(&DataKey::SecondaryAssets)
            .unwrap_or_else(|| Map::new(env));
        for (asset, rate) in assets.iter() {
            let balance = AssetClient::new(env, &asset).balance(&pool_address);
            let converted = balance
                .checked_mul(rate)
                .unwrap_or_else(|| panic_with_error!(env, PoolError::InvalidAmount))
                / RATE_PRECISION;
            total = total
                .checked_add(converted)
                .unwrap_or_else(|| panic_with_error!(env, PoolError::InvalidAmount));
        }

        total
    }

    /// Transfer from user
    fn transfer_from_user(env: &Env, token: &Address, from: &Address, to: &Address, amount: i128) {
        // Call asset contract's transfer_from method
        AssetClient::new(env, token).transfer_from(
            &env.current_contract_address(),
            from,
            to,
            &amount,
        );
    }

    /// Transfer to user
    fn transfer_to_user(env: &Env, token: &Address, to: &Address, amount: i128) {
        // Call asset contract's transfer method
        AssetClient::new(env, token).transfer(&env.current_contract_address(), to, &amount);
    }
}

// ==================== Ownable Implementation ====================

#[default_impl]
#[contractimpl]
impl Ownable for CapitalPool {}

// Provide upgrade auth via OpenZeppelin UpgradeableInternal
impl UpgradeableInternal for CapitalPool {
    fn _require_auth(e: &Env, operator: &Address) {
        operator.require_auth();
        let owner = ownable::get_owner(e).unwrap();
        if *operator != owner {
            panic_with_error!(e, PoolError::Unauthorized);
        }
    }
}
