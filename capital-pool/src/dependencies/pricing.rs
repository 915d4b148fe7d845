use soroban_sdk::{contractclient, contracttype, Env};

/// Capital position reported by the pricing engine
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapitalMetrics {
    pub total_value: i128,
    pub mcr_eth: i128,
    pub mcr_ratio: i128,
}

// Client interface for the capital requirement engine. Both engine
// generations expose this interface, so the pool is wired to either
// by address alone.
#[contractclient(name = "PricingClient")]
pub trait PricingInterface {
    fn spot_price(env: Env, total_value: i128, mcr_eth: i128) -> i128;
    fn tokens_for_purchase(env: Env, purchase_value: i128, total_value: i128, mcr_eth: i128)
        -> i128;
    fn capital_metrics(env: Env, total_value: i128, mcr_eth: i128) -> CapitalMetrics;
}
