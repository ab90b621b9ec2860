pub mod config;
pub mod expert_registry;
pub mod oauth;
pub mod sme_registry;
