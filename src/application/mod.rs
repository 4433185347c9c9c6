// Application layer - Use cases and repository contracts
pub mod dashboard_service;
pub mod dashboard_store;
