// Domain layer - Core records and value types
pub mod dashboard;
pub mod flash;
