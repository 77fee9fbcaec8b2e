pub mod access;
pub mod branches;
pub mod health;
pub mod provisioning;

pub use health::health_check;
