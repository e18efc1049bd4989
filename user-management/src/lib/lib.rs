pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::account;
pub use domain::subscription_type;
pub use domain::user;
pub use domain::user_type;
pub use outbound::repositories;
