pub mod account;
pub mod subscription_type;
pub mod user;
pub mod user_type;
