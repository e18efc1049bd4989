pub mod account;
pub mod memory;
pub mod subscription_type;
pub mod user;
pub mod user_type;

pub use account::PostgresAccountRepository;
pub use memory::InMemoryStore;
pub use subscription_type::PostgresSubscriptionTypeRepository;
pub use user::PostgresUserRepository;
pub use user_type::PostgresUserTypeRepository;

/// Integrity constraint a failed statement ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation<'a> {
    Unique(&'a str),
    ForeignKey(&'a str),
}

/// Name the violated unique or foreign key constraint, if that is why `err` happened.
pub(crate) fn violation(err: &sqlx::Error) -> Option<Violation<'_>> {
    let db_err = err.as_database_error()?;
    let constraint = db_err.constraint()?;

    if db_err.is_unique_violation() {
        Some(Violation::Unique(constraint))
    } else if db_err.is_foreign_key_violation() {
        Some(Violation::ForeignKey(constraint))
    } else {
        None
    }
}
