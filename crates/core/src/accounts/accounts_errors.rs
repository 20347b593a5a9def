use thiserror::Error;

/// Account lifecycle violations.
#[derive(Error, Debug)]
pub enum AccountError {
    /// Deletion blocked: live transactions still reference the account.
    #[error("Account '{account}' has transactions attached; remove or reassign them first")]
    HasTransactions { account: String },

    /// The conventional bootstrap category is missing for the user.
    /// Default categories are seeded at first login; a skipped login can
    /// leave them absent.
    #[error("Default category '{category}' not found for the user; log in again to seed the default categories")]
    DefaultCategoryMissing { category: String },
}
