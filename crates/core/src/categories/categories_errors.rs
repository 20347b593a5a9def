use thiserror::Error;

/// Category hierarchy and lifecycle violations.
#[derive(Error, Debug)]
pub enum CategoryError {
    /// The declared parent category does not exist.
    #[error("Parent category {0} not found")]
    ParentNotFound(String),

    /// The declared parent category exists but is inactive.
    #[error("Parent category '{0}' is inactive")]
    ParentInactive(String),

    /// A subcategory must share its parent's type.
    #[error("Subcategory type must match the type of parent category '{0}'")]
    ParentTypeMismatch(String),

    /// Deletion blocked: the category itself has live transactions.
    #[error("Category '{category}' has transactions attached; remove or reassign them first")]
    HasTransactions { category: String },

    /// Deletion blocked: a subcategory in the subtree has live transactions.
    #[error("Subcategory '{subcategory}' of category '{category}' has transactions attached; remove or reassign them first")]
    SubcategoryHasTransactions {
        category: String,
        subcategory: String,
    },
}
