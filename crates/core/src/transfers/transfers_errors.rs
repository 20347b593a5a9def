use thiserror::Error;

/// Transfer workflow violations.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The source account does not exist or is not owned by the caller.
    #[error("Origin account {0} not found")]
    OriginAccountNotFound(String),

    /// The destination account does not exist or is not owned by the caller.
    #[error("Destination account {0} not found")]
    DestinationAccountNotFound(String),
}
