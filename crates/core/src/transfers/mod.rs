//! Transfers module - the linked-pair transfer workflow.

mod transfers_errors;
mod transfers_model;
mod transfers_service;
mod transfers_service_tests;

pub use transfers_errors::TransferError;
pub use transfers_model::{ExchangeInfo, TransferOutcome, TransferRequest};
pub use transfers_service::TransferService;
