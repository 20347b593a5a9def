use log::{debug, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::ofx_model::{ImportSummary, OfxPreviewEntry, OfxRecord};
use super::ofx_parser::parse_ofx;
use crate::accounts::AccountRepositoryTrait;
use crate::categories::CategoryServiceTrait;
use crate::errors::{Error, Result};
use crate::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait, TransactionType};

const FALLBACK_DESCRIPTION: &str = "Transação importada";

/// Imports OFX statement records as plain transactions tagged to the
/// shared system category, skipping likely duplicates.
pub struct OfxImportService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    category_service: Arc<dyn CategoryServiceTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl OfxImportService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        category_service: Arc<dyn CategoryServiceTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            account_repository,
            category_service,
            transaction_repository,
        }
    }

    /// Parses `content` and imports its records into `account_id`.
    ///
    /// One bad record never fails the batch: conversion and persistence
    /// errors are collected per record and the summary reports imported and
    /// skipped counts.
    pub async fn import(
        &self,
        account_id: &str,
        user_id: &str,
        content: &str,
    ) -> Result<ImportSummary> {
        if self
            .account_repository
            .get_by_id(account_id, user_id)?
            .is_none()
        {
            return Err(Error::NotFound(format!("account {account_id}")));
        }

        let category = self.category_service.get_or_create_transfer_category().await?;
        let mut existing = self.transaction_repository.list_by_user(user_id)?;
        let mut summary = ImportSummary::default();

        for record in parse_ofx(content) {
            let candidate = match convert_record(&record, account_id, user_id, &category.id) {
                Ok(candidate) => candidate,
                Err(err) => {
                    summary.errors.push(format!(
                        "record {}: {}",
                        record.external_id, err
                    ));
                    summary.skipped += 1;
                    continue;
                }
            };

            if is_duplicate(&existing, &candidate) {
                summary.skipped += 1;
                continue;
            }

            match self.transaction_repository.create(candidate).await {
                Ok(created) => {
                    // Keep the snapshot current so a repeated record inside
                    // the same file is also caught.
                    existing.push(created);
                    summary.imported += 1;
                }
                Err(err) => {
                    warn!("OFX record {} not imported: {}", record.external_id, err);
                    summary.errors.push(format!(
                        "record {}: {}",
                        record.external_id, err
                    ));
                    summary.skipped += 1;
                }
            }
        }

        debug!(
            "OFX import for account {}: {} imported, {} skipped",
            account_id, summary.imported, summary.skipped
        );
        Ok(summary)
    }

    /// Parse-only pass returning the records a file would import.
    pub fn preview(&self, content: &str) -> Vec<OfxPreviewEntry> {
        parse_ofx(content)
            .into_iter()
            .map(|record| {
                let transaction_type = type_for_amount(record.amount);
                OfxPreviewEntry {
                    external_id: record.external_id,
                    amount: record.amount,
                    date: record.date,
                    description: record.description,
                    memo: record.memo,
                    transaction_type,
                }
            })
            .collect()
    }
}

fn type_for_amount(amount: Decimal) -> TransactionType {
    if amount > Decimal::ZERO {
        TransactionType::Income
    } else {
        TransactionType::Expense
    }
}

/// Converts a parsed record into a creatable transaction. The sign moves
/// into the type; the stored amount is always non-negative.
fn convert_record(
    record: &OfxRecord,
    account_id: &str,
    user_id: &str,
    category_id: &str,
) -> Result<NewTransaction> {
    let amount = (record.amount.abs() * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .ok_or_else(|| Error::Unexpected(format!("amount {} is out of range", record.amount)))?;

    let mut description = record.description.trim().to_string();
    if description.is_empty() {
        description = record.memo.trim().to_string();
    }
    if description.is_empty() {
        description = FALLBACK_DESCRIPTION.to_string();
    }

    Ok(NewTransaction {
        id: None,
        user_id: user_id.to_string(),
        description,
        amount,
        transaction_type: type_for_amount(record.amount),
        category_id: category_id.to_string(),
        account_id: account_id.to_string(),
        due_date: record.date,
        competence_date: record.date,
        // Statement records describe money that already moved.
        is_paid: true,
        observation: Some(format!("Importado via OFX - {}", record.external_id)),
        is_recurring: false,
        recurring_type: None,
        installments: 1,
        current_installment: 1,
        parent_transaction_id: None,
        transfer_id: None,
    })
}

/// Duplicate heuristic: same account, due date within one day, amount
/// within one minor unit, and one description containing the other.
fn is_duplicate(existing: &[Transaction], candidate: &NewTransaction) -> bool {
    existing.iter().any(|tx| {
        if tx.account_id != candidate.account_id {
            return false;
        }
        let date_diff = (tx.due_date - candidate.due_date).num_days().abs();
        if date_diff > 1 {
            return false;
        }
        if (tx.amount - candidate.amount).abs() > 1 {
            return false;
        }
        let a = tx.description.to_lowercase();
        let b = candidate.description.to_lowercase();
        a.contains(&b) || b.contains(&a)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn record(amount: Decimal) -> OfxRecord {
        OfxRecord {
            external_id: "TX-1".to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            description: "Mercado".to_string(),
            memo: String::new(),
        }
    }

    fn existing(amount: i64, day: u32, description: &str) -> Transaction {
        let now = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Transaction {
            id: "t".to_string(),
            user_id: "u".to_string(),
            description: description.to_string(),
            amount,
            transaction_type: TransactionType::Expense,
            category_id: "c".to_string(),
            account_id: "a".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            competence_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            is_paid: true,
            observation: None,
            is_recurring: false,
            recurring_type: None,
            installments: 1,
            current_installment: 1,
            parent_transaction_id: None,
            transfer_id: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn negative_amount_becomes_positive_expense() {
        let tx = convert_record(&record(dec!(-42.50)), "a", "u", "c").unwrap();
        assert_eq!(tx.amount, 4250);
        assert_eq!(tx.transaction_type, TransactionType::Expense);
        assert!(tx.is_paid);
    }

    #[test]
    fn positive_amount_becomes_income() {
        let tx = convert_record(&record(dec!(10.00)), "a", "u", "c").unwrap();
        assert_eq!(tx.amount, 1000);
        assert_eq!(tx.transaction_type, TransactionType::Income);
    }

    #[test]
    fn duplicate_within_tolerances_is_detected() {
        let tx = convert_record(&record(dec!(-42.50)), "a", "u", "c").unwrap();
        // One day earlier, one cent apart, description is a superstring.
        let rows = vec![existing(4251, 9, "Mercado da esquina")];
        assert!(is_duplicate(&rows, &tx));
    }

    #[test]
    fn different_account_is_not_a_duplicate() {
        let tx = convert_record(&record(dec!(-42.50)), "other", "u", "c").unwrap();
        let rows = vec![existing(4250, 10, "Mercado")];
        assert!(!is_duplicate(&rows, &tx));
    }

    #[test]
    fn distant_date_is_not_a_duplicate() {
        let tx = convert_record(&record(dec!(-42.50)), "a", "u", "c").unwrap();
        let rows = vec![existing(4250, 20, "Mercado")];
        assert!(!is_duplicate(&rows, &tx));
    }
}
