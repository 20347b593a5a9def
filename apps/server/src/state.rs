//! Application state: the wired service graph shared by every handler.

use std::sync::Arc;

use caixa_core::accounts::{AccountService, AccountServiceTrait};
use caixa_core::categories::{CategoryService, CategoryServiceTrait};
use caixa_core::fx::{ExchangeRateApiSource, FixedRateSource, FxService, FxServiceTrait, RateSourceTrait};
use caixa_core::ofx::OfxImportService;
use caixa_core::transactions::{TransactionService, TransactionServiceTrait};
use caixa_core::transfers::TransferService;
use caixa_core::users::{UserService, UserServiceTrait};
use caixa_storage_sqlite::accounts::AccountRepository;
use caixa_storage_sqlite::categories::CategoryRepository;
use caixa_storage_sqlite::transactions::TransactionRepository;
use caixa_storage_sqlite::users::UserRepository;
use caixa_storage_sqlite::{create_pool, run_migrations, spawn_writer};

use crate::config::Config;

pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub transfer_service: Arc<TransferService>,
    pub fx_service: Arc<dyn FxServiceTrait>,
    pub ofx_service: Arc<OfxImportService>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub jwt_secret: String,
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let pool = Arc::new(create_pool(&config.database_path)?);
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let account_repository = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let category_repository = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer));

    let rate_source: Arc<dyn RateSourceTrait> = match &config.exchange_api_key {
        Some(key) => Arc::new(ExchangeRateApiSource::new(key.clone())?),
        None => {
            tracing::warn!("EXCHANGE_API_KEY not set, using the fixed rate table");
            Arc::new(FixedRateSource::default())
        }
    };
    let fx_service = Arc::new(FxService::new(rate_source));

    let category_service = Arc::new(CategoryService::new(
        category_repository.clone(),
        transaction_repository.clone(),
    ));
    let account_service = Arc::new(AccountService::new(
        account_repository.clone(),
        category_repository,
        transaction_repository.clone(),
    ));
    let transaction_service = Arc::new(TransactionService::new(transaction_repository.clone()));
    let transfer_service = Arc::new(TransferService::new(
        account_repository.clone(),
        category_service.clone(),
        transaction_repository.clone(),
        fx_service.clone(),
    ));
    let ofx_service = Arc::new(OfxImportService::new(
        account_repository,
        category_service.clone(),
        transaction_repository,
    ));
    let user_service = Arc::new(UserService::new(user_repository));

    Ok(Arc::new(AppState {
        account_service,
        category_service,
        transaction_service,
        transfer_service,
        fx_service,
        ofx_service,
        user_service,
        jwt_secret: config.jwt_secret.clone(),
    }))
}
