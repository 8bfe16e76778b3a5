pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::execute_batch::ExecuteBatchUseCase;
use crate::application::history::HistoryUseCase;
use crate::application::subscribers::SubscriberUseCase;
use crate::domain::entities::execution_record::ExecutionRecord;
use crate::domain::entities::stock::StockReference;
use crate::domain::entities::subscriber::SubscriberProfile;
use crate::domain::error::DomainError;
use crate::domain::ports::broker_client::BrokerClient;
use crate::domain::ports::execution_ledger::ExecutionLedger;
use crate::domain::ports::market_data::MarketData;
use crate::domain::ports::subscriber_directory::SubscriberDirectory;
use crate::domain::values::holding::Holding;
use crate::domain::values::intent::TradeIntent;
use crate::domain::values::subscription_status::SubscriptionStatus;
use crate::domain::values::summary::BatchSummary;
use crate::infrastructure::brokers::dhan::DhanClient;
use crate::infrastructure::brokers::paper::PaperBroker;
use crate::infrastructure::marketdata::catalog::StaticCatalog;
use crate::infrastructure::sqlite::ledger_repo::SqliteExecutionLedger;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::subscriber_repo::SqliteSubscriberDirectory;
use rusqlite::Connection;
use std::sync::Arc;

pub struct StockSync {
    execute_uc: ExecuteBatchUseCase,
    history_uc: HistoryUseCase,
    subscriber_uc: SubscriberUseCase,
    market_data: Arc<dyn MarketData>,
}

impl StockSync {
    /// Wire the engine from environment configuration: `STOCKSYNC_BROKER`
    /// selects `paper` (default) or `dhan`; the paper fill rate comes from
    /// `STOCKSYNC_FILL_RATE`, Dhan credentials from `DHAN_CLIENT_ID` and
    /// `DHAN_ACCESS_TOKEN`.
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let broker_kind = std::env::var("STOCKSYNC_BROKER").unwrap_or_else(|_| "paper".into());

        let broker: Arc<dyn BrokerClient> = match broker_kind.as_str() {
            "dhan" => {
                let client_id = std::env::var("DHAN_CLIENT_ID").map_err(|_| {
                    DomainError::InvalidInput("DHAN_CLIENT_ID is required for the dhan broker".into())
                })?;
                let access_token = std::env::var("DHAN_ACCESS_TOKEN").map_err(|_| {
                    DomainError::InvalidInput(
                        "DHAN_ACCESS_TOKEN is required for the dhan broker".into(),
                    )
                })?;
                Arc::new(DhanClient::new(client_id, access_token))
            }
            _ => {
                let fill_rate = std::env::var("STOCKSYNC_FILL_RATE")
                    .ok()
                    .and_then(|v| v.parse::<f64>().ok())
                    .unwrap_or(0.9);
                Arc::new(PaperBroker::new(fill_rate))
            }
        };

        Self::with_providers(db_path, broker, Arc::new(StaticCatalog::nse_default()))
    }

    /// Wire the engine around explicit broker and market-data providers.
    pub fn with_providers(
        db_path: &str,
        broker: Arc<dyn BrokerClient>,
        market_data: Arc<dyn MarketData>,
    ) -> Result<Self, DomainError> {
        let conn1 = open_connection(db_path)?;
        let conn2 = open_connection(db_path)?;

        let directory: Arc<dyn SubscriberDirectory> =
            Arc::new(SqliteSubscriberDirectory::new(conn1));
        let ledger: Arc<dyn ExecutionLedger> = Arc::new(SqliteExecutionLedger::new(conn2));

        Ok(Self {
            execute_uc: ExecuteBatchUseCase::new(
                directory.clone(),
                market_data.clone(),
                broker,
                ledger.clone(),
            ),
            history_uc: HistoryUseCase::new(ledger),
            subscriber_uc: SubscriberUseCase::new(directory),
            market_data,
        })
    }

    // Delegating methods

    pub async fn execute_batch(&self, intent: TradeIntent) -> Result<BatchSummary, DomainError> {
        self.execute_uc.execute(intent).await
    }

    pub fn execution_history(&self, limit: usize) -> Result<Vec<ExecutionRecord>, DomainError> {
        self.history_uc.recent(limit)
    }

    pub fn batch_records(&self, batch_id: &str) -> Result<Vec<ExecutionRecord>, DomainError> {
        self.history_uc.by_batch(batch_id)
    }

    pub fn subscriber_orders(
        &self,
        subscriber_id: &str,
        limit: usize,
    ) -> Result<Vec<ExecutionRecord>, DomainError> {
        self.history_uc.by_subscriber(subscriber_id, limit)
    }

    pub fn subscriber_add(
        &self,
        email: String,
        name: String,
        max_capital: f64,
    ) -> Result<SubscriberProfile, DomainError> {
        self.subscriber_uc.add(email, name, max_capital)
    }

    pub fn subscriber_get(&self, id: &str) -> Result<SubscriberProfile, DomainError> {
        self.subscriber_uc.get(id)
    }

    pub fn subscribers(&self) -> Result<Vec<SubscriberProfile>, DomainError> {
        self.subscriber_uc.list()
    }

    pub fn set_subscription(
        &self,
        id: &str,
        status: SubscriptionStatus,
    ) -> Result<(), DomainError> {
        self.subscriber_uc.set_subscription_status(id, status)
    }

    pub fn set_capital(&self, id: &str, max_capital: f64) -> Result<(), DomainError> {
        self.subscriber_uc.set_max_capital(id, max_capital)
    }

    pub fn portfolio(&self, subscriber_id: &str) -> Result<Vec<Holding>, DomainError> {
        self.subscriber_uc.portfolio(subscriber_id)
    }

    pub fn set_holding(
        &self,
        subscriber_id: &str,
        holding: &Holding,
    ) -> Result<(), DomainError> {
        self.subscriber_uc.set_holding(subscriber_id, holding)
    }

    pub async fn search_stocks(&self, query: &str) -> Result<Vec<StockReference>, DomainError> {
        self.market_data.search(query).await
    }
}

fn open_connection(db_path: &str) -> Result<Connection, DomainError> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
    // Each repo owns a disjoint table set, so migrating every connection is
    // idempotent and keeps `:memory:` databases self-contained.
    run_migrations(&conn)?;
    Ok(conn)
}
