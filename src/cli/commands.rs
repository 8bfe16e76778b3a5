use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stocksync", about = "Bulk order fan-out across subscriber accounts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute one trade intent across all active subscribers
    Execute {
        /// Stock symbol (e.g. RELIANCE)
        symbol: String,
        /// BUY or SELL
        side: String,
        /// Requested quantity per subscriber, before sizing
        quantity: i64,
        /// MARKET or LIMIT
        #[arg(long, default_value = "MARKET")]
        order_type: String,
        /// Limit price, required for LIMIT orders
        #[arg(long)]
        price: Option<f64>,
        /// Product type (CNC, INTRADAY, MARGIN)
        #[arg(long, default_value = "CNC")]
        product: String,
    },
    /// Show recent execution records across all batches
    History {
        #[arg(long, default_value = "100")]
        limit: usize,
    },
    /// Show all records of one batch
    Batch {
        /// Batch ID
        batch_id: String,
    },
    /// Show one subscriber's execution records
    Orders {
        /// Subscriber ID
        subscriber_id: String,
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// List all subscribers
    Subscribers,
    /// Add a subscriber
    SubscriberAdd {
        /// JSON with email, name, max_capital
        json: String,
    },
    /// Set a subscriber's subscription status
    SetSubscription {
        /// Subscriber ID
        id: String,
        /// active or inactive
        status: String,
    },
    /// Set a subscriber's capital allocation ceiling
    SetCapital {
        /// Subscriber ID
        id: String,
        /// Max capital (non-negative)
        amount: f64,
    },
    /// Show a subscriber's holdings
    Portfolio {
        /// Subscriber ID
        subscriber_id: String,
    },
    /// Set or overwrite one holding for a subscriber
    SetHolding {
        /// Subscriber ID
        subscriber_id: String,
        /// JSON with symbol, quantity, avg_price
        json: String,
    },
    /// Search the stock catalog
    Stocks {
        /// Substring of symbol or company name
        query: String,
    },
    /// Seed demo subscribers with capital and holdings
    SeedDemo,
}
