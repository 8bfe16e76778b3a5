use clap::Parser;
use stocksync::cli::commands::{Cli, Commands};
use stocksync::domain::values::holding::Holding;
use stocksync::domain::values::intent::TradeIntent;
use stocksync::domain::values::order_side::OrderSide;
use stocksync::domain::values::order_type::OrderType;
use stocksync::domain::values::product_type::ProductType;
use stocksync::domain::values::subscription_status::SubscriptionStatus;
use stocksync::StockSync;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let db_path = std::env::var("STOCKSYNC_DB").unwrap_or_else(|_| "./stocksync.db".into());

    let sync = match StockSync::new(&db_path) {
        Ok(sync) => sync,
        Err(e) => {
            eprintln!("Error initializing StockSync: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(sync, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(sync: StockSync, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Execute {
            symbol,
            side,
            quantity,
            order_type,
            price,
            product,
        } => {
            let side: OrderSide = side.parse().map_err(|e: String| e)?;
            let order_type: OrderType = order_type.parse().map_err(|e: String| e)?;
            let product_type: ProductType = product.parse().map_err(|e: String| e)?;

            let intent = TradeIntent {
                symbol,
                side,
                order_type,
                quantity,
                limit_price: price,
                product_type,
            };
            let summary = sync.execute_batch(intent).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::History { limit } => {
            let records = sync.execution_history(limit)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Batch { batch_id } => {
            let records = sync.batch_records(&batch_id)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Orders {
            subscriber_id,
            limit,
        } => {
            let records = sync.subscriber_orders(&subscriber_id, limit)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Subscribers => {
            let subscribers = sync.subscribers()?;
            println!("{}", serde_json::to_string_pretty(&subscribers)?);
        }
        Commands::SubscriberAdd { json } => {
            let data: serde_json::Value = serde_json::from_str(&json)?;
            let email = data["email"]
                .as_str()
                .ok_or("Missing required field: email")?
                .to_string();
            let name = data["name"]
                .as_str()
                .ok_or("Missing required field: name")?
                .to_string();
            let max_capital = data["max_capital"].as_f64().unwrap_or(0.0);

            let subscriber = sync.subscriber_add(email, name, max_capital)?;
            println!("{}", serde_json::to_string_pretty(&subscriber)?);
        }
        Commands::SetSubscription { id, status } => {
            let status: SubscriptionStatus = status.parse().map_err(|e: String| e)?;
            sync.set_subscription(&id, status)?;
            println!("Subscriber {id} set to {status}");
        }
        Commands::SetCapital { id, amount } => {
            sync.set_capital(&id, amount)?;
            println!("Subscriber {id} capital set to {amount}");
        }
        Commands::Portfolio { subscriber_id } => {
            let holdings = sync.portfolio(&subscriber_id)?;
            println!("{}", serde_json::to_string_pretty(&holdings)?);
        }
        Commands::SetHolding {
            subscriber_id,
            json,
        } => {
            let data: serde_json::Value = serde_json::from_str(&json)?;
            let symbol = data["symbol"]
                .as_str()
                .ok_or("Missing required field: symbol")?
                .to_string();
            let quantity = data["quantity"].as_i64().ok_or("quantity required")?;
            let avg_price = data["avg_price"].as_f64().ok_or("avg_price required")?;

            let holding = Holding::new(symbol, quantity, avg_price);
            sync.set_holding(&subscriber_id, &holding)?;
            println!("{}", serde_json::to_string_pretty(&holding)?);
        }
        Commands::Stocks { query } => {
            let stocks = sync.search_stocks(&query).await?;
            println!("{}", serde_json::to_string_pretty(&stocks)?);
        }
        Commands::SeedDemo => {
            seed_demo(&sync)?;
        }
    }
    Ok(())
}

/// Create a pair of demo subscribers with capital and starter holdings.
fn seed_demo(sync: &StockSync) -> Result<(), Box<dyn std::error::Error>> {
    let john = sync.subscriber_add(
        "john@example.com".into(),
        "John Doe".into(),
        100_000.0,
    )?;
    sync.set_subscription(&john.id, SubscriptionStatus::Active)?;
    sync.set_holding(&john.id, &Holding::new("RELIANCE", 50, 2800.0))?;
    sync.set_holding(&john.id, &Holding::new("TCS", 25, 4000.0))?;
    sync.set_holding(&john.id, &Holding::new("HDFCBANK", 100, 1500.0))?;

    let priya = sync.subscriber_add(
        "priya@example.com".into(),
        "Priya Sharma".into(),
        250_000.0,
    )?;
    sync.set_subscription(&priya.id, SubscriptionStatus::Active)?;
    sync.set_holding(&priya.id, &Holding::new("INFY", 40, 1750.0))?;

    println!("Seeded demo subscribers:");
    println!("  {} ({})", john.email, john.id);
    println!("  {} ({})", priya.email, priya.id);
    Ok(())
}
