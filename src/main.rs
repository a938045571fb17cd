use std::io;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_loans::infrastructure::SeaOrmLoanStore;
use library_loans::services::LoanController;
use library_loans::{config, console, db};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_loans=info,sea_orm=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Rebuilt from the sample data on every launch
    let conn = match db::init_db(&config.database_url).await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut controller =
        match LoanController::new(SeaOrmLoanStore::new(conn), config.date_input).await {
            Ok(controller) => controller,
            Err(e) => {
                tracing::error!("Failed to load library data: {}", e);
                return ExitCode::FAILURE;
            }
        };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = console::run(&mut controller, &mut stdin.lock(), &mut stdout.lock()).await;

    // Release the connection whatever happened on the console
    if let Err(e) = controller.into_store().close().await {
        tracing::warn!("Failed to close database: {}", e);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Console error: {}", e);
            ExitCode::FAILURE
        }
    }
}
