mod database;
mod models;
mod services;
mod utils;

use database::MongoDB;
use services::AuditOutcome;
use utils::{Config, Report};

#[tokio::main]
async fn main() {
    // Load environment variables
    utils::load_env_files();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let mut report = Report::new(std::io::stdout().lock());

    report.banner("🔧 Pizoo MongoDB Repair & Optimization Tool");
    report.line(format!(
        "📡 Connecting to MongoDB: {}",
        utils::redact_credentials(&config.mongo_url)
    ));

    // URL inválida também conta como falha de conexão
    let db = match MongoDB::connect(&config).await {
        Ok(db) => db,
        Err(e) => {
            log::error!("❌ Could not build MongoDB client: {}", e);
            report.line(format!("❌ Connection failed: {}", e));
            report.flush();
            return;
        }
    };

    match services::run_audit(&db, &mut report, chrono::Utc::now()).await {
        AuditOutcome::Completed(summary) if !summary.is_healthy() => {
            log::warn!("⚠️  Database needs attention ({} item(s))", summary.actions.len());
        }
        AuditOutcome::Completed(_) => log::info!("✅ Database is healthy"),
        AuditOutcome::ConnectionFailed(e) => {
            log::warn!("⚠️  Audit skipped, database unreachable: {}", e);
        }
    }
}
