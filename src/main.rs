mod config;
mod jobs;
mod models;
mod services;
mod utils;

use dotenv::dotenv;

use crate::config::Config;
use crate::services::{CognitoDirectory, S3Store};
use crate::utils::AppError;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting Cognito backup...");

    match run().await {
        Ok(()) => log::info!("✅ Cognito backup completed"),
        Err(e) => {
            log::error!("❌ Cognito backup failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    log::info!("👥 User pool: {}", config.user_pool_id);
    log::info!("🪣 Destination: s3://{}/{}", config.backup_bucket, config.backup_key);

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let directory = CognitoDirectory::new(aws_sdk_cognitoidentityprovider::Client::new(&aws_config));
    let store = S3Store::new(aws_sdk_s3::Client::new(&aws_config));

    jobs::backup_job::run_backup(&config, &directory, &store).await?;
    Ok(())
}
