//! Storage-triggered Lambda: scan uploads and publish verdicts.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use tokio::sync::OnceCell;
use vw_core::models::StorageEvent;
use vw_core::Config;
use vw_worker::UploadScanner;

static SCANNER: OnceCell<UploadScanner> = OnceCell::const_new();

async fn handler(
    event: LambdaEvent<StorageEvent>,
    config: Arc<Config>,
) -> Result<serde_json::Value, Error> {
    let scanner = SCANNER
        .get_or_try_init(|| UploadScanner::from_config(&config))
        .await?;

    tracing::info!(
        request_id = %event.context.request_id,
        records = event.payload.records.len(),
        "Virus scan triggered"
    );
    let report = scanner.handle(&event.payload).await;
    Ok(serde_json::to_value(report)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;
    vw_infra::init_telemetry("virus-scan", &config.base.environment, config.base.log_format)?;

    tracing::info!(
        production = config.is_production(),
        region = %config.base.aws_region,
        "Configuration loaded"
    );

    let config = Arc::new(config);
    let result = run(service_fn(move |event: LambdaEvent<StorageEvent>| {
        handler(event, Arc::clone(&config))
    }))
    .await;

    vw_infra::shutdown_telemetry().await;
    result
}
