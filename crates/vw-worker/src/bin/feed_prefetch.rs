//! Scheduled Lambda: prefetch the trending feed into the CDN.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;
use vw_core::Config;
use vw_worker::FeedPrefetchWorker;

static WORKER: OnceCell<FeedPrefetchWorker> = OnceCell::const_new();

async fn handler(event: LambdaEvent<Value>, config: Arc<Config>) -> Result<Value, Error> {
    let worker = WORKER
        .get_or_try_init(|| FeedPrefetchWorker::from_config(&config))
        .await?;

    match worker.handle(&event.payload).await {
        Ok(report) => {
            tracing::info!(
                request_id = %event.context.request_id,
                videos = report.videos_fetched,
                "Feed prefetch complete"
            );
            Ok(serde_json::to_value(report)?)
        }
        Err(e) => {
            tracing::error!(error = ?e, "Feed prefetch failed");
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;
    vw_infra::init_telemetry(
        "feed-prefetch",
        &config.base.environment,
        config.base.log_format,
    )?;

    tracing::info!(
        production = config.is_production(),
        region = %config.base.aws_region,
        "Configuration loaded"
    );

    let config = Arc::new(config);
    let result = run(service_fn(move |event: LambdaEvent<Value>| {
        handler(event, Arc::clone(&config))
    }))
    .await;

    vw_infra::shutdown_telemetry().await;
    result
}
