use riskboard::api::{self, app_state::AppState};
use riskboard::config::loader::ConfigLoader;
use riskboard::dataset::{default_schema, generate_sample_records, risk_weights};
use riskboard::observability::{AppMetrics, ObservabilityState, create_observability_router, init_tracing};
use riskboard::services::aggregation::AggregateSnapshot;
use riskboard::services::classifier::create_classifier;
use riskboard::services::prediction::create_prediction_service;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;
    init_tracing(&config.logging.level);
    info!("Starting Riskboard...");

    ConfigLoader::validate(&config)?;
    info!("Configuration loaded successfully");

    // 启动阶段：单线程顺序执行，加载记录、运行归约器、冻结快照，
    // 全部完成后才开始监听
    if let Some(path) = &config.dataset.path {
        // CSV 摄取由外部协作方负责；当前构建仅支持样本数据
        warn!(
            "dataset.path {:?} 已配置，但摄取由外部流程处理，本次使用样本数据",
            path
        );
    }
    let schema = default_schema();
    let store = Arc::new(generate_sample_records(
        schema.clone(),
        config.dataset.sample_size,
        config.dataset.seed,
    )?);
    info!("Record store loaded with {} records", store.len());

    let snapshot = Arc::new(AggregateSnapshot::build(&store)?);
    info!("Aggregate snapshot frozen");

    let weights = risk_weights(config.dataset.seed, schema.len());
    let classifier = create_classifier(weights);
    info!("Classifier initialized");

    let prediction_service = create_prediction_service(
        schema.clone(),
        classifier,
        config.prediction.cache_capacity,
        Duration::from_millis(config.prediction.classifier_timeout_ms),
    );
    info!(
        "Prediction service initialized (cache capacity: {})",
        config.prediction.cache_capacity
    );

    let metrics = Arc::new(AppMetrics::default());
    let app_state = AppState::new(store, snapshot, prediction_service, metrics.clone());
    info!("Application state created");

    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics,
    ));
    let api_router = api::create_router(app_state);
    let router = create_observability_router(observability_state).merge(api_router);
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
