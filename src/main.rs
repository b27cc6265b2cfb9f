use clap::Parser;
use manufacturer_discovery::config::discovery_config::DiscoveryConfig;
use manufacturer_discovery::config::settings::Settings;
use manufacturer_discovery::utils::{logger, validation::Validate};
use manufacturer_discovery::{
    CliConfig, DiscoveryService, FallbackStore, GroqClient, MemoryRecordStore, ModelClient,
    NullModelClient, RecordStore, RestRecordStore, TrustPolicy,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting manufacturer-discovery");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證輸入
    if let Err(e) = cli.validate() {
        tracing::error!("❌ Input validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // 載入調校設定（未指定時使用預設值）
    let config = match &cli.config {
        Some(path) => match DiscoveryConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("❌ Failed to load config '{}': {}", path, e);
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        },
        None => DiscoveryConfig::default(),
    };
    if let Err(e) = config.validate_config() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let settings = Settings::from_env();
    let service = build_service(&settings, &config);

    let result = service.discover(&cli.api_name, &cli.country).await;

    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.success {
        std::process::exit(1);
    }

    Ok(())
}

fn build_service(settings: &Settings, config: &DiscoveryConfig) -> DiscoveryService {
    // 模型客戶端：沒有金鑰時改用 no-op 實作
    let model: Box<dyn ModelClient> = match &settings.groq_api_key {
        Some(key) => {
            let mut client = GroqClient::new(key.clone());
            if let Some(name) = config.model_name() {
                client = client.with_model(name);
            }
            if let Some(temperature) = config.temperature() {
                client = client.with_temperature(temperature);
            }
            if let Some(max_tokens) = config.max_tokens() {
                client = client.with_max_tokens(max_tokens);
            }
            if let Some(timeout) = config.model_timeout() {
                client = client.with_timeout(timeout);
            }
            Box::new(client)
        }
        None => {
            tracing::info!("📡 GROQ_API_KEY not set, running without model discovery");
            Box::new(NullModelClient)
        }
    };

    // 記錄儲存：REST 為主，記憶體為備援
    let table = config
        .table()
        .unwrap_or(settings.supabase_table.as_str())
        .to_string();
    let primary: Option<Box<dyn RecordStore>> =
        match (&settings.supabase_url, &settings.supabase_key) {
            (Some(url), Some(key)) => {
                let mut store = RestRecordStore::new(url.as_str(), key.as_str(), table);
                if let Some(timeout) = config.store_timeout() {
                    store = store.with_timeout(timeout);
                }
                Some(Box::new(store))
            }
            _ => {
                tracing::info!("💾 Supabase not configured, records stay in memory for this run");
                None
            }
        };
    let store = FallbackStore::new(primary, Box::new(MemoryRecordStore::new()));

    let trust = TrustPolicy::default().with_extra_domains(config.extra_domains());

    let mut service = DiscoveryService::new(Box::new(store), model).with_trust_policy(trust);
    if let Some(delay) = config.request_delay() {
        service = service.with_request_delay(delay);
    }
    service
}
