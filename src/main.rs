use clap::Parser;
use code_refiner::core::{ConfigProvider, Storage};
use code_refiner::utils::error::ErrorSeverity;
use code_refiner::utils::{logger, validation::Validate};
use code_refiner::{render, CliConfig, CodeReviewer, LocalStorage, ReviewError, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting code-refiner");

    if let Err(e) = cli.validate() {
        exit_with(&e);
    }

    let storage = LocalStorage::default();

    let html = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            cli.apply_overrides(&mut config);
            if let Err(e) = config.validate() {
                exit_with(&e);
            }
            run(&config, &cli, &storage).await
        }
        None => {
            // 設定值已在 cli.validate() 檢查過
            cli.resolve_api_key();
            run(&cli, &cli, &storage).await
        }
    };

    match &cli.output {
        Some(output) => {
            storage.write_file(output, html.as_bytes()).await?;
            tracing::info!("📁 Review saved to: {}", output);
        }
        None => println!("{}", html),
    }

    Ok(())
}

async fn run<C: ConfigProvider>(config: &C, cli: &CliConfig, storage: &LocalStorage) -> String {
    tracing::info!(
        "🔧 Model: {}, temperature: {}, max output tokens: {}, timeout: {}s",
        config.model(),
        config.temperature(),
        config.max_output_tokens(),
        config.request_timeout_secs()
    );

    let reviewer = CodeReviewer::from_config(config);

    match cli.files.as_slice() {
        [path] => {
            let review = reviewer.review_file(storage, path).await;
            render::render_single(&review)
        }
        paths => {
            let batch = reviewer.review_many(storage, paths).await;
            render::render_batch(&batch)
        }
    }
}

fn exit_with(e: &ReviewError) -> ! {
    tracing::error!(
        "❌ Configuration validation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
