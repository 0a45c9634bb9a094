use anyhow::Result;
use clap::Parser;
use code_refiner::core::{ConfigProvider, Storage};
use code_refiner::utils::validation::Validate;
use code_refiner::{render, AuthMode, CliConfig, CodeReviewer, LocalStorage, TomlConfig};
use httpmock::prelude::*;
use tempfile::TempDir;

/// TOML 檔 + 命令列覆蓋 + 標頭認證，並把結果寫到輸出檔
#[tokio::test]
async fn test_toml_file_with_cli_overrides_and_header_auth() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = temp_dir.path().to_str().unwrap().replace('\\', "/");

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.5-pro:generateContent")
            .header("x-goog-api-key", "toml-key")
            .body_contains("\"maxOutputTokens\":1024")
            .body_contains("--- 用户补充指导 ---\\n请严厉批评");
        then.status(200).json_body(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "**1/10** 重写吧"}]}}]
        }));
    });

    let config_path = format!("{}/code-refiner.toml", temp_path);
    tokio::fs::write(
        &config_path,
        format!(
            r#"
[api]
base_url = "{}"
api_key = "toml-key"
auth = "query"

[generation]
model = "gemini-1.5-flash"
max_output_tokens = 1024

[review]
custom_instruction = "请骂人"
"#,
            server.base_url()
        ),
    )
    .await?;

    let source_path = format!("{}/app.js", temp_path);
    tokio::fs::write(&source_path, "var x = eval(input);").await?;

    let output_path = format!("{}/out/review.html", temp_path);
    let cli = CliConfig::parse_from([
        "code-refiner",
        "--config",
        config_path.as_str(),
        "--model",
        "gemini-2.5-pro",
        "--header-auth",
        "--output",
        output_path.as_str(),
        source_path.as_str(),
    ]);
    assert!(cli.validate().is_ok());

    let mut config = TomlConfig::from_file(&config_path)?;
    cli.apply_overrides(&mut config);
    assert!(config.validate().is_ok());
    assert_eq!(config.auth_mode(), AuthMode::Header);
    assert_eq!(config.api_key(), "toml-key");

    let storage = LocalStorage::default();
    let reviewer = CodeReviewer::from_config(&config);
    let review = reviewer.review_file(&storage, &cli.files[0]).await;
    let html = render::render_single(&review);

    storage.write_file(&output_path, html.as_bytes()).await?;

    api_mock.assert();
    let written = tokio::fs::read_to_string(&output_path).await?;
    assert_eq!(written, "<h3>文件 'app.js' 评审结果:</h3>**1/10** 重写吧");
    Ok(())
}

#[tokio::test]
async fn test_single_empty_file_renders_warning_without_request() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source_path = temp_dir.path().join("blank.rb");
    tokio::fs::write(&source_path, "\n\t\n").await?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200).body("{}");
    });

    let mut cli = CliConfig::parse_from([
        "code-refiner",
        "--api-key",
        "k",
        "--base-url",
        server.base_url().as_str(),
        source_path.to_str().unwrap(),
    ]);
    cli.resolve_api_key();
    assert!(cli.validate().is_ok());

    let reviewer = CodeReviewer::from_config(&cli);
    let review = reviewer
        .review_file(&LocalStorage::default(), &cli.files[0])
        .await;

    api_mock.assert_hits(0);
    assert_eq!(
        render::render_single(&review),
        "<div class='warning'>文件 'blank.rb' 是空的，请检查。</div>"
    );
    Ok(())
}
