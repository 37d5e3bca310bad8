use ratesheet::cli::convert::conversion_text;
use ratesheet::core::config::AppConfig;
use ratesheet::core::{CancelSignal, ConversionForm, RatesPage};
use ratesheet::providers::ExchangeRateApiProvider;
use std::fs;
use tracing::{error, info};

// Mock rate service and config helpers shared by the tests below
mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const LATEST_RATES: &str = r#"{
        "provider": "https://www.exchangerate-api.com",
        "base": "USD",
        "date": "2024-05-01",
        "time_last_updated": 1714521601,
        "rates": {
            "USD": 1,
            "EUR": 0.935,
            "GBP": 0.8,
            "UAH": 39.62,
            "JPY": 157.8
        }
    }"#;

    pub async fn create_rates_server(template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/latest/USD"))
            .respond_with(template)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(dir: &std::path::Path, base_url: &str) -> std::path::PathBuf {
        let config_path = dir.join("config.yaml");
        let config_content = format!(
            r#"
        provider:
          base_url: {base_url}
          timeout_secs: 5
        defaults:
          from: "USD"
          to: "EUR"
    "#
        );
        std::fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path
    }
}

#[test_log::test(tokio::test)]
async fn test_rates_flow_with_export() {
    let mock_server = test_utils::create_rates_server(
        wiremock::ResponseTemplate::new(200).set_body_string(test_utils::LATEST_RATES),
    )
    .await;
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(temp_dir.path(), &mock_server.uri());
    let export_path = temp_dir.path().join("rates.csv");

    let result = ratesheet::run_command(
        ratesheet::AppCommand::Rates {
            ascending: false,
            chart: true,
            export: Some(export_path.clone()),
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Rates command failed with: {:?}", result.err());

    let exported = fs::read_to_string(&export_path).expect("Export file should exist");
    let lines: Vec<&str> = exported.lines().collect();
    assert_eq!(lines[0], "currency_code,exchange_rate,base_currency,date");
    assert_eq!(lines.len(), 6);
    assert!(lines.contains(&"UAH,39.62,USD,2024-05-01"));
    // One request, even with table, chart and export.
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_convert_flow_with_mock() {
    let mock_server = test_utils::create_rates_server(
        wiremock::ResponseTemplate::new(200).set_body_string(test_utils::LATEST_RATES),
    )
    .await;
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(temp_dir.path(), &mock_server.uri());

    let result = ratesheet::run_command(
        ratesheet::AppCommand::Convert {
            amount: "100".to_string(),
            from: None,
            to: None,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Convert command failed with: {:?}", result.err());

    let config = AppConfig::load_from_path(&config_path).expect("Failed to load config");
    let source = ExchangeRateApiProvider::new(&config.provider.base_url, config.provider.timeout());
    let mut page = RatesPage::new(config.provider.timeout());
    page.refresh(&source, &CancelSignal::never()).await;

    let cases = [
        (
            ConversionForm::new("100", &config.defaults.from, &config.defaults.to),
            "100 USD = 93.50 EUR",
        ),
        (ConversionForm::new("100", "gbp", "jpy"), "100 GBP = 19725.00 JPY"),
        (
            ConversionForm::new("100", "USD", "ZZZ"),
            "Currency ZZZ is not available in the current rates.",
        ),
    ];
    for (form, expected) in cases {
        let text = conversion_text(&page, &form);
        assert_eq!(console::strip_ansi_codes(&text), expected);
    }
}

#[test_log::test(tokio::test)]
async fn test_server_error_degrades_to_status() {
    let mock_server =
        test_utils::create_rates_server(wiremock::ResponseTemplate::new(500)).await;
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(temp_dir.path(), &mock_server.uri());
    let export_path = temp_dir.path().join("rates.csv");

    let result = ratesheet::run_command(
        ratesheet::AppCommand::Rates {
            ascending: true,
            chart: false,
            export: Some(export_path.clone()),
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;

    assert!(result.is_ok(), "Failure should be reported as status, got: {:?}", result.err());
    assert!(!export_path.exists());
}

#[test_log::test(tokio::test)]
async fn test_page_keeps_rates_after_failed_refresh() {
    use ratesheet::core::Phase;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/latest/USD"))
        .respond_with(ResponseTemplate::new(200).set_body_string(test_utils::LATEST_RATES))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v4/latest/USD"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let source = ExchangeRateApiProvider::new(&mock_server.uri(), Duration::from_secs(5));
    let mut page = RatesPage::new(Duration::from_secs(5));

    assert!(page.refresh(&source, &CancelSignal::never()).await.success);
    let loaded = page.render();

    let status = page.refresh(&source, &CancelSignal::never()).await.clone();
    info!(?status, "Second refresh finished");
    assert!(!status.success);
    assert_eq!(status.message, "Failed to fetch rates: HTTP error: 500");
    assert_eq!(page.phase(), Phase::Loaded);
    assert_eq!(page.render(), loaded);
}

#[test_log::test(tokio::test)]
#[ignore = "requires network access"]
async fn test_real_exchange_rate_api() {
    use ratesheet::core::RateSource;
    use std::time::Duration;

    let provider =
        ExchangeRateApiProvider::new("https://api.exchangerate-api.com", Duration::from_secs(10));
    info!("Fetching latest rates from exchangerate-api");

    match provider.fetch_snapshot().await {
        Ok(snapshot) => {
            info!(date = %snapshot.date, count = snapshot.rates.len(), "Received snapshot");
            assert_eq!(snapshot.base, "USD");
            assert_eq!(snapshot.rate("USD"), Some(1.0));
            assert!(snapshot.rates.len() > 100, "Expected a full rate table");
        }
        Err(e) => {
            error!("Rate API request failed: {e}\n{e:?}");
            panic!("Rate API request failed: {e}");
        }
    }
}
