use std::sync::Arc;

use tracing::{debug, error, info};

use crate::{WeatherMetrics, WeatherProvider, error::FetchError};

/// Fetches, decodes and logs current conditions for one location.
///
/// Holds no state between cycles; concurrent cycles are independent.
#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    provider: Arc<dyn WeatherProvider>,
    location: String,
}

impl WeatherFetcher {
    pub fn new(provider: Arc<dyn WeatherProvider>, location: impl Into<String>) -> Self {
        Self {
            provider,
            location: location.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Run one fetch-decode-log cycle.
    ///
    /// Success emits the metrics line and a completion line at `info`.
    /// Any failure emits a single `error` record. The outcome is returned for
    /// callers that want it; nothing here retries.
    pub async fn run_cycle(&self) -> Result<WeatherMetrics, FetchError> {
        match self.provider.current(&self.location).await {
            Ok(snapshot) => {
                debug!(
                    location = %snapshot.location_name,
                    observed_at = ?snapshot.observed_at(),
                    "decoded current conditions"
                );

                let metrics = snapshot.metrics();
                info!(
                    temperature_k = metrics.temperature_k,
                    humidity_pct = metrics.humidity_pct,
                    wind_speed_mps = metrics.wind_speed_mps,
                    weather = ?metrics.description,
                    "{metrics}"
                );
                info!("Weather data fetched successfully.");

                Ok(metrics)
            }
            Err(err) => {
                match &err {
                    FetchError::Status { status, .. } => {
                        error!(
                            status = status.as_u16(),
                            "Failed to fetch weather data. Status code: {status}"
                        );
                    }
                    other => error!("Error fetching weather data: {other}"),
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::openweather::OpenWeatherProvider;
    use crate::testing::{CURRENT_LONDON, CapturedLogs};
    use tracing::Level;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher_for(base_url: String) -> WeatherFetcher {
        let provider = OpenWeatherProvider::new("test-key".to_string()).with_base_url(base_url);
        WeatherFetcher::new(Arc::new(provider), "London")
    }

    async fn serve(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "London"))
            .and(query_param("appid", "test-key"))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn success_logs_metrics_and_completion() {
        let server = serve(ResponseTemplate::new(200).set_body_string(CURRENT_LONDON)).await;
        let (logs, _guard) = CapturedLogs::install();

        let metrics = fetcher_for(server.uri()).run_cycle().await.unwrap();

        assert_eq!(metrics.temperature_k, 282.55);
        assert_eq!(
            logs.at(Level::INFO),
            vec![
                "Temperature: 282.55K, Humidity: 81%, Wind Speed: 4.1 m/s, Weather: light rain"
                    .to_string(),
                "Weather data fetched successfully.".to_string(),
            ]
        );
        assert!(logs.at(Level::ERROR).is_empty());
    }

    #[tokio::test]
    async fn empty_conditions_log_null_description() {
        let mut body: serde_json::Value = serde_json::from_str(CURRENT_LONDON).unwrap();
        body["weather"] = serde_json::json!([]);
        let server = serve(ResponseTemplate::new(200).set_body_json(body)).await;
        let (logs, _guard) = CapturedLogs::install();

        let metrics = fetcher_for(server.uri()).run_cycle().await.unwrap();

        assert_eq!(metrics.description, None);
        let info = logs.at(Level::INFO);
        assert_eq!(info.len(), 2);
        assert!(info[0].ends_with("Weather: null"));
        assert!(logs.at(Level::ERROR).is_empty());
    }

    #[tokio::test]
    async fn non_ok_status_logs_one_error_with_code() {
        for code in [401u16, 500] {
            let server = serve(ResponseTemplate::new(code).set_body_string("nope")).await;
            let (logs, _guard) = CapturedLogs::install();

            let err = fetcher_for(server.uri()).run_cycle().await.unwrap_err();

            assert!(matches!(err, FetchError::Status { .. }));
            let errors = logs.at(Level::ERROR);
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains(&code.to_string()));
            assert!(logs.at(Level::INFO).is_empty());
        }
    }

    #[tokio::test]
    async fn missing_main_logs_one_error_and_no_success() {
        let mut body: serde_json::Value = serde_json::from_str(CURRENT_LONDON).unwrap();
        body.as_object_mut().unwrap().remove("main");
        let server = serve(ResponseTemplate::new(200).set_body_json(body)).await;
        let (logs, _guard) = CapturedLogs::install();

        let err = fetcher_for(server.uri()).run_cycle().await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
        let errors = logs.at(Level::ERROR);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Error fetching weather data:"));
        assert!(errors[0].contains("main"));
        assert!(logs.at(Level::INFO).is_empty());
    }

    #[tokio::test]
    async fn transport_failure_logs_one_error() {
        let (logs, _guard) = CapturedLogs::install();

        let err = fetcher_for("http://127.0.0.1:1/data/2.5/weather".to_string())
            .run_cycle()
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
        let errors = logs.at(Level::ERROR);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Error fetching weather data: request failed"));
        assert!(!errors[0].contains("test-key"));
        assert!(logs.at(Level::INFO).is_empty());
    }
}
