use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Placeholder shown in the empty search box. Input that still starts with
/// this prompt is treated the same as empty input.
pub const PLACEHOLDER_PROMPT: &str = "Enter city (e.g. Delhi)";

const WEATHER_TIMEOUT_SECS: u64 = 10;
const ICON_TIMEOUT_SECS: u64 = 8;

/// Endpoints and credentials for the weather provider, injected into the
/// fetch functions so tests can point them at a local mock server.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub weather_url: String,
    pub icon_url: String,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            weather_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            icon_url: "https://openweathermap.org/img/wn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Please type a city name.")]
    Validation,
    #[error("{0}")]
    Provider(String),
    #[error("Network problem: {0}")]
    Network(String),
    #[error("Failed to load weather: {0}")]
    Other(String),
}

impl FetchError {
    /// Title used for the modal notice that surfaces this error.
    pub fn title(&self) -> &'static str {
        match self {
            FetchError::Validation => "Input required",
            FetchError::Provider(_) => "API Error",
            FetchError::Network(_) => "Network Error",
            FetchError::Other(_) => "Error",
        }
    }
}

/// One fetched weather observation. Replaced wholesale on the next query.
#[derive(Debug, Clone)]
pub struct WeatherReading {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub condition: String,
    pub icon_code: String,
}

impl WeatherReading {
    /// Fixed multi-line block shown in the result card.
    pub fn report(&self) -> String {
        format!(
            "{}, {}\n\n\
             Temperature: {:.1} °C\n\
             Feels like: {:.1} °C\n\
             Condition: {}\n\
             Humidity: {}%\n\
             Wind: {} m/s",
            self.city,
            self.country,
            self.temperature_c,
            self.feels_like_c,
            self.condition,
            self.humidity_pct,
            display_speed(self.wind_speed_mps),
        )
    }
}

/// Wind speed as reported, except whole numbers keep one decimal
/// ("3" becomes "3.0", "3.2" stays "3.2").
fn display_speed(speed: f64) -> String {
    if speed.fract() == 0.0 {
        format!("{speed:.1}")
    } else {
        format!("{speed}")
    }
}

// Wire format of the OpenWeather current-conditions endpoint.
#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: Option<f64>,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: Option<OwSys>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

/// Check the raw search-box contents. Returns the trimmed city name, or
/// `Validation` for empty input or input still matching the placeholder.
pub fn validate_city(input: &str) -> Result<String, FetchError> {
    let city = input.trim();
    if city.is_empty() || city.to_lowercase().starts_with("enter city") {
        return Err(FetchError::Validation);
    }
    Ok(city.to_string())
}

/// Fetch current conditions for `city`. Metric units, single attempt,
/// bounded timeout. Non-2xx responses surface the provider's `message`
/// field title-cased.
pub async fn fetch_current(
    config: ProviderConfig,
    city: String,
) -> Result<WeatherReading, FetchError> {
    log::info!("requesting current weather for {city}");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(WEATHER_TIMEOUT_SECS))
        .build()
        .map_err(|e| FetchError::Other(e.to_string()))?;

    let res = client
        .get(&config.weather_url)
        .query(&[
            ("q", city.as_str()),
            ("appid", config.api_key.as_str()),
            ("units", "metric"),
        ])
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = res.status();
    log::debug!("weather endpoint answered with status {status}");

    let body = res
        .text()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !status.is_success() {
        let parsed: OwErrorBody =
            serde_json::from_str(&body).unwrap_or(OwErrorBody { message: None });
        let message = parsed
            .message
            .unwrap_or_else(|| "Could not get weather.".to_string());
        return Err(FetchError::Provider(title_case(&message)));
    }

    let parsed: OwCurrentResponse = serde_json::from_str(&body)
        .map_err(|e| FetchError::Other(format!("could not parse provider response: {e}")))?;

    reading_from_response(parsed)
}

fn reading_from_response(res: OwCurrentResponse) -> Result<WeatherReading, FetchError> {
    let conditions = res
        .weather
        .first()
        .ok_or_else(|| FetchError::Other("provider response contained no conditions".into()))?;

    Ok(WeatherReading {
        city: res.name,
        country: res.sys.and_then(|s| s.country).unwrap_or_default(),
        temperature_c: res.main.temp,
        feels_like_c: res.main.feels_like.unwrap_or(res.main.temp),
        humidity_pct: res.main.humidity,
        wind_speed_mps: res.wind.map(|w| w.speed).unwrap_or(0.0),
        condition: title_case(&conditions.description),
        icon_code: conditions.icon.clone(),
    })
}

/// Fetch the raw PNG for a condition icon code. Failures here are the
/// catch-all kind: the already displayed text result must survive them.
pub async fn fetch_icon(config: ProviderConfig, icon_code: String) -> Result<Vec<u8>, FetchError> {
    let url = format!("{}/{}@2x.png", config.icon_url, icon_code);
    log::debug!("fetching condition icon from {url}");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(ICON_TIMEOUT_SECS))
        .build()
        .map_err(|e| FetchError::Other(e.to_string()))?;

    let res = client
        .get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Other(e.to_string()))?;

    if !res.status().is_success() {
        return Err(FetchError::Other(format!(
            "icon request failed with status {}",
            res.status()
        )));
    }

    let bytes = res
        .bytes()
        .await
        .map_err(|e| FetchError::Other(e.to_string()))?;

    Ok(bytes.to_vec())
}

/// Uppercase the first letter of every whitespace-separated word and
/// lowercase the rest, e.g. "clear sky" -> "Clear Sky".
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base: &str) -> ProviderConfig {
        ProviderConfig {
            api_key: "test-key".to_string(),
            weather_url: format!("{base}/data/2.5/weather"),
            icon_url: format!("{base}/img/wn"),
        }
    }

    fn delhi_payload() -> serde_json::Value {
        json!({
            "name": "Delhi",
            "sys": { "country": "IN" },
            "main": { "temp": 28.4, "feels_like": 30.1, "humidity": 55 },
            "wind": { "speed": 3.2 },
            "weather": [ { "description": "clear sky", "icon": "01d" } ]
        })
    }

    #[test]
    fn validation_rejects_empty_and_placeholder() {
        assert!(matches!(validate_city(""), Err(FetchError::Validation)));
        assert!(matches!(validate_city("   "), Err(FetchError::Validation)));
        assert!(matches!(
            validate_city(PLACEHOLDER_PROMPT),
            Err(FetchError::Validation)
        ));
        assert!(matches!(
            validate_city("enter city somewhere"),
            Err(FetchError::Validation)
        ));
    }

    #[test]
    fn validation_trims_city_names() {
        assert_eq!(validate_city("  Delhi  ").unwrap(), "Delhi");
        assert_eq!(validate_city("New York").unwrap(), "New York");
    }

    #[test]
    fn title_case_matches_display_rules() {
        assert_eq!(title_case("clear sky"), "Clear Sky");
        assert_eq!(title_case("CITY NOT FOUND"), "City Not Found");
        assert_eq!(title_case("  broken   clouds "), "Broken Clouds");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn report_uses_fixed_template() {
        let reading = WeatherReading {
            city: "Delhi".to_string(),
            country: "IN".to_string(),
            temperature_c: 28.4,
            feels_like_c: 30.1,
            humidity_pct: 55,
            wind_speed_mps: 3.2,
            condition: "Clear Sky".to_string(),
            icon_code: "01d".to_string(),
        };

        let report = reading.report();
        assert!(report.starts_with("Delhi, IN"));
        assert_eq!(
            report,
            "Delhi, IN\n\nTemperature: 28.4 °C\nFeels like: 30.1 °C\n\
             Condition: Clear Sky\nHumidity: 55%\nWind: 3.2 m/s"
        );
    }

    #[test]
    fn report_keeps_one_decimal_for_whole_wind_speeds() {
        let reading = WeatherReading {
            city: "Delhi".to_string(),
            country: "IN".to_string(),
            temperature_c: 28.4,
            feels_like_c: 30.1,
            humidity_pct: 55,
            wind_speed_mps: 3.0,
            condition: "Clear Sky".to_string(),
            icon_code: "01d".to_string(),
        };

        assert!(reading.report().ends_with("Wind: 3.0 m/s"));
        assert_eq!(display_speed(3.0), "3.0");
        assert_eq!(display_speed(0.0), "0.0");
        assert_eq!(display_speed(3.2), "3.2");
        assert_eq!(display_speed(3.25), "3.25");
    }

    #[test]
    fn parsing_applies_defaults_for_optional_fields() {
        let body = json!({
            "name": "Nowhere",
            "main": { "temp": 5.0, "humidity": 80 },
            "weather": [ { "description": "mist", "icon": "50d" } ]
        });
        let parsed: OwCurrentResponse = serde_json::from_value(body).unwrap();
        let reading = reading_from_response(parsed).unwrap();

        assert_eq!(reading.country, "");
        assert_eq!(reading.feels_like_c, 5.0);
        assert_eq!(reading.wind_speed_mps, 0.0);
        assert_eq!(reading.condition, "Mist");
    }

    #[test]
    fn parsing_rejects_missing_conditions() {
        let body = json!({
            "name": "Nowhere",
            "main": { "temp": 5.0, "humidity": 80 },
            "weather": []
        });
        let parsed: OwCurrentResponse = serde_json::from_value(body).unwrap();
        assert!(matches!(
            reading_from_response(parsed),
            Err(FetchError::Other(_))
        ));
    }

    #[tokio::test]
    async fn fetch_current_extracts_all_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Delhi"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(delhi_payload()))
            .mount(&server)
            .await;

        let reading = fetch_current(test_config(&server.uri()), "Delhi".to_string())
            .await
            .unwrap();

        assert_eq!(reading.city, "Delhi");
        assert_eq!(reading.country, "IN");
        assert_eq!(reading.temperature_c, 28.4);
        assert_eq!(reading.feels_like_c, 30.1);
        assert_eq!(reading.humidity_pct, 55);
        assert_eq!(reading.wind_speed_mps, 3.2);
        assert_eq!(reading.condition, "Clear Sky");
        assert_eq!(reading.icon_code, "01d");

        let report = reading.report();
        assert!(report.contains("Temperature: 28.4 °C"));
        assert!(report.contains("Feels like: 30.1 °C"));
        assert!(report.contains("Condition: Clear Sky"));
        assert!(report.contains("Humidity: 55%"));
        assert!(report.contains("Wind: 3.2 m/s"));
    }

    #[tokio::test]
    async fn fetch_current_surfaces_provider_message_title_cased() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&server)
            .await;

        let err = fetch_current(test_config(&server.uri()), "Atlantis".to_string())
            .await
            .unwrap_err();

        match err {
            FetchError::Provider(message) => assert_eq!(message, "City Not Found"),
            other => panic!("expected Provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_current_maps_transport_failures_to_network() {
        // Bind an ephemeral port and release it before connecting, so the
        // request is refused at the transport level.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let uri = format!("http://127.0.0.1:{port}");

        let err = fetch_current(test_config(&uri), "Delhi".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn fetch_icon_returns_raw_bytes() {
        let png = {
            let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]));
            let mut bytes = Vec::new();
            img.write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();
            bytes
        };

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/img/wn/01d@2x.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(png.clone()))
            .mount(&server)
            .await;

        let bytes = fetch_icon(test_config(&server.uri()), "01d".to_string())
            .await
            .unwrap();
        assert_eq!(bytes, png);
    }

    #[tokio::test]
    async fn fetch_icon_failure_is_catch_all() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/img/wn/99x@2x.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetch_icon(test_config(&server.uri()), "99x".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Other(_)));
    }
}
