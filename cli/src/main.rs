use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use futures_util::StreamExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use updates::{MessageRecord, Season, Update, WeatherSnapshot};
use weather::config::{WeatherConfig, provider_from_env};
use weather::{CurrentWeather, WeatherClient, WeatherError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket feed closed")]
    WsClosed,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("server returned HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error(transparent)]
    Weather(#[from] WeatherError),
    #[error("no weather provider configured (set WEATHERAPI_KEY or OPENWEATHER_API_KEY)")]
    NoProviderConfigured,
    #[error("asset write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "station", about = "Puffball weather station CLI")]
struct Cli {
    /// Base URL of the station server.
    #[arg(long, env = "STATION_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the server health endpoint.
    Ping,
    /// Fetch current conditions straight from a weather provider.
    Fetch {
        /// City query, overriding `WEATHER_CITY`.
        #[arg(long)]
        city: Option<String>,
    },
    /// Terminal display loop: poll the server and redraw on updates.
    Watch {
        /// Poll interval in seconds.
        #[arg(long, default_value_t = 30)]
        interval: u64,
        /// Subscribe to the websocket feed instead of polling.
        #[arg(long, default_value_t = false)]
        follow: bool,
    },
    /// Send a community message.
    Send {
        /// Display name; blank submits as Anonymous.
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        message: String,
    },
    /// Print the retained message log.
    Messages,
    /// Write placeholder mascot images into each season folder.
    ScaffoldAssets {
        #[arg(long, env = "ASSETS_DIR", default_value = "assets")]
        assets_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Ping => run_ping(&cli.base_url).await,
        Command::Fetch { city } => run_fetch(city).await,
        Command::Watch { interval, follow } => {
            if follow {
                run_follow(&cli.base_url).await
            } else {
                run_poll(&cli.base_url, interval).await
            }
        }
        Command::Send { name, message } => run_send(&cli.base_url, &name, &message).await,
        Command::Messages => run_messages(&cli.base_url).await,
        Command::ScaffoldAssets { assets_dir } => run_scaffold(&assets_dir),
    }
}

// =============================================================================
// SERVER COMMANDS
// =============================================================================

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Server {
            status: status.as_u16(),
            message: "health check failed".to_owned(),
        });
    }
    println!("ok");
    Ok(())
}

/// Shape of `GET /api/latest`.
#[derive(serde::Deserialize)]
struct Latest {
    message: Option<MessageRecord>,
    weather: WeatherSnapshot,
    scene: Option<String>,
    timestamp: i64,
}

#[derive(serde::Deserialize)]
struct MessagesPayload {
    messages: Vec<MessageRecord>,
}

async fn run_poll(base_url: &str, interval: u64) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let url = format!("{}/api/latest", base_url.trim_end_matches('/'));

    loop {
        match client.get(&url).send().await {
            Ok(response) => {
                let latest = response.json::<Latest>().await?;
                render_latest(&latest);
            }
            Err(e) => eprintln!("poll failed: {e}"),
        }
        tokio::time::sleep(Duration::from_secs(interval.max(1))).await;
    }
}

async fn run_follow(base_url: &str) -> Result<(), CliError> {
    let url = ws_url(base_url)?;
    let (mut stream, _) = connect_async(url)
        .await
        .map_err(|error| CliError::WsConnect(Box::new(error)))?;

    loop {
        let Some(message) = stream.next().await else {
            return Err(CliError::WsClosed);
        };
        match message.map_err(|error| CliError::WsConnect(Box::new(error)))? {
            Message::Text(text) => {
                let update: Update = serde_json::from_str(&text)?;
                render_update(&update);
            }
            Message::Close(_) => return Err(CliError::WsClosed),
            _ => {}
        }
    }
}

async fn run_send(base_url: &str, name: &str, message: &str) -> Result<(), CliError> {
    // The server answers with a page redirect; inspect it instead of following.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let url = format!("{}/send", base_url.trim_end_matches('/'));
    let response = client
        .post(url)
        .form(&[("username", name), ("message", message)])
        .send()
        .await?;

    let status = response.status();
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_owned();

    if status.is_redirection() && location.contains("sent=true") {
        println!("message sent");
        return Ok(());
    }
    if status.is_redirection() {
        return Err(CliError::Server {
            status: status.as_u16(),
            message: "message rejected (empty text?)".to_owned(),
        });
    }
    Err(CliError::Server {
        status: status.as_u16(),
        message: response.text().await.unwrap_or_default(),
    })
}

async fn run_messages(base_url: &str) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let url = format!("{}/api/messages", base_url.trim_end_matches('/'));
    let payload = client.get(url).send().await?.json::<MessagesPayload>().await?;
    print_messages(&payload.messages);
    Ok(())
}

// =============================================================================
// DIRECT FETCH
// =============================================================================

/// Look up current conditions without a server: try the configured
/// provider, then the other one if its key is present.
async fn run_fetch(city: Option<String>) -> Result<(), CliError> {
    let primary = provider_from_env()?;
    let mut missing_keys = 0;

    for provider in [primary, primary.fallback()] {
        let mut config = match WeatherConfig::for_provider(provider) {
            Ok(config) => config,
            Err(WeatherError::MissingApiKey { var }) => {
                eprintln!("skipping {}: {var} not set", provider.as_str());
                missing_keys += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(city) = &city {
            config.city.clone_from(city);
        }

        let client = WeatherClient::from_config(config)?;
        match client.current().await {
            Ok(snapshot) => {
                print_conditions(&snapshot);
                return Ok(());
            }
            Err(e) => eprintln!("{} lookup failed: {e}", provider.as_str()),
        }
    }

    if missing_keys == 2 {
        return Err(CliError::NoProviderConfigured);
    }
    Err(CliError::Server { status: 0, message: "all providers failed".to_owned() })
}

// =============================================================================
// SCAFFOLD
// =============================================================================

/// Write a placeholder mascot into each season folder so the scene cycler
/// has something to serve before real art lands.
fn run_scaffold(assets_dir: &std::path::Path) -> Result<(), CliError> {
    for season in Season::ALL {
        let dir = assets_dir.join("images").join(season.as_str());
        std::fs::create_dir_all(&dir)?;
        let path = dir.join("puffball.svg");
        std::fs::write(&path, placeholder_svg(season))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

/// Season-tinted placeholder mascot (body, eyes, mouth, blush) drawn on a
/// backdrop disc keyed to the season.
fn placeholder_svg(season: Season) -> String {
    let backdrop = season_backdrop(season);
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="200" viewBox="0 0 200 200">
  <circle cx="100" cy="100" r="98" fill="{backdrop}"/>
  <circle cx="100" cy="100" r="88" fill="#ffb6c1"/>
  <ellipse cx="77" cy="80" rx="8" ry="13" fill="#000000"/>
  <ellipse cx="123" cy="80" rx="8" ry="13" fill="#000000"/>
  <ellipse cx="100" cy="126" rx="10" ry="7" fill="#ff96b4"/>
  <circle cx="48" cy="110" r="12" fill="#ffc8dc"/>
  <circle cx="152" cy="110" r="12" fill="#ffc8dc"/>
</svg>
"##
    )
}

fn season_backdrop(season: Season) -> &'static str {
    match season {
        Season::Summer => "#ffdf00",
        Season::Spring => "#98fb98",
        Season::Fall => "#b0c4de",
        Season::Winter => "#f0f8ff",
    }
}

// =============================================================================
// RENDERING
// =============================================================================

fn render_latest(latest: &Latest) {
    print_conditions(&latest.weather);
    if let Some(scene) = &latest.scene {
        println!("scene        {scene}");
    }
    if let Some(message) = &latest.message {
        println!("latest       {} — {}", message.message, message.username);
    }
    println!("(as of unix {})", latest.timestamp);
    println!();
}

fn render_update(update: &Update) {
    match update {
        Update::Weather(snapshot) => print_conditions(snapshot),
        Update::Messages(log) => print_messages(log),
    }
}

fn print_conditions(snapshot: &WeatherSnapshot) {
    let place = [&snapshot.city, &snapshot.region, &snapshot.country]
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    println!("{}", "=".repeat(50));
    println!("location     {place}");
    println!(
        "temperature  {}°C (feels like {}°C)",
        snapshot.temperature_c, snapshot.feels_like_c
    );
    println!("condition    {} — {}", snapshot.condition, snapshot.description);
    println!("humidity     {}%", snapshot.humidity);
    println!("wind         {:.0} km/h", snapshot.wind_kph);
    println!("season       {}", snapshot.season);
    println!("{}", "=".repeat(50));
    println!("mascot says: {}", mascot_line(&snapshot.condition));
}

fn print_messages(log: &[MessageRecord]) {
    if log.is_empty() {
        println!("no messages yet");
        return;
    }
    for record in log {
        println!("[{}] {}: {}", record.timestamp, record.username, record.message);
    }
}

/// The mascot's take on the weather, keyed by condition text.
fn mascot_line(condition: &str) -> &'static str {
    let condition = condition.to_lowercase();
    if condition.contains("clear") || condition.contains("sun") {
        "Perfect beach weather!"
    } else if condition.contains("rain") {
        "Time for my umbrella!"
    } else if condition.contains("storm") || condition.contains("thunder") {
        "Exciting weather!"
    } else if condition.contains("snow") {
        "Snow day fun!"
    } else if condition.contains("cloud") {
        "Nice and cozy weather!"
    } else {
        "Any weather is good weather!"
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn ws_url(base_url: &str) -> Result<String, CliError> {
    if let Some(rest) = base_url.strip_prefix("http://") {
        return Ok(format!("ws://{}/ws", rest.trim_end_matches('/')));
    }
    if let Some(rest) = base_url.strip_prefix("https://") {
        return Ok(format!("wss://{}/ws", rest.trim_end_matches('/')));
    }

    Err(CliError::InvalidBaseUrl(base_url.to_owned()))
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
