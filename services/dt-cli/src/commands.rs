//! Subcommands of the dt tool

use clap::Subcommand;
use dt_api::{temperature_samples, Credentials, DtApiClient, EventQuery};
use serde_json::Value;

use crate::config::Config;
use crate::forecast::{build_forecast, validate_points};

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List projects visible to the credentials
    Projects,

    /// List the devices of a project
    Devices {
        /// Project resource name, e.g. projects/<id>
        project: String,

        /// Only include devices of this type (repeatable, overrides config)
        #[arg(long = "type", value_name = "TYPE")]
        types: Vec<String>,
    },

    /// Fetch the event history of a device
    Events {
        /// Device resource name, e.g. projects/<id>/devices/<id>
        device: String,

        /// Only include events of this type (repeatable, overrides config)
        #[arg(long = "event-type", value_name = "TYPE")]
        event_types: Vec<String>,

        /// Start of the window (ISO 8601). Defaults to 48 hours ago.
        #[arg(long)]
        start_time: Option<String>,
    },

    /// Smooth a device's temperature history with a Gaussian process
    Forecast {
        /// Device resource name, e.g. projects/<id>/devices/<id>
        device: String,

        /// Start of the window (ISO 8601). Defaults to 48 hours ago.
        #[arg(long)]
        start_time: Option<String>,

        /// Number of evaluated points (overrides config)
        #[arg(long)]
        points: Option<usize>,
    },
}

fn or_configured(given: &[String], configured: &[String]) -> Vec<String> {
    if given.is_empty() {
        configured.to_vec()
    } else {
        given.to_vec()
    }
}

/// Run `command` and return its output as JSON
pub async fn execute(
    client: &DtApiClient,
    credentials: &Credentials,
    config: &Config,
    command: &Command,
) -> crate::Result<Value> {
    match command {
        Command::Projects => {
            let projects = client.list_projects(credentials).await?;
            tracing::info!("Found {} projects", projects.len());
            Ok(serde_json::to_value(projects)?)
        }
        Command::Devices { project, types } => {
            let types = or_configured(types, &config.devices.types);
            let devices = client.list_devices(credentials, project, &types).await?;
            tracing::info!("Found {} devices in {}", devices.len(), project);
            Ok(serde_json::to_value(devices)?)
        }
        Command::Events {
            device,
            event_types,
            start_time,
        } => {
            let query = EventQuery {
                event_types: or_configured(event_types, &config.events.event_types),
                start_time: start_time.clone(),
            };
            let events = client.fetch_events(credentials, device, &query).await?;
            tracing::info!("Fetched {} events for {}", events.len(), device);
            Ok(serde_json::to_value(events)?)
        }
        Command::Forecast {
            device,
            start_time,
            points,
        } => {
            let points = validate_points(points.unwrap_or(config.forecast.points))?;
            let query = EventQuery {
                event_types: vec!["temperature".to_string()],
                start_time: start_time.clone(),
            };
            let events = client.fetch_events(credentials, device, &query).await?;
            let samples = temperature_samples(&events)?;
            tracing::info!("Fitting {} temperature readings for {}", samples.len(), device);
            let forecast = build_forecast(device, &samples, &config.forecast, points)?;
            Ok(serde_json::to_value(forecast)?)
        }
    }
}
