//! dt-api - Disruptive Technologies REST API client
//!
//! Lists projects and devices and fetches device event history over HTTP Basic
//! Auth. Each call is a single stateless round trip; credentials are passed in
//! per call and never stored.
//!
//! ```no_run
//! use dt_api::{Credentials, DtApiClient, EventQuery};
//!
//! # async fn demo() -> dt_api::Result<()> {
//! let client = DtApiClient::default();
//! let creds = Credentials::new("key-id", "key-secret");
//! for project in client.list_projects(&creds).await? {
//!     let devices = client
//!         .list_devices(&creds, &project.name, &["temperature".to_string()])
//!         .await?;
//!     for device in devices {
//!         let events = client
//!             .fetch_events(&creds, &device.name, &EventQuery::new())
//!             .await?;
//!         println!("{}: {} events", device.name, events.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod clock;
pub mod credentials;
pub mod error;
pub mod io;
pub mod models;
pub mod query;

pub use client::{DtApiClient, DEFAULT_BASE_URL};
pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::Credentials;
pub use error::{DtApiError, Result};
pub use io::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use models::{
    temperature_samples, Device, Event, EventData, Project, Temperature, TemperatureSample,
};
pub use query::{EventQuery, DEFAULT_EVENT_LOOKBACK_HOURS};
