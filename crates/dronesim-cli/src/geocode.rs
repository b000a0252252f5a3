//! Geocoding collaborator: forward search against a Nominatim-compatible
//! endpoint.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dronesim_core::NamedLocation;
use reqwest::blocking::Client;
use serde::Deserialize;

const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = concat!("dronesim/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// One search hit as Nominatim returns it (coordinates are strings).
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    display_name: String,
}

/// HTTP client for the location search box.
pub struct GeocodeClient {
    client: Client,
    base_url: String,
}

impl GeocodeClient {
    /// Create a client against a specific endpoint.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build geocoder HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Endpoint from `NOMINATIM_URL`, defaulting to the public instance.
    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var("NOMINATIM_URL").unwrap_or_else(|_| DEFAULT_NOMINATIM_URL.to_string());
        Self::new(base_url)
    }

    /// Look up `query`, returning the best match if any.
    pub fn search(&self, query: &str) -> Result<Option<NamedLocation>> {
        let url = format!("{}/search", self.base_url);
        let places: Vec<Place> = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("q", query)])
            .send()
            .context("geocoding request failed")?
            .error_for_status()
            .context("geocoding request rejected")?
            .json()
            .context("failed to decode geocoding response")?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };
        place_to_location(place).map(Some)
    }
}

fn place_to_location(place: Place) -> Result<NamedLocation> {
    let lat = place
        .lat
        .parse()
        .context("geocoder returned a non-numeric latitude")?;
    let lng = place
        .lon
        .parse()
        .context("geocoder returned a non-numeric longitude")?;
    Ok(NamedLocation {
        lat,
        lng,
        name: place.display_name,
    })
}
