use crate::constants::{
    GEOCODE_BIASED_LIMIT, GEOCODE_BIAS_MAX_METERS, GEOCODE_TIMEOUT_SECS, GEOCODE_VIEWBOX_DEGREES,
};
use crate::models::Coordinate;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Place-name geocoding collaborator. Resolves free text to a coordinate
/// through a fallback chain: viewbox-biased Nominatim search around the
/// caller's position, plain Nominatim search, then Photon. Every step is
/// best-effort; `None` means the whole chain came up empty.
#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    nominatim_url: String,
    photon_url: String,
    user_agent: String,
}

impl GeocodingClient {
    pub fn new(nominatim_url: String, photon_url: String, user_agent: String) -> Self {
        GeocodingClient {
            client: Client::new(),
            nominatim_url,
            photon_url,
            user_agent,
        }
    }

    pub async fn geocode(&self, place: &str, near: Option<Coordinate>) -> Option<Coordinate> {
        if let Some(near) = near {
            if let Some(coord) = self.biased_search(place, &near).await {
                return Some(coord);
            }
        }

        if let Some(coord) = self.plain_search(place).await {
            return Some(coord);
        }

        let result = self.photon_search(place).await;
        if result.is_none() {
            tracing::warn!("Geocoding exhausted all providers for '{}'", place);
        }
        result
    }

    /// Nominatim search restricted to a viewbox around the caller, strict
    /// first and then relaxed. Hits farther than the bias radius are
    /// ignored so a same-named place across the country does not win over
    /// the fallback chain.
    async fn biased_search(&self, place: &str, near: &Coordinate) -> Option<Coordinate> {
        let box_deg = GEOCODE_VIEWBOX_DEGREES;
        let viewbox = format!(
            "{},{},{},{}",
            near.lon - box_deg,
            near.lat + box_deg,
            near.lon + box_deg,
            near.lat - box_deg
        );

        let limit = GEOCODE_BIASED_LIMIT.to_string();
        for bounded in ["1", "0"] {
            let response = self
                .client
                .get(&self.nominatim_url)
                .header(USER_AGENT, &self.user_agent)
                .query(&[
                    ("q", place),
                    ("format", "json"),
                    ("limit", limit.as_str()),
                    ("viewbox", viewbox.as_str()),
                    ("bounded", bounded),
                    ("addressdetails", "0"),
                ])
                .timeout(Duration::from_secs(GEOCODE_TIMEOUT_SECS))
                .send()
                .await;

            let places = match Self::parse_nominatim(response).await {
                Ok(places) => places,
                Err(e) => {
                    tracing::warn!("Biased geocode (bounded={}) failed: {}", bounded, e);
                    continue;
                }
            };

            for candidate in places.iter().filter_map(NominatimPlace::coordinate) {
                let dist_m = near.distance_meters(&candidate);
                if dist_m <= GEOCODE_BIAS_MAX_METERS {
                    tracing::info!(
                        dist_km = %format!("{:.1}", dist_m / 1000.0),
                        "Geocoded '{}' via biased search (bounded={}): ({:.4}, {:.4})",
                        place,
                        bounded,
                        candidate.lat,
                        candidate.lon
                    );
                    return Some(candidate);
                }
            }
        }

        None
    }

    async fn plain_search(&self, place: &str) -> Option<Coordinate> {
        let response = self
            .client
            .get(&self.nominatim_url)
            .header(USER_AGENT, &self.user_agent)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .timeout(Duration::from_secs(GEOCODE_TIMEOUT_SECS))
            .send()
            .await;

        match Self::parse_nominatim(response).await {
            Ok(places) => {
                let coord = places.first().and_then(NominatimPlace::coordinate);
                if let Some(c) = coord {
                    tracing::info!(
                        "Geocoded '{}' via Nominatim: ({:.4}, {:.4})",
                        place,
                        c.lat,
                        c.lon
                    );
                }
                coord
            }
            Err(e) => {
                tracing::warn!("Nominatim geocode failed: {}", e);
                None
            }
        }
    }

    async fn photon_search(&self, place: &str) -> Option<Coordinate> {
        let response = self
            .client
            .get(&self.photon_url)
            .header(USER_AGENT, &self.user_agent)
            .query(&[("q", place), ("limit", "3"), ("lang", "en")])
            .timeout(Duration::from_secs(GEOCODE_TIMEOUT_SECS))
            .send()
            .await;

        let body: PhotonResponse = match response {
            Ok(r) => match r.json().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Photon geocode parse failed: {}", e);
                    return None;
                }
            },
            Err(e) => {
                tracing::warn!("Photon geocode failed: {}", e);
                return None;
            }
        };

        let coord = body.features.iter().find_map(|f| {
            // Photon coordinates are [lon, lat]
            Coordinate::new(f.geometry.coordinates[1], f.geometry.coordinates[0]).ok()
        });
        if let Some(c) = coord {
            tracing::info!("Geocoded '{}' via Photon: ({:.4}, {:.4})", place, c.lat, c.lon);
        }
        coord
    }

    async fn parse_nominatim(
        response: std::result::Result<reqwest::Response, reqwest::Error>,
    ) -> std::result::Result<Vec<NominatimPlace>, String> {
        let response = response.map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()));
        }
        response.json().await.map_err(|e| e.to_string())
    }
}

// Nominatim returns lat/lon as strings

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimPlace {
    fn coordinate(&self) -> Option<Coordinate> {
        let lat = self.lat.parse().ok()?;
        let lon = self.lon.parse().ok()?;
        Coordinate::new(lat, lon).ok()
    }
}

#[derive(Debug, Deserialize)]
struct PhotonResponse {
    #[serde(default)]
    features: Vec<PhotonFeature>,
}

#[derive(Debug, Deserialize)]
struct PhotonFeature {
    geometry: PhotonGeometry,
}

#[derive(Debug, Deserialize)]
struct PhotonGeometry {
    coordinates: [f64; 2], // [lon, lat]
}
