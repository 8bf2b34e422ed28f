/// Blocking clients for a GBIF-compatible web API
use crate::resilience::{with_retry, RetryPolicy};
use crate::{Geocoder, LookupError, NameMatcher};
use quadrat_core::config::LookupConfig;
use quadrat_core::{Country, MatchQuery, NameUsageMatch};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const MATCH_PATH: &str = "species/match";
const REVERSE_GEOCODE_PATH: &str = "geocode/reverse";

fn base_url(api_url: &str) -> Result<Url, LookupError> {
    let mut text = api_url.trim().to_string();
    // Url::join drops the last segment unless it ends in a slash
    if !text.ends_with('/') {
        text.push('/');
    }
    Ok(Url::parse(&text)?)
}

fn http_client(config: &LookupConfig) -> Result<reqwest::blocking::Client, LookupError> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| LookupError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))
}

/// Request URL for a name match
pub fn match_url(base: &Url, query: &MatchQuery) -> Result<Url, LookupError> {
    let mut url = base.join(MATCH_PATH)?;
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query.query_pairs() {
            pairs.append_pair(key, &value);
        }
    }
    Ok(url)
}

/// Request URL for a reverse geocode
pub fn reverse_geocode_url(base: &Url, latitude: f64, longitude: f64) -> Result<Url, LookupError> {
    let mut url = base.join(REVERSE_GEOCODE_PATH)?;
    url.query_pairs_mut()
        .append_pair("lat", &latitude.to_string())
        .append_pair("lng", &longitude.to_string());
    Ok(url)
}

fn get_json<T: for<'de> Deserialize<'de>>(
    client: &reqwest::blocking::Client,
    url: &Url,
) -> Result<T, LookupError> {
    let response = client.get(url.clone()).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(LookupError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let body = response.text()?;
    Ok(serde_json::from_str(&body)?)
}

/// Name matching against the `species/match` endpoint
pub struct GbifNameMatchClient {
    base_url: Url,
    client: reqwest::blocking::Client,
}

impl GbifNameMatchClient {
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        Ok(Self {
            base_url: base_url(&config.api_url)?,
            client: http_client(config)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl NameMatcher for GbifNameMatchClient {
    fn match_name(&self, query: &MatchQuery) -> Result<NameUsageMatch, LookupError> {
        let url = match_url(&self.base_url, query)?;
        debug!("Matching name via {}", url);
        get_json(&self.client, &url).map_err(|e| {
            warn!("Name match request {} failed: {}", url, e);
            e
        })
    }
}

/// One feature of a reverse geocode answer
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeLocation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub iso_country_code2_digit: Option<String>,
}

/// First political feature with a known ISO code, else the first feature with one
pub fn pick_country(locations: &[GeocodeLocation]) -> Option<Country> {
    let code = |loc: &GeocodeLocation| {
        loc.iso_country_code2_digit
            .as_deref()
            .and_then(Country::from_iso_code)
    };
    locations
        .iter()
        .filter(|loc| {
            loc.kind
                .as_deref()
                .map(|k| k.eq_ignore_ascii_case("political"))
                .unwrap_or(false)
        })
        .find_map(code)
        .or_else(|| locations.iter().find_map(code))
}

/// Reverse geocoding against the `geocode/reverse` endpoint
pub struct GbifGeocoder {
    base_url: Url,
    client: reqwest::blocking::Client,
    policy: RetryPolicy,
}

impl GbifGeocoder {
    pub fn new(config: &LookupConfig, policy: RetryPolicy) -> Result<Self, LookupError> {
        Ok(Self {
            base_url: base_url(&config.api_url)?,
            client: http_client(config)?,
            policy,
        })
    }

    fn locations(&self, latitude: f64, longitude: f64) -> Result<Vec<GeocodeLocation>, LookupError> {
        let url = reverse_geocode_url(&self.base_url, latitude, longitude)?;
        with_retry(
            || get_json(&self.client, &url),
            &self.policy,
            &format!("reverse geocode {}", url),
        )
    }
}

impl Geocoder for GbifGeocoder {
    fn country_at(&self, latitude: f64, longitude: f64) -> Option<Country> {
        match self.locations(latitude, longitude) {
            Ok(locations) => pick_country(&locations),
            Err(e) => {
                warn!(
                    "Reverse geocode of ({}, {}) failed, treating as unresolved: {}",
                    latitude, longitude, e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadrat_core::Rank;

    fn base() -> Url {
        base_url("https://api.gbif.org/v1").unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        assert_eq!(base().as_str(), "https://api.gbif.org/v1/");
        assert!(base_url("not a url").is_err());
    }

    #[test]
    fn test_match_url() {
        let query = MatchQuery {
            kingdom: Some("Animalia".into()),
            family: Some("Felidae".into()),
            name: Some("Puma concolor".into()),
            rank: Some(Rank::Species),
            ..Default::default()
        };
        let url = match_url(&base(), &query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.gbif.org/v1/species/match?kingdom=Animalia&family=Felidae&name=Puma+concolor&rank=SPECIES"
        );
    }

    #[test]
    fn test_reverse_geocode_url() {
        let url = reverse_geocode_url(&base(), 55.68, -12.5).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.gbif.org/v1/geocode/reverse?lat=55.68&lng=-12.5"
        );
    }

    #[test]
    fn test_pick_country_prefers_political() {
        let json = r#"[
            {"id": "http://marineregions.org/mrgid/5669", "type": "EEZ", "title": "Danish EEZ", "isoCountryCode2Digit": "DK"},
            {"id": "SWE", "type": "Political", "title": "Sweden", "isoCountryCode2Digit": "SE"}
        ]"#;
        let locations: Vec<GeocodeLocation> = serde_json::from_str(json).unwrap();
        assert_eq!(pick_country(&locations), Some(Country::SWEDEN));
    }

    #[test]
    fn test_pick_country_falls_back_and_ignores_unknown_codes() {
        let json = r#"[
            {"type": "IHO", "title": "North Sea"},
            {"type": "EEZ", "isoCountryCode2Digit": "ZZ"},
            {"type": "EEZ", "isoCountryCode2Digit": "NO"}
        ]"#;
        let locations: Vec<GeocodeLocation> = serde_json::from_str(json).unwrap();
        assert_eq!(pick_country(&locations).map(|c| c.iso2().to_string()), Some("NO".to_string()));
        assert_eq!(pick_country(&[]), None);
    }
}
