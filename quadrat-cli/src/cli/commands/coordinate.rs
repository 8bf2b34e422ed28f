use super::super::settings::Settings;
use super::format_issues;
use anyhow::Result;
use clap::Args;
use colored::*;
use quadrat_core::{Country, QuadratError};
use quadrat_interpret::CoordinateInterpreter;
use quadrat_lookup::{geocoder_from_config, Geocoder};
use std::sync::Arc;

#[derive(Args)]
pub struct CoordinateArgs {
    /// Latitude text, decimal or degrees/minutes/seconds
    #[arg(allow_negative_numbers = true)]
    pub latitude: String,

    /// Longitude text, decimal or degrees/minutes/seconds
    #[arg(allow_negative_numbers = true)]
    pub longitude: String,

    /// Country the record states (code or name)
    #[arg(long)]
    pub country: Option<String>,

    /// Geodetic datum the record states
    #[arg(long)]
    pub datum: Option<String>,

    /// Skip reverse geocoding; every point is unresolved
    #[arg(long)]
    pub offline: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

struct Unresolved;

impl Geocoder for Unresolved {
    fn country_at(&self, _latitude: f64, _longitude: f64) -> Option<Country> {
        None
    }
}

pub fn run(args: CoordinateArgs, settings: &Settings) -> Result<()> {
    let known = match args.country.as_deref() {
        Some(text) => Some(
            Country::parse(text)
                .into_payload()
                .ok_or_else(|| QuadratError::Parse(format!("Unknown country: {}", text)))?,
        ),
        None => None,
    };

    let geocoder: Arc<dyn Geocoder> = if args.offline {
        Arc::new(Unresolved)
    } else {
        Arc::new(
            geocoder_from_config(&settings.config)
                .map_err(|e| QuadratError::Configuration(e.to_string()))?,
        )
    };
    let interpreter = CoordinateInterpreter::new(geocoder)
        .with_decimals(settings.config.location.coordinate_decimals);

    let outcome = interpreter.interpret(
        Some(&args.latitude),
        Some(&args.longitude),
        args.datum.as_deref(),
        known,
    );

    if args.json {
        let value = serde_json::json!({
            "success": outcome.is_success(),
            "point": outcome.payload(),
            "issues": outcome.issues(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match outcome.payload() {
        Some(point) => {
            println!("{} {}, {}", "✓".green(), point.latitude, point.longitude);
            let country = point
                .country
                .map(|c| format!("{} ({})", c.title(), c))
                .unwrap_or_else(|| "unresolved".to_string());
            println!("  country:    {}", country);
            if let Some(confidence) = outcome.confidence() {
                println!("  confidence: {:?}", confidence);
            }
        }
        None => println!("{} no usable coordinate", "✗".red()),
    }
    println!("  issues:     {}", format_issues(outcome.issues()));
    Ok(())
}
