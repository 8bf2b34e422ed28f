use super::super::settings::Settings;
use super::format_issues;
use anyhow::Result;
use clap::Args;
use colored::*;
use quadrat_interpret::TemporalInterpreter;

#[derive(Args)]
pub struct DateArgs {
    /// Year text (use "" to leave it out)
    pub year: Option<String>,

    /// Month text
    pub month: Option<String>,

    /// Day text
    pub day: Option<String>,

    /// Free text event date, e.g. "1999-07-19" or "19/7/1999"
    #[arg(long, value_name = "TEXT")]
    pub date: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: DateArgs, settings: &Settings) -> Result<()> {
    let interpreter = TemporalInterpreter::from_config(&settings.config.temporal);
    let outcome = interpreter.interpret_recorded_date(
        args.year.as_deref(),
        args.month.as_deref(),
        args.day.as_deref(),
        args.date.as_deref(),
    );

    if args.json {
        let payload = outcome.payload();
        let value = serde_json::json!({
            "success": outcome.is_success(),
            "year": payload.and_then(|p| p.year),
            "month": payload.and_then(|p| p.month),
            "day": payload.and_then(|p| p.day),
            "date": payload.and_then(|p| p.iso_date()),
            "issues": outcome.issues(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match outcome.payload() {
        Some(ymd) => {
            let show = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
            println!(
                "{} year {} month {} day {}",
                "✓".green(),
                show(ymd.year.map(|y| y.to_string())),
                show(ymd.month.map(|m| m.to_string())),
                show(ymd.day.map(|d| d.to_string())),
            );
            if let Some(date) = ymd.iso_date() {
                println!("  date:       {}", date.bold());
            }
            if let Some(confidence) = outcome.confidence() {
                println!("  confidence: {:?}", confidence);
            }
        }
        None => println!("{} no usable date", "✗".red()),
    }
    println!("  issues:     {}", format_issues(outcome.issues()));
    Ok(())
}
