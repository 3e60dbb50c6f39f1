/// Surprise Travel CLI
///
/// Interactive console front-end: collects the trip parameters through
/// sequential prompts, runs the live pipeline when TRAVEL_API_KEY is
/// configured (deterministic itinerary otherwise) and pretty-prints the
/// result. Blank answers flow through to the extractor defaults; nothing
/// is re-prompted.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use serde_json::json;

use travel_core::{render, TripRequest};
use travel_crew::{run_pipeline, CrewConfig};

fn prompt(reader: &mut io::StdinLock, stdout: &mut io::Stdout, question: &str) -> Result<String> {
    print!("{} ", question);
    stdout.flush()?;

    let mut input = String::new();
    reader.read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn show_step(step: u32, total: u32, message: &str) {
    println!("\n[Step {}/{}] {}", step, total, message);
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    println!("\n╔════════════════════════════════════════════════════════════╗");
    println!("║          🎪 Welcome to Your AI Travel Planning Team        ║");
    println!("║   Activity Planner · Restaurant Scout · Itinerary Compiler ║");
    println!("╚════════════════════════════════════════════════════════════╝\n");

    println!("Let's start with some basic information:");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut reader = stdin.lock();

    let origin = prompt(&mut reader, &mut stdout, "🛫 Where are you traveling from?")?;
    let destination = prompt(&mut reader, &mut stdout, "🌍 Where would you like to go?")?;
    let interests = prompt(
        &mut reader,
        &mut stdout,
        "✨ What are your travel interests and preferences?",
    )?;
    let budget = prompt(&mut reader, &mut stdout, "💰 What's your budget for this trip?")?;
    let dates = prompt(&mut reader, &mut stdout, "📅 When would you like to travel?")?;

    println!("\n🎯 A few more questions to personalize your experience:");
    let age = prompt(&mut reader, &mut stdout, "🎂 What's your age?")?;
    let hotel = prompt(
        &mut reader,
        &mut stdout,
        "🏨 Hotel style preference (luxury/boutique/budget)?",
    )?;
    let duration = prompt(
        &mut reader,
        &mut stdout,
        "⏰ How long is your trip? (e.g., 7 days)",
    )?;

    // Blank answers fall back to the documented defaults
    let trip = TripRequest::from_fields(&json!({
        "origin": origin,
        "destination": destination,
        "interests": interests,
        "budget": budget,
        "dates": dates,
        "age": age,
        "hotel_preference": hotel,
        "trip_duration": duration,
    }));

    println!("\n{}", "=".repeat(60));
    println!("🤖 AI AGENTS STARTING COLLABORATION");
    println!("{}", "=".repeat(60));

    let itinerary = match CrewConfig::from_env() {
        Ok(config) => {
            let client = reqwest::Client::new();

            show_step(1, 3, &format!(
                "Activity Planner: researching experiences in {}...",
                trip.destination
            ));
            show_step(2, 3, &format!(
                "Restaurant Scout: finding dining spots in {}...",
                trip.destination
            ));
            show_step(3, 3, &format!(
                "Itinerary Compiler: assembling your {} plan...",
                trip.trip_duration
            ));

            match run_pipeline(&client, &config, &trip).await {
                Ok(result) => {
                    // Structured pipeline output renders as an itinerary;
                    // anything else prints wrapped as-is.
                    match serde_json::from_str(&result) {
                        Ok(itinerary) => itinerary,
                        Err(_) => {
                            println!("{}", render::wrap_crew_result(&trip, &result));
                            return Ok(());
                        }
                    }
                }
                Err(e) => {
                    println!("\n⚠️  Agent pipeline unavailable ({}), using the demo itinerary", e);
                    render::placeholder_itinerary(&trip)
                }
            }
        }
        Err(_) => {
            println!("\n(TRAVEL_API_KEY not set, generating the demo itinerary)");
            render::placeholder_itinerary(&trip)
        }
    };

    println!(
        "\n🎉 YOUR SURPRISE TRIP TO {} IS READY!",
        trip.destination.to_uppercase()
    );
    println!("{}", render::format_itinerary(&itinerary));

    Ok(())
}
