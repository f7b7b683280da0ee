//! Fanout - Main Entry Point
//! Prints the typed feature tour, then broadcasts messages to a worker pool

mod config;

use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fanout_core::application::tour::{self, Describe, Greeter, Ordinal, Person, TourConfig};
use fanout_core::application::worker::constants::RUN_TIMEOUT;
use fanout_core::application::run_broadcast;
use fanout_core::port::SimulatedHandler;

use config::RunConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    init_logging()?;
    info!("Fanout v{} starting...", VERSION);

    // 2. Load configuration
    let run_config = RunConfig::from_env()?;
    let tour_config = TourConfig::default();

    // 3. Tour
    print_tour(&tour_config);

    // 4. Broadcast
    section("Concurrency (workers, bounded queue)");
    let handler = Arc::new(SimulatedHandler::new(
        run_config.dispatch.processing_latency(),
    ));
    let summary = tokio::time::timeout(
        RUN_TIMEOUT,
        run_broadcast(run_config.dispatch.clone(), handler, run_config.messages),
    )
    .await
    .map_err(|_| anyhow::anyhow!("Broadcast did not finish within {:?}", RUN_TIMEOUT))??;

    info!(summary = %serde_json::to_string(&summary)?, "Broadcast complete");
    println!("All workers have finished.");

    section("Done");
    Ok(())
}

fn init_logging() -> Result<()> {
    let log_format = std::env::var("FANOUT_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("fanout=info,fanout_core=info"))?;

    match log_format.as_str() {
        "json" => {
            // Machine-readable structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
    Ok(())
}

fn section(title: &str) {
    println!("\n---------- {} ----------", title);
}

#[allow(clippy::approx_constant)]
fn print_tour(tour_config: &TourConfig) {
    section("Constants and Configuration");
    let ordinals: Vec<String> = Ordinal::ALL
        .iter()
        .map(|o| format!("{:?}: {}", o, o.value()))
        .collect();
    println!("{}", ordinals.join(" "));
    println!("Config banner: {}", tour_config.greeting_banner);

    section("Struct and Trait");
    let mut person = Person::new("Alice", 29, "An embedded struct example");
    println!("{}", person.greet());
    println!("Embedded Description: {}", person.embedded.description);
    person.have_birthday();
    println!("After birthday, {} is now {}.", person.name, person.age);
    let greeter: &dyn Greeter = &person;
    println!("Greeter interface says: {}", greeter.greet());

    section("Slices, Arrays, and Maps");
    let slice: &[i32] = &[1, 2, 3];
    let array = ["Go", "Rust", "Python"];
    let ages: BTreeMap<&str, u32> = [("Alice", 25), ("Bob", 30)].into_iter().collect();
    println!("slice: {:?}", slice);
    println!("array: {:?}", array);
    println!("map: {:?}", ages);

    section("Error Handling and Custom Error");
    match tour::cause_error(true) {
        Ok(()) => println!("No error triggered."),
        Err(e) => println!("Error occurred: {}", e),
    }

    section("Guarded Fault");
    match tour::recover_forced_fault() {
        Some(msg) => println!("Recovered from panic: {}", msg),
        None => println!("Guarded scope completed without a fault."),
    }

    section("Type Tags");
    let values: [&dyn Describe; 3] = [&123i64, &"Hello", &person];
    for value in values {
        println!("{}", tour::describe_type(value));
    }

    section("Generics (min)");
    println!("Min of 5 and 10: {}", tour::min(5, 10));
    println!("Min of 3.14 and 2.71: {}", tour::min(3.14, 2.71));

    section("Random Pair");
    let (first, second) = tour::random_pair(&mut rand::thread_rng());
    println!("Two random ints: {}, {}", first, second);

    section("Control Flow (match, for)");
    println!("{}", tour::describe_choice(2));
    for i in 0..3 {
        println!("Loop iteration: {}", i);
    }
}
