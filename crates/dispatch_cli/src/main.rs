//! Interactive console front end for the dispatch engine.
//!
//! Menu-driven: roster management, ride intake, and driver assignment with
//! an OTP prompt. The roster is loaded from CSV at startup and saved on
//! exit; the engine itself never touches the terminal.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use dispatch_core::dispatch::Dispatcher;
use dispatch_core::drivers::{Driver, DriverId, DriverStatus};
use dispatch_core::error::DispatchError;
use dispatch_core::network::RoadNetwork;
use dispatch_core::requests::{RequestId, RideRequest, TripCode};
use dispatch_core::roster::{load_roster, save_roster};
use dispatch_core::scenario::NetworkConfig;

#[derive(Parser, Debug)]
#[command(name = "dispatch_cli", about = "Ride dispatch over a fixed road network")]
struct Args {
    /// CSV roster file, loaded at startup and saved on exit.
    #[arg(long, default_value = "drivers.csv")]
    roster: PathBuf,

    /// JSON network configuration; the built-in demo city when omitted.
    #[arg(long)]
    network: Option<PathBuf>,

    /// Seed for id and OTP generation (reproducible sessions).
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.network {
        Some(path) => NetworkConfig::from_json_file(path)?,
        None => NetworkConfig::city_demo(),
    };
    let network = config.build()?;
    let registry = load_roster(&args.roster)?;
    let mut dispatcher = Dispatcher::new(network, registry);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_menu();
        let Some(choice) = read_line(&mut lines, "Choice: ")? else {
            break;
        };

        match choice.trim() {
            "1" => add_driver(&mut dispatcher, &mut rng, &mut lines)?,
            "2" => list_drivers(&dispatcher),
            "3" => update_driver_status(&mut dispatcher, &mut lines)?,
            "4" => remove_driver(&mut dispatcher, &mut lines)?,
            "5" => create_ride_request(&mut dispatcher, &mut rng, &mut lines)?,
            "6" => view_queue(&dispatcher),
            "7" => assign_driver(&mut dispatcher, &mut lines)?,
            "9" => print_network(dispatcher.network()),
            "0" => break,
            _ => println!("Invalid choice."),
        }
    }

    save_roster(&args.roster, dispatcher.registry())?;
    println!("Roster saved. Bye.");
    Ok(())
}

fn print_menu() {
    println!();
    println!("---- RIDE DISPATCH ----");
    println!("1. Add driver");
    println!("2. List drivers");
    println!("3. Update driver status");
    println!("4. Remove driver");
    println!("5. Create ride request");
    println!("6. View ride queue");
    println!("7. Assign driver (match + OTP)");
    println!("9. Show network");
    println!("0. Save & exit");
}

type Lines<'a> = io::Lines<io::StdinLock<'a>>;

/// Prompt and read one line; `None` on EOF.
fn read_line(lines: &mut Lines, prompt: &str) -> Result<Option<String>, io::Error> {
    print!("{prompt}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}

fn read_number<T: std::str::FromStr>(
    lines: &mut Lines,
    prompt: &str,
) -> Result<Option<T>, io::Error> {
    let Some(line) = read_line(lines, prompt)? else {
        return Ok(None);
    };
    match line.trim().parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            println!("Not a number.");
            Ok(None)
        }
    }
}

fn add_driver(
    dispatcher: &mut Dispatcher,
    rng: &mut StdRng,
    lines: &mut Lines,
) -> Result<(), io::Error> {
    let Some(name) = read_line(lines, "Driver name: ")? else {
        return Ok(());
    };
    let name = name.trim().to_string();
    if name.is_empty() {
        println!("Name cannot be empty.");
        return Ok(());
    }

    // Retry on the (unlikely) random id collision instead of bothering the
    // operator.
    loop {
        let driver = Driver::spawn_random(name.clone(), dispatcher.network(), rng);
        let location = driver.location;
        match dispatcher.registry_mut().add(driver) {
            Ok(id) => {
                println!("{name} added at node {location} (id {})", id.0);
                return Ok(());
            }
            Err(DispatchError::DuplicateDriver(_)) => continue,
            Err(err) => {
                println!("Could not add driver: {err}");
                return Ok(());
            }
        }
    }
}

fn list_drivers(dispatcher: &Dispatcher) {
    if dispatcher.registry().is_empty() {
        println!("No drivers.");
        return;
    }
    for driver in dispatcher.registry().iter() {
        println!(
            "id:{} | {} | {} | earnings {:.2} | node {}",
            driver.id.0, driver.name, driver.status, driver.earnings, driver.location
        );
    }
}

fn update_driver_status(dispatcher: &mut Dispatcher, lines: &mut Lines) -> Result<(), io::Error> {
    let Some(id) = read_number::<u32>(lines, "Driver id: ")? else {
        return Ok(());
    };
    let Some(choice) = read_line(lines, "1. Available  2. Offline\nChoice: ")? else {
        return Ok(());
    };
    let status = match choice.trim() {
        "1" => DriverStatus::Available,
        "2" => DriverStatus::Offline,
        _ => {
            println!("Invalid choice.");
            return Ok(());
        }
    };
    match dispatcher.registry_mut().set_status(DriverId(id), status) {
        Ok(()) => println!("Status updated."),
        Err(err) => println!("Could not update status: {err}"),
    }
    Ok(())
}

fn remove_driver(dispatcher: &mut Dispatcher, lines: &mut Lines) -> Result<(), io::Error> {
    let Some(id) = read_number::<u32>(lines, "Driver id: ")? else {
        return Ok(());
    };
    match dispatcher.registry_mut().remove(DriverId(id)) {
        Ok(driver) => println!("{} removed.", driver.name),
        Err(err) => println!("Could not remove driver: {err}"),
    }
    Ok(())
}

fn create_ride_request(
    dispatcher: &mut Dispatcher,
    rng: &mut StdRng,
    lines: &mut Lines,
) -> Result<(), io::Error> {
    let Some(passenger) = read_line(lines, "Passenger name: ")? else {
        return Ok(());
    };
    let node_count = dispatcher.network().node_count();
    let Some(pickup) = read_number::<usize>(lines, &format!("Pickup (1-{node_count}): "))? else {
        return Ok(());
    };
    let Some(drop_off) = read_number::<usize>(lines, &format!("Drop (1-{node_count}): "))? else {
        return Ok(());
    };

    let id = RequestId(rng.gen_range(10000..=99999));
    let code = TripCode::generate(rng);
    match RideRequest::new(
        id,
        passenger.trim(),
        code,
        pickup,
        drop_off,
        dispatcher.network(),
    ) {
        Ok(request) => {
            dispatcher.submit(request);
            println!("Ride queued (id {}). OTP: {}", id.0, code.value());
        }
        Err(err) => println!("Request cancelled: {err}"),
    }
    Ok(())
}

fn view_queue(dispatcher: &Dispatcher) {
    if dispatcher.queue().is_empty() {
        println!("No pending rides.");
        return;
    }
    for request in dispatcher.queue().iter() {
        println!(
            "id:{} | {} | pickup {} -> drop {}",
            request.id().0,
            request.passenger(),
            request.pickup(),
            request.drop_off()
        );
    }
}

fn assign_driver(dispatcher: &mut Dispatcher, lines: &mut Lines) -> Result<(), io::Error> {
    let candidate = match dispatcher.match_front() {
        Ok(candidate) => candidate,
        Err(err) => {
            println!("Cannot assign: {err}");
            return Ok(());
        }
    };
    let driver_name = dispatcher
        .registry()
        .get(candidate.driver)
        .map(|d| d.name.clone())
        .unwrap_or_default();
    println!(
        "Nearest driver: {driver_name} (id {}) at node {}, {} units away",
        candidate.driver.0, candidate.location, candidate.distance
    );

    let Some(code) = read_number::<u32>(lines, "Enter OTP: ")? else {
        return Ok(());
    };
    match dispatcher.assign_front(TripCode::new(code)) {
        Ok(receipt) => {
            let route: Vec<String> = receipt.route.iter().map(ToString::to_string).collect();
            println!("Route: {}", route.join(" -> "));
            println!(
                "Ride complete. Distance {} | Fare {:.2} | Driver {} now at node {}",
                receipt.distance,
                receipt.fare,
                receipt.driver.0,
                receipt.route.last().copied().unwrap_or_default()
            );
        }
        Err(err) => println!("Assignment failed: {err}"),
    }
    Ok(())
}

fn print_network(network: &RoadNetwork) {
    let n = network.node_count();
    print!("     ");
    for v in 1..=n {
        print!("{v:>4} ");
    }
    println!();
    for u in 1..=n {
        print!("{u:>4} ");
        for v in 1..=n {
            match network.weight(u, v) {
                Some(w) => print!("{w:>4} "),
                None => print!(" INF "),
            }
        }
        println!();
    }
}
