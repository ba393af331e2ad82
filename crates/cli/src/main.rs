use clap::{Parser, Subcommand};

use api_shared::{
    CallNextRes, ClearCurrentRes, CurrentRes, JoinReq, JoinRes, PauseRes, PositionRes, QueueRes,
    SkipRes, StatsRes,
};
use vq_registration::HospitalRegistration;

#[derive(Parser)]
#[command(name = "vq")]
#[command(about = "Visit-queue coordinator CLI")]
struct Cli {
    /// Base URL of the REST server
    #[arg(long, env = "VQ_API_URL", default_value = "http://127.0.0.1:3000")]
    server: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the waiting queue, current patient and statistics
    Status,
    /// Join the queue as a patient
    Join {
        /// Patient display name
        name: String,
        /// Entry code handed out at registration
        entry_code: String,
    },
    /// Look up a waiting patient's position by exact name
    Position {
        /// Patient display name
        name: String,
    },
    /// Call the next patient
    Next,
    /// Skip the patient at the head of the queue
    Skip,
    /// Toggle the queue's pause flag
    Pause,
    /// Clear the "currently serving" display
    ClearCurrent,
    /// Register a hospital locally and print entry codes and QR payloads
    Register {
        /// Hospital name
        hospital_name: String,
        /// Doctors as name=department pairs (repeatable)
        #[arg(required = true)]
        doctors: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::blocking::Client::new();
    let base = cli.server.trim_end_matches('/').to_string();

    match cli.command {
        Some(Commands::Status) => {
            let queue: QueueRes = client.get(format!("{base}/queue")).send()?.json()?;
            let current: CurrentRes = client.get(format!("{base}/queue/current")).send()?.json()?;
            let stats: StatsRes = client.get(format!("{base}/stats")).send()?.json()?;

            match current.patient {
                Some(p) => println!("Now serving: {} (joined {})", p.name, p.joined_at),
                None => println!("Now serving: nobody"),
            }
            if queue.paused {
                println!("Queue is PAUSED (display only)");
            }
            if queue.patients.is_empty() {
                println!("No patients waiting.");
            } else {
                for p in &queue.patients {
                    println!(
                        "{:>3}. {} [{}] joined {} (code {})",
                        p.position, p.name, p.status, p.joined_at, p.entry_code
                    );
                }
            }
            println!(
                "Waiting: {}, Served: {}, Avg wait: {} min, Efficiency: {}%",
                stats.total_patients, stats.patients_served, stats.avg_wait_time, stats.efficiency
            );
        }
        Some(Commands::Join { name, entry_code }) => {
            let res = client
                .post(format!("{base}/queue/join"))
                .json(&JoinReq { name, entry_code })
                .send()?;
            if !res.status().is_success() {
                return Err(format!("join rejected: {}", res.text()?).into());
            }
            let joined: JoinRes = res.json()?;
            println!(
                "Joined at position {}. Estimated wait: ~{} minutes.",
                joined.position, joined.estimated_wait
            );
        }
        Some(Commands::Position { name }) => {
            let res: PositionRes = client
                .get(format!("{base}/queue/position/{name}"))
                .send()?
                .json()?;
            if res.position == 0 {
                println!("No waiting patient named {name}.");
            } else {
                println!("{name} is at position {}.", res.position);
            }
        }
        Some(Commands::Next) => {
            let res: CallNextRes = client.post(format!("{base}/queue/next")).send()?.json()?;
            match res.patient {
                Some(p) => println!("{} (joined {})", res.message, p.joined_at),
                None => println!("{}", res.message),
            }
        }
        Some(Commands::Skip) => {
            let res: SkipRes = client.post(format!("{base}/queue/skip")).send()?.json()?;
            if res.success {
                println!("Skipped the head patient to the back of the queue.");
            } else {
                println!("No patients to skip.");
            }
        }
        Some(Commands::Pause) => {
            let res: PauseRes = client.post(format!("{base}/queue/pause")).send()?.json()?;
            println!(
                "Queue is now {}.",
                if res.paused { "paused" } else { "active" }
            );
        }
        Some(Commands::ClearCurrent) => {
            let _res: ClearCurrentRes = client
                .delete(format!("{base}/queue/current"))
                .send()?
                .json()?;
            println!("Cleared the currently-serving display.");
        }
        Some(Commands::Register {
            hospital_name,
            doctors,
        }) => {
            let pairs = parse_doctors(&doctors)?;
            let mut rng = rand::thread_rng();
            let hospital = HospitalRegistration::register(&hospital_name, &pairs, &mut rng)?;

            println!("Registered {} ({})", hospital.hospital_name, hospital.hospital_id);
            for (doctor, payload) in hospital.doctors.iter().zip(hospital.qr_payloads()) {
                println!(
                    "  {} ({}): entry code {}",
                    doctor.name, doctor.department, doctor.entry_code
                );
                println!("    QR payload: {}", payload.to_json()?);
            }
        }
        None => {
            println!("Use --help to see available commands.");
        }
    }

    Ok(())
}

fn parse_doctors(raw: &[String]) -> Result<Vec<(String, String)>, Box<dyn std::error::Error>> {
    raw.iter()
        .map(|entry| {
            entry
                .split_once('=')
                .map(|(name, department)| (name.to_string(), department.to_string()))
                .ok_or_else(|| format!("expected name=department, got: {entry}").into())
        })
        .collect()
}
