use clap::{Parser, Subcommand};
use clinic_core::{
    database_location_from_env_value, ClinicResult, ClinicServices, CoreConfig, Store,
};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic records reporting CLI")]
struct Cli {
    /// SQLite database file, or `:memory:` (falls back to CLINIC_DATABASE_PATH, then clinic.db)
    #[arg(long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and apply migrations
    Init,
    /// Income over every recorded visit
    TotalIncome,
    /// Income over one doctor's visits
    DoctorIncome {
        /// Doctor id
        doctor_id: i64,
    },
    /// Number of doctors earning strictly more than the given income
    DoctorsAbove {
        /// Income threshold
        #[arg(allow_negative_numbers = true)]
        min_income: Decimal,
    },
    /// Percentage of patients without health insurance
    UninsuredPercentage,
    /// List patients with health insurance
    InsuredPatients,
}

fn open(database: Option<String>) -> ClinicResult<Store> {
    let value = database.or_else(|| std::env::var("CLINIC_DATABASE_PATH").ok());
    let cfg = CoreConfig::new(database_location_from_env_value(value))?;
    Store::open(&cfg)
}

fn run(cli: Cli) -> ClinicResult<()> {
    let store = open(cli.database)?;
    let services = ClinicServices::new(store);

    match cli.command {
        Commands::Init => {
            println!("Database ready.");
        }
        Commands::TotalIncome => {
            println!("{}", services.visits.total_income()?);
        }
        Commands::DoctorIncome { doctor_id } => {
            println!("{}", services.visits.total_income_by_doctor(doctor_id)?);
        }
        Commands::DoctorsAbove { min_income } => {
            println!(
                "{}",
                services.visits.count_doctors_above_income(min_income)?
            );
        }
        Commands::UninsuredPercentage => {
            println!("{}%", services.patients.uninsured_percentage()?);
        }
        Commands::InsuredPatients => {
            let patients = services.patients.list_insured()?;
            if patients.is_empty() {
                println!("No insured patients found.");
            } else {
                for patient in patients {
                    let gp = patient
                        .gp_id
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "-".into());
                    println!("ID: {}, Name: {}, GP: {}", patient.id, patient.name, gp);
                }
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_negative_threshold() {
        let cli = Cli::try_parse_from(["clinic", "doctors-above", "-5"]).unwrap();
        match cli.command {
            Commands::DoctorsAbove { min_income } => assert_eq!(min_income, Decimal::new(-5, 0)),
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_negative_threshold_is_reported() {
        let cli = Cli::try_parse_from(["clinic", "--database", ":memory:", "doctors-above", "-1"])
            .unwrap();
        let err = run(cli).expect_err("should fail");
        assert_eq!(err.to_string(), "The minimal income cannot be negative");
    }

    #[test]
    fn test_uninsured_percentage_needs_patients() {
        let cli =
            Cli::try_parse_from(["clinic", "--database", ":memory:", "uninsured-percentage"])
                .unwrap();
        assert!(matches!(run(cli), Err(clinic_core::ClinicError::NoPatients)));
    }

    #[test]
    fn test_total_income_on_empty_database() {
        let cli = Cli::try_parse_from(["clinic", "--database", ":memory:", "total-income"]).unwrap();
        assert!(run(cli).is_ok());
    }
}
