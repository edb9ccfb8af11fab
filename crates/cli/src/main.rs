use clap::{Parser, Subcommand};
use clinicals_core::{
    database_location_from_env_value,
    models::{ClinicalData, ClinicalDataForPatient, Patient, PatientInput},
    ClinicalDataService, CoreConfig, PatientService, Repositories,
};

#[derive(Parser)]
#[command(name = "clinicals")]
#[command(about = "Clinicals patient and measurement admin CLI")]
struct Cli {
    /// SQLite database file, or `:memory:`
    #[arg(long, env = "CLINICALS_DB_PATH")]
    db: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    ListPatients,
    /// Show one patient with its clinical data
    ShowPatient {
        /// Patient ID
        id: i64,
    },
    /// Create a patient
    CreatePatient {
        first_name: String,
        last_name: String,
        age: i64,
    },
    /// Replace every field of a patient
    UpdatePatient {
        /// Patient ID
        id: i64,
        first_name: String,
        last_name: String,
        age: i64,
    },
    /// Delete a patient that has no clinical data
    DeletePatient {
        /// Patient ID
        id: i64,
    },
    /// List all clinical data
    ListClinicalData,
    /// Record a measurement for a patient at the current time
    AddClinicalData {
        patient_id: i64,
        /// e.g. "Blood Pressure"
        component_name: String,
        /// e.g. "120/80"
        component_value: String,
    },
    /// Delete a clinical data row
    DeleteClinicalData {
        /// Clinical data ID
        id: i64,
    },
}

fn print_patient(patient: &Patient) {
    println!(
        "ID: {}, Name: {} {}, Age: {}, Clinical data: {}",
        patient.id,
        patient.first_name,
        patient.last_name,
        patient.age,
        patient.clinical_data.len()
    );
}

fn print_clinical_data(row: &ClinicalData) {
    println!(
        "ID: {}, Patient: {}, {}: {}, Measured: {}",
        row.id,
        row.patient_id,
        row.component_name,
        row.component_value,
        row.measured_date_time.to_rfc3339()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help to see available commands");
        return Ok(());
    };

    let cfg = CoreConfig::new(database_location_from_env_value(cli.db))?;
    let repos = Repositories::open(&cfg)?;
    let patients = PatientService::new(repos.clone());
    let clinical_data = ClinicalDataService::new(repos);

    match command {
        Commands::ListPatients => {
            let all = patients.list_all()?;
            if all.is_empty() {
                println!("No patients found.");
            } else {
                all.iter().for_each(print_patient);
            }
        }
        Commands::ShowPatient { id } => match patients.get_by_id(id) {
            Ok(patient) => {
                print_patient(&patient);
                patient.clinical_data.iter().for_each(print_clinical_data);
            }
            Err(e) => eprintln!("Error showing patient: {}", e),
        },
        Commands::CreatePatient {
            first_name,
            last_name,
            age,
        } => {
            let input = PatientInput::new(first_name, last_name, age);
            match patients.create(Some(&input)) {
                Ok(patient) => println!("Created patient with ID: {}", patient.id),
                Err(e) => eprintln!("Error creating patient: {}", e),
            }
        }
        Commands::UpdatePatient {
            id,
            first_name,
            last_name,
            age,
        } => {
            let input = PatientInput::new(first_name, last_name, age);
            match patients.update(id, Some(&input)) {
                Ok(patient) => println!("Updated patient with ID: {}", patient.id),
                Err(e) => eprintln!("Error updating patient: {}", e),
            }
        }
        Commands::DeletePatient { id } => match patients.delete(id) {
            Ok(()) => println!("Deleted patient with ID: {}", id),
            Err(e) => eprintln!("Error deleting patient: {}", e),
        },
        Commands::ListClinicalData => {
            let all = clinical_data.list_all()?;
            if all.is_empty() {
                println!("No clinical data found.");
            } else {
                all.iter().for_each(print_clinical_data);
            }
        }
        Commands::AddClinicalData {
            patient_id,
            component_name,
            component_value,
        } => {
            let dto = ClinicalDataForPatient::new(patient_id, component_name, component_value);
            match clinical_data.create_for_patient(Some(&dto)) {
                Ok(row) => println!("Added clinical data with ID: {}", row.id),
                Err(e) => eprintln!("Error adding clinical data: {}", e),
            }
        }
        Commands::DeleteClinicalData { id } => match clinical_data.delete(id) {
            Ok(()) => println!("Deleted clinical data with ID: {}", id),
            Err(e) => eprintln!("Error deleting clinical data: {}", e),
        },
    }

    Ok(())
}
