use clap::{Parser, Subcommand};
use employee_facade::EmployeeInput;
use serde_json::Value;
use url::Url;

#[derive(Parser)]
#[command(name = "employee-cli")]
#[command(about = "Command-line client for the employee facade", long_about = None)]
struct Cli {
    /// Facade base URL including the employee path prefix.
    #[arg(short, long, default_value = "http://localhost:8080/employees")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every employee
    List,
    /// Find employees whose name contains a fragment
    Search { fragment: String },
    /// Show one employee
    Get { id: String },
    /// Print the highest salary
    HighestSalary,
    /// Names of the ten best paid employees
    TopTen,
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: i32,
        #[arg(long)]
        age: i32,
        #[arg(long)]
        title: String,
    },
    /// Delete an employee by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    let request = match cli.command {
        Commands::List => client.get(base),
        Commands::Search { fragment } => {
            client.get(endpoint(&base, &["search", fragment.as_str()]))
        }
        Commands::Get { id } => client.get(endpoint(&base, &[id.as_str()])),
        Commands::HighestSalary => client.get(endpoint(&base, &["highestSalary"])),
        Commands::TopTen => client.get(endpoint(&base, &["topTenHighestEarningEmployeeNames"])),
        Commands::Create {
            name,
            salary,
            age,
            title,
        } => client.post(base).json(&EmployeeInput {
            name,
            salary,
            age,
            title,
        }),
        Commands::Delete { id } => client.delete(endpoint(&base, &[id.as_str()])),
    };

    print_response(request.send().await?).await
}

/// Append path segments to `base`, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: facade returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    // Delete answers with the bare name as plain text.
    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
