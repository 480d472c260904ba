use clap::{Args, Parser, Subcommand};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "contacts-cli")]
#[command(about = "Command-line client for the contact API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all contacts
    List,
    /// Show one contact
    Get { id: i32 },
    /// Create a contact
    Create(ContactArgs),
    /// Replace the fields of a contact
    Update {
        id: i32,
        #[command(flatten)]
        fields: ContactArgs,
    },
    /// Delete a contact
    Delete { id: i32 },
}

#[derive(Args)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
}

impl ContactArgs {
    fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "email": self.email,
            "phone": self.phone,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let (method, path, body) = match &cli.command {
        Commands::List => (Method::GET, "/contacts".to_string(), None),
        Commands::Get { id } => (Method::GET, format!("/contacts/{}", id), None),
        Commands::Create(fields) => (Method::POST, "/contacts".to_string(), Some(fields.to_json())),
        Commands::Update { id, fields } => {
            (Method::PUT, format!("/contacts/{}", id), Some(fields.to_json()))
        }
        Commands::Delete { id } => (Method::DELETE, format!("/contacts/{}", id), None),
    };

    let mut request = client.request(method, format!("{}{}", base, path));
    if let Some(body) = body {
        request = request.json(&body);
    }
    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if status == StatusCode::NO_CONTENT {
        println!("{}", status);
        return Ok(());
    }

    let json: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        eprintln!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
