use clap::{Parser, Subcommand};
use serde_json::{Map, Number, Value};

#[derive(Parser)]
#[command(name = "product-cli")]
#[command(about = "Command-line client for the product service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000", env = "PRODUCT_SERVICE_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all products
    List,
    /// Show one product
    Get { id: String },
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Number,
    },
    /// Replace both fields of a product
    Replace {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Number,
    },
    /// Change only the given fields of a product
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<Number>,
    },
    /// Delete a product
    Delete { id: String },
}

fn fields(name: Option<String>, price: Option<Number>) -> Value {
    let mut map = Map::new();
    if let Some(name) = name {
        map.insert("name".into(), Value::String(name));
    }
    if let Some(price) = price {
        map.insert("price".into(), Value::Number(price));
    }
    Value::Object(map)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');
    let products = format!("{}/products", base);

    let request = match cli.command {
        Commands::List => client.get(&products),
        Commands::Get { id } => client.get(format!("{}/{}", products, id)),
        Commands::Create { name, price } => client
            .post(&products)
            .json(&fields(Some(name), Some(price))),
        Commands::Replace { id, name, price } => client
            .put(format!("{}/{}", products, id))
            .json(&fields(Some(name), Some(price))),
        Commands::Update { id, name, price } => client
            .patch(format!("{}/{}", products, id))
            .json(&fields(name, price)),
        Commands::Delete { id } => client.delete(format!("{}/{}", products, id)),
    };

    let res = request.send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let body: Value = res.json().await.unwrap_or(Value::Null);
    if !status.is_success() {
        eprintln!("Error: product service returned status {}", status);
        if let Some(message) = body.get("error").and_then(Value::as_str) {
            eprintln!("{}", message);
        }
        std::process::exit(1);
    }
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
