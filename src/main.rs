// SpaceTraders console - CLI entry point
// Presentation layer over the gateway and the scripted workflows.

use clap::{Parser, Subcommand};

use spacetraders_console::{
    verbosity, ApiClient, ApiResponse, ConsoleConfig, DeliveryWorkflow, Gateway, MiningWorkflow,
    TokenStore,
};
use spacetraders_console::{v_error, v_summary};

#[derive(Parser)]
#[command(name = "spacetraders-console", version, about = "Console client for the SpaceTraders v2 API")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "console_config.toml")]
    config: String,

    /// Override the configured verbosity (0=quiet, 1=info, 2=debug)
    #[arg(short, long)]
    verbosity: Option<u8>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show agent info
    Agent,
    /// List owned ships
    Ships,
    /// List contracts
    Contracts,
    /// List waypoints in the home system, optionally filtered by type
    Waypoints {
        #[arg(long = "type")]
        waypoint_type: Option<String>,
    },
    /// List shipyard waypoints in the home system
    Shipyards,
    /// Show a shipyard's detail
    Shipyard { waypoint: String },
    /// Show a waypoint's market
    Market { waypoint: String },
    /// Show a ship's cargo hold
    Cargo { ship: String },
    /// Run one autonomous mining cycle with the given ship
    Mine { ship: String },
    /// Deliver goods against a contract and fulfill it
    Deliver {
        ship: String,
        contract: String,
        waypoint: String,
        good: String,
        #[arg(value_parser = clap::value_parser!(i32).range(1..))]
        units: i32,
    },
    /// Sell cargo at the ship's current market
    Sell {
        ship: String,
        good: String,
        #[arg(value_parser = clap::value_parser!(i32).range(1..))]
        units: i32,
    },
    /// Jettison cargo from a ship's hold
    Jettison {
        ship: String,
        good: String,
        #[arg(value_parser = clap::value_parser!(i32).range(1..))]
        units: i32,
    },
    /// Purchase a ship from a shipyard waypoint
    BuyShip { ship_type: String, waypoint: String },
    /// Negotiate a new contract with the given ship
    Negotiate { ship: String },
    /// Accept a contract
    Accept { contract: String },
    /// Set the session token, optionally remembering it across sessions
    SetToken {
        token: String,
        #[arg(long)]
        remember: bool,
    },
    /// Forget the persisted session token
    ClearToken,
}

/// Home system of a waypoint symbol, e.g. "X1-XD16-AB" -> "X1-XD16".
fn system_of(waypoint_symbol: &str) -> String {
    waypoint_symbol.split('-').take(2).collect::<Vec<&str>>().join("-")
}

fn render(response: &ApiResponse) -> Result<(), Box<dyn std::error::Error>> {
    if !response.is_success() {
        v_error!("⚠️  API returned status {}", response.status);
    }
    println!("{}", serde_json::to_string_pretty(&response.payload)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = ConsoleConfig::load_or_create(&cli.config)?;
    verbosity::set_verbosity_level(cli.verbosity.unwrap_or(config.output.verbosity));

    let store = TokenStore::new(&config.storage.token_file);

    match cli.command {
        Command::SetToken { token, remember } => {
            let client = ApiClient::with_token(token.clone());
            match client.get_agent().await {
                Ok(agent) if agent.is_success() => {
                    v_summary!(
                        "✅ Token verified for agent {}",
                        agent.payload["data"]["symbol"].as_str().unwrap_or("?")
                    );
                }
                Ok(agent) => v_error!("⚠️  Token check returned status {}", agent.status),
                Err(e) => v_error!("⚠️  Could not verify token: {}", e),
            }
            if remember {
                store.save(&token)?;
                v_summary!("💾 Token saved to {}", store.path().display());
            } else {
                store.clear()?;
                v_summary!("🔑 Token set for this invocation only (not persisted)");
            }
        }
        Command::ClearToken => {
            store.clear()?;
            v_summary!("🗑️  Stored token cleared");
        }
        command => {
            let mut client = ApiClient::new();
            if let Some(token) = store.load() {
                client.set_token(token);
            }
            if config.storage.api_logging {
                client.set_api_logging(true, &config.storage.api_log_file);
            }
            run_command(&client, &config, command).await?;
        }
    }

    Ok(())
}

async fn run_command(
    client: &ApiClient,
    config: &ConsoleConfig,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    let home_system = &config.game.home_system;

    match command {
        Command::Agent => render(&client.get_agent().await?)?,
        Command::Ships => render(&client.get_ships().await?)?,
        Command::Contracts => render(&client.get_contracts().await?)?,
        Command::Waypoints { waypoint_type } => render(
            &client
                .get_system_waypoints(home_system, waypoint_type.as_deref())
                .await?,
        )?,
        Command::Shipyards => render(&client.find_shipyards(home_system).await?)?,
        Command::Shipyard { waypoint } => {
            render(&client.get_shipyard(&system_of(&waypoint), &waypoint).await?)?
        }
        Command::Market { waypoint } => {
            render(&client.get_market(&system_of(&waypoint), &waypoint).await?)?
        }
        Command::Cargo { ship } => render(&client.get_cargo(&ship).await?)?,
        Command::Sell { ship, good, units } => {
            render(&client.sell_cargo(&ship, &good, units).await?)?
        }
        Command::Jettison { ship, good, units } => {
            render(&client.jettison_cargo(&ship, &good, units).await?)?
        }
        Command::BuyShip { ship_type, waypoint } => {
            render(&client.purchase_ship(&ship_type, &waypoint).await?)?
        }
        Command::Negotiate { ship } => render(&client.negotiate_contract(&ship).await?)?,
        Command::Accept { contract } => render(&client.accept_contract(&contract).await?)?,
        Command::Mine { ship } => {
            let workflow = MiningWorkflow::new(
                client,
                home_system,
                &config.game.asteroid_waypoint_type,
            );
            match workflow.run(&ship).await? {
                Some(report) => {
                    v_summary!("⛏️  Extracted at {}:", report.asteroid);
                    println!("{}", serde_json::to_string_pretty(&report.extracted)?);
                    v_summary!("📦 Cargo:");
                    println!("{}", serde_json::to_string_pretty(&report.cargo)?);
                }
                None => v_summary!(
                    "🪨 No {} waypoint in {} - nothing to mine",
                    config.game.asteroid_waypoint_type,
                    home_system
                ),
            }
        }
        Command::Deliver {
            ship,
            contract,
            waypoint,
            good,
            units,
        } => {
            let report = DeliveryWorkflow::new(client)
                .run(&ship, &contract, &waypoint, &good, units)
                .await?;
            v_summary!("✅ {}", report.message);
        }
        Command::SetToken { .. } | Command::ClearToken => unreachable!("handled in main"),
    }

    Ok(())
}
