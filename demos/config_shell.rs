//! Drive the configuration service from the command line.
//!
//! Seeds an in-memory driver with a few lights, sends one request and
//! prints the screen the hub would render.
//!
//! Run with: cargo run --example config_shell -- --help

use std::net::Ipv4Addr;

use clap::{Parser, Subcommand};
use serde_json::{Map, Value, json};
use yeelight_sunflower::{
    ConfigService, ConfigurationRequest, DriverConfig, FieldKey, MemoryDriver,
};

#[derive(Parser)]
#[command(name = "config-shell")]
#[command(about = "Send configuration requests to an in-memory Sunflower driver", long_about = None)]
struct Cli {
    /// Hub address used for the all-off broadcast
    #[arg(long, global = true, default_value = "192.168.1.20")]
    hub: Ipv4Addr,

    /// Lights to seed, as ID or ID=NAME
    #[arg(short, long, global = true, value_delimiter = ',', default_value = "0x15=Porch,0x16")]
    lights: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the main screen
    List,

    /// Show the hub menu entry
    Menu,

    /// Rename lights
    Save {
        /// New names as ID=NAME
        names: Vec<String>,
    },

    /// Turn a light on
    On { light_id: String },

    /// Turn a light off
    Off { light_id: String },

    /// Turn every light off
    AllOff,

    /// Ask for reset confirmation
    Reset,

    /// Restore the factory configuration
    ConfirmReset,

    /// Send an arbitrary action with a JSON payload
    Raw {
        action: String,
        #[arg(default_value = "null")]
        data: String,
    },
}

fn split_pair(pair: &str) -> (&str, Option<&str>) {
    match pair.split_once('=') {
        Some((id, name)) => (id, Some(name)),
        None => (pair, None),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut driver = MemoryDriver::new(DriverConfig::new(cli.hub));
    for light in &cli.lights {
        let (id, name) = split_pair(light);
        driver.add_light(id, name)?;
    }
    let mut service = ConfigService::new(&mut driver);

    let request = match cli.command {
        Commands::Menu => {
            println!("{}", serde_json::to_string_pretty(&service.get_actions())?);
            return Ok(());
        }
        Commands::List => ConfigurationRequest::new("list", Value::Null),
        Commands::Save { names } => {
            let mut data = Map::new();
            for pair in &names {
                let (id, name) = split_pair(pair);
                data.insert(
                    FieldKey::name(id).to_string(),
                    Value::String(name.unwrap_or_default().to_string()),
                );
            }
            ConfigurationRequest::new("save", Value::Object(data))
        }
        Commands::On { light_id } => {
            ConfigurationRequest::new("on", json!({ "lightID": light_id }))
        }
        Commands::Off { light_id } => {
            ConfigurationRequest::new("off", json!({ "lightID": light_id }))
        }
        Commands::AllOff => ConfigurationRequest::new("allOff", Value::Null),
        Commands::Reset => ConfigurationRequest::new("reset", Value::Null),
        Commands::ConfirmReset => ConfigurationRequest::new("confirmReset", Value::Null),
        Commands::Raw { action, data } => {
            ConfigurationRequest::new(&action, serde_json::from_str(&data)?)
        }
    };

    let screen = service.configure(&request);
    println!("{}", serde_json::to_string_pretty(&screen)?);

    for event in driver.events() {
        println!("event {}: {}", event.topic, event.payload);
    }
    Ok(())
}
