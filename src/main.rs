//! DNA Center Portal - Entry Point
//!
//! Modes:
//! - Default: web portal
//! - --devices / -d: print the device table and exit
//! - --interfaces / -i <ip>: print one device's interfaces and exit

use anyhow::Context;
use dnac_portal::{report, AppState, AuditLog, Config, PortalServer};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

enum Mode {
    Serve,
    Devices,
    Interfaces(String),
}

fn print_help() {
    println!("DNA Center Portal v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: dnac-portal [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --devices, -d           Print network devices and exit");
    println!("  --interfaces, -i <IP>   Print interfaces of the device with this management IP");
    println!("  --help, -h              Show this help");
    println!();
    println!("Default: Run the web portal");
    println!();
    println!("Environment variables:");
    println!("  DNAC_HOST, DNAC_PORT           Controller address (default sandboxdnac.cisco.com:443)");
    println!("  DNAC_USERNAME, DNAC_PASSWORD   Controller credentials (required)");
    println!("  DNAC_SCHEME                    http or https (default https)");
    println!("  DNAC_VERIFY_TLS                Verify controller certificate (default false)");
    println!("  DNAC_TIMEOUT_SECS              Per-call timeout (default 10)");
    println!("  AUDIT_DB_PATH, AUDIT_TABLE     Audit store location");
    println!("  PORTAL_BIND_ADDR, PORTAL_PORT  Listen address (default 127.0.0.1:8000)");
    println!("  PORTAL_LOG_JSON                JSON log output");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Parse args
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let mode = if let Some(pos) = args.iter().position(|a| a == "--interfaces" || a == "-i") {
        let ip = args
            .get(pos + 1)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .context("--interfaces requires a device IP")?;
        Mode::Interfaces(ip)
    } else if args.iter().any(|a| a == "--devices" || a == "-d") {
        Mode::Devices
    } else {
        Mode::Serve
    };

    let config = Config::from_env()?;

    // Logs go to stderr so command-line tables on stdout stay clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    info!("DNA Center Portal v{}", env!("CARGO_PKG_VERSION"));

    let audit = AuditLog::open(&config.audit.db_path, &config.audit.table);
    let state = AppState::from_config(config.controller.clone(), audit)?;

    match mode {
        Mode::Serve => {
            PortalServer::new(config.server, state).run().await?;
        }
        Mode::Devices => {
            let mut session = state.session();
            session.authenticate().await?;
            let devices = session.list_devices().await?;
            print!("{}", report::device_table(&devices));
        }
        Mode::Interfaces(ip) => {
            let mut session = state.session();
            session.authenticate().await?;
            let interfaces = session.get_device_interfaces(&ip).await?;
            print!("{}", report::interface_table(&interfaces));
        }
    }

    Ok(())
}
