use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use exam_router::app;
use exam_router::config::load_or_default;
use exam_router::routing::{normalize, Method};

#[derive(Parser)]
#[command(name = "exam-routes")]
#[command(about = "Inspect the examination system's route table", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every route in dispatch order
    List,
    /// Show how a request-target would be routed
    Resolve {
        /// GET, POST, PUT or DELETE
        method: Method,
        /// Request-target, e.g. /exam/public/admin/subjects/12?x=1
        target: String,
        /// Entry script path; defaults to mount.script_name from config
        #[arg(long)]
        script_name: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;
    let router = app::build_router(&config)?;

    match cli.command {
        Commands::List => {
            for route in router.routes() {
                println!("{:<7} {:<40} {}", route.method, route.pattern, route.handler);
            }
        }
        Commands::Resolve {
            method,
            target,
            script_name,
        } => {
            let script_name = script_name.unwrap_or(config.mount.script_name);
            let path = normalize::canonical_path(&target, &script_name);
            let report = match router.resolve(method, &path) {
                Some(matched) => json!({
                    "method": method,
                    "canonical_path": path,
                    "matched": true,
                    "pattern": matched.pattern(),
                    "handler": matched.handler(),
                    "param_names": matched.param_names(),
                    "params": &*matched.params,
                }),
                None => json!({
                    "method": method,
                    "canonical_path": path,
                    "matched": false,
                }),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
