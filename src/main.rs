use clap::{Arg, ArgAction, Command};
use tabgrab::configuration::create_config;
use tabgrab::startup::run;

const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Command::new("tabgrab")
        .about("🎸 Recover saved guitar tabs from a TabsLite backup 🎸")
        .subcommand(
            Command::new("run")
                .about("🚀 Fetch every tab referenced by the backup file")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("PATH")
                        .default_value(DEFAULT_CONFIG_PATH)
                        .help("path to config file"),
                )
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("force re-download even if files exist"),
                )
                .arg(
                    Arg::new("refresh")
                        .short('r')
                        .long("refresh")
                        .action(ArgAction::SetTrue)
                        .help("discard the cached device id for the output directory"),
                ),
        )
        .subcommand(
            Command::new("config").about("🛠️ Create a config.yaml template to customize"),
        )
        .get_matches();

    match args.subcommand() {
        Some(("run", sub)) => {
            let config_path = sub
                .get_one::<String>("config")
                .expect("config has a default value");
            run(config_path, sub.get_flag("force"), sub.get_flag("refresh")).await
        }
        Some(("config", _)) => create_config(DEFAULT_CONFIG_PATH),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("\x1b[1m\x1b[31mInvalid command!\x1b[0m\n");
    println!("📖 Available Commands:");
    println!("  \x1b[1m\x1b[32mtabgrab run\x1b[0m    - 🚀 Extract tabs from your backup");
    println!("  \x1b[1m\x1b[32mtabgrab config\x1b[0m - 🛠️  Create a configuration file template");
    println!("\x1b[33mRun 'tabgrab run --help' for the available options.\x1b[0m\n");
}
