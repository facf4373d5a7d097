use clap::{Arg, ArgMatches, Command};

use chrono::prelude::*;
use log::error;
use simplelog::*;

use std::fs::File;
use std::path::Path;
use std::process;

pub mod commands;
pub mod error;
pub mod utils;

use commands::reconcile::{self, ModuleResult};
use error::Result;
use utils::config::{Params, State};
use utils::password::{get_password, Secret};
use utils::tools::SystemRunner;

fn init_logging(debug: bool, log_dir: Option<&str>) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        if debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));
    if let Some(dir) = log_dir {
        let dt = Local::now();
        loggers.push(WriteLogger::new(
            LevelFilter::Info,
            Config::default(),
            File::create(Path::new(dir).join(format!(
                "smbuser_{}.log",
                dt.format("%Y_%m_%d_%H_%M_%S")
            )))?,
        ));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

fn load_params(matches: &ArgMatches) -> Result<Params> {
    let mut params = match matches.value_of("args-file") {
        Some(path) => Params::from_args_file(path)?,
        None => Params {
            name: matches.value_of("name").unwrap_or_default().to_owned(),
            password: matches.value_of("password").map(Secret::new),
            state: match matches.value_of("state") {
                Some(state) => state.parse()?,
                None => State::default(),
            },
        },
    };
    if matches.is_present("ask-password") {
        params.password = Some(get_password()?);
    }
    params.validate()?;
    Ok(params)
}

fn finish(result: ModuleResult) -> ! {
    match serde_json::to_string(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to serialize result: {}", e),
    }
    process::exit(if result.failed { 1 } else { 0 })
}

fn main() {
    let matches = Command::new("smbuser")
        .version("1.0.0")
        .about("Ensures a samba user exists with a given password, or does not exist")
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .takes_value(true)
                .required_unless_present("args-file")
                .help("Name of the user to create, remove or modify"),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .takes_value(true)
                .conflicts_with("ask-password")
                .help("Password to set for the user"),
        )
        .arg(
            Arg::new("ask-password")
                .long("ask-password")
                .help("Prompt for the password instead of passing it as an argument"),
        )
        .arg(
            Arg::new("state")
                .short('s')
                .long("state")
                .takes_value(true)
                .possible_values(["present", "absent"])
                .help("Whether the account should exist [default: present]"),
        )
        .arg(
            Arg::new("args-file")
                .short('a')
                .long("args-file")
                .takes_value(true)
                .conflicts_with_all(&["name", "password", "state"])
                .help("JSON file holding name, password and state"),
        )
        .arg(
            Arg::new("pdbedit")
                .long("pdbedit")
                .takes_value(true)
                .help("Path to pdbedit instead of searching PATH"),
        )
        .arg(
            Arg::new("smbpasswd")
                .long("smbpasswd")
                .takes_value(true)
                .help("Path to smbpasswd instead of searching PATH"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Log every command that is run"),
        )
        .arg(
            Arg::new("log-dir")
                .short('l')
                .long("log-dir")
                .takes_value(true)
                .help("Also write a timestamped log file into this directory"),
        )
        .get_matches();

    if let Err(e) = init_logging(matches.is_present("debug"), matches.value_of("log-dir")) {
        finish(ModuleResult::failure(e.to_string()));
    }

    let params = match load_params(&matches) {
        Ok(params) => params,
        Err(e) => {
            error!("{}", e);
            finish(ModuleResult::failure(e.to_string()));
        }
    };

    finish(reconcile::execute(
        matches.value_of("pdbedit"),
        matches.value_of("smbpasswd"),
        &params,
        &SystemRunner,
    ))
}
