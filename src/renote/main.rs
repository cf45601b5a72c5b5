use clap::Parser;
use colored::*;
use renote::api::{CmdMessage, CmdResult, ConfigAction, MessageLevel, RenoteApi};
use renote::config::KEYS;
use renote::error::Result;
use renote::store::fs::FileStore;
use std::path::PathBuf;

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let dir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let mut api = RenoteApi::from_store(FileStore::new(dir))?;

    match cli.command {
        Some(Commands::Run) | None => handle_run(&mut api),
        Some(Commands::Map) => handle_map(&mut api),
        Some(Commands::Apply) => handle_apply(&mut api),
        Some(Commands::Verify) => handle_verify(&mut api),
        Some(Commands::Config { key, value }) => handle_config(&mut api, key, value),
        Some(Commands::Init) => handle_init(&mut api),
    }
}

fn handle_run(api: &mut RenoteApi<FileStore>) -> Result<()> {
    let result = api.renumber()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_map(api: &mut RenoteApi<FileStore>) -> Result<()> {
    let result = api.discover()?;
    print_mapping(&result);
    print_messages(&result.messages);
    Ok(())
}

fn handle_apply(api: &mut RenoteApi<FileStore>) -> Result<()> {
    let result = api.apply()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_verify(api: &mut RenoteApi<FileStore>) -> Result<()> {
    let result = api.verify()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(
    api: &mut RenoteApi<FileStore>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            for key in KEYS {
                if let Some(value) = config.get(key) {
                    println!("{} = {}", key, value);
                }
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(api: &mut RenoteApi<FileStore>) -> Result<()> {
    let result = api.init()?;
    print_messages(&result.messages);
    Ok(())
}

fn print_mapping(result: &CmdResult) {
    if let Some(mapping) = &result.mapping {
        let width = mapping.iter().map(|(old, _)| old.len()).max().unwrap_or(0);
        for (old, new) in mapping.iter() {
            println!("{:<width$} -> {}", old, new.bold(), width = width);
        }
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
