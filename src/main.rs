//! hudkit - inspect and edit persisted action bindings from the terminal.

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgMatches, Command};
use hudkit::input::{display_name, template, CaptureStatus, RebindCapture, TerminalKeySource};
use hudkit::{FileSettings, HudConfig, InputAction, InputManager, KeyCode, SettingsStore};
use ratatui::crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("hudkit")
        .version(hudkit::VERSION)
        .about("Inspect and rebind game input actions")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .help("Configuration file (defaults to <config dir>/hudkit/config.toml)"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .global(true)
                .value_name("PATH")
                .help("Bindings file, overriding the configured location"),
        )
        .subcommand(Command::new("list").about("Show every action and its bound key"))
        .subcommand(
            Command::new("set")
                .about("Bind an action to a key by name or code")
                .arg(Arg::new("action").required(true).index(1))
                .arg(Arg::new("key").required(true).index(2)),
        )
        .subcommand(Command::new("reset").about("Restore and save the default bindings"))
        .subcommand(
            Command::new("render")
                .about("Substitute [ACTION] placeholders with bound key names")
                .arg(Arg::new("template").required(true).index(1)),
        )
        .subcommand(
            Command::new("capture")
                .about("Bind an action to the next key pressed in this terminal")
                .arg(Arg::new("action").required(true).index(1)),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let matches = cli().get_matches();

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let config = HudConfig::load(config_path.as_deref())?;

    let settings_path = match matches.get_one::<String>("settings") {
        Some(path) => PathBuf::from(path),
        None => config
            .resolved_settings_path()
            .context("no settings location; pass --settings")?,
    };
    let store = FileSettings::open(&settings_path)?;
    let mut input = InputManager::new(store);

    match matches.subcommand() {
        Some(("list", _)) => list(&mut input),
        Some(("set", args)) => set(&mut input, args)?,
        Some(("reset", _)) => {
            input.load_defaults(true);
            println!("Default bindings restored");
        }
        Some(("render", args)) => render(&mut input, args)?,
        Some(("capture", args)) => capture(&mut input, args, &config).await?,
        _ => unreachable!("clap requires a subcommand"),
    }

    input.registry_mut().store_mut().flush()?;
    Ok(())
}

fn list(input: &mut InputManager<FileSettings>) {
    println!("{:<16} {:<14} {:<10} REMAPPABLE", "ACTION", "KEY", "SHOWN AS");
    for action in InputAction::ALL {
        let key = input.resolve(action);
        println!(
            "{:<16} {:<14} {:<10} {}",
            action.name(),
            key.name(),
            display_name(key),
            if action.can_be_remapped() { "yes" } else { "no" }
        );
    }
}

fn parse_action(args: &ArgMatches) -> Result<InputAction> {
    let name = args
        .get_one::<String>("action")
        .context("action argument is required")?;
    Ok(name.parse()?)
}

fn set(input: &mut InputManager<FileSettings>, args: &ArgMatches) -> Result<()> {
    let action = parse_action(args)?;
    let key: KeyCode = args
        .get_one::<String>("key")
        .context("key argument is required")?
        .parse()?;

    if !input.can_be_remapped(action) {
        bail!("{} cannot be remapped", action);
    }
    input.rebind(action, key);
    println!("{} -> {}", action, key);
    Ok(())
}

fn render(input: &mut InputManager<FileSettings>, args: &ArgMatches) -> Result<()> {
    let text = args
        .get_one::<String>("template")
        .context("template argument is required")?;

    for name in template::unknown_placeholders(text) {
        eprintln!("warning: [{}] is not an action", name);
    }

    input.registry_mut().ensure_loaded();
    println!("{}", input.render(text));
    Ok(())
}

async fn capture(
    input: &mut InputManager<FileSettings>,
    args: &ArgMatches,
    config: &HudConfig,
) -> Result<()> {
    let action = parse_action(args)?;
    if !input.can_be_remapped(action) {
        bail!("{} cannot be remapped", action);
    }

    println!(
        "Press a key for {} (currently {}), Ctrl-C to cancel",
        action,
        input.resolve(action)
    );

    enable_raw_mode()?;
    let outcome = capture_loop(input, action, config).await;
    disable_raw_mode()?;

    match outcome? {
        Some(CaptureStatus::Bound(key)) => println!("{} -> {}", action, key),
        Some(CaptureStatus::TimedOut) => println!("No key pressed; {} unchanged", action),
        Some(status) => println!("{} unchanged ({:?})", action, status),
        None => println!("Cancelled; {} unchanged", action),
    }
    Ok(())
}

/// Frame loop: poll the terminal, then poll the capture, until it finishes.
///
/// Returns `None` when interrupted with Ctrl-C.
async fn capture_loop(
    input: &mut InputManager<FileSettings>,
    action: InputAction,
    config: &HudConfig,
) -> Result<Option<CaptureStatus>> {
    let mut source = TerminalKeySource::new(false);
    let mut capture = RebindCapture::new(action);
    if let Some(limit) = config.rebind.frame_limit {
        capture = capture.with_frame_limit(limit);
    }

    let mut ticker = tokio::time::interval(config.frame_interval());
    loop {
        ticker.tick().await;
        if source.poll_frame()? {
            return Ok(None);
        }
        let status = capture.poll(input.registry_mut(), &source);
        if status.is_finished() {
            return Ok(Some(status));
        }
    }
}
