//! Combo - interactive combobox driver.
//!
//! Loads a combobox config, then reads one command per line from stdin and
//! prints the resulting accessibility tree:
//!
//! ```text
//! focus | blur | type <text> | clear | key <name> | click <option id>
//! toggle | show | json | quit
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use combo_core::{default_config_path, ComboBoxConfig, ComboOption, OptionId, OptionList};
use combo_ui::{ComboBox, UuidIdProvider};

// =============================================================================
// Configuration
// =============================================================================

/// Built-in options used when no config file exists.
fn fallback_config() -> ComboBoxConfig {
    let mut config = ComboBoxConfig::new("Select Fruit");
    config.id = Some("fruit".to_string());
    config.options = OptionList::new(vec![
        ComboOption::new("banana", "Banana"),
        ComboOption::new("pineapple", "Pineapple"),
        ComboOption::new("blueberry", "Blueberry"),
    ])
    .unwrap_or_default();
    config
}

/// Load the config from an explicit path, the default path, or fall back
/// to built-in options.
fn load_config(path: Option<PathBuf>) -> Result<ComboBoxConfig, String> {
    if let Some(path) = path {
        return ComboBoxConfig::load(&path).map_err(|e| e.to_string());
    }

    match default_config_path() {
        Some(path) if path.exists() => ComboBoxConfig::load(&path).map_err(|e| e.to_string()),
        _ => {
            tracing::info!("No config file found, using built-in options");
            Ok(fallback_config())
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Focus,
    Blur,
    Type(String),
    Key(String),
    Click(String),
    Toggle,
    Show,
    Json,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
fn parse_command(line: &str) -> Option<Result<Command, String>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (name, arg) = match line.trim_start().split_once(' ') {
        Some((name, arg)) => (name, arg),
        None => (line.trim(), ""),
    };

    let command = match name {
        "" => return None,
        "focus" => Command::Focus,
        "blur" => Command::Blur,
        "type" => Command::Type(arg.to_string()),
        "clear" => Command::Type(String::new()),
        "key" if !arg.is_empty() => Command::Key(arg.trim().to_string()),
        "click" if !arg.is_empty() => Command::Click(arg.trim().to_string()),
        "toggle" => Command::Toggle,
        "show" => Command::Show,
        "json" => Command::Json,
        "quit" | "exit" => Command::Quit,
        other => return Some(Err(format!("Unknown command: {}", other))),
    };
    Some(Ok(command))
}

/// Resolve a typed option id. Digits name a numeric id only when such an
/// option exists, so text ids like "7" stay reachable.
fn resolve_option_id(options: &OptionList, s: &str) -> OptionId {
    match s.parse::<i64>().map(OptionId::Number) {
        Ok(id) if options.position(&id).is_some() => id,
        _ => OptionId::Text(s.to_string()),
    }
}

/// Apply a command. Returns false when the session should end.
fn apply(combo: &mut ComboBox, command: Command, out: &mut impl Write) -> io::Result<bool> {
    match command {
        Command::Focus => combo.focus(),
        Command::Blur => combo.blur(),
        Command::Type(text) => combo.set_input_text(text),
        Command::Key(name) => combo.press_key(&name),
        Command::Click(id) => {
            let id = resolve_option_id(combo.options(), &id);
            combo.press_option(&id);
        }
        Command::Toggle => combo.press_trigger(),
        Command::Show => {}
        Command::Json => {
            let json = serde_json::to_string_pretty(&combo.accessibility_tree())
                .map_err(io::Error::other)?;
            writeln!(out, "{}", json)?;
            return Ok(true);
        }
        Command::Quit => return Ok(false),
    }
    write!(out, "{}", combo.accessibility_tree())?;
    Ok(true)
}

fn run(config: ComboBoxConfig) -> io::Result<()> {
    let mut combo = ComboBox::from_config(config, &UuidIdProvider).on_change(|option| {
        match option {
            Some(option) => tracing::info!("Selected '{}' ({})", option.label, option.id),
            None => tracing::info!("Selection cleared"),
        }
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", combo.accessibility_tree())?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        match parse_command(&line) {
            None => continue,
            Some(Err(e)) => tracing::warn!("{}", e),
            Some(Ok(command)) => {
                if !apply(&mut combo, command, &mut out)? {
                    break;
                }
            }
        }
        out.flush()?;
    }

    Ok(())
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() {
    // Logs go to stderr so stdout carries only rendered trees
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match load_config(std::env::args_os().nth(1).map(PathBuf::from)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Combobox '{}' with {} options",
        config.label,
        config.options.len()
    );

    if let Err(e) = run(config) {
        tracing::error!("I/O error: {}", e);
        std::process::exit(1);
    }
}
