// SPDX-License-Identifier: GPL-3.0-only

//! Touchboard replay tool
//!
//! Reads key codes from standard input, runs them through a keyboard session
//! backed by an in-memory text buffer and prints the resulting text. Useful
//! for checking layouts and interpreter behavior without a UI host.
//!
//! Key codes are whitespace-separated integers; `#` starts a comment that
//! runs to the end of the line.
//!
//! ```text
//! $ echo "-1 104 105 -3 128513" | touchboard
//! Hi😁
//! ```

use clap::Parser;
use std::error::Error;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;
use touchboard::config::Config;
use touchboard::host::{KeyboardSession, TextBuffer};
use touchboard::layout::{KeyCode, LayoutRegistry};

#[derive(Parser, Debug)]
#[command(name = "touchboard")]
#[command(version)]
#[command(about = "Replay key codes through the on-screen keyboard", long_about = None)]
struct Args {
    /// JSON preferences file (keyboard_language, keyboard_show_popup)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory of layout JSON files to use instead of the built-in set
    #[arg(short, long, value_name = "DIR")]
    layouts: Option<PathBuf>,

    /// Print every action as it is executed
    #[arg(short, long)]
    actions: bool,

    /// Print the layout shown after the last key
    #[arg(long)]
    print_layout: bool,

    /// Validate the layouts and exit
    #[arg(long)]
    check_layouts: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("touchboard=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let registry = match &args.layouts {
        Some(dir) => LayoutRegistry::from_dir(dir)?,
        None => LayoutRegistry::builtin()?,
    };
    if args.check_layouts {
        for layout in registry.layouts() {
            println!("{}: {} keys", layout.name, layout.key_count());
        }
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let codes = parse_key_codes(&input)?;

    let mut session = KeyboardSession::new(Arc::new(registry), &config, TextBuffer::new());
    session.start_input(false);
    for code in codes {
        let action = session.on_key(code);
        if args.actions {
            println!("{:>8}  {}", code, action);
        }
    }

    if args.print_layout {
        let layout = session.current_layout();
        println!("[{}]", layout.name);
        for row in &layout.rows {
            let labels: Vec<String> = row.keys.iter().map(|k| k.display_label()).collect();
            println!("{}", labels.join(" "));
        }
    }

    println!("{}", session.into_target().into_text());
    Ok(())
}

/// Parses whitespace-separated key codes, skipping `#` comments.
fn parse_key_codes(input: &str) -> Result<Vec<KeyCode>, String> {
    let mut codes = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let content = line.split('#').next().unwrap_or_default();
        for token in content.split_whitespace() {
            let value = token
                .parse::<i32>()
                .map_err(|e| format!("line {}: invalid key code '{}': {}", index + 1, token, e))?;
            codes.push(KeyCode(value));
        }
    }
    Ok(codes)
}
