//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use roster_core::{HeaderState, ListState, UserRecord};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print the header bar.
pub fn header(state: &HeaderState) {
    let back = if state.back { "← " } else { "" };
    match &state.weather {
        Some(snapshot) => println!(
            "{}{}  {} {}",
            back,
            state.title.bold(),
            snapshot.icon().glyph(),
            snapshot
        ),
        None => println!("{}{}", back, state.title.bold()),
    }
}

/// One list row: id, full name and location.
pub fn user_row(user: &UserRecord) -> String {
    format!(
        "{}  {}  {}",
        user.id.as_str().dimmed(),
        user.full_name(),
        format!("{}, {}", user.address.city, user.address.country).dimmed()
    )
}

/// Print users as rows, or one JSON object per line.
pub fn users(users: &[UserRecord], as_json: bool) -> Result<()> {
    for user in users {
        if as_json {
            json(user)?;
        } else {
            println!("{}", user_row(user));
        }
    }
    Ok(())
}

/// A one-line description of a list state.
pub fn state_summary(state: &ListState) -> String {
    match state {
        ListState::Loading => "Loading...".to_string(),
        ListState::NoNetworkNoData => "No network and nothing cached".to_string(),
        ListState::Empty => "No users".to_string(),
        ListState::Ready(users) => match users.len() {
            1 => "1 user".to_string(),
            n => format!("{} users", n),
        },
    }
}
