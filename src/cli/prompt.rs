use dialoguer::{Input, Select, theme::ColorfulTheme};

use crate::{
    cli::SourceKind,
    error::{Error, Res},
};

fn prompt_err(e: dialoguer::Error) -> Error {
    Error::Io(std::io::Error::other(e))
}

/// Asks for a free-text answer. Names are matched exactly afterwards, so the
/// input is returned as typed apart from the line ending.
pub fn ask(prompt: &str) -> Res<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()
        .map_err(prompt_err)
}

pub fn ask_source() -> Res<SourceKind> {
    let items = ["user", "spotify"];
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("User playlists or Spotify playlists?")
        .items(&items)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    Ok(if choice == 0 {
        SourceKind::User
    } else {
        SourceKind::Spotify
    })
}
