//! Chats kept on disk between CLI invocations.

use crate::core::chat::Chat;
use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Load a chat from `path`, or start a new one when the file does not exist.
pub fn load_or_new(path: &Path) -> Result<Chat, Box<dyn Error>> {
    if !path.exists() {
        return Ok(Chat::new());
    }
    load(path)
}

pub fn load(path: &Path) -> Result<Chat, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn save(path: &Path, chat: &Chat) -> Result<(), Box<dyn Error>> {
    let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = parent {
        fs::create_dir_all(dir)?;
    }

    let contents = serde_json::to_string_pretty(chat)?;
    let mut temp_file = match parent {
        Some(dir) => NamedTempFile::new_in(dir)?,
        None => NamedTempFile::new_in(".")?,
    };
    temp_file.write_all(contents.as_bytes())?;
    temp_file.as_file_mut().sync_all()?;
    temp_file
        .persist(path)
        .map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
    Ok(())
}
