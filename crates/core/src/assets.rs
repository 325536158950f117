use once_cell::sync::Lazy;
use std::path::PathBuf;

static DEFAULT_DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    dirs::data_local_dir()
        .map(|p| p.join("groqchat"))
        .unwrap_or_else(|| PathBuf::from("~/.local/share/groqchat"))
});

/// Returns the data directory, creating it if needed.
///
/// `XDG_DATA_HOME` takes precedence over the platform default.
pub fn get_data_dir() -> std::io::Result<PathBuf> {
    let path = if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data_home).join("groqchat")
    } else {
        DEFAULT_DATA_DIR.clone()
    };
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

/// Built-in alias tables and provider settings.
pub fn get_default_aliases() -> &'static str {
    include_str!("../data/aliases.yml")
}
