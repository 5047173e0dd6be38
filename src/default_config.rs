use directories::ProjectDirs;
use std::path::PathBuf;

/// `config.toml` in the platform config dir, if a home directory is known.
pub(crate) fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("me", "shoryuken", "cellgrid")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
