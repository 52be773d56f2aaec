use std::{fs, path::Path};

use crate::{config::Config, error::Error};

/// Load configuration from file and apply environment overrides.
pub fn load_config(config_file: &Path) -> Result<Config, Error> {
    let content =
        fs::read_to_string(config_file).map_err(|_| Error::OpenFile(config_file.to_path_buf()))?;
    let mut config: Config =
        toml::from_str(&content).map_err(|e| Error::ParseConfig(e.to_string()))?;
    config.apply_env_overrides();
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config_file: &Path, config: &Config) -> Result<(), Error> {
    let data = toml::to_string_pretty(config).map_err(|e| Error::ParseConfig(e.to_string()))?;
    save(config_file, &data)
}

fn save(path: &Path, data: &str) -> Result<(), Error> {
    use std::io::Write;

    if let Some(parent_dir) = path.parent() {
        fs::create_dir_all(parent_dir).map_err(|_| Error::ParentDir(parent_dir.to_path_buf()))?;
    }

    let mut f = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|_| Error::OpenFile(path.to_path_buf()))?;

    f.write_all(data.as_bytes()).map_err(|_| Error::WriteFile(path.to_path_buf()))?;

    Ok(())
}
