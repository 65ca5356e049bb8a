use crate::error::AppError;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Resolve the `config` directory of a service.
///
/// Works both when the process runs from the workspace root and when it runs
/// from inside the service directory itself.
pub fn configuration_directory(service_dir: &str) -> Result<PathBuf, AppError> {
    let base_path = std::env::current_dir()?;

    if base_path.ends_with(service_dir) {
        Ok(base_path.join("config"))
    } else {
        Ok(base_path.join(service_dir).join("config"))
    }
}

/// Load layered settings: `base.yaml` from `config_dir`, then `APP_`-prefixed
/// environment variables using `__` as the nesting separator
/// (e.g. `APP_DIRECTORY__BASE_URL`).
pub fn load_settings<T: DeserializeOwned>(config_dir: &Path) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let settings = Config::builder()
        .add_source(File::from(config_dir.join("base.yaml")).required(true))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize::<T>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize)]
    struct Sample {
        server: SampleServer,
    }

    #[derive(Debug, Deserialize)]
    struct SampleServer {
        host: String,
        port: u16,
    }

    #[test]
    fn loads_base_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("base.yaml")).unwrap();
        writeln!(file, "server:\n  host: 127.0.0.1\n  port: 5001").unwrap();

        let settings: Sample = load_settings(dir.path()).unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 5001);
    }

    #[test]
    fn missing_base_yaml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Sample, AppError> = load_settings(dir.path());
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
