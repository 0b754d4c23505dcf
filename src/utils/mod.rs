pub mod config {
    use serde::Deserialize;
    use std::fs;
    use std::path::Path;

    /// Looked up in the XML directory when no `--config` is given.
    pub const CONFIG_FILE_NAME: &str = "doxdepends.toml";

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct DotConfig {
        pub rankdir: Option<String>, // "LR" | "TB"
        pub concentrate: Option<bool>,
        pub links: Option<bool>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct Config {
        pub target_namespace: Option<String>,
        pub output_file: Option<String>,
        pub report_cycles: Option<bool>,
        pub dot: Option<DotConfig>,
    }

    #[must_use]
    pub fn load_config_at(path: &Path) -> Option<Config> {
        let data = fs::read_to_string(path).ok()?;
        toml::from_str::<Config>(&data).ok()
    }

    #[must_use]
    pub fn load_config_near(dir: &Path) -> Option<Config> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            load_config_at(&path)
        } else {
            None
        }
    }
}
