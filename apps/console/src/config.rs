use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
    pub admin_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            admin_token: None,
        }
    }
}

/// Defaults, then `console.toml` in the working directory, then environment
/// variables. Command-line flags are applied by the caller on top.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("console.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
            if let Some(v) = file_cfg.get("admin_token") {
                settings.admin_token = Some(v.clone());
            }
        }
    }

    if let Ok(v) = std::env::var("CURRICULOS_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("CURRICULOS_ADMIN_TOKEN") {
        settings.admin_token = Some(v);
    }

    settings
}
