use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

const APP_DIR: &str = "lightbox";
const APP_CONFIG_FILE: &str = "config.json";

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read lightbox config: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse lightbox config")]
    Parse(#[from] serde_json::Error),
    #[error("lightbox options must be a JSON object")]
    NotAnObject,
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavVisibility {
    /// Shown unless the host is a touch device.
    #[default]
    Auto,
    Always,
    Never,
}

/// Where image captions are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CaptionSource {
    #[serde(rename = "img")]
    #[default]
    ThumbnailImage,
    #[serde(rename = "self")]
    Trigger,
}

/// Lightbox options. Unknown keys are kept in `extra` and otherwise ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LightboxConfig {
    pub selector: String,
    pub captions: bool,
    pub captions_selector: CaptionSource,
    pub caption_attribute: String,
    pub nav_visibility: NavVisibility,
    pub close_enabled: bool,
    pub counter_enabled: bool,
    pub keyboard_enabled: bool,
    pub doc_close: bool,
    pub draggable: bool,
    pub drag_threshold_px: f64,
    pub vertical_dismiss_enabled: bool,
    pub autoplay_video: bool,
    pub hide_scrollbar_while_open: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            selector: ".lightbox".to_string(),
            captions: true,
            captions_selector: CaptionSource::ThumbnailImage,
            caption_attribute: "alt".to_string(),
            nav_visibility: NavVisibility::Auto,
            close_enabled: true,
            counter_enabled: true,
            keyboard_enabled: true,
            doc_close: true,
            draggable: true,
            drag_threshold_px: 20.0,
            vertical_dismiss_enabled: true,
            autoplay_video: false,
            hide_scrollbar_while_open: true,
            extra: Map::new(),
        }
    }
}

impl LightboxConfig {
    /// Overlays user options onto the defaults key by key.
    pub fn merged(user: &Value) -> ConfigResult<Self> {
        if !user.is_object() {
            return Err(ConfigError::NotAnObject);
        }
        Ok(Self::deserialize(user)?)
    }

    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::merged(&value)
    }

    /// Applies `user` on top of this config rather than on top of the defaults.
    pub fn overlay(&self, user: &Value) -> ConfigResult<Self> {
        let Value::Object(user) = user else {
            return Err(ConfigError::NotAnObject);
        };
        let mut base = serde_json::to_value(self)?;
        if let Value::Object(base) = &mut base {
            base.extend(user.clone());
        }
        Self::merged(&base)
    }

    pub fn drag_threshold(&self) -> f64 {
        self.drag_threshold_px.max(0.0)
    }
}

pub fn load_config(path: &Path) -> ConfigResult<LightboxConfig> {
    if !path.exists() {
        return Ok(LightboxConfig::default());
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    LightboxConfig::from_json_str(&raw)
}

pub fn load_config_or_default(path: &Path) -> LightboxConfig {
    load_config(path).unwrap_or_else(|err| {
        tracing::warn!(?err, ?path, "failed to load lightbox config; using defaults");
        LightboxConfig::default()
    })
}

pub fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

/// `$XDG_CONFIG_HOME/lightbox/config.json`, falling back to `~/.config`.
pub fn default_config_path(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> ConfigResult<PathBuf> {
    let mut path = match xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        Some(xdg) => xdg.to_path_buf(),
        None => home
            .ok_or(ConfigError::MissingHomeDirectory)?
            .join(".config"),
    };
    path.push(APP_DIR);
    path.push(APP_CONFIG_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults_match_documented_options() {
        let config = LightboxConfig::default();
        assert_eq!(config.selector, ".lightbox");
        assert_eq!(config.nav_visibility, NavVisibility::Auto);
        assert_eq!(config.captions_selector, CaptionSource::ThumbnailImage);
        assert_eq!(config.drag_threshold_px, 20.0);
        assert!(config.vertical_dismiss_enabled);
        assert!(!config.autoplay_video);
        assert!(config.extra.is_empty());
    }

    #[test]
    fn merged_overlays_user_keys_and_keeps_unknown_ones() {
        let config = LightboxConfig::merged(&json!({
            "navVisibility": "never",
            "dragThresholdPx": 45,
            "captionsSelector": "self",
            "zoomText": "+",
        }))
        .expect("object options should merge");

        assert_eq!(config.nav_visibility, NavVisibility::Never);
        assert_eq!(config.drag_threshold_px, 45.0);
        assert_eq!(config.captions_selector, CaptionSource::Trigger);
        assert!(config.close_enabled);
        assert_eq!(config.extra.get("zoomText"), Some(&json!("+")));
    }

    #[test]
    fn merged_rejects_non_object_options() {
        let err = LightboxConfig::merged(&json!([1, 2])).expect_err("arrays are not options");
        assert!(matches!(err, ConfigError::NotAnObject));
    }

    #[test]
    fn merged_rejects_mistyped_known_keys() {
        let err = LightboxConfig::merged(&json!({ "draggable": "yes" }))
            .expect_err("draggable must be a bool");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn overlay_keeps_base_values_for_absent_keys() {
        let base = LightboxConfig {
            doc_close: false,
            ..LightboxConfig::default()
        };
        let config = base
            .overlay(&json!({ "counterEnabled": false }))
            .expect("valid overlay");
        assert!(!config.doc_close);
        assert!(!config.counter_enabled);
        assert!(matches!(
            base.overlay(&json!(3)),
            Err(ConfigError::NotAnObject)
        ));
    }

    #[test]
    fn drag_threshold_never_goes_negative() {
        let config = LightboxConfig {
            drag_threshold_px: -3.0,
            ..LightboxConfig::default()
        };
        assert_eq!(config.drag_threshold(), 0.0);
    }

    #[test]
    fn load_config_returns_defaults_for_missing_file() {
        let config = load_config(Path::new("/nonexistent/lightbox/config.json"))
            .expect("missing file should fall back to defaults");
        assert_eq!(config, LightboxConfig::default());
    }

    #[test]
    fn load_config_or_default_swallows_parse_errors() {
        let path = std::env::temp_dir().join(format!(
            "lightbox-config-test-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").expect("temp file should be writable");

        assert!(load_config(&path).is_err());
        assert_eq!(load_config_or_default(&path), LightboxConfig::default());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn default_config_path_prefers_xdg_config_home() {
        let path = default_config_path(
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/lightbox/config.json"));
    }

    #[test]
    fn default_config_path_falls_back_to_home_dot_config() {
        let path = default_config_path(None, Some(Path::new("/tmp/home")))
            .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/lightbox/config.json"));
    }

    #[test]
    fn default_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = default_config_path(None, None).unwrap_err();
        assert!(matches!(error, ConfigError::MissingHomeDirectory));
    }
}
