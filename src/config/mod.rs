use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

use directories::BaseDirs;

use crate::step::{PropertyReader, PYTHON_EXECUTABLE_LOCATION, PYTHON_SCRIPT_PATH};

pub const KEY_PYTHON_EXECUTABLE: &str = "PYTHON_EXECUTABLE_LOCATION";
pub const KEY_SCRIPT_PATH: &str = "PYTHON_SCRIPT_PATH";
pub const KEY_LOG_LEVEL: &str = "LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(default_config_path())
    }

    /// Defaults, then the rc file at `config_path` if present, then environment.
    pub fn load_from(config_path: PathBuf) -> Self {
        let mut map = default_map();

        if let Ok(text) = fs::read_to_string(&config_path) {
            map.extend(parse_rc(&text));
        }

        // Environment takes precedence
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self {
            inner: map,
            config_path,
        }
    }

    /// In-memory config over the defaults; ignores the environment.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut inner = default_map();
        inner.extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        Self {
            inner,
            config_path: PathBuf::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.inner.insert(key.to_string(), value.into());
    }

    /// Apply command-line values; they win over environment and rc file.
    pub fn apply_overrides(&mut self, python: Option<String>, script: Option<String>) {
        if let Some(python) = python {
            self.set(KEY_PYTHON_EXECUTABLE, python);
        }
        if let Some(script) = script {
            self.set(KEY_SCRIPT_PATH, script);
        }
    }

    pub fn log_level(&self) -> String {
        self.get(KEY_LOG_LEVEL).unwrap_or_else(|| "info".to_string())
    }

    pub fn config_dir(&self) -> Option<&Path> {
        self.config_path.parent()
    }
}

impl PropertyReader for Config {
    fn get_string(&self, name: &str) -> Option<String> {
        match name {
            PYTHON_EXECUTABLE_LOCATION => self.get(KEY_PYTHON_EXECUTABLE),
            PYTHON_SCRIPT_PATH => self.get(KEY_SCRIPT_PATH),
            _ => None,
        }
    }
}

fn parse_rc(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            map.insert(k.trim().to_string(), v.trim().to_string());
        }
    }
    map
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[KEY_PYTHON_EXECUTABLE, KEY_SCRIPT_PATH, KEY_LOG_LEVEL];

    KEYS.contains(&k) || k.starts_with("CALL_PYTHON_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("call_python").join(".callpythonrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert(KEY_LOG_LEVEL.into(), "info".into());
    m
}
