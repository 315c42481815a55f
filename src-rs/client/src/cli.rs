use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::ClientConfig;

const DEFAULT_URL: &str = "http://localhost:5000";
const DEFAULT_STORAGE: &str = "taskmaster-storage.json";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

pub fn parse_config() -> ClientConfig {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args(env_config(), &args)
}

fn env_config() -> ClientConfig {
    ClientConfig {
        base_url: env_or("TASKMASTER_URL", DEFAULT_URL.to_string()),
        storage_path: PathBuf::from(env_or("TASKMASTER_STORAGE", DEFAULT_STORAGE.to_string())),
        timeout: Duration::from_secs(env_u64("TASKMASTER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
        offline: false,
    }
}

pub fn parse_args(mut cfg: ClientConfig, args: &[String]) -> ClientConfig {
    let mut idx = 0;
    while idx < args.len() {
        match args[idx].as_str() {
            "--base" => {
                if let Some(value) = args.get(idx + 1) {
                    cfg.base_url = value.clone();
                    idx += 1;
                }
            }
            "--storage" => {
                if let Some(value) = args.get(idx + 1) {
                    cfg.storage_path = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--timeout" => {
                if let Some(value) = args.get(idx + 1) {
                    if let Ok(secs) = value.parse::<u64>() {
                        cfg.timeout = Duration::from_secs(secs.max(1));
                    }
                    idx += 1;
                }
            }
            "--offline" => cfg.offline = true,
            _ => {}
        }
        idx += 1;
    }
    cfg
}

fn env_or(key: &str, fallback: String) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => fallback,
    }
}

fn env_u64(key: &str, fallback: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ClientConfig {
        ClientConfig {
            base_url: DEFAULT_URL.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            offline: false,
        }
    }

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = parse_args(
            base(),
            &args(&["--base", "http://todo.test", "--storage", "/tmp/s.json", "--timeout", "2", "--offline"]),
        );
        assert_eq!(cfg.base_url, "http://todo.test");
        assert_eq!(cfg.storage_path, PathBuf::from("/tmp/s.json"));
        assert_eq!(cfg.timeout, Duration::from_secs(2));
        assert!(cfg.offline);
    }

    #[test]
    fn bad_or_missing_values_keep_defaults() {
        let cfg = parse_args(base(), &args(&["--timeout", "soon", "--unknown", "--base"]));
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(cfg.base_url, DEFAULT_URL);
        assert!(!cfg.offline);
    }
}
