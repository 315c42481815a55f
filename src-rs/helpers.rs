use std::env;
use std::str::FromStr;

/// Comma-separated values of `key`, trimmed, empty entries dropped.
pub fn load_list_from_env(key: &str) -> Vec<String> {
    env::var(key).map(|raw| split_list(&raw)).unwrap_or_default()
}

pub fn split_list(raw: &str) -> Vec<String> {
    let mut items = Vec::new();
    for item in raw.split(',') {
        let trimmed = item.trim();
        if !trimmed.is_empty() {
            items.push(trimmed.to_string());
        }
    }
    items
}

pub fn env_or_parse<T: FromStr>(key: &str, fallback: T) -> T {
    match env::var(key) {
        Ok(value) => value.trim().parse::<T>().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_drops_blank_entries() {
        assert_eq!(
            split_list(" http://a.test, ,http://b.test ,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn env_or_parse_falls_back_on_garbage() {
        env::set_var("TASKMASTER_TEST_PORT_GARBAGE", "not-a-port");
        assert_eq!(env_or_parse("TASKMASTER_TEST_PORT_GARBAGE", 5000u16), 5000);
        env::set_var("TASKMASTER_TEST_PORT_OK", " 8081 ");
        assert_eq!(env_or_parse("TASKMASTER_TEST_PORT_OK", 5000u16), 8081);
        assert_eq!(env_or_parse("TASKMASTER_TEST_PORT_UNSET", 42u16), 42);
    }
}
