use std::collections::HashMap;

/// Typed accessors over a `key: value` text block such as
/// `/proc/<pid>/status` or `/proc/<pid>/io`.
///
/// Missing keys and values of the wrong shape read as `None`, never as an
/// error. Numeric accessors take the first whitespace-separated token of the
/// value, so suffixed fields like `VmRSS:  1234 kB` parse as `1234`.
#[derive(Debug, Default)]
pub struct PropertyBag {
    entries: HashMap<String, String>,
}

impl PropertyBag {
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();
        for line in text.lines() {
            if let Some((key, value)) = line.split_once(':') {
                entries.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Self { entries }
    }

    pub fn u64(&self, key: &str) -> Option<u64> {
        self.first_token(key)?.parse().ok()
    }

    pub fn i64(&self, key: &str) -> Option<i64> {
        self.first_token(key)?.parse().ok()
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.first_token(key)? {
            "0" => Some(false),
            "1" => Some(true),
            _ => None,
        }
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn first_token(&self, key: &str) -> Option<&str> {
        self.entries.get(key)?.split_whitespace().next()
    }
}
