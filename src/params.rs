use std::collections::HashMap;
use std::str::FromStr;

/// A decoded `key=value&key=value` block.
///
/// Keys and values are percent-decoded with form-urlencoded rules (`+` is a
/// space). When a key repeats, the last occurrence wins. Malformed escapes
/// never fail the decode: they are kept literally, and invalid UTF-8 is
/// replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedParams {
    values: HashMap<String, String>,
}

impl EncodedParams {
    pub fn parse(input: &str) -> Self {
        let mut values = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(input.as_bytes()) {
            values.insert(key.into_owned(), value.into_owned());
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Parses `key` into `T`, falling back to `default` when the key is
    /// absent or its value does not parse.
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> T {
        match self.get(key).map(|v| v.parse::<T>()) {
            Some(Ok(value)) => value,
            Some(Err(_)) | None => default,
        }
    }
}
