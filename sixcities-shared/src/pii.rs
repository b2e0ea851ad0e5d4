use serde::Deserialize;
use std::fmt;

/// Wraps a secret (connection strings, credentials) so that `Debug` and
/// `Display` never print it. Deserializes transparently from the inner value.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(T);

impl<T> Masked<T> {
    /// Borrow the real value. Call sites should be the places that actually
    /// need the secret (e.g. opening a connection), never log statements.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_hide_value() {
        let secret = Masked("postgres://user:hunter2@db/sixcities".to_string());

        assert_eq!(format!("{:?}", secret), "********");
        assert_eq!(format!("{}", secret), "********");
        assert!(secret.expose().contains("hunter2"));
    }

    #[test]
    fn test_deserializes_from_inner_value() {
        let secret: Masked<String> = serde_json::from_str("\"s3cr3t\"").unwrap();
        assert_eq!(secret.expose(), "s3cr3t");
    }
}
