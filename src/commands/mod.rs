pub mod channel;
pub mod config_cmd;
pub mod graph;
pub mod notification;
pub mod pixel;
pub mod user;
pub mod webhook;

/// Treat an empty flag value the same as an absent one.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some("a".into())), Some("a"));
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&None), None);
    }
}
