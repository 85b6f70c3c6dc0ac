//! Unique path-component generation

use std::fmt::Debug;

/// Source of opaque tokens naming merged files and directories
///
/// Implementations must be safe to share between concurrent merges without
/// coordination, which rules out plain counters in production.
pub trait UniqueIdGenerator: Send + Sync + Debug {
    /// Next token; never repeats
    fn next_id(&self) -> String;
}

/// Random UUID v4 tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl UniqueIdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_generator_tokens_are_distinct() {
        let ids: HashSet<_> = (0..1000).map(|_| UuidGenerator.next_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn uuid_generator_tokens_parse() {
        let id = UuidGenerator.next_id();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }
}
