//! Character data payload
//!
//! Shared by text and comment nodes.

/// String value of a text or comment node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterData {
    /// Node value
    pub data: String,
}

impl CharacterData {
    /// Create a new character data payload
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_data() {
        assert_eq!(CharacterData::new("  \n ").data, "  \n ");
        assert_eq!(CharacterData::default(), CharacterData::new(""));
    }
}
