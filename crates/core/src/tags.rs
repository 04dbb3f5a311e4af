//! Tag relations a game can be linked through.
//!
//! Genres and platforms are fixed reference sets. A game owns one link set
//! per [`TagKind`]; the write path never creates new tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two many-to-many relations hanging off a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Genre,
    Platform,
}

impl TagKind {
    /// Every relation, in the order writes synchronize them.
    pub const ALL: [TagKind; 2] = [TagKind::Genre, TagKind::Platform];

    /// Singular lowercase label, used in log fields and error messages.
    pub fn label(self) -> &'static str {
        match self {
            TagKind::Genre => "genre",
            TagKind::Platform => "platform",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_matches_serde_name() {
        for kind in TagKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.label());
        }
    }

    #[test]
    fn genre_is_synchronized_first() {
        assert_eq!(TagKind::ALL, [TagKind::Genre, TagKind::Platform]);
    }
}
