//! Trivia categories and the built-in fallback list.

use serde::{Deserialize, Serialize};

/// Open Trivia DB category identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u32);

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CategoryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

const BUILTIN: &[(u32, &str)] = &[
    (9, "General Knowledge"),
    (10, "Entertainment: Books"),
    (11, "Entertainment: Film"),
    (14, "Entertainment: Television"),
    (29, "Entertainment: Comics"),
    (31, "Entertainment: Japanese Anime & Manga"),
    (32, "Entertainment: Cartoon & Animations"),
    (12, "Entertainment: Music"),
    (13, "Entertainment: Musicals & Theatres"),
    (15, "Entertainment: Video Games"),
    (16, "Entertainment: Board Games"),
    (17, "Science & Nature"),
    (18, "Science: Computers"),
    (19, "Science: Mathematics"),
    (20, "Mythology"),
    (21, "Sports"),
    (22, "Geography"),
    (23, "History"),
    (24, "Politics"),
    (25, "Art"),
    (26, "Celebrities"),
    (27, "Animals"),
    (28, "Vehicles"),
    (30, "Science: Gadgets"),
];

/// Static list used when the category endpoint cannot be reached.
pub fn builtin_categories() -> Vec<Category> {
    BUILTIN
        .iter()
        .map(|(id, name)| Category {
            id: CategoryId(*id),
            name: (*name).to_string(),
        })
        .collect()
}
