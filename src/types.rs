use serde::{Deserialize, Serialize};

use crate::api::{FetchError, ImageOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Fact,
    Image,
}

impl FavoriteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteKind::Fact => "fact",
            FavoriteKind::Image => "image",
        }
    }
}

impl std::fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted favorite: fact text or an image URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FavoriteKind,
    pub content: String,
    #[serde(default)]
    pub added_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breed {
    pub id: String,
    pub name: String,
}

/// Work handed to the fetch worker. `generation` ties the answer back to the
/// candidate slot that asked for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchRequest {
    Fact { generation: u64 },
    Image { generation: u64, breed_id: Option<String> },
    Breeds,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    FactFetched { generation: u64, result: Result<String, FetchError> },
    ImageFetched { generation: u64, result: Result<ImageOutcome, FetchError> },
    BreedsFetched(Result<Vec<Breed>, FetchError>),
    Quit,
}
