//! Game image data models.
//!
//! A `GameImage` is the scene players search; its characters are created with
//! it by the seeding step and never change afterwards.

use serde::{Deserialize, Serialize};

use super::Character;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameImage {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub width: u32,
    pub height: u32,
}

/// Character identity as shown to players. Bounding boxes stay server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterSummary {
    pub id: i64,
    pub name: String,
}

impl From<&Character> for CharacterSummary {
    fn from(character: &Character) -> Self {
        Self {
            id: character.id,
            name: character.name.clone(),
        }
    }
}

/// An image together with the characters hidden in it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameImageDetails {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub width: u32,
    pub height: u32,
    pub characters: Vec<CharacterSummary>,
}

impl GameImageDetails {
    pub fn new(image: GameImage, characters: &[Character]) -> Self {
        Self {
            id: image.id,
            name: image.name,
            image_url: image.image_url,
            width: image.width,
            height: image.height,
            characters: characters.iter().map(CharacterSummary::from).collect(),
        }
    }
}
