use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// A character hidden in a game image, located by a normalized bounding box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub game_image_id: i64,
    pub bounds: BoundingBox,
}
