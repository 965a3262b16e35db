use serde::{Deserialize, Serialize};

use super::repo::Occupant;

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RoomWithUsers {
    pub id: i64,
    pub name: String,
    pub users: Vec<Occupant>,
}
