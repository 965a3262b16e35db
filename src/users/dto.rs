use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignRoomRequest {
    #[serde(rename = "roomId")]
    pub room_id: Option<i64>,
}
