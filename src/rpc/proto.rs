//! Wire messages and generated stubs for the `user.UserService` RPC service.
//!
//! The messages double as the gateway's JSON bodies, so they also derive
//! serde traits.

use serde::{Deserialize, Serialize};

use crate::store::Record;

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub email: String,
    #[prost(uint32, tag = "4")]
    pub age: u32,
    #[prost(string, tag = "5")]
    pub created_at: String,
}

/// Missing JSON fields decode to their zero values and are left to
/// server-side validation.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub email: String,
    #[prost(uint32, tag = "3")]
    pub age: u32,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct CreateUserResponse {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[prost(bool, tag = "2")]
    pub success: bool,
    #[prost(string, tag = "3")]
    pub message: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct GetUserRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct GetUserResponse {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// `limit <= 0` requests every record.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct ListUsersRequest {
    #[prost(int32, tag = "1")]
    pub limit: i32,
}

/// One message of the `ListUsers` stream.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct UserResponse {
    #[prost(message, optional, tag = "1")]
    pub user: Option<User>,
}

impl From<&Record> for User {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            age: record.age,
            created_at: record.created_at.clone(),
        }
    }
}

include!(concat!(env!("OUT_DIR"), "/user.UserService.rs"));

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_user_from_record() {
        let record = Record {
            id: "id-1".into(),
            name: "Ann".into(),
            email: "ann@x.com".into(),
            age: 30,
            created_at: "2026-10-18T09:30:00Z".into(),
        };
        let user = User::from(&record);
        assert_eq!(user.id, "id-1");
        assert_eq!(user.age, 30);
        assert_eq!(user.created_at, "2026-10-18T09:30:00Z");
    }

    #[test]
    fn test_create_response_json_shape() {
        let response = CreateUserResponse {
            user: None,
            success: false,
            message: "Name and email are required".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("user").is_none());
        assert_eq!(json["success"], false);
    }

    #[test]
    fn test_list_request_wire_encoding() {
        let bytes = ListUsersRequest { limit: 10 }.encode_to_vec();
        // field 1, varint
        assert_eq!(bytes, vec![0x08, 10]);
        let decoded = ListUsersRequest::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded.limit, 10);
    }
}
