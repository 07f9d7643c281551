//! Resource data model for the gateway services
//!
//! Shapes match the gateway's JSON (camelCase on the wire). Create requests
//! carry no id; update requests require one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: Option<i64>,
    pub name: String,
    pub breed: String,
    pub species: String,
    pub photo: String,
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnimalCreateRequest {
    pub name: String,
    pub breed: String,
    pub species: String,
    pub photo: String,
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnimalUpdateRequest {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub species: String,
    pub photo: String,
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Shelter {
    pub id: Option<i64>,
    pub name: String,
    pub city: String,
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShelterCreateRequest {
    pub name: String,
    pub city: String,
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShelterUpdateRequest {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub environment: String,
}

/// Platform user account as managed from the admin screens. Distinct from
/// [`UserIdentity`](crate::auth::UserIdentity), which is the minimal identity
/// carried in the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<i64>,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub last_login_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login_date_display: Option<DateTime<Utc>>,
    #[serde(default)]
    pub join_date: Option<DateTime<Utc>>,
    pub role: String,
    #[serde(default)]
    pub authorities: Vec<String>,
    pub is_active: bool,
    pub is_not_locked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub is_active: bool,
    pub is_not_locked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub is_active: bool,
    pub is_not_locked: bool,
}

/// Generic operation-result body the gateway returns for deletes and other
/// non-entity operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiMessage {
    pub http_status_code: u16,
    #[serde(default)]
    pub http_status: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animal_deserialize_camel_case() {
        let json = r#"{
            "id": 7,
            "name": "Rex",
            "breed": "Labrador",
            "species": "Dog",
            "photo": "rex.jpg",
            "environment": "house"
        }"#;
        let animal: Animal = serde_json::from_str(json).unwrap();
        assert_eq!(animal.id, Some(7));
        assert_eq!(animal.name, "Rex");
        assert_eq!(animal.species, "Dog");
    }

    #[test]
    fn test_animal_null_id() {
        let json = r#"{
            "id": null,
            "name": "Rex",
            "breed": "Labrador",
            "species": "Dog",
            "photo": "",
            "environment": "house"
        }"#;
        let animal: Animal = serde_json::from_str(json).unwrap();
        assert!(animal.id.is_none());
    }

    #[test]
    fn test_user_deserialize_with_missing_optionals() {
        let json = r#"{
            "id": 3,
            "userId": "u3",
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@example.com",
            "role": "ADMIN",
            "isActive": true,
            "isNotLocked": true
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_id, "u3");
        assert!(user.phone.is_empty());
        assert!(user.password.is_none());
        assert!(user.last_login_date.is_none());
        assert!(user.authorities.is_empty());
        assert!(user.is_active);
    }

    #[test]
    fn test_user_serializes_without_password_field_when_none() {
        let user = User {
            id: Some(1),
            user_id: "u1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
            password: None,
            last_login_date: None,
            last_login_date_display: None,
            join_date: None,
            role: "USER".to_string(),
            authorities: vec![],
            is_active: true,
            is_not_locked: true,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("\"firstName\":\"Ada\""));
    }

    #[test]
    fn test_api_message_deserialize() {
        let json = r#"{
            "httpStatusCode": 200,
            "httpStatus": "OK",
            "reason": "",
            "message": "User deleted successfully"
        }"#;
        let msg: ApiMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.http_status_code, 200);
        assert_eq!(msg.message, "User deleted successfully");
    }

    #[test]
    fn test_update_request_serializes_id() {
        let req = ShelterUpdateRequest {
            id: 12,
            name: "Happy Paws".to_string(),
            city: "Cluj".to_string(),
            environment: "urban".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["id"], 12);
        assert_eq!(json["city"], "Cluj");
    }
}
