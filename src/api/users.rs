//! User service: account administration against the user microservice
//!
//! Alongside the CRUD grid the service keeps the original named operations:
//! lookup by email and an admin-triggered password reset.

use super::{ApiClient, ApiError};
use crate::models::{ApiMessage, User, UserCreateRequest, UserUpdateRequest};
use crate::settings::ClientSettings;
use std::sync::Arc;

pub struct UserService {
    api: Arc<ApiClient>,
    endpoint: String,
}

impl UserService {
    pub fn new(api: Arc<ApiClient>, settings: &ClientSettings) -> Self {
        Self {
            api,
            endpoint: settings.endpoints.users.clone(),
        }
    }

    /// GET {users}/getAll
    pub async fn get_all(&self) -> Result<Vec<User>, ApiError> {
        self.api.get(&format!("{}/getAll", self.endpoint)).await
    }

    /// GET {users}/find/{email}
    pub async fn find_by_email(&self, email: &str) -> Result<User, ApiError> {
        self.api
            .get(&format!("{}/find/{}", self.endpoint, email))
            .await
    }

    /// POST {users}
    pub async fn create(&self, user: &UserCreateRequest) -> Result<User, ApiError> {
        self.api.post(&self.endpoint, user).await
    }

    /// PUT {users}
    pub async fn update(&self, user: &UserUpdateRequest) -> Result<User, ApiError> {
        self.api.put(&self.endpoint, user).await
    }

    /// DELETE {users}/{id}
    pub async fn delete(&self, id: i64) -> Result<ApiMessage, ApiError> {
        self.api.delete(&format!("{}/{}", self.endpoint, id)).await
    }

    /// GET {users}/resetPassword/{email}
    pub async fn reset_password(&self, email: &str) -> Result<ApiMessage, ApiError> {
        self.api
            .get(&format!("{}/resetPassword/{}", self.endpoint, email))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{build_http_client, AuthManager, CredentialStore};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_body() -> serde_json::Value {
        json!({
            "id": 3,
            "userId": "u3",
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@example.com",
            "phone": "555-0100",
            "role": "ADMIN",
            "authorities": ["user:read", "user:update"],
            "isActive": true,
            "isNotLocked": true
        })
    }

    async fn make_service(server: &MockServer, dir: &tempfile::TempDir) -> UserService {
        let settings = ClientSettings {
            api_base_url: server.uri(),
            ..ClientSettings::default()
        };
        let http = build_http_client();
        let storage = CredentialStore::with_data_dir(dir.path().to_path_buf()).unwrap();
        let auth = Arc::new(AuthManager::with_store(http.clone(), &settings, storage));
        UserService::new(Arc::new(ApiClient::new(http, &settings, auth)), &settings)
    }

    #[tokio::test]
    async fn test_get_all_and_find_by_email() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user-microservice/users/getAll"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_body()])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user-microservice/users/find/grace@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let service = make_service(&server, &dir).await;

        let users = service.get_all().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, "ADMIN");

        let user = service.find_by_email("grace@example.com").await.unwrap();
        assert_eq!(user.first_name, "Grace");
        assert_eq!(user.authorities.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_and_reset_password() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/user-microservice/users/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "httpStatusCode": 200, "httpStatus": "OK", "reason": "",
                "message": "User deleted successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user-microservice/users/resetPassword/grace@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "httpStatusCode": 200, "httpStatus": "OK", "reason": "",
                "message": "An email with a new password was sent"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let service = make_service(&server, &dir).await;

        let deleted = service.delete(3).await.unwrap();
        assert_eq!(deleted.message, "User deleted successfully");

        let reset = service.reset_password("grace@example.com").await.unwrap();
        assert!(reset.message.contains("new password"));
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user-microservice/users/find/nobody@example.com"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let service = make_service(&server, &dir).await;

        let result = service.find_by_email("nobody@example.com").await;
        assert!(matches!(result.unwrap_err(), ApiError::NotFound));
    }
}
