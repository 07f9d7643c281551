//! Animal service: typed CRUD against the animal microservice

use super::{ApiClient, ApiError};
use crate::models::{Animal, AnimalCreateRequest, AnimalUpdateRequest, ApiMessage};
use crate::settings::ClientSettings;
use std::sync::Arc;

pub struct AnimalService {
    api: Arc<ApiClient>,
    endpoint: String,
}

impl AnimalService {
    pub fn new(api: Arc<ApiClient>, settings: &ClientSettings) -> Self {
        Self {
            api,
            endpoint: settings.endpoints.animals.clone(),
        }
    }

    /// GET {animals}/getAll
    pub async fn get_all(&self) -> Result<Vec<Animal>, ApiError> {
        self.api.get(&format!("{}/getAll", self.endpoint)).await
    }

    /// GET {animals}/getById/{id}
    pub async fn get_by_id(&self, id: i64) -> Result<Animal, ApiError> {
        self.api
            .get(&format!("{}/getById/{}", self.endpoint, id))
            .await
    }

    /// POST {animals}
    pub async fn create(&self, animal: &AnimalCreateRequest) -> Result<Animal, ApiError> {
        self.api.post(&self.endpoint, animal).await
    }

    /// PUT {animals}
    pub async fn update(&self, animal: &AnimalUpdateRequest) -> Result<Animal, ApiError> {
        self.api.put(&self.endpoint, animal).await
    }

    /// DELETE {animals}/{id}
    pub async fn delete(&self, id: i64) -> Result<ApiMessage, ApiError> {
        self.api.delete(&format!("{}/{}", self.endpoint, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{build_http_client, AuthManager, CredentialStore};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn make_service(server: &MockServer, dir: &tempfile::TempDir) -> AnimalService {
        let settings = ClientSettings {
            api_base_url: server.uri(),
            ..ClientSettings::default()
        };
        let http = build_http_client();
        let storage = CredentialStore::with_data_dir(dir.path().to_path_buf()).unwrap();
        let auth = Arc::new(AuthManager::with_store(http.clone(), &settings, storage));
        AnimalService::new(Arc::new(ApiClient::new(http, &settings, auth)), &settings)
    }

    #[tokio::test]
    async fn test_get_all_hits_canonical_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/animal-microservice/animals/getAll"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Rex", "breed": "Labrador", "species": "Dog",
                 "photo": "rex.jpg", "environment": "house"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let service = make_service(&server, &dir).await;
        let animals = service.get_all().await.unwrap();
        assert_eq!(animals.len(), 1);
        assert_eq!(animals[0].name, "Rex");
    }

    #[tokio::test]
    async fn test_create_posts_body_without_id() {
        let server = MockServer::start().await;
        let request = AnimalCreateRequest {
            name: "Mitzi".to_string(),
            breed: "Siamese".to_string(),
            species: "Cat".to_string(),
            photo: "mitzi.jpg".to_string(),
            environment: "apartment".to_string(),
        };
        Mock::given(method("POST"))
            .and(path("/animal-microservice/animals"))
            .and(body_json(json!({
                "name": "Mitzi", "breed": "Siamese", "species": "Cat",
                "photo": "mitzi.jpg", "environment": "apartment"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5, "name": "Mitzi", "breed": "Siamese", "species": "Cat",
                "photo": "mitzi.jpg", "environment": "apartment"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let service = make_service(&server, &dir).await;
        let created = service.create(&request).await.unwrap();
        assert_eq!(created.id, Some(5));
    }

    #[tokio::test]
    async fn test_update_puts_to_base_and_delete_uses_id_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/animal-microservice/animals"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5, "name": "Mitzi", "breed": "Siamese", "species": "Cat",
                "photo": "mitzi.jpg", "environment": "house"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/animal-microservice/animals/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "httpStatusCode": 200, "httpStatus": "OK", "reason": "",
                "message": "Animal deleted successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let service = make_service(&server, &dir).await;

        let update = AnimalUpdateRequest {
            id: 5,
            name: "Mitzi".to_string(),
            breed: "Siamese".to_string(),
            species: "Cat".to_string(),
            photo: "mitzi.jpg".to_string(),
            environment: "house".to_string(),
        };
        let updated = service.update(&update).await.unwrap();
        assert_eq!(updated.environment, "house");

        let message = service.delete(5).await.unwrap();
        assert_eq!(message.http_status_code, 200);
    }
}
