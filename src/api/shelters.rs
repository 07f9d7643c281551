//! Shelter service: typed CRUD against the shelter microservice
//!
//! `get_all_animals` is served by the shelter microservice, which proxies the
//! animal list through its own gateway route.

use super::{ApiClient, ApiError};
use crate::models::{Animal, ApiMessage, Shelter, ShelterCreateRequest, ShelterUpdateRequest};
use crate::settings::ClientSettings;
use std::sync::Arc;

pub struct ShelterService {
    api: Arc<ApiClient>,
    endpoint: String,
}

impl ShelterService {
    pub fn new(api: Arc<ApiClient>, settings: &ClientSettings) -> Self {
        Self {
            api,
            endpoint: settings.endpoints.shelters.clone(),
        }
    }

    /// GET {shelters}/getAll
    pub async fn get_all(&self) -> Result<Vec<Shelter>, ApiError> {
        self.api.get(&format!("{}/getAll", self.endpoint)).await
    }

    /// GET {shelters}/getById/{id}
    pub async fn get_by_id(&self, id: i64) -> Result<Shelter, ApiError> {
        self.api
            .get(&format!("{}/getById/{}", self.endpoint, id))
            .await
    }

    /// GET {shelters}/getAllAnimals
    pub async fn get_all_animals(&self) -> Result<Vec<Animal>, ApiError> {
        self.api
            .get(&format!("{}/getAllAnimals", self.endpoint))
            .await
    }

    /// POST {shelters}
    pub async fn create(&self, shelter: &ShelterCreateRequest) -> Result<Shelter, ApiError> {
        self.api.post(&self.endpoint, shelter).await
    }

    /// PUT {shelters}
    pub async fn update(&self, shelter: &ShelterUpdateRequest) -> Result<Shelter, ApiError> {
        self.api.put(&self.endpoint, shelter).await
    }

    /// DELETE {shelters}/{id}
    pub async fn delete(&self, id: i64) -> Result<ApiMessage, ApiError> {
        self.api.delete(&format!("{}/{}", self.endpoint, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{build_http_client, AuthManager, CredentialStore};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn make_service(server: &MockServer, dir: &tempfile::TempDir) -> ShelterService {
        let settings = ClientSettings {
            api_base_url: server.uri(),
            ..ClientSettings::default()
        };
        let http = build_http_client();
        let storage = CredentialStore::with_data_dir(dir.path().to_path_buf()).unwrap();
        let auth = Arc::new(AuthManager::with_store(http.clone(), &settings, storage));
        ShelterService::new(Arc::new(ApiClient::new(http, &settings, auth)), &settings)
    }

    #[tokio::test]
    async fn test_get_all_and_proxied_animals() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shelter-microservice/shelters/getAll"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Happy Paws", "city": "Cluj", "environment": "urban"}
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/shelter-microservice/shelters/getAllAnimals"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 2, "name": "Rex", "breed": "Labrador", "species": "Dog",
                 "photo": "", "environment": "house"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let service = make_service(&server, &dir).await;

        let shelters = service.get_all().await.unwrap();
        assert_eq!(shelters[0].city, "Cluj");

        let animals = service.get_all_animals().await.unwrap();
        assert_eq!(animals[0].name, "Rex");
    }

    #[tokio::test]
    async fn test_create_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/shelter-microservice/shelters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 9, "name": "Safe Haven", "city": "Iasi", "environment": "rural"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/shelter-microservice/shelters/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "httpStatusCode": 200, "httpStatus": "OK", "reason": "",
                "message": "Shelter deleted successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let service = make_service(&server, &dir).await;

        let created = service
            .create(&ShelterCreateRequest {
                name: "Safe Haven".to_string(),
                city: "Iasi".to_string(),
                environment: "rural".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, Some(9));

        let message = service.delete(9).await.unwrap();
        assert_eq!(message.message, "Shelter deleted successfully");
    }
}
