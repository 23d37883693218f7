//! Client for the two remote endpoints: `/categories` and `/images/search`.

use reqwest::{Client, Response};
use url::Url;

use crate::{
    data::{Category, ImageRecord},
    error::{AppError, AppResult},
};

#[derive(Debug, Clone)]
pub struct CatApi {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    limit: u32,
}

impl CatApi {
    pub fn new(client: Client, base_url: &str, api_key: Option<String>, limit: u32) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            limit,
        }
    }

    pub fn categories_url(&self) -> AppResult<Url> {
        self.endpoint("categories")
    }

    /// `category_ids`, `limit` and (when configured) `api_key` query parameters.
    pub fn search_url(&self, category_id: &str) -> AppResult<Url> {
        let mut url = self.endpoint("images/search")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("category_ids", category_id);
            query.append_pair("limit", &self.limit.to_string());
            if let Some(key) = &self.api_key {
                query.append_pair("api_key", key);
            }
        }
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| AppError::Unexpected(format!("bad endpoint url {}: {e}", self.base_url)))
    }

    /// The parsed categories together with the body exactly as received.
    pub async fn fetch_categories(&self) -> AppResult<(Vec<Category>, String)> {
        let url = self.categories_url()?;
        log::info!("fetching categories from {}", url);
        let response = self.get_ok(url).await?;
        let text = response.text().await?;
        let categories = serde_json::from_str(&text)?;
        Ok((categories, text))
    }

    /// Issues the search and checks the status. The body is left unread so the
    /// caller decides when to parse it.
    pub async fn search_images(&self, category_id: &str) -> AppResult<Response> {
        let url = self.search_url(category_id)?;
        log::info!("searching images for category {category_id}");
        self.get_ok(url).await
    }

    async fn get_ok(&self, url: Url) -> AppResult<Response> {
        let req = self.client.get(url).build()?;
        let response = self.client.execute(req).await?;
        let status = response.status();
        log::debug!("{} -> {}", response.url(), status);
        if !status.is_success() {
            return Err(AppError::from_status(status));
        }
        Ok(response)
    }
}

/// `null` parses to `None`; any other non-array body is an error.
pub async fn parse_images(response: Response) -> AppResult<Option<Vec<ImageRecord>>> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api(base: &str, key: Option<&str>) -> CatApi {
        CatApi::new(Client::new(), base, key.map(str::to_string), 30)
    }

    #[test]
    fn test_search_url_has_fixed_parameters() {
        let api = api("https://api.thecatapi.com/v1/", Some("secret"));
        let url = api.search_url("5").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.thecatapi.com/v1/images/search?category_ids=5&limit=30&api_key=secret"
        );
    }

    #[test]
    fn test_search_url_without_key() {
        let api = api("https://api.thecatapi.com/v1", None);
        let url = api.search_url("1").unwrap();
        assert_eq!(url.query(), Some("category_ids=1&limit=30"));
    }

    #[test]
    fn test_bad_base_url_is_unexpected() {
        let api = api("not a url", None);
        assert!(matches!(api.categories_url(), Err(AppError::Unexpected(_))));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_fetch_categories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 5, "name": "boxes"},
                {"id": 1, "name": "hats"}
            ])))
            .mount(&server)
            .await;

        let (categories, raw) = api(&server.uri(), None).fetch_categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert!(raw.contains("boxes"));
        assert_eq!(categories[0].name, "boxes");
        assert_eq!(categories[1].id, "1");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_fetch_categories_non_2xx_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        match api(&server.uri(), None).fetch_categories().await {
            Err(AppError::Network { status, .. }) => assert_eq!(status, Some(503)),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_search_and_parse() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images/search"))
            .and(query_param("category_ids", "2"))
            .and(query_param("limit", "30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "a", "url": "https://cdn/a.jpg", "width": 10},
                {"id": "b", "url": "https://cdn/b.jpg"}
            ])))
            .mount(&server)
            .await;

        let response = api(&server.uri(), None).search_images("2").await.unwrap();
        let records = parse_images(response).await.unwrap().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].url, "https://cdn/b.jpg");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_parse_null_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let response = api(&server.uri(), None).search_images("2").await.unwrap();
        assert!(parse_images(response).await.unwrap().is_none());
    }
}
