use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::thunk::run_thunk;
use super::{ClientAction, ClientError, Dispatch};
use crate::models::Suggestion;

/// How many suggestions a fetch asks for.
pub const FETCH_LIMIT: u32 = 20;

#[async_trait]
pub trait SuggestionsApi: Send + Sync {
    async fn get_suggestions(&self, limit: u32) -> Result<Vec<Suggestion>, ClientError>;
    async fn delete_suggestion(&self, account_id: Uuid) -> Result<(), ClientError>;
}

pub struct HttpSuggestionsApi {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl HttpSuggestionsApi {
    pub fn new(base_url: &str, access_token: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body: serde_json::Value = resp.json().await.unwrap_or_default();
        let message = body["error"]
            .as_str()
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("error"))
            .to_string();

        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl SuggestionsApi for HttpSuggestionsApi {
    async fn get_suggestions(&self, limit: u32) -> Result<Vec<Suggestion>, ClientError> {
        let resp = self
            .client
            .get(format!("{}/api/v2/suggestions?limit={limit}", self.base_url))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        Ok(Self::check(resp).await?.json().await?)
    }

    async fn delete_suggestion(&self, account_id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .client
            .delete(format!("{}/api/v1/suggestions/{account_id}", self.base_url))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        Self::check(resp).await?;
        Ok(())
    }
}

/// Fetch suggestions, then import their accounts and request relationships,
/// in that order.
pub async fn fetch_suggestions<A, D>(api: &A, dispatcher: &D) -> Result<Vec<Suggestion>, ClientError>
where
    A: SuggestionsApi + ?Sized,
    D: Dispatch + ?Sized,
{
    run_thunk(
        dispatcher,
        ClientAction::SuggestionsFetch,
        || api.get_suggestions(FETCH_LIMIT),
        |data: &Vec<Suggestion>, dispatcher: &D| {
            let accounts: Vec<_> = data.iter().map(|s| s.account.clone()).collect();
            let ids = accounts.iter().map(|a| a.id).collect();
            dispatcher.dispatch(ClientAction::ImportAccounts(accounts));
            dispatcher.dispatch(ClientAction::FetchRelationships(ids));
        },
    )
    .await
}

pub async fn dismiss_suggestion<A, D>(
    api: &A,
    dispatcher: &D,
    account_id: Uuid,
) -> Result<(), ClientError>
where
    A: SuggestionsApi + ?Sized,
    D: Dispatch + ?Sized,
{
    run_thunk(
        dispatcher,
        |state| ClientAction::SuggestionsDismiss { account_id, state },
        || api.delete_suggestion(account_id),
        |_: &(), _: &D| {},
    )
    .await
}
