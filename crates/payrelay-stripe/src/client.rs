//! Thin wrapper over Stripe's REST API.
//!
//! Requests are `application/x-www-form-urlencoded` (Stripe's wire format),
//! responses are JSON. Non-2xx responses are mapped through
//! [`Error::from_response`](crate::error::Error) into the error taxonomy.

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::types::{Account, BankAccount, Deleted, List, Payout, Token};

/// Production Stripe endpoint. Overridable per client for tests.
pub const DEFAULT_BASE_URL: &str = "https://api.stripe.com";

/// Bank-account tokens are scoped to US/usd. Other countries and currencies
/// are rejected upstream rather than validated here.
const TOKEN_COUNTRY: &str = "US";
const TOKEN_CURRENCY: &str = "usd";

/// A Stripe client scoped to a single caller credential.
///
/// Holds the caller's secret key for the lifetime of one gateway request.
/// The pooled `reqwest::Client` is shared; the key is not. Deliberately no
/// `Debug` impl: the secret key must never reach a log record.
#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    base_url: String,
}

/// Partial business-profile update. Only set fields are sent upstream; an
/// all-`None` value still issues the (no-op) update call.
#[derive(Debug, Clone, Default)]
pub struct BusinessProfileParams {
    pub name: Option<String>,
    pub url: Option<String>,
    pub support_phone: Option<String>,
    pub support_email: Option<String>,
}

/// Raw bank details exchanged for a single-use token.
///
/// No `Debug` impl: the account and routing numbers exist only in the
/// outbound token-creation body and must never appear in logs.
#[derive(Clone)]
pub struct BankAccountParams {
    pub account_number: String,
    pub routing_number: String,
    pub account_holder_name: String,
    pub account_holder_type: String,
}

impl StripeClient {
    /// Build a client around a pooled HTTP client and one caller's secret key.
    pub fn new(http: reqwest::Client, secret_key: impl Into<String>) -> Self {
        Self {
            http,
            secret_key: secret_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (mock server in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// `GET /v1/account`: the account bound to the secret key.
    pub async fn retrieve_account(&self) -> Result<Account> {
        self.get("/v1/account", &[]).await
    }

    /// `POST /v1/account`: merge the given business-profile fields.
    pub async fn update_account(&self, profile: &BusinessProfileParams) -> Result<Account> {
        let mut form: Vec<(&str, String)> = Vec::new();
        if let Some(name) = &profile.name {
            form.push(("business_profile[name]", name.clone()));
        }
        if let Some(url) = &profile.url {
            form.push(("business_profile[url]", url.clone()));
        }
        if let Some(phone) = &profile.support_phone {
            form.push(("business_profile[support_phone]", phone.clone()));
        }
        if let Some(email) = &profile.support_email {
            form.push(("business_profile[support_email]", email.clone()));
        }
        self.post("/v1/account", &form).await
    }

    /// `GET /v1/payouts?limit=N`: most recent payouts, newest first.
    pub async fn list_payouts(&self, limit: u32) -> Result<List<Payout>> {
        self.get("/v1/payouts", &[("limit", limit.to_string())]).await
    }

    /// `POST /v1/payouts`: create a payout of `amount` minor units.
    pub async fn create_payout(
        &self,
        amount: i64,
        currency: &str,
        description: Option<&str>,
    ) -> Result<Payout> {
        let mut form = vec![
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
        ];
        if let Some(desc) = description {
            form.push(("description", desc.to_string()));
        }
        self.post("/v1/payouts", &form).await
    }

    /// `GET /v1/payouts/{id}`.
    pub async fn retrieve_payout(&self, payout_id: &str) -> Result<Payout> {
        self.get(&format!("/v1/payouts/{}", payout_id), &[]).await
    }

    /// `POST /v1/payouts/{id}/cancel`: only valid while the payout is
    /// pending; Stripe rejects anything already in transit or settled.
    pub async fn cancel_payout(&self, payout_id: &str) -> Result<Payout> {
        self.post(&format!("/v1/payouts/{}/cancel", payout_id), &[])
            .await
    }

    /// `GET /v1/accounts/{id}/external_accounts?object=bank_account&limit=N`.
    pub async fn list_bank_accounts(
        &self,
        account_id: &str,
        limit: u32,
    ) -> Result<List<BankAccount>> {
        self.get(
            &format!("/v1/accounts/{}/external_accounts", account_id),
            &[
                ("object", "bank_account".to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// `POST /v1/tokens`: exchange raw bank details for a single-use token.
    pub async fn create_bank_account_token(&self, params: &BankAccountParams) -> Result<Token> {
        let form = vec![
            ("bank_account[country]", TOKEN_COUNTRY.to_string()),
            ("bank_account[currency]", TOKEN_CURRENCY.to_string()),
            (
                "bank_account[account_holder_name]",
                params.account_holder_name.clone(),
            ),
            (
                "bank_account[account_holder_type]",
                params.account_holder_type.clone(),
            ),
            ("bank_account[routing_number]", params.routing_number.clone()),
            ("bank_account[account_number]", params.account_number.clone()),
        ];
        self.post("/v1/tokens", &form).await
    }

    /// `POST /v1/accounts/{id}/external_accounts`: attach a tokenized bank
    /// account.
    pub async fn create_external_account(
        &self,
        account_id: &str,
        token_id: &str,
    ) -> Result<BankAccount> {
        self.post(
            &format!("/v1/accounts/{}/external_accounts", account_id),
            &[("external_account", token_id.to_string())],
        )
        .await
    }

    /// `DELETE /v1/accounts/{id}/external_accounts/{ba_id}`.
    pub async fn delete_external_account(
        &self,
        account_id: &str,
        bank_account_id: &str,
    ) -> Result<Deleted> {
        self.delete(&format!(
            "/v1/accounts/{}/external_accounts/{}",
            account_id, bank_account_id
        ))
        .await
    }

    /// `POST /v1/accounts/{id}/external_accounts/{ba_id}` with
    /// `default_for_currency=true`.
    pub async fn set_default_external_account(
        &self,
        account_id: &str,
        bank_account_id: &str,
    ) -> Result<BankAccount> {
        self.post(
            &format!(
                "/v1/accounts/{}/external_accounts/{}",
                account_id, bank_account_id
            ),
            &[("default_for_currency", "true".to_string())],
        )
        .await
    }

    // ── Request plumbing ─────────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.secret_key)
            .query(query)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, form: &[(&str, String)]) -> Result<T> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.secret_key)
            .form(form)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self
            .http
            .delete(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "Stripe returned an error");
        Err(Error::from_response(status.as_u16(), &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(mock: &httpmock::MockServer, key: &str) -> StripeClient {
        StripeClient::new(reqwest::Client::new(), key).with_base_url(mock.base_url())
    }

    const ACCOUNT_JSON: &str = r#"{
        "id": "acct_1ABC",
        "type": "express",
        "email": "owner@example.com",
        "charges_enabled": true,
        "payouts_enabled": true,
        "country": "US",
        "default_currency": "usd"
    }"#;

    const PAYOUT_JSON: &str = r#"{
        "id": "po_1",
        "amount": 1234,
        "currency": "usd",
        "arrival_date": 1700000000,
        "created": 1699900000,
        "status": "pending",
        "description": null,
        "method": "standard",
        "type": "bank_account"
    }"#;

    #[tokio::test]
    async fn retrieve_account_sends_bearer_credential() {
        let server = httpmock::MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::GET)
                    .path("/v1/account")
                    .header("authorization", "Bearer sk_test_abc");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(ACCOUNT_JSON);
            })
            .await;

        let account = client(&server, "sk_test_abc")
            .retrieve_account()
            .await
            .unwrap();

        assert_eq!(account.id, "acct_1ABC");
        assert_eq!(account.email.as_deref(), Some("owner@example.com"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_payout_sends_minor_units_form_encoded() {
        let server = httpmock::MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/v1/payouts")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body("amount=1234&currency=usd&description=weekly+payout");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(PAYOUT_JSON);
            })
            .await;

        let payout = client(&server, "sk_test_abc")
            .create_payout(1234, "usd", Some("weekly payout"))
            .await
            .unwrap();

        assert_eq!(payout.amount, 1234);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_payout_omits_absent_description() {
        let server = httpmock::MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/v1/payouts")
                    .body("amount=500&currency=usd");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(PAYOUT_JSON);
            })
            .await;

        client(&server, "sk_test_abc")
            .create_payout(500, "usd", None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn cancel_payout_posts_to_cancel_path() {
        let server = httpmock::MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/v1/payouts/po_1/cancel");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(PAYOUT_JSON.replace("pending", "canceled"));
            })
            .await;

        let payout = client(&server, "sk_test_abc")
            .cancel_payout("po_1")
            .await
            .unwrap();

        assert_eq!(payout.status, "canceled");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn token_creation_carries_bracketed_bank_fields() {
        let server = httpmock::MockServer::start_async().await;
        // serde_urlencoded percent-encodes the brackets in form keys.
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/v1/tokens")
                    .body_contains("bank_account%5Bcountry%5D=US")
                    .body_contains("bank_account%5Bcurrency%5D=usd")
                    .body_contains("bank_account%5Brouting_number%5D=110000000")
                    .body_contains("bank_account%5Baccount_number%5D=000123456789");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"id": "btok_1", "object": "token"}"#);
            })
            .await;

        let token = client(&server, "sk_test_abc")
            .create_bank_account_token(&BankAccountParams {
                account_number: "000123456789".to_string(),
                routing_number: "110000000".to_string(),
                account_holder_name: "Jane Doe".to_string(),
                account_holder_type: "individual".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(token.id, "btok_1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn set_default_sends_default_for_currency_flag() {
        let server = httpmock::MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/v1/accounts/acct_1/external_accounts/ba_1")
                    .body("default_for_currency=true");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(
                        r#"{
                            "id": "ba_1", "object": "bank_account", "country": "US",
                            "currency": "usd", "last4": "6789", "status": "new",
                            "default_for_currency": true
                        }"#,
                    );
            })
            .await;

        let ba = client(&server, "sk_test_abc")
            .set_default_external_account("acct_1", "ba_1")
            .await
            .unwrap();

        assert!(ba.default_for_currency);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_external_account_issues_delete() {
        let server = httpmock::MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::DELETE)
                    .path("/v1/accounts/acct_1/external_accounts/ba_1");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"id": "ba_1", "deleted": true}"#);
            })
            .await;

        let deleted = client(&server, "sk_test_abc")
            .delete_external_account("acct_1", "ba_1")
            .await
            .unwrap();

        assert!(deleted.deleted);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_credential_maps_to_authentication_error() {
        let server = httpmock::MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::GET).path("/v1/account");
                then.status(401)
                    .header("content-type", "application/json")
                    .body(r#"{"error":{"type":"authentication_error","message":"Invalid API Key provided: sk_bad"}}"#);
            })
            .await;

        let err = client(&server, "sk_bad")
            .retrieve_account()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Authentication { .. }));
    }

    #[tokio::test]
    async fn cancel_of_settled_payout_maps_to_invalid_request() {
        let server = httpmock::MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/v1/payouts/po_paid/cancel");
                then.status(400)
                    .header("content-type", "application/json")
                    .body(r#"{"error":{"type":"invalid_request_error","message":"Payouts can only be canceled while they are pending."}}"#);
            })
            .await;

        let err = client(&server, "sk_test_abc")
            .cancel_payout("po_paid")
            .await
            .unwrap_err();

        match err {
            Error::InvalidRequest { message } => {
                assert!(message.contains("pending"));
            }
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_profile_update_still_posts() {
        let server = httpmock::MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST).path("/v1/account");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(ACCOUNT_JSON);
            })
            .await;

        client(&server, "sk_test_abc")
            .update_account(&BusinessProfileParams::default())
            .await
            .unwrap();

        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn profile_update_sends_only_set_fields() {
        let server = httpmock::MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/v1/account")
                    .body("business_profile%5Bname%5D=Acme+Co");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(ACCOUNT_JSON);
            })
            .await;

        client(&server, "sk_test_abc")
            .update_account(&BusinessProfileParams {
                name: Some("Acme Co".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn transport_failure_maps_to_transport_error() {
        // Bind a listener, capture its port, then drop it so connections are refused.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = StripeClient::new(reqwest::Client::new(), "sk_test_abc")
            .with_base_url(format!("http://127.0.0.1:{}", port));

        let err = client.retrieve_account().await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
