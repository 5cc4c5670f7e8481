//! Blocking HTTP client for the remote employee/review API.
//!
//! # Responsibility
//! - Mirror local-store operations against `{base_url}/api/...`.
//! - Centralize status checking in `get_json` / `send_json`.
//!
//! # Invariants
//! - Every request is bounded by `RemoteConfig::timeout`.
//! - Any 2xx status counts as success.
//! - `try_*` operations return typed `RemoteError`s; the plain operations
//!   collapse every failure to `None`/`false` after logging it.
//! - Identifier arguments are validated positive before any request.

use crate::config::RemoteConfig;
use crate::model::employee::{Employee, EmployeeId};
use crate::model::review::{PerformanceReview, ReviewId};
use crate::model::validation::ensure_positive_id;
use crate::remote::codec::{
    decode_created_id, decode_employee, decode_employee_list, decode_review_list,
    encode_employee, encode_review,
};
use crate::remote::error::{CodecError, RemoteError, RemoteResult};
use log::{debug, warn};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde_json::Value;
use std::time::Instant;

const PING_PATH: &str = "/api/ping";
const EMPLOYEES_PATH: &str = "/api/employees";

/// Stateless HTTP mirror of the store operations. Cheap to clone and share.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: String,
}

impl RemoteClient {
    /// Builds a client bound to `config.base_url`.
    ///
    /// # Errors
    /// - `RemoteError::Transport` when the HTTP backend cannot be initialized.
    pub fn new(config: &RemoteConfig) -> RemoteResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns whether `GET /api/ping` answers with a 2xx status.
    pub fn is_server_reachable(&self) -> bool {
        match self.client.get(self.url(PING_PATH)).send() {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!("event=remote_ping module=remote status=unreachable error={err}");
                false
            }
        }
    }

    pub fn fetch_all_employees(&self) -> Option<Vec<Employee>> {
        absent_on_error("fetch_all_employees", self.try_fetch_all_employees())
    }

    pub fn fetch_single_employee(&self, employee_id: EmployeeId) -> Option<Employee> {
        absent_on_error(
            "fetch_single_employee",
            self.try_fetch_single_employee(employee_id),
        )
    }

    /// Publishes a new employee and returns the server-assigned id.
    pub fn send_new_employee(&self, employee: &Employee) -> Option<EmployeeId> {
        absent_on_error("send_new_employee", self.try_send_new_employee(employee))
    }

    pub fn send_updated_employee(
        &self,
        server_employee_id: EmployeeId,
        employee: &Employee,
    ) -> bool {
        absent_on_error(
            "send_updated_employee",
            self.try_send_updated_employee(server_employee_id, employee),
        )
        .is_some()
    }

    pub fn fetch_reviews_for_employee(
        &self,
        server_employee_id: EmployeeId,
    ) -> Option<Vec<PerformanceReview>> {
        absent_on_error(
            "fetch_reviews_for_employee",
            self.try_fetch_reviews_for_employee(server_employee_id),
        )
    }

    /// Publishes a new review for `server_employee_id` and returns its
    /// server-assigned id.
    pub fn send_new_review(
        &self,
        server_employee_id: EmployeeId,
        review: &PerformanceReview,
    ) -> Option<ReviewId> {
        absent_on_error(
            "send_new_review",
            self.try_send_new_review(server_employee_id, review),
        )
    }

    pub fn update_review(&self, server_review_id: ReviewId, review: &PerformanceReview) -> bool {
        absent_on_error(
            "update_review",
            self.try_update_review(server_review_id, review),
        )
        .is_some()
    }

    pub fn try_fetch_all_employees(&self) -> RemoteResult<Vec<Employee>> {
        let body = self.get_json(EMPLOYEES_PATH)?;
        Ok(decode_employee_list(&body)?)
    }

    pub fn try_fetch_single_employee(&self, employee_id: EmployeeId) -> RemoteResult<Employee> {
        ensure_positive_id("employee_id", employee_id)?;
        let body = self.get_json(&format!("{EMPLOYEES_PATH}/{employee_id}"))?;
        Ok(decode_employee(&body)?)
    }

    pub fn try_send_new_employee(&self, employee: &Employee) -> RemoteResult<EmployeeId> {
        employee.validate()?;
        let payload = encode_employee(employee)?;
        let body = self.send_json(Method::POST, EMPLOYEES_PATH, &payload)?;
        Ok(decode_created_id(&body, "employeeId")?)
    }

    pub fn try_send_updated_employee(
        &self,
        server_employee_id: EmployeeId,
        employee: &Employee,
    ) -> RemoteResult<()> {
        ensure_positive_id("employee_id", server_employee_id)?;
        employee.validate()?;
        self.send_json(
            Method::PUT,
            &format!("{EMPLOYEES_PATH}/{server_employee_id}"),
            &encode_employee(employee)?,
        )?;
        Ok(())
    }

    pub fn try_fetch_reviews_for_employee(
        &self,
        server_employee_id: EmployeeId,
    ) -> RemoteResult<Vec<PerformanceReview>> {
        ensure_positive_id("employee_id", server_employee_id)?;
        let body = self.get_json(&format!("{EMPLOYEES_PATH}/{server_employee_id}/reviews"))?;
        Ok(decode_review_list(&body)?)
    }

    pub fn try_send_new_review(
        &self,
        server_employee_id: EmployeeId,
        review: &PerformanceReview,
    ) -> RemoteResult<ReviewId> {
        ensure_positive_id("employee_id", server_employee_id)?;
        let mut outgoing = review.clone();
        outgoing.employee_id = server_employee_id;
        outgoing.review_id = 0;
        outgoing.validate()?;

        let body = self.send_json(
            Method::POST,
            &format!("{EMPLOYEES_PATH}/{server_employee_id}/reviews"),
            &encode_review(&outgoing)?,
        )?;
        Ok(decode_created_id(&body, "reviewId")?)
    }

    pub fn try_update_review(
        &self,
        server_review_id: ReviewId,
        review: &PerformanceReview,
    ) -> RemoteResult<()> {
        ensure_positive_id("review_id", server_review_id)?;
        let mut outgoing = review.clone();
        outgoing.review_id = server_review_id;
        outgoing.validate()?;

        self.send_json(
            Method::PUT,
            &format!("/api/reviews/{server_review_id}"),
            &encode_review(&outgoing)?,
        )?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issues a GET and parses the 2xx body as JSON.
    fn get_json(&self, path: &str) -> RemoteResult<Value> {
        let body = self.execute("GET", path, self.client.get(self.url(path)))?;
        parse_body(&body)
    }

    /// Issues a request with a JSON body. An empty 2xx body yields `Value::Null`.
    fn send_json(&self, method: Method, path: &str, payload: &Value) -> RemoteResult<Value> {
        let method_name = if method == Method::POST { "POST" } else { "PUT" };
        let request = self.client.request(method, self.url(path)).json(payload);
        let body = self.execute(method_name, path, request)?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        parse_body(&body)
    }

    fn execute(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> RemoteResult<Vec<u8>> {
        let started_at = Instant::now();
        let response = request.send()?;
        let status = response.status();
        debug!(
            "event=remote_request module=remote method={} path={} http_status={} duration_ms={}",
            method,
            path,
            status.as_u16(),
            started_at.elapsed().as_millis()
        );
        if !status.is_success() {
            return Err(RemoteError::Status {
                method,
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

fn parse_body(body: &[u8]) -> RemoteResult<Value> {
    serde_json::from_slice(body).map_err(|err| RemoteError::Decode(CodecError::Json(err)))
}

fn absent_on_error<T>(operation: &'static str, result: RemoteResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                "event=remote_call module=remote status=error operation={} http_status={} error={}",
                operation,
                err.status().map_or_else(|| "none".to_string(), |s| s.to_string()),
                err
            );
            None
        }
    }
}
