//! HTTP client for the queue backend

use std::time::Duration;

use async_trait::async_trait;
use queue_core::models::employee::ensure_deletable;
use queue_core::{
    AppError, Command, Employee, EmployeeCreate, EmployeeId, ErrorCode, Snapshot, Table, Ticket,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::transport::{CommandDispatcher, SnapshotSource};
use crate::wire::{EmployeeDto, ErrorBody, TableDto, TicketDto};
use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making requests to the queue backend
#[derive(Debug, Clone)]
pub struct QueueHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl QueueHttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request whose response body is ignored
    pub async fn post_empty(&self, path: &str, query: &[(&str, String)]) -> ClientResult<()> {
        let request = self.authorize(self.client.post(self.url(path)).query(query));
        let response = request.send().await?;
        Self::handle_empty(response).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.authorize(self.client.delete(self.url(path)));
        let response = request.send().await?;
        Self::handle_empty(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::error_from(status, &text));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    async fn handle_empty(response: reqwest::Response) -> ClientResult<()> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::error_from(status, &text));
        }
        Ok(())
    }

    /// Map a failed response to a [`ClientError`]
    ///
    /// A body carrying a known numeric code wins over the HTTP status.
    fn error_from(status: StatusCode, text: &str) -> ClientError {
        let body: ErrorBody = serde_json::from_str(text).unwrap_or_default();
        if let Some(code) = body.code.and_then(|c| ErrorCode::try_from(c).ok()) {
            let err = match body.message {
                Some(message) => AppError::with_message(code, message),
                None => AppError::new(code),
            };
            return ClientError::Api(err);
        }

        let message = body.message.unwrap_or_else(|| text.to_string());
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            _ => ClientError::Internal(message),
        }
    }

    // ========== Queue API ==========

    /// All tickets, any status
    pub async fn fetch_tickets(&self) -> ClientResult<Vec<Ticket>> {
        let tickets: Vec<TicketDto> = self.get("api/v1/employee/queue/all").await?;
        Ok(tickets.into_iter().map(Ticket::from).collect())
    }

    pub async fn fetch_tables(&self) -> ClientResult<Vec<Table>> {
        let tables: Vec<TableDto> = self.get("api/v1/employee/table/all").await?;
        Ok(tables.into_iter().map(Table::from).collect())
    }

    /// Tickets and tables, fetched together and validated
    pub async fn fetch_snapshot(&self) -> ClientResult<Snapshot> {
        let (tickets, tables) = tokio::try_join!(self.fetch_tickets(), self.fetch_tables())?;
        let snapshot = Snapshot::ingest(tickets, tables)?;
        Ok(snapshot)
    }

    /// Send an operator command
    pub async fn dispatch(&self, command: &Command) -> ClientResult<()> {
        let path = format!(
            "api/v1/employee/queue/{}/{}",
            command.ticket_id,
            command.action.as_str()
        );
        self.post_empty(&path, &[("tableId", command.table_id.to_string())])
            .await?;
        tracing::info!(
            action = %command.action,
            ticket_id = command.ticket_id,
            table_id = command.table_id,
            "Command dispatched"
        );
        Ok(())
    }

    // ========== Employee API ==========

    pub async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        let employees: Vec<EmployeeDto> = self.get("api/v1/employee/employee/all").await?;
        employees
            .into_iter()
            .map(|dto| Employee::try_from(dto).map_err(ClientError::from))
            .collect()
    }

    /// Register a new employee; the payload is validated before sending
    pub async fn register_employee(&self, payload: &EmployeeCreate) -> ClientResult<Employee> {
        payload.validate()?;
        let created: EmployeeDto = self.post("api/v1/auth/register", payload).await?;
        let employee = Employee::try_from(created)?;
        tracing::info!(employee_id = employee.id, role = %employee.role, "Employee registered");
        Ok(employee)
    }

    /// Delete an employee; the bootstrap administrator is refused locally
    pub async fn delete_employee(&self, employee_id: EmployeeId) -> ClientResult<()> {
        ensure_deletable(employee_id)?;
        self.delete(&format!("api/v1/employee/employee/{}", employee_id))
            .await?;
        tracing::info!(employee_id, "Employee deleted");
        Ok(())
    }
}

#[async_trait]
impl SnapshotSource for QueueHttpClient {
    async fn fetch(&self) -> ClientResult<Snapshot> {
        self.fetch_snapshot().await
    }
}

#[async_trait]
impl CommandDispatcher for QueueHttpClient {
    async fn send(&self, command: &Command) -> ClientResult<()> {
        self.dispatch(command).await
    }
}
