//! Request builder, response parser and paginator for Pipedrive list
//! endpoints.
//!
//! # Design
//! `PipedriveClient` holds an immutable `ClientConfig` and a `Transport`.
//! Every operation is split the same way: `build_fetch_page` produces an
//! `HttpRequest`, the transport executes it, `parse_page` consumes the
//! `HttpResponse`. The build and parse halves are public and free of I/O, so
//! they can be driven by any HTTP stack.
//!
//! `fetch_all` walks `start = 0, n, 2n, ...` with a fixed `limit = n` and
//! stops on the first page shorter than `n`. When the last page holds
//! exactly `n` records this costs one extra request that comes back empty.
//! Any page error aborts the walk; no partial result is returned.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Output, OutputShape, Page, PageWindow, Record, RecordSet};

/// Page size used by [`PipedriveClient::fetch_all`]. Also the largest
/// `limit` Pipedrive honours.
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Read-only client for one Pipedrive tenant.
#[derive(Debug, Clone)]
pub struct PipedriveClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl PipedriveClient<UreqTransport> {
    /// Client for `https://{company_domain}.pipedrive.com/api/v1/` using a
    /// default ureq agent.
    pub fn new(company_domain: &str, api_token: &str) -> Result<Self, ApiError> {
        let config = ClientConfig::new(company_domain, api_token)?;
        Ok(Self::with_transport(config, UreqTransport::new()))
    }
}

impl<T: Transport> PipedriveClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `{base}{resource}?[start={s}&limit={l}&]api_token={token}`
    pub fn build_fetch_page(&self, resource: impl AsRef<str>, window: Option<PageWindow>) -> HttpRequest {
        let resource = resource.as_ref();
        let base = self.config.base_url();
        let token = self.config.token_query();
        let url = match window {
            Some(PageWindow { start, limit }) => {
                format!("{base}{resource}?start={start}&limit={limit}&{token}")
            }
            None => format!("{base}{resource}?{token}"),
        };
        HttpRequest {
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Interpret one list-endpoint response.
    ///
    /// 200 with `data: null` (or no `data`) is an empty page. 401 is
    /// `Authentication`, any other non-200 is `Request`.
    pub fn parse_page(&self, response: HttpResponse) -> Result<Page, ApiError> {
        check_status(&response)?;
        let envelope: Envelope = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        let records = match envelope.data {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Object(record) => Ok(record),
                    other => Err(ApiError::Parse(format!(
                        "data[{i}] is not an object: {other}"
                    ))),
                })
                .collect::<Result<Vec<Record>, _>>()?,
            Some(other) => {
                return Err(ApiError::Parse(format!(
                    "`data` is neither an array nor null: {}",
                    json_kind(&other)
                )))
            }
        };

        let more_items_in_collection = envelope
            .additional_data
            .and_then(|a| a.pagination)
            .and_then(|p| p.more_items_in_collection);

        Ok(Page {
            records,
            more_items_in_collection,
        })
    }

    /// One GET against `resource`. Without a window the server's default
    /// page size applies.
    pub fn fetch_page(&self, resource: impl AsRef<str>, window: Option<PageWindow>) -> Result<Page, ApiError> {
        let request = self.build_fetch_page(resource, window);
        debug!(url = %request.redacted_url(), "GET");
        let response = self.transport.execute(&request)?;
        debug!(status = response.status, bytes = response.body.len(), "response");
        self.parse_page(response)
    }

    /// Every record of `resource`, fetched in windows of [`DEFAULT_PAGE_SIZE`].
    pub fn fetch_all(&self, resource: impl AsRef<str>) -> Result<RecordSet, ApiError> {
        self.fetch_all_with_page_size(resource, DEFAULT_PAGE_SIZE)
    }

    pub fn fetch_all_with_page_size(
        &self,
        resource: impl AsRef<str>,
        page_size: u32,
    ) -> Result<RecordSet, ApiError> {
        if page_size == 0 {
            return Err(ApiError::InvalidPageSize);
        }
        let resource = resource.as_ref();

        let mut records = RecordSet::new();
        let mut start: u32 = 0;
        let mut pages = 0usize;
        loop {
            let page = self.fetch_page(resource, Some(PageWindow::new(start, page_size)))?;
            pages += 1;
            let received = page.len();
            debug!(resource, start, received, "page received");
            records.extend(page.records);

            if received < page_size as usize {
                if page.more_items_in_collection == Some(true) {
                    warn!(
                        resource,
                        start,
                        received,
                        page_size,
                        "short page but server reports more items; the server may cap limit below the page size"
                    );
                }
                break;
            }
            start = next_start(start, page_size)?;
        }

        info!(resource, pages, records = records.len(), "fetched all records");
        Ok(records)
    }

    /// A single page, shaped as records or a table.
    pub fn get_object(
        &self,
        resource: impl AsRef<str>,
        window: Option<PageWindow>,
        shape: OutputShape,
    ) -> Result<Output, ApiError> {
        let page = self.fetch_page(resource, window)?;
        Ok(Output::shape(page.records, shape))
    }

    /// Every record of `resource`, shaped as records or a table.
    pub fn get_all(&self, resource: impl AsRef<str>, shape: OutputShape) -> Result<Output, ApiError> {
        let records = self.fetch_all(resource)?;
        Ok(Output::shape(records, shape))
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    additional_data: Option<AdditionalData>,
}

#[derive(Deserialize)]
struct AdditionalData {
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Deserialize)]
struct Pagination {
    #[serde(default)]
    more_items_in_collection: Option<bool>,
}

fn next_start(start: u32, page_size: u32) -> Result<u32, ApiError> {
    start
        .checked_add(page_size)
        .ok_or(ApiError::OffsetOverflow { start, page_size })
}

/// Map non-200 status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        401 => Err(ApiError::Authentication {
            body: response.body.clone(),
        }),
        status => Err(ApiError::Request {
            status,
            body: response.body.clone(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
