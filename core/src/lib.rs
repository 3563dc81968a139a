//! Read-only client for the Pipedrive CRM v1 REST API.
//!
//! # Overview
//! Authenticates with a static API token, builds list-endpoint URLs for named
//! resource collections, walks them in fixed-size windows and returns the
//! result as raw records or as a [`Table`].
//!
//! # Design
//! - `ClientConfig` is built once; the base URL and token fragment never
//!   change for the life of a client.
//! - Request building and response parsing are pure (`build_fetch_page`,
//!   `parse_page`). The network round trip sits behind the [`Transport`]
//!   trait, with [`UreqTransport`] as the blocking default.
//! - Everything is synchronous and sequential. No retries, no caching.
//! - The API token never reaches logs or `Debug` output.
//!
//! ```no_run
//! use pipedrive_core::{OutputShape, PipedriveClient, Resource};
//!
//! let client = PipedriveClient::new("acme", "0123456789abcdef")?;
//! let deals = client.fetch_all(Resource::Deals)?;
//! let persons = client.get_all(Resource::Persons, OutputShape::Table)?.into_table();
//! println!("{} deals, {} persons", deals.len(), persons.len());
//! # Ok::<(), pipedrive_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resource;
pub mod table;
pub mod transport;
pub mod types;

pub use client::{PipedriveClient, DEFAULT_PAGE_SIZE};
pub use config::{ApiToken, ClientConfig};
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse};
pub use resource::{Resource, UnknownResource};
pub use table::Table;
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{Output, OutputShape, Page, PageWindow, Record, RecordSet};
