//! WoT Consumer
//!
//! Consume W3C Web of Things (WoT) Thing Descriptions: resolve the
//! affordances of a remote Thing by semantic type, marshal loosely-typed
//! payloads against the declared data schemas, and carry the interaction out
//! over HTTP.
//!
//! The engine covers three operations: reading a property, writing a
//! property, and invoking an action. Payloads are classified once at the
//! call boundary into a primitive, array, or object shape, validated against
//! the affordance's schema, and serialized into the request; read responses
//! are decoded back into nested value trees.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use wot_consumer::{load_description_str, Consumer, ConsumerOptions, Outcome};
//!
//! let td = load_description_str(r#"{
//!     "title": "Lamp",
//!     "base": "http://lamp.local",
//!     "properties": {
//!         "on": {
//!             "@type": ["http://example.org/OnOff"],
//!             "type": "boolean",
//!             "forms": [{ "href": "/on" }]
//!         }
//!     }
//! }"#).unwrap();
//!
//! // Dry-run: requests are composed and rendered, never transmitted.
//! let options = ConsumerOptions::new().dry_run(true);
//! let consumer = Consumer::with_options(td, options).unwrap();
//!
//! let outcome = consumer
//!     .write_property("http://example.org/OnOff", &[json!(true)])
//!     .unwrap();
//! match outcome {
//!     Outcome::NotExecuted(line) => assert!(line.contains("http://lamp.local/on")),
//!     Outcome::Executed => unreachable!(),
//! }
//! ```
//!
//! # Dry-run
//!
//! With [`ConsumerOptions::dry_run`] set, every composed request is rendered
//! as a log line and handed back as "not executed"; the transport is never
//! touched and reads yield no value.

mod consumer;
mod description;
mod error;
mod loader;
mod payload;
mod request;
mod response;
mod schema;
mod transport;

pub use consumer::{Consumer, ConsumerOptions, Outcome, ReadOutcome};
pub use description::{Affordance, AffordanceKind, Form, OperationKind, ThingDescription};
pub use error::{DescriptionError, InteractionError};
pub use loader::{is_url, load_description, load_description_auto, load_description_str};
pub use payload::{classify, PayloadShape};
pub use request::{build_request, ThingRequest};
pub use response::{decode, Decoded, OutputValue};
pub use schema::{json_type_name, DataSchema};
pub use transport::{ThingResponse, Transport};

#[cfg(feature = "remote")]
pub use loader::load_description_url;

#[cfg(feature = "remote")]
pub use transport::HttpTransport;
