//! The invocation façade: read, write, and invoke affordances by semantic
//! type.

use serde_json::Value;

use crate::description::{Affordance, OperationKind, ThingDescription};
use crate::error::InteractionError;
use crate::payload::{classify, PayloadShape};
use crate::request::{build_request, ThingRequest};
use crate::response::{decode, Decoded, OutputValue};
use crate::transport::Transport;

#[cfg(feature = "remote")]
use crate::transport::HttpTransport;

/// Consumer configuration, fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct ConsumerOptions {
    /// When set, requests are composed and logged but never transmitted.
    pub dry_run: bool,
}

impl ConsumerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set dry-run mode.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Result of a write or invoke.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The request was executed and the Thing answered 200.
    Executed,
    /// Dry-run: the composed request, rendered as a log line.
    NotExecuted(String),
}

/// Result of a property read.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    /// Scalar and array schemas: the decoded value sequence.
    Value(Vec<OutputValue>),
    /// Object schemas, through the tagged read form: parallel tag and value
    /// sequences.
    Fields {
        tags: Vec<String>,
        values: Vec<OutputValue>,
    },
    /// The schema produces no caller-facing value (object read without
    /// tags, or a null schema).
    NoOutput,
    /// Dry-run: the composed request, rendered as a log line.
    NotExecuted(String),
}

/// Interacts with a Thing through the affordances its description exposes.
///
/// The description is read-only shared state; the consumer owns no mutable
/// state beyond the construction-time options, so concurrent invocations
/// from the host are safe.
pub struct Consumer<T: Transport> {
    td: ThingDescription,
    options: ConsumerOptions,
    transport: T,
}

#[cfg(feature = "remote")]
impl Consumer<HttpTransport> {
    /// Consumer with the default HTTP transport and default options.
    ///
    /// # Errors
    ///
    /// Returns a network error if the HTTP client cannot be built.
    pub fn new(td: ThingDescription) -> Result<Self, InteractionError> {
        Self::with_options(td, ConsumerOptions::new())
    }

    /// Consumer with the default HTTP transport and explicit options.
    pub fn with_options(
        td: ThingDescription,
        options: ConsumerOptions,
    ) -> Result<Self, InteractionError> {
        Ok(Self::with_transport(td, options, HttpTransport::new()?))
    }
}

impl<T: Transport> Consumer<T> {
    /// Consumer over a caller-supplied transport.
    pub fn with_transport(td: ThingDescription, options: ConsumerOptions, transport: T) -> Self {
        Consumer {
            td,
            options,
            transport,
        }
    }

    pub fn description(&self) -> &ThingDescription {
        &self.td
    }

    /// Read a property by semantic type.
    ///
    /// Object-typed properties yield [`ReadOutcome::NoOutput`] here; use
    /// [`read_property_tagged`](Self::read_property_tagged) for those.
    pub fn read_property(&self, semantic_type: &str) -> Result<ReadOutcome, InteractionError> {
        self.read(semantic_type, false)
    }

    /// Read a property by semantic type, requesting tag output.
    ///
    /// Object-typed properties yield [`ReadOutcome::Fields`]; other schemas
    /// behave as [`read_property`](Self::read_property).
    pub fn read_property_tagged(
        &self,
        semantic_type: &str,
    ) -> Result<ReadOutcome, InteractionError> {
        self.read(semantic_type, true)
    }

    /// Write a property by semantic type.
    pub fn write_property(
        &self,
        semantic_type: &str,
        payload: &[Value],
    ) -> Result<Outcome, InteractionError> {
        self.write_property_tagged(semantic_type, &[], payload)
    }

    /// Write a property by semantic type, naming object fields with tags.
    pub fn write_property_tagged(
        &self,
        semantic_type: &str,
        tags: &[String],
        payload: &[Value],
    ) -> Result<Outcome, InteractionError> {
        let property = self.resolve_property(semantic_type)?;
        check_arity(tags, payload)?;
        if payload.is_empty() {
            return Err(InteractionError::EmptyPayload);
        }

        let form = property
            .form_for(OperationKind::WriteProperty)
            .ok_or(InteractionError::MissingForm {
                operation: OperationKind::WriteProperty,
            })?;

        let schema = property.schema.as_ref();
        let shape = classify(tags, payload, schema)?;
        let request = build_request(form, OperationKind::WriteProperty, shape, schema)?;
        self.submit(request)
    }

    /// Invoke an action by semantic type.
    pub fn invoke_action(
        &self,
        semantic_type: &str,
        payload: &[Value],
    ) -> Result<Outcome, InteractionError> {
        self.invoke_action_tagged(semantic_type, &[], payload)
    }

    /// Invoke an action by semantic type, naming object fields with tags.
    pub fn invoke_action_tagged(
        &self,
        semantic_type: &str,
        tags: &[String],
        payload: &[Value],
    ) -> Result<Outcome, InteractionError> {
        let action = self
            .td
            .first_action_by_semantic_type(semantic_type)
            .ok_or_else(|| InteractionError::UnknownAction {
                semantic_type: semantic_type.to_string(),
            })?;
        check_arity(tags, payload)?;

        let form = action
            .form_for(OperationKind::InvokeAction)
            .ok_or(InteractionError::MissingForm {
                operation: OperationKind::InvokeAction,
            })?;

        let schema = action.schema.as_ref();
        if schema.is_none() && !payload.is_empty() {
            return Err(InteractionError::NoInput {
                semantic_type: semantic_type.to_string(),
            });
        }

        let shape = classify(tags, payload, schema)?;
        let request = build_request(form, OperationKind::InvokeAction, shape, schema)?;
        self.submit(request)
    }

    fn read(&self, semantic_type: &str, want_tags: bool) -> Result<ReadOutcome, InteractionError> {
        let property = self.resolve_property(semantic_type)?;
        let form = property
            .form_for(OperationKind::ReadProperty)
            .ok_or(InteractionError::MissingForm {
                operation: OperationKind::ReadProperty,
            })?;

        let request = build_request(form, OperationKind::ReadProperty, PayloadShape::Empty, None)?;

        if self.options.dry_run {
            let line = request.to_log_string();
            log::info!("dry run, not executed: {}", line);
            return Ok(ReadOutcome::NotExecuted(line));
        }

        log::debug!("executing {}", request);
        let response = self.transport.execute(&request)?;
        if response.status != 200 {
            return Err(InteractionError::Status {
                code: response.status,
            });
        }

        let payload = response.payload.ok_or(InteractionError::MissingResponse)?;
        let Some(schema) = property.schema.as_ref() else {
            return Ok(ReadOutcome::NoOutput);
        };

        match decode(schema, &payload, want_tags)? {
            Some(Decoded::Values(values)) => Ok(ReadOutcome::Value(values)),
            Some(Decoded::Fields { tags, values }) => Ok(ReadOutcome::Fields { tags, values }),
            None => Ok(ReadOutcome::NoOutput),
        }
    }

    fn resolve_property(&self, semantic_type: &str) -> Result<&Affordance, InteractionError> {
        self.td
            .first_property_by_semantic_type(semantic_type)
            .ok_or_else(|| InteractionError::UnknownProperty {
                semantic_type: semantic_type.to_string(),
            })
    }

    fn submit(&self, request: ThingRequest) -> Result<Outcome, InteractionError> {
        if self.options.dry_run {
            let line = request.to_log_string();
            log::info!("dry run, not executed: {}", line);
            return Ok(Outcome::NotExecuted(line));
        }

        log::debug!("executing {}", request);
        let response = self.transport.execute(&request)?;
        if response.status != 200 {
            return Err(InteractionError::Status {
                code: response.status,
            });
        }
        Ok(Outcome::Executed)
    }
}

fn check_arity(tags: &[String], payload: &[Value]) -> Result<(), InteractionError> {
    if !tags.is_empty() && tags.len() != payload.len() {
        return Err(InteractionError::TagArityMismatch {
            tags: tags.len(),
            values: payload.len(),
        });
    }
    Ok(())
}
