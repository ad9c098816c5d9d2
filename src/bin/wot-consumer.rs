//! WoT Consumer CLI
//!
//! Command-line interface for interacting with a Thing through its
//! Thing Description.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;
use wot_consumer::{
    load_description_auto, Consumer, ConsumerOptions, InteractionError, OperationKind, Outcome,
    ReadOutcome, ThingDescription, Transport,
};

#[derive(Parser)]
#[command(name = "wot-consumer")]
#[command(about = "Interact with a Thing through its W3C WoT Thing Description")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a property by semantic type
    Read {
        /// Thing Description source: file path or URL (http:// or https://)
        td: String,

        /// Semantic type IRI of the property
        #[arg(long = "type", short = 't')]
        semantic_type: String,

        /// Request tag output (for object-typed properties)
        #[arg(long)]
        tags: bool,

        /// Compose and print the request without executing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Write a property by semantic type
    Write {
        /// Thing Description source: file path or URL
        td: String,

        /// Semantic type IRI of the property
        #[arg(long = "type", short = 't')]
        semantic_type: String,

        /// Field-name tag, repeatable; pairs positionally with VALUES
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Payload values, parsed as JSON (plain strings accepted)
        #[arg(required = true)]
        values: Vec<String>,

        /// Compose and print the request without executing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Invoke an action by semantic type
    Invoke {
        /// Thing Description source: file path or URL
        td: String,

        /// Semantic type IRI of the action
        #[arg(long = "type", short = 't')]
        semantic_type: String,

        /// Field-name tag, repeatable; pairs positionally with VALUES
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Payload values, parsed as JSON (plain strings accepted)
        values: Vec<String>,

        /// Compose and print the request without executing it
        #[arg(long)]
        dry_run: bool,
    },

    /// List the affordances a Thing Description exposes
    Inspect {
        /// Thing Description source: file path or URL
        td: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Read {
            td,
            semantic_type,
            tags,
            dry_run,
        } => run_read(&td, &semantic_type, tags, dry_run),

        Commands::Write {
            td,
            semantic_type,
            tags,
            values,
            dry_run,
        } => run_write(&td, &semantic_type, tags, values, dry_run),

        Commands::Invoke {
            td,
            semantic_type,
            tags,
            values,
            dry_run,
        } => run_invoke(&td, &semantic_type, tags, values, dry_run),

        Commands::Inspect { td } => run_inspect(&td),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn load(source: &str) -> Result<ThingDescription, u8> {
    load_description_auto(source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })
}

fn build_consumer(
    td: ThingDescription,
    dry_run: bool,
) -> Result<Consumer<impl Transport>, u8> {
    let options = ConsumerOptions::new().dry_run(dry_run);

    #[cfg(feature = "remote")]
    {
        Consumer::with_options(td, options).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })
    }

    #[cfg(not(feature = "remote"))]
    {
        // Without the remote feature only dry-run invocations can succeed.
        struct NoTransport;
        impl Transport for NoTransport {
            fn execute(
                &self,
                _request: &wot_consumer::ThingRequest,
            ) -> Result<wot_consumer::ThingResponse, InteractionError> {
                Err(InteractionError::MissingResponse)
            }
        }
        Ok(Consumer::with_transport(td, options, NoTransport))
    }
}

/// Parse a CLI value as JSON, falling back to a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn interaction_failed(e: InteractionError) -> u8 {
    eprintln!("Error: {}", e);
    e.exit_code() as u8
}

fn run_read(source: &str, semantic_type: &str, tags: bool, dry_run: bool) -> Result<(), u8> {
    let td = load(source)?;
    let consumer = build_consumer(td, dry_run)?;

    let outcome = if tags {
        consumer.read_property_tagged(semantic_type)
    } else {
        consumer.read_property(semantic_type)
    }
    .map_err(interaction_failed)?;

    match outcome {
        ReadOutcome::Value(values) => {
            let json: Vec<Value> = values.iter().map(|v| v.to_json()).collect();
            println!("{}", Value::Array(json));
        }
        ReadOutcome::Fields { tags, values } => {
            for (tag, value) in tags.iter().zip(values.iter()) {
                println!("{}\t{}", tag, value.to_json());
            }
        }
        ReadOutcome::NoOutput => {
            println!("(no output)");
        }
        ReadOutcome::NotExecuted(line) => {
            println!("dry run, not executed: {}", line);
        }
    }

    Ok(())
}

fn run_write(
    source: &str,
    semantic_type: &str,
    tags: Vec<String>,
    values: Vec<String>,
    dry_run: bool,
) -> Result<(), u8> {
    let td = load(source)?;
    let consumer = build_consumer(td, dry_run)?;
    let payload: Vec<Value> = values.iter().map(|v| parse_value(v)).collect();

    let outcome = consumer
        .write_property_tagged(semantic_type, &tags, &payload)
        .map_err(interaction_failed)?;
    report_outcome(outcome);
    Ok(())
}

fn run_invoke(
    source: &str,
    semantic_type: &str,
    tags: Vec<String>,
    values: Vec<String>,
    dry_run: bool,
) -> Result<(), u8> {
    let td = load(source)?;
    let consumer = build_consumer(td, dry_run)?;
    let payload: Vec<Value> = values.iter().map(|v| parse_value(v)).collect();

    let outcome = consumer
        .invoke_action_tagged(semantic_type, &tags, &payload)
        .map_err(interaction_failed)?;
    report_outcome(outcome);
    Ok(())
}

fn report_outcome(outcome: Outcome) {
    match outcome {
        Outcome::Executed => println!("Ok"),
        Outcome::NotExecuted(line) => println!("dry run, not executed: {}", line),
    }
}

fn run_inspect(source: &str) -> Result<(), u8> {
    let td = load(source)?;

    if td.title.is_empty() {
        println!("(untitled Thing)");
    } else {
        println!("{}", td.title);
    }

    println!("\nproperties:");
    for property in &td.properties {
        print_affordance(property, &[OperationKind::ReadProperty, OperationKind::WriteProperty]);
    }

    println!("\nactions:");
    for action in &td.actions {
        print_affordance(action, &[OperationKind::InvokeAction]);
    }

    Ok(())
}

fn print_affordance(affordance: &wot_consumer::Affordance, ops: &[OperationKind]) {
    let schema = affordance
        .schema
        .as_ref()
        .map(|s| s.type_name())
        .unwrap_or("none");
    println!("  {} ({})", affordance.name, schema);
    for iri in &affordance.semantic_types {
        println!("    @type {}", iri);
    }
    for op in ops {
        if let Some(form) = affordance.form_for(*op) {
            println!("    {} {} {}", op, form.method(*op), form.href);
        }
    }
}
