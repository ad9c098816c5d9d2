//! End-to-end interaction tests over a mock HTTP Thing.

#![cfg(feature = "remote")]

use mockito::{Matcher, Server};
use serde_json::json;
use wot_consumer::{
    load_description_str, Consumer, ConsumerOptions, InteractionError, Outcome, OutputValue,
    ReadOutcome,
};

/// The embedded lamp description, rebased onto the mock server.
fn lamp_td(base: &str) -> String {
    include_str!("fixtures/lamp.json").replace("http://lamp.local", base)
}

fn consumer(server: &Server) -> Consumer<wot_consumer::HttpTransport> {
    let td = load_description_str(&lamp_td(&server.url())).unwrap();
    Consumer::new(td).unwrap()
}

fn dry_run_consumer(server: &Server) -> Consumer<wot_consumer::HttpTransport> {
    let td = load_description_str(&lamp_td(&server.url())).unwrap();
    Consumer::with_options(td, ConsumerOptions::new().dry_run(true)).unwrap()
}

mod read_property {
    use super::*;

    #[test]
    fn boolean_schema_yields_single_element_tree() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/on")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("true")
            .create();

        let outcome = consumer(&server)
            .read_property("http://example.org/OnOff")
            .unwrap();
        assert_eq!(outcome, ReadOutcome::Value(vec![OutputValue::Bool(true)]));
        mock.assert();
    }

    #[test]
    fn array_schema_converts_nested_sequences() {
        let mut server = Server::new();
        server
            .mock("GET", "/levels")
            .with_status(200)
            .with_body("[[1,2],3]")
            .create();

        let outcome = consumer(&server)
            .read_property("http://example.org/Levels")
            .unwrap();
        assert_eq!(
            outcome,
            ReadOutcome::Value(vec![
                OutputValue::List(vec![OutputValue::Integer(1), OutputValue::Integer(2)]),
                OutputValue::Integer(3),
            ])
        );
    }

    #[test]
    fn object_schema_with_tag_output() {
        let mut server = Server::new();
        server
            .mock("GET", "/color")
            .with_status(200)
            .with_body(r#"{"hue":120,"saturation":0.5}"#)
            .create();

        let outcome = consumer(&server)
            .read_property_tagged("http://example.org/Color")
            .unwrap();
        let ReadOutcome::Fields { tags, values } = outcome else {
            panic!("expected tagged output");
        };
        assert_eq!(tags, vec!["hue".to_string(), "saturation".to_string()]);
        assert_eq!(
            values,
            vec![OutputValue::Integer(120), OutputValue::Number(0.5)]
        );
    }

    #[test]
    fn object_schema_without_tag_output_is_silent() {
        let mut server = Server::new();
        server
            .mock("GET", "/color")
            .with_status(200)
            .with_body(r#"{"hue":120,"saturation":0.5}"#)
            .create();

        let outcome = consumer(&server)
            .read_property("http://example.org/Color")
            .unwrap();
        assert_eq!(outcome, ReadOutcome::NoOutput);
    }

    #[test]
    fn empty_200_body_is_a_missing_response() {
        let mut server = Server::new();
        server.mock("GET", "/on").with_status(200).create();

        let result = consumer(&server).read_property("http://example.org/OnOff");
        assert!(matches!(result, Err(InteractionError::MissingResponse)));
    }

    #[test]
    fn non_200_status_is_reported() {
        let mut server = Server::new();
        server.mock("GET", "/on").with_status(503).create();

        let result = consumer(&server).read_property("http://example.org/OnOff");
        assert!(matches!(
            result,
            Err(InteractionError::Status { code: 503 })
        ));
    }
}

mod write_property {
    use super::*;

    #[test]
    fn primitive_payload_put_as_json_body() {
        let mut server = Server::new();
        let mock = server
            .mock("PUT", "/on")
            .match_body(Matcher::Json(json!(true)))
            .with_status(200)
            .create();

        let outcome = consumer(&server)
            .write_property("http://example.org/OnOff", &[json!(true)])
            .unwrap();
        assert_eq!(outcome, Outcome::Executed);
        mock.assert();
    }

    #[test]
    fn array_payload_round_trips_through_echo() {
        let mut server = Server::new();
        let write_mock = server
            .mock("PUT", "/levels")
            .match_body(Matcher::Json(json!([1, 2, [3, 4]])))
            .with_status(200)
            .create();
        server
            .mock("GET", "/levels")
            .with_status(200)
            .with_body("[1,2,[3,4]]")
            .create();

        let consumer = consumer(&server);
        consumer
            .write_property(
                "http://example.org/Levels",
                &[json!(1), json!(2), json!([3, 4])],
            )
            .unwrap();
        write_mock.assert();

        let outcome = consumer
            .read_property("http://example.org/Levels")
            .unwrap();
        assert_eq!(
            outcome,
            ReadOutcome::Value(vec![
                OutputValue::Integer(1),
                OutputValue::Integer(2),
                OutputValue::List(vec![OutputValue::Integer(3), OutputValue::Integer(4)]),
            ])
        );
    }

    #[test]
    fn object_payload_from_tags() {
        let mut server = Server::new();
        let mock = server
            .mock("PUT", "/color")
            .match_body(Matcher::Json(json!({ "hue": 200, "saturation": 0.8 })))
            .with_status(200)
            .create();

        let tags = vec!["hue".to_string(), "saturation".to_string()];
        let outcome = consumer(&server)
            .write_property_tagged("http://example.org/Color", &tags, &[json!(200), json!(0.8)])
            .unwrap();
        assert_eq!(outcome, Outcome::Executed);
        mock.assert();
    }

    #[test]
    fn undeclared_tag_is_dropped_from_the_body() {
        let mut server = Server::new();
        let mock = server
            .mock("PUT", "/color")
            .match_body(Matcher::Json(json!({ "hue": 200 })))
            .with_status(200)
            .create();

        let tags = vec!["hue".to_string(), "glitter".to_string()];
        consumer(&server)
            .write_property_tagged("http://example.org/Color", &tags, &[json!(200), json!(9)])
            .unwrap();
        mock.assert();
    }

    #[test]
    fn non_200_write_is_reported() {
        let mut server = Server::new();
        server.mock("PUT", "/on").with_status(403).create();

        let result = consumer(&server).write_property("http://example.org/OnOff", &[json!(true)]);
        assert!(matches!(
            result,
            Err(InteractionError::Status { code: 403 })
        ));
    }
}

mod invoke_action {
    use super::*;

    #[test]
    fn no_input_action_posts_empty_body() {
        let mut server = Server::new();
        let mock = server.mock("POST", "/toggle").with_status(200).create();

        let outcome = consumer(&server)
            .invoke_action("http://example.org/Toggle", &[])
            .unwrap();
        assert_eq!(outcome, Outcome::Executed);
        mock.assert();
    }

    #[test]
    fn scalar_input_action() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/fade")
            .match_body(Matcher::Json(json!(40)))
            .with_status(200)
            .create();

        consumer(&server)
            .invoke_action("http://example.org/Fade", &[json!(40)])
            .unwrap();
        mock.assert();
    }

    #[test]
    fn payload_to_no_input_action_sends_nothing() {
        let mut server = Server::new();
        let mock = server.mock("POST", "/toggle").expect(0).create();

        let result = consumer(&server).invoke_action("http://example.org/Toggle", &[json!(5)]);
        assert!(matches!(result, Err(InteractionError::NoInput { .. })));
        mock.assert();
    }
}

mod failure_ordering {
    use super::*;

    #[test]
    fn unknown_semantic_type_in_all_three_operations() {
        let server = Server::new();
        let consumer = consumer(&server);
        let iri = "http://example.org/NoSuchAffordance";

        let read = consumer.read_property(iri);
        assert!(matches!(
            read,
            Err(InteractionError::UnknownProperty { semantic_type }) if semantic_type == iri
        ));

        let write = consumer.write_property(iri, &[json!(1)]);
        assert!(matches!(
            write,
            Err(InteractionError::UnknownProperty { semantic_type }) if semantic_type == iri
        ));

        let invoke = consumer.invoke_action(iri, &[json!(1)]);
        assert!(matches!(
            invoke,
            Err(InteractionError::UnknownAction { semantic_type }) if semantic_type == iri
        ));
    }

    #[test]
    fn arity_mismatch_sends_nothing() {
        let mut server = Server::new();
        let mock = server.mock("PUT", "/color").expect(0).create();

        let tags = vec!["hue".to_string(), "saturation".to_string()];
        let result = consumer(&server).write_property_tagged(
            "http://example.org/Color",
            &tags,
            &[json!(120)],
        );
        assert!(matches!(
            result,
            Err(InteractionError::TagArityMismatch { tags: 2, values: 1 })
        ));
        mock.assert();
    }

    #[test]
    fn schema_mismatch_sends_nothing() {
        let mut server = Server::new();
        let mock = server.mock("PUT", "/brightness").expect(0).create();

        // Two untagged values form an array payload; brightness is integer.
        let result = consumer(&server).write_property(
            "http://example.org/Brightness",
            &[json!(1), json!(2)],
        );
        assert!(matches!(
            result,
            Err(InteractionError::SchemaMismatch { declared: "integer" })
        ));
        mock.assert();
    }
}

mod dry_run {
    use super::*;

    #[test]
    fn no_request_leaves_the_engine() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create();

        let consumer = dry_run_consumer(&server);

        let read = consumer.read_property("http://example.org/OnOff").unwrap();
        assert!(matches!(read, ReadOutcome::NotExecuted(_)));

        let write = consumer
            .write_property("http://example.org/OnOff", &[json!(true)])
            .unwrap();
        let Outcome::NotExecuted(line) = write else {
            panic!("expected dry-run outcome");
        };
        assert!(line.contains("PUT"));
        assert!(line.contains("/on"));

        let invoke = consumer
            .invoke_action("http://example.org/Toggle", &[])
            .unwrap();
        assert!(matches!(invoke, Outcome::NotExecuted(_)));

        mock.assert();
    }

    #[test]
    fn validation_still_applies() {
        let server = Server::new();
        let consumer = dry_run_consumer(&server);

        let result = consumer.write_property("http://example.org/OnOff", &[]);
        assert!(matches!(result, Err(InteractionError::EmptyPayload)));
    }
}
