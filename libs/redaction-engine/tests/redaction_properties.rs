use payload_redactor_engine::{
    redact, KeywordSet, RedactionEngine, RedactionError, RedactionMode, RedactionPolicy,
};
use serde_json::{json, Value};

const ALL_MODES: [RedactionMode; 3] = [
    RedactionMode::Mask,
    RedactionMode::Nullify,
    RedactionMode::Remove,
];

fn keywords(words: &[&str]) -> KeywordSet {
    KeywordSet::new(words.iter().copied())
}

fn sample_payload() -> Value {
    json!({
        "user": {
            "name": "Alice",
            "password": "hunter2",
            "profile": {
                "age": 30,
                "score": 4.5,
                "active": true,
                "nickname": null,
                "sessions": [
                    {"id": 1, "token": "t-1"},
                    {"id": 2, "token": "t-2", "devices": [{"apiKey": "k"}]}
                ]
            }
        },
        "tags": ["a", "b"],
        "token": "root-token"
    })
}

#[test]
fn test_mode_correctness() {
    let set = keywords(&["password"]);

    assert_eq!(
        redact(json!({"password": "abc"}), &set, RedactionMode::Mask),
        json!({"password": "*****"})
    );
    assert_eq!(
        redact(json!({"password": "abc"}), &set, RedactionMode::Nullify),
        json!({"password": null})
    );
    assert_eq!(
        redact(
            json!({"password": "abc", "user": "bob"}),
            &set,
            RedactionMode::Remove
        ),
        json!({"user": "bob"})
    );
}

#[test]
fn test_remove_leaves_key_absent_and_order_intact() {
    let result = redact(
        json!({"password": "abc", "user": "bob", "email": "b@example.com"}),
        &keywords(&["password"]),
        RedactionMode::Remove,
    );

    let object = result.as_object().unwrap();
    assert!(!object.contains_key("password"));
    let keys: Vec<&String> = object.keys().collect();
    assert_eq!(keys, vec!["user", "email"]);
}

#[test]
fn test_array_pass_through() {
    assert_eq!(
        redact(
            json!([{"token": "x"}, {"name": "y"}]),
            &keywords(&["token"]),
            RedactionMode::Mask
        ),
        json!([{"token": "*****"}, {"name": "y"}])
    );
}

#[test]
fn test_matched_value_is_not_descended_into() {
    assert_eq!(
        redact(
            json!({"secret": {"nested": "v"}}),
            &keywords(&["secret", "nested"]),
            RedactionMode::Nullify
        ),
        json!({"secret": null})
    );
    assert_eq!(
        redact(
            json!({"secret": [{"token": "a"}, 1]}),
            &keywords(&["secret", "token"]),
            RedactionMode::Mask
        ),
        json!({"secret": "*****"})
    );
}

#[test]
fn test_case_sensitivity_boundary() {
    let input = json!({"Password": "abc", "PASSWORD": "def"});
    for mode in ALL_MODES {
        assert_eq!(redact(input.clone(), &keywords(&["password"]), mode), input);
    }
}

#[test]
fn test_no_substring_matching() {
    let input = json!({"password_hint": "pet name", "oldpassword": "x"});
    assert_eq!(
        redact(input.clone(), &keywords(&["password"]), RedactionMode::Remove),
        input
    );
}

#[test]
fn test_structure_preserved_without_sensitive_keys() {
    let input = sample_payload();
    for mode in ALL_MODES {
        assert_eq!(
            redact(input.clone(), &keywords(&["ssn", "cvv"]), mode),
            input
        );
    }
}

#[test]
fn test_scalars_at_root_are_unchanged() {
    let set = keywords(&["token"]);
    for scalar in [json!(null), json!(true), json!(42), json!(-1.25), json!("token")] {
        assert_eq!(redact(scalar.clone(), &set, RedactionMode::Remove), scalar);
    }
}

#[test]
fn test_deeply_nested_keys_are_redacted() {
    let result = redact(
        sample_payload(),
        &keywords(&["password", "token", "apiKey"]),
        RedactionMode::Mask,
    );

    assert_eq!(result["token"], "*****");
    assert_eq!(result["user"]["password"], "*****");
    assert_eq!(result["user"]["name"], "Alice");

    let sessions = result["user"]["profile"]["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0], json!({"id": 1, "token": "*****"}));
    assert_eq!(sessions[1]["devices"][0]["apiKey"], "*****");
    assert_eq!(result["user"]["profile"]["age"], 30);
    assert_eq!(result["user"]["profile"]["score"], 4.5);
}

#[test]
fn test_completeness_at_arbitrary_depth() {
    let mut payload = json!({"password": "deepest"});
    for level in 0..50 {
        payload = if level % 2 == 0 {
            json!({ "level": level, "child": payload })
        } else {
            json!([payload])
        };
    }

    let redacted = redact(payload, &keywords(&["password"]), RedactionMode::Nullify);
    let serialized = serde_json::to_string(&redacted).unwrap();
    assert!(!serialized.contains("deepest"));
    assert!(serialized.contains(r#""password":null"#));
}

#[test]
fn test_idempotence() {
    let set = keywords(&["password", "token"]);
    for mode in ALL_MODES {
        let once = redact(sample_payload(), &set, mode);
        let twice = redact(once.clone(), &set, mode);
        assert_eq!(once, twice, "mode {mode} is not idempotent");
    }
}

#[test]
fn test_engine_matches_free_function() {
    let set = keywords(&["password", "token"]);
    for mode in ALL_MODES {
        let engine = RedactionEngine::new(RedactionPolicy::new(set.clone(), mode)).unwrap();
        assert_eq!(
            engine.redact(sample_payload()),
            redact(sample_payload(), &set, mode)
        );
    }
}

#[test]
fn test_bounded_walk_fails_closed() {
    let engine = RedactionEngine::new(
        RedactionPolicy::new(keywords(&["password"]), RedactionMode::Mask).with_max_depth(3),
    )
    .unwrap();

    let accepted = engine
        .try_redact(json!({"a": {"b": {"password": "x"}}}))
        .unwrap();
    assert_eq!(accepted.value, json!({"a": {"b": {"password": "*****"}}}));
    assert_eq!(accepted.fields_redacted, 1);

    let rejected = engine.try_redact(json!({"a": {"b": {"c": {"password": "x"}}}}));
    assert!(matches!(
        rejected,
        Err(RedactionError::DepthExceeded { limit: 3 })
    ));
}

#[test]
fn test_shared_engine_across_threads() {
    let engine = std::sync::Arc::new(
        RedactionEngine::new(RedactionPolicy::new(
            keywords(&["token"]),
            RedactionMode::Remove,
        ))
        .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = std::sync::Arc::clone(&engine);
            std::thread::spawn(move || engine.redact(json!({"id": i, "token": "secret"})))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), json!({ "id": i }));
    }
}
