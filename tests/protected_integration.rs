//! Integration tests for by-name setup and verification.
//!
//! These drive the public API the way a test suite mocking a type with
//! protected members would.

use std::sync::{Arc, Mutex};

use predicates::prelude::*;
use protected_mock::{
    args, Arg, Describe, It, Mock, MockBehavior, MockConfig, MockError, Parameter, ProtectedError,
    SequenceExhausted, Times, Ty, TypeDescriptor, Value, Visibility,
};
use tempfile::TempDir;

/// ```text
/// abstract class Repository {
///     protected abstract string Load(int id);
///     protected abstract string Load(string key);
///     protected abstract void Store(int id, string value);
///     protected abstract bool TryGet(string key, ref string value);
///     public void Flush();
///
///     protected int Version { get; set; }
///     protected string Name { get; }
///     public int Size { get; }
/// }
/// ```
struct Repository;

impl Describe for Repository {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::builder("Repository")
            .method(
                Visibility::Protected,
                "Load",
                vec![Parameter::new("id", Ty::int())],
                Ty::string(),
            )
            .method(
                Visibility::Protected,
                "Load",
                vec![Parameter::new("key", Ty::string())],
                Ty::string(),
            )
            .method(
                Visibility::Protected,
                "Store",
                vec![
                    Parameter::new("id", Ty::int()),
                    Parameter::new("value", Ty::string()),
                ],
                Ty::void(),
            )
            .method(
                Visibility::Protected,
                "TryGet",
                vec![
                    Parameter::new("key", Ty::string()),
                    Parameter::new("value", Ty::string().by_ref()),
                ],
                Ty::bool(),
            )
            .method(Visibility::Public, "Flush", vec![], Ty::void())
            .property(
                "Version",
                Ty::int(),
                Some(Visibility::Protected),
                Some(Visibility::Protected),
            )
            .property("Name", Ty::string(), Some(Visibility::Protected), None)
            .property("Size", Ty::int(), Some(Visibility::Public), None)
            .build()
    }
}

/// `CachedRepository : Repository`, adding a private helper that the
/// derived type can still have mocked.
struct CachedRepository;

impl Describe for CachedRepository {
    fn describe() -> TypeDescriptor {
        let base = Repository::describe();
        TypeDescriptor::builder_for(Ty::class("CachedRepository", Some(base.ty().clone())))
            .inherit(&base)
            .method(
                Visibility::Private,
                "Evict",
                vec![Parameter::new("id", Ty::int())],
                Ty::void(),
            )
            .build()
    }
}

#[test]
fn test_overloads_resolved_by_literal_type() {
    let mut mock = Mock::of::<Repository>();
    mock.protected()
        .setup_result::<String>("Load", &args![1])
        .unwrap()
        .returns("by id".to_string());
    mock.protected()
        .setup_result::<String>("Load", &args!["k"])
        .unwrap()
        .returns("by key".to_string());

    assert_eq!(
        mock.call("Load", vec![Value::Int(1)]).unwrap(),
        Some(Value::from("by id"))
    );
    assert_eq!(
        mock.call("Load", vec![Value::from("k")]).unwrap(),
        Some(Value::from("by key"))
    );
    assert_eq!(
        mock.call("Load", vec![Value::Int(2)]).unwrap(),
        Some(Value::Null)
    );
}

#[test]
fn test_mixed_literals_and_matchers() {
    let mut mock = Mock::of::<Repository>();
    let stored = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&stored);

    mock.protected()
        .setup("Store", &args![It::is_any::<i32>(), It::is_not_null::<String>()])
        .unwrap()
        .callback(move |args| {
            if let Ok(mut stored) = sink.lock() {
                stored.push(args.to_vec());
            }
        });

    mock.call("Store", vec![Value::Int(7), Value::from("seven")])
        .unwrap();

    assert_eq!(
        *stored.lock().unwrap(),
        vec![vec![Value::Int(7), Value::from("seven")]]
    );
    assert!(mock
        .protected()
        .verify("Store", Times::once(), &args![7, It::is_any::<String>()])
        .is_ok());
    assert!(mock
        .protected()
        .verify("Store", Times::never(), &args![8, It::is_any::<String>()])
        .is_ok());
}

#[test]
fn test_predicate_regex_and_range_matchers() {
    let mut mock = Mock::of::<Repository>();
    mock.protected()
        .setup_result::<String>("Load", &args![It::is_in_range(1, 10)])
        .unwrap()
        .returns("small".to_string());
    mock.protected()
        .setup_result::<String>("Load", &[Arg::from(It::is_regex("^user:").unwrap())])
        .unwrap()
        .returns("user".to_string());
    mock.protected()
        .setup_result::<String>("Load", &args![It::is::<i32, _>("negative", |n| n < 0)])
        .unwrap()
        .returns("negative".to_string());

    assert_eq!(
        mock.call("Load", vec![Value::Int(3)]).unwrap(),
        Some(Value::from("small"))
    );
    assert_eq!(
        mock.call("Load", vec![Value::from("user:1")]).unwrap(),
        Some(Value::from("user"))
    );
    assert_eq!(
        mock.call("Load", vec![Value::Int(-4)]).unwrap(),
        Some(Value::from("negative"))
    );
    assert_eq!(
        mock.call("Load", vec![Value::Int(40)]).unwrap(),
        Some(Value::Null)
    );
}

#[test]
fn test_by_ref_wildcard() {
    let mut mock = Mock::of::<Repository>();
    mock.protected()
        .setup_result::<bool>("TryGet", &args!["key", It::ref_any::<String>()])
        .unwrap()
        .returns(true);

    assert_eq!(
        mock.call("TryGet", vec![Value::from("key"), Value::Null])
            .unwrap(),
        Some(Value::Bool(true))
    );

    // A plain value cannot select a by-reference parameter.
    let err = mock
        .protected()
        .setup_result::<bool>("TryGet", &args!["key", "value"])
        .unwrap_err();
    assert!(matches!(err, ProtectedError::MethodMissing { .. }));
}

#[test]
fn test_property_setup_and_verify() {
    let mut mock = Mock::of::<Repository>();
    mock.protected()
        .setup_get::<i32>("Version")
        .unwrap()
        .returns(3);

    assert_eq!(mock.get("Version").unwrap(), Value::Int(3));
    mock.set("Version", Value::Int(4)).unwrap();

    assert!(mock
        .protected()
        .verify_get::<i32>("Version", Times::once())
        .is_ok());
    assert!(mock
        .protected()
        .verify_set::<i32>("Version", Times::once(), 4)
        .is_ok());
    assert!(mock
        .protected()
        .verify_set::<i32>("Version", Times::never(), It::is_in_range(5, 9))
        .is_ok());
    assert!(mock
        .protected()
        .verify_set_any::<i32>("Version", Times::at_least_once())
        .is_ok());
}

#[test]
fn test_read_only_property() {
    let mut mock = Mock::of::<Repository>();

    let err = mock.protected().setup_set::<String>("Name", "x").unwrap_err();
    assert!(matches!(err, ProtectedError::PropertyNotWritable { .. }));
    assert!(predicate::str::contains("read-only").eval(&err.to_string()));

    assert!(mock.protected().setup_get::<String>("Name").is_ok());
    assert!(matches!(
        mock.set("Name", Value::from("x")),
        Err(MockError::MissingAccessor { .. })
    ));
}

#[test]
fn test_public_members_are_rejected_with_guidance() {
    let mut mock = Mock::of::<Repository>();

    let err = mock.protected().setup("Flush", &[]).unwrap_err();
    let rendered = err.to_diagnostic().format(false);
    assert!(predicate::str::contains("Repository.Flush").eval(&rendered));
    assert!(predicate::str::contains("strongly-typed API").eval(&rendered));

    let err = mock.protected().verify_get::<i32>("Size", Times::once()).unwrap_err();
    assert!(matches!(err, ProtectedError::UnexpectedPublicProperty { .. }));
}

#[test]
fn test_method_missing_lists_argument_types() {
    let mut mock = Mock::of::<Repository>();
    let err = mock
        .protected()
        .setup("Store", &args!["id", It::ref_any::<String>()])
        .unwrap_err();

    let message = err.to_string();
    assert!(predicate::str::contains("Repository.Store").eval(&message));
    assert!(predicate::str::contains("(string, ref string)").eval(&message));
}

#[test]
fn test_verification_failure_reports_performed_calls() {
    let mut mock = Mock::of::<Repository>();
    mock.call("Load", vec![Value::Int(5)]).unwrap();

    let err = mock
        .protected()
        .verify_result::<String>("Load", Times::once(), &args![6])
        .unwrap_err();

    let rendered = err.to_diagnostic().format(false);
    assert!(predicate::str::contains("exactly 1 time").eval(&rendered));
    assert!(predicate::str::contains("performed: Repository.Load(5)").eval(&rendered));
}

#[test]
fn test_sequence_with_exhaustion_error() {
    let config = MockConfig {
        sequence_exhausted: SequenceExhausted::Error,
        ..MockConfig::default()
    };
    let mut mock = Mock::with_config(Repository::describe(), config);

    mock.protected()
        .setup_sequence_result::<i32>("Version", &[])
        .unwrap()
        .returns(1);
    mock.protected()
        .setup_sequence_result::<i32>("Version", &[])
        .unwrap()
        .returns(2);

    assert_eq!(mock.get("Version").unwrap(), Value::Int(1));
    assert_eq!(mock.get("Version").unwrap(), Value::Int(2));
    assert!(matches!(
        mock.get("Version"),
        Err(MockError::SequenceExhausted { .. })
    ));
}

#[test]
fn test_strict_mock_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("mock.toml");
    std::fs::write(&path, "behavior = \"strict\"\n").unwrap();

    let config = MockConfig::load(&path).unwrap();
    assert_eq!(config.behavior, MockBehavior::Strict);

    let mut mock = Mock::with_config(Repository::describe(), config);
    mock.protected()
        .setup("Store", &args![1, "one"])
        .unwrap();

    assert!(mock.call("Store", vec![Value::Int(1), Value::from("one")]).is_ok());
    assert!(matches!(
        mock.call("Store", vec![Value::Int(2), Value::from("two")]),
        Err(MockError::NoSetup { .. })
    ));
}

#[test]
fn test_private_members_of_derived_type() {
    let mut mock = Mock::of::<CachedRepository>();

    assert!(mock.protected().setup("Evict", &args![1]).is_ok());
    assert!(mock
        .protected()
        .setup_result::<String>("Load", &args![1])
        .is_ok());
    assert!(matches!(
        mock.protected().setup("Flush", &[]),
        Err(ProtectedError::MethodIsPublic { .. })
    ));
}
