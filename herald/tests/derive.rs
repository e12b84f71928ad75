use std::{cell::RefCell, rc::Rc};

use herald::{App, Flag, Generic, errors::ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Generic)]
enum Priority {
    Low,
    Normal,
    VeryHigh,

    #[herald(rename = "now")]
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Generic)]
struct Port(u16);

#[derive(Debug, Clone, PartialEq, Eq, Generic)]
struct Label {
    text: String,
}

#[test]
fn test_enum_names_are_kebab_case() {
    let mut priority = Priority::Normal;

    priority.set("very-high").unwrap();
    assert_eq!(priority, Priority::VeryHigh);
    assert_eq!(priority.to_string(), "very-high");

    priority.set("LOW").unwrap();
    assert_eq!(priority, Priority::Low);
}

#[test]
fn test_enum_rename() {
    let mut priority = Priority::Low;

    priority.set("Now").unwrap();
    assert_eq!(priority, Priority::Urgent);
    assert_eq!(priority.to_string(), "now");

    assert!(priority.set("urgent").is_err());
}

#[test]
fn test_enum_rejects_unknown_names() {
    let mut priority = Priority::Normal;
    let error = priority.set("whenever").unwrap_err();

    assert_eq!(
        error,
        ParseError::ShouldBe {
            arg: "whenever".to_owned(),
            expected: &["low", "normal", "very-high", "now"],
        }
    );
    assert_eq!(
        error.to_string(),
        r#""whenever" isn't one of: low, normal, very-high, now"#
    );

    // A failed parse leaves the value alone
    assert_eq!(priority, Priority::Normal);
}

#[test]
fn test_newtypes_use_from_str() {
    let mut port = Port(80);
    port.set("8080").unwrap();
    assert_eq!(port, Port(8080));
    assert_eq!(port.to_string(), "8080");

    assert!(matches!(
        port.set("99999"),
        Err(ParseError::Invalid { ref arg, .. }) if arg == "99999"
    ));
    assert_eq!(port, Port(8080));

    let mut label = Label {
        text: String::new(),
    };
    label.set("release").unwrap();
    assert_eq!(label.to_string(), "release");
}

#[test]
fn test_derived_values_as_flags() {
    let observed = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&observed);

    let app = App::new("tasks")
        .with_flag(Flag::generic("priority, p", Priority::Normal, "how urgent"))
        .with_flag(Flag::generic("port", Port(80), "where to listen"))
        .with_action(move |context| {
            *sink.borrow_mut() = Some((
                context.generic::<Priority>("p").copied(),
                context.generic::<Port>("port").copied(),
                context.generic::<Port>("priority").copied(),
            ))
        });

    let args = ["tasks", "-p", "very-high"].map(String::from);
    app.try_run_with_output(&args, &mut Vec::new())
        .expect("dispatch should succeed");

    assert_eq!(
        *observed.borrow(),
        Some((Some(Priority::VeryHigh), Some(Port(80)), None))
    );
}

#[test]
fn test_derived_value_errors_become_usage_errors() {
    let app = App::new("tasks")
        .with_flag(Flag::generic("priority", Priority::Normal, ""))
        .with_action(|_| panic!("the action shouldn't run"));

    let args = ["tasks", "--priority=someday"].map(String::from);
    let error = app
        .try_run_with_output(&args, &mut Vec::new())
        .expect_err("someday isn't a priority");

    assert_eq!(
        error.to_string(),
        r#"tasks: invalid value "someday" for flag -priority: "someday" isn't one of: low, normal, very-high, now"#
    );
}

#[test]
fn test_derived_default_in_help() {
    let app = App::new("tasks").with_flag(Flag::generic(
        "priority",
        Priority::VeryHigh,
        "how urgent",
    ));

    let mut out = Vec::new();
    app.write_help(&mut out, &["tasks"]).unwrap();

    let help = String::from_utf8(out).unwrap();
    assert!(
        help.contains("--priority 'very-high'  how urgent"),
        "{help}"
    );
}
