//! Dispatch contract tests against the public API.
//!
//! A small `Toolbox` command covers every parameter kind; malformed
//! registrations check that defects stop a run before any output.

use std::cell::RefCell;

use tagcli::{
    Arguments, Command, CommandMetadata, DispatchConfig, DispatchError, DispatchOutcome,
    Dispatcher, Exposed, FatalError, MetadataError, OptionMap, OptionValue, Painter, ParamType,
    Registration, Status, Value, extract,
};

#[derive(Default)]
struct Toolbox {
    /// Every invocation as (method, bound arguments).
    calls: RefCell<Vec<(String, Vec<(String, Option<Value>)>)>>,
}

impl Toolbox {
    fn record(&self, method: &str, args: &Arguments) {
        let bound = args
            .iter()
            .map(|(name, value)| (name.to_string(), value.cloned()))
            .collect();
        self.calls.borrow_mut().push((method.to_string(), bound));
    }
}

fn power(tb: &Toolbox, args: &Arguments) -> anyhow::Result<String> {
    tb.record("power", args);
    let x = args.int("x").unwrap_or_default();
    let y = args.int("y").unwrap_or_default();
    Ok(x.pow(y as u32).to_string())
}

fn toggle(tb: &Toolbox, args: &Arguments) -> anyhow::Result<String> {
    tb.record("toggle", args);
    Ok(args.bool("on").unwrap_or_default().to_string())
}

fn count(tb: &Toolbox, args: &Arguments) -> anyhow::Result<String> {
    tb.record("count", args);
    Ok(args.list("items").map_or(0, <[_]>::len).to_string())
}

fn say(tb: &Toolbox, args: &Arguments) -> anyhow::Result<String> {
    tb.record("say", args);
    Ok(args.str("text").unwrap_or_default().to_string())
}

impl Command for Toolbox {
    fn register() -> Registration<Self> {
        Registration::new(
            "/**
              * @title Toolbox
              * @version 3.2
              * @usage toolbox <method> [options...]
              */",
        )
        .expose(
            Exposed::new(
                "power",
                "/**
                  * Raise x to y
                  * @param int $x Base
                  * @param int $y Exponent
                  */",
                power,
            )
            .required("x")
            .required("y"),
        )
        .expose(
            Exposed::new(
                "toggle",
                "/**
                  * Flip a switch
                  * @param bool $on Switch state
                  */",
                toggle,
            )
            .optional("on"),
        )
        .expose(
            Exposed::new(
                "count",
                "/**
                  * Count list items
                  * @param list $items Items to count
                  */",
                count,
            )
            .optional("items"),
        )
        .expose(
            Exposed::new(
                "say",
                "/**
                  * Repeat text
                  * @param string $text What to say
                  */",
                say,
            )
            .required("text"),
        )
    }
}

fn dispatcher() -> Dispatcher<Toolbox> {
    Dispatcher::new(Toolbox::default(), DispatchConfig::default()).with_painter(Painter::plain())
}

fn run(d: &Dispatcher<Toolbox>, args: &[&str]) -> DispatchOutcome {
    d.run(std::iter::once("toolbox").chain(args.iter().copied()))
        .unwrap()
}

fn bound(d: &Dispatcher<Toolbox>, index: usize, name: &str) -> Option<Value> {
    let calls = d.command().calls.borrow();
    calls[index]
        .1
        .iter()
        .find(|(n, _)| n == name)
        .and_then(|(_, v)| v.clone())
}

// ============================================
// Extraction
// ============================================

#[test]
fn extraction_is_idempotent() {
    let first: CommandMetadata = extract::<Toolbox>().unwrap();
    let second = extract::<Toolbox>().unwrap();
    assert_eq!(first, second);
}

#[test]
fn metadata_keeps_declaration_order() {
    let metadata = extract::<Toolbox>().unwrap();
    let names: Vec<_> = metadata.method_names().collect();
    assert_eq!(names, vec!["power", "toggle", "count", "say"]);
    assert_eq!(metadata.program.title, "Toolbox");
    assert_eq!(metadata.program.version, "3.2");

    let power = metadata.method("power").unwrap();
    let params: Vec<_> = power.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(params, vec!["x", "y"]);
    assert_eq!(metadata.method("count").unwrap().parameters[0].kind, ParamType::List);
}

// ============================================
// Help
// ============================================

#[test]
fn help_never_invokes_a_method() {
    for args in [&[][..], &["--help"][..], &["?"][..], &["power", "-x=2", "-y=2", "?"][..]] {
        let d = dispatcher();
        let outcome = run(&d, args);
        assert_eq!(outcome.status, Status::Help);
        assert!(outcome.rendered.starts_with("Toolbox 3.2\nUsage: toolbox <method> [options...]\nMethods :\n"));
        assert!(d.command().calls.borrow().is_empty());
    }
}

#[test]
fn help_renders_method_blocks() {
    let d = dispatcher();
    let help = d.help().unwrap();
    assert!(help.contains(" * power: Raise x to y\n    Options:\n     -x: (int) Base\n     -y: (int) Exponent\n"));
    assert!(help.contains("     -on: (bool) Switch state (optional)\n"));
}

// ============================================
// Invocation
// ============================================

#[test]
fn power_scenario() {
    let d = dispatcher();
    let outcome = run(&d, &["power", "-x=2", "-y=10"]);
    assert_eq!(outcome.rendered, "power: 1024\n");
    assert_eq!(outcome.exit_code(), 0);
}

#[test]
fn colored_success_line() {
    let d = Dispatcher::new(Toolbox::default(), DispatchConfig::default())
        .with_painter(Painter::new(tagcli::ColorMode::Always));
    let outcome = run(&d, &["power", "-x=2", "-y=10"]);
    assert_eq!(outcome.rendered, "\x1b[0;32mpower: 1024\x1b[0m\n");
}

#[test]
fn missing_required_parameter_stops_dispatch() {
    let d = dispatcher();
    let outcome = run(&d, &["power", "-y=10"]);
    assert_eq!(
        outcome.status,
        Status::Failed {
            kind: "missing_required_parameter"
        }
    );
    assert!(outcome
        .rendered
        .starts_with("Error! Missing parameter '-x' for method power (Base)\nToolbox 3.2\n"));
    assert!(d.command().calls.borrow().is_empty());
}

#[test]
fn unknown_method_renders_error_and_help() {
    let d = dispatcher();
    let outcome = run(&d, &["bogus"]);
    assert!(outcome.rendered.starts_with("Error! Invalid Method specified\nToolbox 3.2\n"));
    assert!(matches!(
        outcome.error,
        Some(DispatchError::UnresolvedMethod { suggestion: None })
    ));
    assert_eq!(outcome.exit_code(), 1);
}

#[test]
fn first_declared_method_wins_tie_break() {
    let d = dispatcher();
    let outcome = run(&d, &["say", "-text=hi", "power", "-x=3", "-y=2"]);
    assert_eq!(outcome.rendered, "power: 9\n");
}

// ============================================
// Binding and casting
// ============================================

#[test]
fn lenient_casting() {
    let d = dispatcher();
    assert_eq!(run(&d, &["power", "-x=abc", "-y=2"]).rendered, "power: 0\n");
    assert_eq!(run(&d, &["toggle", "-on="]).rendered, "toggle: false\n");
    assert_eq!(run(&d, &["toggle", "-on=yes"]).rendered, "toggle: true\n");
    assert_eq!(run(&d, &["toggle", "-on=0"]).rendered, "toggle: false\n");
    assert_eq!(run(&d, &["count", "-items=[3,4]"]).rendered, "count: 2\n");

    assert_eq!(
        bound(&d, 4, "items"),
        Some(Value::List(vec![serde_json::json!(3), serde_json::json!(4)]))
    );
}

#[test]
fn malformed_list_binds_absent() {
    let d = dispatcher();
    assert_eq!(run(&d, &["count", "-items=[3,"]).rendered, "count: 0\n");
    assert_eq!(bound(&d, 0, "items"), None);
}

#[test]
fn absent_optional_is_not_an_empty_cast() {
    let d = dispatcher();
    run(&d, &["toggle"]);
    run(&d, &["toggle", "-on"]);
    assert_eq!(bound(&d, 0, "on"), None);
    assert_eq!(bound(&d, 1, "on"), Some(Value::Bool(false)));
}

#[test]
fn bracket_keys_collect_into_a_list() {
    let d = dispatcher();
    let outcome = run(&d, &["count", "-items[]=3", "-items[]=4", "-items[]=x"]);
    assert_eq!(outcome.rendered, "count: 3\n");
    assert_eq!(
        bound(&d, 0, "items"),
        Some(Value::List(vec![
            serde_json::json!(3),
            serde_json::json!(4),
            serde_json::json!("x"),
        ]))
    );
}

#[test]
fn values_are_percent_decoded() {
    let d = dispatcher();
    assert_eq!(run(&d, &["say", "-text=hello%20there"]).rendered, "say: hello there\n");
    assert_eq!(run(&d, &["say", "-text=a+b"]).rendered, "say: a b\n");
}

#[test]
fn strict_mode_rejects_uncastable_values() {
    let config = DispatchConfig {
        strict: true,
        ..Default::default()
    };
    let d = Dispatcher::new(Toolbox::default(), config).with_painter(Painter::plain());

    let outcome = run(&d, &["toggle", "-on=maybe"]);
    assert_eq!(
        outcome.status,
        Status::Failed {
            kind: "invalid_parameter_value"
        }
    );
    let outcome = run(&d, &["count", "-items=3,4"]);
    assert!(outcome.rendered.starts_with(
        "Error! Invalid value '3,4' for parameter '-items' of method count (expected list)\n"
    ));
    assert!(d.command().calls.borrow().is_empty());

    assert_eq!(run(&d, &["power", "-x=2", "-y=3"]).rendered, "power: 8\n");
}

#[test]
fn option_map_from_tokens() {
    let options = OptionMap::from_tokens(&["power", "-x=2", "-divisors[]=3", "-divisors[]=5"]);
    assert!(options.contains_key("power"));
    assert_eq!(options.parameter("x"), Some(&OptionValue::Single("2".to_string())));
    assert_eq!(
        options.parameter("divisors"),
        Some(&OptionValue::Many(vec!["3".to_string(), "5".to_string()]))
    );
    assert!(!options.wants_help());
}

// ============================================
// Metadata defects
// ============================================

struct Broken;

fn noop(_: &Broken, _: &Arguments) -> anyhow::Result<String> {
    Ok(String::new())
}

thread_local! {
    static BROKEN_DOC: RefCell<&'static str> = const { RefCell::new("") };
}

impl Command for Broken {
    fn register() -> Registration<Self> {
        let doc = BROKEN_DOC.with(|d| *d.borrow());
        Registration::new("/** @title Broken */")
            .expose(Exposed::new("fix", doc, noop).required("part"))
    }
}

fn broken_run(doc: &'static str) -> Result<DispatchOutcome, FatalError> {
    BROKEN_DOC.with(|d| *d.borrow_mut() = doc);
    Dispatcher::new(Broken, DispatchConfig::default())
        .with_painter(Painter::plain())
        .run(["broken", "fix", "-part=1"])
}

#[test]
fn undocumented_parameter_is_fatal() {
    let err = broken_run("/** Fix something */").unwrap_err();
    assert!(matches!(
        err,
        FatalError::Metadata(MetadataError::UndocumentedParameter { ref parameter, .. }) if parameter == "part"
    ));
}

#[test]
fn unsupported_type_is_fatal() {
    let err = broken_run("/** Fix\n * @param float $part Which part */").unwrap_err();
    assert!(matches!(
        err,
        FatalError::Metadata(MetadataError::UnsupportedType { ref declared, .. }) if declared == "float"
    ));
    assert!(err.to_string().starts_with("metadata defect: "));
}

#[test]
fn well_formed_registration_runs() {
    let outcome = broken_run("/** Fix\n * @param int $part Which part */").unwrap();
    assert_eq!(outcome.rendered, "fix: \n");
    assert_eq!(outcome.status, Status::Completed { method: "fix".to_string() });
}
