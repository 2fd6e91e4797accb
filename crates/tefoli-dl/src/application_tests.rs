//! Tests for ApplicationDl.

use super::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use tefoli_config::{PropagateMode, TheoryConfig};
use tefoli_core::Symbol;
use tefoli_test::{MockControl, MockError, MockTheory, RecordingOptions, TheoryEvent, DL_PROGRAM};

type TestApplication = ApplicationDl<MockControl, MockTheory>;

fn is_model(event: &TheoryEvent) -> bool {
    matches!(event, TheoryEvent::Model { .. })
}

#[test]
fn test_program_name_and_version() {
    let app = TestApplication::new("clingo-dl").unwrap();

    assert_eq!(app.program_name(), "clingo-dl");
    assert_eq!(app.version(), "0.0.1");
    assert!(app.theory().events().is_empty());
}

#[test]
fn test_from_config_applies_tunables() {
    let config = ApplicationConfig::new().with_theory(
        TheoryConfig::unconfigured().with_propagate(PropagateMode::Partial, 1),
    );
    let app = TestApplication::from_config(config).unwrap();

    assert_eq!(
        app.theory().configuration("propagate").as_deref(),
        Some("partial,1")
    );
}

#[test]
fn test_register_options() {
    let app = TestApplication::new("clingo-dl").unwrap();
    let mut options = RecordingOptions::new();

    app.register_options(&mut options).unwrap();

    assert!(options.contains("propagate"));
    assert!(options.contains("rdl"));
    assert_eq!(app.theory().events(), vec![TheoryEvent::OptionsRegistered]);
}

#[test]
fn test_validate_options() {
    let app = TestApplication::new("clingo-dl").unwrap();
    assert_eq!(app.validate_options(), Ok(()));

    app.configure("propagate", "inverse").unwrap();
    assert_eq!(app.validate_options(), Ok(()));

    app.configure("propagate", "sideways").unwrap();
    assert!(matches!(app.validate_options(), Err(MockError::Theory(_))));
}

#[test]
fn test_main_reads_stdin_then_grounds_and_solves() {
    let app = TestApplication::new("clingo-dl").unwrap();
    let mut native = MockControl::with_program(DL_PROGRAM).unwrap();

    app.main(&mut native, &[]).unwrap();

    assert_eq!(native.loaded(), &["-".to_string()]);
    assert_eq!(native.propagators(), &["clingodl".to_string()]);
    assert_eq!(native.grounded(), &[Symbol::id("a"), Symbol::id("b")]);
    assert_eq!(native.ground_calls(), 1);
    assert_eq!(native.solve_calls(), 1);
    assert_eq!(app.theory().count(is_model), 1);
}

#[test]
fn test_main_loads_files() {
    let path = std::env::temp_dir().join(format!("tefoli-app-{}.lp", std::process::id()));
    fs::write(&path, "c. d.").unwrap();
    let file = path.to_string_lossy().into_owned();

    let app = TestApplication::new("clingo-dl").unwrap();
    let mut native = MockControl::new();
    let result = app.main(&mut native, &[file.clone()]);
    fs::remove_file(&path).unwrap();

    result.unwrap();
    assert_eq!(native.loaded(), &[file]);
    assert_eq!(native.grounded(), &[Symbol::id("c"), Symbol::id("d")]);
}

#[test]
fn test_main_load_error_unchanged() {
    let app = TestApplication::new("clingo-dl").unwrap();
    let mut native = MockControl::new();
    let missing = "/nonexistent/program.lp".to_string();

    let err = app.main(&mut native, &[missing.clone()]).unwrap_err();

    assert_eq!(err, MockControl::new().load(&missing).unwrap_err());
    assert_eq!(native.solve_calls(), 0);
}

#[test]
fn test_main_hook_replaces_default() {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = TestApplication::new("clingo-dl").unwrap().with_main({
        let calls = Arc::clone(&calls);
        move |control| {
            calls.fetch_add(1, Ordering::SeqCst);
            assert!(control.is_adopted());
            control.ground(&[Part::new("step", Vec::new())])
        }
    });
    let mut native = MockControl::with_program(DL_PROGRAM).unwrap();
    native.add("step", &["t"], "s.").unwrap();

    app.main(&mut native, &[]).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(native.grounded(), &[Symbol::id("s")]);
    assert_eq!(native.solve_calls(), 0);
}

#[test]
fn test_custom_default_parts() {
    let config = ApplicationConfig::new().with_default_part("step");
    let app = TestApplication::from_config(config).unwrap();
    let mut native = MockControl::with_program(DL_PROGRAM).unwrap();
    native.add("step", &["t"], "s.").unwrap();

    app.main(&mut native, &[]).unwrap();

    assert_eq!(native.grounded().len(), 3);
}

#[test]
fn test_theory_shared_across_controls() {
    let app = TestApplication::new("clingo-dl").unwrap();
    let mut first = MockControl::with_program(DL_PROGRAM).unwrap();
    let mut second = MockControl::with_program(DL_PROGRAM).unwrap();

    app.main(&mut first, &[]).unwrap();
    app.main(&mut second, &[]).unwrap();

    assert_eq!(app.theory().count(|e| *e == TheoryEvent::Registered), 2);
    assert_eq!(app.theory().count(is_model), 2);
    assert_eq!(first.propagators().len(), 1);
    assert_eq!(second.propagators().len(), 1);
}
