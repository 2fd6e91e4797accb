//! Integration tests for solving with the difference logic wrappers.
//!
//! These tests drive the public facade end to end over the in-memory solver.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tefoli::prelude::*;
use tefoli_test::{MockControl, MockTheory, TheoryEvent, DL_PROGRAM};

type DlControl<'a> = ControlDl<'a, MockControl, MockTheory>;

fn symbols(model: &ModelDl<'_, MockControl, MockTheory>, selection: Selection) -> BTreeSet<String> {
    model
        .symbols(selection)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn names(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn yielded_models_carry_dl_values() {
    tefoli::logging::init();
    let mut control = DlControl::new(&[]).unwrap();
    control.add("base", &[], DL_PROGRAM).unwrap();
    control.ground(&[Part::base()]).unwrap();

    let mut handle = control
        .solve(&[], SolveCallbacksDl::new(), SolveMode::YIELD)
        .unwrap()
        .into_handle()
        .unwrap();
    let mut scope = handle.scope().unwrap();
    let mut models = 0;
    while let Some(model) = scope.next_model().unwrap() {
        models += 1;
        assert_eq!(symbols(&model, ShowType::ATOMS.into()), names(&["a", "b"]));
        assert_eq!(symbols(&model, Selection::dl()), names(&["dl(a,0)", "dl(b,5)"]));
        assert_eq!(
            symbols(&model, Selection::from(ShowType::ATOMS).with_dl()),
            names(&["a", "b", "dl(a,0)", "dl(b,5)"])
        );
    }
    scope.close().unwrap();

    assert_eq!(models, 1);
}

#[test]
fn callbacks_see_dl_values() {
    let mut native = MockControl::with_program(DL_PROGRAM).unwrap();
    let mut control = DlControl::builder().adopt(&mut native).build().unwrap();
    control.ground(&[Part::base()]).unwrap();
    let models = Arc::new(AtomicUsize::new(0));

    let callbacks = SolveCallbacksDl::<MockControl, MockTheory>::new().on_model({
        let models = Arc::clone(&models);
        move |model| {
            models.fetch_add(1, Ordering::SeqCst);
            assert_eq!(symbols(model, Selection::dl()), names(&["dl(a,0)", "dl(b,5)"]));
            Ok(true)
        }
    });
    let outcome = control.solve(&[], callbacks, SolveMode::BLOCKING).unwrap();

    assert!(outcome.result().unwrap().is_satisfiable());
    assert_eq!(models.load(Ordering::SeqCst), 1);
    drop(control);
    assert_eq!(native.propagators(), &["clingodl".to_string()]);
}

#[test]
fn application_runs_default_main() {
    let app = ApplicationDl::<MockControl, MockTheory>::new("clingo-dl").unwrap();
    let mut native = MockControl::with_program(DL_PROGRAM).unwrap();

    assert_eq!(app.validate_options(), Ok(()));
    app.main(&mut native, &[]).unwrap();

    let events = app.theory().events();
    assert_eq!(events.first(), Some(&TheoryEvent::OptionsValidated));
    assert!(events.contains(&TheoryEvent::Prepared));
    assert_eq!(native.solve_calls(), 1);
}

#[test]
fn application_from_toml() {
    let config = ApplicationConfig::from_toml_str(
        r#"
        program_name = "clingo-dl"

        [theory.propagate]
        mode = "partial+"
        degree = 3
    "#,
    )
    .unwrap();
    let app = ApplicationDl::<MockControl, MockTheory>::from_config(config).unwrap();

    assert_eq!(app.program_name(), "clingo-dl");
    assert_eq!(
        app.theory().configuration("propagate").as_deref(),
        Some("partial+,3")
    );
    assert_eq!(app.validate_options(), Ok(()));
}
