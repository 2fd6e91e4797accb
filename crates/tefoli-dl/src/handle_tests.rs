//! Tests for SolveHandleDl and SolveScope.

use super::*;
use std::collections::BTreeSet;
use std::sync::Mutex;

use tefoli_core::{Control, Part, ShowType, SolveMode, Symbol};
use tefoli_test::{MockControl, MockError, MockTheory, TheoryEvent, DL_PROGRAM};

use crate::{ControlDl, Selection, SolveCallbacksDl};

type TestControl = ControlDl<'static, MockControl, MockTheory>;
type TestHandle = SolveHandleDl<MockControl, MockTheory>;

fn grounded(native: MockControl) -> TestControl {
    let mut control = TestControl::builder().control(native).build().unwrap();
    control.ground(&[Part::base()]).unwrap();
    control
}

fn dl_control() -> TestControl {
    grounded(MockControl::with_program(DL_PROGRAM).unwrap())
}

fn solve(control: &mut TestControl, mode: SolveMode) -> TestHandle {
    control
        .solve(&[], SolveCallbacksDl::new(), mode)
        .unwrap()
        .into_handle()
        .unwrap()
}

fn set(symbols: Vec<Symbol>) -> BTreeSet<Symbol> {
    symbols.into_iter().collect()
}

fn facts() -> BTreeSet<Symbol> {
    set(vec![Symbol::id("a"), Symbol::id("b")])
}

fn dl_facts() -> BTreeSet<Symbol> {
    set(vec![
        Symbol::function("dl", vec![Symbol::id("a"), Symbol::number(0)]),
        Symbol::function("dl", vec![Symbol::id("b"), Symbol::number(5)]),
    ])
}

#[test]
fn test_solve_yield() {
    let mut control = dl_control();
    let mut handle = solve(&mut control, SolveMode::YIELD);

    let mut models = 0;
    let mut scope = handle.scope().unwrap();
    while let Some(model) = scope.next_model().unwrap() {
        models += 1;
        assert_eq!(set(model.symbols(ShowType::ATOMS).unwrap()), facts());
        assert_eq!(set(model.symbols(Selection::dl()).unwrap()), dl_facts());
        let both = model
            .symbols(Selection::from(ShowType::ATOMS).with_dl())
            .unwrap();
        assert_eq!(set(both).len(), 4);
    }
    drop(scope);

    assert_eq!(models, 1);
    assert_eq!(handle.state(), ScopeState::Closed);
    assert_eq!(handle.handle().enters(), 1);
    assert_eq!(handle.handle().exits(), 1);
}

#[test]
fn test_async_returns_handle() {
    let mut control = dl_control();
    let mut handle = solve(&mut control, SolveMode::ASYNC);

    assert!(handle.wait(None));
    assert!(handle.get().unwrap().is_satisfiable());
}

#[test]
fn test_every_streamed_model_is_wrapped() {
    let mut control = grounded(
        MockControl::with_program(DL_PROGRAM)
            .unwrap()
            .with_threads(3),
    );
    let mut handle = solve(&mut control, SolveMode::YIELD);

    let mut threads = Vec::new();
    while let Some(model) = handle.next_model().unwrap() {
        assert_eq!(set(model.symbols(Selection::dl()).unwrap()), dl_facts());
        assert!(Arc::ptr_eq(model.theory(), control.theory()));
        threads.push(model.thread_id());
    }

    assert_eq!(threads, vec![0, 1, 2]);
    assert_eq!(control.theory().count(|e| matches!(e, TheoryEvent::Model { .. })), 3);
    assert_eq!(control.theory().count(|e| *e == TheoryEvent::Statistics), 1);
}

#[test]
fn test_end_of_stream_is_sticky() {
    let mut control = dl_control();
    let mut handle = solve(&mut control, SolveMode::YIELD);

    assert!(handle.next_model().unwrap().is_some());
    assert!(handle.next_model().unwrap().is_none());
    assert!(handle.is_exhausted());
    let advances = handle.handle().advances();

    assert!(handle.next_model().unwrap().is_none());
    assert!(handle.next_model().unwrap().is_none());
    assert_eq!(handle.handle().advances(), advances);
}

#[test]
fn test_state_transitions() {
    let mut control = dl_control();

    let mut handle = solve(&mut control, SolveMode::YIELD);
    assert_eq!(handle.state(), ScopeState::Idle);
    handle.next_model().unwrap();
    assert_eq!(handle.state(), ScopeState::Active);
    handle.exit().unwrap();
    assert_eq!(handle.state(), ScopeState::Closed);

    let mut handle = solve(&mut control, SolveMode::YIELD);
    handle.enter().unwrap();
    assert_eq!(handle.state(), ScopeState::Active);
    assert_eq!(handle.handle().enters(), 1);
}

#[test]
fn test_exit_error_still_closes() {
    let mut control = grounded(
        MockControl::with_program(DL_PROGRAM)
            .unwrap()
            .with_failing_exit(),
    );
    let mut handle = solve(&mut control, SolveMode::YIELD);
    handle.enter().unwrap();

    let err = handle.exit().unwrap_err();

    assert_eq!(err, MockError::Native("exit failed".into()));
    assert_eq!(handle.state(), ScopeState::Closed);
}

#[test]
fn test_scope_close_reports_error() {
    let mut control = grounded(
        MockControl::with_program(DL_PROGRAM)
            .unwrap()
            .with_failing_exit(),
    );
    let mut handle = solve(&mut control, SolveMode::YIELD);

    let scope = handle.scope().unwrap();
    assert!(scope.close().is_err());

    assert_eq!(handle.state(), ScopeState::Closed);
    assert_eq!(handle.handle().exits(), 1);
}

#[test]
fn test_scope_drop_loses_exit_error() {
    let mut control = grounded(
        MockControl::with_program(DL_PROGRAM)
            .unwrap()
            .with_failing_exit(),
    );
    let mut handle = solve(&mut control, SolveMode::YIELD);

    {
        let mut scope = handle.scope().unwrap();
        assert!(scope.next_model().unwrap().is_some());
    }

    assert_eq!(handle.state(), ScopeState::Closed);
    assert_eq!(handle.handle().exits(), 1);
}

#[test]
fn test_scoped_runs_body_and_exits() {
    let mut control = dl_control();
    let mut handle = solve(&mut control, SolveMode::YIELD);

    let models = handle
        .scoped(|handle| {
            let mut models = Vec::new();
            while let Some(model) = handle.next_model()? {
                models.push(set(model.symbols(Selection::dl())?));
            }
            Ok(models)
        })
        .unwrap();

    assert_eq!(models, vec![dl_facts()]);
    assert_eq!(handle.state(), ScopeState::Closed);
    assert_eq!(handle.handle().enters(), 1);
    assert_eq!(handle.handle().exits(), 1);
}

#[test]
fn test_scoped_early_return_reports_exit_error() {
    let mut control = grounded(
        MockControl::with_program(DL_PROGRAM)
            .unwrap()
            .with_failing_exit(),
    );
    let mut handle = solve(&mut control, SolveMode::YIELD);

    let result = handle.scoped(|handle| {
        let first = handle.next_model()?;
        assert!(first.is_some());
        Ok(())
    });

    assert_eq!(result, Err(MockError::Native("exit failed".into())));
    assert_eq!(handle.state(), ScopeState::Closed);
    assert_eq!(handle.handle().exits(), 1);
}

#[test]
fn test_scoped_body_error_wins() {
    let mut control = grounded(
        MockControl::with_program(DL_PROGRAM)
            .unwrap()
            .with_failing_exit(),
    );
    let mut handle = solve(&mut control, SolveMode::YIELD);

    let result: Result<(), MockError> =
        handle.scoped(|_| Err(MockError::Theory("body failed".into())));

    assert_eq!(result, Err(MockError::Theory("body failed".into())));
    assert_eq!(handle.handle().exits(), 1);
}

#[test]
fn test_scoped_body_exit_not_repeated() {
    let mut control = dl_control();
    let mut handle = solve(&mut control, SolveMode::YIELD);

    handle.scoped(|handle| handle.exit()).unwrap();

    assert_eq!(handle.handle().exits(), 1);
}

#[test]
fn test_closed_handle_yields_nothing() {
    let mut control = dl_control();
    let mut handle = solve(&mut control, SolveMode::YIELD);

    handle.exit().unwrap();

    assert!(handle.next_model().unwrap().is_none());
    assert_eq!(handle.handle().advances(), 0);
    assert_eq!(handle.state(), ScopeState::Closed);
}

#[test]
fn test_streamed_callback_sees_hook_and_dl_values() {
    let mut control = dl_control();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let callbacks = SolveCallbacksDl::<MockControl, MockTheory>::new().on_model({
        let seen = Arc::clone(&seen);
        move |model| {
            let hooked = model
                .theory()
                .count(|e| matches!(e, TheoryEvent::Model { .. }));
            let dl = model.symbols(Selection::dl())?;
            seen.lock().unwrap().push((hooked, dl.len()));
            Ok(true)
        }
    });
    let mut handle = control
        .solve(&[], callbacks, SolveMode::YIELD)
        .unwrap()
        .into_handle()
        .unwrap();
    handle
        .scoped(|handle| {
            while handle.next_model()?.is_some() {}
            Ok(())
        })
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![(1, 2)]);
}

#[test]
fn test_scope_exits_once() {
    let mut control = dl_control();
    let mut handle = solve(&mut control, SolveMode::YIELD);

    {
        let mut scope = handle.scope().unwrap();
        scope.exit().unwrap();
    }

    assert_eq!(handle.handle().exits(), 1);
}

#[test]
fn test_pass_through_matches_native() {
    let mut control = dl_control();
    let mut handle = solve(&mut control, SolveMode::YIELD);

    let mut native = MockControl::with_program(DL_PROGRAM).unwrap();
    native.ground(&[Part::base()]).unwrap();
    let mut native_handle = native
        .solve(&[], Default::default(), SolveMode::YIELD)
        .unwrap()
        .into_handle()
        .unwrap();

    assert_eq!(handle.resume(), native_handle.resume());
    assert_eq!(handle.wait(None), native_handle.wait(None));
    assert_eq!(handle.get(), native_handle.get());
}

#[test]
fn test_cancel_forwarded() {
    let mut control = dl_control();
    let mut handle = solve(&mut control, SolveMode::YIELD);

    handle.cancel().unwrap();

    assert!(handle.handle().is_cancelled());
    assert!(handle.next_model().unwrap().is_none());
    assert!(handle.get().unwrap().interrupted);
}

#[test]
fn test_wrapped_is_native_handle() {
    let mut control = dl_control();
    let handle = solve(&mut control, SolveMode::YIELD);

    assert!(std::ptr::eq(handle.wrapped(), handle.handle()));
    assert!(Arc::ptr_eq(handle.theory(), control.theory()));
}
