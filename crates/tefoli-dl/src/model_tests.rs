//! Tests for ModelDl.

use super::*;
use std::collections::BTreeSet;
use tefoli_test::{MockControl, MockModel, MockTheory};

type TestModel<'m> = ModelDl<'m, MockControl, MockTheory>;

fn facts() -> Vec<Symbol> {
    vec![Symbol::id("a"), Symbol::id("b")]
}

fn dl_facts() -> Vec<Symbol> {
    vec![
        Symbol::function("dl", vec![Symbol::id("a"), Symbol::number(0)]),
        Symbol::function("dl", vec![Symbol::id("b"), Symbol::number(5)]),
    ]
}

/// A theory that already saw `model`, so its assignment is visible.
fn theory_for(model: &MockModel) -> Arc<MockTheory> {
    let theory = MockTheory::default().with_dl_assignment();
    theory.on_model(model).unwrap();
    Arc::new(theory)
}

fn set(symbols: Vec<Symbol>) -> BTreeSet<Symbol> {
    symbols.into_iter().collect()
}

#[test]
fn test_native_symbols_only() {
    let native = MockModel::new(facts(), 1, 0);
    let model = TestModel::new(&native, theory_for(&native));

    assert_eq!(set(model.symbols(ShowType::ATOMS).unwrap()), set(facts()));
}

#[test]
fn test_dl_symbols_only() {
    let native = MockModel::new(facts(), 1, 0);
    let model = TestModel::new(&native, theory_for(&native));

    assert_eq!(set(model.symbols(Selection::dl()).unwrap()), set(dl_facts()));
}

#[test]
fn test_dl_symbols_come_first() {
    let native = MockModel::new(facts(), 1, 0);
    let model = TestModel::new(&native, theory_for(&native));

    let symbols = model
        .symbols(Selection::from(ShowType::ATOMS).with_dl())
        .unwrap();

    let mut expected = dl_facts();
    expected.extend(facts());
    assert_eq!(symbols, expected);
}

#[test]
fn test_no_deduplication() {
    let native = MockModel::new(facts(), 1, 0);
    let theory = MockTheory::default()
        .with_value(Symbol::id("a"), 0)
        .with_value(Symbol::id("a"), 0);
    theory.on_model(&native).unwrap();
    let model = TestModel::new(&native, Arc::new(theory));

    assert_eq!(model.symbols(Selection::dl()).unwrap().len(), 2);
}

#[test]
fn test_assignment_of_own_thread() {
    let first = MockModel::new(facts(), 1, 0);
    let second = MockModel::new(facts(), 2, 1);
    let theory = theory_for(&first);

    let model = TestModel::new(&second, Arc::clone(&theory));
    assert!(model.symbols(Selection::dl()).unwrap().is_empty());

    let model = TestModel::new(&first, theory);
    assert_eq!(model.symbols(Selection::dl()).unwrap().len(), 2);
}

#[test]
fn test_native_trait_form_matches_native() {
    let native = MockModel::new(facts(), 3, 2).with_cost(vec![4, 1]);
    let model = TestModel::new(&native, theory_for(&native));

    for show in [ShowType::NONE, ShowType::ATOMS, ShowType::SHOWN | ShowType::TERMS] {
        assert_eq!(
            Model::symbols(&model, show).unwrap(),
            Model::symbols(&native, show).unwrap()
        );
    }
    assert_eq!(model.number(), native.number());
    assert_eq!(model.thread_id(), native.thread_id());
    assert_eq!(model.cost().unwrap(), native.cost().unwrap());
    assert_eq!(
        model.optimality_proven().unwrap(),
        native.optimality_proven().unwrap()
    );
    assert!(model.contains(&Symbol::id("a")).unwrap());
    assert!(!model.contains(&Symbol::id("c")).unwrap());
}

#[test]
fn test_wrapped_is_native_model() {
    let native = MockModel::new(facts(), 1, 0);
    let theory = theory_for(&native);
    let model = TestModel::new(&native, Arc::clone(&theory));

    assert!(std::ptr::eq(model.wrapped(), &native));
    assert!(std::ptr::eq(model.model(), &native));
    assert!(Arc::ptr_eq(model.theory(), &theory));
    assert!(Arc::ptr_eq(model.clone().theory(), &theory));
}
