use assert_call::{call, CallRecorder};
use rstest::rstest;

use super::*;
use crate::CartView;

fn item(id: i64, name: &str) -> Item {
    Item::new(id, name)
}

fn store_of(items: &[(i64, &str)]) -> CartStore {
    let store = CartStore::new();
    for &(id, name) in items {
        store.add(item(id, name));
    }
    store
}

fn ids(store: &CartStore) -> Vec<i64> {
    store.items().iter().map(|item| item.id().0).collect()
}

#[test]
fn new_is_empty() {
    let store = CartStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.items().is_empty());
}

#[rstest]
#[case(&[])]
#[case(&[(1, "Top")])]
#[case(&[(1, "Top"), (3, "Rings"), (1, "Top")])]
fn add_appends(#[case] initial: &[(i64, &str)]) {
    let store = store_of(initial);
    let mut expected = store.snapshot();
    store.add(item(2, "Dress"));
    expected.push(item(2, "Dress"));
    assert_eq!(store.snapshot(), expected);
    assert_eq!(store.len(), initial.len() + 1);
}

#[rstest]
#[case(&[(1, "Top"), (2, "Dress"), (3, "Rings")], 2, vec![1, 3])]
#[case(&[(1, "Top"), (2, "Dress"), (1, "Top"), (3, "Rings"), (1, "Top")], 1, vec![2, 3])]
#[case(&[(3, "Rings"), (2, "Dress"), (3, "Rings")], 3, vec![2])]
#[case(&[(1, "Top")], 1, vec![])]
fn remove_is_exhaustive(
    #[case] initial: &[(i64, &str)],
    #[case] id: i64,
    #[case] expected: Vec<i64>,
) {
    let store = store_of(initial);
    store.remove(ItemId(id));
    assert_eq!(ids(&store), expected);
}

#[rstest]
#[case(&[])]
#[case(&[(1, "Top"), (2, "Dress")])]
fn remove_absent_is_noop(#[case] initial: &[(i64, &str)]) {
    let store = store_of(initial);
    let before = store.snapshot();
    store.remove(ItemId(42));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn duplicate_add_then_remove() {
    let store = CartStore::new();
    store.add(item(1, "Top"));
    store.add(item(1, "Top"));
    assert_eq!(store.len(), 2);
    store.remove(ItemId(1));
    assert!(store.is_empty());
}

#[test]
fn read_is_idempotent() {
    let store = store_of(&[(1, "Top"), (2, "Dress")]);
    let a = store.snapshot();
    let b = store.snapshot();
    assert_eq!(a, b);
    assert_eq!(&*store.items(), a.as_slice());
}

#[test]
fn subscriber_is_notified_synchronously() {
    let mut cr = CallRecorder::new();
    let store = CartStore::new();
    let _s = store.subscribe(|_, change| call!("{change}"));
    cr.verify(());

    store.add(item(1, "Top"));
    cr.verify("added 1 Top at 0");

    store.add(item(2, "Dress"));
    cr.verify("added 2 Dress at 1");

    store.remove(ItemId(1));
    cr.verify("removed 1 of 1");
}

#[test]
fn remove_absent_still_notifies() {
    let mut cr = CallRecorder::new();
    let store = CartStore::new();
    let _s = store.subscribe(|_, change| call!("{change}"));
    store.remove(ItemId(5));
    cr.verify("removed 0 of 5");
}

#[test]
fn subscriber_sees_new_state() {
    let mut cr = CallRecorder::new();
    let store = CartStore::new();
    let _s = store.subscribe(|store, _| call!("{:?}", ids(store)));
    store.add(item(1, "Top"));
    store.add(item(2, "Dress"));
    store.remove(ItemId(1));
    cr.verify(["[1]", "[1, 2]", "[2]"]);
}

#[test]
fn subscribers_are_called_in_registration_order() {
    let mut cr = CallRecorder::new();
    let store = CartStore::new();
    let _a = store.subscribe(|_, _| call!("a"));
    let _b = store.subscribe(|_, _| call!("b"));
    store.add(item(1, "Top"));
    cr.verify(["a", "b"]);
}

#[test]
fn drop_subscription_unsubscribes() {
    let mut cr = CallRecorder::new();
    let store = CartStore::new();
    let s = store.subscribe(|_, _| call!("notified"));
    store.add(item(1, "Top"));
    cr.verify("notified");

    drop(s);
    store.add(item(2, "Dress"));
    cr.verify(());
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn subscription_outlives_store() {
    let store = CartStore::new();
    let s = store.subscribe(|_, _| {});
    drop(store);
    drop(s);
}

#[test]
fn subscriber_added_during_notify_waits_for_next_change() {
    let mut cr = CallRecorder::new();
    let store = CartStore::new();
    let late = Rc::new(RefCell::new(Vec::new()));
    let late0 = late.clone();
    let _s = store.subscribe(move |store, _| {
        if late0.borrow().is_empty() {
            late0
                .borrow_mut()
                .push(store.subscribe(|_, change| call!("late {change}")));
        }
        call!("early");
    });

    store.add(item(1, "Top"));
    cr.verify("early");

    store.add(item(2, "Dress"));
    cr.verify(["early", "late added 2 Dress at 1"]);
}

#[test]
fn new_subscriber_reuses_dropped_slot() {
    let mut cr = CallRecorder::new();
    let store = CartStore::new();
    let a = store.subscribe(|_, _| call!("a"));
    let _b = store.subscribe(|_, _| call!("b"));
    drop(a);
    let _c = store.subscribe(|_, _| call!("c"));
    store.add(item(1, "Top"));
    cr.verify(["c", "b"]);
}

#[test]
fn reentrant_change_is_delivered_before_remaining_subscribers() {
    let mut cr = CallRecorder::new();
    let store = CartStore::new();
    let b: Rc<RefCell<Option<Subscription>>> = Default::default();
    let b0 = b.clone();
    let _a = store.subscribe(move |store, change| {
        call!("a {change}");
        if let CartChange::Added { item, .. } = change {
            drop(b0.borrow_mut().take());
            store.remove(item.id());
        }
    });
    *b.borrow_mut() = Some(store.subscribe(|_, change| call!("b {change}")));
    let view = CartView::new(store.clone());

    store.add(item(1, "Top"));
    // `b` was dropped by `a` but still sees the change that was in flight.
    cr.verify(["a added 1 Top at 0", "a removed 1 of 1", "b added 1 Top at 0"]);
    assert!(view.rows().is_empty());
    assert!(store.is_empty());
    assert_eq!(store.subscriber_count(), 2);

    store.add(item(2, "Dress"));
    cr.verify(["a added 2 Dress at 0", "a removed 1 of 2"]);
}

#[test]
fn clone_shares_items() {
    let a = CartStore::new();
    let b = a.clone();
    a.add(item(1, "Top"));
    assert_eq!(b.snapshot(), vec![item(1, "Top")]);
    assert!(CartStore::ptr_eq(&a, &b));
    assert!(!CartStore::ptr_eq(&a, &CartStore::new()));
}

#[test]
fn debug() {
    let store = store_of(&[(1, "Top")]);
    assert_eq!(format!("{store:?}"), format!("{:?}", vec![item(1, "Top")]));
}

#[test]
fn serialize() {
    let store = store_of(&[(1, "Top"), (2, "Dress")]);
    let json = serde_json::to_value(&store).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "id": 1, "name": "Top" }, { "id": 2, "name": "Dress" }])
    );
}
