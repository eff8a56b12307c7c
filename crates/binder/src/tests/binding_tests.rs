use std::cell::{Cell, RefCell};

use super::*;
use crate::behind::Dispose;

type ReleaseLog = Rc<RefCell<Vec<&'static str>>>;

struct Panel {
    tag: &'static str,
    log: ReleaseLog,
}

struct TrackedLogic {
    front: Rc<Panel>,
}

impl Behind for TrackedLogic {
    type Front = Panel;

    fn new(front: Rc<Panel>) -> anyhow::Result<Self> {
        Ok(Self { front })
    }

    fn dispose_hook() -> Option<fn(&mut Self)> {
        Some(Self::dispose)
    }
}

impl Dispose for TrackedLogic {
    fn dispose(&mut self) {
        self.front.log.borrow_mut().push(self.front.tag);
    }
}

/// Carries state that changes after it is bound.
struct ShyLogic {
    front: Rc<Panel>,
    touched: Cell<bool>,
}

impl Behind for ShyLogic {
    type Front = Panel;

    fn new(front: Rc<Panel>) -> anyhow::Result<Self> {
        Ok(Self {
            front,
            touched: Cell::new(false),
        })
    }

    fn dispose_hook() -> Option<fn(&mut Self)> {
        Some(Self::dispose)
    }
}

impl Dispose for ShyLogic {
    fn dispose(&mut self) {
        self.front.log.borrow_mut().push(self.front.tag);
    }
}

struct PlainLogic;

impl Behind for PlainLogic {
    type Front = Panel;

    fn new(_front: Rc<Panel>) -> anyhow::Result<Self> {
        Ok(Self)
    }
}

fn panel(tag: &'static str, log: &ReleaseLog) -> Panel {
    Panel {
        tag,
        log: Rc::clone(log),
    }
}

fn bind<B: Behind>(front: B::Front) -> BindingHandle {
    let front_type = TypeKey::of::<B::Front>();
    let entry = RegistryEntry {
        front: front_type,
        behind: TypeKey::of::<B>(),
        parameter: front_type,
    };
    let front: Rc<dyn Any> = Rc::new(front);
    let live = construct::<B>(front, front_type).expect("construct");
    BindingHandle::new(&entry, "tests::Window", live)
}

#[test]
fn dispose_releases_exactly_once() {
    let log = ReleaseLog::default();
    let mut handle = bind::<TrackedLogic>(panel("main", &log));
    assert_eq!(handle.status(), BindingStatus::Live);
    assert!(handle.is_disposable());

    handle.dispose();
    handle.dispose();
    assert_eq!(handle.status(), BindingStatus::Disposed);
    drop(handle);

    assert_eq!(*log.borrow(), vec!["main"]);
}

#[test]
fn release_hook_chosen_at_bind_time_runs_on_dispose() {
    let log = ReleaseLog::default();
    let mut handle = bind::<ShyLogic>(panel("shy", &log));
    assert!(handle.is_disposable());

    handle
        .behind::<ShyLogic>()
        .expect("live behind")
        .touched
        .set(true);
    assert!(handle.is_disposable());

    handle.dispose();
    handle.dispose();
    assert_eq!(*log.borrow(), vec!["shy"]);
}

#[test]
fn dispose_without_release_capability_is_a_no_op() {
    let log = ReleaseLog::default();
    let mut handle = bind::<PlainLogic>(panel("plain", &log));
    assert!(!handle.is_disposable());

    handle.dispose();
    handle.dispose();
    assert!(handle.is_disposed());
    assert!(log.borrow().is_empty());
}

#[test]
fn dropping_a_live_handle_disposes_it() {
    let log = ReleaseLog::default();
    drop(bind::<TrackedLogic>(panel("dropped", &log)));
    assert_eq!(*log.borrow(), vec!["dropped"]);
}

#[test]
fn behind_is_reachable_only_while_live() {
    let log = ReleaseLog::default();
    let mut handle = bind::<TrackedLogic>(panel("peek", &log));

    let logic = handle.behind::<TrackedLogic>().expect("live behind");
    assert_eq!(logic.front.tag, "peek");
    assert!(handle.behind::<PlainLogic>().is_none());

    handle.dispose();
    assert!(handle.behind::<TrackedLogic>().is_none());
}

#[test]
fn handle_reports_types_and_owner() {
    let log = ReleaseLog::default();
    let handle = bind::<PlainLogic>(panel("types", &log));
    assert_eq!(handle.front_type(), TypeKey::of::<Panel>());
    assert_eq!(handle.behind_type(), TypeKey::of::<PlainLogic>());
    assert_eq!(handle.owner_type(), "tests::Window");
    assert!(format!("{handle:?}").contains("Live"));
}

#[test]
fn construct_rejects_front_of_another_type() {
    let front: Rc<dyn Any> = Rc::new(String::from("not a panel"));
    let err = construct::<PlainLogic>(front, TypeKey::of::<String>())
        .err()
        .expect("incompatible front");
    match err {
        BindError::IncompatibleConstructor {
            front,
            behind,
            expected,
        } => {
            assert_eq!(front, TypeKey::of::<String>());
            assert_eq!(behind, TypeKey::of::<PlainLogic>());
            assert_eq!(expected, TypeKey::of::<Panel>());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn binding_set_disposes_newest_first() {
    let log = ReleaseLog::default();
    let mut set = BindingSet::new();
    set.insert(bind::<TrackedLogic>(panel("first", &log)));
    set.insert(bind::<PlainLogic>(panel("plain", &log)));
    set.insert(bind::<TrackedLogic>(panel("second", &log)));
    assert_eq!(set.len(), 3);
    assert_eq!(set.live_count(), 3);

    assert_eq!(set.dispose_all(), 3);
    assert!(set.is_empty());
    assert_eq!(*log.borrow(), vec!["second", "first"]);
    assert_eq!(set.dispose_all(), 0);
}

#[test]
fn binding_set_skips_handles_already_disposed() {
    let log = ReleaseLog::default();
    let mut set = BindingSet::new();
    set.insert(bind::<TrackedLogic>(panel("early", &log)));
    set.insert(bind::<TrackedLogic>(panel("late", &log)));

    if let Some(handle) = set.iter_mut().next() {
        handle.dispose();
    }
    assert_eq!(set.live_count(), 1);

    drop(set);
    assert_eq!(*log.borrow(), vec!["early", "late"]);
}
