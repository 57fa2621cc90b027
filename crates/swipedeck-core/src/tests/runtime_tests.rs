use super::*;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct CountingScheduler {
    requests: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn frame_callback_runs_once_with_frame_time() {
    let runtime = headless_runtime();
    let clock = runtime.frame_clock();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let _registration = {
        let seen = Rc::clone(&seen);
        clock.with_frame_nanos(move |time| seen.borrow_mut().push(time))
    };
    assert!(runtime.has_frame_callbacks());
    assert!(runtime.needs_frame());

    runtime.drain_frame_callbacks(42);
    runtime.drain_frame_callbacks(84);

    assert_eq!(seen.borrow().as_slice(), &[42]);
    assert!(!runtime.has_frame_callbacks());
    assert!(!runtime.needs_frame());
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = headless_runtime();
    let fired = Rc::new(Cell::new(false));

    let registration = {
        let fired = Rc::clone(&fired);
        runtime
            .frame_clock()
            .with_frame_nanos(move |_| fired.set(true))
    };
    drop(registration);
    runtime.drain_frame_callbacks(1);

    assert!(!fired.get());
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn explicit_cancel_removes_only_that_callback() {
    let runtime = headless_runtime();
    let clock = runtime.frame_clock();
    let fired = Rc::new(RefCell::new(Vec::new()));

    let first = {
        let fired = Rc::clone(&fired);
        clock.with_frame_nanos(move |_| fired.borrow_mut().push("first"))
    };
    let _second = {
        let fired = Rc::clone(&fired);
        clock.with_frame_nanos(move |_| fired.borrow_mut().push("second"))
    };
    first.cancel();
    runtime.drain_frame_callbacks(1);

    assert_eq!(fired.borrow().as_slice(), &["second"]);
}

#[test]
fn callbacks_registered_during_drain_wait_for_next_frame() {
    let runtime = headless_runtime();
    let handle = runtime.handle();
    let frames = Rc::new(RefCell::new(Vec::new()));
    let pending = Rc::new(RefCell::new(None));

    let _first = {
        let frames = Rc::clone(&frames);
        let pending_slot = Rc::clone(&pending);
        let clock = handle.frame_clock();
        clock.clone().with_frame_nanos(move |time| {
            frames.borrow_mut().push(time);
            let frames = Rc::clone(&frames);
            let next = clock.with_frame_nanos(move |time| frames.borrow_mut().push(time));
            pending_slot.borrow_mut().replace(next);
        })
    };

    runtime.drain_frame_callbacks(10);
    assert_eq!(frames.borrow().as_slice(), &[10]);
    assert!(runtime.has_frame_callbacks());

    runtime.drain_frame_callbacks(20);
    assert_eq!(frames.borrow().as_slice(), &[10, 20]);
}

#[test]
fn registration_after_runtime_drop_is_inactive() {
    let runtime = headless_runtime();
    let clock = runtime.frame_clock();
    drop(runtime);

    let registration = clock.with_frame_nanos(|_| {});
    assert!(!registration.is_active());
    assert!(!clock.runtime_handle().is_alive());
}

#[test]
fn with_frame_millis_converts_time() {
    let runtime = headless_runtime();
    let millis = Rc::new(Cell::new(0u64));
    let _registration = {
        let millis = Rc::clone(&millis);
        runtime
            .frame_clock()
            .with_frame_millis(move |time| millis.set(time))
    };
    runtime.drain_frame_callbacks(33_000_000);
    assert_eq!(millis.get(), 33);
}

#[test]
fn state_writes_bump_version_and_request_frame() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let state = MutableState::with_runtime(1.0f32, runtime.handle());
    let view = state.as_state();

    assert_eq!(view.version(), 0);
    state.set_value(2.0);
    state.update(|value| *value += 0.5);

    assert_eq!(view.get(), 2.5);
    assert_eq!(view.version(), 2);
    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 2);
    assert!(runtime.needs_frame());
}
