//! Deterministic single-threaded host.
//!
//! `SimHost` stands in for the browser: file reads and timers are queued on a
//! virtual millisecond clock and only run when the caller advances it. Work
//! due at the same instant runs in the order it was scheduled.

use std::cell::{Cell, RefCell};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data_url;
use crate::landing::Host;

/// A file as the simulated picker hands it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    fail_read: bool,
}

impl SimFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
            fail_read: false,
        }
    }

    /// A file whose read always fails (permissions revoked, file removed, ...).
    pub fn unreadable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime: String::new(),
            bytes: Vec::new(),
            fail_read: true,
        }
    }
}

/// Field values of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Default)]
pub struct SimSubmitEvent {
    default_prevented: Cell<bool>,
}

impl SimSubmitEvent {
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Observable side effects, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SimEvent {
    Notice(String),
    ResultReplaced { at_ms: u64 },
    DefaultPrevented,
    FormReset,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimStats {
    pub reads_started: u32,
    pub reads_completed: u32,
    pub reads_failed: u32,
    pub timers_scheduled: u32,
    pub timers_fired: u32,
}

enum TaskKind {
    Read {
        file: SimFile,
        on_load: Box<dyn FnOnce(String)>,
    },
    Timer(Box<dyn FnOnce()>),
}

struct Task {
    due_ms: u64,
    seq: u64,
    kind: TaskKind,
}

#[derive(Default)]
struct SimState {
    now_ms: u64,
    read_latency_ms: u64,
    next_seq: u64,
    tasks: Vec<Task>,
    result_html: String,
    form: ContactForm,
    events: Vec<SimEvent>,
    stats: SimStats,
}

impl SimState {
    fn push(&mut self, delay_ms: u64, kind: TaskKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(Task {
            due_ms: self.now_ms + delay_ms,
            seq,
            kind,
        });
    }

    /// Removes the earliest task due at or before `until_ms`.
    fn pop_due(&mut self, until_ms: u64) -> Option<Task> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i)?;
        Some(self.tasks.swap_remove(idx))
    }
}

#[derive(Default)]
pub struct SimHost {
    state: RefCell<SimState>,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time between starting a read and its completion callback.
    pub fn set_read_latency_ms(&self, ms: u64) {
        self.state.borrow_mut().read_latency_ms = ms;
    }

    /// Static markup present at page load. Not recorded as an event.
    pub fn set_initial_result_html(&self, html: &str) {
        self.state.borrow_mut().result_html = html.to_string();
    }

    pub fn set_form(&self, form: ContactForm) {
        self.state.borrow_mut().form = form;
    }

    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    pub fn result_html(&self) -> String {
        self.state.borrow().result_html.clone()
    }

    pub fn form(&self) -> ContactForm {
        self.state.borrow().form.clone()
    }

    pub fn events(&self) -> Vec<SimEvent> {
        self.state.borrow().events.clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                SimEvent::Notice(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn stats(&self) -> SimStats {
        self.state.borrow().stats
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    /// Moves the clock forward by `ms`, running every read and timer that
    /// comes due, including ones scheduled along the way.
    pub fn advance(&self, ms: u64) {
        let until = self.now_ms() + ms;
        self.run_until(until);
        self.state.borrow_mut().now_ms = until;
    }

    /// Runs queued work until nothing is left. Returns the final clock value.
    pub fn run_until_idle(&self) -> u64 {
        self.run_until(u64::MAX);
        self.now_ms()
    }

    fn run_until(&self, until_ms: u64) {
        loop {
            // The borrow must end before the task runs: callbacks re-enter the host.
            let task = {
                let mut st = self.state.borrow_mut();
                let Some(task) = st.pop_due(until_ms) else {
                    break;
                };
                st.now_ms = st.now_ms.max(task.due_ms);
                task
            };
            self.run_task(task.kind);
        }
    }

    fn run_task(&self, kind: TaskKind) {
        match kind {
            TaskKind::Read { file, on_load } => {
                if file.fail_read {
                    warn!(file = %file.name, "simulated read failed");
                    self.state.borrow_mut().stats.reads_failed += 1;
                    return;
                }
                let url = data_url::encode(&file.mime, &file.bytes);
                self.state.borrow_mut().stats.reads_completed += 1;
                on_load(url);
            }
            TaskKind::Timer(callback) => {
                self.state.borrow_mut().stats.timers_fired += 1;
                callback();
            }
        }
    }
}

impl Host for SimHost {
    type File = SimFile;
    type SubmitEvent = SimSubmitEvent;

    fn alert(&self, message: &str) {
        debug!(notice = message, "alert shown");
        self.state
            .borrow_mut()
            .events
            .push(SimEvent::Notice(message.to_string()));
    }

    fn read_as_data_url(&self, file: SimFile, on_load: Box<dyn FnOnce(String)>) {
        let mut st = self.state.borrow_mut();
        st.stats.reads_started += 1;
        let latency = st.read_latency_ms;
        st.push(latency, TaskKind::Read { file, on_load });
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let mut st = self.state.borrow_mut();
        st.stats.timers_scheduled += 1;
        st.push(u64::from(delay_ms), TaskKind::Timer(callback));
    }

    fn set_result_html(&self, html: &str) {
        let mut st = self.state.borrow_mut();
        st.result_html = html.to_string();
        let at_ms = st.now_ms;
        st.events.push(SimEvent::ResultReplaced { at_ms });
    }

    fn prevent_default(&self, event: &SimSubmitEvent) {
        event.default_prevented.set(true);
        self.state.borrow_mut().events.push(SimEvent::DefaultPrevented);
    }

    fn reset_contact_form(&self) {
        let mut st = self.state.borrow_mut();
        st.form = ContactForm::default();
        st.events.push(SimEvent::FormReset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn same_instant_work_runs_in_schedule_order() {
        let host = Rc::new(SimHost::new());
        let order = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let order = Rc::clone(&order);
            host.set_timeout(10, Box::new(move || order.borrow_mut().push(i)));
        }
        host.advance(10);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        assert_eq!(host.pending(), 0);
    }

    #[test]
    fn callbacks_can_schedule_more_work_within_one_advance() {
        let host = Rc::new(SimHost::new());
        let fired_at = Rc::new(Cell::new(0u64));
        {
            let inner_host = Rc::clone(&host);
            let fired_at = Rc::clone(&fired_at);
            host.set_timeout(
                100,
                Box::new(move || {
                    let probe = Rc::clone(&inner_host);
                    inner_host.set_timeout(
                        50,
                        Box::new(move || fired_at.set(probe.now_ms())),
                    );
                }),
            );
        }
        host.advance(149);
        assert_eq!(fired_at.get(), 0);
        host.advance(1);
        assert_eq!(fired_at.get(), 150);
        assert_eq!(host.stats().timers_fired, 2);
    }

    #[test]
    fn read_delivers_data_uri_of_file() {
        let host = SimHost::new();
        let got = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&got);
        host.read_as_data_url(
            SimFile::new("a.png", "image/png", b"abc".to_vec()),
            Box::new(move |url| *sink.borrow_mut() = Some(url)),
        );
        assert!(got.borrow().is_none());
        host.run_until_idle();
        assert_eq!(got.borrow().as_deref(), Some("data:image/png;base64,YWJj"));
    }

    #[test]
    fn run_until_idle_reports_last_due_time() {
        let host = SimHost::new();
        host.set_timeout(2000, Box::new(|| {}));
        host.set_timeout(300, Box::new(|| {}));
        assert_eq!(host.run_until_idle(), 2000);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn events_serialize_for_snapshots() {
        let host = SimHost::new();
        host.alert("hi");
        host.set_result_html("<p>x</p>");
        let json = serde_json::to_string(&host.events()).expect("json");
        assert_eq!(
            json,
            r#"[{"Notice":"hi"},{"ResultReplaced":{"at_ms":0}}]"#
        );
    }
}
