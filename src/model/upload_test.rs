use super::*;
use futures::executor::block_on;
use futures::StreamExt;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct FakeSink {
    failing: Vec<&'static str>,
    sent: Arc<Mutex<Vec<PathBuf>>>,
}

impl PdfSink for FakeSink {
    fn send(&self, path: PathBuf) -> impl Future<Output = Result<(), ApiError>> + Send {
        let fails = self
            .failing
            .iter()
            .any(|name| path.ends_with(name));
        self.sent.lock().unwrap().push(path.clone());
        async move {
            if fails {
                Err(ApiError::Status {
                    status: 500,
                    url: "http://localhost:5678/webhook/pdf-upload".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }
}

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|name| PathBuf::from("/tmp/reports").join(name)).collect()
}

fn run(queue: &mut UploadQueue, sink: FakeSink) -> Vec<UploadEvent> {
    let jobs = queue.start();
    let events: Vec<UploadEvent> = block_on(upload_events(sink, jobs).collect());
    for event in &events {
        queue.apply(*event);
    }
    events
}

#[test]
fn new_selection_starts_pending() {
    let mut queue = UploadQueue::default();
    queue.replace(paths(&["a.pdf", "b.PDF", "notes.txt"]));
    assert_eq!(
        queue.items().iter().map(|item| item.name.as_str()).collect::<Vec<_>>(),
        vec!["a.pdf", "b.PDF"]
    );
    assert_eq!(queue.statuses(), vec![UploadStatus::Pending; 2]);
    assert!(queue.can_send());
}

#[test]
fn empty_queue_cannot_send() {
    let queue = UploadQueue::default();
    assert!(!queue.can_send());
}

#[test]
fn failure_in_the_middle_does_not_stop_the_batch() {
    let mut queue = UploadQueue::default();
    queue.replace(paths(&["1.pdf", "2.pdf", "3.pdf"]));
    let sink = FakeSink {
        failing: vec!["2.pdf"],
        ..FakeSink::default()
    };

    let events = run(&mut queue, sink.clone());

    assert_eq!(
        queue.statuses(),
        vec![UploadStatus::Success, UploadStatus::Error, UploadStatus::Success]
    );
    assert_eq!(sink.sent.lock().unwrap().len(), 3);
    assert_eq!(events.last(), Some(&UploadEvent::Drained));
    assert!(!queue.is_running());
    assert!(queue.can_send());
}

#[test]
fn resend_after_mixed_run_retries_only_failures() {
    let mut queue = UploadQueue::default();
    queue.replace(paths(&["1.pdf", "2.pdf", "3.pdf"]));
    run(
        &mut queue,
        FakeSink {
            failing: vec!["2.pdf"],
            ..FakeSink::default()
        },
    );
    assert!(queue.can_send());

    let sink = FakeSink::default();
    let events = run(&mut queue, sink.clone());

    assert_eq!(*sink.sent.lock().unwrap(), paths(&["2.pdf"]));
    assert_eq!(events.first(), Some(&UploadEvent::Started(1)));
    assert_eq!(queue.statuses(), vec![UploadStatus::Success; 3]);
    assert!(!queue.can_send());
}

#[test]
fn failed_items_return_to_pending_on_start() {
    let mut queue = UploadQueue::default();
    queue.replace(paths(&["1.pdf"]));
    run(
        &mut queue,
        FakeSink {
            failing: vec!["1.pdf"],
            ..FakeSink::default()
        },
    );
    assert_eq!(queue.statuses(), vec![UploadStatus::Error]);

    let jobs = queue.start();
    assert_eq!(jobs.len(), 1);
    assert_eq!(queue.statuses(), vec![UploadStatus::Pending]);
    assert!(queue.is_running());
}

#[test]
fn events_are_strictly_sequential() {
    let mut queue = UploadQueue::default();
    queue.replace(paths(&["1.pdf", "2.pdf"]));
    let events = run(&mut queue, FakeSink::default());
    assert_eq!(
        events,
        vec![
            UploadEvent::Started(0),
            UploadEvent::Finished { index: 0, ok: true },
            UploadEvent::Started(1),
            UploadEvent::Finished { index: 1, ok: true },
            UploadEvent::Drained,
        ]
    );
}

#[test]
fn requests_follow_selection_order() {
    let mut queue = UploadQueue::default();
    queue.replace(paths(&["c.pdf", "a.pdf", "b.pdf"]));
    let sink = FakeSink::default();
    run(&mut queue, sink.clone());
    assert_eq!(*sink.sent.lock().unwrap(), paths(&["c.pdf", "a.pdf", "b.pdf"]));
}

#[test]
fn all_success_disables_send() {
    let mut queue = UploadQueue::default();
    queue.replace(paths(&["1.pdf"]));
    run(&mut queue, FakeSink::default());
    assert_eq!(queue.statuses(), vec![UploadStatus::Success]);
    assert!(!queue.can_send());
}

#[test]
fn send_is_disabled_while_running() {
    let mut queue = UploadQueue::default();
    queue.replace(paths(&["1.pdf", "2.pdf"]));
    let jobs = queue.start();
    assert_eq!(jobs.len(), 2);
    assert!(queue.is_running());
    assert!(!queue.can_send());

    queue.apply(UploadEvent::Started(0));
    assert_eq!(queue.statuses()[0], UploadStatus::Uploading);
}

#[test]
fn reselecting_discards_errors() {
    let mut queue = UploadQueue::default();
    queue.replace(paths(&["1.pdf"]));
    run(
        &mut queue,
        FakeSink {
            failing: vec!["1.pdf"],
            ..FakeSink::default()
        },
    );
    assert_eq!(queue.statuses(), vec![UploadStatus::Error]);

    queue.replace(paths(&["1.pdf"]));
    assert_eq!(queue.statuses(), vec![UploadStatus::Pending]);
    assert!(queue.can_send());
}

#[test]
fn starting_an_empty_queue_is_a_no_op() {
    let mut queue = UploadQueue::default();
    assert!(queue.start().is_empty());
    assert!(!queue.is_running());
    let events: Vec<UploadEvent> = block_on(upload_events(FakeSink::default(), Vec::new()).collect());
    assert_eq!(events, vec![UploadEvent::Drained]);
}
