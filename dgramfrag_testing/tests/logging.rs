//! Integration coverage for the shared logger handle.

use std::thread;

use dgramfrag_testing::LoggerHandle;

#[test]
fn logger_survives_a_panicking_holder() {
    let outcome = thread::spawn(|| {
        let _handle = LoggerHandle::new();
        panic!("holder fails while owning the logger");
    })
    .join();
    assert!(outcome.is_err());

    let mut handle = LoggerHandle::new();
    log::warn!("after recovery");
    let messages = handle.messages();
    assert!(
        messages.iter().any(|m| m == "after recovery"),
        "captured: {messages:?}"
    );
}
