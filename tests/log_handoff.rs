//! Log message hand-off between two threads through the global registry

use std::thread;

use media_queues::payload::LogMessage;
use media_queues::registry::{global_constructions, instance};

#[test]
fn test_log_message_delivered_exactly_once() {
    const MESSAGES: usize = 200;

    // Thread A and thread B race their first instance() calls
    let producer = thread::spawn(|| {
        for i in 0..MESSAGES {
            instance()
                .log_queue()
                .push(LogMessage::info("producer", format!("msg {}", i)))
                .unwrap();
        }
    });

    let consumer = thread::spawn(|| {
        (0..MESSAGES)
            .map(|_| instance().log_queue().pop().unwrap().message)
            .collect::<Vec<_>>()
    });

    producer.join().unwrap();
    let received = consumer.join().unwrap();

    let expected: Vec<String> = (0..MESSAGES).map(|i| format!("msg {}", i)).collect();
    assert_eq!(received, expected);
    assert!(instance().log_queue().is_empty());
    assert_eq!(global_constructions(), 1);

    let stats = instance().stats();
    assert_eq!(stats.log.pushed, MESSAGES as u64);
    assert_eq!(stats.log.popped, MESSAGES as u64);
    // Nothing leaked onto the other kinds' queues
    assert_eq!(stats.picture.pushed + stats.encode.pushed + stats.network.pushed, 0);
}
