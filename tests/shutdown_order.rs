//! Worker threads keep using the global queues while the application
//! object that configured the pipeline is being destroyed

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use media_queues::payload::{LogMessage, PicYuv};
use media_queues::pipeline::{Pipeline, PipelineConfig};
use media_queues::registry::instance;

const PICTURES: usize = 50;

/// Application object: owns the pipeline but not the capture thread
struct App {
    pipeline: Option<Pipeline>,
}

impl App {
    fn start() -> Self {
        let config = PipelineConfig::default().poll_interval(Duration::from_millis(2));
        let pipeline = Pipeline::start(instance().handles(), config).unwrap();
        Self {
            pipeline: Some(pipeline),
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(pipeline) = self.pipeline.take() {
            pipeline.shutdown();
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_capture_thread_outlives_app() {
    init_tracing();
    let app = App::start();
    let pushed = Arc::new(AtomicUsize::new(0));
    let app_gone = Arc::new(AtomicBool::new(false));

    let capture = {
        let pushed = Arc::clone(&pushed);
        let app_gone = Arc::clone(&app_gone);
        thread::Builder::new()
            .name("capture".into())
            .spawn(move || {
                for pts in 0..PICTURES as u64 {
                    // Resolve the registry on every access
                    instance()
                        .picture_queue()
                        .push(PicYuv::filled(8, 8, pts, 16, 128, 128))
                        .unwrap();
                    pushed.fetch_add(1, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(1));
                }
                while !app_gone.load(Ordering::SeqCst) {
                    thread::sleep(Duration::from_millis(1));
                }
                instance()
                    .log_queue()
                    .push(LogMessage::info("capture", "finished"))
                    .unwrap();
            })
            .unwrap()
    };

    let deadline = Instant::now() + Duration::from_secs(5);
    while pushed.load(Ordering::SeqCst) < 5 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }

    // Tear down the application while capture is mid-stream
    drop(app);
    app_gone.store(true, Ordering::SeqCst);

    capture.join().unwrap();

    let stats = instance().stats();
    assert_eq!(stats.picture.pushed, PICTURES as u64);
    assert_eq!(stats.picture.popped + stats.picture.depth as u64, PICTURES as u64);
    assert_eq!(stats.encode.pushed, stats.picture.popped);

    // The log sink is gone; the message waits on the still-live queue
    assert_eq!(instance().log_queue().pop().unwrap().message, "finished");
}
