mod common;

use std::path::Path;

use common::*;
use vehiscan::{PipelineConfig, ScanError, ScanPipeline, ScanSession, SessionState};

fn test_pipeline() -> ScanPipeline {
    let config = PipelineConfig {
        input_size: 32,
        slots: 3,
        ..Default::default()
    };
    ScanPipeline::new(config, traffic_labels())
}

fn ready_session(detector: ScriptedDetector) -> ScanSession<ScriptedDetector> {
    let mut session = ScanSession::new(test_pipeline());
    session
        .load_model(|| Ok(detector))
        .expect("scripted load cannot fail");
    session
}

#[test]
fn starts_idle_and_becomes_ready_after_load() {
    let mut session: ScanSession<ScriptedDetector> = ScanSession::new(test_pipeline());
    assert_eq!(session.state(), SessionState::Idle);

    assert!(session.begin_model_load());
    assert_eq!(session.state(), SessionState::ModelLoading);

    session
        .finish_model_load(Ok(ScriptedDetector::new(
            vec![2, 5, 0],
            vec![0.82, 0.3, 0.91],
        )))
        .unwrap();
    assert_eq!(session.state(), SessionState::Ready);
}

#[test]
fn model_load_cannot_begin_twice() {
    let mut session: ScanSession<ScriptedDetector> = ScanSession::new(test_pipeline());
    assert!(session.begin_model_load());
    assert!(!session.begin_model_load());
}

#[test]
fn failed_load_is_persistent() {
    let mut session: ScanSession<ScriptedDetector> = ScanSession::new(test_pipeline());
    assert!(session.begin_model_load());
    let err = session
        .finish_model_load(Err(ScanError::ModelLoad("missing file".to_string())))
        .unwrap_err();
    assert!(matches!(err, ScanError::ModelLoad(_)));
    assert_eq!(session.state(), SessionState::Failed);

    // The session never becomes available again.
    assert!(!session.begin_capture());
    let src = create_test_image(10, 10);
    assert!(matches!(
        session.process(src.path()),
        Err(ScanError::ModelNotReady)
    ));
    assert_eq!(session.state(), SessionState::Failed);
}

#[test]
fn run_without_a_model_is_rejected_before_any_stage() {
    let mut session: ScanSession<ScriptedDetector> = ScanSession::new(test_pipeline());
    let src = create_test_image(10, 10);
    let err = session.process(src.path()).unwrap_err();
    assert!(matches!(err, ScanError::ModelNotReady));
    // Logged as a precondition; no stage line was written.
    assert!(session.log().entries()[0].message.contains("not loaded"));
    assert_eq!(session.log().len(), 1);
}

#[test]
fn capture_is_single_flight() {
    let mut session = ready_session(ScriptedDetector::new(vec![2, 5, 0], vec![0.82, 0.3, 0.91]));
    assert!(session.begin_capture());
    assert_eq!(session.state(), SessionState::Capturing);

    // A second pick while one is outstanding is refused.
    assert!(!session.begin_capture());

    session.cancel_capture();
    assert_eq!(session.state(), SessionState::Ready);
    assert!(session.begin_capture());
}

#[test]
fn cancel_outside_capture_is_a_no_op() {
    let mut session = ready_session(ScriptedDetector::new(vec![2, 5, 0], vec![0.82, 0.3, 0.91]));
    session.cancel_capture();
    assert_eq!(session.state(), SessionState::Ready);
}

#[test]
fn full_run_returns_labeled_detections_and_ready_state() -> anyhow::Result<()> {
    let mut session = ready_session(ScriptedDetector::new(vec![2, 5, 0], vec![0.82, 0.3, 0.91]));
    let src = create_test_image(120, 80);

    session.begin_capture();
    let outcome = session.process(src.path())?;

    let detections = outcome.detections();
    assert_eq!(detections.len(), 2);
    assert_eq!(detections[0].label, "car");
    assert_eq!(detections[1].label, "person");
    assert_eq!(session.state(), SessionState::Ready);
    Ok(())
}

#[test]
fn stage_failure_logs_and_returns_to_ready() {
    let mut session = ready_session(ScriptedDetector::new(vec![2, 5, 0], vec![0.82, 0.3, 0.91]));
    session.begin_capture();

    let err = session.process(Path::new("/nonexistent/photo.jpg")).unwrap_err();
    assert!(matches!(err, ScanError::ImageProcessing(_)));
    assert_eq!(session.state(), SessionState::Ready);
    assert!(
        session
            .log()
            .entries()
            .iter()
            .any(|e| e.message.contains("Image processing error"))
    );

    // The user may retry from acquisition.
    assert!(session.begin_capture());
}

#[test]
fn detector_failure_is_an_inference_error() {
    let mut session = ScanSession::new(test_pipeline());
    session.load_model(|| Ok(FailingDetector)).unwrap();
    let src = create_test_image(64, 64);

    session.begin_capture();
    let err = session.process(src.path()).unwrap_err();
    assert!(matches!(err, ScanError::Inference(_)));
    assert_eq!(session.state(), SessionState::Ready);
}

#[test]
fn log_is_append_at_head() {
    let mut session = ready_session(ScriptedDetector::new(vec![2, 5, 0], vec![0.82, 0.3, 0.91]));
    let src = create_test_image(40, 40);
    session.begin_capture();
    session.process(src.path()).unwrap();

    let entries = session.log().entries();
    assert!(entries.len() >= 5);
    // Newest first: the outcome line leads, the model-load line trails.
    assert!(entries[0].message.contains("detection"));
    assert!(entries.last().unwrap().message.contains("Loading detector model"));
    for pair in entries.windows(2) {
        assert!(pair[0].at >= pair[1].at);
    }
}
