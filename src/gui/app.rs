use std::path::PathBuf;

use iced::widget::{button, column, container, scrollable, text};
use iced::{Element, Length, Task, Theme};
use rfd::AsyncFileDialog;

use crate::gui::{AppState, Message};
use crate::{
    DetectorSpec, LabelTable, OnnxDetector, PipelineConfig, ScanOutcome, ScanPipeline, ScanSession,
    SessionState,
};

pub struct ScanApp {
    state: AppState,
}

impl ScanApp {
    pub fn boot() -> (Self, Task<Message>) {
        let model_path = std::env::var_os("VEHISCAN_MODEL")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("detector.onnx"));

        let mut session = ScanSession::new(ScanPipeline::new(
            PipelineConfig::default(),
            LabelTable::coco(),
        ));
        // A failed load leaves the session in its persistent failed state;
        // the status line keeps showing it.
        let _ = session.load_model(|| OnnxDetector::load(&model_path, DetectorSpec::default()));

        (
            Self {
                state: AppState {
                    session,
                    outcome: None,
                    model_path,
                },
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage => {
                // Busy guard: ignore the tap unless the session is ready.
                if !self.state.session.begin_capture() {
                    return Task::none();
                }
                Task::perform(
                    AsyncFileDialog::new()
                        .add_filter("Images", &["jpg", "jpeg", "png"])
                        .pick_file(),
                    |handle| Message::ImagePicked(handle.map(|file| file.path().to_path_buf())),
                )
            }
            Message::ImagePicked(None) => {
                self.state.session.cancel_capture();
                Task::none()
            }
            Message::ImagePicked(Some(path)) => {
                self.state.outcome = self.state.session.process(&path).ok();
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let status = match self.state.session.state() {
            SessionState::Idle | SessionState::ModelLoading => "Loading model...".to_string(),
            SessionState::Ready => "Ready".to_string(),
            SessionState::Capturing => "Waiting for a photo...".to_string(),
            SessionState::Processing => "Processing...".to_string(),
            SessionState::Failed => {
                format!("Model unavailable ({})", self.state.model_path.display())
            }
        };

        let mut content = column![
            text("Vehiscan").size(32),
            text(status),
            button("Scan photo").on_press(Message::PickImage),
        ]
        .spacing(20)
        .padding(20);

        match &self.state.outcome {
            Some(ScanOutcome::Found(detections)) => {
                let mut results = column![].spacing(4);
                for detection in detections {
                    results = results.push(text(format!(
                        "{} - confidence: {:.2}",
                        detection.label, detection.score
                    )));
                }
                content = content.push(results);
            }
            Some(ScanOutcome::Empty) => {
                content = content.push(text("No objects detected."));
            }
            None => {}
        }

        let mut log_lines = column![].spacing(2);
        for entry in self.state.session.log().entries() {
            log_lines = log_lines.push(text(entry.display_line()).size(12));
        }
        content = content.push(scrollable(log_lines).height(Length::Fill));

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}
