mod app;
mod message;
mod state;

pub use app::ScanApp;
pub use message::Message;
pub use state::AppState;

/// Run the scan window. Blocks until the window is closed.
pub fn run() -> iced::Result {
    iced::application(ScanApp::boot, ScanApp::update, ScanApp::view)
        .title("Vehiscan")
        .theme(ScanApp::theme)
        .run()
}
