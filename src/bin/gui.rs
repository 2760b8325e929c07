fn main() -> iced::Result {
    tracing_subscriber::fmt::init();
    vehiscan::gui::run()
}
