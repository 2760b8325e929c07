use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    PickImage,
    ImagePicked(Option<PathBuf>),
}
