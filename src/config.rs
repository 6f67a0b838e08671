use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// How long the mock generation pretends to work.
pub const GENERATION_DELAY_MS: u32 = 2_500;

/// Stand-in for the response of a real generation API.
pub const MOCK_RESULT_PATH: &str = "images/gallery-1.jpg";

pub const DOWNLOAD_FILENAME: &str = "z-image-result.jpg";

pub const INVALID_UPLOAD_MESSAGE: &str = "Please upload an image file.";

/// Settings for the upload/generate playground.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaygroundConfig {
    pub generation_delay_ms: u32,
    pub mock_result_path: String,
    pub download_filename: String,
    pub invalid_upload_message: String,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            generation_delay_ms: GENERATION_DELAY_MS,
            mock_result_path: MOCK_RESULT_PATH.to_string(),
            download_filename: DOWNLOAD_FILENAME.to_string(),
            invalid_upload_message: INVALID_UPLOAD_MESSAGE.to_string(),
        }
    }
}
