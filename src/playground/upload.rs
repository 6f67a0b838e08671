use std::cell::RefCell;

use thiserror::Error;
use wasm_bindgen_futures::JsFuture;
use web_sys::{js_sys, File, FileList, FileReader};

use crate::playground::state::{next_ticket, Ticket};
use crate::utils::js_error_message;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    #[error("unsupported content type `{0}`")]
    NotAnImage(String),
    #[error("failed to read file: {0}")]
    Read(String),
}

/// Only the declared MIME type is checked, never the file contents.
pub fn validate_upload(content_type: &str) -> Result<(), UploadError> {
    if content_type.starts_with("image/") {
        Ok(())
    } else {
        Err(UploadError::NotAnImage(content_type.to_string()))
    }
}

/// Accepts or rejects a picked file. A rejected file takes no ticket, so
/// nothing about the widget changes.
pub fn begin_selection(content_type: &str, tickets: &RefCell<Ticket>) -> Result<Ticket, UploadError> {
    validate_upload(content_type)?;
    Ok(next_ticket(tickets))
}

/// First file of a drop or picker selection. Empty selections yield `None`.
pub fn first_file(files: Option<FileList>) -> Option<File> {
    files.and_then(|files| files.get(0))
}

pub async fn read_as_data_url(file: &File) -> Result<String, UploadError> {
    let reader = FileReader::new().map_err(|e| UploadError::Read(js_error_message(&e)))?;

    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        reader.set_onload(Some(&resolve));
        reader.set_onerror(Some(&reject));
    });

    reader
        .read_as_data_url(file)
        .map_err(|e| UploadError::Read(js_error_message(&e)))?;

    let outcome = JsFuture::from(loaded).await;
    reader.set_onload(None);
    reader.set_onerror(None);
    outcome.map_err(|_| UploadError::Read(format!("could not decode {}", file.name())))?;

    reader
        .result()
        .map_err(|e| UploadError::Read(js_error_message(&e)))?
        .as_string()
        .ok_or_else(|| UploadError::Read("reader returned no data URL".to_string()))
}
