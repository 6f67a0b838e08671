use gloo_net::http::Request;
use log::{debug, error};
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{js_sys, Blob, BlobPropertyBag, Document, HtmlAnchorElement, Url};

use crate::utils::{document, js_error_message};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("request failed: {0}")]
    Request(#[from] gloo_net::Error),
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("browser API failed: {0}")]
    Browser(String),
    #[error("no document to attach the download link to")]
    NoDocument,
}

/// Saves the displayed result under `filename`.
///
/// Fetches the image into a blob first so the browser saves instead of
/// navigating. Cross-origin sources and other fetch failures fall back to a
/// plain download link. Both paths clean up after themselves.
pub async fn download_result(url: String, filename: String) {
    if url.is_empty() {
        return;
    }

    match download_via_blob(&url, &filename).await {
        Ok(()) => debug!("Downloaded {} as {}", url, filename),
        Err(e) => {
            error!("Download failed: {}", e);
            if let Err(e) = fallback_download(&url, &filename) {
                error!("Fallback download failed: {}", e);
            }
        }
    }
}

async fn download_via_blob(url: &str, filename: &str) -> Result<(), DownloadError> {
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(DownloadError::Status(response.status()));
    }
    let content_type = response.headers().get("content-type");
    let bytes = response.binary().await?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
    let options = BlobPropertyBag::new();
    if let Some(content_type) = content_type {
        options.set_type(&content_type);
    }
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(browser_error)?;

    let object_url = Url::create_object_url_with_blob(&blob).map_err(browser_error)?;
    let clicked = click_hidden_link(&object_url, filename);
    if let Err(e) = Url::revoke_object_url(&object_url) {
        error!("Failed to revoke object URL: {}", js_error_message(&e));
    }
    clicked
}

fn click_hidden_link(href: &str, filename: &str) -> Result<(), DownloadError> {
    let document = document().ok_or(DownloadError::NoDocument)?;
    let body = document.body().ok_or(DownloadError::NoDocument)?;

    let anchor = create_anchor(&document, href, filename)?;
    anchor
        .set_attribute("style", "display: none;")
        .map_err(browser_error)?;
    body.append_child(&anchor).map_err(browser_error)?;
    anchor.click();
    body.remove_child(&anchor).map_err(browser_error)?;
    Ok(())
}

/// Direct link to the source, opened in a new tab if the browser ignores
/// `download`. The link is never attached to the page.
pub fn fallback_download(url: &str, filename: &str) -> Result<(), DownloadError> {
    let document = document().ok_or(DownloadError::NoDocument)?;
    let anchor = create_anchor(&document, url, filename)?;
    anchor.set_target("_blank");
    anchor.click();
    Ok(())
}

fn create_anchor(document: &Document, href: &str, filename: &str) -> Result<HtmlAnchorElement, DownloadError> {
    let anchor = document
        .create_element("a")
        .map_err(browser_error)?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| DownloadError::Browser("created element is not an anchor".to_string()))?;
    anchor.set_href(href);
    anchor.set_download(filename);
    Ok(anchor)
}

fn browser_error(value: wasm_bindgen::JsValue) -> DownloadError {
    DownloadError::Browser(js_error_message(&value))
}
