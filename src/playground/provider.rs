use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;
use log::debug;
use thiserror::Error;
use wasm_bindgen_futures::JsFuture;
use web_sys::{js_sys, HtmlImageElement};

use crate::config::PlaygroundConfig;
use crate::utils::js_error_message;

/// The uploaded picture handed to a provider.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceImage {
    pub data_url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedImage {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("result image `{0}` could not be loaded")]
    ResultUnavailable(String),
    #[error("browser API failed: {0}")]
    Browser(String),
}

/// Something that turns an uploaded image into a generated one.
pub trait GenerationProvider {
    fn submit(&self, image: SourceImage) -> LocalBoxFuture<'static, Result<GeneratedImage, GenerationError>>;
}

/// Waits a fixed delay and answers with a bundled demo asset.
#[derive(Clone, Debug, PartialEq)]
pub struct MockGenerationProvider {
    delay_ms: u32,
    result_url: String,
}

impl MockGenerationProvider {
    pub fn new(delay_ms: u32, result_url: impl Into<String>) -> Self {
        Self {
            delay_ms,
            result_url: result_url.into(),
        }
    }

    pub fn from_config(config: &PlaygroundConfig) -> Self {
        Self::new(config.generation_delay_ms, config.mock_result_path.clone())
    }

    #[cfg(test)]
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    #[cfg(test)]
    pub fn result_url(&self) -> &str {
        &self.result_url
    }
}

impl GenerationProvider for MockGenerationProvider {
    fn submit(&self, image: SourceImage) -> LocalBoxFuture<'static, Result<GeneratedImage, GenerationError>> {
        let delay_ms = self.delay_ms;
        let url = self.result_url.clone();
        async move {
            debug!(
                "Mock generation started for a {} byte upload, answering in {}ms",
                image.data_url.len(),
                delay_ms
            );
            TimeoutFuture::new(delay_ms).await;
            preload_image(&url).await?;
            Ok(GeneratedImage { url })
        }
        .boxed_local()
    }
}

/// Resolves once the browser has the image, so it can be swapped in without flicker.
async fn preload_image(url: &str) -> Result<(), GenerationError> {
    let image = HtmlImageElement::new().map_err(|e| GenerationError::Browser(js_error_message(&e)))?;

    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(url);

    let outcome = JsFuture::from(loaded).await;
    image.set_onload(None);
    image.set_onerror(None);
    outcome.map_err(|_| GenerationError::ResultUnavailable(url.to_string()))?;
    Ok(())
}

/// Shared provider handle usable as a component property.
#[derive(Clone)]
pub struct ProviderHandle(pub Rc<dyn GenerationProvider>);

impl ProviderHandle {
    pub fn new(provider: impl GenerationProvider + 'static) -> Self {
        Self(Rc::new(provider))
    }
}

impl PartialEq for ProviderHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for ProviderHandle {
    fn default() -> Self {
        Self::new(MockGenerationProvider::from_config(&PlaygroundConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_provider_uses_configured_delay_and_asset() {
        let provider = MockGenerationProvider::from_config(&PlaygroundConfig::default());
        assert_eq!(provider.delay_ms(), 2500);
        assert_eq!(provider.result_url(), "images/gallery-1.jpg");
    }

    #[test]
    fn handles_compare_by_identity() {
        let a = ProviderHandle::new(MockGenerationProvider::new(10, "a.jpg"));
        let b = ProviderHandle::new(MockGenerationProvider::new(10, "a.jpg"));
        assert!(a == a.clone());
        assert!(a != b);
    }
}
