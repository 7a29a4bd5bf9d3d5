//! Blob reply handling.
//!
//! Object URLs are a browser resource that must be revoked after use.
//! [`ScopedObjectUrl`] ties the revoke to scope exit so every path out of
//! [`download_blob`], including errors, releases the URL.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("could not create object URL: {0}")]
    ObjectUrl(String),
    #[error("could not start download: {0}")]
    Download(String),
}

/// The slice of the browser URL API the renderer needs.
pub trait ObjectUrls {
    type Blob: ?Sized;

    fn create(&self, blob: &Self::Blob) -> Result<String, RenderError>;
    fn revoke(&self, url: &str);
}

/// Saves a URL to disk under a filename (an `<a download>` click in the browser).
pub trait Downloader {
    fn download(&self, url: &str, filename: &str) -> Result<(), RenderError>;
}

/// An object URL that is revoked when dropped.
pub struct ScopedObjectUrl<'a, U: ObjectUrls + ?Sized> {
    urls: &'a U,
    url: String,
}

impl<'a, U: ObjectUrls + ?Sized> ScopedObjectUrl<'a, U> {
    pub fn create(urls: &'a U, blob: &U::Blob) -> Result<Self, RenderError> {
        let url = urls.create(blob)?;
        Ok(Self { urls, url })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl<U: ObjectUrls + ?Sized> Drop for ScopedObjectUrl<'_, U> {
    fn drop(&mut self) {
        self.urls.revoke(&self.url);
    }
}

/// Offers `blob` as a file download: one URL, one download, one revoke.
pub fn download_blob<A>(api: &A, blob: &A::Blob, filename: &str) -> Result<(), RenderError>
where
    A: ObjectUrls + Downloader,
{
    let url = ScopedObjectUrl::create(api, blob)?;
    api.download(url.as_str(), filename)
}
