//! The `<urlset>` sitemap document.

use std::io::{Read, Write};
use std::str::FromStr;

use crate::decode::read_document;
use crate::encode::{write_document, Layout};
use crate::{Error, Result, Url, SITEMAP_NAMESPACE, VIDEO_NAMESPACE};

const LAYOUT: Layout = Layout {
    root: "urlset",
    entry: "url",
};

/// A complete sitemap which can be written to and read from XML.
///
/// The namespace declarations are fixed at construction and cannot be
/// changed, so every document produced by [`Sitemap::new`] declares the
/// sitemap namespace as default and binds the `video` prefix.
///
/// Set [`minify`](Sitemap::minify) to drop the indentation from the output.
#[derive(Debug, Clone, PartialEq)]
pub struct Sitemap {
    xmlns: &'static str,
    xmlns_video: &'static str,
    urls: Vec<Url>,
    /// Write compact output instead of two-space indented XML.
    pub minify: bool,
}

impl Sitemap {
    /// Create an empty sitemap.
    pub fn new() -> Self {
        Self {
            xmlns: SITEMAP_NAMESPACE,
            xmlns_video: VIDEO_NAMESPACE,
            urls: Vec::new(),
            minify: false,
        }
    }

    /// Parse a sitemap from bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut sitemap = Self::new();
        sitemap.read_from(data)?;
        Ok(sitemap)
    }

    /// Append an entry. No validation is performed.
    pub fn add(&mut self, url: Url) {
        self.urls.push(url);
    }

    /// The default namespace declared on the root element.
    pub fn xmlns(&self) -> &str {
        self.xmlns
    }

    /// The namespace bound to the `video` prefix.
    pub fn xmlns_video(&self) -> &str {
        self.xmlns_video
    }

    /// Entries in insertion order.
    pub fn urls(&self) -> &[Url] {
        &self.urls
    }

    /// Mutable access to the entries.
    pub fn urls_mut(&mut self) -> &mut Vec<Url> {
        &mut self.urls
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Url> {
        self.urls.iter()
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Write the XML document to a sink.
    ///
    /// Returns the total number of bytes written. On failure the returned
    /// [`Error::Write`] carries the bytes the sink accepted before failing.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<u64> {
        write_document(
            writer,
            LAYOUT,
            &[("xmlns", self.xmlns), ("xmlns:video", self.xmlns_video)],
            &self.urls,
            self.minify,
        )
    }

    /// Read an XML document from a source, appending its entries.
    ///
    /// Returns the number of bytes consumed.
    pub fn read_from<R: Read>(&mut self, reader: R) -> Result<u64> {
        read_document(reader, LAYOUT, &mut self.urls)
    }

    /// Encode to a byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write_to(&mut output)?;
        Ok(output)
    }

    /// Encode to a string.
    pub fn to_xml_string(&self) -> Result<String> {
        let bytes = self.to_bytes()?;
        // The encoder only ever writes UTF-8.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Default for Sitemap {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Sitemap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}

impl Extend<Url> for Sitemap {
    fn extend<T: IntoIterator<Item = Url>>(&mut self, iter: T) {
        self.urls.extend(iter);
    }
}

impl FromIterator<Url> for Sitemap {
    fn from_iter<T: IntoIterator<Item = Url>>(iter: T) -> Self {
        let mut sitemap = Self::new();
        sitemap.extend(iter);
        sitemap
    }
}

impl IntoIterator for Sitemap {
    type Item = Url;
    type IntoIter = std::vec::IntoIter<Url>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sitemap {
    type Item = &'a Url;
    type IntoIter = std::slice::Iter<'a, Url>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.iter()
    }
}
