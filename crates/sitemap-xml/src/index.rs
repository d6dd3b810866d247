//! The `<sitemapindex>` document.

use std::io::{Read, Write};
use std::str::FromStr;

use crate::decode::read_document;
use crate::encode::{write_document, Layout};
use crate::{Error, Result, Url, SITEMAP_NAMESPACE};

const LAYOUT: Layout = Layout {
    root: "sitemapindex",
    entry: "sitemap",
};

/// A sitemap index listing other sitemap files.
///
/// Entries reuse [`Url`]: `loc` points at a sitemap and `last_mod` records
/// when it changed. `change_freq`, `priority` and `video` should stay unset;
/// they are written as-is if present.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapIndex {
    xmlns: &'static str,
    sitemaps: Vec<Url>,
    /// Write compact output instead of two-space indented XML.
    pub minify: bool,
}

impl SitemapIndex {
    /// Create an empty sitemap index.
    pub fn new() -> Self {
        Self {
            xmlns: SITEMAP_NAMESPACE,
            sitemaps: Vec::new(),
            minify: false,
        }
    }

    /// Parse a sitemap index from bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut index = Self::new();
        index.read_from(data)?;
        Ok(index)
    }

    /// Append a sitemap entry.
    pub fn add(&mut self, sitemap: Url) {
        self.sitemaps.push(sitemap);
    }

    /// The default namespace declared on the root element.
    pub fn xmlns(&self) -> &str {
        self.xmlns
    }

    pub fn sitemaps(&self) -> &[Url] {
        &self.sitemaps
    }

    pub fn sitemaps_mut(&mut self) -> &mut Vec<Url> {
        &mut self.sitemaps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Url> {
        self.sitemaps.iter()
    }

    pub fn len(&self) -> usize {
        self.sitemaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sitemaps.is_empty()
    }

    /// Write the XML document to a sink, returning the bytes written.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<u64> {
        write_document(
            writer,
            LAYOUT,
            &[("xmlns", self.xmlns)],
            &self.sitemaps,
            self.minify,
        )
    }

    /// Read an XML document from a source, appending its entries.
    pub fn read_from<R: Read>(&mut self, reader: R) -> Result<u64> {
        read_document(reader, LAYOUT, &mut self.sitemaps)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write_to(&mut output)?;
        Ok(output)
    }

    pub fn to_xml_string(&self) -> Result<String> {
        let bytes = self.to_bytes()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Default for SitemapIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for SitemapIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}

impl Extend<Url> for SitemapIndex {
    fn extend<T: IntoIterator<Item = Url>>(&mut self, iter: T) {
        self.sitemaps.extend(iter);
    }
}

impl<'a> IntoIterator for &'a SitemapIndex {
    type Item = &'a Url;
    type IntoIter = std::slice::Iter<'a, Url>;

    fn into_iter(self) -> Self::IntoIter {
        self.sitemaps.iter()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_write_index() {
        let mut index = SitemapIndex::new();
        index.add(
            Url::new("http://example.com/sitemap1.xml.gz")
                .last_mod(Utc.with_ymd_and_hms(2004, 10, 1, 18, 23, 17).unwrap()),
        );
        index.add(Url::new("http://example.com/sitemap2.xml.gz"));

        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n  \
<sitemap>\n    \
<loc>http://example.com/sitemap1.xml.gz</loc>\n    \
<lastmod>2004-10-01T18:23:17Z</lastmod>\n  \
</sitemap>\n  \
<sitemap>\n    \
<loc>http://example.com/sitemap2.xml.gz</loc>\n  \
</sitemap>\n\
</sitemapindex>\n";

        let mut output = Vec::new();
        let written = index.write_to(&mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), expected);
        assert_eq!(written, expected.len() as u64);
    }

    #[test]
    fn test_index_round_trip() {
        let mut index = SitemapIndex::new();
        index.minify = true;
        index.add(Url::new("http://example.com/a.xml").last_mod(Utc.timestamp_opt(0, 0).unwrap()));
        index.add(Url::new("http://example.com/b.xml"));

        let parsed: SitemapIndex = index.to_xml_string().unwrap().parse().unwrap();
        assert_eq!(parsed.sitemaps(), index.sitemaps());
        assert!(!index.to_xml_string().unwrap().contains("xmlns:video"));
    }

    #[test]
    fn test_index_rejects_urlset() {
        let err = SitemapIndex::parse(b"<urlset><url><loc>x</loc></url></urlset>").unwrap_err();
        assert!(matches!(err, Error::UnexpectedRoot { expected: "sitemapindex", .. }));
    }
}
