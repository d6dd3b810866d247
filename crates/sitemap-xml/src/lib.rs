//! XML sitemap encoder and decoder for the sitemaps.org protocol.
//!
//! Sitemaps list the pages of a site for search engines. This crate builds
//! them in memory, writes them to any [`std::io::Write`] sink and reads them
//! back from any [`std::io::Read`] source. The Google video extension
//! (`video:video`) is supported on every entry.
//!
//! Optional fields are only written when set, namespaces are declared once on
//! the root element, and the encoder reports exactly how many bytes it wrote,
//! even when the sink fails partway through.
//!
//! URL well-formedness and the 50,000 entry / 50 MB limits are not checked;
//! split large sitemaps and reference the parts from a [`SitemapIndex`].
//!
//! # Example
//!
//! ```
//! use sitemap_xml::{ChangeFreq, Sitemap, Url};
//!
//! let mut sitemap = Sitemap::new();
//! sitemap.add(Url::new("http://example.com/").change_freq(ChangeFreq::Daily));
//!
//! let mut output = Vec::new();
//! let written = sitemap.write_to(&mut output)?;
//! assert_eq!(written, output.len() as u64);
//!
//! let parsed = Sitemap::parse(&output)?;
//! assert_eq!(parsed.urls(), sitemap.urls());
//! # Ok::<(), sitemap_xml::Error>(())
//! ```

mod decode;
mod encode;
mod error;
mod index;
mod model;
mod urlset;

pub use error::{Error, Result};
pub use index::SitemapIndex;
pub use model::{ChangeFreq, GalleryLocation, Url, Video};
pub use urlset::Sitemap;

/// Default namespace of sitemaps and sitemap indexes.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Namespace bound to the `video` prefix.
pub const VIDEO_NAMESPACE: &str = "http://www.google.com/schemas/sitemap-video/1.1";
