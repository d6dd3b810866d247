//! Sitemap - XML sitemap construction, serialization and parsing library.
//!
//! This crate provides a unified interface to the sitemap crates.
//!
//! # Crates
//!
//! - [`sitemap_common`] - Common utilities (byte counting, W3C datetimes)
//! - [`sitemap_xml`] - `urlset` and `sitemapindex` documents with the video extension
//!
//! # Example
//!
//! ```no_run
//! use sitemap::prelude::*;
//!
//! let mut sitemap = Sitemap::new();
//! sitemap.add(Url::new("http://example.com/").change_freq(ChangeFreq::Weekly));
//!
//! let file = std::fs::File::create("sitemap.xml")?;
//! let written = sitemap.write_to(std::io::BufWriter::new(file))?;
//! println!("Wrote {} bytes", written);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use sitemap_common as common;
pub use sitemap_xml as xml;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use sitemap_common::chrono::{DateTime, Utc};
    pub use sitemap_common::CountingWriter;
    pub use sitemap_xml::{ChangeFreq, GalleryLocation, Sitemap, SitemapIndex, Url, Video};
}

// Re-export commonly used types at the crate root
pub use sitemap_xml::{
    ChangeFreq, Error, GalleryLocation, Result, Sitemap, SitemapIndex, Url, Video, SITEMAP_NAMESPACE,
    VIDEO_NAMESPACE,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
