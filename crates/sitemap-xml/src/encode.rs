//! Streaming XML encoder shared by [`Sitemap`](crate::Sitemap) and
//! [`SitemapIndex`](crate::SitemapIndex).

use std::io::{self, Write};

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use sitemap_common::datetime::format_datetime;
use sitemap_common::CountingWriter;
use tracing::debug;

use crate::{Error, GalleryLocation, Result, Url, Video};

/// XML declaration written before every document, newline included.
pub(crate) const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Element names that distinguish a sitemap from a sitemap index.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    pub root: &'static str,
    pub entry: &'static str,
}

/// Write a complete document and return the number of bytes the sink accepted.
pub(crate) fn write_document<W: Write>(
    sink: W,
    layout: Layout,
    namespaces: &[(&str, &str)],
    urls: &[Url],
    minify: bool,
) -> Result<u64> {
    let mut counter = CountingWriter::new(sink);
    let result = encode(&mut counter, layout, namespaces, urls, minify);
    let written = counter.count();

    match result {
        Ok(()) => {
            debug!(root = layout.root, entries = urls.len(), written, minify, "sitemap written");
            Ok(written)
        }
        Err(source) => {
            debug!(root = layout.root, written, error = %source, "sitemap write aborted");
            Err(Error::Write { written, source })
        }
    }
}

fn encode<W: Write>(
    sink: &mut W,
    layout: Layout,
    namespaces: &[(&str, &str)],
    urls: &[Url],
    minify: bool,
) -> io::Result<()> {
    sink.write_all(XML_HEADER.as_bytes())?;

    let mut writer = if minify {
        Writer::new(&mut *sink)
    } else {
        Writer::new_with_indent(&mut *sink, b' ', 2)
    };

    let mut root = BytesStart::new(layout.root);
    for &(name, value) in namespaces {
        root.push_attribute((name, value));
    }
    writer.write_event(Event::Start(root))?;

    for url in urls {
        write_url(&mut writer, layout.entry, url)?;
    }

    writer.write_event(Event::End(BytesEnd::new(layout.root)))?;

    sink.write_all(b"\n")?;
    sink.flush()
}

fn write_url<W: Write>(writer: &mut Writer<W>, tag: &str, url: &Url) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;

    write_text_element(writer, "loc", &url.loc)?;
    if let Some(last_mod) = &url.last_mod {
        write_text_element(writer, "lastmod", &format_datetime(last_mod))?;
    }
    if let Some(change_freq) = &url.change_freq {
        write_text_element(writer, "changefreq", change_freq.as_str())?;
    }
    if let Some(priority) = url.priority {
        write_text_element(writer, "priority", &priority.to_string())?;
    }
    if let Some(video) = &url.video {
        write_video(writer, video)?;
    }

    writer.write_event(Event::End(BytesEnd::new(tag)))
}

fn write_video<W: Write>(writer: &mut Writer<W>, video: &Video) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("video:video")))?;

    let fields = [
        ("video:thumbnail_loc", &video.thumbnail_loc),
        ("video:title", &video.title),
        ("video:description", &video.description),
        ("video:content_loc", &video.content_loc),
        ("video:player_loc", &video.player_loc),
        ("video:allow_embed", &video.allow_embed),
    ];
    for (name, value) in fields {
        if !value.is_empty() {
            write_text_element(writer, name, value)?;
        }
    }
    if video.duration != 0 {
        write_text_element(writer, "video:duration", &video.duration.to_string())?;
    }
    if let Some(gallery) = &video.gallery_loc {
        write_gallery(writer, gallery)?;
    }

    writer.write_event(Event::End(BytesEnd::new("video:video")))
}

fn write_gallery<W: Write>(writer: &mut Writer<W>, gallery: &GalleryLocation) -> io::Result<()> {
    let mut start = BytesStart::new("gallery_loc");
    if !gallery.title.is_empty() {
        start.push_attribute(("title", gallery.title.as_str()));
    }

    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(&gallery.value)))?;
    writer.write_event(Event::End(BytesEnd::new("gallery_loc")))
}

/// Write `<name>text</name>`, escaping the text.
fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))
}
