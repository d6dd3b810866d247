//! Tolerant streaming XML decoder.
//!
//! Elements are matched on their local names, so `video:title` and `title`
//! decode the same. Unknown elements are skipped together with their
//! subtrees, unknown attributes are ignored, and optional children may come
//! in any order. Whitespace between elements is ignored; element text is
//! kept verbatim and only trimmed where it is parsed into a number or date.

use std::io::{BufReader, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use sitemap_common::datetime::parse_datetime;
use tracing::{debug, trace};

use crate::encode::Layout;
use crate::{ChangeFreq, Error, GalleryLocation, Result, Url, Video};

/// Parse a document, appending its entries to `urls`.
///
/// Returns the number of input bytes consumed. Reading stops at the end of
/// the root element; trailing content is not examined.
pub(crate) fn read_document<R: Read>(source: R, layout: Layout, urls: &mut Vec<Url>) -> Result<u64> {
    let mut decoder = Decoder::new(source);
    let before = urls.len();

    decoder.read_root(layout, urls)?;

    let consumed = decoder.position();
    debug!(root = layout.root, entries = urls.len() - before, consumed, "sitemap read");
    Ok(consumed)
}

/// Owned copy of the parser events the decoder cares about.
#[derive(Debug)]
enum Token {
    Start { name: String, attributes: Vec<(String, String)> },
    Empty { name: String, attributes: Vec<(String, String)> },
    End,
    Text(String),
    Eof,
    Other,
}

struct Decoder<R> {
    reader: Reader<BufReader<R>>,
    buf: Vec<u8>,
}

impl<R: Read> Decoder<R> {
    fn new(source: R) -> Self {
        let reader = Reader::from_reader(BufReader::new(source));

        Self {
            reader,
            buf: Vec::new(),
        }
    }

    fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    fn next_token(&mut self) -> Result<Token> {
        self.buf.clear();
        let event = match self.reader.read_event_into(&mut self.buf) {
            Ok(event) => event,
            Err(source) => {
                return Err(Error::Xml {
                    offset: self.reader.error_position() as u64,
                    source,
                })
            }
        };

        let token = match event {
            Event::Start(e) => Token::Start {
                name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
                attributes: attributes(&e),
            },
            Event::Empty(e) => Token::Empty {
                name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
                attributes: attributes(&e),
            },
            Event::End(_) => Token::End,
            Event::Text(e) => match e.unescape() {
                Ok(text) => Token::Text(text.into_owned()),
                Err(source) => {
                    return Err(Error::Xml {
                        offset: self.reader.buffer_position() as u64,
                        source: source.into(),
                    })
                }
            },
            Event::CData(e) => match e.decode() {
                Ok(text) => Token::Text(text.into_owned()),
                Err(source) => {
                    return Err(Error::Xml {
                        offset: self.reader.buffer_position() as u64,
                        source: source.into(),
                    })
                }
            },
            Event::Eof => Token::Eof,
            _ => Token::Other, // Declarations, comments, processing instructions, doctype
        };

        Ok(token)
    }

    fn read_root(&mut self, layout: Layout, urls: &mut Vec<Url>) -> Result<()> {
        loop {
            match self.next_token()? {
                Token::Start { name, .. } => {
                    self.expect_root(layout, name)?;
                    return self.read_entries(layout, urls);
                }
                Token::Empty { name, .. } => return self.expect_root(layout, name),
                Token::Text(text) if !text.trim().is_empty() => {
                    return Err(Error::TextOutsideRoot {
                        offset: self.position(),
                    })
                }
                Token::Eof => {
                    return Err(Error::MissingRoot {
                        offset: self.position(),
                        expected: layout.root,
                    })
                }
                _ => {}
            }
        }
    }

    fn expect_root(&self, layout: Layout, name: String) -> Result<()> {
        if name == layout.root {
            Ok(())
        } else {
            Err(Error::UnexpectedRoot {
                offset: self.position(),
                expected: layout.root,
                found: name,
            })
        }
    }

    fn read_entries(&mut self, layout: Layout, urls: &mut Vec<Url>) -> Result<()> {
        loop {
            match self.next_token()? {
                Token::Start { name, .. } if name == layout.entry => urls.push(self.read_url(layout.entry)?),
                Token::Start { name, .. } => self.skip(&name)?,
                Token::Empty { name, .. } if name == layout.entry => urls.push(Url::default()),
                Token::End => return Ok(()),
                Token::Eof => return Err(self.unexpected_eof(layout.root)),
                _ => {}
            }
        }
    }

    fn read_url(&mut self, tag: &'static str) -> Result<Url> {
        let mut url = Url::default();

        loop {
            match self.next_token()? {
                Token::Start { name, .. } => match name.as_str() {
                    "loc" => url.loc = self.read_text("loc")?,
                    "lastmod" => {
                        let text = self.read_text("lastmod")?;
                        url.last_mod = if text.trim().is_empty() {
                            None
                        } else {
                            Some(parse_datetime(&text).map_err(|_| self.invalid("lastmod", text))?)
                        };
                    }
                    "changefreq" => {
                        let text = self.read_text("changefreq")?;
                        url.change_freq = (!text.is_empty()).then(|| ChangeFreq::from(text));
                    }
                    "priority" => {
                        let text = self.read_text("priority")?;
                        url.priority = if text.trim().is_empty() {
                            None
                        } else {
                            Some(text.trim().parse::<f32>().map_err(|_| self.invalid("priority", text))?)
                        };
                    }
                    "video" => url.video = Some(self.read_video()?),
                    _ => self.skip(&name)?,
                },
                Token::Empty { name, .. } => {
                    if name == "video" {
                        url.video = Some(Video::default());
                    }
                }
                Token::End => return Ok(url),
                Token::Eof => return Err(self.unexpected_eof(tag)),
                _ => {}
            }
        }
    }

    fn read_video(&mut self) -> Result<Video> {
        let mut video = Video::default();

        loop {
            match self.next_token()? {
                Token::Start { name, attributes } => match name.as_str() {
                    "thumbnail_loc" => video.thumbnail_loc = self.read_text("video:thumbnail_loc")?,
                    "title" => video.title = self.read_text("video:title")?,
                    "description" => video.description = self.read_text("video:description")?,
                    "content_loc" => video.content_loc = self.read_text("video:content_loc")?,
                    "player_loc" => video.player_loc = self.read_text("video:player_loc")?,
                    "allow_embed" => video.allow_embed = self.read_text("video:allow_embed")?,
                    "duration" => {
                        let text = self.read_text("video:duration")?;
                        video.duration = if text.trim().is_empty() {
                            0
                        } else {
                            text.trim()
                                .parse::<u64>()
                                .map_err(|_| self.invalid("video:duration", text))?
                        };
                    }
                    "gallery_loc" => {
                        let value = self.read_text("gallery_loc")?;
                        video.gallery_loc = Some(GalleryLocation {
                            title: title_attribute(attributes),
                            value,
                        });
                    }
                    _ => self.skip(&name)?,
                },
                Token::Empty { name, attributes } => {
                    if name == "gallery_loc" {
                        video.gallery_loc = Some(GalleryLocation {
                            title: title_attribute(attributes),
                            value: String::new(),
                        });
                    }
                }
                Token::End => return Ok(video),
                Token::Eof => return Err(self.unexpected_eof("video:video")),
                _ => {}
            }
        }
    }

    /// Collect the text of the element just opened, up to its end tag.
    fn read_text(&mut self, element: &str) -> Result<String> {
        let mut text = String::new();

        loop {
            match self.next_token()? {
                Token::Text(chunk) => text.push_str(&chunk),
                Token::Start { name, .. } => self.skip(&name)?,
                Token::End => return Ok(text),
                Token::Eof => return Err(self.unexpected_eof(element)),
                _ => {}
            }
        }
    }

    /// Skip the rest of the element just opened, including nested children.
    fn skip(&mut self, element: &str) -> Result<()> {
        trace!(element, "skipping unknown element");
        let mut depth = 1usize;

        while depth > 0 {
            match self.next_token()? {
                Token::Start { .. } => depth += 1,
                Token::End => depth -= 1,
                Token::Eof => return Err(self.unexpected_eof(element)),
                _ => {}
            }
        }

        Ok(())
    }

    fn unexpected_eof(&self, element: &str) -> Error {
        Error::UnexpectedEof {
            offset: self.position(),
            element: element.to_string(),
        }
    }

    fn invalid(&self, element: &'static str, value: String) -> Error {
        Error::InvalidValue {
            offset: self.position(),
            element,
            value,
        }
    }
}

/// Attributes as (local name, unescaped value) pairs; malformed ones are dropped.
fn attributes(e: &quick_xml::events::BytesStart<'_>) -> Vec<(String, String)> {
    e.attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = match attr.unescape_value() {
                Ok(value) => value.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            };
            (key, value)
        })
        .collect()
}

fn title_attribute(attributes: Vec<(String, String)>) -> String {
    attributes
        .into_iter()
        .find(|(key, _)| key == "title")
        .map(|(_, value)| value)
        .unwrap_or_default()
}
