//! RSS item extraction.
//!
//! [`items`] walks an RSS document lazily with `quick-xml` and yields one
//! [`EvidenceItem`] per `<item>` that carries both a title and a link.
//! Items missing either are skipped. A malformed document ends the
//! iteration: whatever was read before the error is still returned.

use crate::models::EvidenceItem;
use quick_xml::Reader;
use quick_xml::events::Event;
use quick_xml::escape::resolve_predefined_entity;
use scraper::Html;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Description,
}

#[derive(Debug, Default)]
struct PartialItem {
    title: String,
    link: String,
    description: String,
}

impl PartialItem {
    fn buffer(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Description => &mut self.description,
        }
    }

    fn finish(self) -> Option<EvidenceItem> {
        let title = collapse_whitespace(&self.title);
        let link = self.link.trim().to_string();
        if title.is_empty() || link.is_empty() {
            debug!(%title, %link, "Skipping incomplete RSS item");
            return None;
        }
        Some(EvidenceItem::new(title, link).with_summary(strip_markup(&self.description)))
    }
}

/// Lazy iterator over the well-formed `<item>` records of an RSS document.
pub struct RssItems<'a> {
    reader: Reader<&'a [u8]>,
    done: bool,
}

/// Iterate the items of `xml` in document order.
pub fn items(xml: &str) -> RssItems<'_> {
    RssItems {
        reader: Reader::from_str(xml),
        done: false,
    }
}

/// The first `limit` well-formed items of `xml`.
pub fn extract(xml: &str, limit: usize) -> Vec<EvidenceItem> {
    items(xml).take(limit).collect()
}

impl Iterator for RssItems<'_> {
    type Item = EvidenceItem;

    fn next(&mut self) -> Option<EvidenceItem> {
        if self.done {
            return None;
        }

        let mut current: Option<PartialItem> = None;
        let mut field: Option<Field> = None;

        loop {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    warn!(
                        error = %e,
                        position = self.reader.buffer_position(),
                        "RSS parse error; stopping extraction"
                    );
                    self.done = true;
                    return None;
                }
            };

            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"item" => {
                        current = Some(PartialItem::default());
                        field = None;
                    }
                    b"title" if current.is_some() => field = Some(Field::Title),
                    b"link" if current.is_some() => field = Some(Field::Link),
                    b"description" if current.is_some() => field = Some(Field::Description),
                    _ => {}
                },
                // Atom-style `<link href="..."/>` inside an RSS item.
                Event::Empty(e) if e.local_name().as_ref() == b"link" => {
                    if let Some(item) = current.as_mut() {
                        if item.link.is_empty() {
                            if let Ok(Some(href)) = e.try_get_attribute("href") {
                                item.link = match href.unescape_value() {
                                    Ok(value) => value.into_owned(),
                                    Err(_) => String::from_utf8_lossy(&href.value).into_owned(),
                                };
                            }
                        }
                    }
                }
                Event::Text(e) => push_text(&mut current, field, &String::from_utf8_lossy(&e)),
                Event::CData(e) => push_text(&mut current, field, &String::from_utf8_lossy(&e)),
                Event::GeneralRef(e) => {
                    let name = String::from_utf8_lossy(&e).into_owned();
                    push_text(&mut current, field, &resolve_reference(&name));
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"item" => {
                        field = None;
                        if let Some(item) = current.take().and_then(PartialItem::finish) {
                            return Some(item);
                        }
                    }
                    b"title" | b"link" | b"description" => field = None,
                    _ => {}
                },
                Event::Eof => {
                    self.done = true;
                    return None;
                }
                _ => {}
            }
        }
    }
}

fn push_text(current: &mut Option<PartialItem>, field: Option<Field>, text: &str) {
    if let (Some(item), Some(field)) = (current.as_mut(), field) {
        item.buffer(field).push_str(text);
    }
}

/// Expand an entity or character reference (`amp`, `#38`, `#x26`).
fn resolve_reference(name: &str) -> String {
    if let Some(resolved) = resolve_predefined_entity(name) {
        return resolved.to_string();
    }
    let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse::<u32>().ok()
    } else {
        None
    };
    match code.and_then(char::from_u32) {
        Some(c) => c.to_string(),
        None => format!("&{name};"),
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Descriptions are usually escaped HTML; keep only the visible text.
fn strip_markup(description: &str) -> Option<String> {
    if description.trim().is_empty() {
        return None;
    }
    let fragment = Html::parse_fragment(description);
    let text = collapse_whitespace(&fragment.root_element().text().collect::<String>());
    if text.is_empty() { None } else { Some(text) }
}
