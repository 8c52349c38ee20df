//! Minimal start-tag scanner for server-rendered dashboard pages.
//!
//! We only need element attributes (ids, `data-*`, `onclick`), not a DOM, so
//! this walks start tags and ignores text, end tags, comments and the bodies
//! of `<script>`/`<style>`. Attribute values get one pass of character
//! reference decoding, matching what a browser exposes through `dataset`.

/// One attribute as written on the element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A start tag and its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<Attribute>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// First attribute named `name` (names are lowercased when scanned).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// `data-<key>` attribute value.
    pub fn dataset(&self, key: &str) -> Option<&str> {
        let name = format!("data-{key}");
        self.attr(&name)
    }
}

/// Scan every start tag in `html`.
pub fn scan_elements(html: &str) -> Vec<Element> {
    let mut out = Vec::new();
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        rest = &rest[lt + 1..];

        if let Some(after) = rest.strip_prefix("!--") {
            rest = after.find("-->").map(|i| &after[i + 3..]).unwrap_or("");
            continue;
        }
        if rest.starts_with(['/', '!', '?']) {
            rest = rest.find('>').map(|i| &rest[i + 1..]).unwrap_or("");
            continue;
        }
        if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            continue;
        }

        let name_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
            .unwrap_or(rest.len());
        let tag = rest[..name_len].to_ascii_lowercase();
        let (attrs, remaining) = parse_attributes(&rest[name_len..]);
        rest = remaining;

        if tag == "script" || tag == "style" {
            let close = format!("</{tag}");
            rest = find_ignore_ascii_case(rest, &close)
                .map(|i| &rest[i..])
                .unwrap_or("");
        }

        out.push(Element { tag, attrs });
    }

    out
}

fn parse_attributes(mut s: &str) -> (Vec<Attribute>, &str) {
    let mut attrs = Vec::new();
    loop {
        s = s.trim_start();
        if s.is_empty() {
            return (attrs, s);
        }
        if let Some(r) = s.strip_prefix('>') {
            return (attrs, r);
        }
        if let Some(r) = s.strip_prefix('/') {
            s = r;
            continue;
        }

        let name_end = s
            .find(|c: char| c.is_whitespace() || matches!(c, '=' | '>' | '/'))
            .unwrap_or(s.len());
        if name_end == 0 {
            // Stray `=`.
            s = &s[1..];
            continue;
        }
        let name = s[..name_end].to_ascii_lowercase();
        s = s[name_end..].trim_start();

        let raw_value = match s.strip_prefix('=') {
            Some(r) => {
                let r = r.trim_start();
                match r.chars().next() {
                    Some(q @ ('"' | '\'')) => {
                        let body = &r[1..];
                        let end = body.find(q).unwrap_or(body.len());
                        s = body.get(end + 1..).unwrap_or("");
                        &body[..end]
                    }
                    _ => {
                        let end = r
                            .find(|c: char| c.is_whitespace() || c == '>')
                            .unwrap_or(r.len());
                        s = &r[end..];
                        &r[..end]
                    }
                }
            }
            None => "",
        };

        attrs.push(Attribute {
            name,
            value: decode_character_references(raw_value),
        });
    }
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Decode HTML character references once (`&quot;`, `&#39;`, `&#x27;`, ...).
///
/// Unknown or unterminated references are kept literally, so text that was
/// escaped twice comes out escaped once.
pub fn decode_character_references(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .get(1..rest.len().min(12))
            .and_then(|window| window.find(';'))
            .and_then(|semi| {
                let name = &rest[1..semi + 1];
                reference_char(name).map(|ch| (ch, semi + 2))
            });

        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn reference_char(name: &str) -> Option<char> {
    match name {
        "quot" => Some('"'),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
