//! Ways of turning the attendance page into table rows.
//!
//! [DomExtractor] walks a parsed document and is the default. [RegexExtractor] scans the raw
//! markup and copes with pages broken enough that a DOM walk finds nothing.

use std::{fmt::Display, sync::LazyLock};

use clap::ValueEnum;
use regex::{Captures, Regex};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::error::ParseError;

/// Text content of every cell in a `<tr>`, whitespace collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}

pub trait HtmlRowExtractor {
    fn extract_rows(&self, html: &str) -> Result<Vec<TableRow>, ParseError>;
}

pub struct DomExtractor {
    rows: Selector,
    cells: Selector,
}

impl DomExtractor {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            rows: parse_selector("tr")?,
            cells: parse_selector("td, th")?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::InvalidSelector(format!("{selector}: {e}")))
}

impl HtmlRowExtractor for DomExtractor {
    fn extract_rows(&self, html: &str) -> Result<Vec<TableRow>, ParseError> {
        let document = Html::parse_document(html);
        let rows = document
            .select(&self.rows)
            .map(|row| TableRow {
                cells: row
                    .select(&self.cells)
                    .map(|cell| collapse_whitespace(&cell.text().collect::<String>()))
                    .collect(),
            })
            .filter(|row| !row.cells.is_empty())
            .collect();
        Ok(rows)
    }
}

static ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>").expect("Row pattern should be valid")
});
static CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<t[dh]\b[^>]*>(.*?)</t[dh]\s*>").expect("Cell pattern should be valid")
});
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("Tag pattern should be valid"));
static NUMERIC_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#(?:[xX]([0-9a-fA-F]{1,6})|([0-9]{1,7}));")
        .expect("Numeric entity pattern should be valid")
});

#[derive(Default)]
pub struct RegexExtractor;

impl HtmlRowExtractor for RegexExtractor {
    fn extract_rows(&self, html: &str) -> Result<Vec<TableRow>, ParseError> {
        let rows = ROW
            .captures_iter(html)
            .map(|row| TableRow {
                cells: CELL
                    .captures_iter(&row[1])
                    .map(|cell| {
                        let text = TAG.replace_all(&cell[1], " ");
                        collapse_whitespace(&decode_entities(&text))
                    })
                    .collect(),
            })
            .filter(|row| !row.cells.is_empty())
            .collect();
        Ok(rows)
    }
}

/// Tries the DOM first and only falls back to scanning markup when it finds no rows.
pub struct FallbackExtractor {
    dom: DomExtractor,
    regex: RegexExtractor,
}

impl HtmlRowExtractor for FallbackExtractor {
    #[instrument(skip_all)]
    fn extract_rows(&self, html: &str) -> Result<Vec<TableRow>, ParseError> {
        let rows = self.dom.extract_rows(html)?;
        if !rows.is_empty() {
            return Ok(rows);
        }
        debug!("No rows found in document, scanning markup instead");
        self.regex.extract_rows(html)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    #[default]
    Auto,
    Dom,
    Regex,
}

impl Display for ExtractorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractorKind::Auto => write!(f, "auto"),
            ExtractorKind::Dom => write!(f, "dom"),
            ExtractorKind::Regex => write!(f, "regex"),
        }
    }
}

pub fn create_extractor(kind: ExtractorKind) -> Result<Box<dyn HtmlRowExtractor>, ParseError> {
    Ok(match kind {
        ExtractorKind::Auto => Box::new(FallbackExtractor {
            dom: DomExtractor::new()?,
            regex: RegexExtractor,
        }),
        ExtractorKind::Dom => Box::new(DomExtractor::new()?),
        ExtractorKind::Regex => Box::new(RegexExtractor),
    })
}

fn collapse_whitespace(value: &str) -> String {
    value
        .replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decodes numeric references and the named entities the portal emits inside the table. Other
/// named entities are left as written. `&amp;` goes last so `&amp;lt;` stays `&lt;`.
fn decode_entities(value: &str) -> String {
    NUMERIC_ENTITY
        .replace_all(value, |captures: &Captures| {
            let code = match (captures.get(1), captures.get(2)) {
                (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (_, Some(decimal)) => decimal.as_str().parse().ok(),
                _ => None,
            };
            code.and_then(char::from_u32)
                .map_or_else(|| captures[0].to_string(), String::from)
        })
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::{
        create_extractor, decode_entities, ExtractorKind, HtmlRowExtractor, RegexExtractor,
        TableRow,
    };
    use crate::portal::TEST_PAGE as PAGE;

    fn row(cells: &[&str]) -> TableRow {
        TableRow {
            cells: cells.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn expected() -> Vec<TableRow> {
        vec![
            row(&["Fecha", "Presencia", "Detalle"]),
            row(&["17/10/2026", "08:42", "07:58:10 E | 16:40:00 S"]),
            row(&["18/10/2026", "", "08:01:12 E | 12:00:40 S | 12:45:00 E"]),
        ]
    }

    #[test]
    fn dom_extractor_reads_cells() -> Result<()> {
        let rows = create_extractor(ExtractorKind::Dom)?.extract_rows(PAGE)?;
        assert_eq!(rows, expected());
        Ok(())
    }

    #[test]
    fn regex_extractor_reads_cells() -> Result<()> {
        let rows = RegexExtractor.extract_rows(PAGE)?;
        assert_eq!(rows, expected());
        Ok(())
    }

    #[test]
    fn regex_extractor_tolerates_unclosed_cells() -> Result<()> {
        let rows = RegexExtractor.extract_rows("<TR><TD>a &amp; b<TD>c</TD></TR>")?;
        assert_eq!(rows, vec![row(&["a & b c"])]);
        Ok(())
    }

    #[test]
    fn regex_extractor_decodes_numeric_entities() -> Result<()> {
        let rows = RegexExtractor.extract_rows("<tr><td>Mu&#241;oz</td><td>Jos&#xE9;</td></tr>")?;
        assert_eq!(rows, vec![row(&["Muñoz", "José"])]);
        Ok(())
    }

    #[test]
    fn entities_are_decoded_once() {
        assert_eq!(decode_entities("&#39;&apos;&#x27;"), "'''");
        assert_eq!(decode_entities("&amp;#39; &amp;lt;"), "&#39; &lt;");
        assert_eq!(decode_entities("&#xD800; &#9999999; &copy;"), "&#xD800; &#9999999; &copy;");
    }

    #[test]
    fn empty_page_has_no_rows() -> Result<()> {
        for kind in [ExtractorKind::Auto, ExtractorKind::Dom, ExtractorKind::Regex] {
            assert!(create_extractor(kind)?.extract_rows("<p>Session expired</p>")?.is_empty());
        }
        Ok(())
    }
}
