//! Content blocks.
//!
//! A [`Block`] is one immutable unit of an email. The set of variants is
//! closed; each backend renders every variant through a `match` in
//! [`EmailRenderer`](crate::EmailRenderer).

use std::borrow::Cow;

use chrono::NaiveDate;
use mailtpl_config::{ButtonColor, Configuration, NumberPattern};

use crate::error::BlockError;
use crate::format::{Amount, format_amount, format_date};

/// Horizontal alignment of text and buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Paragraph or heading level of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TextStyle {
    #[default]
    Paragraph,
    H1,
    H2,
    H3,
}

impl TextStyle {
    /// HTML element name.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Paragraph => "p",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
        }
    }
}

/// Layout region a block is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Header,
    Body,
    Footer,
}

/// One content unit of an email.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Block {
    Header(Header),
    Text(Text),
    Html(Html),
    Button(Button),
    AttributeList(AttributeList),
    Table(Table),
    FooterText(FooterText),
    FooterImage(FooterImage),
    Copyright(Copyright),
}

impl Block {
    /// Short name used in errors and log output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Header(_) => "header",
            Self::Text(_) => "text",
            Self::Html(_) => "html",
            Self::Button(_) => "button",
            Self::AttributeList(_) => "attribute list",
            Self::Table(_) => "table",
            Self::FooterText(_) => "footer text",
            Self::FooterImage(_) => "footer image",
            Self::Copyright(_) => "copyright",
        }
    }

    #[must_use]
    pub fn region(&self) -> Region {
        match self {
            Self::Header(_) => Region::Header,
            Self::FooterText(_) | Self::FooterImage(_) | Self::Copyright(_) => Region::Footer,
            Self::Text(_)
            | Self::Html(_)
            | Self::Button(_)
            | Self::AttributeList(_)
            | Self::Table(_) => Region::Body,
        }
    }

    /// Check that all required fields are present and consistent.
    ///
    /// # Errors
    ///
    /// Returns `BlockError` naming the block kind and offending field.
    pub fn validate(&self) -> Result<(), BlockError> {
        match self {
            Self::Header(header) => header.validate(),
            Self::Text(text) => text.validate(),
            Self::Html(html) => html.validate(),
            Self::Button(button) => button.validate(),
            Self::AttributeList(list) => list.validate(),
            Self::Table(table) => table.validate(),
            Self::FooterText(_) => Ok(()),
            Self::FooterImage(image) => image.validate(),
            Self::Copyright(copyright) => copyright.validate(),
        }
    }
}

/// Header with either a logo or a plain-text title.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Header {
    pub content: HeaderContent,
    /// Wraps the logo or title in a link.
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HeaderContent {
    Logo(Logo),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Logo {
    pub src: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Alternative text, also used as the plain-text banner.
    pub alt: Option<String>,
}

impl Header {
    fn validate(&self) -> Result<(), BlockError> {
        const BLOCK: &str = "header";
        match &self.content {
            HeaderContent::Logo(logo) => {
                require_non_empty(BLOCK, "logo", &logo.src)?;
                require_positive(BLOCK, "logo_width", logo.width)?;
                require_positive(BLOCK, "logo_height", logo.height)?;
                require_optional_non_empty(BLOCK, "alt", logo.alt.as_deref())?;
            }
            HeaderContent::Text(text) => require_non_empty(BLOCK, "text", text)?,
        }
        require_optional_non_empty(BLOCK, "link", self.link.as_deref())
    }
}

/// Escaped paragraph or heading.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Text {
    pub content: String,
    pub style: TextStyle,
    pub alignment: Alignment,
    pub link: Option<String>,
}

impl Text {
    fn validate(&self) -> Result<(), BlockError> {
        require_non_empty("text", "content", &self.content)?;
        require_optional_non_empty("text", "link", self.link.as_deref())
    }
}

/// Caller-supplied markup and its plain-text counterpart, inserted unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Html {
    pub html: String,
    pub text: String,
}

impl Html {
    fn validate(&self) -> Result<(), BlockError> {
        require_non_empty("html", "html", &self.html)?;
        require_non_empty("html", "text", &self.text)
    }
}

/// Call-to-action link styled as a button.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Button {
    pub label: String,
    pub url: String,
    /// Palette token; `None` uses the configured default.
    pub color: Option<ButtonColor>,
    pub alignment: Alignment,
}

impl Button {
    fn validate(&self) -> Result<(), BlockError> {
        require_non_empty("button", "label", &self.label)?;
        require_non_empty("button", "url", &self.url)
    }

    /// Effective color token.
    #[must_use]
    pub fn color_or_default(&self, config: &Configuration) -> ButtonColor {
        self.color.unwrap_or(config.button().default_color)
    }
}

/// Value of an attribute list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value {
    Text(String),
    Amount(Amount),
    Date(NaiveDate),
}

impl Value {
    /// Display form, formatted with the configured amount and date patterns.
    #[must_use]
    pub fn display<'a>(&'a self, config: &Configuration) -> Cow<'a, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Amount(amount) => Cow::Owned(format_amount(
                *amount,
                config.format().amount_pattern(),
                config.format(),
            )),
            Self::Date(date) => Cow::Owned(format_date(*date, config.format())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    pub key: String,
    pub value: Value,
}

/// Ordered key/value pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttributeList {
    pub entries: Vec<Attribute>,
}

impl AttributeList {
    fn validate(&self) -> Result<(), BlockError> {
        const BLOCK: &str = "attribute list";
        if self.entries.is_empty() {
            return Err(BlockError::new(BLOCK, "entries", "needs at least one key/value pair"));
        }
        for entry in &self.entries {
            require_non_empty(BLOCK, "key", &entry.key)?;
        }
        Ok(())
    }
}

/// Table layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TableLayout {
    #[default]
    Simple,
    /// First column holds an image for every item row.
    WithImage,
}

/// Row position inside a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Item,
    Footer,
}

/// Table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Cell {
    Text(String),
    Amount(Amount),
}

impl Cell {
    #[must_use]
    pub fn is_amount(&self) -> bool {
        matches!(self, Self::Amount(_))
    }

    /// Display form; amounts use the table's pattern.
    #[must_use]
    pub fn display<'a>(&'a self, pattern: &NumberPattern, config: &Configuration) -> Cow<'a, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Amount(amount) => Cow::Owned(format_amount(*amount, pattern, config.format())),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Amount> for Cell {
    fn from(value: Amount) -> Self {
        Self::Amount(value)
    }
}

/// Item or footer row. Only item rows of an image table carry an image.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableRow {
    pub image: Option<String>,
    pub cells: Vec<Cell>,
}

/// Table with header, item and footer rows (e.g. an invoice).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Table {
    pub layout: TableLayout,
    /// Amount pattern; `None` uses the configured default.
    pub format: Option<NumberPattern>,
    /// Width of item images in pixels.
    pub image_width: Option<u32>,
    pub header: Vec<String>,
    pub items: Vec<TableRow>,
    pub footers: Vec<TableRow>,
}

impl Table {
    /// Number of columns, including the image column.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.header.len()
    }

    /// Number of cells per row (columns without the image column).
    #[must_use]
    pub fn data_columns(&self) -> usize {
        match self.layout {
            TableLayout::Simple => self.header.len(),
            TableLayout::WithImage => self.header.len().saturating_sub(1),
        }
    }

    /// Header labels of the data columns.
    #[must_use]
    pub fn data_header(&self) -> &[String] {
        &self.header[self.columns() - self.data_columns()..]
    }

    /// Amount pattern in effect for this table.
    #[must_use]
    pub fn pattern<'a>(&'a self, config: &'a Configuration) -> &'a NumberPattern {
        self.format
            .as_ref()
            .unwrap_or_else(|| config.format().amount_pattern())
    }

    /// Per data column: whether it holds amounts and is right-aligned.
    #[must_use]
    pub fn amount_columns(&self) -> Vec<bool> {
        (0..self.data_columns())
            .map(|column| {
                self.items
                    .iter()
                    .chain(&self.footers)
                    .any(|row| row.cells.get(column).is_some_and(Cell::is_amount))
            })
            .collect()
    }

    fn validate(&self) -> Result<(), BlockError> {
        const BLOCK: &str = "table";
        let min_columns = match self.layout {
            TableLayout::Simple => 1,
            TableLayout::WithImage => 2,
        };
        if self.header.len() < min_columns {
            return Err(BlockError::new(
                BLOCK,
                "header_row",
                format!("needs at least {min_columns} column(s)"),
            ));
        }
        require_positive(BLOCK, "image_width", self.image_width)?;

        let expected = self.data_columns();
        let with_image = self.layout == TableLayout::WithImage;
        for (kind, row) in self
            .items
            .iter()
            .map(|row| (RowKind::Item, row))
            .chain(self.footers.iter().map(|row| (RowKind::Footer, row)))
        {
            let field = match kind {
                RowKind::Item => "item_row",
                RowKind::Header | RowKind::Footer => "footer_row",
            };
            if row.cells.len() != expected {
                return Err(BlockError::new(
                    BLOCK,
                    field,
                    format!(
                        "has {} cell(s) but the header defines {expected}",
                        row.cells.len()
                    ),
                ));
            }
            match (kind, &row.image) {
                (RowKind::Item, None) if with_image => {
                    return Err(BlockError::new(BLOCK, field, "needs an image"));
                }
                (RowKind::Item, Some(src)) if with_image => {
                    require_non_empty(BLOCK, "image", src)?;
                }
                (_, Some(_)) => {
                    return Err(BlockError::new(BLOCK, field, "cannot carry an image"));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Small print in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FooterText {
    pub text: String,
}

/// Image in the footer, optionally linked.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FooterImage {
    pub src: String,
    pub width: Option<u32>,
    pub alt: Option<String>,
    pub link: Option<String>,
}

impl FooterImage {
    fn validate(&self) -> Result<(), BlockError> {
        require_non_empty("footer image", "src", &self.src)?;
        require_positive("footer image", "width", self.width)?;
        require_optional_non_empty("footer image", "alt", self.alt.as_deref())?;
        require_optional_non_empty("footer image", "link", self.link.as_deref())
    }
}

/// `© <year> <name>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Copyright {
    pub name: String,
    pub url: Option<String>,
    /// Appended verbatim (e.g. ". All rights reserved.").
    pub suffix: Option<String>,
}

impl Copyright {
    fn validate(&self) -> Result<(), BlockError> {
        require_non_empty("copyright", "name", &self.name)?;
        require_optional_non_empty("copyright", "url", self.url.as_deref())
    }
}

fn require_non_empty(block: &'static str, field: &'static str, value: &str) -> Result<(), BlockError> {
    if value.trim().is_empty() {
        return Err(BlockError::new(block, field, "cannot be empty"));
    }
    Ok(())
}

fn require_optional_non_empty(
    block: &'static str,
    field: &'static str,
    value: Option<&str>,
) -> Result<(), BlockError> {
    match value {
        Some(value) => require_non_empty(block, field, value),
        None => Ok(()),
    }
}

fn require_positive(
    block: &'static str,
    field: &'static str,
    value: Option<u32>,
) -> Result<(), BlockError> {
    if value == Some(0) {
        return Err(BlockError::new(block, field, "must be greater than 0"));
    }
    Ok(())
}
