//! Fluent email builder and its per-block sub-builders.

use std::fmt;

use chrono::NaiveDate;
use mailtpl_config::{ButtonColor, Configuration, NumberPattern};
use mailtpl_renderer::{
    Alignment, Amount, Attribute, AttributeList, Block, BlockError, Button, Cell, Clock,
    Copyright, Document, FooterImage, FooterText, Header, HeaderContent, Html, Logo,
    RenderedEmail, SystemClock, Table, TableLayout, TableRow, Text, TextStyle, Value,
};

use crate::error::{Error, Result};

/// Lifecycle of an [`EmailBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// No block appended yet.
    Empty,
    /// At least one block appended.
    Building,
    /// [`EmailBuilder::build`] succeeded; the builder accepts nothing more.
    Built,
}

/// Accumulates blocks in append order and renders them once.
///
/// Each block is configured through a sub-builder entered from this type and
/// finished with `done()`, which validates the block, appends it and hands
/// back the builder:
///
/// ```
/// use mailtpl::{EmailBuilder, FixedClock};
///
/// let mut builder = EmailBuilder::new().with_clock(FixedClock::new(2024));
/// builder
///     .header().text("test").done()?
///     .text("sample-text").done()?
///     .button("button 1", "http://adasd").done()?
///     .copyright("rocketbase").url("https://www.rocketbase.io").done()?;
///
/// let email = builder.build()?;
/// assert!(email.text().ends_with("©2024 rocketbase -> https://www.rocketbase.io\n"));
/// # Ok::<(), mailtpl::Error>(())
/// ```
pub struct EmailBuilder {
    document: Document,
    clock: Box<dyn Clock>,
    state: BuildState,
}

impl EmailBuilder {
    /// Builder with the default configuration and the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::from_document(Document::new(Configuration::new_default()))
    }

    /// Builder rendering with `config`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if `config` fails validation.
    pub fn with_configuration(config: Configuration) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_document(Document::new(config)))
    }

    fn from_document(document: Document) -> Self {
        Self {
            document,
            clock: Box::new(SystemClock),
            state: BuildState::Empty,
        }
    }

    /// Replace the source of the copyright year.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn configuration(&self) -> &Configuration {
        self.document.configuration()
    }

    /// Blocks appended so far, in render order.
    pub fn blocks(&self) -> &[Block] {
        self.document.blocks()
    }

    /// Header with a logo or a plain-text title.
    pub fn header(&mut self) -> HeaderBuilder<'_> {
        HeaderBuilder {
            parent: self,
            logo: None,
            logo_width: None,
            logo_height: None,
            alt: None,
            text: None,
            link: None,
        }
    }

    /// Paragraph or heading; HTML output escapes `text`.
    pub fn text(&mut self, text: impl Into<String>) -> TextBuilder<'_> {
        TextBuilder {
            parent: self,
            block: Text {
                content: text.into(),
                style: TextStyle::Paragraph,
                alignment: Alignment::Left,
                link: None,
            },
        }
    }

    /// Caller-supplied HTML and plain text, both inserted unchanged.
    pub fn html(&mut self, html: impl Into<String>, text: impl Into<String>) -> HtmlBuilder<'_> {
        HtmlBuilder {
            parent: self,
            block: Html {
                html: html.into(),
                text: text.into(),
            },
        }
    }

    /// Centered call-to-action button in the configured default color.
    pub fn button(&mut self, label: impl Into<String>, url: impl Into<String>) -> ButtonBuilder<'_> {
        ButtonBuilder {
            parent: self,
            block: Button {
                label: label.into(),
                url: url.into(),
                color: None,
                alignment: Alignment::Center,
            },
        }
    }

    /// Key/value list.
    pub fn attributes(&mut self) -> AttributeListBuilder<'_> {
        AttributeListBuilder {
            parent: self,
            entries: Vec::new(),
        }
    }

    /// Table of text and amount cells.
    pub fn table(&mut self) -> TableBuilder<'_> {
        TableBuilder::new(self, TableLayout::Simple)
    }

    /// Table whose first column shows an image for every item row.
    pub fn table_with_image(&mut self) -> TableBuilder<'_> {
        TableBuilder::new(self, TableLayout::WithImage)
    }

    /// Small muted footer text.
    pub fn footer_text(&mut self, text: impl Into<String>) -> FooterTextBuilder<'_> {
        FooterTextBuilder {
            parent: self,
            block: FooterText { text: text.into() },
        }
    }

    pub fn footer_image(&mut self, url: impl Into<String>) -> FooterImageBuilder<'_> {
        FooterImageBuilder {
            parent: self,
            block: FooterImage {
                src: url.into(),
                width: None,
                alt: None,
                link: None,
            },
        }
    }

    /// `© <year> <name>` footer line; the year comes from the clock at build time.
    pub fn copyright(&mut self, name: impl Into<String>) -> CopyrightBuilder<'_> {
        CopyrightBuilder {
            parent: self,
            block: Copyright {
                name: name.into(),
                url: None,
                suffix: None,
            },
        }
    }

    /// Render the HTML and plain-text outputs.
    ///
    /// The clock is read once, so both outputs carry the same year.
    ///
    /// # Errors
    ///
    /// Returns `Error::DocumentAlreadyBuilt` when called a second time.
    pub fn build(&mut self) -> Result<RenderedEmail> {
        self.ensure_open("build")?;
        let year = self.clock.current_year();
        let email = self.document.render(year);
        self.state = BuildState::Built;
        Ok(email)
    }

    fn append(&mut self, block: Block) -> Result<&mut Self> {
        self.ensure_open(&format!("append {} block", block.kind()))?;
        self.document.push(block)?;
        self.state = BuildState::Building;
        Ok(self)
    }

    fn ensure_open(&self, operation: &str) -> Result<()> {
        if self.state == BuildState::Built {
            tracing::debug!(operation, "Rejected operation on built email");
            return Err(Error::DocumentAlreadyBuilt {
                operation: operation.to_owned(),
            });
        }
        Ok(())
    }
}

impl Default for EmailBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EmailBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailBuilder")
            .field("document", &self.document)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Structural error detected before the block exists.
fn reject(block: &'static str, field: &'static str, reason: &str) -> Error {
    tracing::debug!(block, field, reason, "Rejected block");
    Error::InvalidBlockData(BlockError::new(block, field, reason))
}

/// Configures a [`Header`] block.
#[must_use = "call `done()` to append the block"]
pub struct HeaderBuilder<'a> {
    parent: &'a mut EmailBuilder,
    logo: Option<String>,
    logo_width: Option<u32>,
    logo_height: Option<u32>,
    alt: Option<String>,
    text: Option<String>,
    link: Option<String>,
}

impl<'a> HeaderBuilder<'a> {
    pub fn logo(mut self, url: impl Into<String>) -> Self {
        self.logo = Some(url.into());
        self
    }

    pub fn logo_width(mut self, px: u32) -> Self {
        self.logo_width = Some(px);
        self
    }

    pub fn logo_height(mut self, px: u32) -> Self {
        self.logo_height = Some(px);
        self
    }

    /// Logo alternative text, also shown as the plain-text banner.
    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Plain-text title instead of a logo.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    /// Validate and append the header.
    ///
    /// # Errors
    ///
    /// Fails unless exactly one of logo and text is set, or when logo
    /// options are combined with a text header.
    pub fn done(self) -> Result<&'a mut EmailBuilder> {
        self.parent.ensure_open("append header block")?;
        let content = match (self.logo, self.text) {
            (Some(src), None) => HeaderContent::Logo(Logo {
                src,
                width: self.logo_width,
                height: self.logo_height,
                alt: self.alt,
            }),
            (None, Some(text)) => {
                if self.logo_width.is_some() || self.logo_height.is_some() || self.alt.is_some() {
                    return Err(reject("header", "logo", "options require a logo"));
                }
                HeaderContent::Text(text)
            }
            (Some(_), Some(_)) => {
                return Err(reject("header", "text", "cannot be combined with a logo"));
            }
            (None, None) => return Err(reject("header", "logo", "or text is required")),
        };
        self.parent.append(Block::Header(Header {
            content,
            link: self.link,
        }))
    }
}

/// Configures a [`Text`] block.
#[must_use = "call `done()` to append the block"]
pub struct TextBuilder<'a> {
    parent: &'a mut EmailBuilder,
    block: Text,
}

impl<'a> TextBuilder<'a> {
    pub fn h1(mut self) -> Self {
        self.block.style = TextStyle::H1;
        self
    }

    pub fn h2(mut self) -> Self {
        self.block.style = TextStyle::H2;
        self
    }

    pub fn h3(mut self) -> Self {
        self.block.style = TextStyle::H3;
        self
    }

    pub fn left(mut self) -> Self {
        self.block.alignment = Alignment::Left;
        self
    }

    pub fn center(mut self) -> Self {
        self.block.alignment = Alignment::Center;
        self
    }

    pub fn right(mut self) -> Self {
        self.block.alignment = Alignment::Right;
        self
    }

    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.block.link = Some(url.into());
        self
    }

    pub fn done(self) -> Result<&'a mut EmailBuilder> {
        self.parent.append(Block::Text(self.block))
    }
}

/// Appends an [`Html`] block.
#[must_use = "call `done()` to append the block"]
pub struct HtmlBuilder<'a> {
    parent: &'a mut EmailBuilder,
    block: Html,
}

impl<'a> HtmlBuilder<'a> {
    pub fn done(self) -> Result<&'a mut EmailBuilder> {
        self.parent.append(Block::Html(self.block))
    }
}

/// Configures a [`Button`] block.
#[must_use = "call `done()` to append the block"]
pub struct ButtonBuilder<'a> {
    parent: &'a mut EmailBuilder,
    block: Button,
}

impl<'a> ButtonBuilder<'a> {
    pub fn blue(self) -> Self {
        self.color(ButtonColor::Blue)
    }

    pub fn green(self) -> Self {
        self.color(ButtonColor::Green)
    }

    pub fn red(self) -> Self {
        self.color(ButtonColor::Red)
    }

    pub fn gray(self) -> Self {
        self.color(ButtonColor::Gray)
    }

    pub fn color(mut self, color: ButtonColor) -> Self {
        self.block.color = Some(color);
        self
    }

    pub fn left(mut self) -> Self {
        self.block.alignment = Alignment::Left;
        self
    }

    pub fn center(mut self) -> Self {
        self.block.alignment = Alignment::Center;
        self
    }

    pub fn right(mut self) -> Self {
        self.block.alignment = Alignment::Right;
        self
    }

    pub fn done(self) -> Result<&'a mut EmailBuilder> {
        self.parent.append(Block::Button(self.block))
    }
}

/// Collects [`AttributeList`] entries.
#[must_use = "call `done()` to append the block"]
pub struct AttributeListBuilder<'a> {
    parent: &'a mut EmailBuilder,
    entries: Vec<Attribute>,
}

impl<'a> AttributeListBuilder<'a> {
    pub fn key_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entry(key, Value::Text(value.into()))
    }

    /// Amount formatted with the configured amount pattern.
    pub fn key_amount(self, key: impl Into<String>, amount: Amount) -> Self {
        self.entry(key, Value::Amount(amount))
    }

    /// Date formatted with the configured date pattern.
    pub fn key_date(self, key: impl Into<String>, date: NaiveDate) -> Self {
        self.entry(key, Value::Date(date))
    }

    fn entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.entries.push(Attribute {
            key: key.into(),
            value,
        });
        self
    }

    pub fn done(self) -> Result<&'a mut EmailBuilder> {
        self.parent.append(Block::AttributeList(AttributeList {
            entries: self.entries,
        }))
    }
}

/// Configures a [`Table`] block.
///
/// Every row must span the header's columns. In a table with image, item
/// rows carry the image separately and one cell fewer than the header, and
/// footer rows also leave out the image column.
#[must_use = "call `done()` to append the block"]
pub struct TableBuilder<'a> {
    parent: &'a mut EmailBuilder,
    format: Option<String>,
    table: Table,
}

impl<'a> TableBuilder<'a> {
    fn new(parent: &'a mut EmailBuilder, layout: TableLayout) -> Self {
        Self {
            parent,
            format: None,
            table: Table {
                layout,
                format: None,
                image_width: None,
                header: Vec::new(),
                items: Vec::new(),
                footers: Vec::new(),
            },
        }
    }

    /// Amount pattern for this table, e.g. `#,##0.00 '€'`.
    pub fn format(mut self, pattern: impl Into<String>) -> Self {
        self.format = Some(pattern.into());
        self
    }

    pub fn image_width(mut self, px: u32) -> Self {
        self.table.image_width = Some(px);
        self
    }

    /// Column labels; replaces any previous header.
    pub fn header_row<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table.header = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn item_row<I, C>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.table.items.push(row(None, cells));
        self
    }

    /// Item row of a table with image.
    pub fn image_item_row<I, C>(mut self, image: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.table.items.push(row(Some(image.into()), cells));
        self
    }

    pub fn footer_row<I, C>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.table.footers.push(row(None, cells));
        self
    }

    /// Validate and append the table.
    ///
    /// # Errors
    ///
    /// Fails if the pattern does not parse or a row does not match the
    /// header.
    pub fn done(mut self) -> Result<&'a mut EmailBuilder> {
        self.parent.ensure_open("append table block")?;
        if let Some(pattern) = &self.format {
            match NumberPattern::parse(pattern) {
                Ok(parsed) => self.table.format = Some(parsed),
                Err(e) => return Err(reject("table", "format", &e.to_string())),
            }
        }
        self.parent.append(Block::Table(self.table))
    }
}

fn row<I, C>(image: Option<String>, cells: I) -> TableRow
where
    I: IntoIterator<Item = C>,
    C: Into<Cell>,
{
    TableRow {
        image,
        cells: cells.into_iter().map(Into::into).collect(),
    }
}

/// Appends a [`FooterText`] block.
#[must_use = "call `done()` to append the block"]
pub struct FooterTextBuilder<'a> {
    parent: &'a mut EmailBuilder,
    block: FooterText,
}

impl<'a> FooterTextBuilder<'a> {
    pub fn done(self) -> Result<&'a mut EmailBuilder> {
        self.parent.append(Block::FooterText(self.block))
    }
}

/// Configures a [`FooterImage`] block.
#[must_use = "call `done()` to append the block"]
pub struct FooterImageBuilder<'a> {
    parent: &'a mut EmailBuilder,
    block: FooterImage,
}

impl<'a> FooterImageBuilder<'a> {
    pub fn width(mut self, px: u32) -> Self {
        self.block.width = Some(px);
        self
    }

    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.block.alt = Some(alt.into());
        self
    }

    /// Wrap the image in a link.
    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.block.link = Some(url.into());
        self
    }

    pub fn done(self) -> Result<&'a mut EmailBuilder> {
        self.parent.append(Block::FooterImage(self.block))
    }
}

/// Configures a [`Copyright`] block.
#[must_use = "call `done()` to append the block"]
pub struct CopyrightBuilder<'a> {
    parent: &'a mut EmailBuilder,
    block: Copyright,
}

impl<'a> CopyrightBuilder<'a> {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.block.url = Some(url.into());
        self
    }

    /// Text appended after the name, e.g. `". All rights reserved."`.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.block.suffix = Some(suffix.into());
        self
    }

    pub fn done(self) -> Result<&'a mut EmailBuilder> {
        self.parent.append(Block::Copyright(self.block))
    }
}
