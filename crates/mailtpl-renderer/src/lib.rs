//! Block model and dual HTML/plain-text renderer for transactional emails.
//!
//! A [`Document`] holds a [`Configuration`](mailtpl_config::Configuration)
//! snapshot and an ordered list of validated [`Block`]s. Rendering walks the
//! blocks once per output format with the generic [`EmailRenderer`], which
//! delegates each block to a [`RenderBackend`]:
//! - [`HtmlBackend`]: table-based XHTML with an inline stylesheet, escaping all
//!   caller text except [`Html`] blocks
//! - [`TextBackend`]: unescaped plain text with banner header, `-` footer
//!   divider and aligned tables
//!
//! Both backends share amount and date formatting, so a monetary cell reads
//! the same in both outputs.
//!
//! # Example
//!
//! ```
//! use mailtpl_config::Configuration;
//! use mailtpl_renderer::{Alignment, Block, Button, Document};
//!
//! let mut doc = Document::new(Configuration::new_default());
//! doc.push(Block::Button(Button {
//!     label: "Confirm".into(),
//!     url: "https://example.com/confirm".into(),
//!     color: None,
//!     alignment: Alignment::Center,
//! }))
//! .unwrap();
//!
//! let email = doc.render(2024);
//! assert_eq!(email.text(), "\nConfirm -> https://example.com/confirm\n");
//! assert!(email.html().contains("button--blue"));
//! ```

mod backend;
mod block;
mod clock;
mod document;
mod error;
mod escape;
mod format;
mod html;
mod renderer;
mod text;
mod wrap;

pub use backend::{RenderBackend, RenderContext};
pub use block::{
    Alignment, Attribute, AttributeList, Block, Button, Cell, Copyright, FooterImage, FooterText,
    Header, HeaderContent, Html, Logo, Region, RowKind, Table, TableLayout, TableRow, Text,
    TextStyle, Value,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use document::{Document, RenderedEmail};
pub use error::{BlockError, ParseAmountError};
pub use escape::{escape_html, escape_multiline, unescape_html};
pub use format::{Amount, format_amount, format_date};
pub use html::HtmlBackend;
pub use renderer::EmailRenderer;
pub use text::TextBackend;
pub use wrap::wrap_text;
