//! Fluent builder for transactional emails with paired HTML and plain-text
//! output.
//!
//! An [`EmailBuilder`] collects content blocks (header, text, raw HTML,
//! buttons, attribute lists, tables and footer blocks) through typed
//! sub-builders, then renders them once into a [`RenderedEmail`] holding an
//! HTML document and its plain-text alternative. Mail transport is left to
//! the caller.
//!
//! # Example
//!
//! ```
//! use mailtpl::{Amount, Cell, EmailBuilder, FixedClock};
//!
//! let mut builder = EmailBuilder::new().with_clock(FixedClock::new(2024));
//! builder
//!     .header().text("ACME").done()?
//!     .text("Thanks for your order!").h1().center().done()?
//!     .table()
//!     .header_row(["Description", "Amount"])
//!     .item_row([Cell::from("Widget"), Amount::new(1999, 2).into()])
//!     .footer_row([Cell::from("Total"), Amount::new(1999, 2).into()])
//!     .done()?
//!     .button("View order", "https://example.com/orders/42").green().done()?
//!     .copyright("ACME").suffix(". All rights reserved.").done()?;
//!
//! let email = builder.build()?;
//! assert!(email.html().contains("19.99"));
//! assert!(email.text().contains("View order -> https://example.com/orders/42"));
//! # Ok::<(), mailtpl::Error>(())
//! ```
//!
//! # Configuration
//!
//! Colors, fonts, widths, plain-text layout and number/date formats come
//! from a [`Configuration`], either the defaults or one layered from TOML
//! with [`Configuration::load`]:
//!
//! ```
//! use mailtpl::{Configuration, EmailBuilder};
//!
//! let mut config = Configuration::new_default();
//! config.content_mut().set_width(800)?;
//! config.text_mut().set_wrap_width(Some(72))?;
//! let builder = EmailBuilder::with_configuration(config)?;
//! # let _ = builder;
//! # Ok::<(), mailtpl::Error>(())
//! ```

mod builder;
mod error;

pub use builder::{
    AttributeListBuilder, BuildState, ButtonBuilder, CopyrightBuilder, EmailBuilder,
    FooterImageBuilder, FooterTextBuilder, HeaderBuilder, HtmlBuilder, TableBuilder,
    TextBuilder,
};
pub use error::{Error, Result};
pub use mailtpl_config::{ButtonColor, Color, ConfigError, Configuration, DatePattern, NumberPattern};
pub use mailtpl_renderer::{
    Amount, Block, BlockError, Cell, Clock, FixedClock, RenderedEmail, SystemClock,
};
