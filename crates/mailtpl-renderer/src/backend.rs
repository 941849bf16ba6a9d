//! Render backend trait for output format abstraction.

use mailtpl_config::Configuration;

use crate::block::{
    AttributeList, Button, Copyright, FooterImage, FooterText, Header, Html, Region, Table, Text,
};

/// Inputs shared by every block renderer of a single build.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Configuration snapshot owned by the document.
    pub config: &'a Configuration,
    /// Calendar year used by the copyright block.
    pub year: i32,
}

/// Format-specific rendering of blocks.
///
/// Each block variant has one associated function appending its fragment to
/// `out`. [`EmailRenderer`](crate::EmailRenderer) calls them in block order
/// and brackets consecutive blocks of the same [`Region`] with
/// [`region_start`](Self::region_start) and [`region_end`](Self::region_end).
pub trait RenderBackend {
    /// Emitted once before the first block.
    fn document_start(_ctx: RenderContext<'_>, _out: &mut String) {}

    /// Emitted once after the last block.
    fn document_end(_ctx: RenderContext<'_>, _out: &mut String) {}

    fn region_start(_region: Region, _ctx: RenderContext<'_>, _out: &mut String) {}

    fn region_end(_region: Region, _ctx: RenderContext<'_>, _out: &mut String) {}

    fn header(header: &Header, ctx: RenderContext<'_>, out: &mut String);

    fn text(text: &Text, ctx: RenderContext<'_>, out: &mut String);

    /// Caller-supplied content, inserted without escaping.
    fn html(html: &Html, ctx: RenderContext<'_>, out: &mut String);

    fn button(button: &Button, ctx: RenderContext<'_>, out: &mut String);

    fn attributes(list: &AttributeList, ctx: RenderContext<'_>, out: &mut String);

    fn table(table: &Table, ctx: RenderContext<'_>, out: &mut String);

    fn footer_text(footer: &FooterText, ctx: RenderContext<'_>, out: &mut String);

    fn footer_image(image: &FooterImage, ctx: RenderContext<'_>, out: &mut String);

    fn copyright(copyright: &Copyright, ctx: RenderContext<'_>, out: &mut String);
}
