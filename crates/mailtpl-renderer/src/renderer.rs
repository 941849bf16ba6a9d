//! Generic email renderer with pluggable backend.

use std::marker::PhantomData;

use crate::backend::{RenderBackend, RenderContext};
use crate::block::{Block, Region};

/// Walks a block list once and renders it with backend `B`.
///
/// Blocks are rendered strictly in the given order. Whenever the region
/// changes between two consecutive blocks the previous region is closed and
/// the next one opened, so a document may contain the same region more than
/// once.
pub struct EmailRenderer<B: RenderBackend> {
    output: String,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> EmailRenderer<B> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            _backend: PhantomData,
        }
    }

    /// Render `blocks` into a complete output document.
    #[must_use]
    pub fn render(mut self, blocks: &[Block], ctx: RenderContext<'_>) -> String {
        let out = &mut self.output;
        B::document_start(ctx, out);

        let mut current: Option<Region> = None;
        for block in blocks {
            let region = block.region();
            if current != Some(region) {
                if let Some(previous) = current {
                    B::region_end(previous, ctx, out);
                }
                B::region_start(region, ctx, out);
                current = Some(region);
            }

            match block {
                Block::Header(header) => B::header(header, ctx, out),
                Block::Text(text) => B::text(text, ctx, out),
                Block::Html(html) => B::html(html, ctx, out),
                Block::Button(button) => B::button(button, ctx, out),
                Block::AttributeList(list) => B::attributes(list, ctx, out),
                Block::Table(table) => B::table(table, ctx, out),
                Block::FooterText(footer) => B::footer_text(footer, ctx, out),
                Block::FooterImage(image) => B::footer_image(image, ctx, out),
                Block::Copyright(copyright) => B::copyright(copyright, ctx, out),
            }
        }

        if let Some(region) = current {
            B::region_end(region, ctx, out);
        }
        B::document_end(ctx, out);
        self.output
    }
}

impl<B: RenderBackend> Default for EmailRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use super::*;
    use crate::block::{
        AttributeList, Button, Copyright, FooterImage, FooterText, Header, Html, Table, Text,
    };
    use mailtpl_config::Configuration;
    use pretty_assertions::assert_eq;

    /// Records the sequence of backend calls.
    struct TraceBackend;

    impl RenderBackend for TraceBackend {
        fn document_start(_ctx: RenderContext<'_>, out: &mut String) {
            out.push_str("[doc");
        }

        fn document_end(_ctx: RenderContext<'_>, out: &mut String) {
            out.push(']');
        }

        fn region_start(region: Region, _ctx: RenderContext<'_>, out: &mut String) {
            write!(out, " {region:?}(").unwrap();
        }

        fn region_end(_region: Region, _ctx: RenderContext<'_>, out: &mut String) {
            out.push_str(" )");
        }

        fn header(_: &Header, _: RenderContext<'_>, out: &mut String) {
            out.push_str(" header");
        }

        fn text(text: &Text, _: RenderContext<'_>, out: &mut String) {
            write!(out, " text:{}", text.content).unwrap();
        }

        fn html(_: &Html, _: RenderContext<'_>, out: &mut String) {
            out.push_str(" html");
        }

        fn button(_: &Button, _: RenderContext<'_>, out: &mut String) {
            out.push_str(" button");
        }

        fn attributes(_: &AttributeList, _: RenderContext<'_>, out: &mut String) {
            out.push_str(" attributes");
        }

        fn table(_: &Table, _: RenderContext<'_>, out: &mut String) {
            out.push_str(" table");
        }

        fn footer_text(_: &FooterText, _: RenderContext<'_>, out: &mut String) {
            out.push_str(" footer_text");
        }

        fn footer_image(_: &FooterImage, _: RenderContext<'_>, out: &mut String) {
            out.push_str(" footer_image");
        }

        fn copyright(_: &Copyright, ctx: RenderContext<'_>, out: &mut String) {
            write!(out, " copyright:{}", ctx.year).unwrap();
        }
    }

    fn text(content: &str) -> Block {
        Block::Text(Text {
            content: content.into(),
            style: crate::TextStyle::Paragraph,
            alignment: crate::Alignment::Left,
            link: None,
        })
    }

    fn render(blocks: &[Block]) -> String {
        let config = Configuration::new_default();
        let ctx = RenderContext {
            config: &config,
            year: 2024,
        };
        EmailRenderer::<TraceBackend>::new().render(blocks, ctx)
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render(&[]), "[doc]");
    }

    #[test]
    fn test_regions_follow_block_order() {
        let blocks = vec![
            text("a"),
            text("b"),
            Block::FooterText(FooterText { text: "f".into() }),
            text("c"),
            Block::Copyright(Copyright {
                name: "n".into(),
                url: None,
                suffix: None,
            }),
        ];
        assert_eq!(
            render(&blocks),
            "[doc Body( text:a text:b ) Footer( footer_text ) Body( text:c ) Footer( copyright:2024 )]"
        );
    }
}
