//! Plain-text backend.
//!
//! Output is never escaped. Every body and footer block is preceded by a
//! blank line, the header becomes a banner framed by `*` lines, and entering
//! the footer after other content emits a `-` divider.

use std::borrow::Cow;
use std::fmt::Write;

use mailtpl_config::{Configuration, NumberPattern};

use crate::backend::{RenderBackend, RenderContext};
use crate::block::{
    AttributeList, Button, Cell, Copyright, FooterImage, FooterText, Header, HeaderContent, Html,
    Region, Table, Text,
};
use crate::wrap::wrap_text;

const COLUMN_SEPARATOR: &str = " | ";
const RULE_SEPARATOR: &str = "-+-";

/// Plain-text render backend.
pub struct TextBackend;

impl RenderBackend for TextBackend {
    fn region_start(region: Region, ctx: RenderContext<'_>, out: &mut String) {
        if region == Region::Footer && !out.is_empty() {
            writeln!(out, "\n{}\n", "-".repeat(ctx.config.text().divider_width())).unwrap();
        }
    }

    fn header(header: &Header, ctx: RenderContext<'_>, out: &mut String) {
        let title = match &header.content {
            HeaderContent::Text(text) => text.as_str(),
            HeaderContent::Logo(logo) => match &logo.alt {
                Some(alt) => alt.as_str(),
                None => return,
            },
        };
        if !out.is_empty() && !out.ends_with("\n\n") {
            out.push('\n');
        }
        let banner = "*".repeat(ctx.config.text().banner_width());
        writeln!(out, "{banner}\n{title}\n{banner}\n").unwrap();
    }

    fn text(text: &Text, ctx: RenderContext<'_>, out: &mut String) {
        let content = wrap_text(&text.content, ctx.config.text().wrap_width());
        match &text.link {
            Some(link) => paragraph(out, &format!("{content} -> {link}")),
            None => paragraph(out, &content),
        }
    }

    fn html(html: &Html, _ctx: RenderContext<'_>, out: &mut String) {
        paragraph(out, &html.text);
    }

    fn button(button: &Button, _ctx: RenderContext<'_>, out: &mut String) {
        paragraph(out, &format!("{} -> {}", button.label, button.url));
    }

    fn attributes(list: &AttributeList, ctx: RenderContext<'_>, out: &mut String) {
        let wrap_width = ctx.config.text().wrap_width();
        let mut lines = String::new();
        for (i, entry) in list.entries.iter().enumerate() {
            if i > 0 {
                lines.push('\n');
            }
            let line = format!("{}: {}", entry.key, entry.value.display(ctx.config));
            lines.push_str(&wrap_text(&line, wrap_width));
        }
        paragraph(out, &lines);
    }

    fn table(table: &Table, ctx: RenderContext<'_>, out: &mut String) {
        let pattern = table.pattern(ctx.config);
        let right_aligned = table.amount_columns();

        let header: Vec<Cow<'_, str>> = table
            .data_header()
            .iter()
            .map(|label| Cow::Borrowed(label.as_str()))
            .collect();
        let items: Vec<_> = table
            .items
            .iter()
            .map(|row| display_row(&row.cells, pattern, ctx.config))
            .collect();
        let footers: Vec<_> = table
            .footers
            .iter()
            .map(|row| display_row(&row.cells, pattern, ctx.config))
            .collect();

        let mut widths = vec![0; table.data_columns()];
        for row in std::iter::once(&header).chain(&items).chain(&footers) {
            for (width, cell) in widths.iter_mut().zip(row) {
                let longest = cell.lines().map(|line| line.chars().count()).max();
                *width = (*width).max(longest.unwrap_or(0));
            }
        }

        let mut grid = String::new();
        write_row(&mut grid, &header, &widths, &right_aligned);
        write_rule(&mut grid, &widths);
        for row in &items {
            write_row(&mut grid, row, &widths, &right_aligned);
        }
        if !footers.is_empty() {
            write_rule(&mut grid, &widths);
            for row in &footers {
                write_row(&mut grid, row, &widths, &right_aligned);
            }
        }
        paragraph(out, grid.trim_end_matches('\n'));
    }

    fn footer_text(footer: &FooterText, _ctx: RenderContext<'_>, out: &mut String) {
        paragraph(out, &footer.text);
    }

    fn footer_image(image: &FooterImage, _ctx: RenderContext<'_>, out: &mut String) {
        match (&image.alt, &image.link) {
            (Some(alt), Some(link)) => paragraph(out, &format!("{alt} -> {link}")),
            (None, Some(link)) => paragraph(out, link),
            (_, None) => {}
        }
    }

    fn copyright(copyright: &Copyright, ctx: RenderContext<'_>, out: &mut String) {
        let mut line = format!("©{} {}", ctx.year, copyright.name);
        if let Some(url) = &copyright.url {
            write!(line, " -> {url}").unwrap();
        }
        if let Some(suffix) = &copyright.suffix {
            line.push_str(suffix);
        }
        paragraph(out, &line);
    }
}

/// Blank line, content, line break.
fn paragraph(out: &mut String, content: &str) {
    writeln!(out, "\n{content}").unwrap();
}

fn display_row<'a>(
    cells: &'a [Cell],
    pattern: &NumberPattern,
    config: &Configuration,
) -> Vec<Cow<'a, str>> {
    cells.iter().map(|cell| cell.display(pattern, config)).collect()
}

/// One table row; multi-line cells span several output lines.
fn write_row(out: &mut String, cells: &[Cow<'_, str>], widths: &[usize], right_aligned: &[bool]) {
    let cell_lines: Vec<Vec<&str>> = cells.iter().map(|cell| cell.lines().collect()).collect();
    let height = cell_lines.iter().map(Vec::len).max().unwrap_or(0).max(1);

    for line_index in 0..height {
        let mut line = String::new();
        for (column, lines) in cell_lines.iter().enumerate() {
            if column > 0 {
                line.push_str(COLUMN_SEPARATOR);
            }
            let value = lines.get(line_index).copied().unwrap_or("");
            let width = widths[column];
            if right_aligned.get(column).copied().unwrap_or(false) {
                write!(line, "{value:>width$}").unwrap();
            } else {
                write!(line, "{value:<width$}").unwrap();
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
}

fn write_rule(out: &mut String, widths: &[usize]) {
    let segments: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&segments.join(RULE_SEPARATOR));
    out.push('\n');
}
