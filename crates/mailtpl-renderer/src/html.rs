//! HTML backend.
//!
//! Produces a table-based XHTML document for mail clients. Colors, fonts and
//! widths come from the configuration and are emitted once in the inline
//! stylesheet; buttons also carry their colors inline.

use std::borrow::Cow;
use std::fmt::Write;

use mailtpl_config::{ButtonColor, Configuration};

use crate::backend::{RenderBackend, RenderContext};
use crate::block::{
    AttributeList, Button, Copyright, FooterImage, FooterText, Header, HeaderContent, Html,
    Region, Table, TableLayout, Text,
};
use crate::escape::{escape_html, escape_multiline};

const DOCTYPE: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#;

// Layout rules that do not depend on configuration.
const BASE_CSS: &str = "\
body { width: 100% !important; height: 100%; margin: 0; -webkit-text-size-adjust: none; }
a img { border: none; }
td { word-break: break-word; }
h1 { margin-top: 0; font-size: 22px; font-weight: bold; text-align: left; }
h2 { margin-top: 0; font-size: 16px; font-weight: bold; text-align: left; }
h3 { margin-top: 0; font-size: 14px; font-weight: bold; text-align: left; }
td, th { font-size: 16px; }
p { margin: .4em 0 1.1875em; line-height: 1.625; }
p.sub { font-size: 13px; }
.align-right { text-align: right; }
.align-left { text-align: left; }
.align-center { text-align: center; }
.button { display: inline-block; text-decoration: none; border-style: solid; border-width: 10px 18px; box-sizing: border-box; -webkit-box-shadow: 0 2px 3px rgba(0, 0, 0, 0.16); box-shadow: 0 2px 3px rgba(0, 0, 0, 0.16); }
.attributes { margin: 0 0 21px; }
.attributes_content { padding: 16px; }
.attributes_key { padding: 0 16px 0 0; font-weight: bold; vertical-align: top; }
.attributes_value { padding: 0; }
.purchase { width: 100%; margin: 0; padding: 35px 0; }
.purchase_heading { padding-bottom: 8px; border-bottom-width: 1px; border-bottom-style: solid; }
.purchase_heading p { margin: 0; font-size: 12px; }
.purchase_item { padding: 10px 0; font-size: 15px; line-height: 18px; vertical-align: top; }
.purchase_image { padding: 10px 8px 10px 0; vertical-align: top; }
.purchase_footer { padding-top: 15px; border-top-width: 1px; border-top-style: solid; }
.purchase_total { margin: 0; text-align: right; font-weight: bold; }
.purchase_total--label { padding: 0 15px 0 0; text-align: left; }
.body-action { width: 100%; margin: 30px auto; padding: 0; text-align: center; }
.email-wrapper, .email-content { width: 100%; margin: 0; padding: 0; }
.email-masthead { padding: 25px 0; text-align: center; }
.email-masthead_name { font-size: 16px; font-weight: bold; text-decoration: none; }
.email-body { width: 100%; margin: 0; padding: 0; }
.email-body_inner { margin: 0 auto; padding: 0; }
.email-footer { margin: 0 auto; padding: 0; text-align: center; }
.content-cell { padding: 35px; }
@media only screen and (max-width: 600px) { .email-body_inner, .email-footer { width: 100% !important; } }
";

/// HTML render backend.
///
/// Text-bearing fields are escaped with [`escape_html`]; [`Html`] blocks are
/// inserted verbatim.
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn document_start(ctx: RenderContext<'_>, out: &mut String) {
        writeln!(out, "{DOCTYPE}").unwrap();
        out.push_str(concat!(
            "<html xmlns=\"http://www.w3.org/1999/xhtml\">\n",
            "<head>\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n",
            "<meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\" />\n",
            "<meta name=\"x-apple-disable-message-reformatting\" />\n",
            "<style type=\"text/css\" rel=\"stylesheet\" media=\"all\">\n",
        ));
        out.push_str(BASE_CSS);
        write_stylesheet(ctx.config, out);
        out.push_str("</style>\n</head>\n<body>\n");
        out.push_str(concat!(
            "<table class=\"email-wrapper\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" role=\"presentation\">\n",
            "<tr>\n<td align=\"center\">\n",
            "<table class=\"email-content\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" role=\"presentation\">\n",
        ));
    }

    fn document_end(_ctx: RenderContext<'_>, out: &mut String) {
        out.push_str("</table>\n</td>\n</tr>\n</table>\n</body>\n</html>\n");
    }

    fn region_start(region: Region, ctx: RenderContext<'_>, out: &mut String) {
        let width = content_width(ctx.config);
        match region {
            Region::Header => out.push_str("<tr>\n<td class=\"email-masthead\">\n"),
            Region::Body => write!(
                out,
                concat!(
                    "<tr>\n<td class=\"email-body\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\">\n",
                    "<table class=\"email-body_inner\" align=\"center\" width=\"{width}\" cellpadding=\"0\" cellspacing=\"0\" role=\"presentation\">\n",
                    "<tr>\n<td class=\"content-cell\">\n<div class=\"f-fallback\">\n",
                ),
                width = width
            )
            .unwrap(),
            Region::Footer => write!(
                out,
                concat!(
                    "<tr>\n<td>\n",
                    "<table class=\"email-footer\" align=\"center\" width=\"{width}\" cellpadding=\"0\" cellspacing=\"0\" role=\"presentation\">\n",
                    "<tr>\n<td class=\"content-cell\" align=\"center\">\n",
                ),
                width = width
            )
            .unwrap(),
        }
    }

    fn region_end(region: Region, _ctx: RenderContext<'_>, out: &mut String) {
        match region {
            Region::Header => out.push_str("</td>\n</tr>\n"),
            Region::Body => out.push_str("</div>\n</td>\n</tr>\n</table>\n</td>\n</tr>\n"),
            Region::Footer => out.push_str("</td>\n</tr>\n</table>\n</td>\n</tr>\n"),
        }
    }

    fn header(header: &Header, _ctx: RenderContext<'_>, out: &mut String) {
        let inner = match &header.content {
            HeaderContent::Logo(logo) => {
                let mut img = format!(
                    r#"<img src="{}" alt="{}""#,
                    escape_html(&logo.src),
                    escape_html(logo.alt.as_deref().unwrap_or(""))
                );
                if let Some(width) = logo.width {
                    write!(img, r#" width="{width}""#).unwrap();
                }
                if let Some(height) = logo.height {
                    write!(img, r#" height="{height}""#).unwrap();
                }
                img.push_str(" />");
                img
            }
            HeaderContent::Text(text) => escape_html(text).into_owned(),
        };
        match &header.link {
            Some(link) => writeln!(
                out,
                r#"<a href="{}" class="f-fallback email-masthead_name">{inner}</a>"#,
                escape_html(link)
            )
            .unwrap(),
            None => writeln!(
                out,
                r#"<span class="f-fallback email-masthead_name">{inner}</span>"#
            )
            .unwrap(),
        }
    }

    fn text(text: &Text, _ctx: RenderContext<'_>, out: &mut String) {
        let tag = text.style.tag();
        let content = escape_multiline(&text.content);
        write!(out, r#"<{tag} class="align-{}">"#, text.alignment.as_str()).unwrap();
        match &text.link {
            Some(link) => write!(out, r#"<a href="{}">{content}</a>"#, escape_html(link)).unwrap(),
            None => out.push_str(&content),
        }
        writeln!(out, "</{tag}>").unwrap();
    }

    fn html(html: &Html, _ctx: RenderContext<'_>, out: &mut String) {
        out.push_str(&html.html);
        out.push('\n');
    }

    fn button(button: &Button, ctx: RenderContext<'_>, out: &mut String) {
        let color = button.color_or_default(ctx.config);
        let style = ctx.config.button().palette.style(color);
        writeln!(
            out,
            concat!(
                r#"<table class="body-action" align="center" width="100%" cellpadding="0" cellspacing="0" role="presentation">"#,
                "\n<tr>\n<td align=\"{align}\">\n",
                r#"<a href="{url}" class="f-fallback button button--{token}" target="_blank" style="background-color: {bg}; border-color: {bg}; color: {fg}; border-radius: {radius}px;">{label}</a>"#,
                "\n</td>\n</tr>\n</table>",
            ),
            align = button.alignment.as_str(),
            url = escape_html(&button.url),
            token = color.as_str(),
            bg = style.background,
            fg = style.text,
            radius = ctx.config.button().radius,
            label = escape_html(&button.label),
        )
        .unwrap();
    }

    fn attributes(list: &AttributeList, ctx: RenderContext<'_>, out: &mut String) {
        out.push_str(concat!(
            "<table class=\"attributes\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" role=\"presentation\">\n",
            "<tr>\n<td class=\"attributes_content\">\n",
            "<table width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" role=\"presentation\">\n",
        ));
        for entry in &list.entries {
            writeln!(
                out,
                r#"<tr><td class="attributes_key">{}</td><td class="attributes_value">{}</td></tr>"#,
                escape_html(&entry.key),
                escape_multiline(&entry.value.display(ctx.config))
            )
            .unwrap();
        }
        out.push_str("</table>\n</td>\n</tr>\n</table>\n");
    }

    fn table(table: &Table, ctx: RenderContext<'_>, out: &mut String) {
        let pattern = table.pattern(ctx.config);
        let amount_columns = table.amount_columns();
        let with_image = table.layout == TableLayout::WithImage;
        let align = |column: usize| {
            if amount_columns.get(column).copied().unwrap_or(false) {
                "right"
            } else {
                "left"
            }
        };

        out.push_str("<table class=\"purchase\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" role=\"presentation\">\n<tr>\n");
        let offset = table.columns() - table.data_columns();
        for (i, label) in table.header.iter().enumerate() {
            let column_align = if i < offset { "left" } else { align(i - offset) };
            writeln!(
                out,
                r#"<th class="purchase_heading" align="{column_align}"><p class="f-fallback">{}</p></th>"#,
                escape_html(label)
            )
            .unwrap();
        }
        out.push_str("</tr>\n");

        for row in &table.items {
            out.push_str("<tr>\n");
            if let (true, Some(src)) = (with_image, &row.image) {
                write!(out, r#"<td class="purchase_image"><img src="{}" alt="""#, escape_html(src))
                    .unwrap();
                if let Some(width) = table.image_width {
                    write!(out, r#" width="{width}""#).unwrap();
                }
                out.push_str(" /></td>\n");
            }
            for (i, cell) in row.cells.iter().enumerate() {
                writeln!(
                    out,
                    r#"<td class="purchase_item align-{}"><span class="f-fallback">{}</span></td>"#,
                    align(i),
                    escape_multiline(&cell.display(pattern, ctx.config))
                )
                .unwrap();
            }
            out.push_str("</tr>\n");
        }

        for row in &table.footers {
            out.push_str("<tr>\n");
            for (i, cell) in row.cells.iter().enumerate() {
                let colspan = if i == 0 && with_image { r#" colspan="2""# } else { "" };
                let class = if i == 0 {
                    "purchase_total purchase_total--label"
                } else {
                    "purchase_total"
                };
                writeln!(
                    out,
                    r#"<td class="purchase_footer align-{}"{colspan}><p class="f-fallback {class}">{}</p></td>"#,
                    align(i),
                    escape_multiline(&cell.display(pattern, ctx.config))
                )
                .unwrap();
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</table>\n");
    }

    fn footer_text(footer: &FooterText, _ctx: RenderContext<'_>, out: &mut String) {
        writeln!(
            out,
            r#"<p class="f-fallback sub align-center">{}</p>"#,
            escape_multiline(&footer.text)
        )
        .unwrap();
    }

    fn footer_image(image: &FooterImage, _ctx: RenderContext<'_>, out: &mut String) {
        let mut img = format!(
            r#"<img src="{}" alt="{}""#,
            escape_html(&image.src),
            escape_html(image.alt.as_deref().unwrap_or(""))
        );
        if let Some(width) = image.width {
            write!(img, r#" width="{width}""#).unwrap();
        }
        img.push_str(" />");

        out.push_str(r#"<p class="f-fallback sub align-center">"#);
        match &image.link {
            Some(link) => write!(out, r#"<a href="{}">{img}</a>"#, escape_html(link)).unwrap(),
            None => out.push_str(&img),
        }
        out.push_str("</p>\n");
    }

    fn copyright(copyright: &Copyright, ctx: RenderContext<'_>, out: &mut String) {
        write!(out, r#"<p class="f-fallback sub align-center">&copy; {} "#, ctx.year).unwrap();
        let name = escape_html(&copyright.name);
        match &copyright.url {
            Some(url) => write!(out, r#"<a href="{}">{name}</a>"#, escape_html(url)).unwrap(),
            None => out.push_str(&name),
        }
        if let Some(suffix) = &copyright.suffix {
            out.push_str(&escape_html(suffix));
        }
        out.push_str("</p>\n");
    }
}

/// Content width as an HTML attribute value.
fn content_width(config: &Configuration) -> Cow<'static, str> {
    if config.content().full() {
        Cow::Borrowed("100%")
    } else {
        Cow::Owned(config.content().width().to_string())
    }
}

/// Configuration-dependent rules of the inline stylesheet.
fn write_stylesheet(config: &Configuration, out: &mut String) {
    let font = config.font();
    let colors = config.colors();
    let css_width = if config.content().full() {
        "100%".to_owned()
    } else {
        format!("{}px", config.content().width())
    };

    writeln!(
        out,
        "body, td, th {{ font-family: {}; font-size: {}px; }}",
        font.family(),
        font.size()
    )
    .unwrap();
    writeln!(
        out,
        "body, .email-wrapper, .email-content {{ background-color: {}; color: {}; }}",
        colors.background,
        font.color()
    )
    .unwrap();
    writeln!(out, "h1, h2, h3 {{ color: {}; }}", colors.heading).unwrap();
    writeln!(out, "a {{ color: {}; }}", colors.link).unwrap();
    writeln!(
        out,
        ".email-body, .email-body_inner {{ background-color: {}; }}",
        colors.content_background
    )
    .unwrap();
    writeln!(out, ".email-body_inner, .email-footer {{ width: {css_width}; }}").unwrap();
    writeln!(
        out,
        ".email-masthead_name, .email-footer p {{ color: {}; }}",
        colors.muted
    )
    .unwrap();
    writeln!(
        out,
        ".attributes_content {{ background-color: {}; }}",
        colors.background
    )
    .unwrap();
    writeln!(
        out,
        ".purchase_heading, .purchase_footer {{ border-color: {}; }}",
        colors.border
    )
    .unwrap();

    let button = config.button();
    writeln!(out, ".button {{ border-radius: {}px; }}", button.radius).unwrap();
    for color in [
        ButtonColor::Blue,
        ButtonColor::Green,
        ButtonColor::Red,
        ButtonColor::Gray,
    ] {
        let style = button.palette.style(color);
        writeln!(
            out,
            ".button--{} {{ background-color: {bg}; border-color: {bg}; color: {fg}; }}",
            color.as_str(),
            bg = style.background,
            fg = style.text
        )
        .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Alignment, Attribute, Block, Logo, TableRow, TextStyle, Value};
    use crate::format::Amount;
    use crate::renderer::EmailRenderer;
    use mailtpl_config::NumberPattern;

    fn render_with(config: &Configuration, blocks: &[Block]) -> String {
        let ctx = RenderContext { config, year: 2024 };
        EmailRenderer::<HtmlBackend>::new().render(blocks, ctx)
    }

    fn render(blocks: &[Block]) -> String {
        render_with(&Configuration::new_default(), blocks)
    }

    fn text(content: &str) -> Block {
        Block::Text(Text {
            content: content.into(),
            style: TextStyle::Paragraph,
            alignment: Alignment::Left,
            link: None,
        })
    }

    fn button(color: Option<ButtonColor>) -> Block {
        Block::Button(Button {
            label: "Do this Next".into(),
            url: "http://localhost?a=1&b=2".into(),
            color,
            alignment: Alignment::Center,
        })
    }

    #[test]
    fn test_empty_document_is_complete() {
        let html = render(&[]);
        assert!(html.starts_with("<!DOCTYPE html"));
        assert!(html.ends_with("</html>\n"));
        assert!(!html.contains("email-body_inner\""));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render(&[text("sample <b>bold</b> text &Uuml;mlaut")]);
        assert!(html.contains("sample &lt;b&gt;bold&lt;/b&gt; text &amp;Uuml;mlaut"));
    }

    #[test]
    fn test_text_heading_alignment_and_line_breaks() {
        let block = Block::Text(Text {
            content: "Welcome,\n{{name}}!".into(),
            style: TextStyle::H1,
            alignment: Alignment::Center,
            link: None,
        });
        assert!(render(&[block]).contains(r#"<h1 class="align-center">Welcome,<br>{{name}}!</h1>"#));
    }

    #[test]
    fn test_text_link() {
        let block = Block::Text(Text {
            content: "docs".into(),
            style: TextStyle::Paragraph,
            alignment: Alignment::Left,
            link: Some("https://example.com/?q=\"x\"".into()),
        });
        assert!(render(&[block]).contains(
            r#"<p class="align-left"><a href="https://example.com/?q=&quot;x&quot;">docs</a></p>"#
        ));
    }

    #[test]
    fn test_html_block_is_verbatim() {
        let block = Block::Html(Html {
            html: "sample <b>bold</b> text &Uuml;mlaut &lt; 17".into(),
            text: "sample bold text Ümlaut < 17".into(),
        });
        let html = render(&[block]);
        assert!(html.contains("sample <b>bold</b> text &Uuml;mlaut &lt; 17"));
        assert!(!html.contains("Ümlaut < 17"));
    }

    #[test]
    fn test_button_uses_palette() {
        let html = render(&[button(Some(ButtonColor::Green))]);
        assert!(html.contains("button button--green"));
        assert!(html.contains("background-color: #22BC66; border-color: #22BC66; color: #FFFFFF; border-radius: 3px;"));
        assert!(html.contains(r#"href="http://localhost?a=1&amp;b=2""#));
        assert!(html.contains(r#"<td align="center">"#));
    }

    #[test]
    fn test_button_default_color_from_config() {
        let mut config = Configuration::new_default();
        config.button_mut().default_color = ButtonColor::Red;
        let html = render_with(&config, &[button(None)]);
        assert!(html.contains("button button--red"));
    }

    #[test]
    fn test_content_width() {
        let mut config = Configuration::new_default();
        let html = render_with(&config, &[text("a")]);
        assert!(html.contains(r#"class="email-body_inner" align="center" width="570""#));
        assert!(html.contains(".email-body_inner, .email-footer { width: 570px; }"));

        config.content_mut().set_full(true);
        let html = render_with(&config, &[text("a")]);
        assert!(html.contains(r#"class="email-body_inner" align="center" width="100%""#));
        assert!(html.contains(".email-body_inner, .email-footer { width: 100%; }"));
    }

    #[test]
    fn test_stylesheet_uses_configured_colors() {
        let mut config = Configuration::new_default();
        config.colors_mut().link = mailtpl_config::Color::parse("#123456").unwrap();
        let html = render_with(&config, &[]);
        assert!(html.contains("a { color: #123456; }"));
        assert!(html.contains("font-size: 16px;"));
    }

    #[test]
    fn test_logo_header() {
        let block = Block::Header(Header {
            content: HeaderContent::Logo(Logo {
                src: "https://www.rocketbase.io/img/logo-dark.png".into(),
                width: None,
                height: Some(41),
                alt: None,
            }),
            link: Some("https://www.rocketbase.io".into()),
        });
        let html = render(&[block]);
        assert!(html.contains(r#"<td class="email-masthead">"#));
        assert!(html.contains(
            r#"<a href="https://www.rocketbase.io" class="f-fallback email-masthead_name"><img src="https://www.rocketbase.io/img/logo-dark.png" alt="" height="41" /></a>"#
        ));
    }

    #[test]
    fn test_attributes() {
        let block = Block::AttributeList(AttributeList {
            entries: vec![Attribute {
                key: "Username".into(),
                value: Value::Text("<admin>".into()),
            }],
        });
        assert!(render(&[block]).contains(
            r#"<tr><td class="attributes_key">Username</td><td class="attributes_value">&lt;admin&gt;</td></tr>"#
        ));
    }

    #[test]
    fn test_image_table() {
        let table = Table {
            layout: TableLayout::WithImage,
            format: Some(NumberPattern::parse("#.## '€'").unwrap()),
            image_width: Some(60),
            header: vec!["Preview".into(), "Item".into(), "Price".into()],
            items: vec![TableRow {
                image: Some("https://cdn.example.com/shirt.jpg".into()),
                cells: vec!["Shirt".into(), Amount::new(3995, 2).into()],
            }],
            footers: vec![TableRow {
                image: None,
                cells: vec!["Total".into(), Amount::new(3995, 2).into()],
            }],
        };
        let html = render(&[Block::Table(table)]);
        assert!(html.contains(r#"<th class="purchase_heading" align="right"><p class="f-fallback">Price</p></th>"#));
        assert!(html.contains(
            r#"<td class="purchase_image"><img src="https://cdn.example.com/shirt.jpg" alt="" width="60" /></td>"#
        ));
        assert!(html.contains(
            r#"<td class="purchase_item align-right"><span class="f-fallback">39.95 €</span></td>"#
        ));
        assert!(html.contains(r#"<td class="purchase_footer align-left" colspan="2">"#));
    }

    #[test]
    fn test_footer_region() {
        let blocks = vec![
            Block::FooterText(FooterText {
                text: "[Company Name, LLC]\n1234 Street Rd.".into(),
            }),
            Block::FooterImage(FooterImage {
                src: "https://example.com/badge.png".into(),
                width: Some(100),
                alt: None,
                link: None,
            }),
            Block::Copyright(Copyright {
                name: "rocketbase".into(),
                url: Some("https://www.rocketbase.io".into()),
                suffix: Some(" & friends".into()),
            }),
        ];
        let html = render(&blocks);
        assert!(html.contains(r#"class="email-footer""#));
        assert!(html.contains("[Company Name, LLC]<br>1234 Street Rd."));
        assert!(html.contains(
            r#"<p class="f-fallback sub align-center"><img src="https://example.com/badge.png" alt="" width="100" /></p>"#
        ));
        assert!(html.contains(
            r#"&copy; 2024 <a href="https://www.rocketbase.io">rocketbase</a> &amp; friends</p>"#
        ));
    }
}
