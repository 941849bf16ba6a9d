//! Configuration for mailtpl email rendering.
//!
//! A [`Configuration`] is a tree of settings grouped by concern (content
//! area, font, colors, buttons, plain-text layout, number and date
//! formatting). Every renderer reads from the same snapshot.
//!
//! Defaults are documented on each group's `Default` implementation and are
//! available through [`Configuration::new_default`]. Settings can be changed
//! with setters, which validate constrained values, or layered from TOML:
//!
//! ```
//! use mailtpl_config::Configuration;
//!
//! let config = Configuration::from_toml_str(
//!     r##"
//! [content]
//! width = 800
//!
//! [button]
//! default_color = "green"
//! "##,
//! )
//! .unwrap();
//! assert_eq!(config.content().width(), 800);
//! ```

mod pattern;
mod value;

use std::path::Path;

use serde::Deserialize;

pub use pattern::NumberPattern;
pub use value::{ButtonColor, Color, DatePattern};

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value violates its documented constraint.
    #[error("invalid configuration: {field} {reason}")]
    Invalid {
        /// Setting that was rejected (e.g. "`content.width`").
        field: String,
        /// What is wrong with the value.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Complete rendering configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Configuration {
    content: ContentConfig,
    font: FontConfig,
    colors: ColorConfig,
    button: ButtonConfig,
    text: TextConfig,
    format: FormatConfig,
}

impl Configuration {
    /// Configuration with all documented defaults.
    #[must_use]
    pub fn new_default() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or invalid typed
    /// values, `ConfigError::Invalid` if validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded email configuration");
        Ok(config)
    }

    /// Validate every constrained value.
    ///
    /// Setters already enforce these rules; this covers values that arrived
    /// through deserialization.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive(self.content.width, "content.width")?;
        require_font_family(&self.font.family)?;
        require_positive(self.font.size, "font.size")?;
        require_positive(self.text.banner_width, "text.banner_width")?;
        require_positive(self.text.divider_width, "text.divider_width")?;
        if let Some(width) = self.text.wrap_width {
            require_positive(width, "text.wrap_width")?;
        }
        require_distinct_separators(
            self.format.decimal_separator,
            self.format.grouping_separator,
        )?;
        Ok(())
    }

    #[must_use]
    pub fn content(&self) -> &ContentConfig {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut ContentConfig {
        &mut self.content
    }

    #[must_use]
    pub fn font(&self) -> &FontConfig {
        &self.font
    }

    pub fn font_mut(&mut self) -> &mut FontConfig {
        &mut self.font
    }

    #[must_use]
    pub fn colors(&self) -> &ColorConfig {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut ColorConfig {
        &mut self.colors
    }

    #[must_use]
    pub fn button(&self) -> &ButtonConfig {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut ButtonConfig {
        &mut self.button
    }

    #[must_use]
    pub fn text(&self) -> &TextConfig {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut TextConfig {
        &mut self.text
    }

    #[must_use]
    pub fn format(&self) -> &FormatConfig {
        &self.format
    }

    pub fn format_mut(&mut self) -> &mut FormatConfig {
        &mut self.format
    }
}

/// Content area layout.
///
/// Defaults: fixed width of 570px.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    full: bool,
    width: u32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            full: false,
            width: 570,
        }
    }
}

impl ContentConfig {
    /// Whether the content spans the full viewport width.
    #[must_use]
    pub fn full(&self) -> bool {
        self.full
    }

    /// Content width in pixels (ignored when [`full`](Self::full) is set).
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_full(&mut self, full: bool) {
        self.full = full;
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `width` is 0.
    pub fn set_width(&mut self, width: u32) -> Result<(), ConfigError> {
        require_positive(width, "content.width")?;
        self.width = width;
        Ok(())
    }
}

/// Body font.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    family: String,
    size: u32,
    color: Color,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif"
                .to_owned(),
            size: 16,
            color: Color::constant("#51545E"),
        }
    }
}

impl FontConfig {
    /// CSS font stack.
    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Base font size in pixels.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn color(&self) -> &Color {
        &self.color
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `family` is empty or contains
    /// characters that would break out of a CSS declaration.
    pub fn set_family(&mut self, family: impl Into<String>) -> Result<(), ConfigError> {
        let family = family.into();
        require_font_family(&family)?;
        self.family = family;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `size` is 0.
    pub fn set_size(&mut self, size: u32) -> Result<(), ConfigError> {
        require_positive(size, "font.size")?;
        self.size = size;
        Ok(())
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

/// Colors by semantic role. [`Color`] is validated on construction, so
/// fields are public.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Page background around the content area.
    pub background: Color,
    /// Background of the content area.
    pub content_background: Color,
    /// Heading text.
    pub heading: Color,
    /// Links inside text.
    pub link: Color,
    /// Header and footer text.
    pub muted: Color,
    /// Table and attribute list borders.
    pub border: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: Color::constant("#F2F4F6"),
            content_background: Color::constant("#FFFFFF"),
            heading: Color::constant("#333333"),
            link: Color::constant("#3869D4"),
            muted: Color::constant("#A8AAAF"),
            border: Color::constant("#EAEAEC"),
        }
    }
}

/// Background and label color of one button style.
#[derive(Debug, Clone, Deserialize)]
pub struct ButtonStyle {
    pub background: Color,
    pub text: Color,
}

impl ButtonStyle {
    fn on_white(background: &'static str) -> Self {
        Self {
            background: Color::constant(background),
            text: Color::constant("#FFFFFF"),
        }
    }
}

/// Button styles per [`ButtonColor`] token.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ButtonPalette {
    pub blue: ButtonStyle,
    pub green: ButtonStyle,
    pub red: ButtonStyle,
    pub gray: ButtonStyle,
}

impl Default for ButtonPalette {
    fn default() -> Self {
        Self {
            blue: ButtonStyle::on_white("#3869D4"),
            green: ButtonStyle::on_white("#22BC66"),
            red: ButtonStyle::on_white("#FF6136"),
            gray: ButtonStyle::on_white("#6B6E76"),
        }
    }
}

impl ButtonPalette {
    /// Style for a color token.
    #[must_use]
    pub fn style(&self, color: ButtonColor) -> &ButtonStyle {
        match color {
            ButtonColor::Blue => &self.blue,
            ButtonColor::Green => &self.green,
            ButtonColor::Red => &self.red,
            ButtonColor::Gray => &self.gray,
        }
    }
}

/// Button appearance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Token used by buttons that do not pick a color.
    pub default_color: ButtonColor,
    /// Corner radius in pixels.
    pub radius: u32,
    pub palette: ButtonPalette,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            default_color: ButtonColor::Blue,
            radius: 3,
            palette: ButtonPalette::default(),
        }
    }
}

/// Plain-text layout.
///
/// Defaults: no wrapping, 27 character header banner, 11 character footer
/// divider.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    wrap_width: Option<usize>,
    banner_width: usize,
    divider_width: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            wrap_width: None,
            banner_width: 27,
            divider_width: 11,
        }
    }
}

impl TextConfig {
    /// Column at which text and attribute lines are wrapped; `None` keeps
    /// lines verbatim.
    #[must_use]
    pub fn wrap_width(&self) -> Option<usize> {
        self.wrap_width
    }

    #[must_use]
    pub fn banner_width(&self) -> usize {
        self.banner_width
    }

    #[must_use]
    pub fn divider_width(&self) -> usize {
        self.divider_width
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for `Some(0)`.
    pub fn set_wrap_width(&mut self, width: Option<usize>) -> Result<(), ConfigError> {
        if let Some(width) = width {
            require_positive(width, "text.wrap_width")?;
        }
        self.wrap_width = width;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `width` is 0.
    pub fn set_banner_width(&mut self, width: usize) -> Result<(), ConfigError> {
        require_positive(width, "text.banner_width")?;
        self.banner_width = width;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `width` is 0.
    pub fn set_divider_width(&mut self, width: usize) -> Result<(), ConfigError> {
        require_positive(width, "text.divider_width")?;
        self.divider_width = width;
        Ok(())
    }
}

/// Number and date formatting.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    decimal_separator: char,
    grouping_separator: char,
    amount_pattern: NumberPattern,
    date_pattern: DatePattern,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
            amount_pattern: NumberPattern::grouped_two_decimals(),
            date_pattern: DatePattern::iso(),
        }
    }
}

impl FormatConfig {
    #[must_use]
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    #[must_use]
    pub fn grouping_separator(&self) -> char {
        self.grouping_separator
    }

    /// Pattern for amounts that do not bring their own (attribute values,
    /// tables without an explicit format).
    #[must_use]
    pub fn amount_pattern(&self) -> &NumberPattern {
        &self.amount_pattern
    }

    #[must_use]
    pub fn date_pattern(&self) -> &DatePattern {
        &self.date_pattern
    }

    /// Set both separators at once so they can be swapped (`1.234,56`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if both separators are equal.
    pub fn set_separators(&mut self, decimal: char, grouping: char) -> Result<(), ConfigError> {
        require_distinct_separators(decimal, grouping)?;
        self.decimal_separator = decimal;
        self.grouping_separator = grouping;
        Ok(())
    }

    pub fn set_amount_pattern(&mut self, pattern: NumberPattern) {
        self.amount_pattern = pattern;
    }

    pub fn set_date_pattern(&mut self, pattern: DatePattern) {
        self.date_pattern = pattern;
    }
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(field, "cannot be empty"));
    }
    Ok(())
}

/// Font stacks are written into an inline stylesheet.
fn require_font_family(family: &str) -> Result<(), ConfigError> {
    require_non_empty(family, "font.family")?;
    if family.contains(['<', '>', '{', '}', ';']) {
        return Err(ConfigError::invalid(
            "font.family",
            "cannot contain `<`, `>`, `{`, `}` or `;`",
        ));
    }
    Ok(())
}

/// Require a numeric field to be greater than zero.
fn require_positive<T>(value: T, field: &str) -> Result<(), ConfigError>
where
    T: PartialOrd + Default,
{
    if value <= T::default() {
        return Err(ConfigError::invalid(field, "must be greater than 0"));
    }
    Ok(())
}

fn require_distinct_separators(decimal: char, grouping: char) -> Result<(), ConfigError> {
    if decimal == grouping {
        return Err(ConfigError::invalid(
            "format.grouping_separator",
            "must differ from the decimal separator",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Configuration::new_default();
        assert!(!config.content().full());
        assert_eq!(config.content().width(), 570);
        assert_eq!(config.font().size(), 16);
        assert_eq!(config.font().color().as_str(), "#51545E");
        assert_eq!(config.colors().background.as_str(), "#F2F4F6");
        assert_eq!(config.button().default_color, ButtonColor::Blue);
        assert_eq!(config.button().radius, 3);
        assert_eq!(
            config.button().palette.style(ButtonColor::Green).background.as_str(),
            "#22BC66"
        );
        assert_eq!(config.text().wrap_width(), None);
        assert_eq!(config.text().banner_width(), 27);
        assert_eq!(config.text().divider_width(), 11);
        assert_eq!(config.format().decimal_separator(), '.');
        assert_eq!(config.format().grouping_separator(), ',');
        assert_eq!(config.format().amount_pattern().as_str(), "#,##0.00");
        assert_eq!(config.format().date_pattern().as_str(), "%Y-%m-%d");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_setters_change_single_field() {
        let mut config = Configuration::new_default();
        config.content_mut().set_full(true);
        config.content_mut().set_width(800).unwrap();
        assert!(config.content().full());
        assert_eq!(config.content().width(), 800);
        assert_eq!(config.font().size(), 16);
    }

    #[test]
    fn test_set_width_zero_rejected() {
        let mut config = Configuration::new_default();
        let err = config.content_mut().set_width(0).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "content.width"));
        assert_eq!(config.content().width(), 570);
    }

    #[test]
    fn test_set_font_rejects_empty_family_and_zero_size() {
        let mut config = Configuration::new_default();
        assert!(config.font_mut().set_family("  ").is_err());
        assert!(config.font_mut().set_size(0).is_err());
        assert!(config.font_mut().set_family("Arial; color: red").is_err());
        assert!(config.font_mut().set_family("</style>").is_err());
        config.font_mut().set_family("Georgia, serif").unwrap();
        assert_eq!(config.font().family(), "Georgia, serif");
    }

    #[test]
    fn test_set_wrap_width() {
        let mut config = Configuration::new_default();
        assert!(config.text_mut().set_wrap_width(Some(0)).is_err());
        config.text_mut().set_wrap_width(Some(72)).unwrap();
        assert_eq!(config.text().wrap_width(), Some(72));
        config.text_mut().set_wrap_width(None).unwrap();
        assert_eq!(config.text().wrap_width(), None);
    }

    #[test]
    fn test_set_separators() {
        let mut config = Configuration::new_default();
        config.format_mut().set_separators(',', '.').unwrap();
        assert_eq!(config.format().decimal_separator(), ',');
        assert_eq!(config.format().grouping_separator(), '.');
        assert!(config.format_mut().set_separators('.', '.').is_err());
    }

    #[test]
    fn test_parse_empty_toml_uses_defaults() {
        let config = Configuration::from_toml_str("").unwrap();
        assert_eq!(config.content().width(), 570);
        assert_eq!(config.colors().link.as_str(), "#3869D4");
    }

    #[test]
    fn test_parse_nested_toml() {
        let toml = r##"
[content]
full = true

[font]
size = 14

[colors]
background = "#000000"

[button]
default_color = "red"
radius = 6

[button.palette.red]
background = "#CC0000"
text = "#FFFFFF"

[text]
wrap_width = 72

[format]
decimal_separator = ","
grouping_separator = "."
amount_pattern = "#,##0.00 '€'"
date_pattern = "%d.%m.%Y"
"##;
        let config = Configuration::from_toml_str(toml).unwrap();
        assert!(config.content().full());
        assert_eq!(config.content().width(), 570);
        assert_eq!(config.font().size(), 14);
        assert_eq!(config.colors().background.as_str(), "#000000");
        assert_eq!(config.button().default_color, ButtonColor::Red);
        assert_eq!(config.button().radius, 6);
        assert_eq!(config.button().palette.red.background.as_str(), "#CC0000");
        assert_eq!(config.button().palette.blue.background.as_str(), "#3869D4");
        assert_eq!(config.text().wrap_width(), Some(72));
        assert_eq!(config.format().decimal_separator(), ',');
        assert_eq!(config.format().amount_pattern().suffix(), " €");
        assert_eq!(config.format().date_pattern().as_str(), "%d.%m.%Y");
    }

    #[test]
    fn test_parse_invalid_color_fails() {
        let result = Configuration::from_toml_str("[colors]\nlink = \"blue\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_parse_zero_width_fails_validation() {
        let result = Configuration::from_toml_str("[content]\nwidth = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_parse_equal_separators_fails_validation() {
        let result = Configuration::from_toml_str(
            "[format]\ndecimal_separator = \",\"\ngrouping_separator = \",\"\n",
        );
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[content]\nwidth = 640").unwrap();
        let config = Configuration::load(file.path()).unwrap();
        assert_eq!(config.content().width(), 640);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Configuration::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_error_message_names_field() {
        let err = ConfigError::invalid("content.width", "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "invalid configuration: content.width must be greater than 0"
        );
    }
}
