//! Text `style` attribute parsing and structured representation.

use std::fmt;

/// Font weight for chart text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn from_bold(bold: bool) -> Self {
        if bold { FontWeight::Bold } else { FontWeight::Normal }
    }

    fn as_str(self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// Structured text style attribute (`font-size:12px;font-family:serif;font-weight:bold`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_weight: Option<FontWeight>,
}

impl TextStyle {
    pub fn new(font_size: f64, font_family: impl Into<String>, weight: FontWeight) -> Self {
        Self {
            font_size: Some(font_size),
            font_family: Some(font_family.into()),
            font_weight: Some(weight),
        }
    }

    /// Parse a style string such as `font-size:12px;font-weight:bold`
    pub fn parse(s: &str) -> Result<Self, StyleParseError> {
        let mut style = TextStyle::default();

        for part in s.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (key, value) = part
                .split_once(':')
                .ok_or_else(|| StyleParseError::InvalidProperty(part.to_string()))?;
            let value = value.trim();

            match key.trim() {
                "font-size" => {
                    let number = value.strip_suffix("px").unwrap_or(value);
                    style.font_size = Some(
                        number
                            .parse()
                            .map_err(|_| StyleParseError::InvalidNumber(value.to_string()))?,
                    );
                }
                "font-family" => style.font_family = Some(value.to_string()),
                "font-weight" => {
                    style.font_weight = Some(match value {
                        "bold" | "700" => FontWeight::Bold,
                        _ => FontWeight::Normal,
                    });
                }
                // Ignore unknown properties
                _ => {}
            }
        }

        Ok(style)
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(size) = self.font_size {
            parts.push(format!("font-size:{}px", fmt_num(size)));
        }
        if let Some(ref family) = self.font_family {
            parts.push(format!("font-family:{}", family));
        }
        if let Some(weight) = self.font_weight {
            parts.push(format!("font-weight:{}", weight.as_str()));
        }
        write!(f, "{}", parts.join(";"))
    }
}

fn fmt_num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    s.to_string()
}

/// Error parsing style
#[derive(Debug, Clone, PartialEq)]
pub enum StyleParseError {
    InvalidProperty(String),
    InvalidNumber(String),
}

impl fmt::Display for StyleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleParseError::InvalidProperty(s) => write!(f, "invalid style property: {}", s),
            StyleParseError::InvalidNumber(s) => write!(f, "invalid number in style: {}", s),
        }
    }
}

impl std::error::Error for StyleParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_display() {
        let style = TextStyle::new(12.0, "serif", FontWeight::Bold);
        assert_eq!(
            style.to_string(),
            "font-size:12px;font-family:serif;font-weight:bold"
        );
    }

    #[test]
    fn test_parse_style() {
        let style = TextStyle::parse("font-size:13.5px;font-weight:normal;").unwrap();
        assert_eq!(style.font_size, Some(13.5));
        assert_eq!(style.font_weight, Some(FontWeight::Normal));
        assert_eq!(style.font_family, None);
    }

    #[test]
    fn test_style_roundtrip() {
        let original = TextStyle::new(14.0, "FangSong, serif", FontWeight::Normal);
        let reparsed = TextStyle::parse(&original.to_string()).unwrap();
        assert_eq!(original, reparsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            TextStyle::parse("font-size"),
            Err(StyleParseError::InvalidProperty(_))
        ));
        assert!(matches!(
            TextStyle::parse("font-size:big"),
            Err(StyleParseError::InvalidNumber(_))
        ));
    }
}
