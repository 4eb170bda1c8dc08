//! Theme configuration for the desktop app

/// Color palette for the application
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    /// Notes page background
    pub page: &'static str,
    /// Sign-in page background
    pub page_login: &'static str,
    pub panel: &'static str,
    /// Toolbar and expand-button yellow
    pub highlight: &'static str,
    /// Composer footer
    pub footer: &'static str,
    pub ink: &'static str,
    pub ink_dark: &'static str,
    /// Sign-in card ink
    pub ink_login: &'static str,
    pub danger: &'static str,
    pub muted: &'static str,
}

pub const HONEY_PALETTE: ColorPalette = ColorPalette {
    page: "#FFCC33",
    page_login: "linear-gradient(180deg, #FFD60A 0%, #FFC300 100%)",
    panel: "#ffffff",
    highlight: "#FEE440",
    footer: "#FFC300",
    ink: "#78350F",
    ink_dark: "#451A03",
    ink_login: "#3E2723",
    danger: "#FF4D6D",
    muted: "#d6d3d1",
};

#[must_use]
pub const fn palette() -> &'static ColorPalette {
    &HONEY_PALETTE
}

/// Styles for markup the components cannot style inline: rendered markdown
/// and hover states.
pub const GLOBAL_CSS: &str = r"
body { margin: 0; }
button { cursor: pointer; font-family: inherit; }
button:disabled { cursor: default; opacity: 0.5; }
textarea::placeholder, input::placeholder { color: #a8a29e; }
.hive-markdown { line-height: 1.35; overflow-wrap: anywhere; }
.hive-markdown p { margin: 0; }
.hive-markdown ul, .hive-markdown ol { margin: 8px 0; padding-left: 22px; }
.hive-markdown strong { font-weight: 900; font-size: 1.05em; }
.hive-markdown del { opacity: 0.5; text-decoration-color: #FF4D6D; text-decoration-thickness: 2px; }
.hive-markdown hr { border: none; border-top: 2px dashed rgba(120, 53, 15, 0.3); margin: 16px 0; }
.hive-markdown h3 { font-size: 14px; font-weight: 900; text-transform: uppercase; margin: 16px 0 8px; }
.hive-markdown table { border-collapse: collapse; }
.hive-markdown td, .hive-markdown th { border: 1px solid #78350F; padding: 2px 6px; }
.hive-notes { column-width: 300px; column-gap: 24px; }
.hive-card { break-inside: avoid; margin-bottom: 24px; }
";
