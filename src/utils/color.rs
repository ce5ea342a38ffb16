use eframe::egui::Color32;

pub trait ColorExt {
    fn from_hex(hex: &str) -> Option<Self>
    where
        Self: Sized;
}

impl ColorExt for Color32 {
    fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color32::from_rgb(r, g, b))
    }
}

/// Colours of the clinical theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub primary: Color32,
    pub accent: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub danger: Color32,
    pub muted: Color32,
}

impl Palette {
    pub fn clinical() -> Self {
        let hex = |code: &str| Color32::from_hex(code).unwrap_or(Color32::GRAY);
        Self {
            primary: hex("#1d6fb8"),
            accent: hex("#14b8a6"),
            success: hex("#16a34a"),
            warning: hex("#f59e0b"),
            danger: hex("#dc3232"),
            muted: hex("#8a94a6"),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::clinical()
    }
}
