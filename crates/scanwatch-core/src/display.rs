/// Status-to-visual mapping and progress geometry.
///
/// All colour constants are defined here so front ends reference
/// semantically-named values rather than raw hex codes. The lookup is a
/// plain match over [`ScanStatus`] with a default entry for everything the
/// table does not name.
use crate::model::ScanStatus;
use std::f32::consts::PI;
use std::fmt;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Brand accent used for the progress ring stroke.
    pub const ACCENT: Rgb = Rgb(0xbf, 0x00, 0x00);

    /// `#rrggbb` form.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Icon shown beside the status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    CheckCircle,
    AlertTriangle,
    Activity,
    Clock,
}

impl StatusIcon {
    /// Single-glyph stand-in for terminals.
    pub fn glyph(self) -> char {
        match self {
            Self::CheckCircle => '✔',
            Self::AlertTriangle => '⚠',
            Self::Activity => '●',
            Self::Clock => '◷',
        }
    }
}

/// Broad visual tone of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Danger,
    Active,
    Neutral,
}

/// Visual configuration for one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    pub tone: Tone,
    pub icon: StatusIcon,
    pub foreground: Rgb,
    pub background: Rgb,
    pub border: Rgb,
    pub progress: Rgb,
    /// Whether the icon should pulse while shown.
    pub animated: bool,
}

const COMPLETED: StatusDisplay = StatusDisplay {
    tone: Tone::Success,
    icon: StatusIcon::CheckCircle,
    foreground: Rgb(0x16, 0xa3, 0x4a),
    background: Rgb(0xe8, 0xf6, 0xed),
    border: Rgb(0xd0, 0xed, 0xdb),
    progress: Rgb(0x16, 0xa3, 0x4a),
    animated: false,
};

const FAILED: StatusDisplay = StatusDisplay {
    tone: Tone::Danger,
    icon: StatusIcon::AlertTriangle,
    foreground: Rgb(0xdc, 0x26, 0x26),
    background: Rgb(0xfc, 0xe9, 0xe9),
    border: Rgb(0xf8, 0xd4, 0xd4),
    progress: Rgb(0xdc, 0x26, 0x26),
    animated: false,
};

const IN_PROGRESS: StatusDisplay = StatusDisplay {
    tone: Tone::Active,
    icon: StatusIcon::Activity,
    foreground: Rgb(0x25, 0x63, 0xeb),
    background: Rgb(0xe9, 0xef, 0xfd),
    border: Rgb(0xd3, 0xe0, 0xfb),
    progress: Rgb(0x25, 0x63, 0xeb),
    animated: true,
};

const DEFAULT: StatusDisplay = StatusDisplay {
    tone: Tone::Neutral,
    icon: StatusIcon::Clock,
    foreground: Rgb(0x2d, 0x2d, 0x2d),
    background: Rgb(0xe5, 0xe5, 0xe5),
    border: Rgb(0xe5, 0xe5, 0xe5),
    progress: Rgb(0x2d, 0x2d, 0x2d),
    animated: false,
};

impl StatusDisplay {
    /// Look up the visual configuration for a status.
    ///
    /// Pending, cancelled, and unknown statuses share the default entry.
    pub fn for_status(status: &ScanStatus) -> Self {
        match status {
            ScanStatus::Completed => COMPLETED,
            ScanStatus::Failed => FAILED,
            ScanStatus::InProgress => IN_PROGRESS,
            _ => DEFAULT,
        }
    }
}

/// Radius of the circular progress indicator, in view-box units.
pub const RING_RADIUS: f32 = 85.0;

/// Stroke geometry for a circular progress ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub circumference: f32,
    pub dash_offset: f32,
}

/// Compute the dash offset that fills `percent` of a ring of `radius`.
///
/// `percent` is clamped to `0.0..=100.0`.
pub fn ring_geometry(radius: f32, percent: f32) -> RingGeometry {
    let circumference = 2.0 * PI * radius;
    let fraction = percent.clamp(0.0, 100.0) / 100.0;
    RingGeometry {
        circumference,
        dash_offset: circumference - fraction * circumference,
    }
}

/// Render a fixed-width text bar, e.g. `[########------------]`.
pub fn text_bar(percent: f32, width: usize) -> String {
    let fraction = percent.clamp(0.0, 100.0) / 100.0;
    let filled = ((width as f32) * fraction).round() as usize;
    let filled = filled.min(width);
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    bar.extend(std::iter::repeat('#').take(filled));
    bar.extend(std::iter::repeat('-').take(width - filled));
    bar.push(']');
    bar
}
