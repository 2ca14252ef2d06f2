/// A straight-alpha sRGB color, 8 bits per channel.
///
/// Layout is exactly one RGBA8 texel, so slices of colors can be cast to and from raw image bytes
/// without copying. Compared channel-by-channel.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::module_name_repetitions)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}
impl Color {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
    /// A fully opaque color.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
    #[must_use]
    pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
    #[must_use]
    pub const fn as_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
impl From<[u8; 4]> for Color {
    fn from(value: [u8; 4]) -> Self {
        Self::from_array(value)
    }
}
impl From<Color> for [u8; 4] {
    fn from(value: Color) -> Self {
        value.as_array()
    }
}
impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { r, g, b, a } = *self;
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected a color name or `#rrggbb[aa]`")]
    Malformed,
    #[error("invalid hex digit")]
    BadDigit,
}
/// Parse `black`, `white`, `transparent`, or hex in the form `#rrggbb` / `#rrggbbaa`.
impl std::str::FromStr for Color {
    type Err = ColorParseError;
    fn from_str(str: &str) -> Result<Self, Self::Err> {
        match str {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            "transparent" => return Ok(Self::TRANSPARENT),
            _ => (),
        }
        let hex = str.strip_prefix('#').ok_or(ColorParseError::Malformed)?;
        if !hex.is_ascii() || !matches!(hex.len(), 6 | 8) {
            return Err(ColorParseError::Malformed);
        }
        let channel = |idx: usize| -> Result<u8, ColorParseError> {
            // `from_str_radix` alone would take a sign.
            hex.get(idx * 2..idx * 2 + 2)
                .filter(|digits| digits.bytes().all(|b| b.is_ascii_hexdigit()))
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or(ColorParseError::BadDigit)
        };
        let alpha = if hex.len() == 8 { channel(3)? } else { 255 };

        Ok(Self::new(channel(0)?, channel(1)?, channel(2)?, alpha))
    }
}
