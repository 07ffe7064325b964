use image::Rgb;

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);

    pub fn dist_sq(self, other: Color) -> u32 {
        let d = |a: u8, b: u8| {
            let d = a.abs_diff(b) as u32;
            d * d
        };
        d(self.0, other.0) + d(self.1, other.1) + d(self.2, other.2)
    }
}

impl From<Color> for Rgb<u8> {
    fn from(Color(r, g, b): Color) -> Self {
        Rgb([r, g, b])
    }
}

impl From<Rgb<u8>> for Color {
    fn from(Rgb([r, g, b]): Rgb<u8>) -> Self {
        Color(r, g, b)
    }
}

// Palette
//------------------------------------------------------------------------------

/// Symbol `s` is painted as `PALETTE[s]`.
pub const PALETTE: [Color; 8] = [
    Color(0, 0, 0),       // Black
    Color(255, 0, 0),     // Red
    Color(0, 255, 0),     // Green
    Color(0, 0, 255),     // Blue
    Color(255, 255, 0),   // Yellow
    Color(255, 0, 255),   // Magenta
    Color(0, 255, 255),   // Cyan
    Color(255, 255, 255), // White
];

pub fn symbol_to_color(symbol: u8) -> Color {
    debug_assert!((symbol as usize) < PALETTE.len(), "Symbol out of range: {symbol}");
    PALETTE[(symbol & 0b111) as usize]
}

/// Nearest palette entry by squared RGB distance. Ties go to the lower index.
pub fn color_to_symbol(color: Color) -> u8 {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (i, &p) in PALETTE.iter().enumerate() {
        let dist = color.dist_sq(p);
        if dist < best_dist {
            best = i as u8;
            best_dist = dist;
        }
    }
    best
}

#[cfg(test)]
mod palette_tests {
    use test_case::test_case;

    use super::{color_to_symbol, symbol_to_color, Color, PALETTE};

    #[test]
    fn test_exact_round_trip() {
        for s in 0..8 {
            assert_eq!(color_to_symbol(symbol_to_color(s)), s);
        }
    }

    #[test_case(Color(10, 10, 10), 0)]
    #[test_case(Color(245, 12, 3), 1)]
    #[test_case(Color(0, 200, 30), 2)]
    #[test_case(Color(20, 20, 235), 3)]
    #[test_case(Color(240, 250, 10), 4)]
    #[test_case(Color(230, 5, 240), 5)]
    #[test_case(Color(8, 246, 250), 6)]
    #[test_case(Color(250, 240, 245), 7)]
    fn test_noisy_color(color: Color, exp: u8) {
        assert_eq!(color_to_symbol(color), exp);
    }

    #[test]
    fn test_midpoint_colors() {
        assert_eq!(color_to_symbol(Color(127, 127, 127)), 0);
        assert_eq!(color_to_symbol(Color(128, 128, 128)), 7);
        assert_eq!(color_to_symbol(Color(127, 128, 127)), 2);
        assert_eq!(PALETTE[2].dist_sq(Color(127, 128, 127)), 127 * 127 * 3);
    }
}
