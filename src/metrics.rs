//! Advance widths for the standard-14 Helvetica faces.
//!
//! The tables hold the Adobe AFM widths (thousandths of an em) for the
//! printable ASCII range. The standard-14 fonts need no embedding, so
//! these tables are the whole measurement story: `text_width` returns
//! points for a given font size, the same unit as page geometry and
//! margins.

/// Glyph advance widths for one face, in units per 1000 em.
pub struct FontMetrics {
    widths: [u16; 95],
    fallback: u16,
}

impl FontMetrics {
    /// Rendered width of `text` at `size` points.
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        let units: u64 = text.chars().map(|c| u64::from(self.char_width(c))).sum();
        units as f64 * size / 1000.0
    }

    fn char_width(&self, c: char) -> u16 {
        match u32::from(c) {
            0x20..=0x7e => self.widths[c as usize - 0x20],
            // Outside the table (accented Latin-1 and beyond) we
            // approximate with a typical lowercase advance.
            _ => self.fallback,
        }
    }
}

/// Helvetica, ASCII 0x20..=0x7E.
pub const HELVETICA: FontMetrics = FontMetrics {
    widths: [
        278, 278, 355, 556, 556, 889, 667, 191, // space ! " # $ % & '
        333, 333, 389, 584, 278, 333, 278, 278, // ( ) * + , - . /
        556, 556, 556, 556, 556, 556, 556, 556, // 0 1 2 3 4 5 6 7
        556, 556, 278, 278, 584, 584, 584, 556, // 8 9 : ; < = > ?
        1015, 667, 667, 722, 722, 667, 611, 778, // @ A B C D E F G
        722, 278, 500, 667, 556, 833, 722, 778, // H I J K L M N O
        667, 778, 722, 667, 611, 722, 667, 944, // P Q R S T U V W
        667, 667, 611, 278, 278, 278, 469, 556, // X Y Z [ \ ] ^ _
        333, 556, 556, 500, 556, 556, 278, 556, // ` a b c d e f g
        556, 222, 222, 500, 222, 833, 556, 556, // h i j k l m n o
        556, 556, 333, 500, 278, 556, 500, 722, // p q r s t u v w
        500, 500, 500, 334, 260, 334, 584, // x y z { | } ~
    ],
    fallback: 556,
};

/// Helvetica-Bold, ASCII 0x20..=0x7E.
pub const HELVETICA_BOLD: FontMetrics = FontMetrics {
    widths: [
        278, 333, 474, 556, 556, 889, 722, 238, // space ! " # $ % & '
        333, 333, 389, 584, 278, 333, 278, 278, // ( ) * + , - . /
        556, 556, 556, 556, 556, 556, 556, 556, // 0 1 2 3 4 5 6 7
        556, 556, 333, 333, 584, 584, 584, 611, // 8 9 : ; < = > ?
        975, 722, 722, 722, 722, 667, 611, 778, // @ A B C D E F G
        722, 278, 556, 722, 611, 833, 722, 778, // H I J K L M N O
        667, 778, 722, 667, 611, 722, 667, 944, // P Q R S T U V W
        667, 667, 611, 333, 278, 333, 584, 556, // X Y Z [ \ ] ^ _
        333, 556, 611, 556, 611, 556, 333, 611, // ` a b c d e f g
        611, 278, 278, 556, 278, 889, 611, 611, // h i j k l m n o
        611, 611, 389, 556, 333, 611, 556, 778, // p q r s t u v w
        556, 556, 500, 389, 280, 389, 584, // x y z { | } ~
    ],
    fallback: 611,
};
