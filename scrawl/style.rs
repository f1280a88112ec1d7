//! SGR style descriptors and the escape sequences built from them.

use std::str;

use derive_more::Deref;
use enumset::{
   EnumSet,
   EnumSetType,
};
use smallvec::SmallVec;

use crate::{
   Error,
   Result,
};

/// Control Sequence Introducer.
pub const CSI: &str = "\x1B[";

/// The "no style" SGR code.
pub const NONE: u8 = 0;

/// Escape sequence that resets every style attribute.
pub const RESET: &str = const_str::concat!(CSI, NONE, "m");

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
   #[default]
   Primary,
   Fixed(u8),
   Rgb(u8, u8, u8),
   Black,
   Red,
   Green,
   Yellow,
   Blue,
   Magenta,
   Cyan,
   White,
   BrightBlack,
   BrightRed,
   BrightGreen,
   BrightYellow,
   BrightBlue,
   BrightMagenta,
   BrightCyan,
   BrightWhite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
   Fg,
   Bg,
}

impl Color {
   fn extend_codes(self, codes: &mut SmallVec<u8, 4>, layer: Layer) {
      // Background codes are the foreground ones shifted by ten.
      let shift = match layer {
         Layer::Fg => 0,
         Layer::Bg => 10,
      };

      let base = match self {
         Color::Primary => 39,
         Color::Fixed(_) | Color::Rgb(..) => 38,
         Color::Black => 30,
         Color::Red => 31,
         Color::Green => 32,
         Color::Yellow => 33,
         Color::Blue => 34,
         Color::Magenta => 35,
         Color::Cyan => 36,
         Color::White => 37,
         Color::BrightBlack => 90,
         Color::BrightRed => 91,
         Color::BrightGreen => 92,
         Color::BrightYellow => 93,
         Color::BrightBlue => 94,
         Color::BrightMagenta => 95,
         Color::BrightCyan => 96,
         Color::BrightWhite => 97,
      };

      codes.push(base + shift);

      match self {
         Color::Fixed(number) => codes.extend([5, number]),
         Color::Rgb(r, g, b) => codes.extend([2, r, g, b]),
         _ => {},
      }
   }
}

#[derive(EnumSetType, Debug, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Attr {
   Bold,
   Dim,
   Italic,
   Underline,
   Blink,
   RapidBlink,
   Invert,
   Conceal,
   Strike,
}

impl Attr {
   #[must_use]
   pub fn code(self) -> u8 {
      match self {
         Attr::Bold => 1,
         Attr::Dim => 2,
         Attr::Italic => 3,
         Attr::Underline => 4,
         Attr::Blink => 5,
         Attr::RapidBlink => 6,
         Attr::Invert => 7,
         Attr::Conceal => 8,
         Attr::Strike => 9,
      }
   }
}

/// A named style, convertible into [`Codes`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Style {
   pub fg:    Color,
   pub bg:    Color,
   pub attrs: EnumSet<Attr>,
}

macro_rules! set {
   ($($name:ident : $field:ident $symbol:tt $value:expr;)*) => {
      $(
         #[must_use]
         pub fn $name(mut self) -> Style {
            self.$field $symbol $value;
            self
         }
      )*
   };
}

impl Style {
   #[must_use]
   pub fn new() -> Self {
      Self::default()
   }

   #[must_use]
   pub fn fg(mut self, color: Color) -> Self {
      self.fg = color;
      self
   }

   #[must_use]
   pub fn bg(mut self, color: Color) -> Self {
      self.bg = color;
      self
   }

   #[must_use]
   pub fn attr(mut self, attrs: impl Into<EnumSet<Attr>>) -> Self {
      self.attrs.insert_all(attrs.into());
      self
   }

   #[must_use]
   pub fn fixed(mut self, color: u8) -> Self {
      self.fg = Color::Fixed(color);
      self
   }

   #[must_use]
   pub fn on_fixed(mut self, color: u8) -> Self {
      self.bg = Color::Fixed(color);
      self
   }

   #[must_use]
   pub fn rgb(mut self, r: u8, g: u8, b: u8) -> Self {
      self.fg = Color::Rgb(r, g, b);
      self
   }

   #[must_use]
   pub fn on_rgb(mut self, r: u8, g: u8, b: u8) -> Self {
      self.bg = Color::Rgb(r, g, b);
      self
   }

   set! {
      black:   fg = Color::Black;
      red:     fg = Color::Red;
      green:   fg = Color::Green;
      yellow:  fg = Color::Yellow;
      blue:    fg = Color::Blue;
      magenta: fg = Color::Magenta;
      cyan:    fg = Color::Cyan;
      white:   fg = Color::White;

      on_black:   bg = Color::Black;
      on_red:     bg = Color::Red;
      on_green:   bg = Color::Green;
      on_yellow:  bg = Color::Yellow;
      on_blue:    bg = Color::Blue;
      on_magenta: bg = Color::Magenta;
      on_cyan:    bg = Color::Cyan;
      on_white:   bg = Color::White;

      bright_black:   fg = Color::BrightBlack;
      bright_red:     fg = Color::BrightRed;
      bright_green:   fg = Color::BrightGreen;
      bright_yellow:  fg = Color::BrightYellow;
      bright_blue:    fg = Color::BrightBlue;
      bright_magenta: fg = Color::BrightMagenta;
      bright_cyan:    fg = Color::BrightCyan;
      bright_white:   fg = Color::BrightWhite;

      on_bright_black:   bg = Color::BrightBlack;
      on_bright_red:     bg = Color::BrightRed;
      on_bright_green:   bg = Color::BrightGreen;
      on_bright_yellow:  bg = Color::BrightYellow;
      on_bright_blue:    bg = Color::BrightBlue;
      on_bright_magenta: bg = Color::BrightMagenta;
      on_bright_cyan:    bg = Color::BrightCyan;
      on_bright_white:   bg = Color::BrightWhite;

      bold:        attrs |= Attr::Bold;
      dim:         attrs |= Attr::Dim;
      italic:      attrs |= Attr::Italic;
      underline:   attrs |= Attr::Underline;
      blink:       attrs |= Attr::Blink;
      rapid_blink: attrs |= Attr::RapidBlink;
      invert:      attrs |= Attr::Invert;
      conceal:     attrs |= Attr::Conceal;
      strike:      attrs |= Attr::Strike;
   }

   /// The SGR codes selecting this style from a reset state. Attributes come
   /// first, then the foreground, then the background.
   #[must_use]
   pub fn codes(self) -> Codes {
      if self == Style::default() {
         return Codes::from(NONE);
      }

      let mut codes = SmallVec::new();

      for attr in self.attrs {
         codes.push(attr.code());
      }

      if self.fg != Color::Primary {
         self.fg.extend_codes(&mut codes, Layer::Fg);
      }

      if self.bg != Color::Primary {
         self.bg.extend_codes(&mut codes, Layer::Bg);
      }

      Codes(codes)
   }
}

/// A style descriptor: one SGR code or an ordered sequence of them.
#[derive(Deref, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Codes(SmallVec<u8, 4>);

impl Codes {
   /// Builds the `ESC[<codes>m` sequence, joining the codes with `;`.
   #[must_use]
   pub fn escape(&self) -> String {
      let mut buffer = itoa::Buffer::new();
      let mut escape = String::from(CSI);

      for (index, &code) in self.0.iter().enumerate() {
         if index != 0 {
            escape.push(';');
         }

         escape.push_str(buffer.format(code));
      }

      escape.push('m');
      escape
   }
}

impl From<u8> for Codes {
   fn from(code: u8) -> Self {
      Self(iter_codes([code]))
   }
}

impl From<&[u8]> for Codes {
   fn from(codes: &[u8]) -> Self {
      Self(iter_codes(codes.iter().copied()))
   }
}

impl<const N: usize> From<[u8; N]> for Codes {
   fn from(codes: [u8; N]) -> Self {
      Self(iter_codes(codes))
   }
}

impl From<Vec<u8>> for Codes {
   fn from(codes: Vec<u8>) -> Self {
      Self(iter_codes(codes))
   }
}

impl From<Style> for Codes {
   fn from(style: Style) -> Self {
      style.codes()
   }
}

fn iter_codes(codes: impl IntoIterator<Item = u8>) -> SmallVec<u8, 4> {
   codes.into_iter().collect()
}

impl str::FromStr for Codes {
   type Err = Error;

   /// Parses `"1"`, `"1;31"` or `"1, 31"`.
   fn from_str(s: &str) -> Result<Self> {
      let invalid = |reason| {
         Error::InvalidStyle {
            descriptor: s.to_owned(),
            reason,
         }
      };

      if s.trim().is_empty() {
         return Err(invalid("no codes given"));
      }

      s.split([';', ','])
         .map(|code| {
            code
               .trim()
               .parse::<u8>()
               .map_err(|_| invalid("codes must be integers between 0 and 255"))
         })
         .collect::<Result<SmallVec<u8, 4>>>()
         .map(Self)
   }
}

/// The reset sequence, `ESC[0m`.
#[must_use]
pub fn reset() -> &'static str {
   RESET
}
