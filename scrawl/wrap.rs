//! Incremental line wrapping.
//!
//! A [`Wrapper`] remembers the column the last write ended at and the spaces
//! it held back from the end of that write, so that text written in several
//! pieces wraps the same way as the same text written at once.

use std::{
   iter,
   mem,
};

use itertools::Itertools as _;

/// Characters a line may be broken at.
pub const SEPARATORS: [char; 3] = [' ', '/', '\\'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapper {
   wrap_column: usize,
   indent:      usize,
   column:      usize,
   pending:     String,
}

impl Wrapper {
   /// Creates a wrapper at column 0 with no indent. A wrap column of 0 is
   /// clamped to 1.
   #[must_use]
   pub fn new(wrap_column: usize) -> Self {
      Self {
         wrap_column: wrap_column.max(1),
         indent:      0,
         column:      0,
         pending:     String::new(),
      }
   }

   #[must_use]
   pub fn wrap_column(&self) -> usize {
      self.wrap_column
   }

   /// Sets the maximum line width. Clamped to at least 1.
   pub fn set_wrap_column(&mut self, wrap_column: usize) {
      self.wrap_column = wrap_column.max(1);
   }

   #[must_use]
   pub fn indent(&self) -> usize {
      self.indent
   }

   pub fn set_indent(&mut self, indent: usize) {
      self.indent = indent;
   }

   /// The number of characters already on the current physical line.
   #[must_use]
   pub fn column(&self) -> usize {
      self.column
   }

   /// Marks the start of a new physical line.
   pub fn reset_column(&mut self) {
      self.column = 0;
   }

   /// Spaces held back from the end of the previous [`Wrapper::wrap`] call.
   #[must_use]
   pub fn pending(&self) -> &str {
      &self.pending
   }

   /// Returns the spaces needed to reach the indent from the current column
   /// and advances the column past them.
   pub fn indent_prefix(&mut self) -> String {
      let Some(missing) = self.indent.checked_sub(self.column) else {
         return String::new();
      };

      self.column += missing;
      iter::repeat_n(' ', missing).collect()
   }

   /// Whether the segment overflows the wrap column if placed at the current
   /// column.
   #[must_use]
   pub fn needs_wrap(&self, segment: &str) -> bool {
      self.column + segment.chars().count() > self.wrap_column
   }

   /// Wraps a segment that contains no newlines.
   pub fn wrap_segment(&mut self, segment: &str) -> String {
      let mut wrapped = String::with_capacity(segment.len());
      let mut rest = segment;

      while !rest.is_empty() {
         wrapped.push_str(&self.indent_prefix());

         if !self.needs_wrap(rest) {
            wrapped.push_str(rest);
            self.column += rest.chars().count();
            break;
         }

         let budget = self.wrap_column.saturating_sub(self.column);

         let point = match wrap_point(rest, budget) {
            Some(point) => Some(point),

            // No separator in reach and the rest wouldn't fit a whole line
            // either. Split where this line ends.
            None if budget > 0 && rest.chars().count() > self.wrap_column => Some(budget),

            // Nothing but the indent is on this line, so moving to the next
            // one won't fit the token either.
            None if self.column <= self.indent => {
               tracing::trace!(budget, column = self.column, "forcing split on a fresh line");
               Some(budget.max(1))
            },

            None => None,
         };

         match point {
            Some(point) => {
               let (line, remainder) = rest.split_at(byte_offset(rest, point));

               wrapped.push_str(line);
               wrapped.push('\n');

               rest = remainder.strip_prefix(' ').unwrap_or(remainder);
            },

            None => wrapped.push('\n'),
         }

         tracing::trace!(?point, budget, "wrapped line");
         self.column = 0;
      }

      wrapped
   }

   /// Wraps text that may contain newlines, carrying trailing spaces over to
   /// the next call.
   ///
   /// The spaces at the end of the result are not returned. They are kept and
   /// prepended to the next call's result, unless that result starts on a new
   /// line.
   pub fn wrap(&mut self, text: &str) -> String {
      use None as Newline;
      use Some as Line;

      let pending = mem::take(&mut self.pending);

      let mut segments = text.split('\n').map(Line).intersperse(Newline);

      let mut wrapped = match segments.next() {
         Some(Line(first)) => self.wrap_segment(first),
         _ => String::new(),
      };

      if !wrapped.starts_with('\n') {
         wrapped.insert_str(0, &pending);
      }

      for segment in segments {
         match segment {
            Newline => {
               wrapped.push('\n');
               self.column = 0;
            },

            Line(line) => {
               if !line.is_empty() {
                  wrapped.push_str(&self.wrap_segment(line));
               }
            },
         }
      }

      let trimmed = wrapped.trim_end_matches(' ').len();
      self.pending = wrapped.split_off(trimmed);

      wrapped
   }
}

/// Offset of the rightmost separator in `1..=budget`, counted in characters.
fn wrap_point(s: &str, budget: usize) -> Option<usize> {
   s.chars()
      .enumerate()
      .take(budget.saturating_add(1))
      .skip(1)
      .filter(|&(_, c)| SEPARATORS.contains(&c))
      .map(|(offset, _)| offset)
      .last()
}

fn byte_offset(s: &str, chars: usize) -> usize {
   s.char_indices()
      .nth(chars)
      .map_or(s.len(), |(index, _)| index)
}

#[cfg(test)]
mod tests {
   use proptest::prelude::*;

   use super::*;

   fn wrapper(wrap_column: usize, indent: usize) -> Wrapper {
      let mut wrapper = Wrapper::new(wrap_column);
      wrapper.set_indent(indent);
      wrapper
   }

   #[test]
   fn indent_prefix() {
      let mut wrapper = wrapper(20, 4);

      assert_eq!(wrapper.indent_prefix(), "    ");
      assert_eq!(wrapper.column(), 4);
      assert_eq!(wrapper.indent_prefix(), "");
      assert_eq!(wrapper.column(), 4);

      wrapper.column = 1;
      assert_eq!(wrapper.indent_prefix(), "   ");
   }

   #[test]
   fn needs_wrap() {
      let mut wrapper = wrapper(5, 0);

      assert!(!wrapper.needs_wrap("hello"));
      assert!(wrapper.needs_wrap("hello!"));

      wrapper.wrap("ab");
      assert!(wrapper.needs_wrap("abcd"));
      assert!(!wrapper.needs_wrap("abc"));
   }

   #[test]
   fn zero_wrap_column_is_clamped() {
      let mut wrapper = Wrapper::new(0);
      assert_eq!(wrapper.wrap_column(), 1);

      wrapper.set_wrap_column(0);
      assert_eq!(wrapper.wrap_column(), 1);
   }

   #[test]
   fn fits() {
      assert_eq!(wrapper(10, 0).wrap("hello"), "hello");
   }

   #[test]
   fn words() {
      assert_eq!(wrapper(10, 0).wrap("hello world foo"), "hello\nworld foo");
   }

   #[test]
   fn hard_split() {
      assert_eq!(
         wrapper(5, 0).wrap("superlongtoken"),
         "super\nlongt\noken"
      );
   }

   #[test]
   fn rightmost_separator() {
      assert_eq!(wrapper(11, 0).wrap("a b c d e f g"), "a b c d e f\ng");
   }

   #[test]
   fn slashes_start_the_next_line() {
      assert_eq!(
         wrapper(12, 0).wrap("path/to/some/file"),
         "path/to/some\n/file"
      );
      assert_eq!(wrapper(6, 0).wrap(r"C:\dir\file"), "C:\\dir\n\\file");
   }

   #[test]
   fn indent() {
      assert_eq!(
         wrapper(10, 2).wrap("aaa bbb ccc ddd"),
         "  aaa bbb\n  ccc ddd"
      );
   }

   #[test]
   fn newlines() {
      let mut wrapper = wrapper(10, 2);

      assert_eq!(wrapper.wrap("a\n\nb\n"), "  a\n\n  b\n");
      assert_eq!(wrapper.column(), 0);
   }

   #[test]
   fn token_does_not_fit_after_partial_write() {
      let mut wrapper = wrapper(10, 0);

      assert_eq!(wrapper.wrap("abcdef"), "abcdef");
      assert_eq!(wrapper.wrap("ghijklm"), "\nghijklm");
      assert_eq!(wrapper.column(), 7);
   }

   #[test]
   fn carry_over() {
      let mut wrapper = wrapper(20, 0);

      assert_eq!(wrapper.wrap("hello "), "hello");
      assert_eq!(wrapper.pending(), " ");
      assert_eq!(wrapper.column(), 6);

      assert_eq!(wrapper.wrap("world"), " world");
      assert_eq!(wrapper.pending(), "");
   }

   #[test]
   fn carry_over_dropped_on_wrap() {
      let mut wrapper = wrapper(8, 0);

      assert_eq!(wrapper.wrap("hello "), "hello");
      assert_eq!(wrapper.wrap("world"), "\nworld");
      assert_eq!(wrapper.pending(), "");
   }

   #[test]
   fn carry_over_survives_empty_write() {
      let mut wrapper = wrapper(20, 0);

      assert_eq!(wrapper.wrap("a  "), "a");
      assert_eq!(wrapper.wrap(""), "");
      assert_eq!(wrapper.pending(), "  ");
      assert_eq!(wrapper.wrap("b"), "  b");
   }

   #[test]
   fn concatenation() {
      for (width, pieces) in [
         (8, &["hello ", "world"][..]),
         (20, &["hello ", "world"][..]),
         (5, &["ab", "cdefgh"][..]),
         (5, &["abcde", "fg"][..]),
         (10, &["one two ", "three ", "four five"][..]),
         (30, &["a line ", "\nnext"][..]),
      ] {
         let whole = wrapper(width, 0).wrap(&pieces.concat());

         let mut wrapper = wrapper(width, 0);
         let split = pieces
            .iter()
            .map(|piece| wrapper.wrap(piece))
            .collect::<String>();

         assert_eq!(split, whole, "pieces {pieces:?} at width {width}");
      }
   }

   #[test]
   fn degenerate_widths_terminate() {
      assert_eq!(wrapper(3, 4).wrap("ab"), "    a\n    b\n");
      assert_eq!(wrapper(10, 5).wrap("abcdefgh"), "     abcde\n     fgh");
      assert_eq!(wrapper(1, 0).wrap("a b"), "a\nb");
   }

   proptest! {
      #[test]
      fn no_overflow(text in "[a-z /\\\\]{0,80}", width in 1_usize..30) {
         let wrapped = wrapper(width, 0).wrap(&text);

         for line in wrapped.split('\n') {
            prop_assert!(line.chars().count() <= width, "{line:?} is wider than {width}");
         }
      }

      #[test]
      fn concatenation_after_a_space(
         first in prop::collection::vec("[a-z]{1,8}", 1..12),
         second in prop::collection::vec("[a-z]{1,8}", 1..3),
         width in 8_usize..30,
      ) {
         let first = first.iter().map(|word| format!("{word} ")).collect::<String>();
         let second = second.join(" ");
         prop_assume!(second.len() <= width);

         let whole = wrapper(width, 0).wrap(&format!("{first}{second}"));

         let mut wrapper = wrapper(width, 0);
         let split = wrapper.wrap(&first) + &wrapper.wrap(&second);

         prop_assert_eq!(split, whole);
      }

      #[test]
      fn indent_is_stable(text in "[a-z /]{0,80}", width in 1_usize..30, indent in 0_usize..12) {
         let wrapped = wrapper(width, indent).wrap(&text);
         let prefix = " ".repeat(indent);

         for line in wrapped.split('\n') {
            prop_assert!(line.is_empty() || line.starts_with(&prefix), "{line:?} lost its indent");
         }
      }
   }
}
