//! Intrinsic content measurement for content-driven sizes.

use rustc_hash::FxHashMap;
use trellis_primitives::Size;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::ViewId;

/// Measures the intrinsic content of a view.
///
/// `constrained_width` is the width the content may wrap at (the content box width, not
/// the frame width). The returned size is the content's own extent; adornments are added
/// by the layout pass.
///
/// Closures `Fn(ViewId, i32) -> Size` implement the trait.
pub trait MeasureContent {
	/// Measures `view`'s content when wrapped at `constrained_width` cells.
	fn measure(&self, view: ViewId, constrained_width: i32) -> Size;
}

impl<F> MeasureContent for F
where
	F: Fn(ViewId, i32) -> Size,
{
	fn measure(&self, view: ViewId, constrained_width: i32) -> Size {
		self(view, constrained_width)
	}
}

/// A measurer for trees without intrinsic content: every view measures zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoContent;

impl MeasureContent for NoContent {
	fn measure(&self, _view: ViewId, _constrained_width: i32) -> Size {
		Size::ZERO
	}
}

/// Text labels keyed by view, measured with word wrapping.
#[derive(Debug, Default, Clone)]
pub struct TextContent {
	texts: FxHashMap<ViewId, String>,
}

impl TextContent {
	/// Creates an empty measurer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the text of `view`, returning the previous text.
	pub fn insert(&mut self, view: ViewId, text: impl Into<String>) -> Option<String> {
		self.texts.insert(view, text.into())
	}

	/// Removes the text of `view`.
	pub fn remove(&mut self, view: ViewId) -> Option<String> {
		self.texts.remove(&view)
	}

	/// The text of `view`.
	pub fn get(&self, view: ViewId) -> Option<&str> {
		self.texts.get(&view).map(String::as_str)
	}
}

impl MeasureContent for TextContent {
	fn measure(&self, view: ViewId, constrained_width: i32) -> Size {
		self.get(view)
			.map_or(Size::ZERO, |text| measure_text(text, constrained_width))
	}
}

/// Measures `text` greedily word-wrapped at `width` cells.
///
/// Words are separated by whitespace and joined with single spaces; explicit newlines start
/// a new line. A word wider than `width` is broken at grapheme boundaries. A `width` of 0 or
/// less means "unconstrained": each source line is one line.
///
/// # Examples
///
/// ```
/// use trellis_layout::measure_text;
/// use trellis_primitives::Size;
///
/// assert_eq!(measure_text("hello world", 0), Size::new(11, 1));
/// assert_eq!(measure_text("hello world", 7), Size::new(5, 2));
/// ```
pub fn measure_text(text: &str, width: i32) -> Size {
	if text.is_empty() {
		return Size::ZERO;
	}
	let limit = if width > 0 { width as usize } else { usize::MAX };

	let mut widest = 0usize;
	let mut lines = 0usize;
	for source_line in text.split('\n') {
		let mut current = 0usize;
		lines += 1;
		for word in source_line.split_whitespace() {
			let word_width = word.width();
			if word_width > limit {
				// Break the word into chunks that fit.
				if current > 0 {
					widest = widest.max(current);
					lines += 1;
				}
				current = 0;
				for grapheme in word.graphemes(true) {
					let grapheme_width = grapheme.width();
					if current > 0 && current + grapheme_width > limit {
						widest = widest.max(current);
						lines += 1;
						current = 0;
					}
					current += grapheme_width;
				}
				continue;
			}

			if current == 0 {
				current = word_width;
			} else if current + 1 + word_width <= limit {
				current += 1 + word_width;
			} else {
				widest = widest.max(current);
				lines += 1;
				current = word_width;
			}
		}
		widest = widest.max(current);
	}
	Size::new(clamp_i32(widest), clamp_i32(lines))
}

fn clamp_i32(value: usize) -> i32 {
	i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case::empty("", 10, Size::ZERO)]
	#[case::single_word("hello", 10, Size::new(5, 1))]
	#[case::fits("hello world", 11, Size::new(11, 1))]
	#[case::wraps("hello world", 10, Size::new(5, 2))]
	#[case::unconstrained("hello world", 0, Size::new(11, 1))]
	#[case::newlines("ab\ncdef\n", 0, Size::new(4, 3))]
	#[case::collapses_spaces("a    b", 10, Size::new(3, 1))]
	#[case::long_word("abcdefghij", 4, Size::new(4, 3))]
	#[case::long_word_after_text("ab abcdefgh", 4, Size::new(4, 3))]
	#[case::wide_graphemes("日本語テキスト", 4, Size::new(4, 4))]
	fn measures_wrapped_text(#[case] text: &str, #[case] width: i32, #[case] expected: Size) {
		assert_eq!(measure_text(text, width), expected);
	}

	#[test]
	fn text_content_measures_by_view() {
		let view = ViewId::new(0, 0);
		let other = ViewId::new(1, 0);
		let mut content = TextContent::new();
		content.insert(view, "one two three");
		assert_eq!(content.measure(view, 7), Size::new(7, 2));
		assert_eq!(content.measure(other, 7), Size::ZERO);
		assert_eq!(content.remove(view).as_deref(), Some("one two three"));
		assert_eq!(content.measure(view, 7), Size::ZERO);
	}

	#[test]
	fn closures_measure() {
		let fixed = |_view: ViewId, width: i32| Size::new(width.min(4), 2);
		assert_eq!(fixed.measure(ViewId::new(0, 0), 10), Size::new(4, 2));
		assert_eq!(NoContent.measure(ViewId::new(0, 0), 10), Size::ZERO);
	}
}
