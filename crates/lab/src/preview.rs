//! ASCII previews of a frame report.

use trellis_layout::Rect;

use crate::report::FrameReport;

struct Canvas {
	width: usize,
	cells: Vec<Vec<char>>,
}

impl Canvas {
	fn new(width: i32, height: i32) -> Self {
		let width = usize::try_from(width).unwrap_or(0);
		let height = usize::try_from(height).unwrap_or(0);
		Self {
			width,
			cells: vec![vec![' '; width]; height],
		}
	}

	fn set(&mut self, x: i32, y: i32, ch: char) {
		let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
			return;
		};
		if x < self.width
			&& let Some(row) = self.cells.get_mut(y)
		{
			row[x] = ch;
		}
	}

	fn text(&mut self, x: i32, y: i32, text: &str, limit: i32) {
		for (i, ch) in text.chars().take(usize::try_from(limit).unwrap_or(0)).enumerate() {
			self.set(x + i as i32, y, ch);
		}
	}

	fn draw(&mut self, rect: Rect, name: &str) {
		if rect.is_empty() {
			return;
		}
		if rect.width == 1 || rect.height == 1 {
			let fill = name.chars().next().unwrap_or('#');
			for y in rect.top()..rect.bottom() {
				for x in rect.left()..rect.right() {
					self.set(x, y, if rect.height == 1 { '=' } else { fill });
				}
			}
			if rect.height == 1 {
				self.text(rect.x, rect.y, name, rect.width);
			}
			return;
		}

		let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
		for x in rect.left()..=right {
			let edge = if x == rect.left() || x == right { '+' } else { '-' };
			self.set(x, rect.top(), edge);
			self.set(x, bottom, edge);
		}
		for y in rect.top() + 1..bottom {
			self.set(rect.left(), y, '|');
			self.set(right, y, '|');
			for x in rect.left() + 1..right {
				self.set(x, y, ' ');
			}
		}
		self.text(rect.x + 1, rect.y, name, rect.width - 2);
	}

	fn render(self) -> String {
		let mut out = String::new();
		for row in self.cells {
			let line: String = row.into_iter().collect();
			out.push_str(line.trim_end());
			out.push('\n');
		}
		out
	}
}

/// Draws every view of `report` as a box on a canvas the size of the available area.
///
/// Views are drawn in report order, so children paint over their parents. Boxes are
/// clipped to the canvas. One-row views are drawn as `name===`.
pub fn render(report: &FrameReport) -> String {
	let mut canvas = Canvas::new(report.available.width, report.available.height);
	for view in &report.views {
		canvas.draw(view.screen, &view.name);
	}
	canvas.render()
}
