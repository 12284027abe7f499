use core::fmt;

/// A generational view identifier.
///
/// Unlike a raw index, `ViewId` carries the generation of the arena slot it was issued
/// from. Removing a view bumps the slot's generation, so an id held by an expression or a
/// hook after its view was removed no longer resolves and cannot alias a newer view that
/// reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId {
	/// The slot index in the view arena.
	pub(crate) idx: u32,
	/// Generation counter for detecting stale references.
	pub(crate) generation: u32,
}

impl ViewId {
	pub(crate) const fn new(idx: u32, generation: u32) -> Self {
		Self { idx, generation }
	}

	/// Returns the arena slot index.
	pub const fn index(self) -> usize {
		self.idx as usize
	}
}

impl fmt::Display for ViewId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "view#{}.{}", self.idx, self.generation)
	}
}
