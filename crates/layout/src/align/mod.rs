//! Alignment groups.
//!
//! Siblings whose position along an axis is [`Pos::Align`](crate::Pos::Align) with the same
//! [`GroupId`](crate::GroupId) are placed together by a single call to [`align`]. The
//! function is pure: it sees only the members' extents along the axis, the parent's
//! content span, and the group's mode and flags.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How an alignment group distributes its members along the parent's span.
#[derive(
	Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentMode {
	/// Pack members against the near edge.
	#[default]
	Start,
	/// Pack members against the far edge.
	End,
	/// Pack members and centre the run in the span.
	Center,
	/// Grow members so the run covers the span exactly.
	Fill,
	/// Pin the first member to the near edge, pack the rest against the far edge.
	FirstChildRestOpposite,
	/// Pin the last member to the far edge, pack the rest against the near edge.
	LastChildRestOpposite,
}

bitflags! {
	/// Modifiers for an alignment group.
	#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct AlignmentFlags: u8 {
		/// Leave one cell between adjacent members.
		const ADD_SPACE_BETWEEN_ITEMS = 1 << 0;
		/// Pin the first and/or last member to the edges and leave them out of the run.
		///
		/// `Start` pins the last member to the far edge, `End` pins the first member to
		/// the near edge, and `Center` pins both and centres the interior members in the
		/// span between them. Other modes ignore the flag.
		const IGNORE_FIRST_OR_LAST = 1 << 1;
	}
}

impl AlignmentFlags {
	/// Cells inserted between adjacent members.
	pub fn gap(self) -> i32 {
		i32::from(self.contains(Self::ADD_SPACE_BETWEEN_ITEMS))
	}
}

/// Where [`align`] put one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
	/// Offset from the near edge of the span.
	pub offset: i32,
	/// Extent along the axis. Differs from the requested extent only in
	/// [`AlignmentMode::Fill`].
	pub size: i32,
}

impl Placement {
	const fn new(offset: i32, size: i32) -> Self {
		Self { offset, size }
	}
}

/// Places an ordered group of members along a span.
///
/// `sizes` are the members' extents along the axis in sibling order; negative extents are
/// treated as 0. The result has one [`Placement`] per member, in the same order.
///
/// When the members (plus gaps) fit in `span`, no two placements overlap and all lie in
/// `[0, span)`. When they do not fit, `Center` and `End` fall back to a run starting at 0
/// and the pinned modes may overlap their pinned member; nothing is reported, the result
/// is just deterministic.
///
/// # Examples
///
/// ```
/// use trellis_layout::{AlignmentFlags, AlignmentMode, align};
///
/// let offsets: Vec<i32> = align(&[3, 4, 5], 20, AlignmentMode::End, AlignmentFlags::empty())
/// 	.iter()
/// 	.map(|p| p.offset)
/// 	.collect();
/// assert_eq!(offsets, [8, 11, 15]);
/// ```
pub fn align(
	sizes: &[i32],
	span: i32,
	mode: AlignmentMode,
	flags: AlignmentFlags,
) -> Vec<Placement> {
	let sizes: Vec<i32> = sizes.iter().map(|&size| size.max(0)).collect();
	let count = sizes.len();
	if count == 0 {
		return Vec::new();
	}

	let gap = flags.gap();
	let ignore = flags.contains(AlignmentFlags::IGNORE_FIRST_OR_LAST) && count > 1;
	let last = count - 1;

	match mode {
		AlignmentMode::Start if ignore => pin_last(&sizes, span, gap),
		AlignmentMode::Start => run(&sizes, 0, gap),
		AlignmentMode::End if ignore => pin_first(&sizes, span, gap),
		AlignmentMode::End => pack_end(&sizes, 0, span, gap),
		AlignmentMode::Center if ignore => {
			let interior = &sizes[1..last];
			let mut out = Vec::with_capacity(count);
			out.push(Placement::new(0, sizes[0]));
			let far = span.saturating_sub(sizes[last]);
			out.extend(pack_center(interior, sizes[0], far, gap));
			out.push(Placement::new(far, sizes[last]));
			out
		}
		AlignmentMode::Center => pack_center(&sizes, 0, span, gap),
		AlignmentMode::Fill => fill(&sizes, span, gap),
		AlignmentMode::FirstChildRestOpposite => pin_first(&sizes, span, gap),
		AlignmentMode::LastChildRestOpposite => pin_last(&sizes, span, gap),
	}
}

/// Extent of a packed run including gaps.
fn run_length(sizes: &[i32], gap: i32) -> i32 {
	let joints = i32::try_from(sizes.len().saturating_sub(1)).unwrap_or(i32::MAX);
	let gaps = gap.saturating_mul(joints);
	sizes
		.iter()
		.fold(gaps, |total, &size| total.saturating_add(size))
}

fn run(sizes: &[i32], start: i32, gap: i32) -> Vec<Placement> {
	let mut offset = start;
	sizes
		.iter()
		.map(|&size| {
			let placed = Placement::new(offset, size);
			offset = offset.saturating_add(size).saturating_add(gap);
			placed
		})
		.collect()
}

fn pack_end(sizes: &[i32], lo: i32, hi: i32, gap: i32) -> Vec<Placement> {
	let start = hi.saturating_sub(run_length(sizes, gap)).max(lo);
	run(sizes, start, gap)
}

fn pack_center(sizes: &[i32], lo: i32, hi: i32, gap: i32) -> Vec<Placement> {
	let slack = hi
		.saturating_sub(lo)
		.saturating_sub(run_length(sizes, gap))
		.max(0);
	run(sizes, lo.saturating_add(slack.div_euclid(2)), gap)
}

fn pin_first(sizes: &[i32], span: i32, gap: i32) -> Vec<Placement> {
	let mut out = Vec::with_capacity(sizes.len());
	out.push(Placement::new(0, sizes[0]));
	out.extend(pack_end(&sizes[1..], 0, span, gap));
	out
}

fn pin_last(sizes: &[i32], span: i32, gap: i32) -> Vec<Placement> {
	let last = sizes.len() - 1;
	let mut out = run(&sizes[..last], 0, gap);
	out.push(Placement::new(span.saturating_sub(sizes[last]), sizes[last]));
	out
}

/// Grows members so the run covers `span` exactly.
///
/// Zero-sized members are "auto" and share the slack; when every member has a size the
/// slack is shared by all of them. The remainder of the division goes to the last receiver.
fn fill(sizes: &[i32], span: i32, gap: i32) -> Vec<Placement> {
	let slack = span.saturating_sub(run_length(sizes, gap));
	let mut resolved = sizes.to_vec();
	if slack > 0 {
		let autos: Vec<usize> = (0..sizes.len()).filter(|&i| sizes[i] == 0).collect();
		let receivers = if autos.is_empty() {
			(0..sizes.len()).collect()
		} else {
			autos
		};
		let share = slack / receivers.len() as i32;
		let remainder = slack % receivers.len() as i32;
		for &i in &receivers {
			resolved[i] = resolved[i].saturating_add(share);
		}
		if let Some(&last) = receivers.last() {
			resolved[last] = resolved[last].saturating_add(remainder);
		}
	}
	run(&resolved, 0, gap)
}
