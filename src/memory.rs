//! The scratch memory of a closure.

use primitive_types::U256;

/// Byte-addressable, zero-initialized memory private to one frame. The
/// observable length is the highest byte ever touched by a growing
/// operation, rounded up to a word boundary. Growth itself is free here;
/// the gas meter charges it from [Memory::growth_words].
#[derive(Clone, Debug, Default)]
pub struct Memory {
	data: Vec<u8>,
}

impl Memory {
	/// Create an empty memory.
	pub fn new() -> Self {
		Self::default()
	}

	/// Current observable length in bytes, always word-aligned.
	pub fn len(&self) -> usize {
		self.data.len()
	}

	/// Whether any byte has been touched.
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Grow the memory so the given end offset is covered, aligned to the
	/// next word boundary.
	pub fn resize(&mut self, end: usize) {
		if end <= self.data.len() {
			return;
		}
		let mut size = end;
		while size % 32 != 0 {
			size += 1;
		}
		self.data.resize(size, 0);
	}

	/// Read `size` bytes at `offset`, zero-filling past the current
	/// extent. Reading never grows the memory.
	pub fn read(&self, offset: usize, size: usize) -> Vec<u8> {
		let mut ret = vec![0u8; size];
		for (index, byte) in ret.iter_mut().enumerate() {
			let position = offset + index;
			if position >= self.data.len() {
				break;
			}
			*byte = self.data[position];
		}
		ret
	}

	/// Write a byte slice at `offset`, growing as needed.
	pub fn write(&mut self, offset: usize, value: &[u8]) {
		if value.is_empty() {
			return;
		}
		self.resize(offset + value.len());
		self.data[offset..offset + value.len()].copy_from_slice(value);
	}

	/// Write a single byte at `offset`, growing as needed.
	pub fn write_byte(&mut self, offset: usize, value: u8) {
		self.resize(offset + 1);
		self.data[offset] = value;
	}

	/// Number of words the region `[offset, offset + len)` would grow the
	/// memory beyond its high-water mark. Saturates on overflow so the gas
	/// meter prices unrepresentable ranges out of reach.
	pub fn growth_words(&self, offset: U256, len: U256) -> U256 {
		if len.is_zero() {
			return U256::zero();
		}

		let end = match offset.checked_add(len) {
			Some(end) => end,
			None => return U256::MAX,
		};
		let new_words = match end.checked_add(U256::from(31u64)) {
			Some(v) => v / U256::from(32u64),
			None => return U256::MAX,
		};
		let current_words = U256::from(self.data.len() / 32);

		new_words.saturating_sub(current_words)
	}
}
