//! Per-account storage view.

use primitive_types::{H160, H256};

use crate::environment::Environment;

/// Classification of an `SSTORE` write, decided by whether the previous
/// slot value and the incoming value are zero. The gas meter prices each
/// kind differently.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SstoreKind {
	/// Zero slot receives a non-zero value: a new allocation.
	Alloc,
	/// Non-zero slot receives zero: a deletion.
	Clear,
	/// Anything else, including rewriting zero with zero.
	Update,
}

impl SstoreKind {
	/// Classify a write of `value` over the existing `prev`.
	pub fn classify(prev: H256, value: H256) -> Self {
		if prev.is_zero() && !value.is_zero() {
			SstoreKind::Alloc
		} else if !prev.is_zero() && value.is_zero() {
			SstoreKind::Clear
		} else {
			SstoreKind::Update
		}
	}
}

/// Thin wrapper over the host's per-account store, scoped to one contract
/// account. Writes land on the environment's current journal and are
/// discarded with it if the frame fails.
pub struct StorageView<'a, E: Environment + ?Sized> {
	env: &'a mut E,
	address: H160,
}

impl<'a, E: Environment + ?Sized> StorageView<'a, E> {
	/// Create a view over `address`'s storage.
	pub fn new(env: &'a mut E, address: H160) -> Self {
		Self { env, address }
	}

	/// Read a slot, zero when unset.
	pub fn get(&self, key: H256) -> H256 {
		self.env.storage(self.address, key)
	}

	/// Write a slot and report the classification of the write.
	pub fn put(&mut self, key: H256, value: H256) -> SstoreKind {
		let kind = SstoreKind::classify(self.get(key), value);
		self.env.set_storage(self.address, key, value);
		kind
	}
}
