//! The host-provided capability surface.

use primitive_types::{H160, H256, U256};

use crate::error::ExitException;

/// A journaled log entry. Entries persist only if the emitting frame and
/// all of its ancestors succeed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Log {
	/// Account the entry was emitted under.
	pub address: H160,
	/// Opaque payload.
	pub data: Vec<u8>,
}

/// Host surface the interpreter runs against: block context, account
/// state, value transfer, the log journal and frame bookkeeping.
///
/// State mutations between [Environment::enter] and a matching
/// [Environment::exit_commit] / [Environment::exit_revert] are staged on a
/// journal; reads observe staged writes. The interpreter drives the
/// journal around every frame, so a failing closure leaves no trace.
pub trait Environment {
	/// Externally-owned account that initiated the transaction chain.
	fn origin(&self) -> H160;
	/// Current block number.
	fn block_number(&self) -> U256;
	/// Hash of the previous block.
	fn prev_hash(&self) -> H256;
	/// Beneficiary of the current block.
	fn coinbase(&self) -> H160;
	/// Timestamp of the current block.
	fn timestamp(&self) -> U256;
	/// Difficulty of the current block.
	fn difficulty(&self) -> U256;
	/// Gas limit of the current block, zero if the host supplies none.
	fn gas_limit(&self) -> U256;
	/// Hash of a historical block, zero when unknown.
	fn block_hash(&self, number: U256) -> H256;

	/// Balance of an account.
	fn balance(&self, address: H160) -> U256;
	/// Code of an account, empty for non-contracts.
	fn code(&self, address: H160) -> Vec<u8>;
	/// Storage slot of an account, zero when unset.
	fn storage(&self, address: H160, key: H256) -> H256;
	/// Write a storage slot; writing zero deletes the slot on commit.
	fn set_storage(&mut self, address: H160, key: H256, value: H256);
	/// Install code at an account.
	fn set_code(&mut self, address: H160, code: Vec<u8>);

	/// Move `value` wei between accounts. Atomic: fails with `OutOfFund`
	/// and no effect when the source balance is insufficient.
	fn transfer(&mut self, from: H160, to: H160, value: U256) -> Result<(), ExitException>;

	/// Append a log entry to the current journal.
	fn add_log(&mut self, log: Log);

	/// Current call depth.
	fn depth(&self) -> usize;
	/// Set the call depth.
	fn set_depth(&mut self, depth: usize);

	/// Open a substate journal for a new frame.
	fn enter(&mut self);
	/// Merge the newest journal into its parent (or the committed state).
	fn exit_commit(&mut self);
	/// Discard the newest journal.
	fn exit_revert(&mut self);
}
