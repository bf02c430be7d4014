//! In-memory host environment, used by the test suite and as the
//! reference implementation of the journal protocol.

use std::collections::BTreeMap;

use primitive_types::{H160, H256, U256};

use crate::environment::{Environment, Log};
use crate::error::ExitException;

/// Block-level context of a memory environment.
#[derive(Clone, Debug, Default)]
pub struct Vicinity {
	/// Transaction origin.
	pub origin: H160,
	/// Gas price of the transaction.
	pub gas_price: U256,
	/// Hash of the previous block.
	pub prev_hash: H256,
	/// Beneficiary of the current block.
	pub coinbase: H160,
	/// Timestamp of the current block.
	pub timestamp: U256,
	/// Number of the current block.
	pub number: U256,
	/// Difficulty of the current block.
	pub difficulty: U256,
	/// Gas limit of the current block.
	pub gas_limit: U256,
	/// Hashes of recent blocks, most recent first.
	pub block_hashes: Vec<H256>,
}

/// Account state of a memory environment.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Account {
	/// Account balance in wei.
	pub balance: U256,
	/// Contract code, empty for externally-owned accounts.
	pub code: Vec<u8>,
	/// Full account storage. Zero-valued slots are never stored.
	pub storage: BTreeMap<H256, H256>,
}

// One frame's journal: writes staged here shadow the committed state and
// everything below on the substate stack.
#[derive(Clone, Debug, Default)]
struct Substate {
	storage: BTreeMap<(H160, H256), H256>,
	balances: BTreeMap<H160, U256>,
	codes: BTreeMap<H160, Vec<u8>>,
	logs: Vec<Log>,
}

/// Memory environment, storing all state in `BTreeMap`s. Mutations made
/// while a journal is open land on the journal; committing the outermost
/// journal folds them into the state map, deleting zero-valued slots.
#[derive(Clone, Debug, Default)]
pub struct MemoryEnvironment {
	vicinity: Vicinity,
	state: BTreeMap<H160, Account>,
	logs: Vec<Log>,
	substates: Vec<Substate>,
	depth: usize,
}

impl MemoryEnvironment {
	/// Create a new memory environment.
	pub fn new(vicinity: Vicinity, state: BTreeMap<H160, Account>) -> Self {
		Self {
			vicinity,
			state,
			logs: Vec::new(),
			substates: Vec::new(),
			depth: 0,
		}
	}

	/// The committed account state.
	pub fn state(&self) -> &BTreeMap<H160, Account> {
		&self.state
	}

	/// Committed log entries, in emission order.
	pub fn logs(&self) -> &[Log] {
		&self.logs
	}

	fn set_balance(&mut self, address: H160, balance: U256) {
		match self.substates.last_mut() {
			Some(sub) => {
				sub.balances.insert(address, balance);
			}
			None => {
				self.state.entry(address).or_default().balance = balance;
			}
		}
	}
}

impl Environment for MemoryEnvironment {
	fn origin(&self) -> H160 {
		self.vicinity.origin
	}

	fn block_number(&self) -> U256 {
		self.vicinity.number
	}

	fn prev_hash(&self) -> H256 {
		self.vicinity.prev_hash
	}

	fn coinbase(&self) -> H160 {
		self.vicinity.coinbase
	}

	fn timestamp(&self) -> U256 {
		self.vicinity.timestamp
	}

	fn difficulty(&self) -> U256 {
		self.vicinity.difficulty
	}

	fn gas_limit(&self) -> U256 {
		self.vicinity.gas_limit
	}

	fn block_hash(&self, number: U256) -> H256 {
		if number >= self.vicinity.number
			|| self.vicinity.number - number - U256::one()
				>= U256::from(self.vicinity.block_hashes.len())
		{
			H256::zero()
		} else {
			let index = (self.vicinity.number - number - U256::one()).as_usize();
			self.vicinity.block_hashes[index]
		}
	}

	fn balance(&self, address: H160) -> U256 {
		for sub in self.substates.iter().rev() {
			if let Some(balance) = sub.balances.get(&address) {
				return *balance;
			}
		}
		self.state
			.get(&address)
			.map(|a| a.balance)
			.unwrap_or_default()
	}

	fn code(&self, address: H160) -> Vec<u8> {
		for sub in self.substates.iter().rev() {
			if let Some(code) = sub.codes.get(&address) {
				return code.clone();
			}
		}
		self.state
			.get(&address)
			.map(|a| a.code.clone())
			.unwrap_or_default()
	}

	fn storage(&self, address: H160, key: H256) -> H256 {
		for sub in self.substates.iter().rev() {
			if let Some(value) = sub.storage.get(&(address, key)) {
				return *value;
			}
		}
		self.state
			.get(&address)
			.and_then(|a| a.storage.get(&key).copied())
			.unwrap_or_default()
	}

	fn set_storage(&mut self, address: H160, key: H256, value: H256) {
		match self.substates.last_mut() {
			Some(sub) => {
				sub.storage.insert((address, key), value);
			}
			None => {
				let account = self.state.entry(address).or_default();
				if value.is_zero() {
					account.storage.remove(&key);
				} else {
					account.storage.insert(key, value);
				}
			}
		}
	}

	fn set_code(&mut self, address: H160, code: Vec<u8>) {
		match self.substates.last_mut() {
			Some(sub) => {
				sub.codes.insert(address, code);
			}
			None => {
				self.state.entry(address).or_default().code = code;
			}
		}
	}

	fn transfer(&mut self, from: H160, to: H160, value: U256) -> Result<(), ExitException> {
		let from_balance = self.balance(from);
		if from_balance < value {
			return Err(ExitException::OutOfFund);
		}
		if from == to || value.is_zero() {
			return Ok(());
		}

		let to_balance = self.balance(to);
		self.set_balance(from, from_balance - value);
		self.set_balance(to, to_balance.saturating_add(value));
		Ok(())
	}

	fn add_log(&mut self, log: Log) {
		match self.substates.last_mut() {
			Some(sub) => sub.logs.push(log),
			None => self.logs.push(log),
		}
	}

	fn depth(&self) -> usize {
		self.depth
	}

	fn set_depth(&mut self, depth: usize) {
		self.depth = depth;
	}

	fn enter(&mut self) {
		self.substates.push(Substate::default());
	}

	fn exit_commit(&mut self) {
		let sub = match self.substates.pop() {
			Some(sub) => sub,
			None => return,
		};

		match self.substates.last_mut() {
			Some(parent) => {
				parent.storage.extend(sub.storage);
				parent.balances.extend(sub.balances);
				parent.codes.extend(sub.codes);
				parent.logs.extend(sub.logs);
			}
			None => {
				for ((address, key), value) in sub.storage {
					let account = self.state.entry(address).or_default();
					if value.is_zero() {
						account.storage.remove(&key);
					} else {
						account.storage.insert(key, value);
					}
				}
				for (address, balance) in sub.balances {
					self.state.entry(address).or_default().balance = balance;
				}
				for (address, code) in sub.codes {
					self.state.entry(address).or_default().code = code;
				}
				self.logs.extend(sub.logs);
			}
		}
	}

	fn exit_revert(&mut self) {
		self.substates.pop();
	}
}
