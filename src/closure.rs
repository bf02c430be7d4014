//! The call frame abstraction.

use std::rc::Rc;

use primitive_types::{H160, U256};

/// A single invocation context of a contract: code, caller, callee, value,
/// gas budget and argument buffer. By the time a closure starts executing,
/// the value transfer from caller to callee has already happened; a
/// failing closure reverts it along with every state change it staged.
#[derive(Clone, Debug)]
pub struct Closure {
	/// Address of the frame that invoked this one.
	pub caller: H160,
	/// Address of the contract account being executed; storage and code
	/// owner.
	pub address: H160,
	/// Code under interpretation.
	code: Rc<Vec<u8>>,
	/// Call data supplied by the caller.
	pub input: Vec<u8>,
	/// Wei transferred from caller to callee on entry.
	pub value: U256,
	/// Remaining gas budget, only ever decreased during execution.
	pub gas: U256,
	/// Price per gas unit, inherited from the transaction.
	pub gas_price: U256,
}

impl Closure {
	/// Create a new closure.
	pub fn new(
		caller: H160,
		address: H160,
		code: Rc<Vec<u8>>,
		input: Vec<u8>,
		value: U256,
		gas: U256,
		gas_price: U256,
	) -> Self {
		Self {
			caller,
			address,
			code,
			input,
			value,
			gas,
			gas_price,
		}
	}

	/// The code under interpretation.
	pub fn code(&self) -> &[u8] {
		&self.code
	}

	/// Byte of code at `pc`; zero past the end, so running off the code is
	/// an implicit `STOP`.
	pub fn code_at(&self, pc: usize) -> u8 {
		self.code.get(pc).copied().unwrap_or(0)
	}

	/// `len` bytes of code starting at `pc`, zero-filled past the end.
	/// Used for push immediates.
	pub fn code_slice(&self, pc: usize, len: usize) -> Vec<u8> {
		let mut ret = vec![0u8; len];
		for (index, byte) in ret.iter_mut().enumerate() {
			if let Some(v) = self.code.get(pc + index) {
				*byte = *v;
			}
		}
		ret
	}

	/// Charge `amount` gas. Returns false, leaving the budget untouched,
	/// when the budget does not cover it.
	pub fn use_gas(&mut self, amount: U256) -> bool {
		if self.gas < amount {
			return false;
		}
		self.gas -= amount;
		true
	}

	/// Return unused gas, e.g. a sub-call's remainder.
	pub fn refund_gas(&mut self, amount: U256) {
		self.gas = self.gas.saturating_add(amount);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn closure_with_code(code: Vec<u8>) -> Closure {
		Closure::new(
			H160::zero(),
			H160::zero(),
			Rc::new(code),
			Vec::new(),
			U256::zero(),
			U256::from(100),
			U256::zero(),
		)
	}

	#[test]
	fn code_reads_zero_fill() {
		let closure = closure_with_code(vec![0x50, 0xaa, 0xbb]);
		assert_eq!(closure.code_at(1), 0xaa);
		assert_eq!(closure.code_at(3), 0);
		assert_eq!(closure.code_slice(2, 4), vec![0xbb, 0, 0, 0]);
	}

	#[test]
	fn gas_charges_and_refunds() {
		let mut closure = closure_with_code(Vec::new());
		assert!(closure.use_gas(U256::from(60)));
		assert_eq!(closure.gas, U256::from(40));
		assert!(!closure.use_gas(U256::from(41)));
		assert_eq!(closure.gas, U256::from(40));
		closure.refund_gas(U256::from(5));
		assert_eq!(closure.gas, U256::from(45));
	}
}
