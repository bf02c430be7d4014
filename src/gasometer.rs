//! Gas pricing: the configuration value and the per-opcode pre-charge.

use primitive_types::U256;

use crate::environment::Environment;
use crate::error::ExitException;
use crate::machine::Machine;
use crate::opcode::Opcode;
use crate::storage::SstoreKind;
use crate::utils::u256_to_h256;

/// Interpreter configuration: every gas constant plus the structural
/// limits, injected at construction rather than read from process-wide
/// state.
#[derive(Clone, Debug)]
pub struct VmConfig {
	/// Base cost of most ALU, stack, environment and control opcodes.
	pub gas_step: u64,
	/// Cost of `SHA3`.
	pub gas_sha3: u64,
	/// Cost of `SLOAD`.
	pub gas_sload: u64,
	/// Base cost of `SSTORE`; doubled for allocations, waived for
	/// deletions.
	pub gas_sstore: u64,
	/// Cost of `BALANCE`.
	pub gas_balance: u64,
	/// Cost of `CREATE`.
	pub gas_create: u64,
	/// Base cost of `CALL`, on top of the gas offered to the child.
	pub gas_call: u64,
	/// Cost per word of memory growth beyond the high-water mark.
	pub gas_memory: u64,
	/// Maximum stack depth.
	pub stack_limit: usize,
	/// Maximum nested call depth.
	pub max_call_depth: usize,
}

impl Default for VmConfig {
	fn default() -> Self {
		Self {
			gas_step: 1,
			gas_sha3: 20,
			gas_sload: 20,
			gas_sstore: 100,
			gas_balance: 20,
			gas_create: 100,
			gas_call: 20,
			gas_memory: 1,
			stack_limit: 1024,
			max_call_depth: 1024,
		}
	}
}

/// Compute the full cost of the next opcode before any of its effects
/// run. The protocol is charge-then-execute: when the closure's budget
/// does not cover the returned cost, the frame halts out-of-gas and its
/// state changes are discarded.
pub fn gas_cost<E: Environment + ?Sized>(
	opcode: Opcode,
	machine: &Machine,
	env: &E,
	config: &VmConfig,
) -> Result<U256, ExitException> {
	let stack = machine.stack();

	let cost = match opcode {
		// Terminal opcodes carry no charge of their own.
		Opcode::STOP | Opcode::RETURN => U256::zero(),

		Opcode::SHA3 => config.gas_sha3.into(),
		Opcode::SLOAD => config.gas_sload.into(),
		Opcode::BALANCE => config.gas_balance.into(),
		Opcode::CREATE => config.gas_create.into(),

		// The offered child gas is part of the pre-charge; the child's
		// remainder is refunded when it exits successfully.
		Opcode::CALL => U256::from(config.gas_call).saturating_add(stack.peek(1)?),

		Opcode::SSTORE => {
			let key = u256_to_h256(stack.peek(0)?);
			let value = u256_to_h256(stack.peek(1)?);
			let prev = env.storage(machine.closure().address, key);

			let base = U256::from(config.gas_sstore);
			match SstoreKind::classify(prev, value) {
				SstoreKind::Alloc => base.saturating_mul(U256::from(2u64)),
				SstoreKind::Clear => U256::zero(),
				SstoreKind::Update => base,
			}
		}

		// Memory-touching opcodes pay per word of high-water growth.
		Opcode::MLOAD | Opcode::MSTORE => memory_growth_cost(machine, stack.peek(0)?, 32, config),
		Opcode::MSTORE8 => memory_growth_cost(machine, stack.peek(0)?, 1, config),
		Opcode::MSIZE => U256::zero(),

		_ => config.gas_step.into(),
	};

	Ok(cost)
}

fn memory_growth_cost(machine: &Machine, offset: U256, len: u64, config: &VmConfig) -> U256 {
	machine
		.memory()
		.growth_words(offset, U256::from(len))
		.saturating_mul(U256::from(config.gas_memory))
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use primitive_types::{H160, H256};

	use super::*;
	use crate::backend::MemoryEnvironment;
	use crate::closure::Closure;

	fn machine_with_stack(values: &[u64]) -> Machine {
		let closure = Closure::new(
			H160::zero(),
			H160::zero(),
			Rc::new(Vec::new()),
			Vec::new(),
			U256::zero(),
			U256::from(1_000_000),
			U256::zero(),
		);
		let mut machine = Machine::new(closure, &VmConfig::default());
		for v in values {
			machine.stack_mut().push(U256::from(*v)).unwrap();
		}
		machine
	}

	#[test]
	fn sstore_three_way_costs() {
		let config = VmConfig::default();
		let mut env = MemoryEnvironment::default();

		// Fresh slot, non-zero value: allocation.
		let machine = machine_with_stack(&[5, 7]); // value 5, key 7 on top
		let cost = gas_cost(Opcode::SSTORE, &machine, &env, &config).unwrap();
		assert_eq!(cost, U256::from(200));

		// Fresh slot, zero value: the "otherwise" branch.
		let machine = machine_with_stack(&[0, 7]);
		let cost = gas_cost(Opcode::SSTORE, &machine, &env, &config).unwrap();
		assert_eq!(cost, U256::from(100));

		// Occupied slot, zero value: deletion, free.
		env.set_storage(
			H160::zero(),
			H256::from_low_u64_be(7),
			H256::from_low_u64_be(5),
		);
		let machine = machine_with_stack(&[0, 7]);
		let cost = gas_cost(Opcode::SSTORE, &machine, &env, &config).unwrap();
		assert_eq!(cost, U256::zero());

		// Occupied slot, non-zero value: plain update.
		let machine = machine_with_stack(&[9, 7]);
		let cost = gas_cost(Opcode::SSTORE, &machine, &env, &config).unwrap();
		assert_eq!(cost, U256::from(100));
	}

	#[test]
	fn memory_growth_is_charged_per_word() {
		let config = VmConfig::default();
		let env = MemoryEnvironment::default();

		let machine = machine_with_stack(&[0]);
		assert_eq!(
			gas_cost(Opcode::MSTORE, &machine, &env, &config).unwrap(),
			U256::one()
		);
		assert_eq!(
			gas_cost(Opcode::MSTORE8, &machine, &env, &config).unwrap(),
			U256::one()
		);

		let machine = machine_with_stack(&[64]);
		assert_eq!(
			gas_cost(Opcode::MSTORE, &machine, &env, &config).unwrap(),
			U256::from(3)
		);

		let machine = machine_with_stack(&[]);
		assert_eq!(
			gas_cost(Opcode::MSIZE, &machine, &env, &config).unwrap(),
			U256::zero()
		);
	}

	#[test]
	fn call_charges_base_plus_offer() {
		let config = VmConfig::default();
		let env = MemoryEnvironment::default();

		// Stack top-down: addr, gas, value, ...
		let machine = machine_with_stack(&[0, 0, 0, 0, 0, 77, 0]);
		assert_eq!(
			gas_cost(Opcode::CALL, &machine, &env, &config).unwrap(),
			U256::from(97)
		);
	}
}
