//! Opcode dispatch.

#[macro_use]
mod macros;
pub mod arithmetic;

use core::ops::{BitAnd, BitOr, BitXor};
use std::rc::Rc;

use log::{debug, trace};
use primitive_types::U256;

use crate::closure::Closure;
use crate::environment::{Environment, Log};
use crate::error::{ExitException, ExitReason, ExitSucceed};
use crate::machine::Machine;
use crate::opcode::Opcode;
use crate::storage::StorageView;
use crate::utils::{address_to_u256, h256_to_u256, keccak256, u256_to_address, u256_to_h256};

/// Control state returned by one dispatch.
pub enum Control {
	/// Advance the program counter by the given amount.
	Continue(usize),
	/// Set the program counter to the target, with no further increment.
	Jump(usize),
	/// Terminate the frame.
	Exit(ExitReason),
	/// Hand a staged sub-call to the driver.
	Invoke(Invoke),
}

/// A sub-call staged by the `CALL` opcode. The offered gas has already
/// been charged to the parent; the driver performs the value transfer
/// before the child runs.
pub struct Invoke {
	/// The child frame, gas budget included.
	pub closure: Closure,
	/// Memory offset the return bytes are written back to.
	pub ret_offset: U256,
	/// Length of the return region.
	pub ret_len: U256,
}

/// Evaluate one opcode against the machine. Gas has already been charged.
pub fn eval<E: Environment + ?Sized>(
	machine: &mut Machine,
	opcode: Opcode,
	position: usize,
	env: &mut E,
) -> Control {
	match opcode {
		Opcode::STOP => Control::Exit(ExitSucceed::Stopped.into()),

		Opcode::ADD => op2_wrapping!(machine, overflowing_add),
		Opcode::MUL => op2_wrapping!(machine, overflowing_mul),
		Opcode::SUB => op2_wrapping!(machine, overflowing_sub),
		Opcode::DIV => op2_fn!(machine, arithmetic::div),
		Opcode::SDIV => op2_fn!(machine, arithmetic::sdiv),
		Opcode::MOD => op2_fn!(machine, arithmetic::rem),
		Opcode::SMOD => op2_fn!(machine, arithmetic::srem),
		Opcode::EXP => op2_fn!(machine, arithmetic::exp),
		Opcode::NEG => op1_fn!(machine, arithmetic::neg),
		Opcode::LT => op2_bool!(machine, lt),
		Opcode::GT => op2_bool!(machine, gt),
		Opcode::EQ => op2_bool!(machine, eq),
		Opcode::NOT => op1_fn!(machine, arithmetic::not),

		Opcode::AND => op2_bit!(machine, bitand),
		Opcode::OR => op2_bit!(machine, bitor),
		Opcode::XOR => op2_bit!(machine, bitxor),
		Opcode::BYTE => op2_fn!(machine, arithmetic::byte),

		Opcode::SHA3 => sha3(machine),

		Opcode::ADDRESS => {
			push!(machine, address_to_u256(machine.closure.address));
			Control::Continue(1)
		}
		Opcode::BALANCE => {
			push!(machine, env.balance(machine.closure.address));
			Control::Continue(1)
		}
		Opcode::ORIGIN => {
			push!(machine, address_to_u256(env.origin()));
			Control::Continue(1)
		}
		Opcode::CALLER => {
			push!(machine, address_to_u256(machine.closure.caller));
			Control::Continue(1)
		}
		Opcode::CALLVALUE => {
			push!(machine, machine.closure.value);
			Control::Continue(1)
		}
		Opcode::CALLDATA => calldata(machine),
		Opcode::CALLDATASIZE => {
			push!(machine, U256::from(machine.closure.input.len()));
			Control::Continue(1)
		}
		Opcode::GASPRICE => {
			push!(machine, machine.closure.gas_price);
			Control::Continue(1)
		}

		Opcode::PREVHASH => {
			push!(machine, h256_to_u256(env.prev_hash()));
			Control::Continue(1)
		}
		Opcode::COINBASE => {
			push!(machine, address_to_u256(env.coinbase()));
			Control::Continue(1)
		}
		Opcode::TIMESTAMP => {
			push!(machine, env.timestamp());
			Control::Continue(1)
		}
		Opcode::NUMBER => {
			push!(machine, env.block_number());
			Control::Continue(1)
		}
		Opcode::DIFFICULTY => {
			push!(machine, env.difficulty());
			Control::Continue(1)
		}
		Opcode::GASLIMIT => {
			push!(machine, env.gas_limit());
			Control::Continue(1)
		}

		Opcode::PUSH => push_immediate(machine, position, 32),
		Opcode::PUSH20 => push_immediate(machine, position, 20),
		Opcode::POP => {
			pop!(machine);
			Control::Continue(1)
		}
		Opcode::DUP => {
			try_or_fail!(machine.stack.dup_top());
			Control::Continue(1)
		}
		Opcode::SWAP => {
			try_or_fail!(machine.stack.swap_top2());
			Control::Continue(1)
		}

		Opcode::MLOAD => mload(machine),
		Opcode::MSTORE => mstore(machine),
		Opcode::MSTORE8 => mstore8(machine),

		Opcode::SLOAD => {
			let key = pop!(machine);
			let value = StorageView::new(env, machine.closure.address).get(u256_to_h256(key));
			push!(machine, h256_to_u256(value));
			Control::Continue(1)
		}
		Opcode::SSTORE => {
			let (key, value) = pop2!(machine);
			StorageView::new(env, machine.closure.address)
				.put(u256_to_h256(key), u256_to_h256(value));
			Control::Continue(1)
		}

		Opcode::JUMP => {
			let target = pop!(machine);
			Control::Jump(jump_target(machine, target))
		}
		Opcode::JUMPI => {
			// Condition on top, target beneath; both come off the stack
			// whether or not the branch is taken.
			let (condition, target) = pop2!(machine);
			if condition.is_zero() {
				Control::Continue(1)
			} else {
				Control::Jump(jump_target(machine, target))
			}
		}
		Opcode::PC => {
			push!(machine, U256::from(position));
			Control::Continue(1)
		}
		Opcode::MSIZE => {
			push!(machine, U256::from(machine.memory.len()));
			Control::Continue(1)
		}

		Opcode::CALL => call(machine, env),
		Opcode::RETURN => ret(machine),

		Opcode::LOG => log_stack(machine, env),

		// Reserved; falls through to the next instruction.
		Opcode::SUICIDE => Control::Continue(1),

		_ => {
			debug!(target: "vm", "invalid opcode 0x{:02x}", opcode.0);
			Control::Exit(ExitException::InvalidOpcode(opcode).into())
		}
	}
}

// Jump targets are taken as-is; immediate regions are not marked off.
// Anything beyond the code clamps to its end, which is an implicit STOP.
fn jump_target(machine: &Machine, target: U256) -> usize {
	let code_len = machine.closure.code().len();
	if target > U256::from(usize::MAX) {
		code_len
	} else {
		target.as_usize().min(code_len)
	}
}

fn push_immediate(machine: &mut Machine, position: usize, len: usize) -> Control {
	let bytes = machine.closure.code_slice(position + 1, len);
	push!(machine, U256::from_big_endian(&bytes));
	Control::Continue(1 + len)
}

fn sha3(machine: &mut Machine) -> Control {
	let (offset, size) = pop2!(machine);

	let size = as_usize_or_fail!(size);
	let data = if size == 0 {
		Vec::new()
	} else {
		let offset = as_usize_or_fail!(offset);
		machine.memory.read(offset, size)
	};

	push!(machine, h256_to_u256(keccak256(&data)));
	Control::Continue(1)
}

fn calldata(machine: &mut Machine) -> Control {
	let offset = pop!(machine);
	let offset = as_usize_or_fail!(offset);
	checked_end!(offset, machine.closure.input.len());

	machine.memory.write(offset, &machine.closure.input);
	Control::Continue(1)
}

fn mload(machine: &mut Machine) -> Control {
	let offset = pop!(machine);
	let offset = as_usize_or_fail!(offset);
	let end = checked_end!(offset, 32);

	machine.memory.resize(end);
	push!(
		machine,
		U256::from_big_endian(&machine.memory.read(offset, 32))
	);
	Control::Continue(1)
}

fn mstore(machine: &mut Machine) -> Control {
	let (offset, value) = pop2!(machine);
	let offset = as_usize_or_fail!(offset);
	checked_end!(offset, 32);

	let mut bytes = [0u8; 32];
	value.to_big_endian(&mut bytes);
	machine.memory.write(offset, &bytes);
	Control::Continue(1)
}

fn mstore8(machine: &mut Machine) -> Control {
	let (offset, value) = pop2!(machine);
	let offset = as_usize_or_fail!(offset);
	checked_end!(offset, 1);

	machine.memory.write_byte(offset, value.byte(0));
	Control::Continue(1)
}

fn call<E: Environment + ?Sized>(machine: &mut Machine, env: &mut E) -> Control {
	let address = pop!(machine);
	let gas = pop!(machine);
	let value = pop!(machine);
	let in_size = pop!(machine);
	let in_offset = pop!(machine);
	let ret_size = pop!(machine);
	let ret_offset = pop!(machine);

	let in_size = as_usize_or_fail!(in_size);
	let input = if in_size == 0 {
		Vec::new()
	} else {
		let in_offset = as_usize_or_fail!(in_offset);
		machine.memory.read(in_offset, in_size)
	};

	let address = u256_to_address(address);
	let closure = Closure::new(
		machine.closure.address,
		address,
		Rc::new(env.code(address)),
		input,
		value,
		gas,
		machine.closure.gas_price,
	);

	Control::Invoke(Invoke {
		closure,
		ret_offset,
		ret_len: ret_size,
	})
}

fn ret(machine: &mut Machine) -> Control {
	let (offset, size) = pop2!(machine);

	let size = as_usize_or_fail!(size);
	machine.retval = if size == 0 {
		Vec::new()
	} else {
		let offset = as_usize_or_fail!(offset);
		machine.memory.read(offset, size)
	};

	Control::Exit(ExitSucceed::Returned.into())
}

// The diagnostic trace opcode: journal a snapshot of the stack, top
// first, and mirror it on the logger.
fn log_stack<E: Environment + ?Sized>(machine: &mut Machine, env: &mut E) -> Control {
	let stack = &machine.stack;
	let mut data = Vec::with_capacity(stack.len() * 32);
	for index in 0..stack.len() {
		let word = match stack.peek(index) {
			Ok(word) => word,
			Err(e) => return Control::Exit(e.into()),
		};
		let mut bytes = [0u8; 32];
		word.to_big_endian(&mut bytes);
		data.extend_from_slice(&bytes);
	}

	trace!(
		target: "vm",
		"LOG address={:?} stack_depth={} memory={}b",
		machine.closure.address,
		stack.len(),
		machine.memory.len()
	);
	env.add_log(Log {
		address: machine.closure.address,
		data,
	});

	Control::Continue(1)
}
