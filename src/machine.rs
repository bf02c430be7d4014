//! Per-frame interpreter state and the dispatch cycle.

use log::debug;
use primitive_types::U256;

use crate::closure::Closure;
use crate::environment::Environment;
use crate::error::{ExitException, ExitReason};
use crate::eval::{self, Control, Invoke};
use crate::gasometer::{self, VmConfig};
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::stack::Stack;
use crate::tracing::Tracer;

/// Status of one machine.
pub enum MachineStatus {
	/// The machine can execute further instructions.
	Running,
	/// The machine terminated; the reason carries the outcome the parent
	/// (or the host) observes.
	Exited(ExitReason),
	/// The machine staged a sub-call and waits for the driver to run it.
	InvokeCall(Invoke),
}

/// One closure under interpretation: the frame plus its stack, memory,
/// program counter and step counter.
pub struct Machine {
	pub(crate) closure: Closure,
	pub(crate) stack: Stack,
	pub(crate) memory: Memory,
	pub(crate) retval: Vec<u8>,
	position: usize,
	steps: usize,
	status: MachineStatus,
}

impl Machine {
	/// Create a machine over the given closure.
	pub fn new(closure: Closure, config: &VmConfig) -> Self {
		Self {
			closure,
			stack: Stack::new(config.stack_limit),
			memory: Memory::new(),
			retval: Vec::new(),
			position: 0,
			steps: 0,
			status: MachineStatus::Running,
		}
	}

	/// The frame being executed.
	pub fn closure(&self) -> &Closure {
		&self.closure
	}

	/// Reference of the machine stack.
	pub fn stack(&self) -> &Stack {
		&self.stack
	}

	/// Mutable reference of the machine stack.
	pub fn stack_mut(&mut self) -> &mut Stack {
		&mut self.stack
	}

	/// Reference of the machine memory.
	pub fn memory(&self) -> &Memory {
		&self.memory
	}

	/// Current program counter.
	pub fn position(&self) -> usize {
		self.position
	}

	/// Machine status.
	pub fn status(&self) -> &MachineStatus {
		&self.status
	}

	/// Bytes produced by `RETURN`, empty otherwise.
	pub fn retval(&self) -> &[u8] {
		&self.retval
	}

	/// Execute one instruction: fetch, pre-charge gas, dispatch, then
	/// notify the tracer. Does nothing unless the machine is running.
	pub fn step<E, T>(&mut self, env: &mut E, config: &VmConfig, tracer: &mut T)
	where
		E: Environment + ?Sized,
		T: Tracer + ?Sized,
	{
		if !matches!(self.status, MachineStatus::Running) {
			return;
		}

		let position = self.position;
		let opcode = Opcode(self.closure.code_at(position));

		// Charge-then-execute: the full cost is known before any effect.
		let cost = match gasometer::gas_cost(opcode, self, env, config) {
			Ok(cost) => cost,
			Err(e) => {
				self.fail(e);
				return;
			}
		};
		if !self.closure.use_gas(cost) {
			debug!(
				target: "vm",
				"out of gas at pc {}: have {}, need {}",
				position, self.closure.gas, cost
			);
			self.fail(ExitException::OutOfGas);
			return;
		}

		match eval::eval(self, opcode, position, env) {
			Control::Continue(n) => self.position = position + n,
			Control::Jump(target) => self.position = target,
			Control::Exit(ExitReason::Succeed(s)) => {
				self.status = MachineStatus::Exited(s.into());
			}
			Control::Exit(ExitReason::Error(e)) => {
				self.fail(e);
				return;
			}
			Control::Invoke(invoke) => {
				self.position = position + 1;
				self.status = MachineStatus::InvokeCall(invoke);
			}
		}

		// Terminal instructions are not reported; a failed frame reports
		// nothing for the faulting instruction either.
		if !matches!(self.status, MachineStatus::Exited(_)) {
			self.steps += 1;
			tracer.on_step(self.steps, opcode, &self.memory, &self.stack);
		}
	}

	/// Take a staged sub-call, leaving the machine running at the
	/// instruction after the `CALL`.
	pub(crate) fn take_invoke(&mut self) -> Option<Invoke> {
		match core::mem::replace(&mut self.status, MachineStatus::Running) {
			MachineStatus::InvokeCall(invoke) => Some(invoke),
			other => {
				self.status = other;
				None
			}
		}
	}

	// A fault discards the frame and forfeits its remaining gas.
	fn fail(&mut self, e: ExitException) {
		self.closure.gas = U256::zero();
		self.status = MachineStatus::Exited(e.into());
	}
}
