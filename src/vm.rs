//! The call-stack driver and the host-facing execution entry points.

use std::rc::Rc;

use log::debug;
use primitive_types::{H160, U256};

use crate::closure::Closure;
use crate::environment::Environment;
use crate::error::{ExitException, ExitReason};
use crate::eval::Invoke;
use crate::gasometer::VmConfig;
use crate::machine::{Machine, MachineStatus};
use crate::tracing::Tracer;

/// Status of the whole execution.
#[derive(Clone, Copy, Debug)]
pub enum VmStatus {
	/// Some frame still has work to do.
	Running,
	/// The root frame terminated.
	Exited(ExitReason),
}

struct PendingCall {
	ret_offset: U256,
	ret_len: U256,
}

/// Drives a transaction's frames on an explicit machine stack: nested
/// calls push a fresh [Machine] instead of recursing through the host,
/// which bounds depth cheaply and keeps state snapshotting in one place.
pub struct Vm<'config> {
	config: &'config VmConfig,
	machines: Vec<Machine>,
	pending: Vec<PendingCall>,
}

impl<'config> Vm<'config> {
	/// Create a driver over the transaction's root closure.
	pub fn new(config: &'config VmConfig, closure: Closure) -> Self {
		Self {
			config,
			machines: vec![Machine::new(closure, config)],
			pending: Vec::new(),
		}
	}

	/// Status of the execution as a whole.
	pub fn status(&self) -> VmStatus {
		if self.machines.len() == 1 {
			if let MachineStatus::Exited(reason) = self.machines[0].status() {
				return VmStatus::Exited(*reason);
			}
		}
		VmStatus::Running
	}

	/// Return bytes of the root frame.
	pub fn output(&self) -> &[u8] {
		self.machines[0].retval()
	}

	/// Remaining gas of the root frame; zero after any fault.
	pub fn gas_remaining(&self) -> U256 {
		self.machines[0].closure().gas
	}

	/// Advance the execution by one step: run one instruction of the
	/// innermost frame, or resolve one frame transition.
	pub fn step<E, T>(&mut self, env: &mut E, tracer: &mut T)
	where
		E: Environment + ?Sized,
		T: Tracer + ?Sized,
	{
		enum Action {
			Invoke(Invoke),
			Finish,
		}

		let config = self.config;
		let action = {
			let top = self
				.machines
				.last_mut()
				.expect("the driver always holds the root machine; qed");

			match top.status() {
				MachineStatus::Running => {
					top.step(env, config, tracer);
					return;
				}
				MachineStatus::InvokeCall(_) => match top.take_invoke() {
					Some(invoke) => Action::Invoke(invoke),
					None => return,
				},
				MachineStatus::Exited(_) => Action::Finish,
			}
		};

		match action {
			Action::Invoke(invoke) => self.begin_call(invoke, env),
			Action::Finish => self.finish_frame(env),
		}
	}

	/// Run the execution to completion.
	pub fn fire<E, T>(&mut self, env: &mut E, tracer: &mut T) -> ExitReason
	where
		E: Environment + ?Sized,
		T: Tracer + ?Sized,
	{
		loop {
			if let VmStatus::Exited(reason) = self.status() {
				return reason;
			}
			self.step(env, tracer);
		}
	}

	// Dispatch a staged sub-call. The offered gas is already charged to
	// the parent; when the call never runs it flows straight back.
	fn begin_call<E: Environment + ?Sized>(&mut self, invoke: Invoke, env: &mut E) {
		let Invoke {
			closure,
			ret_offset,
			ret_len,
		} = invoke;
		let offered = closure.gas;

		let parent = self
			.machines
			.last_mut()
			.expect("begin_call runs with the invoking machine on the stack; qed");

		if env.depth() + 1 > self.config.max_call_depth {
			debug!(target: "vm", "call depth limit reached at {}", env.depth());
			parent.closure.refund_gas(offered);
			return;
		}

		env.enter();
		if env
			.transfer(closure.caller, closure.address, closure.value)
			.is_err()
		{
			env.exit_revert();
			parent.closure.refund_gas(offered);
			return;
		}
		env.set_depth(env.depth() + 1);

		self.pending.push(PendingCall {
			ret_offset,
			ret_len,
		});
		self.machines.push(Machine::new(closure, self.config));
	}

	// Resolve a finished nested frame against its parent: merge or
	// discard the journal, refund or forfeit gas, write the return bytes.
	fn finish_frame<E: Environment + ?Sized>(&mut self, env: &mut E) {
		if self.machines.len() <= 1 {
			return;
		}

		let child = self
			.machines
			.pop()
			.expect("checked the stack holds a nested frame; qed");
		let pending = self
			.pending
			.pop()
			.expect("one pending call per nested frame; qed");
		let reason = match child.status() {
			MachineStatus::Exited(reason) => *reason,
			_ => return,
		};

		env.set_depth(env.depth().saturating_sub(1));
		let parent = self
			.machines
			.last_mut()
			.expect("the parent frame remains on the stack; qed");

		match reason {
			ExitReason::Succeed(_) => {
				env.exit_commit();
				parent.closure.refund_gas(child.closure().gas);

				let retval = child.retval();
				let len = pending.ret_len.min(U256::from(retval.len()));
				if !len.is_zero() {
					if pending.ret_offset <= U256::from(usize::MAX)
						&& pending
							.ret_offset
							.checked_add(len)
							.map_or(false, |end| end <= U256::from(usize::MAX))
					{
						parent
							.memory
							.write(pending.ret_offset.as_usize(), &retval[..len.as_usize()]);
					} else {
						debug!(target: "vm", "call return region out of range, dropped");
					}
				}
			}
			ExitReason::Error(_) => {
				// Child gas is forfeited; the parent sees an empty
				// return and continues.
				env.exit_revert();
			}
		}
	}
}

/// Execute a message call against `address`'s code. Returns the exit
/// reason, the return bytes and the remaining gas.
#[allow(clippy::too_many_arguments)]
pub fn call<E: Environment + ?Sized, T: Tracer + ?Sized>(
	env: &mut E,
	config: &VmConfig,
	caller: H160,
	address: H160,
	input: Vec<u8>,
	gas: U256,
	gas_price: U256,
	value: U256,
	tracer: &mut T,
) -> (ExitReason, Vec<u8>, U256) {
	let code = Rc::new(env.code(address));
	let closure = Closure::new(caller, address, code, input, value, gas, gas_price);
	execute_closure(env, config, closure, tracer)
}

/// Execute `address`'s code in the caller's own storage context.
#[allow(clippy::too_many_arguments)]
pub fn call_code<E: Environment + ?Sized, T: Tracer + ?Sized>(
	env: &mut E,
	config: &VmConfig,
	caller: H160,
	address: H160,
	input: Vec<u8>,
	gas: U256,
	gas_price: U256,
	value: U256,
	tracer: &mut T,
) -> (ExitReason, Vec<u8>, U256) {
	let code = Rc::new(env.code(address));
	let closure = Closure::new(caller, caller, code, input, value, gas, gas_price);
	execute_closure(env, config, closure, tracer)
}

/// Install contract code at an address, transferring the endowment.
/// Creation-time execution is a host concern and does not run here.
pub fn create<E: Environment + ?Sized>(
	env: &mut E,
	caller: H160,
	address: H160,
	code: Vec<u8>,
	value: U256,
) -> Result<(), ExitException> {
	env.enter();
	if let Err(e) = env.transfer(caller, address, value) {
		env.exit_revert();
		return Err(e);
	}
	env.set_code(address, code);
	env.exit_commit();
	Ok(())
}

fn execute_closure<E: Environment + ?Sized, T: Tracer + ?Sized>(
	env: &mut E,
	config: &VmConfig,
	closure: Closure,
	tracer: &mut T,
) -> (ExitReason, Vec<u8>, U256) {
	env.enter();
	if let Err(e) = env.transfer(closure.caller, closure.address, closure.value) {
		// The transfer never happened; the caller keeps its gas.
		env.exit_revert();
		let gas = closure.gas;
		return (ExitReason::Error(e), Vec::new(), gas);
	}

	let mut vm = Vm::new(config, closure);
	let reason = vm.fire(env, tracer);
	if reason.is_succeed() {
		env.exit_commit();
	} else {
		env.exit_revert();
	}

	(reason, vm.output().to_vec(), vm.gas_remaining())
}
