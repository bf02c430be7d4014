//! A deterministic, gas-metered stack virtual machine for contract
//! execution.
//!
//! The interpreter runs byte-coded programs against a persistent
//! account/storage state behind an [Environment], metering computational
//! and storage effort with a configurable gas schedule ([VmConfig]). A
//! transaction starts as a single [Closure]; nested contract calls push
//! further frames onto an explicit machine stack driven by [Vm].

#![forbid(unsafe_code)]

mod backend;
mod closure;
mod disasm;
mod environment;
mod error;
mod eval;
mod gasometer;
mod machine;
mod memory;
mod opcode;
mod stack;
mod storage;
mod tracing;
mod utils;
mod vm;

pub use crate::backend::{Account, MemoryEnvironment, Vicinity};
pub use crate::closure::Closure;
pub use crate::disasm::disassemble;
pub use crate::environment::{Environment, Log};
pub use crate::error::{ExitException, ExitReason, ExitSucceed};
pub use crate::eval::{Control, Invoke};
pub use crate::gasometer::VmConfig;
pub use crate::machine::{Machine, MachineStatus};
pub use crate::memory::Memory;
pub use crate::opcode::Opcode;
pub use crate::stack::Stack;
pub use crate::storage::{SstoreKind, StorageView};
pub use crate::tracing::Tracer;
pub use crate::utils::{address_to_u256, h256_to_u256, keccak256, u256_to_address, u256_to_h256};
pub use crate::vm::{call, call_code, create, Vm, VmStatus};
