//! Diagnostic disassembler. Not on the execution path.

use primitive_types::U256;

use crate::opcode::Opcode;

/// Produce a textual listing of a byte-coded program, one entry per
/// instruction, with push immediates expanded as minimal hex literals.
pub fn disassemble(code: &[u8]) -> Vec<String> {
	let mut asm = Vec::new();
	let mut pc = 0usize;

	while pc < code.len() {
		let opcode = Opcode(code[pc]);
		match opcode.name() {
			Some(name) => asm.push(name.to_string()),
			None => asm.push(format!("UNKNOWN(0x{:02x})", opcode.0)),
		}

		if let Some(len) = opcode.immediate_len() {
			let mut bytes = vec![0u8; 32];
			for index in 0..len {
				if let Some(v) = code.get(pc + 1 + index) {
					bytes[32 - len + index] = *v;
				}
			}
			asm.push(format!("{:#x}", U256::from_big_endian(&bytes)));
			pc += len;
		}

		pc += 1;
	}

	asm
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn listing_expands_immediates() {
		let mut code = vec![Opcode::PUSH.0];
		code.extend_from_slice(&{
			let mut imm = [0u8; 32];
			imm[31] = 0x07;
			imm
		});
		code.push(Opcode::ADD.0);
		code.push(0xfe);

		assert_eq!(disassemble(&code), ["PUSH", "0x7", "ADD", "UNKNOWN(0xfe)"]);
	}

	#[test]
	fn truncated_immediate_is_zero_filled() {
		let code = vec![Opcode::PUSH20.0, 0xab];
		// 19 missing trailing bytes read as zero.
		let expected = format!("{:#x}", U256::from(0xabu64) << (8usize * 19));
		assert_eq!(disassemble(&code), vec!["PUSH20".to_string(), expected]);
	}
}
