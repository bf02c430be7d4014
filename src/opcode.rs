/// Opcode newtype. One-to-one corresponding to an `u8` value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Opcode(pub u8);

impl Opcode {
	/// `STOP`
	pub const STOP: Opcode = Opcode(0x00);
	/// `ADD`
	pub const ADD: Opcode = Opcode(0x01);
	/// `MUL`
	pub const MUL: Opcode = Opcode(0x02);
	/// `SUB`
	pub const SUB: Opcode = Opcode(0x03);
	/// `DIV`
	pub const DIV: Opcode = Opcode(0x04);
	/// `SDIV`
	pub const SDIV: Opcode = Opcode(0x05);
	/// `MOD`
	pub const MOD: Opcode = Opcode(0x06);
	/// `SMOD`
	pub const SMOD: Opcode = Opcode(0x07);
	/// `EXP`
	pub const EXP: Opcode = Opcode(0x08);
	/// `NEG`
	pub const NEG: Opcode = Opcode(0x09);
	/// `LT`
	pub const LT: Opcode = Opcode(0x0a);
	/// `GT`
	pub const GT: Opcode = Opcode(0x0b);
	/// `EQ`
	pub const EQ: Opcode = Opcode(0x0c);
	/// `NOT`
	pub const NOT: Opcode = Opcode(0x0d);

	/// `AND`
	pub const AND: Opcode = Opcode(0x10);
	/// `OR`
	pub const OR: Opcode = Opcode(0x11);
	/// `XOR`
	pub const XOR: Opcode = Opcode(0x12);
	/// `BYTE`
	pub const BYTE: Opcode = Opcode(0x13);

	/// `SHA3`. Keccak-256; the name predates the rename and matches the
	/// bytecode table.
	pub const SHA3: Opcode = Opcode(0x20);

	/// `ADDRESS`
	pub const ADDRESS: Opcode = Opcode(0x30);
	/// `BALANCE`
	pub const BALANCE: Opcode = Opcode(0x31);
	/// `ORIGIN`
	pub const ORIGIN: Opcode = Opcode(0x32);
	/// `CALLER`
	pub const CALLER: Opcode = Opcode(0x33);
	/// `CALLVALUE`
	pub const CALLVALUE: Opcode = Opcode(0x34);
	/// `CALLDATA`
	pub const CALLDATA: Opcode = Opcode(0x35);
	/// `CALLDATASIZE`
	pub const CALLDATASIZE: Opcode = Opcode(0x36);
	/// `GASPRICE`
	pub const GASPRICE: Opcode = Opcode(0x37);

	/// `PREVHASH`
	pub const PREVHASH: Opcode = Opcode(0x40);
	/// `COINBASE`
	pub const COINBASE: Opcode = Opcode(0x41);
	/// `TIMESTAMP`
	pub const TIMESTAMP: Opcode = Opcode(0x42);
	/// `NUMBER`
	pub const NUMBER: Opcode = Opcode(0x43);
	/// `DIFFICULTY`
	pub const DIFFICULTY: Opcode = Opcode(0x44);
	/// `GASLIMIT`
	pub const GASLIMIT: Opcode = Opcode(0x45);

	/// `PUSH`, with a 32-byte big-endian immediate.
	pub const PUSH: Opcode = Opcode(0x50);
	/// `POP`
	pub const POP: Opcode = Opcode(0x51);
	/// `DUP`
	pub const DUP: Opcode = Opcode(0x52);
	/// `SWAP`
	pub const SWAP: Opcode = Opcode(0x53);
	/// `MLOAD`
	pub const MLOAD: Opcode = Opcode(0x54);
	/// `MSTORE`
	pub const MSTORE: Opcode = Opcode(0x55);
	/// `MSTORE8`
	pub const MSTORE8: Opcode = Opcode(0x56);
	/// `SLOAD`
	pub const SLOAD: Opcode = Opcode(0x57);
	/// `SSTORE`
	pub const SSTORE: Opcode = Opcode(0x58);
	/// `JUMP`
	pub const JUMP: Opcode = Opcode(0x59);
	/// `JUMPI`
	pub const JUMPI: Opcode = Opcode(0x5a);
	/// `PC`
	pub const PC: Opcode = Opcode(0x5b);
	/// `MSIZE`
	pub const MSIZE: Opcode = Opcode(0x5c);

	/// `CREATE`. Present in the gas table; creation runs at the host
	/// level, so the dispatcher treats the byte as unmapped.
	pub const CREATE: Opcode = Opcode(0x60);
	/// `CALL`
	pub const CALL: Opcode = Opcode(0x61);
	/// `RETURN`
	pub const RETURN: Opcode = Opcode(0x62);

	/// `LOG`, the diagnostic trace opcode.
	pub const LOG: Opcode = Opcode(0x70);
	/// `SUICIDE`, reserved.
	pub const SUICIDE: Opcode = Opcode(0x7f);
	/// `PUSH20`, with a 20-byte big-endian immediate.
	pub const PUSH20: Opcode = Opcode(0x80);
}

impl Opcode {
	/// Length of the immediate following the opcode byte, if any.
	pub const fn immediate_len(&self) -> Option<usize> {
		match *self {
			Opcode::PUSH => Some(32),
			Opcode::PUSH20 => Some(20),
			_ => None,
		}
	}

	/// Mnemonic of the opcode, `None` for unmapped bytes.
	pub const fn name(&self) -> Option<&'static str> {
		Some(match *self {
			Opcode::STOP => "STOP",
			Opcode::ADD => "ADD",
			Opcode::MUL => "MUL",
			Opcode::SUB => "SUB",
			Opcode::DIV => "DIV",
			Opcode::SDIV => "SDIV",
			Opcode::MOD => "MOD",
			Opcode::SMOD => "SMOD",
			Opcode::EXP => "EXP",
			Opcode::NEG => "NEG",
			Opcode::LT => "LT",
			Opcode::GT => "GT",
			Opcode::EQ => "EQ",
			Opcode::NOT => "NOT",
			Opcode::AND => "AND",
			Opcode::OR => "OR",
			Opcode::XOR => "XOR",
			Opcode::BYTE => "BYTE",
			Opcode::SHA3 => "SHA3",
			Opcode::ADDRESS => "ADDRESS",
			Opcode::BALANCE => "BALANCE",
			Opcode::ORIGIN => "ORIGIN",
			Opcode::CALLER => "CALLER",
			Opcode::CALLVALUE => "CALLVALUE",
			Opcode::CALLDATA => "CALLDATA",
			Opcode::CALLDATASIZE => "CALLDATASIZE",
			Opcode::GASPRICE => "GASPRICE",
			Opcode::PREVHASH => "PREVHASH",
			Opcode::COINBASE => "COINBASE",
			Opcode::TIMESTAMP => "TIMESTAMP",
			Opcode::NUMBER => "NUMBER",
			Opcode::DIFFICULTY => "DIFFICULTY",
			Opcode::GASLIMIT => "GASLIMIT",
			Opcode::PUSH => "PUSH",
			Opcode::POP => "POP",
			Opcode::DUP => "DUP",
			Opcode::SWAP => "SWAP",
			Opcode::MLOAD => "MLOAD",
			Opcode::MSTORE => "MSTORE",
			Opcode::MSTORE8 => "MSTORE8",
			Opcode::SLOAD => "SLOAD",
			Opcode::SSTORE => "SSTORE",
			Opcode::JUMP => "JUMP",
			Opcode::JUMPI => "JUMPI",
			Opcode::PC => "PC",
			Opcode::MSIZE => "MSIZE",
			Opcode::CREATE => "CREATE",
			Opcode::CALL => "CALL",
			Opcode::RETURN => "RETURN",
			Opcode::LOG => "LOG",
			Opcode::SUICIDE => "SUICIDE",
			Opcode::PUSH20 => "PUSH20",
			_ => return None,
		})
	}
}
