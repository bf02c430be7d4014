//! Word, hash and address conversions, and keccak-256.

use primitive_types::{H160, H256, U256};
use sha3::{Digest, Keccak256};

/// Convert [U256] into [H256].
pub fn u256_to_h256(v: U256) -> H256 {
	let mut h = H256::zero();
	v.to_big_endian(&mut h[..]);
	h
}

/// Convert [H256] into [U256].
pub fn h256_to_u256(v: H256) -> U256 {
	U256::from_big_endian(&v[..])
}

/// Convert [U256] into [H160], taking the low 20 bytes.
pub fn u256_to_address(v: U256) -> H160 {
	let h = u256_to_h256(v);
	H160::from_slice(&h[12..])
}

/// Convert [H160] into [U256], zero-extended.
pub fn address_to_u256(a: H160) -> U256 {
	U256::from_big_endian(a.as_bytes())
}

/// Keccak-256 digest of an arbitrary byte buffer.
pub fn keccak256(data: &[u8]) -> H256 {
	H256::from_slice(Keccak256::digest(data).as_slice())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn word_address_round_trip() {
		let a = H160::from_slice(&[0x11u8; 20]);
		assert_eq!(u256_to_address(address_to_u256(a)), a);
	}

	#[test]
	fn address_conversion_truncates_high_bytes() {
		let v = U256::from_big_endian(&[0xffu8; 32]);
		assert_eq!(u256_to_address(v), H160::repeat_byte(0xff));
		assert_eq!(address_to_u256(u256_to_address(v)), v & (U256::MAX >> 96usize));
	}

	#[test]
	fn keccak_empty_input() {
		// Well-known keccak-256 of the empty string.
		assert_eq!(
			hex::encode(keccak256(&[])),
			"c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
		);
	}
}
