//! Word arithmetic helpers. Everything is modulo 2^256; division and
//! remainder by zero yield zero, which is a consensus choice and never a
//! fault.
//!
//! There is no separate signed type. A word `w` at or above 2^255 stands
//! for the negative integer `w - 2^256`; the signed operations split each
//! operand into sign and magnitude around that boundary, compute on the
//! magnitudes, and fold the result back through two's complement.

use primitive_types::U256;

#[inline]
pub fn div(x: U256, y: U256) -> U256 {
	if y.is_zero() {
		U256::zero()
	} else {
		x / y
	}
}

#[inline]
pub fn rem(x: U256, y: U256) -> U256 {
	if y.is_zero() {
		U256::zero()
	} else {
		x % y
	}
}

fn is_negative(w: U256) -> bool {
	w.bit(255)
}

// Magnitude of the signed reading of `w`. The most negative word maps to
// itself (2^255 negates to 2^255), which is exactly its magnitude.
fn magnitude(w: U256) -> U256 {
	if is_negative(w) {
		neg(w)
	} else {
		w
	}
}

#[inline]
pub fn sdiv(x: U256, y: U256) -> U256 {
	if y.is_zero() {
		return U256::zero();
	}

	// Quotient truncates toward zero; negative iff the signs disagree.
	// No special case for min / -1: the magnitudes give 2^255, and the
	// agreeing signs leave it as-is, which is the wrapped result.
	let quotient = magnitude(x) / magnitude(y);
	if is_negative(x) == is_negative(y) {
		quotient
	} else {
		neg(quotient)
	}
}

#[inline]
pub fn srem(x: U256, y: U256) -> U256 {
	if y.is_zero() {
		return U256::zero();
	}

	// The sign of the remainder follows the dividend.
	let remainder = magnitude(x) % magnitude(y);
	if is_negative(x) {
		neg(remainder)
	} else {
		remainder
	}
}

#[inline]
pub fn exp(base: U256, power: U256) -> U256 {
	let mut base = base;
	let mut power = power;
	let mut r = U256::one();

	while !power.is_zero() {
		if !(power & U256::one()).is_zero() {
			r = r.overflowing_mul(base).0;
		}
		power = power >> 1usize;
		base = base.overflowing_mul(base).0;
	}

	r
}

#[inline]
pub fn neg(x: U256) -> U256 {
	U256::zero().overflowing_sub(x).0
}

#[inline]
pub fn not(x: U256) -> U256 {
	!x
}

/// The `index`-th byte of `word`, counted from the most significant;
/// zero when the index is past the word.
#[inline]
pub fn byte(index: U256, word: U256) -> U256 {
	if index >= U256::from(32u64) {
		return U256::zero();
	}
	U256::from(word.byte(31 - index.as_usize()))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn neg_u(v: u64) -> U256 {
		neg(U256::from(v))
	}

	fn word_min() -> U256 {
		U256::one() << 255usize
	}

	#[test]
	fn division_by_zero_is_zero() {
		assert_eq!(div(U256::from(42), U256::zero()), U256::zero());
		assert_eq!(rem(U256::from(42), U256::zero()), U256::zero());
		assert_eq!(sdiv(neg_u(42), U256::zero()), U256::zero());
		assert_eq!(srem(neg_u(42), U256::zero()), U256::zero());
	}

	#[test]
	fn signed_division_follows_sign_rule() {
		// Quotient is negative exactly when the operand signs disagree.
		assert_eq!(sdiv(U256::from(42), U256::from(7)), U256::from(6));
		assert_eq!(sdiv(neg_u(42), U256::from(7)), neg_u(6));
		assert_eq!(sdiv(U256::from(42), neg_u(7)), neg_u(6));
		assert_eq!(sdiv(neg_u(42), neg_u(7)), U256::from(6));
	}

	#[test]
	fn signed_division_truncates_toward_zero() {
		assert_eq!(sdiv(U256::from(7), U256::from(2)), U256::from(3));
		assert_eq!(sdiv(neg_u(7), U256::from(2)), neg_u(3));
		// A quotient of zero has no sign to flip.
		assert_eq!(sdiv(U256::one(), neg_u(2)), U256::zero());
	}

	#[test]
	fn signed_division_boundary_words() {
		// The most negative word divided by -1 cannot be represented and
		// wraps back onto itself.
		assert_eq!(sdiv(word_min(), neg_u(1)), word_min());
		assert_eq!(sdiv(word_min(), U256::one()), word_min());
		assert_eq!(sdiv(word_min(), word_min()), U256::one());
		assert_eq!(sdiv(word_min(), U256::from(2)), neg_u(1) << 254usize);
	}

	#[test]
	fn signed_remainder_follows_dividend() {
		assert_eq!(srem(U256::from(42), U256::from(5)), U256::from(2));
		assert_eq!(srem(neg_u(42), U256::from(5)), neg_u(2));
		assert_eq!(srem(U256::from(42), neg_u(5)), U256::from(2));
		assert_eq!(srem(neg_u(42), neg_u(5)), neg_u(2));
		assert_eq!(srem(word_min(), neg_u(1)), U256::zero());
	}

	#[test]
	fn exp_wraps_modulo_word() {
		assert_eq!(exp(U256::from(2), U256::from(10)), U256::from(1024));
		assert_eq!(exp(U256::from(2), U256::from(256)), U256::zero());
		assert_eq!(exp(U256::from(3), U256::zero()), U256::one());
	}

	#[test]
	fn neg_is_twos_complement() {
		assert_eq!(neg(U256::zero()), U256::zero());
		assert_eq!(neg(U256::one()), U256::MAX);
		assert_eq!(neg(neg_u(7)), U256::from(7));
	}

	#[test]
	fn byte_extracts_big_endian() {
		let word = U256::from_big_endian(&{
			let mut b = [0u8; 32];
			b[0] = 0xaa;
			b[31] = 0xbb;
			b
		});
		assert_eq!(byte(U256::zero(), word), U256::from(0xaa));
		assert_eq!(byte(U256::from(31), word), U256::from(0xbb));
		assert_eq!(byte(U256::from(32), word), U256::zero());
	}
}
