/// Accumulates the leading bits shared by a set of `f64` values.
///
/// The result is the value obtained by keeping the common sign, exponent and
/// most significant mantissa bits and zeroing the rest. Values that differ in
/// sign or exponent share nothing, so the common value becomes 0.
#[derive(Debug, Clone)]
pub struct CommonBits {
    is_first: bool,
    common_mantissa_bits: u32,
    common_bits: i64,
    common_sign_exp: i64,
}

impl Default for CommonBits {
    fn default() -> Self {
        Self {
            is_first: true,
            common_mantissa_bits: 53,
            common_bits: 0,
            common_sign_exp: 0,
        }
    }
}

impl CommonBits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds another value into the accumulator.
    pub fn add(&mut self, num: f64) {
        let num_bits = to_bits(num);
        if self.is_first {
            self.common_bits = num_bits;
            self.common_sign_exp = sign_exp_bits(num_bits);
            self.is_first = false;
            return;
        }

        if sign_exp_bits(num_bits) != self.common_sign_exp {
            self.common_bits = 0;
            return;
        }

        self.common_mantissa_bits = num_common_most_sig_mantissa_bits(self.common_bits, num_bits);
        self.common_bits = zero_lower_bits(self.common_bits, 64 - (12 + self.common_mantissa_bits));
    }

    /// The common value of everything added so far (0 before the first add).
    #[must_use]
    pub fn common(&self) -> f64 {
        #[allow(clippy::cast_sign_loss)]
        f64::from_bits(self.common_bits as u64)
    }
}

#[allow(clippy::cast_possible_wrap)]
fn to_bits(num: f64) -> i64 {
    num.to_bits() as i64
}

/// Sign and exponent of an IEEE-754 bit pattern (arithmetic shift).
fn sign_exp_bits(num: i64) -> i64 {
    num >> 52
}

/// Counts matching bits from bit 52 downwards, stopping at the first mismatch.
fn num_common_most_sig_mantissa_bits(num1: i64, num2: i64) -> u32 {
    let mut count = 0;
    for i in (0..=52).rev() {
        if bit(num1, i) != bit(num2, i) {
            return count;
        }
        count += 1;
    }
    52
}

fn zero_lower_bits(bits: i64, n_bits: u32) -> i64 {
    if n_bits >= 64 {
        return 0;
    }
    let inv_mask = (1i64 << n_bits) - 1;
    bits & !inv_mask
}

fn bit(bits: i64, i: u32) -> bool {
    bits & (1i64 << i) != 0
}
