//! Number theory kernel
//!
//! Pure, deterministic computation routines backing the dispatch API.
//! All functions are total over their documented input domains and never
//! panic for any integer input; results that exceed 64-bit range are
//! unspecified (they reduce modulo 2^64 rather than abort).

/// Returns the first `n` terms of the Fibonacci sequence, starting 0, 1.
///
/// `n = 0` yields an empty vector. Terms beyond `fibonacci(93)` exceed
/// `u64::MAX` and wrap.
pub fn fibonacci(n: u32) -> Vec<u64> {
    let n = n as usize;
    let mut terms: Vec<u64> = Vec::with_capacity(n);
    for i in 0..n {
        let next = match i {
            0 => 0,
            1 => 1,
            _ => terms[i - 1].wrapping_add(terms[i - 2]),
        };
        terms.push(next);
    }
    terms
}

/// Trial-division primality test, O(sqrt x).
///
/// Integers below 2 are not prime; even divisors are skipped after 2.
pub fn is_prime(x: i64) -> bool {
    if x <= 1 {
        return false;
    }
    if x <= 3 {
        return true;
    }
    if x % 2 == 0 {
        return false;
    }
    let mut d: i64 = 3;
    while d.saturating_mul(d) <= x {
        if x % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Euclidean GCD over absolute values; `gcd(a, 0) == |a|`.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a as i64
}

/// GCD of a whole sequence. Folding from 0 makes this total: an empty
/// slice yields 0, a single element yields its absolute value.
pub fn gcd_all(values: &[i64]) -> i64 {
    values.iter().fold(0, |acc, &v| gcd(acc, v))
}

/// LCM via `|a / gcd(a, b) * b|`; 0 if either operand is 0.
pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b)).wrapping_mul(b).wrapping_abs()
}

/// LCM of a whole sequence, folded from 1.
pub fn lcm_all(values: &[i64]) -> i64 {
    values.iter().fold(1, |acc, &v| lcm(acc, v))
}
