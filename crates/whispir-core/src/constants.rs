/// Reference ring size: N = 2^12 = 4096 slots, group modulus 8192.
pub const DEFAULT_LOG_N: u32 = 12;

/// Largest supported log2(N). Keeps M = 2N <= 2^31 so the product of two
/// reduced residues fits in a u64.
pub const MAX_LOG_N: u32 = 30;

/// Smallest generator considered. 1 is the identity and even residues are
/// not units mod 2N.
pub const FIRST_GENERATOR: u64 = 3;

/// Pair search reports outer generator `g` when `g % interval == 1`.
pub const PAIR_PROGRESS_INTERVAL: u64 = 1000;

/// Triple search reports outer generator `f` when `f % interval == 1`.
pub const TRIPLE_PROGRESS_INTERVAL: u64 = 100;
