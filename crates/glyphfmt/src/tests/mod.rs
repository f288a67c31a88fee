
/// Iteration count for quickcheck properties.
pub(crate) fn quickcheck_tests() -> u64 {
    if cfg!(miri) || cfg!(feature = "test-fast") {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}
