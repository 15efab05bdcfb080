//! Tests against the filter resources shipped at the workspace root.

use std::path::Path;

use hypnos_filters::{DEFAULT_BIORTHOGONAL, DEFAULT_QSHIFT, FilterBank};

fn shipped_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../filters"))
}

#[test]
fn shipped_resources_load_with_default_names() {
    let bank = FilterBank::load(shipped_dir(), DEFAULT_BIORTHOGONAL, DEFAULT_QSHIFT).unwrap();
    assert_eq!(bank.biorthogonal().name(), "near_sym_b");
    assert_eq!(bank.qshift().name(), "qshift_b");
}

#[test]
fn shipped_biorthogonal_columns_are_ragged() {
    let bank = FilterBank::load(shipped_dir(), DEFAULT_BIORTHOGONAL, DEFAULT_QSHIFT).unwrap();

    // 13-tap low-pass next to a 19-tap high-pass: the short column's
    // trailing cells are empty, not zero.
    let h0o = bank.biorthogonal().require("h0o").unwrap();
    let h1o = bank.biorthogonal().require("h1o").unwrap();
    assert_eq!(h0o.len(), 13);
    assert_eq!(h1o.len(), 19);

    // Both taps are symmetric about their centre.
    assert_eq!(h0o[0], *h0o.last().unwrap());
    assert_eq!(h1o[0], *h1o.last().unwrap());
    assert!((h0o[6] - 0.55546875).abs() < 1e-12);
}

#[test]
fn shipped_qshift_columns_are_paired() {
    let bank = FilterBank::load(shipped_dir(), DEFAULT_BIORTHOGONAL, DEFAULT_QSHIFT).unwrap();

    let h0a = bank.qshift().require("h0a").unwrap();
    let h1a = bank.qshift().require("h1a").unwrap();
    assert_eq!(h0a.len(), 14);
    assert_eq!(h1a.len(), 14);

    // h1a is the time-reverse of h0a with alternating signs.
    for (n, value) in h1a.iter().enumerate() {
        let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
        assert!((value - sign * h0a[h0a.len() - 1 - n]).abs() < 1e-12);
    }
}
